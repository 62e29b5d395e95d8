// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/openapi.json
//
// Generates the spec without connecting to a database or binding a port.

use processed_events_api::openapi::ApiDoc;
use std::process::ExitCode;

fn main() -> ExitCode {
    match ApiDoc::to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            ExitCode::FAILURE
        }
    }
}
