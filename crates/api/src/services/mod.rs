// Services layer for business logic
// Services own result interpretation, calling storage directly

pub mod event;

pub use event::EventService;
