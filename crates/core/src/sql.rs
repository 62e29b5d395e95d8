// Parameterized SQL assembly
//
// Query text and its bound arguments are built together: binding an argument
// appends it to the list and returns the placeholder that refers to it. Text
// never contains caller-supplied values, only `$n` references.

use std::fmt;

/// A bound argument, tagged with the Postgres type it is sent as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    /// BIGINT value (ids, cursors, limits, offsets)
    BigInt(i64),
    /// INTEGER array subscript
    Index(i32),
    /// TEXT value
    Text(String),
}

/// Reference to a bound argument. Renders as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(usize);

impl Placeholder {
    pub fn position(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Finished query: text plus arguments in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    pub text: String,
    pub args: Vec<SqlArg>,
}

/// Accumulates query text and arguments.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    text: String,
    args: Vec<SqlArg>,
}

impl SqlBuilder {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            text: initial.into(),
            args: Vec::new(),
        }
    }

    /// Bind an argument and return its placeholder.
    pub fn bind(&mut self, arg: SqlArg) -> Placeholder {
        self.args.push(arg);
        Placeholder(self.args.len())
    }

    pub fn bind_bigint(&mut self, value: i64) -> Placeholder {
        self.bind(SqlArg::BigInt(value))
    }

    pub fn bind_index(&mut self, value: i32) -> Placeholder {
        self.bind(SqlArg::Index(value))
    }

    pub fn bind_text(&mut self, value: impl Into<String>) -> Placeholder {
        self.bind(SqlArg::Text(value.into()))
    }

    /// Append raw SQL. Only fixed fragments and placeholders belong here.
    pub fn push(&mut self, sql: impl AsRef<str>) -> &mut Self {
        self.text.push_str(sql.as_ref());
        self
    }

    pub fn build(self) -> SqlQuery {
        SqlQuery {
            text: self.text,
            args: self.args,
        }
    }
}
