//! Command line tokenizer and reply rendering
//!
//! Replies are printed the way redis-cli shows RESP values.

use std::fmt;

/// Reply to a single command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Status line: OK
    Simple(String),
    /// Error line: ERR message
    Error(String),
    /// Integer: (integer) 1
    Integer(i64),
    /// Optional string: value or (nil)
    Bulk(Option<String>),
    /// List of lines, or (empty)
    Lines(Vec<String>),
}

impl Reply {
    pub fn ok() -> Self {
        Reply::Simple("OK".to_string())
    }

    pub fn err(msg: impl fmt::Display) -> Self {
        Reply::Error(format!("ERR {}", msg))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Simple(s) => write!(f, "{}", s),
            Reply::Error(e) => write!(f, "{}", e),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::Bulk(None) => write!(f, "(nil)"),
            Reply::Bulk(Some(s)) => write!(f, "{}", s),
            Reply::Lines(lines) if lines.is_empty() => write!(f, "(empty)"),
            Reply::Lines(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", i + 1, line)?;
                }
                Ok(())
            }
        }
    }
}

/// Split a command line into words.
///
/// Returns `None` for blank lines and `#` comments.
pub fn tokenize(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.split_whitespace().map(str::to_string).collect())
}
