use crate::ast::Span;
use std::fmt;

/// Detailed error information with source location
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub suggestion: Option<String>,
}

/// Error types for tally, scoped to a single line.
///
/// None of these abort a sheet: the engine turns each one into an error
/// result for the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum TallyError {
    /// Unrecognized character or malformed `$` token
    Lex(Box<ErrorDetails>),

    /// Grammar violation with source location
    Parse(Box<ErrorDetails>),

    /// `$name` is not bound by any earlier line
    UndefinedVariable(String),

    /// `$n` refers to a line with no successful result above the current one
    UndefinedLine(usize),

    /// Division with a zero divisor
    DivisionByZero { dividend: f64 },

    /// Result is not a real number, e.g. the square root of a negative
    NotANumber,

    /// Result does not fit in a 64-bit float
    Overflow { negative: bool },

    /// Engine error without a source location
    Engine(String),

    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl TallyError {
    /// Create a lexer error at `span`
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self::Lex(Box::new(ErrorDetails {
            message: message.into(),
            span,
            suggestion: None,
        }))
    }

    /// Create a lexer error with suggestion
    pub fn lex_with_suggestion(
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Lex(Box::new(ErrorDetails {
            message: message.into(),
            span,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Create a parse error at `span`
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Source details for errors that point into the line
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            TallyError::Lex(details) | TallyError::Parse(details) => Some(details),
            _ => None,
        }
    }

    /// The short message shown next to a failed line.
    ///
    /// Integration layers match on these strings, so they must not change.
    pub fn line_message(&self) -> String {
        match self {
            TallyError::Lex(_)
            | TallyError::Parse(_)
            | TallyError::Engine(_)
            | TallyError::ResourceLimitExceeded { .. } => "?".to_string(),
            TallyError::UndefinedVariable(name) => format!("? ${}", name),
            TallyError::UndefinedLine(line) => format!("? ${}", line),
            TallyError::DivisionByZero { dividend } => {
                if *dividend == 0.0 || dividend.is_nan() {
                    "NaN".to_string()
                } else if *dividend > 0.0 {
                    "∞".to_string()
                } else {
                    "-∞".to_string()
                }
            }
            TallyError::NotANumber => "NaN".to_string(),
            TallyError::Overflow { negative: false } => "∞".to_string(),
            TallyError::Overflow { negative: true } => "-∞".to_string(),
        }
    }
}

impl fmt::Display for TallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyError::Lex(details) => {
                write!(f, "Lex error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(f, " at offset {}", details.span.start)
            }
            TallyError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(f, " at offset {}", details.span.start)
            }
            TallyError::UndefinedVariable(name) => write!(f, "Undefined variable: ${}", name),
            TallyError::UndefinedLine(line) => {
                write!(f, "Line ${} has no result above this line", line)
            }
            TallyError::DivisionByZero { .. } => write!(f, "Division by zero"),
            TallyError::NotANumber => write!(f, "Result is not a real number"),
            TallyError::Overflow { .. } => write!(f, "Result is too large to represent"),
            TallyError::Engine(msg) => write!(f, "Engine error: {}", msg),
            TallyError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Resource limit exceeded: {} (limit: {}, actual: {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
        }
    }
}

impl std::error::Error for TallyError {}
