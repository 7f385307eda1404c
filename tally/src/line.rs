use crate::ast::LineId;
use crate::error::TallyError;
use serde::Serialize;

/// Outcome of evaluating one line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LineResult {
    Success(f64),
    /// Stable user-facing message, see [`TallyError::line_message`]
    Error(String),
    /// Blank and comment lines
    Empty,
}

impl LineResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LineResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LineResult::Error(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            LineResult::Success(value) => Some(*value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LineResult::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl From<&TallyError> for LineResult {
    fn from(err: &TallyError) -> Self {
        LineResult::Error(err.line_message())
    }
}

/// One evaluated line of a sheet.
///
/// Lines are rebuilt by every evaluation pass; a `Line` handed to a caller is
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub id: LineId,
    /// 0-based index in the sheet
    pub position: usize,
    pub input: String,
    pub result: LineResult,
    /// Full error behind an `Error` result
    #[serde(skip)]
    pub diagnostic: Option<TallyError>,
}

impl Line {
    /// 1-based number used for display and `$n` references
    pub fn line_number(&self) -> usize {
        self.position + 1
    }
}

/// How a line is treated before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Expression,
}

const COMMENT_PREFIXES: [&str; 2] = ["#", "//"];

/// Classify a line without parsing it
pub fn classify(input: &str) -> LineKind {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        LineKind::Comment
    } else {
        LineKind::Expression
    }
}
