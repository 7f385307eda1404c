//! # Tally Engine
//!
//! **A calculator that thinks in lines**
//!
//! Tally keeps a sheet of independent text lines continuously parsed and
//! evaluated. Each line can use named variables and the results of the lines
//! above it, and every edit immediately updates everything below.
//!
//! ## Quick Start
//!
//! ```rust
//! use tally::{LineResult, Sheet};
//!
//! let mut sheet = Sheet::new();
//! let lines = sheet.evaluate(&["$price = 40", "$price * 3", "$2 + 10%"]);
//! assert_eq!(lines[2].result, LineResult::Success(132.0));
//!
//! // Editing line 1 cascades through the rest of the sheet
//! let lines = sheet.update_line(0, "$price = 50");
//! assert_eq!(lines[2].result, LineResult::Success(165.0));
//! ```
//!
//! ## Core Concepts
//!
//! ### Lines
//! A line is blank, a comment (`#` or `//`), or an expression. Expressions use
//! `+ - * / ^`, postfix `%`, parentheses and `sqrt(...)`.
//!
//! ### References
//! `$name` reads a variable assigned on an earlier line with `$name = ...`.
//! `$n` reads the result of line `n`. Only lines above can be referenced, so
//! cycles cannot be written down.
//!
//! ### Percentages
//! `100 + 10%` adds ten percent of 100; `100 * 10%` multiplies by 0.1.

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod line;
pub mod parser;
pub mod references;
pub mod resource_limits;
pub mod scope;
pub mod serializers;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use ast::{BinaryOperator, Expression, LineId, MathFunction, Span};
pub use engine::Sheet;
pub use error::{ErrorDetails, TallyError};
pub use evaluator::Evaluator;
pub use line::{classify, Line, LineKind, LineResult};
pub use parser::{parse, parse_line};
pub use resource_limits::ResourceLimits;
pub use scope::Scope;

/// Result type for tally operations
pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests;
