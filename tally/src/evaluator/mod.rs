//! Evaluation of a single parsed line
//!
//! The evaluator holds no state. Each call takes the scope built by the lines
//! above and returns the line's value together with the scope for the next
//! line.

pub mod expression;
pub mod operations;

use crate::{Expression, Scope, TallyResult};

/// Evaluates one line's expression against a scope
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `expr` against `scope`.
    ///
    /// The returned scope carries every variable assigned during the walk,
    /// whether or not the expression as a whole succeeded. Assignments are
    /// applied left to right, so on failure it holds those made before the
    /// failing subexpression.
    pub fn evaluate(&self, expr: &Expression, scope: &Scope) -> (TallyResult<f64>, Scope) {
        let mut working = scope.clone();
        let result = expression::evaluate_expression(expr, &mut working);
        (result, working)
    }
}
