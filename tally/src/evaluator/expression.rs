//! Expression evaluation
//!
//! Recursively evaluates one line's expression tree to a number.

use super::operations;
use crate::ast::{BinaryOperator, Expression, MathFunction};
use crate::scope::Scope;
use crate::{TallyError, TallyResult};
use std::sync::Arc;

/// Evaluate an expression against a working scope.
///
/// Assignments bind into `scope` as they are reached, so later parts of the
/// same expression see them. Operands are evaluated left to right.
pub(crate) fn evaluate_expression(expr: &Expression, scope: &mut Scope) -> TallyResult<f64> {
    match expr {
        Expression::Number(value) => operations::finite(*value),

        Expression::BinaryOp(left, op, right) => {
            // The parser shares the left operand with a `+ x%` / `- x%` base;
            // reuse its value rather than walking it twice.
            if let Expression::Percent {
                operand,
                base: Some(base),
            } = right.as_ref()
            {
                if matches!(op, BinaryOperator::Add | BinaryOperator::Subtract)
                    && Arc::ptr_eq(base, left)
                {
                    let left_value = evaluate_expression(left, scope)?;
                    let percentage = evaluate_expression(operand, scope)?;
                    let amount = operations::percentage_of(left_value, percentage)?;
                    return operations::arithmetic_operation(left_value, op, amount);
                }
            }

            let left_value = evaluate_expression(left, scope)?;
            let right_value = evaluate_expression(right, scope)?;
            operations::arithmetic_operation(left_value, op, right_value)
        }

        Expression::UnaryMinus(operand) => {
            let value = evaluate_expression(operand, scope)?;
            operations::negate(value)
        }

        Expression::Percent { operand, base } => match base {
            Some(base) => {
                let base_value = evaluate_expression(base, scope)?;
                let percentage = evaluate_expression(operand, scope)?;
                operations::percentage_of(base_value, percentage)
            }
            None => {
                let value = evaluate_expression(operand, scope)?;
                operations::percentage(value)
            }
        },

        Expression::Variable(name) => scope
            .variable(name)
            .ok_or_else(|| TallyError::UndefinedVariable(name.clone())),

        Expression::LineRef(line_number) => scope
            .line_result(*line_number)
            .ok_or(TallyError::UndefinedLine(*line_number)),

        Expression::Assignment(name, value_expr) => {
            let value = evaluate_expression(value_expr, scope)?;
            scope.bind_variable(name.clone(), value);
            Ok(value)
        }

        Expression::Function(function, argument) => {
            let value = evaluate_expression(argument, scope)?;
            match function {
                MathFunction::Sqrt => operations::square_root(value),
            }
        }
    }
}
