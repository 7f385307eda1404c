//! Floating point arithmetic with the sheet's failure rules
//!
//! Every successful result is finite. Division by zero, NaN and overflow are
//! reported as errors so that they never end up in a scope.

use crate::ast::BinaryOperator;
use crate::{TallyError, TallyResult};

const PERCENT_DENOMINATOR: f64 = 100.0;

/// Perform a binary arithmetic operation.
///
/// # Examples
/// ```text
/// 7 / 2    = 3.5
/// 2 ^ 0.5  = 1.414...
/// 0 ^ 0    = 1
/// 1 / 0    -> DivisionByZero (∞)
/// ```
pub fn arithmetic_operation(left: f64, op: &BinaryOperator, right: f64) -> TallyResult<f64> {
    let result = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => {
            if right == 0.0 {
                return Err(TallyError::DivisionByZero { dividend: left });
            }
            left / right
        }
        BinaryOperator::Power => left.powf(right),
    };

    finite(result)
}

/// `percentage` percent of `base`, e.g. 10% of 200 = 20
pub fn percentage_of(base: f64, percentage: f64) -> TallyResult<f64> {
    finite(base * percentage / PERCENT_DENOMINATOR)
}

/// A bare percentage without a base, e.g. 10% = 0.1
pub fn percentage(value: f64) -> TallyResult<f64> {
    finite(value / PERCENT_DENOMINATOR)
}

pub fn negate(value: f64) -> TallyResult<f64> {
    finite(-value)
}

pub fn square_root(value: f64) -> TallyResult<f64> {
    if value < 0.0 {
        return Err(TallyError::NotANumber);
    }
    finite(value.sqrt())
}

/// Reject NaN and infinities
pub fn finite(value: f64) -> TallyResult<f64> {
    if value.is_nan() {
        Err(TallyError::NotANumber)
    } else if value.is_infinite() {
        Err(TallyError::Overflow {
            negative: value < 0.0,
        })
    } else {
        Ok(value)
    }
}
