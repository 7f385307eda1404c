//! AST types
//!
//! This module contains the expression tree produced by the parser and the
//! metadata types used around it:
//! - `Span` for tracking byte ranges within a line
//! - `Expression` for the parsed form of one line
//! - `LineId` and `LineIdGenerator` for identifying lines across edits

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Byte range within a single line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Built-in functions callable as `name(argument)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathFunction {
    Sqrt,
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathFunction::Sqrt => f.write_str("sqrt"),
        }
    }
}

/// Parsed form of one line.
///
/// Subtrees are reference-counted so that a percentage can share its implicit
/// base with the left operand of the enclosing `+`/`-` instead of copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    BinaryOp(Arc<Expression>, BinaryOperator, Arc<Expression>),
    UnaryMinus(Arc<Expression>),
    /// `operand%`, evaluated as `base * operand / 100`, or `operand / 100`
    /// when no base is bound.
    Percent {
        operand: Arc<Expression>,
        base: Option<Arc<Expression>>,
    },
    /// Variable name without the leading `$`
    Variable(String),
    /// 1-based line number
    LineRef(usize),
    Assignment(String, Arc<Expression>),
    Function(MathFunction, Arc<Expression>),
}

impl Expression {
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOp(Arc::new(left), op, Arc::new(right))
    }

    pub fn percent(operand: Expression) -> Self {
        Expression::Percent {
            operand: Arc::new(operand),
            base: None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::BinaryOp(left, op, right) => write!(f, "({} {} {})", left, op, right),
            Expression::UnaryMinus(operand) => write!(f, "-{}", operand),
            Expression::Percent { operand, base } => match base {
                Some(base) => write!(f, "{}% of {}", operand, base),
                None => write!(f, "{}%", operand),
            },
            Expression::Variable(name) => write!(f, "${}", name),
            Expression::LineRef(n) => write!(f, "${}", n),
            Expression::Assignment(name, expr) => write!(f, "${} = {}", name, expr),
            Expression::Function(function, argument) => write!(f, "{}({})", function, argument),
        }
    }
}

/// Stable identifier for a line, kept across edits of other lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineId(u64);

impl LineId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

/// Counter for generating unique line IDs
#[derive(Debug, Default, Clone)]
pub struct LineIdGenerator {
    next_id: u64,
}

impl LineIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        id
    }
}
