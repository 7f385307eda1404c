//! Variable and line-result bindings visible to a line
//!
//! A `Scope` handed out by the engine is a snapshot: public methods never
//! change it in place, they return a new scope.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    /// Maps variable name (without `$`) -> value
    variables: BTreeMap<String, f64>,

    /// Maps 1-based line number -> value.
    /// Only lines that evaluated successfully appear here.
    line_results: BTreeMap<usize, f64>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    pub fn line_result(&self, line_number: usize) -> Option<f64> {
        self.line_results.get(&line_number).copied()
    }

    pub fn variables(&self) -> &BTreeMap<String, f64> {
        &self.variables
    }

    /// Variable names in sorted order, for "insert a variable" pickers
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn line_results(&self) -> &BTreeMap<usize, f64> {
        &self.line_results
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.line_results.is_empty()
    }

    /// New scope with `name` bound to `value`
    pub fn with_variable(&self, name: impl Into<String>, value: f64) -> Self {
        let mut scope = self.clone();
        scope.bind_variable(name, value);
        scope
    }

    /// New scope with the result of `line_number` recorded
    pub fn with_line_result(&self, line_number: usize, value: f64) -> Self {
        let mut scope = self.clone();
        scope.record_line_result(line_number, value);
        scope
    }

    pub(crate) fn bind_variable(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    pub(crate) fn record_line_result(&mut self, line_number: usize, value: f64) {
        self.line_results.insert(line_number, value);
    }
}
