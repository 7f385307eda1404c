use crate::ast::{LineId, LineIdGenerator};
use crate::evaluator::Evaluator;
use crate::line::{classify, Line, LineKind, LineResult};
use crate::references::{shift_for_insert, shift_for_removal};
use crate::{parser, ResourceLimits, Scope, TallyError};
use tracing::{debug, trace, warn};

/// A sheet of calculator lines.
///
/// Every edit re-runs a single top-to-bottom pass over all lines. A line only
/// sees the results of lines above it, because its own result is recorded
/// after it is evaluated; references to the current or a later line fail the
/// same way as references to a line that does not exist.
///
/// All mutating operations take `&mut self`, so a pass can never interleave
/// with another edit or with a reader. Callers sharing a sheet between threads
/// wrap it in a lock.
pub struct Sheet {
    lines: Vec<Line>,
    scope: Scope,
    id_gen: LineIdGenerator,
    evaluator: Evaluator,
    limits: ResourceLimits,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::with_limits(ResourceLimits::default())
    }
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        let mut sheet = Self {
            lines: Vec::new(),
            scope: Scope::new(),
            id_gen: LineIdGenerator::new(),
            evaluator: Evaluator,
            limits,
        };
        sheet.clear();
        sheet
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Scope left behind by the most recent pass
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.input.clone()).collect()
    }

    /// Replace the whole sheet with `inputs` and evaluate it.
    ///
    /// Existing line ids are reused by position; extra lines get new ids.
    /// An empty list leaves a single blank line.
    pub fn evaluate<S: AsRef<str>>(&mut self, inputs: &[S]) -> Vec<Line> {
        let mut entries: Vec<(LineId, String)> = inputs
            .iter()
            .enumerate()
            .map(|(position, input)| {
                let id = match self.lines.get(position) {
                    Some(line) => line.id,
                    None => self.id_gen.next_id(),
                };
                (id, input.as_ref().to_string())
            })
            .collect();

        if entries.is_empty() {
            let id = self.lines.first().map(|line| line.id);
            entries.push((id.unwrap_or_else(|| self.id_gen.next_id()), String::new()));
        }

        self.run_pass(entries)
    }

    /// Replace the input at `index`, growing the sheet with blank lines if
    /// `index` is past the end.
    ///
    /// An `index` at or beyond `max_lines` is refused and the sheet is left
    /// as it is.
    pub fn update_line(&mut self, index: usize, input: &str) -> Vec<Line> {
        if !self.can_hold(index.saturating_add(1)) {
            return self.refuse_growth(index.saturating_add(1));
        }

        let mut entries = self.entries();
        while entries.len() <= index {
            entries.push((self.id_gen.next_id(), String::new()));
        }
        entries[index].1 = input.to_string();

        self.run_pass(entries)
    }

    /// Insert a new line before `index` (or at the end if `index` is past it).
    ///
    /// References to the line at `index` and below are shifted down by one so
    /// they keep pointing at the same lines.
    pub fn insert_line(&mut self, index: usize, input: &str) -> Vec<Line> {
        if !self.can_hold(self.lines.len() + 1) {
            return self.refuse_growth(self.lines.len() + 1);
        }

        let index = index.min(self.lines.len());
        let inserted_line = index + 1;

        let mut entries: Vec<(LineId, String)> = self
            .lines
            .iter()
            .map(|line| {
                let input = shift_for_insert(&line.input, inserted_line).into_owned();
                (line.id, input)
            })
            .collect();
        entries.insert(index, (self.id_gen.next_id(), input.to_string()));

        self.run_pass(entries)
    }

    /// Remove the line at `index`.
    ///
    /// References below the removed line are shifted up by one. References to
    /// the removed line itself are kept as written and no longer resolve. An
    /// out-of-range `index` leaves the inputs as they are.
    pub fn remove_line(&mut self, index: usize) -> Vec<Line> {
        if index >= self.lines.len() {
            return self.run_pass(self.entries());
        }

        let removed_line = index + 1;
        let mut entries: Vec<(LineId, String)> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .map(|(_, line)| {
                let input = shift_for_removal(&line.input, removed_line).into_owned();
                (line.id, input)
            })
            .collect();

        if entries.is_empty() {
            entries.push((self.lines[index].id, String::new()));
        }

        self.run_pass(entries)
    }

    pub fn append_line(&mut self, input: &str) -> Vec<Line> {
        if !self.can_hold(self.lines.len() + 1) {
            return self.refuse_growth(self.lines.len() + 1);
        }

        let mut entries = self.entries();
        entries.push((self.id_gen.next_id(), input.to_string()));
        self.run_pass(entries)
    }

    /// Reset to a single blank line and an empty scope
    pub fn clear(&mut self) -> Vec<Line> {
        let id = self.id_gen.next_id();
        self.run_pass(vec![(id, String::new())])
    }

    /// Whether an edit may leave the sheet with `line_count` lines
    pub fn can_hold(&self, line_count: usize) -> bool {
        line_count <= self.limits.max_lines.max(self.lines.len())
    }

    fn refuse_growth(&self, requested: usize) -> Vec<Line> {
        warn!(
            requested,
            max_lines = self.limits.max_lines,
            "refused edit past the line limit"
        );
        self.lines.clone()
    }

    fn entries(&self) -> Vec<(LineId, String)> {
        self.lines
            .iter()
            .map(|line| (line.id, line.input.clone()))
            .collect()
    }

    /// The single evaluation path: fold every line into a fresh scope, top to
    /// bottom.
    fn run_pass(&mut self, entries: Vec<(LineId, String)>) -> Vec<Line> {
        let mut scope = Scope::new();
        let mut lines = Vec::with_capacity(entries.len());

        for (position, (id, input)) in entries.into_iter().enumerate() {
            let line_number = position + 1;
            let (result, diagnostic) = match classify(&input) {
                LineKind::Blank | LineKind::Comment => (LineResult::Empty, None),
                LineKind::Expression => match self.evaluate_input(&input, &mut scope) {
                    Ok(value) => {
                        scope.record_line_result(line_number, value);
                        (LineResult::Success(value), None)
                    }
                    Err(err) => (LineResult::from(&err), Some(err)),
                },
            };

            trace!(line = line_number, ?result, "evaluated line");
            lines.push(Line {
                id,
                position,
                input,
                result,
                diagnostic,
            });
        }

        debug!(
            lines = lines.len(),
            variables = scope.variables().len(),
            "evaluated sheet"
        );

        self.lines = lines;
        self.scope = scope;
        self.lines.clone()
    }

    /// Parse and evaluate one line, folding any assignments it made into
    /// `scope` even when the line fails
    fn evaluate_input(&self, input: &str, scope: &mut Scope) -> Result<f64, TallyError> {
        let expr = parser::parse_line(input, &self.limits)?
            .ok_or_else(|| TallyError::Engine("Line has no expression".to_string()))?;

        let (result, next_scope) = self.evaluator.evaluate(&expr, scope);
        *scope = next_scope;
        result
    }
}
