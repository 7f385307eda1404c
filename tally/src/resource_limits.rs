/// Resource limits to keep a single pathological line from stalling a sheet
///
/// These limits protect the engine against hostile or accidental input while
/// being generous enough for anything typed by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum length of a single line in bytes
    /// Real usage: ~30 bytes, Limit: 10KB
    pub max_line_length_bytes: usize,

    /// Maximum expression nesting depth
    /// Real usage: ~3 levels, Limit: 100 (30x+)
    pub max_expression_depth: usize,

    /// Maximum number of lines an edit may grow a sheet to
    /// Real usage: ~50 lines, Limit: 10,000
    pub max_lines: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_line_length_bytes: 10_000,
            max_expression_depth: 100,
            max_lines: 10_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
