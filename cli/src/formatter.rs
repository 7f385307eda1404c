use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use tally::{Line, LineResult, Scope};

/// Decimal places shown before trailing zeros are trimmed
const DISPLAY_PRECISION: usize = 10;

/// Magnitude from which numbers are shown in scientific notation
const SCIENTIFIC_THRESHOLD: f64 = 1e15;

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// Table of line number, input and result
    pub fn format_sheet(&self, lines: &[Line]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("#").set_alignment(CellAlignment::Right),
            Cell::new("Input").set_alignment(CellAlignment::Left),
            Cell::new("Result").set_alignment(CellAlignment::Right),
        ]));

        for line in lines {
            table.add_row(Row::from(vec![
                Cell::new(line.line_number()).set_alignment(CellAlignment::Right),
                Cell::new(&line.input),
                Cell::new(self.format_result(&line.result)).set_alignment(CellAlignment::Right),
            ]));
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }

    /// One rendered result per line; blank and comment lines print empty
    pub fn format_raw(&self, lines: &[Line]) -> String {
        let mut output = String::new();
        for line in lines {
            output.push_str(&self.format_result(&line.result));
            output.push('\n');
        }
        output
    }

    pub fn format_variables(&self, scope: &Scope) -> String {
        if scope.variables().is_empty() {
            return "No variables defined\n".to_string();
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Variable").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Right),
        ]));

        for (name, value) in scope.variables() {
            table.add_row(Row::from(vec![
                Cell::new(format!("${}", name)),
                Cell::new(format_number(*value)).set_alignment(CellAlignment::Right),
            ]));
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }

    pub fn format_result(&self, result: &LineResult) -> String {
        match result {
            LineResult::Success(value) => format_number(*value),
            LineResult::Error(message) => message.clone(),
            LineResult::Empty => String::new(),
        }
    }
}

/// Render a value for people: no float noise, no trailing zeros
pub fn format_number(value: f64) -> String {
    if value.abs() >= SCIENTIFIC_THRESHOLD {
        return format!("{:e}", value);
    }

    let fixed = format!("{:.*}", DISPLAY_PRECISION, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally::Sheet;

    #[test]
    fn test_format_number() {
        let cases = vec![
            (42.0, "42"),
            (-3.5, "-3.5"),
            (0.1 + 0.2, "0.3"),
            (1.0 / 3.0, "0.3333333333"),
            (-0.0, "0"),
            (-0.00000000001, "0"),
            (1e20, "1e20"),
        ];

        for (value, expected) in cases {
            assert_eq!(format_number(value), expected, "value {}", value);
        }
    }

    #[test]
    fn test_format_raw_keeps_line_count() {
        let mut sheet = Sheet::new();
        let lines = sheet.evaluate(&["1 + 1", "# note", "1 / 0", "$9"]);
        let raw = Formatter::default().format_raw(&lines);
        assert_eq!(raw, "2\n\n∞\n? $9\n");
    }

    #[test]
    fn test_format_sheet_contains_inputs_and_results() {
        let mut sheet = Sheet::new();
        let lines = sheet.evaluate(&["$price = 40", "$price * 3"]);
        let table = Formatter::default().format_sheet(&lines);
        assert!(table.contains("$price * 3"));
        assert!(table.contains("120"));
        assert!(table.contains("Result"));
    }

    #[test]
    fn test_format_variables() {
        let mut sheet = Sheet::new();
        sheet.evaluate(&["$b = 2", "$a = 1.25"]);
        let table = Formatter::default().format_variables(sheet.scope());
        let a = table.find("$a").unwrap();
        let b = table.find("$b").unwrap();
        assert!(a < b);
        assert!(table.contains("1.25"));

        let empty = Formatter::default().format_variables(&Scope::new());
        assert_eq!(empty, "No variables defined\n");
    }
}
