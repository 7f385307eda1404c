use ariadne::{Color, Label, Report, ReportKind, Source};
use tally::TallyError;

/// Format a TallyError for the terminal.
///
/// Lexer and parser errors are drawn under the offending line with Ariadne;
/// everything else is a single line of text.
pub fn format_error(error: &TallyError, source_id: &str, source_text: &str) -> String {
    match error {
        TallyError::Lex(details) | TallyError::Parse(details) => {
            let mut output = Vec::new();

            let error_type = match error {
                TallyError::Lex(_) => "Lex error",
                _ => "Parse error",
            };

            // Spans are byte offsets, ariadne counts characters
            let start = char_offset(source_text, details.span.start);
            let end = char_offset(source_text, details.span.end).max(start + 1);

            let mut report = Report::build(ReportKind::Error, source_id, start)
                .with_message(format!("{}: {} ({})", error_type, details.message, source_id))
                .with_label(
                    Label::new((source_id, start..end))
                        .with_message(&details.message)
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report
                .finish()
                .write((source_id, Source::from(source_text)), &mut output)
            {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("{}", error),
            }
        }
        TallyError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded ({}): {}\n  Limit: {}\n  Actual: {}\n  {}",
                source_id, limit_name, limit_value, actual_value, suggestion
            )
        }
        other => format!("{}: {}", source_id, other),
    }
}

/// Character index of byte `offset`, clamped to the end of `text`
fn char_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .take_while(|(index, _)| *index < offset)
        .count()
}
