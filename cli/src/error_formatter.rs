use ariadne::{Color, Label, Report, ReportKind, Source};
use tenet::TenetError;

/// Format a TenetError with fancy terminal output using Ariadne
pub fn format_error(error: &TenetError) -> String {
    match error {
        TenetError::Syntax(details) => {
            let mut output = Vec::new();

            let message = format!(
                "Syntax error: {} (at line {}, column {})",
                details.message, details.span.line, details.span.col
            );

            let mut report = Report::build(ReportKind::Error, "<script>", details.span.start)
                .with_message(message)
                .with_label(
                    Label::new(("<script>", details.span.start..details.span.end))
                        .with_message("the parse stops here")
                        .with_color(Color::Red),
                );

            if !details.snippet.is_empty() {
                report = report.with_help(format!("unparsed remainder: `{}`", details.snippet));
            }

            match report.finish().write(
                ("<script>", Source::from(details.source_text.as_ref())),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        TenetError::Evaluation { .. } | TenetError::Engine(_) => format!("{}", error),
        TenetError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
    }
}
