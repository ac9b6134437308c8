use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed syntax error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_text: Arc<str>,
    /// The unparsed remainder at the point of failure, trimmed for display
    pub snippet: String,
}

/// Error types for the tenet system
///
/// A failed match or selection is *not* an error: matchers and selectors
/// report it as `None` and callers treat it as ordinary control data. The
/// variants here are the fatal conditions that propagate to the caller.
#[derive(Debug, Clone)]
pub enum TenetError {
    /// The script (or fact list) could not be parsed
    Syntax(Box<ErrorDetails>),

    /// An embedded expression failed to evaluate
    Evaluation { message: String, expression: String },

    /// Engine error without a specific source location
    Engine(String),

    /// A configured resource limit was exceeded
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl TenetError {
    /// Create a syntax error with source information
    pub fn syntax(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        snippet: impl Into<String>,
    ) -> Self {
        Self::Syntax(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            snippet: snippet.into(),
        }))
    }

    /// Create an evaluation error for the given expression source
    pub fn evaluation(message: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
            expression: expression.into(),
        }
    }
}

impl fmt::Display for TenetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenetError::Syntax(details) => {
                write!(
                    f,
                    "Syntax error: {} at line {}, column {}",
                    details.message, details.span.line, details.span.col
                )?;
                if !details.snippet.is_empty() {
                    write!(f, " near `{}`", details.snippet)?;
                }
                Ok(())
            }
            TenetError::Evaluation {
                message,
                expression,
            } => {
                write!(f, "Evaluation error: {} in $({})", message, expression)
            }
            TenetError::Engine(msg) => write!(f, "Engine error: {}", msg),
            TenetError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => {
                write!(
                    f,
                    "Resource limit exceeded: {} (limit {}, actual {}). {}",
                    limit_name, limit_value, actual_value, suggestion
                )
            }
        }
    }
}

impl std::error::Error for TenetError {}

impl From<std::fmt::Error> for TenetError {
    fn from(err: std::fmt::Error) -> Self {
        TenetError::Engine(format!("Format error: {}", err))
    }
}
