//! Strand Error Handling
//!
//! Every failure in the engine is plain data: a [`ParseError`] stored in a terminal
//! [`ParseState`](crate::ParseState). Nothing here unwinds. Rendering for humans goes through
//! [`Diagnosis`], which pairs an error with the source it was produced from.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Names the input a parser ran over, for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context for a named input (a file, an argument, a query box).
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR KINDS
// ============================================================================

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The remainder was empty when a match was attempted.
    EndOfInput,
    LiteralMismatch {
        expected: String,
    },
    PatternMismatch {
        pattern: String,
    },
    /// A one-or-more combinator collected nothing.
    NoMatches {
        combinator: String,
    },
    NoAlternative,
    /// Raised deliberately by `fail`.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    EndOfInput,
    Mismatch,
    Combinator,
    Custom,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EndOfInput => ErrorCategory::EndOfInput,
            Self::LiteralMismatch { .. } | Self::PatternMismatch { .. } => ErrorCategory::Mismatch,
            Self::NoMatches { .. } | Self::NoAlternative => ErrorCategory::Combinator,
            Self::Custom => ErrorCategory::Custom,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::EndOfInput => "end_of_input",
            Self::LiteralMismatch { .. } => "literal_mismatch",
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::NoMatches { .. } => "no_matches",
            Self::NoAlternative => "no_alternative",
            Self::Custom => "custom",
        }
    }

    fn primary_label(&self) -> String {
        match self {
            Self::EndOfInput => "input ends here".into(),
            Self::LiteralMismatch { expected } => format!("expected `{}`", expected),
            Self::PatternMismatch { pattern } => format!("expected {}", pattern),
            Self::NoMatches { combinator } => format!("{} matched nothing here", combinator),
            Self::NoAlternative => "no alternative matched here".into(),
            Self::Custom => "failed here".into(),
        }
    }
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfInput => "end_of_input",
            Self::Mismatch => "mismatch",
            Self::Combinator => "combinator",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// The failure descriptor carried by a failed state: where, what kind, and a message.
///
/// The message is separate from the kind so `error_map` can reword it without
/// losing the classification.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ParseError {
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub index: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }

    pub fn end_of_input(index: usize) -> Self {
        Self::new(ErrorKind::EndOfInput, index, "Unexpected end of input")
    }

    pub fn literal_mismatch(index: usize, expected: &str, found: &str) -> Self {
        Self::new(
            ErrorKind::LiteralMismatch {
                expected: expected.to_string(),
            },
            index,
            format!("Tried to match {} but got {}", expected, found),
        )
    }

    pub fn pattern_mismatch(index: usize, pattern: &str) -> Self {
        Self::new(
            ErrorKind::PatternMismatch {
                pattern: pattern.to_string(),
            },
            index,
            format!("Could not match {} at index: {}", pattern, index),
        )
    }

    pub fn no_matches(index: usize, combinator: &str) -> Self {
        Self::new(
            ErrorKind::NoMatches {
                combinator: combinator.to_string(),
            },
            index,
            format!("{}: unable to match any parser", combinator),
        )
    }

    pub fn no_alternative(index: usize) -> Self {
        Self::new(
            ErrorKind::NoAlternative,
            index,
            "Unable to match with any parser",
        )
    }

    pub fn custom(index: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom, index, message)
    }

    /// Same kind and index, new message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Pair this error with the input it came from so miette can render it.
    pub fn diagnose(&self, source: &SourceContext) -> Diagnosis {
        Diagnosis::new(self.clone(), source)
    }
}

// ============================================================================
// DIAGNOSIS - miette rendering
// ============================================================================

/// A [`ParseError`] with its source attached, ready for miette.
#[derive(Debug)]
pub struct Diagnosis {
    pub error: ParseError,
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub help: Option<String>,
    error_code: String,
}

impl Diagnosis {
    pub fn new(error: ParseError, source: &SourceContext) -> Self {
        // Point at one character when there is one; an end-of-input failure gets an empty span.
        let len = source.content[error.index.min(source.content.len())..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        let error_code = format!(
            "strand::{}::{}",
            error.category(),
            error.kind.code_suffix()
        );
        let help = match &error.kind {
            ErrorKind::EndOfInput => Some("the input ended before the parser finished".into()),
            ErrorKind::NoAlternative => Some("none of the alternatives accept this input".into()),
            _ => None,
        };
        Self {
            primary_span: SourceSpan::from(error.index..error.index + len),
            source: source.to_named_source(),
            help,
            error_code,
            error,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.error.message)
    }
}

impl std::error::Error for Diagnosis {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Diagnostic for Diagnosis {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.error.kind.primary_label()),
            self.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source)
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a diagnosis with full miette formatting to stderr.
pub fn print_error(diagnosis: Diagnosis) {
    use miette::Report;
    let report = Report::new(diagnosis);
    eprintln!("{report:?}");
}
