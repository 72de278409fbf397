//! Handles all user-facing output for the CLI.
//!
//! Output goes through an [`OutputSink`] so commands can be exercised in tests
//! without touching the terminal.

use serde::Serialize;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::ParseError;
use crate::state::ParseState;

// ============================================================================
// OUTPUT SINKS: OutputBuffer and StdoutSink implementations
// ============================================================================

/// Somewhere to send lines of output.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// OutputBuffer: collects output into a String for testing or programmatic capture.
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// StdoutSink: writes output to stdout, colouring the leading status word.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        match text.split_once(' ') {
            Some(("matched", rest)) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
                let _ = write!(stdout, "matched");
                let _ = stdout.reset();
                let _ = writeln!(stdout, " {}", rest);
            }
            _ => {
                let _ = writeln!(stdout, "{}", text);
            }
        }
    }
}

// ============================================================================
// OUTCOME: what a run produced, in a printable shape
// ============================================================================

/// A run's final state flattened for display or JSON.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub input: String,
    pub index: usize,
    pub remainder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ParseError>,
}

impl Outcome {
    pub fn from_state<T: Serialize>(state: &ParseState<T>) -> Self {
        Self {
            input: state.input().to_string(),
            index: state.index(),
            remainder: state.remainder().to_string(),
            result: state
                .result()
                .and_then(|value| serde_json::to_value(value).ok()),
            error: state.error().cloned(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The text-mode lines for a success.
    pub fn describe(&self) -> Vec<String> {
        let result = self
            .result
            .as_ref()
            .map_or_else(|| "null".to_string(), |value| value.to_string());
        let mut lines = vec![format!(
            "matched {} (consumed {} of {} bytes)",
            result,
            self.index,
            self.input.len()
        )];
        if !self.remainder.is_empty() {
            lines.push(format!("remaining: {:?}", self.remainder));
        }
        lines
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\"error\": \"could not serialize outcome: {}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::digits;

    #[test]
    fn test_outcome_success() {
        let outcome = Outcome::from_state(&digits().run("42abc"));
        assert!(outcome.is_success());
        assert_eq!(
            outcome.describe(),
            vec![
                "matched \"42\" (consumed 2 of 5 bytes)".to_string(),
                "remaining: \"abc\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_outcome_failure_json() {
        let outcome = Outcome::from_state(&digits().run("abc"));
        assert!(!outcome.is_success());
        let json: serde_json::Value = serde_json::from_str(&outcome.to_json()).unwrap();
        assert_eq!(json["error"]["kind"], "pattern_mismatch");
        assert_eq!(json["error"]["index"], 0);
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_output_buffer_joins_lines() {
        let mut buffer = OutputBuffer::new();
        buffer.emit("one");
        buffer.emit("two");
        assert_eq!(buffer.as_str(), "one\ntwo");
    }
}
