//! Flat-file session persistence
//!
//! A session is a plain-text file with a fixed three-section layout: a
//! header with the style name and save time, a labeled input section, and a
//! labeled output section. The format is deliberately human-readable, and a
//! save-then-load round trip recovers the input and output text exactly
//! (trimmed of surrounding blank lines).

use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;
use tokio::fs;
use tracing::info;

const SESSION_HEADER: &str = "=== Writing Assistant Session ===";
const INPUT_MARKER: &str = "--- Input ---";
const OUTPUT_MARKER: &str = "--- Output ---";

/// One saved input/output pair plus the style that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub style: String,
    pub input: String,
    pub output: String,
}

impl Session {
    /// Timestamped file name for a new session, e.g.
    /// `session_20260829_141530.txt`.
    pub fn default_file_name() -> String {
        format!("session_{}.txt", Local::now().format("%Y%m%d_%H%M%S"))
    }

    /// Render the session into the three-section text format.
    pub fn render(&self) -> String {
        format!(
            "{SESSION_HEADER}\nStyle: {}\nSaved: {}\n\n{INPUT_MARKER}\n{}\n\n{OUTPUT_MARKER}\n{}\n",
            self.style,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.input,
            self.output,
        )
    }

    /// Parse session text back into its sections.
    ///
    /// Unknown lines outside the labeled sections are ignored, so files
    /// edited by hand still load as long as the markers survive.
    pub fn parse(content: &str) -> Self {
        let mut style = String::new();
        let mut input = String::new();
        let mut output = String::new();
        let mut in_input = false;
        let mut in_output = false;

        for line in content.lines() {
            if line == INPUT_MARKER {
                in_input = true;
                in_output = false;
            } else if line == OUTPUT_MARKER {
                in_input = false;
                in_output = true;
            } else if in_input {
                input.push_str(line);
                input.push('\n');
            } else if in_output {
                output.push_str(line);
                output.push('\n');
            } else if let Some(name) = line.strip_prefix("Style: ") {
                style = name.trim().to_string();
            }
        }

        Self {
            style,
            input: input.trim().to_string(),
            output: output.trim().to_string(),
        }
    }

    /// Save the session to `path`.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .await
            .with_context(|| format!("Failed to save session to {}", path.display()))?;

        info!("Session saved to: {}", path.display());
        Ok(())
    }

    /// Load a session from `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to load session from {}", path.display()))?;

        info!("Session loaded from: {}", path.display());
        Ok(Self::parse(&content))
    }
}
