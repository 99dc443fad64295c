//! Writing styles and the shared generation algorithm
//!
//! Each style is a variant of a closed enum carrying a fixed instruction
//! preamble. The generation algorithm (validate, build payload, send) is
//! identical across styles and lives in one place; only the preamble text
//! varies. Styles are stateless and freely interchangeable between requests.

use crate::api::{GenerationError, Transport, payload};
use crate::config::ApiConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The closed set of supported rewriting styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum WritingStyle {
    Creative,
    Professional,
    Academic,
}

impl WritingStyle {
    pub const ALL: [WritingStyle; 3] = [
        WritingStyle::Creative,
        WritingStyle::Professional,
        WritingStyle::Academic,
    ];

    /// Display name, also used in session file headers.
    pub fn name(self) -> &'static str {
        match self {
            WritingStyle::Creative => "Creative",
            WritingStyle::Professional => "Professional",
            WritingStyle::Academic => "Academic",
        }
    }

    /// System-level instructions steering the model's output style.
    pub fn preamble(self) -> &'static str {
        match self {
            WritingStyle::Creative => {
                "You are a creative writing assistant. Rewrite the user's text as vivid, \
                 imaginative prose. Reach for metaphor, sensory description, and engaging \
                 storytelling so the result feels expressive and original."
            }
            WritingStyle::Professional => {
                "You are a professional writing assistant. Rewrite the user's text as clear, \
                 formal, business-appropriate prose with a professional tone, tight structure, \
                 and concise wording suited to workplace communication."
            }
            WritingStyle::Academic => {
                "You are an academic writing assistant. Rewrite the user's text as scholarly \
                 prose: formal academic language, an objective tone, and citation conventions \
                 appropriate for a research paper."
            }
        }
    }

    /// Rewrite `input` in this style.
    ///
    /// Whitespace-only input fails before the transport is ever consulted.
    /// The preamble and the trimmed input travel as distinct payload fields;
    /// the output budget and temperature come from the configuration.
    pub async fn generate(
        self,
        input: &str,
        transport: &dyn Transport,
        config: &ApiConfig,
    ) -> Result<String, GenerationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GenerationError::InvalidInput(
                "Please enter some text to transform.".to_string(),
            ));
        }

        debug!("Generating with style {} ({} input chars)", self.name(), input.len());
        let body = payload::chat_payload(
            self.preamble(),
            input,
            config.max_tokens,
            config.temperature,
        );
        transport.send(body, config).await
    }
}

impl fmt::Display for WritingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WritingStyle {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creative" => Ok(WritingStyle::Creative),
            "professional" => Ok(WritingStyle::Professional),
            "academic" => Ok(WritingStyle::Academic),
            other => Err(GenerationError::InvalidInput(format!(
                "unknown writing style: {other}"
            ))),
        }
    }
}
