use crate::api::GenerationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Immutable record of one generation request.
///
/// Construction validates and trims the input and style name; an empty or
/// whitespace-only value is a construction-time error, so a value of this
/// type always carries usable text. Equality and hashing cover only
/// `(input, style_name)` — two requests for the same text and style compare
/// equal regardless of when they were created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    id: Uuid,
    input: String,
    style_name: String,
    created_at: DateTime<Utc>,
}

impl GenerationRequest {
    pub fn new(input: &str, style_name: &str) -> Result<Self, GenerationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GenerationError::InvalidInput(
                "Please enter some text to transform.".to_string(),
            ));
        }

        let style_name = style_name.trim();
        if style_name.is_empty() {
            return Err(GenerationError::InvalidInput(
                "Style name cannot be empty.".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            input: input.to_string(),
            style_name: style_name.to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn style_name(&self) -> &str {
        &self.style_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PartialEq for GenerationRequest {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input && self.style_name == other.style_name
    }
}

impl Eq for GenerationRequest {}

impl Hash for GenerationRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.input.hash(state);
        self.style_name.hash(state);
    }
}
