//! Request payload builders
//!
//! Pure functions mapping instructions, user input, and generation
//! parameters to wire-format request bodies. No I/O happens here, and the
//! same inputs always produce the same payload. The preamble and the user
//! message stay separate fields so the transport never has to know how a
//! style composes its prompt.

use serde_json::{Value, json};

/// Cohere chat model targeted by the primary payload shape.
pub const CHAT_MODEL: &str = "command-a-03-2025";
/// Model targeted by the legacy role-tagged payload shape.
pub const LEGACY_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Build a Cohere chat request body.
///
/// `preamble` carries the system-level style instructions and `message` the
/// user's text, as two distinct top-level fields.
pub fn chat_payload(preamble: &str, message: &str, max_tokens: u32, temperature: f64) -> Value {
    json!({
        "model": CHAT_MODEL,
        "message": message,
        "preamble": preamble,
        "max_tokens": max_tokens,
        "temperature": temperature,
    })
}

/// Build a legacy chat-completion request body (OpenAI-family providers).
///
/// Uses role-tagged messages instead of the `message`/`preamble` pair. This
/// shape is never auto-detected; callers pick it explicitly.
pub fn legacy_chat_payload(
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
    temperature: f64,
) -> Value {
    json!({
        "model": LEGACY_CHAT_MODEL,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_message },
        ],
        "max_tokens": max_tokens,
        "temperature": temperature,
    })
}
