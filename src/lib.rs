//! # Quill
//!
//! An AI writing assistant that rewrites text into creative, professional,
//! or academic prose by delegating to a remote text-generation endpoint
//! (the Cohere chat API by default).
//!
//! ## Architecture Overview
//!
//! - **[`config`]**: layered configuration with env-var credential fallback
//! - **[`api`]**: payload builders, rate-limited HTTP transport, and the
//!   generation error taxonomy
//! - **[`style`]**: the closed set of writing styles sharing one generation
//!   algorithm
//! - **[`generator`]**: per-request lifecycle orchestration, delivering
//!   ordered events over a channel
//! - **[`session`]**: flat-file persistence of input/output pairs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quill::{ApiConfig, Generator, GenerationEvent, HttpTransport, WritingStyle};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Arc::new(ApiConfig::load());
//!     let generator = Generator::new(Arc::new(HttpTransport::new()), config);
//!     generator.set_style(WritingStyle::Creative);
//!
//!     let mut events = generator.start("the meeting went fine");
//!     while let Some(event) = events.recv().await {
//!         match event {
//!             GenerationEvent::Started => println!("generating..."),
//!             GenerationEvent::Completed { text } => println!("{text}"),
//!             GenerationEvent::Failed { message } => eprintln!("{message}"),
//!         }
//!     }
//! }
//! ```

/// API communication layer: payload builders, transport, rate limiting,
/// and the error taxonomy.
pub mod api;

/// Configuration discovery and loading.
pub mod config;

/// Generation lifecycle orchestration.
pub mod generator;

/// The generation request value object.
pub mod request;

/// Flat-file session persistence.
pub mod session;

/// Writing styles and the shared generation algorithm.
pub mod style;

pub use api::{GenerationError, HttpTransport, RateLimiter, Transport};
pub use config::ApiConfig;
pub use generator::{GenerationEvent, Generator};
pub use request::GenerationRequest;
pub use session::Session;
pub use style::WritingStyle;
