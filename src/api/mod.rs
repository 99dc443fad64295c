pub mod error;
pub mod payload;
pub mod rate_limit;
pub mod transport;

pub use error::GenerationError;
pub use rate_limit::{MIN_REQUEST_INTERVAL, RateLimiter};
pub use transport::{HttpTransport, Transport, classify_response};
