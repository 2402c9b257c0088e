//! Clients for the external plant-identification and care-generation
//! services, plus the retry/timeout plumbing they share.
//!
//! The services are black boxes behind [`provider::PlantIdentifier`]:
//! an async call in, a structured result out, or a typed [`error::AiError`].
//! The mock implementation answers from a static lookup table with
//! artificial latency; the HTTP implementation talks to a real service.

pub mod error;
pub mod http;
pub mod mock;
pub mod provider;
pub mod retry;

pub use error::AiError;
pub use http::HttpIdentifier;
pub use mock::MockIdentifier;
pub use provider::PlantIdentifier;
pub use retry::{with_retry, with_timeout, RetryPolicy};
