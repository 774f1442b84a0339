/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod projects;
pub mod retry;
pub mod users;

pub use error::{ConsumerHostError, Result};
pub use retry::ReauthPolicy;

pub use client::{ClientConfig, ConsumerHostClient};
