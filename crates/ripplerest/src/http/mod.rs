/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod accounts;
pub mod client;
pub mod error;
pub mod payments;
pub mod query;
pub mod resource;
pub mod server;

pub use error::{ConstructionError, Result, RippleRestError};
pub use query::{QueryParams, QueryValue};
pub use resource::{ResourceIdGenerator, UuidGenerator};

pub use client::{API_VERSION, ClientConfig, RippleRestClient};
