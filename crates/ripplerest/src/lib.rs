/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public ripple-rest client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

//! Client for the ripple-rest gateway.
//!
//! ```rust,ignore
//! use ripplerest::{Amount, Payment, RippleRestClient};
//!
//! let mut client = RippleRestClient::new("localhost:5990")?;
//! let payment = Payment::new("rSource", "rDestination", Amount::new(0.000001, "XRP"));
//! let receipt = client.post_payment("sSecret", &payment).await?;
//!
//! // The same resource id is refused a second time; reset it first.
//! client.reset_resource_id();
//! let receipt = client.post_payment("sSecret", &payment).await?;
//! ```

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    ConstructionError,
    QueryParams,
    QueryValue,
    ResourceIdGenerator,
    Result,
    RippleRestClient,
    RippleRestError,
    UuidGenerator,
};

// Re-export all types
pub use types::*;
