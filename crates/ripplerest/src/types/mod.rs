/*
[INPUT]:  ripple-rest schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod primitives;
pub mod requests;
pub mod responses;

pub use enums::*;
pub use models::{
    AccountSettings, Amount, Balance, Entity, Extra, Notification, Payment, PaymentBuilder,
    ServerInfo, Transaction, Trustline,
};
pub use primitives::*;
pub use requests::*;
pub use responses::{AccountSettingsSubmission, PaymentRecord, PaymentSubmission, TrustlineSubmission};
