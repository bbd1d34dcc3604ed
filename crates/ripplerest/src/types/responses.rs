/*
[INPUT]:  Success envelopes with the `success` flag already stripped
[OUTPUT]: Typed per-endpoint response payloads
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::{AccountSettings, Notification, Payment, Transaction, Trustline, serde_helpers};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct BalancesResponse {
    pub balances: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SettingsResponse {
    pub settings: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SettingsChangeResponse {
    #[serde(deserialize_with = "serde_helpers::u64_from_text")]
    pub ledger: u64,
    pub hash: String,
    pub settings: Value,
}

/// Result of an account settings change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSettingsSubmission {
    /// Index of the ledger holding the change
    #[serde(deserialize_with = "serde_helpers::u64_from_text")]
    pub ledger: u64,
    pub hash: String,
    pub settings: AccountSettings,
}

/// Acknowledgement of a submitted payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSubmission {
    /// Idempotency token the payment was submitted under
    pub client_resource_id: String,
    /// Where the payment's progress can be polled
    pub status_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PaymentsResponse {
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PaymentResponse {
    pub payment: Payment,
}

/// One entry of the payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment: Payment,
    /// Blank when the payment was not submitted through this gateway
    #[serde(default, deserialize_with = "serde_helpers::blank_as_none")]
    pub client_resource_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PaymentHistoryResponse {
    pub payments: Vec<PaymentRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct TrustlinesResponse {
    pub trustlines: Vec<Trustline>,
}

/// Result of adding or modifying a trustline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustlineSubmission {
    pub trustline: Trustline,
    pub hash: String,
    #[serde(deserialize_with = "serde_helpers::u64_from_text")]
    pub ledger: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct NotificationResponse {
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ConnectedResponse {
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct UuidResponse {
    pub uuid: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct TransactionResponse {
    pub transaction: Transaction,
}
