/*
[INPUT]:  ripple-rest resource schemata and serde requirements
[OUTPUT]: Typed entities (Amount, Balance, Payment, Trustline, AccountSettings, Notification)
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{Direction, PaymentState};
use super::primitives::{Address, Currency, Quantity};
use crate::http::error::ConstructionError;

/// Fields the server sent that have no typed counterpart.
pub type Extra = Map<String, Value>;

/// A value object that can be built from, and written back to, wire JSON.
pub trait Entity: Serialize + DeserializeOwned {
    /// Name used in construction errors.
    const NAME: &'static str;

    /// Build the entity from wire JSON.
    ///
    /// Fails with [`ConstructionError`] when a required field is missing or
    /// has the wrong shape. Unknown fields are kept.
    fn from_json(value: Value) -> Result<Self, ConstructionError> {
        decode(Self::NAME, value)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    entity: &'static str,
    value: Value,
) -> Result<T, ConstructionError> {
    serde_json::from_value(value).map_err(|e| ConstructionError::new(entity, e.to_string()))
}

/// An amount of currency, native or issued.
///
/// `issuer` and `counterparty` are left out of the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub value: Quantity,
    pub currency: Currency,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::blank_as_none"
    )]
    pub issuer: Option<Address>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::blank_as_none"
    )]
    pub counterparty: Option<Address>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Amount {
    pub fn new(value: impl Into<Quantity>, currency: impl Into<Currency>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
            issuer: None,
            counterparty: None,
            extra: Extra::new(),
        }
    }

    /// An amount of a currency issued by `issuer`.
    pub fn issued(
        value: impl Into<Quantity>,
        currency: impl Into<Currency>,
        issuer: impl Into<Address>,
    ) -> Self {
        Self {
            issuer: Some(issuer.into()),
            ..Self::new(value, currency)
        }
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<Address>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    /// Path segment used by the payment path lookup: `value+currency[+issuer]`.
    pub fn path_segment(&self) -> String {
        let issuer = self.issuer.as_ref().map(Address::as_str);
        [Some(self.value.as_str()), Some(self.currency.as_str()), issuer]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl Entity for Amount {
    const NAME: &'static str = "Amount";
}

/// A simplified account balance.
///
/// Unlike [`Amount`], absent `issuer`/`counterparty` serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub value: Quantity,
    pub currency: Currency,
    #[serde(default, deserialize_with = "serde_helpers::blank_as_none")]
    pub issuer: Option<Address>,
    #[serde(default, deserialize_with = "serde_helpers::blank_as_none")]
    pub counterparty: Option<Address>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Balance {
    pub fn new(value: impl Into<Quantity>, currency: impl Into<Currency>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
            issuer: None,
            counterparty: None,
            extra: Extra::new(),
        }
    }
}

impl Entity for Balance {
    const NAME: &'static str = "Balance";
}

/// A flattened payment.
///
/// Built locally for submission (no `state`, implicitly new) or parsed from
/// a server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub source_account: Address,
    pub destination_account: Address,
    pub destination_amount: Amount,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::blank_as_none"
    )]
    pub state: Option<PaymentState>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub source_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_slippage: Option<Quantity>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub destination_tag: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub invoice_id: Option<String>,
    /// Stringified path set, opaque to clients
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub paths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_payment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_direct_ripple: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::blank_as_none"
    )]
    pub direction: Option<Direction>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub result: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub timestamp: Option<String>,
    /// Network fee in whole units of the native asset, not drops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_balance_changes: Option<Vec<Amount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_balance_changes: Option<Vec<Amount>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub hash: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub ledger: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Payment {
    pub fn new(
        source_account: impl Into<Address>,
        destination_account: impl Into<Address>,
        destination_amount: Amount,
    ) -> Self {
        Self {
            source_account: source_account.into(),
            destination_account: destination_account.into(),
            destination_amount,
            state: None,
            source_tag: None,
            source_amount: None,
            source_slippage: None,
            destination_tag: None,
            invoice_id: None,
            paths: None,
            partial_payment: None,
            no_direct_ripple: None,
            direction: None,
            result: None,
            timestamp: None,
            fee: None,
            source_balance_changes: None,
            destination_balance_changes: None,
            hash: None,
            ledger: None,
            extra: Extra::new(),
        }
    }

    pub fn builder() -> PaymentBuilder {
        PaymentBuilder::default()
    }

    /// Ledger state; payments that were never submitted are `New`.
    pub fn state(&self) -> PaymentState {
        self.state.unwrap_or_default()
    }

    pub fn ledger_index(&self) -> Option<u64> {
        self.ledger.as_deref().and_then(|raw| raw.parse().ok())
    }

    /// When the payment was validated, if the server reported a timestamp.
    pub fn validated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

impl Entity for Payment {
    const NAME: &'static str = "Payment";
}

/// Incremental construction of a [`Payment`].
#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    source_account: Option<Address>,
    destination_account: Option<Address>,
    destination_amount: Option<Amount>,
    source_amount: Option<Amount>,
    source_slippage: Option<Quantity>,
    source_tag: Option<String>,
    destination_tag: Option<String>,
    invoice_id: Option<String>,
    paths: Option<String>,
    partial_payment: Option<bool>,
    no_direct_ripple: Option<bool>,
    extra: Extra,
}

impl PaymentBuilder {
    pub fn source_account(mut self, address: impl Into<Address>) -> Self {
        self.source_account = Some(address.into());
        self
    }

    pub fn destination_account(mut self, address: impl Into<Address>) -> Self {
        self.destination_account = Some(address.into());
        self
    }

    pub fn destination_amount(mut self, amount: Amount) -> Self {
        self.destination_amount = Some(amount);
        self
    }

    pub fn source_amount(mut self, amount: Amount) -> Self {
        self.source_amount = Some(amount);
        self
    }

    pub fn source_slippage(mut self, slippage: impl Into<Quantity>) -> Self {
        self.source_slippage = Some(slippage.into());
        self
    }

    pub fn source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = Some(tag.into());
        self
    }

    pub fn destination_tag(mut self, tag: impl Into<String>) -> Self {
        self.destination_tag = Some(tag.into());
        self
    }

    pub fn invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn paths(mut self, paths: impl Into<String>) -> Self {
        self.paths = Some(paths.into());
        self
    }

    pub fn partial_payment(mut self, enabled: bool) -> Self {
        self.partial_payment = Some(enabled);
        self
    }

    pub fn no_direct_ripple(mut self, enabled: bool) -> Self {
        self.no_direct_ripple = Some(enabled);
        self
    }

    /// Pass an extra field through to the server untouched.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Result<Payment, ConstructionError> {
        let source_account = self
            .source_account
            .ok_or_else(|| ConstructionError::missing_field(Payment::NAME, "source_account"))?;
        let destination_account = self.destination_account.ok_or_else(|| {
            ConstructionError::missing_field(Payment::NAME, "destination_account")
        })?;
        let destination_amount = self.destination_amount.ok_or_else(|| {
            ConstructionError::missing_field(Payment::NAME, "destination_amount")
        })?;

        let mut payment = Payment::new(source_account, destination_account, destination_amount);
        payment.source_amount = self.source_amount;
        payment.source_slippage = self.source_slippage;
        payment.source_tag = self.source_tag;
        payment.destination_tag = self.destination_tag;
        payment.invoice_id = self.invoice_id;
        payment.paths = self.paths;
        payment.partial_payment = self.partial_payment;
        payment.no_direct_ripple = self.no_direct_ripple;
        payment.extra = self.extra;
        Ok(payment)
    }
}

/// A trust relationship between `account` and `counterparty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trustline {
    pub account: Address,
    pub counterparty: Address,
    pub limit: Quantity,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reciprocated_limit: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_by_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_by_counterparty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_allows_rippling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_allows_rippling: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub ledger: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub hash: Option<String>,
    /// Prior state of a modified trustline. The server keeps one level only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Box<Trustline>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Trustline {
    pub fn new(
        account: impl Into<Address>,
        counterparty: impl Into<Address>,
        limit: impl Into<Quantity>,
        currency: impl Into<Currency>,
    ) -> Self {
        Self {
            account: account.into(),
            counterparty: counterparty.into(),
            limit: limit.into(),
            currency: currency.into(),
            reciprocated_limit: None,
            authorized_by_account: None,
            authorized_by_counterparty: None,
            account_allows_rippling: None,
            counterparty_allows_rippling: None,
            ledger: None,
            hash: None,
            previous: None,
            extra: Extra::new(),
        }
    }

    pub fn allow_rippling(mut self, allow: bool) -> Self {
        self.account_allows_rippling = Some(allow);
        self
    }

    pub fn ledger_index(&self) -> Option<u64> {
        self.ledger.as_deref().and_then(|raw| raw.parse().ok())
    }
}

impl Entity for Trustline {
    const NAME: &'static str = "Trustline";
}

/// Settings of a single account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub account: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<Quantity>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub transaction_sequence: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_u64"
    )]
    pub trustline_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_destination_tag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_authorization: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallow_xrp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_master: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_spent: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub ledger: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::lenient_text"
    )]
    pub hash: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AccountSettings {
    pub fn new(account: impl Into<Address>) -> Self {
        Self {
            account: account.into(),
            regular_key: None,
            url: None,
            email_hash: None,
            message_key: None,
            wallet_locator: None,
            signers: None,
            transfer_rate: None,
            transaction_sequence: None,
            trustline_count: None,
            require_destination_tag: None,
            require_authorization: None,
            disallow_xrp: None,
            disable_master: None,
            password_spent: None,
            ledger: None,
            hash: None,
            extra: Extra::new(),
        }
    }
}

impl Entity for AccountSettings {
    const NAME: &'static str = "AccountSettings";
}

/// Free-form JSON object returned by the server, with typed accessors for
/// the keys it is known to carry.
macro_rules! free_form_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            fields: Map<String, Value>,
        }

        impl $name {
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.fields.get(key)
            }

            pub fn fields(&self) -> &Map<String, Value> {
                &self.fields
            }

            pub fn into_fields(self) -> Map<String, Value> {
                self.fields
            }

            fn text(&self, key: &str) -> Option<&str> {
                self.fields.get(key).and_then(Value::as_str)
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(fields: Map<String, Value>) -> Self {
                Self { fields }
            }
        }

        impl Entity for $name {
            const NAME: &'static str = stringify!($name);
        }
    };
}

free_form_entity!(
    /// Notification of a transaction affecting an account.
    Notification
);

impl Notification {
    pub fn account(&self) -> Option<&str> {
        self.text("account")
    }

    /// Resource type: `payment`, `order`, `trustline` or `accountsettings`.
    pub fn kind(&self) -> Option<&str> {
        self.text("type")
    }

    pub fn direction(&self) -> Option<&str> {
        self.text("direction")
    }

    pub fn state(&self) -> Option<&str> {
        self.text("state")
    }

    pub fn result(&self) -> Option<&str> {
        self.text("result")
    }

    pub fn ledger(&self) -> Option<&str> {
        self.text("ledger")
    }

    pub fn hash(&self) -> Option<&str> {
        self.text("hash")
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.text("timestamp")
    }

    pub fn transaction_url(&self) -> Option<&str> {
        self.text("transaction_url")
    }

    pub fn previous_notification_url(&self) -> Option<&str> {
        self.text("previous_notification_url")
    }

    pub fn next_notification_url(&self) -> Option<&str> {
        self.text("next_notification_url")
    }
}

free_form_entity!(
    /// Gateway and ledger server information.
    ServerInfo
);

impl ServerInfo {
    pub fn rippled_server_url(&self) -> Option<&str> {
        self.text("rippled_server_url")
    }

    pub fn api_documentation_url(&self) -> Option<&str> {
        self.text("api_documentation_url")
    }

    pub fn rippled_server_status(&self) -> Option<&Value> {
        self.get("rippled_server_status")
    }
}

free_form_entity!(
    /// A raw ledger transaction.
    Transaction
);

impl Transaction {
    pub fn hash(&self) -> Option<&str> {
        self.text("hash")
    }

    pub fn transaction_type(&self) -> Option<&str> {
        self.text("TransactionType")
    }

    pub fn account(&self) -> Option<&str> {
        self.text("Account")
    }

    pub fn validated(&self) -> Option<bool> {
        self.get("validated").and_then(Value::as_bool)
    }
}

pub(crate) mod serde_helpers {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `null`, a missing key and `""` all mean "absent".
    pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(raw) if raw.is_empty() => Ok(None),
            value => serde_json::from_value(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    /// Text field that the server sometimes sends as a number.
    pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(raw) if raw.is_empty() => Ok(None),
            Value::String(raw) => Ok(Some(raw)),
            Value::Number(number) => Ok(Some(number.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a string or number, got {other}"
            ))),
        }
    }

    /// Unsigned integer that the server sometimes sends as a string.
    pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => raw.trim().parse().map(Some).map_err(serde::de::Error::custom),
            Value::Number(number) => number
                .as_u64()
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("{number} is not a u64"))),
            other => Err(serde::de::Error::custom(format!(
                "expected an unsigned integer, got {other}"
            ))),
        }
    }

    /// Required unsigned integer, string or number.
    pub fn u64_from_text<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_u64(deserializer)?
            .ok_or_else(|| serde::de::Error::custom("expected an unsigned integer, got nothing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_amount_omits_issuer() {
        let amount = Amount::new(0.000001, "XRP");
        let value = amount.to_json().unwrap();

        assert_eq!(value, json!({ "value": "0.000001", "currency": "XRP" }));
        assert!(value.get("issuer").is_none());
        assert!(value.get("counterparty").is_none());
    }

    #[test]
    fn test_issued_amount_keeps_issuer() {
        let amount = Amount::issued(10, "USD", "rIssuer");
        assert_eq!(
            amount.to_json().unwrap(),
            json!({ "value": "10", "currency": "USD", "issuer": "rIssuer" })
        );
    }

    #[test]
    fn test_amount_blank_issuer_is_absent() {
        let amount =
            Amount::from_json(json!({ "value": "1", "currency": "XRP", "issuer": "" })).unwrap();
        assert_eq!(amount.issuer, None);
        assert!(amount.to_json().unwrap().get("issuer").is_none());
    }

    #[test]
    fn test_amount_path_segment() {
        assert_eq!(Amount::new(1, "XRP").path_segment(), "1+XRP");
        assert_eq!(
            Amount::issued("0.5", "USD", "rIssuer").path_segment(),
            "0.5+USD+rIssuer"
        );
    }

    #[test]
    fn test_balance_serializes_null_issuer() {
        let balance = Balance::new("100", "XRP");
        let value = balance.to_json().unwrap();

        assert_eq!(value.get("issuer"), Some(&Value::Null));
        assert_eq!(value.get("counterparty"), Some(&Value::Null));
        assert_eq!(value.get("value"), Some(&json!("100")));
    }

    #[test]
    fn test_balance_missing_currency_fails() {
        let err = Balance::from_json(json!({ "value": "1" })).unwrap_err();
        assert_eq!(err.entity, "Balance");
        assert!(err.reason.contains("currency"));
    }

    #[test]
    fn test_payment_without_destination_amount_fails() {
        let err = Payment::from_json(json!({
            "source_account": "rSource",
            "destination_account": "rDest",
        }))
        .unwrap_err();
        assert_eq!(err.entity, "Payment");
        assert!(err.reason.contains("destination_amount"));

        let err = Payment::builder()
            .source_account("rSource")
            .destination_account("rDest")
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::missing_field("Payment", "destination_amount"));
    }

    #[test]
    fn test_payment_preserves_unknown_fields() {
        let raw = json!({
            "source_account": "rSource",
            "destination_account": "rDest",
            "destination_amount": { "value": "1", "currency": "XRP", "issuer": "" },
            "memo_of_the_future": { "nested": [1, 2, 3] },
        });
        let payment = Payment::from_json(raw).unwrap();

        assert_eq!(payment.state(), PaymentState::New);
        assert_eq!(
            payment.extra.get("memo_of_the_future"),
            Some(&json!({ "nested": [1, 2, 3] }))
        );

        let written = payment.to_json().unwrap();
        assert_eq!(written["memo_of_the_future"], json!({ "nested": [1, 2, 3] }));
        assert!(written.get("state").is_none());
    }

    #[test]
    fn test_payment_builder_passes_fields() {
        let payment = Payment::builder()
            .source_account("rSource")
            .destination_account("rDest")
            .destination_amount(Amount::new(1, "XRP"))
            .destination_tag("42")
            .partial_payment(true)
            .field("memo", json!("hello"))
            .build()
            .unwrap();

        let written = payment.to_json().unwrap();
        assert_eq!(written["destination_tag"], json!("42"));
        assert_eq!(written["partial_payment"], json!(true));
        assert_eq!(written["memo"], json!("hello"));
        assert_eq!(written["destination_amount"], json!({ "value": "1", "currency": "XRP" }));
    }

    #[test]
    fn test_server_payment_parses_state_and_timestamp() {
        let payment = Payment::from_json(json!({
            "source_account": "rSource",
            "source_tag": "",
            "source_amount": { "value": "1", "currency": "XRP", "issuer": "" },
            "source_slippage": "0",
            "destination_account": "rDest",
            "destination_tag": 7,
            "destination_amount": { "value": "1", "currency": "XRP", "issuer": "" },
            "invoice_id": "",
            "paths": "[]",
            "no_direct_ripple": false,
            "partial_payment": false,
            "direction": "outgoing",
            "state": "validated",
            "result": "tesSUCCESS",
            "ledger": "8924146",
            "hash": "9D591B18EDDD34F0B6CF4223A2940AEA2C3CC778925BABF289E0011CD8FA056E",
            "timestamp": "2014-09-17T21:47:00.000Z",
            "fee": "0.00001",
            "source_balance_changes": [{ "value": "-1.00001", "currency": "XRP", "issuer": "" }],
            "destination_balance_changes": [{ "value": "1", "currency": "XRP", "issuer": "" }],
        }))
        .unwrap();

        assert_eq!(payment.state(), PaymentState::Validated);
        assert_eq!(payment.direction, Some(Direction::Outgoing));
        assert_eq!(payment.source_tag, None);
        assert_eq!(payment.destination_tag.as_deref(), Some("7"));
        assert_eq!(payment.ledger_index(), Some(8_924_146));
        assert_eq!(
            payment.validated_at().map(|ts| ts.timestamp()),
            Some(1_410_990_420)
        );
        assert_eq!(payment.source_balance_changes.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_trustline_normalizes_limit() {
        let trustline = Trustline::new("rAccount", "rIssuer", 100, "USD");
        assert_eq!(
            trustline.to_json().unwrap(),
            json!({
                "account": "rAccount",
                "counterparty": "rIssuer",
                "limit": "100",
                "currency": "USD",
            })
        );
    }

    #[test]
    fn test_trustline_previous_snapshot() {
        let trustline = Trustline::from_json(json!({
            "account": "rAccount",
            "counterparty": "rIssuer",
            "limit": 5,
            "currency": "USD",
            "ledger": 123,
            "previous": {
                "account": "rAccount",
                "counterparty": "rIssuer",
                "limit": "1",
                "currency": "USD",
            },
        }))
        .unwrap();

        assert_eq!(trustline.limit.as_str(), "5");
        assert_eq!(trustline.ledger_index(), Some(123));
        let previous = trustline.previous.expect("previous snapshot");
        assert_eq!(previous.limit.as_str(), "1");
        assert!(previous.previous.is_none());
    }

    #[test]
    fn test_account_settings_requires_account() {
        let err = AccountSettings::from_json(json!({ "url": "example.org" })).unwrap_err();
        assert_eq!(err.entity, "AccountSettings");

        let settings = AccountSettings::from_json(json!({
            "account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "transfer_rate": 1001000000,
            "transaction_sequence": 27660,
            "disallow_xrp": false,
            "url": "example.org",
        }))
        .unwrap();
        assert_eq!(settings.transfer_rate, Some(Quantity::from("1001000000")));
        assert_eq!(settings.transaction_sequence.as_deref(), Some("27660"));
        assert_eq!(settings.disallow_xrp, Some(false));
    }

    #[test]
    fn test_notification_is_free_form() {
        let notification = Notification::from_json(json!({
            "account": "rAccount",
            "type": "payment",
            "ledger": 42,
            "brand_new_field": true,
        }))
        .unwrap();

        assert_eq!(notification.account(), Some("rAccount"));
        assert_eq!(notification.kind(), Some("payment"));
        assert_eq!(notification.ledger(), None);
        assert_eq!(notification.get("ledger"), Some(&json!(42)));
        assert_eq!(notification.get("brand_new_field"), Some(&json!(true)));
    }

    #[test]
    fn test_notification_rejects_non_object() {
        assert!(Notification::from_json(json!(["not", "an", "object"])).is_err());
    }
}
