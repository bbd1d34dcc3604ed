/*
[INPUT]:  Caller-supplied filters and settings changes
[OUTPUT]: Query parameter sets and request bodies
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::primitives::{Address, Currency, Quantity};
use crate::http::query::QueryParams;

/// Filters for the balances query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalancesQuery {
    pub currency: Option<Currency>,
    /// Issuer of the IOU
    pub counterparty: Option<Address>,
}

impl BalancesQuery {
    pub fn currency(mut self, currency: impl Into<Currency>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn counterparty(mut self, counterparty: impl Into<Address>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .param("currency", self.currency.as_ref().map(Currency::as_str))
            .param("counterparty", self.counterparty.as_ref().map(Address::as_str))
    }
}

/// Filters for the trustlines query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustlinesQuery {
    pub currency: Option<Currency>,
    pub counterparty: Option<Address>,
}

impl TrustlinesQuery {
    pub fn currency(mut self, currency: impl Into<Currency>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn counterparty(mut self, counterparty: impl Into<Address>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .param("currency", self.currency.as_ref().map(Currency::as_str))
            .param("counterparty", self.counterparty.as_ref().map(Address::as_str))
    }
}

/// Filters and paging for the payment history query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentsQuery {
    /// Only payments initiated by this account
    pub source_account: Option<Address>,
    /// Only payments made to this account
    pub destination_account: Option<Address>,
    /// Only payments validated into the ledger
    pub exclude_failed: Option<bool>,
    pub start_ledger: Option<u64>,
    pub end_ledger: Option<u64>,
    /// Server default is true
    pub earliest_first: Option<bool>,
    /// Server default is 20
    pub results_per_page: Option<u32>,
    pub page: Option<u32>,
}

impl PaymentsQuery {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .param(
                "source_account",
                self.source_account.as_ref().map(Address::as_str),
            )
            .param(
                "destination_account",
                self.destination_account.as_ref().map(Address::as_str),
            )
            .param("exclude_failed", self.exclude_failed)
            .param("start_ledger", self.start_ledger)
            .param("end_ledger", self.end_ledger)
            .param("earliest_first", self.earliest_first)
            .param("results_per_page", self.results_per_page)
            .param("page", self.page)
    }
}

/// A source currency for path finding, optionally pinned to an issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCurrency {
    pub currency: Currency,
    pub issuer: Option<Address>,
}

impl SourceCurrency {
    pub fn new(currency: impl Into<Currency>) -> Self {
        Self {
            currency: currency.into(),
            issuer: None,
        }
    }

    pub fn issued(currency: impl Into<Currency>, issuer: impl Into<Address>) -> Self {
        Self {
            currency: currency.into(),
            issuer: Some(issuer.into()),
        }
    }

    /// `currency` or `currency issuer`.
    pub fn to_param(&self) -> String {
        match &self.issuer {
            Some(issuer) => format!("{} {}", self.currency, issuer),
            None => self.currency.to_string(),
        }
    }

    /// Comma-separated list as expected by the `source_currencies` parameter.
    pub fn join(currencies: &[SourceCurrency]) -> Option<String> {
        if currencies.is_empty() {
            return None;
        }
        Some(
            currencies
                .iter()
                .map(SourceCurrency::to_param)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Changes to an account's settings. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_master: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_xrp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_spent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_authorization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_destination_tag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signers: Option<String>,
}
