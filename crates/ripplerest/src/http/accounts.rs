/*
[INPUT]:  Account addresses, filters, settings changes and signing secrets
[OUTPUT]: Balances, settings, trustlines and notifications of an account
[POS]:    HTTP layer - account endpoints
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use serde_json::Value;

use crate::http::client::{ApiRequest, flat_body, wrapped_body};
use crate::http::{QueryParams, Result, RippleRestClient};
use crate::types::responses::{
    BalancesResponse, NotificationResponse, SettingsChangeResponse, SettingsResponse,
    TrustlineSubmission, TrustlinesResponse,
};
use crate::types::{
    AccountSettings, AccountSettingsSubmission, AccountSettingsUpdate, Address, Balance,
    BalancesQuery, Entity, Notification, Trustline, TrustlinesQuery,
};

impl RippleRestClient {
    /// Query the balances of an account
    ///
    /// GET /v1/accounts/{address}/balances?currency={currency}&counterparty={counterparty}
    ///
    /// A balance keeps the issuer the gateway reports for it; only balances
    /// without a non-empty issuer of their own are attributed to `address`.
    pub async fn get_balances(
        &self,
        address: &Address,
        query: &BalancesQuery,
    ) -> Result<Vec<Balance>> {
        let request =
            ApiRequest::get(format!("accounts/{address}/balances")).query(query.to_query());
        let response: BalancesResponse = self.send_json("BalancesResponse", request).await?;

        response
            .balances
            .into_iter()
            .map(|raw| -> Result<Balance> {
                let mut balance = Balance::from_json(raw)?;
                if balance.issuer.is_none() {
                    balance.issuer = Some(address.clone());
                }
                Ok(balance)
            })
            .collect()
    }

    /// Query the settings of an account
    ///
    /// GET /v1/accounts/{address}/settings
    pub async fn get_account_settings(&self, address: &Address) -> Result<AccountSettings> {
        let request = ApiRequest::get(format!("accounts/{address}/settings"));
        let response: SettingsResponse = self.send_json("SettingsResponse", request).await?;
        Ok(settings_of(address, response.settings)?)
    }

    /// Change one or more settings of an account
    ///
    /// POST /v1/accounts/{address}/settings
    pub async fn post_account_settings(
        &self,
        address: &Address,
        secret: &str,
        update: &AccountSettingsUpdate,
    ) -> Result<AccountSettingsSubmission> {
        let request = ApiRequest::post(
            format!("accounts/{address}/settings"),
            flat_body(update)?,
            secret,
        );
        let response: SettingsChangeResponse =
            self.send_json("SettingsChangeResponse", request).await?;

        Ok(AccountSettingsSubmission {
            ledger: response.ledger,
            hash: response.hash,
            settings: settings_of(address, response.settings)?,
        })
    }

    /// Query the trustlines of an account
    ///
    /// GET /v1/accounts/{address}/trustlines?currency={currency}&counterparty={counterparty}
    pub async fn get_trustlines(
        &self,
        address: &Address,
        query: &TrustlinesQuery,
    ) -> Result<Vec<Trustline>> {
        let request =
            ApiRequest::get(format!("accounts/{address}/trustlines")).query(query.to_query());
        let response: TrustlinesResponse = self.send_json("TrustlinesResponse", request).await?;
        Ok(response.trustlines)
    }

    /// Add or modify a trustline
    ///
    /// POST /v1/accounts/{address}/trustlines
    pub async fn post_trustline(
        &self,
        address: &Address,
        secret: &str,
        trustline: &Trustline,
    ) -> Result<TrustlineSubmission> {
        let request = ApiRequest::post(
            format!("accounts/{address}/trustlines"),
            wrapped_body("trustline", trustline)?,
            secret,
        );
        self.send_json("TrustlineSubmission", request).await
    }

    /// Fetch the notification for a transaction affecting an account
    ///
    /// GET /v1/accounts/{address}/notifications/{hash}
    ///
    /// `query` is forwarded verbatim; pass `QueryParams::new()` for none.
    pub async fn get_notification(
        &self,
        address: &Address,
        hash: &str,
        query: &QueryParams,
    ) -> Result<Notification> {
        let request = ApiRequest::get(format!("accounts/{address}/notifications/{hash}"))
            .query(query.clone());
        let response: NotificationResponse =
            self.send_json("NotificationResponse", request).await?;
        Ok(response.notification)
    }
}

/// Settings payloads do not always repeat the account they belong to.
fn settings_of(
    address: &Address,
    mut raw: Value,
) -> std::result::Result<AccountSettings, crate::http::ConstructionError> {
    if let Value::Object(fields) = &mut raw {
        fields
            .entry("account")
            .or_insert_with(|| Value::String(address.to_string()));
    }
    AccountSettings::from_json(raw)
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, QueryParams, RippleRestClient, RippleRestError};
    use crate::types::{
        AccountSettingsUpdate, Address, BalancesQuery, Quantity, Trustline, TrustlinesQuery,
    };
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const ISSUER: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    fn client_for(server: &MockServer) -> RippleRestClient {
        RippleRestClient::with_config(
            ClientConfig::new(server.address().to_string()).with_resource_id("test-rid"),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_get_balances_annotates_issuer() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/balances")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "ledger": "8924146",
                "balances": [
                    { "value": "1000.5", "currency": "XRP", "counterparty": "" },
                    { "value": "10", "currency": "USD", "counterparty": ISSUER, "issuer": ISSUER },
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let balances = client
            .get_balances(&Address::from(ACCOUNT), &BalancesQuery::default())
            .await
            .expect("get_balances failed");

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].value, Quantity::from("1000.5"));
        assert_eq!(balances[0].issuer, Some(Address::from(ACCOUNT)));
        assert_eq!(balances[0].counterparty, None);
        assert_eq!(balances[1].issuer, Some(Address::from(ISSUER)));
        assert_eq!(balances[1].counterparty, Some(Address::from(ISSUER)));
    }

    #[tokio::test]
    async fn test_get_balances_sends_filters() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/balances")))
            .and(query_param("currency", "USD"))
            .and(query_param("counterparty", ISSUER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "balances": [],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = BalancesQuery::default().currency("USD").counterparty(ISSUER);
        let balances = client
            .get_balances(&Address::from(ACCOUNT), &query)
            .await
            .expect("get_balances failed");
        assert!(balances.is_empty());
    }

    #[tokio::test]
    async fn test_get_balances_malformed_record() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/balances")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "balances": [{ "value": "1" }],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get_balances(&Address::from(ACCOUNT), &BalancesQuery::default())
            .await
            .unwrap_err();
        match err {
            RippleRestError::Construction(err) => assert_eq!(err.entity, "Balance"),
            other => panic!("Expected Construction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_account_settings() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/settings")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "settings": {
                    "account": ACCOUNT,
                    "email_hash": "7EC7606C46A14A7EF514D1F1F9038823",
                    "disallow_xrp": false,
                    "transfer_rate": 1001000000,
                    "url": "example.org",
                    "disable_master": false,
                    "transaction_sequence": 27660,
                    "password_spent": false,
                    "require_authorization": false,
                    "require_destination_tag": false,
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let settings = client
            .get_account_settings(&Address::from(ACCOUNT))
            .await
            .expect("get_account_settings failed");

        assert_eq!(settings.account, Address::from(ACCOUNT));
        assert_eq!(settings.url.as_deref(), Some("example.org"));
        assert_eq!(settings.transaction_sequence.as_deref(), Some("27660"));
        assert_eq!(settings.require_destination_tag, Some(false));
    }

    #[tokio::test]
    async fn test_post_account_settings() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/settings")))
            .and(body_partial_json(json!({
                "require_destination_tag": true,
                "client_resource_id": "test-rid",
                "secret": "sSecret",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "hash": "AD6F1E35E53C5A0B2B9B4D4F8E8E9F1A2B3C4D5E6F708192A3B4C5D6E7F80912",
                "ledger": "9248628",
                "settings": { "require_destination_tag": true },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let update = AccountSettingsUpdate {
            require_destination_tag: Some(true),
            ..Default::default()
        };
        let submission = client
            .post_account_settings(&Address::from(ACCOUNT), "sSecret", &update)
            .await
            .expect("post_account_settings failed");

        assert_eq!(submission.ledger, 9_248_628);
        assert_eq!(submission.settings.account, Address::from(ACCOUNT));
        assert_eq!(submission.settings.require_destination_tag, Some(true));
    }

    #[tokio::test]
    async fn test_get_trustlines() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/trustlines")))
            .and(query_param("currency", "USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "trustlines": [{
                    "account": ACCOUNT,
                    "counterparty": ISSUER,
                    "currency": "USD",
                    "limit": "100",
                    "reciprocated_limit": "0",
                    "account_allows_rippling": false,
                    "counterparty_allows_rippling": true,
                }],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let trustlines = client
            .get_trustlines(
                &Address::from(ACCOUNT),
                &TrustlinesQuery::default().currency("USD"),
            )
            .await
            .expect("get_trustlines failed");

        assert_eq!(trustlines.len(), 1);
        assert_eq!(trustlines[0].counterparty, Address::from(ISSUER));
        assert_eq!(trustlines[0].limit, Quantity::from("100"));
        assert_eq!(trustlines[0].counterparty_allows_rippling, Some(true));
    }

    #[tokio::test]
    async fn test_post_trustline() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/trustlines")))
            .and(body_partial_json(json!({
                "trustline": { "limit": "110", "currency": "USD", "counterparty": ISSUER },
                "secret": "sSecret",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "trustline": {
                    "account": ACCOUNT,
                    "counterparty": ISSUER,
                    "currency": "USD",
                    "limit": "110",
                    "account_allows_rippling": false,
                },
                "ledger": "9248634",
                "hash": "F9C9FDE3C6D1F0F9B25A7F3A6E2CF29C7F8D9A1B2C3D4E5F60718293A4B5C6D7",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let trustline = Trustline::new(ACCOUNT, ISSUER, 110, "USD").allow_rippling(false);
        let submission = client
            .post_trustline(&Address::from(ACCOUNT), "sSecret", &trustline)
            .await
            .expect("post_trustline failed");

        assert_eq!(submission.ledger, 9_248_634);
        assert_eq!(submission.trustline.limit, Quantity::from("110"));
        assert!(submission.hash.starts_with("F9C9"));
    }

    #[tokio::test]
    async fn test_get_notification() {
        let server = MockServer::start().await;
        let hash = "9D591B18EDDD34F0B6CF4223A2940AEA2C3CC778925BABF289E0011CD8FA056E";
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/notifications/{hash}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "notification": {
                    "account": ACCOUNT,
                    "type": "payment",
                    "direction": "outgoing",
                    "state": "validated",
                    "result": "tesSUCCESS",
                    "ledger": "8924146",
                    "hash": hash,
                    "timestamp": "2014-09-17T21:47:00.000Z",
                    "transaction_url": "http://localhost:5990/v1/accounts/x/payments/y",
                    "previous_notification_url": "",
                    "next_notification_url": "",
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let notification = client
            .get_notification(&Address::from(ACCOUNT), hash, &QueryParams::new())
            .await
            .expect("get_notification failed");

        assert_eq!(notification.kind(), Some("payment"));
        assert_eq!(notification.hash(), Some(hash));
        assert_eq!(notification.next_notification_url(), Some(""));
    }

    #[tokio::test]
    async fn test_get_notification_forwards_extra_params() {
        let server = MockServer::start().await;
        let hash = "9D591B18EDDD34F0B6CF4223A2940AEA2C3CC778925BABF289E0011CD8FA056E";
        let _mock = Mock::given(method("GET"))
            .and(path(format!("/v1/accounts/{ACCOUNT}/notifications/{hash}")))
            .and(query_param("types", "payment"))
            .and(query_param("exclude_failed", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "notification": { "account": ACCOUNT, "type": "payment", "hash": hash },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = QueryParams::new()
            .param("types", "payment")
            .param("exclude_failed", true)
            .param("marker", None::<&str>);
        let notification = client
            .get_notification(&Address::from(ACCOUNT), hash, &query)
            .await
            .expect("get_notification failed");

        assert_eq!(notification.kind(), Some("payment"));
        let requests = server.received_requests().await.expect("recording enabled");
        assert!(!requests[0].url.query().unwrap_or_default().contains("marker"));
    }
}
