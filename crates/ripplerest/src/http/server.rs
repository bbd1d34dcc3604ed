/*
[INPUT]:  Transaction hashes (no account required)
[OUTPUT]: Connection status, server info, fresh UUIDs and raw transactions
[POS]:    HTTP layer - gateway and ledger server endpoints
[UPDATE]: When adding new server endpoints or changing response format
*/

use crate::http::client::ApiRequest;
use crate::http::{Result, RippleRestClient};
use crate::types::responses::{ConnectedResponse, TransactionResponse, UuidResponse};
use crate::types::{ServerInfo, Transaction};

impl RippleRestClient {
    /// Whether the gateway is connected to a ledger server
    ///
    /// GET /v1/server/connected
    pub async fn get_connection_status(&self) -> Result<bool> {
        let request = ApiRequest::get("server/connected");
        let response: ConnectedResponse = self.send_json("ConnectedResponse", request).await?;
        Ok(response.connected)
    }

    /// Gateway and ledger server information
    ///
    /// GET /v1/server
    pub async fn get_server_info(&self) -> Result<ServerInfo> {
        let payload = self.send(ApiRequest::get("server")).await?;
        Ok(ServerInfo::from(payload))
    }

    /// Ask the gateway for a fresh UUID, usable as a resource id
    ///
    /// GET /v1/uuid
    pub async fn get_uuid(&self) -> Result<String> {
        let response: UuidResponse = self.send_json("UuidResponse", ApiRequest::get("uuid")).await?;
        Ok(response.uuid)
    }

    /// Fetch a raw transaction by hash
    ///
    /// GET /v1/transactions/{hash}
    pub async fn get_transaction(&self, hash: &str) -> Result<Transaction> {
        let request = ApiRequest::get(format!("transactions/{hash}"));
        let response: TransactionResponse = self.send_json("TransactionResponse", request).await?;
        Ok(response.transaction)
    }
}
