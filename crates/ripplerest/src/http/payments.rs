/*
[INPUT]:  Payments to submit, path-finding parameters and payment identifiers
[OUTPUT]: Submission receipts, candidate payments and payment history
[POS]:    HTTP layer - payment endpoints (submission carries the idempotency token)
[UPDATE]: When adding new payment endpoints or changing submission flow
*/

use tracing::debug;

use crate::http::client::{ApiRequest, wrapped_body};
use crate::http::query::QueryParams;
use crate::http::{Result, RippleRestClient};
use crate::types::responses::{PaymentHistoryResponse, PaymentResponse, PaymentsResponse};
use crate::types::{
    Address, Amount, Payment, PaymentRecord, PaymentSubmission, PaymentsQuery, SourceCurrency,
};

impl RippleRestClient {
    /// Submit a payment
    ///
    /// POST /v1/payments
    ///
    /// The payment is sent under the client's current resource id. The
    /// gateway rejects a second submission under the same id; call
    /// [`RippleRestClient::reset_resource_id`] before submitting another
    /// payment.
    pub async fn post_payment(&self, secret: &str, payment: &Payment) -> Result<PaymentSubmission> {
        let request = ApiRequest::post("payments", wrapped_body("payment", payment)?, secret);
        let submission: PaymentSubmission = self.send_json("PaymentSubmission", request).await?;
        debug!(
            client_resource_id = %submission.client_resource_id,
            status_url = %submission.status_url,
            "payment submitted"
        );
        Ok(submission)
    }

    /// Find payment paths from `source` to `destination`
    ///
    /// GET /v1/accounts/{source}/payments/paths/{destination}/{value+currency[+issuer]}?source_currencies={list}
    ///
    /// Without an issuer on `amount`, paths are returned for every issuer the
    /// destination accepts the currency from. Each returned payment is ready
    /// to be submitted.
    pub async fn get_payment_paths(
        &self,
        source: &Address,
        destination: &Address,
        amount: &Amount,
        source_currencies: &[SourceCurrency],
    ) -> Result<Vec<Payment>> {
        let endpoint = format!(
            "accounts/{source}/payments/paths/{destination}/{}",
            amount.path_segment()
        );
        let query =
            QueryParams::new().param("source_currencies", SourceCurrency::join(source_currencies));
        let request = ApiRequest::get(endpoint).query(query);
        let response: PaymentsResponse = self.send_json("PaymentsResponse", request).await?;
        Ok(response.payments)
    }

    /// Fetch a single payment by transaction hash or client resource id
    ///
    /// GET /v1/accounts/{address}/payments/{hash_or_id}
    pub async fn get_payment(&self, address: &Address, hash_or_id: &str) -> Result<Payment> {
        let request = ApiRequest::get(format!("accounts/{address}/payments/{hash_or_id}"));
        let response: PaymentResponse = self.send_json("PaymentResponse", request).await?;
        Ok(response.payment)
    }

    /// Query historical payments of an account
    ///
    /// GET /v1/accounts/{address}/payments
    pub async fn get_payments(
        &self,
        address: &Address,
        query: &PaymentsQuery,
    ) -> Result<Vec<PaymentRecord>> {
        let request =
            ApiRequest::get(format!("accounts/{address}/payments")).query(query.to_query());
        let response: PaymentHistoryResponse =
            self.send_json("PaymentHistoryResponse", request).await?;
        Ok(response.payments)
    }
}
