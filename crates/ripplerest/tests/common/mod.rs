/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for ripplerest tests

use std::sync::atomic::{AtomicUsize, Ordering};

use ripplerest::{ClientConfig, ResourceIdGenerator, RippleRestClient};
use wiremock::MockServer;

pub const SOURCE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
pub const DESTINATION: &str = "ra5nK24KXen9AHvsdFTKHSANinZseWnPcX";
pub const SECRET: &str = "sMasterPassword";

pub const DUPLICATE_MESSAGE: &str = "A record already exists in the database for a payment \
    from this account with the same client_resource_id. Payments must be submitted with \
    distinct client_resource_id's to prevent accidental double-spending";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Deterministic resource ids: `rid-0`, `rid-1`, ...
#[derive(Debug, Default)]
pub struct SequenceGenerator(AtomicUsize);

impl ResourceIdGenerator for SequenceGenerator {
    fn next_id(&self) -> String {
        format!("rid-{}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// Client pointed at the mock server with deterministic resource ids
pub fn client_for(server: &MockServer) -> RippleRestClient {
    RippleRestClient::with_generator(
        ClientConfig::new(server.address().to_string()),
        SequenceGenerator::default(),
    )
    .expect("client init")
}
