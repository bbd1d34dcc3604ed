/*
[INPUT]:  Gateway address, account addresses and signing secret from the environment
[OUTPUT]: Payment submission receipts and the resource id reset flow
[POS]:    Examples - payment submission
[UPDATE]: When payment API changes
*/

use ripplerest::*;
use tracing_subscriber::EnvFilter;

/// Example: submit two payments against a ripple-rest gateway
///
/// Environment:
///   RIPPLE_REST_NETLOC   gateway host:port (default localhost:5990)
///   RIPPLE_SOURCE        source account
///   RIPPLE_DESTINATION   destination account
///   RIPPLE_SECRET        secret of the source account
///
/// Set RUST_LOG=ripplerest=debug to see every request.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== ripple-rest Payment Example ===\n");

    let netloc = std::env::var("RIPPLE_REST_NETLOC").unwrap_or_else(|_| "localhost:5990".to_string());
    let (source, destination, secret) = match (
        std::env::var("RIPPLE_SOURCE"),
        std::env::var("RIPPLE_DESTINATION"),
        std::env::var("RIPPLE_SECRET"),
    ) {
        (Ok(source), Ok(destination), Ok(secret)) => (source, destination, secret),
        _ => {
            eprintln!("Set RIPPLE_SOURCE, RIPPLE_DESTINATION and RIPPLE_SECRET");
            return;
        }
    };

    let mut client = match RippleRestClient::new(netloc) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created, resource id {}", client.resource_id());

    match client.get_connection_status().await {
        Ok(true) => println!("✓ Gateway connected to the ledger"),
        Ok(false) => println!("✗ Gateway is not connected to the ledger"),
        Err(e) => println!("✗ Error: {}", e),
    }

    // One drop of the native asset
    let payment = Payment::new(source.as_str(), destination.as_str(), Amount::new(1e-6, "XRP"));

    println!("\nSubmitting payment...");
    match client.post_payment(&secret, &payment).await {
        Ok(receipt) => println!("✓ Submitted as {} ({})", receipt.client_resource_id, receipt.status_url),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nSubmitting the same payment again without a reset...");
    match client.post_payment(&secret, &payment).await {
        Ok(receipt) => println!("? Unexpectedly accepted as {}", receipt.client_resource_id),
        Err(e) if e.is_duplicate_resource_id() => println!("✓ Rejected as duplicate: {}", e),
        Err(e) => println!("✗ Error: {}", e),
    }

    client.reset_resource_id();
    println!("\nResource id reset to {}, submitting again...", client.resource_id());
    match client.post_payment(&secret, &payment).await {
        Ok(receipt) => println!("✓ Submitted as {}", receipt.client_resource_id),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Payment example complete");
}
