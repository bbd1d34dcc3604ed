/*
[INPUT]:  Account address from the environment
[OUTPUT]: Balances, settings, trustlines and recent payments
[POS]:    Examples - read-only account queries
[UPDATE]: When account endpoints change
*/

use ripplerest::*;

/// Example: read-only account queries (no secret required)
#[tokio::main]
async fn main() {
    println!("=== ripple-rest Account Example ===\n");

    let netloc = std::env::var("RIPPLE_REST_NETLOC").unwrap_or_else(|_| "localhost:5990".to_string());
    let account = match std::env::var("RIPPLE_ACCOUNT") {
        Ok(account) => Address::from(account),
        Err(_) => {
            eprintln!("Set RIPPLE_ACCOUNT");
            return;
        }
    };

    let client = match RippleRestClient::new(netloc) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    println!("Querying balances of {}...", account);
    match client.get_balances(&account, &BalancesQuery::default()).await {
        Ok(balances) => {
            for balance in balances {
                println!("  {} {}", balance.value, balance.currency);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying settings...");
    match client.get_account_settings(&account).await {
        Ok(settings) => println!("✓ Settings: {:?}", settings),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying trustlines...");
    match client.get_trustlines(&account, &TrustlinesQuery::default()).await {
        Ok(trustlines) => {
            for line in trustlines {
                println!("  {} {} limit {}", line.counterparty, line.currency, line.limit);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying last payments...");
    let query = PaymentsQuery {
        earliest_first: Some(false),
        results_per_page: Some(5),
        ..Default::default()
    };
    match client.get_payments(&account, &query).await {
        Ok(history) => {
            for record in history {
                println!(
                    "  {:?} {} {} -> {}",
                    record.payment.state(),
                    record.payment.destination_amount.value,
                    record.payment.destination_amount.currency,
                    record.payment.destination_account,
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Account example complete");
}
