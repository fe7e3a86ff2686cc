//! Fetch one Dataverse entry, or run a filtered query, from the command line.
//!
//! Reads connection settings from `DATAVERSE_*` environment variables.
//!
//! ```sh
//! export DATAVERSE_ORG='orgc1997c24'
//! export DATAVERSE_PASSWORD='...'
//! cargo run --bin dv-get -- crb81_mouses 'crb81_mouse_id=614'
//! cargo run --bin dv-get -- crb81_mouses --filter 'crb81_sex eq 0'
//! ```

use dataverse_api::{DataverseConfig, DataverseRestClient, EntryKey, KeyValue};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [table, flag, expr] if flag == "--filter" => run_query(table, expr).await,
        [table, selector] => run_get(table, selector).await,
        _ => {
            eprintln!("Usage: dv-get <table> <id | key=value>");
            eprintln!("       dv-get <table> --filter '<odata filter>'");
            std::process::exit(2);
        }
    }
}

async fn run_get(table: &str, selector: &str) {
    let client = connect().await;

    match client.get_entry(table, parse_selector(selector)).await {
        Ok(entry) => print_json(serde_json::Value::Object(entry)),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_query(table: &str, filter: &str) {
    let client = connect().await;

    match client.query(table, filter).await {
        Ok(result) => {
            print_json(serde_json::Value::Array(
                result.value.into_iter().map(serde_json::Value::Object).collect(),
            ));
            if let Some(next) = result.next_link {
                eprintln!("(truncated; continuation link: {next})");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn connect() -> DataverseRestClient {
    let config = DataverseConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  Set DATAVERSE_TENANT_ID, DATAVERSE_CLIENT_ID, DATAVERSE_ORG,");
        eprintln!("  DATAVERSE_USERNAME and DATAVERSE_PASSWORD before running.");
        std::process::exit(1);
    });

    DataverseRestClient::connect(&config).await.unwrap_or_else(|e| {
        eprintln!("Error: Failed to connect: {e}");
        std::process::exit(1);
    })
}

/// Interpret `key=value` as an alternate key, anything else as a primary id.
/// Unquoted integer values go through bare, everything else quoted.
fn parse_selector(selector: &str) -> EntryKey {
    match selector.split_once('=') {
        Some((key, value)) => {
            let value = match value.parse::<i64>() {
                Ok(n) => KeyValue::Int(n),
                Err(_) => KeyValue::Text(value.trim_matches('\'').to_string()),
            };
            EntryKey::alternate(key, value)
        }
        None => EntryKey::id(selector),
    }
}

fn print_json(value: serde_json::Value) {
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
