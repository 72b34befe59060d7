use std::path::Path;

use coinfolio::client::LedgerClient;
use coinfolio::config::ResolvedConfig;
use coinfolio::credentials::ApiCredentials;
use serde_json::{json, Value};
use wiremock::MockServer;

#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> LedgerClient {
    LedgerClient::new(ApiCredentials::new("test-key", "test-secret"))
        .with_base_url(server.uri())
}

/// A `ResolvedConfig` anchored in a temp directory, with `credentials.json`
/// already in place.
#[allow(dead_code)]
pub fn test_config(root: &Path) -> ResolvedConfig {
    let config = ResolvedConfig {
        data_dir: root.join("data"),
        output_dir: root.join("output"),
        quote_currency: "USD".to_string(),
    };
    std::fs::create_dir_all(&config.data_dir).unwrap();
    std::fs::write(
        config.credentials_file(),
        r#"{"api_key": "test-key", "api_secret": "test-secret"}"#,
    )
    .unwrap();
    config
}

#[allow(dead_code)]
pub fn account_json(id: &str, code: &str, name: &str) -> Value {
    json!({
        "id": id,
        "currency": { "code": code, "name": name }
    })
}

#[allow(dead_code)]
pub fn transaction_json(id: &str, kind: &str, amount: &str, code: &str, usd: &str, date: &str) -> Value {
    json!({
        "id": id,
        "type": kind,
        "amount": { "amount": amount, "currency": code },
        "native_amount": { "amount": usd, "currency": "USD" },
        "created_at": date
    })
}

#[allow(dead_code)]
pub fn page_json(items: &[Value], next_uri: Option<&str>) -> Value {
    json!({
        "pagination": { "next_uri": next_uri },
        "data": items
    })
}

#[allow(dead_code)]
pub fn spot_json(base: &str, amount: &str) -> Value {
    json!({
        "data": { "base": base, "currency": "USD", "amount": amount }
    })
}
