//! Shared test helpers
//!
//! Dummy values and wiremock setup used across the integration tests.

use chain_test_helpers::logging::init_test_logging;
use chain_test_helpers::{ChainTestHelpers, EvmClient};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const DUMMY_ACCOUNT_ADDR_EVM: &str = "0x1111111111111111111111111111111111111111";
#[allow(dead_code)]
pub const DUMMY_CONTRACT_ADDR_EVM: &str = "0x2222222222222222222222222222222222222222";
#[allow(dead_code)]
pub const DUMMY_TX_HASH: &str =
    "0x3333333333333333333333333333333333333333333333333333333333333333";

/// JSON-RPC success body
#[allow(dead_code)]
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    }))
}

/// JSON-RPC error body
#[allow(dead_code)]
pub fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": code, "message": message }
    }))
}

/// Mount a mock for one JSON-RPC method, expected to be called `times` times
#[allow(dead_code)]
pub async fn mount_rpc(mock_server: &MockServer, rpc_method: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "jsonrpc": "2.0", "method": rpc_method })))
        .respond_with(response)
        .expect(times)
        .mount(mock_server)
        .await;
}

/// Harness pointed at the mock server
#[allow(dead_code)]
pub fn create_test_helpers(mock_server: &MockServer) -> ChainTestHelpers {
    init_test_logging();
    let client = EvmClient::new(&mock_server.uri()).expect("Failed to create EvmClient");
    ChainTestHelpers::new(client)
}

/// JSON-RPC method names of all requests the mock server received, in order
#[allow(dead_code)]
pub async fn received_methods(mock_server: &MockServer) -> Vec<String> {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).expect("Request body is not JSON");
            body["method"].as_str().unwrap_or_default().to_string()
        })
        .collect()
}

/// Body of the first received request with the given method
#[allow(dead_code)]
pub async fn received_body(mock_server: &MockServer, rpc_method: &str) -> Value {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice::<Value>(&request.body).expect("Request body is not JSON"))
        .find(|body| body["method"] == rpc_method)
        .unwrap_or_else(|| panic!("No {} request received", rpc_method))
}
