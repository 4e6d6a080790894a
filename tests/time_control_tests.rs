//! Unit tests for dev node time control
//!
//! These tests verify the JSON-RPC traffic produced by mine_block,
//! increase_timestamp, snapshot and revert_to against a mock node.

use chain_test_helpers::{ChainTestHelpers, EvmClient};
use serde_json::json;
use wiremock::MockServer;

#[path = "helpers.rs"]
mod test_helpers;
use test_helpers::{create_test_helpers, mount_rpc, received_body, received_methods, rpc_error, rpc_result};

// ============================================================================
// MINE BLOCK TESTS
// ============================================================================

/// What is tested: mine_block() sends evm_mine without params
/// Why: Dev nodes reject evm_mine calls with unexpected params
#[tokio::test]
async fn test_mine_block_sends_evm_mine_without_params() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_mine", rpc_result(json!("0x0")), 1).await;

    let helpers = create_test_helpers(&mock_server);
    helpers.mine_block().await.expect("mine_block should succeed");

    let body = received_body(&mock_server, "evm_mine").await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert!(body.get("params").is_none(), "evm_mine must not carry params");
    assert!(body["id"].as_u64().unwrap() > 0, "id should be a wall-clock timestamp");
}

/// What is tested: mine_block() surfaces a JSON-RPC error
/// Why: Transport failures must reach the calling test unchanged
#[tokio::test]
async fn test_mine_block_error() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_mine", rpc_error(-32601, "Method evm_mine not supported"), 1).await;

    let helpers = create_test_helpers(&mock_server);
    let err = helpers.mine_block().await.unwrap_err();

    assert!(err.to_string().contains("Method evm_mine not supported"));
    assert!(err.to_string().contains("-32601"));
}

// ============================================================================
// INCREASE TIMESTAMP TESTS
// ============================================================================

/// What is tested: increase_timestamp() warps time then mines a block
/// Why: The warp only takes effect once a block is mined; both must complete before returning
#[tokio::test]
async fn test_increase_timestamp_warps_then_mines() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_increaseTime", rpc_result(json!(3600)), 1).await;
    mount_rpc(&mock_server, "evm_mine", rpc_result(json!("0x0")), 1).await;

    let helpers = create_test_helpers(&mock_server);
    helpers
        .increase_timestamp(3600)
        .await
        .expect("increase_timestamp should succeed");

    assert_eq!(
        received_methods(&mock_server).await,
        vec!["evm_increaseTime".to_string(), "evm_mine".to_string()]
    );
    let body = received_body(&mock_server, "evm_increaseTime").await;
    assert_eq!(body["params"], json!([3600]));
}

/// What is tested: increase_timestamp() stops when evm_increaseTime fails
/// Why: No block may be mined after a failed warp, and the warp error is the one returned
#[tokio::test]
async fn test_increase_timestamp_warp_error_skips_mine() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_increaseTime", rpc_error(-32000, "time travel refused"), 1).await;
    mount_rpc(&mock_server, "evm_mine", rpc_result(json!("0x0")), 0).await;

    let helpers = create_test_helpers(&mock_server);
    let err = helpers.increase_timestamp(60).await.unwrap_err();

    assert!(err.to_string().contains("time travel refused"));
    assert_eq!(received_methods(&mock_server).await, vec!["evm_increaseTime".to_string()]);
}

/// What is tested: increase_timestamp() surfaces a failure of the follow-up evm_mine
/// Why: Either step failing must reject the whole operation
#[tokio::test]
async fn test_increase_timestamp_mine_error() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_increaseTime", rpc_result(json!(60)), 1).await;
    mount_rpc(&mock_server, "evm_mine", rpc_error(-32000, "mining failed"), 1).await;

    let helpers = create_test_helpers(&mock_server);
    let err = helpers.increase_timestamp(60).await.unwrap_err();

    assert!(err.to_string().contains("mining failed"));
}

/// What is tested: increase_timestamp() fails when the node is unreachable
/// Why: Connection errors are transport failures and must not be swallowed
#[tokio::test]
async fn test_increase_timestamp_unreachable_node() {
    // Nothing listens on port 1
    let client = EvmClient::new("http://127.0.0.1:1").expect("Failed to create EvmClient");
    let helpers = ChainTestHelpers::new(client);

    let err = helpers.increase_timestamp(1).await.unwrap_err();
    assert!(err.to_string().contains("Failed to send evm_increaseTime request"));
}

// ============================================================================
// SNAPSHOT TESTS
// ============================================================================

/// What is tested: snapshot() returns the id and revert_to() sends it back
/// Why: Tests restore node state between time-dependent cases using these ids
#[tokio::test]
async fn test_snapshot_and_revert() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_snapshot", rpc_result(json!("0x1")), 1).await;
    mount_rpc(&mock_server, "evm_revert", rpc_result(json!(true)), 1).await;

    let helpers = create_test_helpers(&mock_server);
    let id = helpers.snapshot().await.expect("snapshot should succeed");
    assert_eq!(id, "0x1");

    let reverted = helpers.revert_to(&id).await.expect("revert should succeed");
    assert!(reverted);

    let body = received_body(&mock_server, "evm_revert").await;
    assert_eq!(body["params"], json!(["0x1"]));
}

/// What is tested: snapshot() accepts numeric ids
/// Why: Some dev nodes return the snapshot id as a JSON number
#[tokio::test]
async fn test_snapshot_numeric_id() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_snapshot", rpc_result(json!(26)), 1).await;

    let helpers = create_test_helpers(&mock_server);
    assert_eq!(helpers.snapshot().await.unwrap(), "0x1a");
}

/// What is tested: snapshot() rejects numeric ids that are negative or fractional
/// Why: Coercing them to 0x0 would later revert the node to the wrong snapshot
#[tokio::test]
async fn test_snapshot_invalid_numeric_id() {
    for id in [json!(-3), json!(1.5)] {
        let mock_server = MockServer::start().await;
        mount_rpc(&mock_server, "evm_snapshot", rpc_result(id.clone()), 1).await;

        let helpers = create_test_helpers(&mock_server);
        let err = helpers.snapshot().await.unwrap_err();
        assert!(
            err.to_string().contains("Unexpected evm_snapshot result"),
            "id {} should be rejected",
            id
        );
    }
}

/// What is tested: revert_to() reports false for an unknown snapshot
/// Why: Reverting twice to the same snapshot is rejected by the node
#[tokio::test]
async fn test_revert_unknown_snapshot() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "evm_revert", rpc_result(json!(false)), 1).await;

    let helpers = create_test_helpers(&mock_server);
    assert!(!helpers.revert_to("0x9").await.unwrap());
}
