//! Submission and confirmation integration tests
//!
//! All tests run against the in-crate mock transport; timing-sensitive
//! tests use short poll intervals so they stay fast.

use std::sync::Arc;
use std::time::{Duration, Instant};

use agx_sdk::abi::Token;
use agx_sdk::{
    AgefixClient, ClientConfig, MockTransport, SdkError, SubmitStatus, TxStatus, U256, Wallet,
};
use serde_json::json;

const CONTRACT: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d";
const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

fn test_config(with_wallet: bool) -> ClientConfig {
    let mut builder = ClientConfig::builder("mock://agefix", "agefix-testnet-1")
        .retry_backoff(Duration::from_millis(10))
        .poll_interval(Duration::from_millis(20));
    if with_wallet {
        builder = builder.wallet(Wallet::from_private_key(&[0x42; 32]).unwrap());
    }
    builder.build().unwrap()
}

fn client_with_mock(with_wallet: bool) -> (AgefixClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = AgefixClient::with_transport(transport.clone(), test_config(with_wallet));
    (client, transport)
}

fn transfer_args() -> Vec<Token> {
    vec![
        Token::Address(
            "0x1234567890123456789012345678901234567890"
                .parse()
                .unwrap(),
        ),
        Token::uint(1000),
    ]
}

fn receipt_json(status: &str, gas_used: u64) -> serde_json::Value {
    json!({
        "status": "confirmed",
        "receipt": {
            "txHash": TX_HASH,
            "status": status,
            "blockNumber": 128,
            "gasUsed": gas_used,
        },
    })
}

// ==================== Pre-network Validation ====================

#[tokio::test]
async fn test_submit_without_key_never_reaches_network() {
    let (client, transport) = client_with_mock(false);

    let result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await;

    assert!(matches!(result, Err(SdkError::Config(_))));
    assert_eq!(transport.total_requests(), 0);
}

#[tokio::test]
async fn test_submit_malformed_address_never_reaches_network() {
    let (client, transport) = client_with_mock(true);

    let result = client
        .submit("0xdefinitely-not-an-address", "transfer", &transfer_args(), U256::zero())
        .await;

    assert!(matches!(result, Err(SdkError::InvalidArgument(_))));
    assert_eq!(transport.total_requests(), 0);
}

#[tokio::test]
async fn test_deploy_without_key_never_reaches_network() {
    let (client, transport) = client_with_mock(false);

    let result = client.deploy_contract("contract T {}", &[]).await;

    assert!(matches!(result, Err(SdkError::Config(_))));
    assert_eq!(transport.total_requests(), 0);
}

// ==================== Submission ====================

#[tokio::test]
async fn test_submit_returns_immediately_with_submitted_status() {
    let (client, transport) = client_with_mock(true);

    let result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await
        .unwrap();

    assert_eq!(result.status, SubmitStatus::Submitted);
    assert_eq!(result.hash().to_hex(), TX_HASH);
    assert!(result.receipt.is_none());
    // One execute request, no receipt polls
    assert_eq!(transport.requests("execute"), 1);
    assert_eq!(transport.requests("tx"), 0);
}

#[tokio::test]
async fn test_submitted_value_rides_as_decimal_string() {
    // Submission succeeds with a non-zero value; the mock accepts any body,
    // so this just exercises the encoding path end to end
    let (client, _transport) = client_with_mock(true);

    let result = client
        .submit(
            CONTRACT,
            "transfer",
            &transfer_args(),
            U256::from(1_000_000_000_000_000_000u128),
        )
        .await;

    assert!(result.is_ok());
}

// ==================== Retry Semantics ====================

#[tokio::test]
async fn test_transport_failure_then_success_within_budget() {
    let (client, transport) = client_with_mock(true);
    transport.fail_times("execute", 2); // default budget is 3 attempts

    let result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await
        .unwrap();

    assert_eq!(result.status, SubmitStatus::Submitted);
    assert_eq!(transport.requests("execute"), 3);
}

#[tokio::test]
async fn test_exhausted_retries_yield_network_error() {
    let (client, transport) = client_with_mock(true);
    transport.fail_times("execute", 3);

    let result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await;

    match result {
        Err(SdkError::Network { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected network error, got {:?}", other),
    }
    assert_eq!(transport.requests("execute"), 3);
}

#[tokio::test]
async fn test_node_reported_errors_are_not_retried() {
    let (client, transport) = client_with_mock(true);
    transport.set_response(
        "execute",
        json!({ "error": { "code": -32000, "message": "insufficient funds" } }),
    );

    let result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await;

    assert!(matches!(result, Err(SdkError::Rpc { code: -32000, .. })));
    assert_eq!(transport.requests("execute"), 1);
}

// ==================== Receipt Polling ====================

#[tokio::test]
async fn test_await_receipt_success_reports_gas_used() {
    let (client, transport) = client_with_mock(true);
    transport.queue_response("tx", json!({ "status": "pending" }));
    transport.queue_response("tx", json!({ "status": "pending" }));
    transport.set_response("tx", receipt_json("success", 53200));

    let result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await
        .unwrap();
    let receipt = client
        .await_receipt(result.hash(), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(receipt.status, TxStatus::Success);
    assert_eq!(receipt.gas_used, 53200);
    assert_eq!(receipt.block_number, 128);
    // Two pending polls plus the confirmed one
    assert_eq!(transport.requests("tx"), 3);
}

#[tokio::test]
async fn test_await_receipt_timeout_within_bounded_margin() {
    let (client, transport) = client_with_mock(true);
    transport.set_response("tx", json!({ "status": "pending" }));

    let hash: agx_sdk::H256 = TX_HASH.parse().unwrap();
    let started = Instant::now();
    let result = client.await_receipt(&hash, Duration::from_secs(1)).await;
    let elapsed = started.elapsed();

    match result {
        Err(SdkError::Timeout { waited }) => {
            assert!(waited <= Duration::from_millis(1200));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
    // Bounded margin around the requested 1s
    assert!(elapsed >= Duration::from_millis(900));
    assert!(elapsed < Duration::from_millis(1500));
}

#[tokio::test]
async fn test_await_receipt_revert_carries_reason() {
    let (client, transport) = client_with_mock(true);
    transport.set_response(
        "tx",
        json!({
            "status": "confirmed",
            "receipt": {
                "txHash": TX_HASH,
                "status": "reverted",
                "blockNumber": 128,
                "gasUsed": 30000,
                "revertReason": "Insufficient balance",
            },
        }),
    );

    let hash: agx_sdk::H256 = TX_HASH.parse().unwrap();
    let result = client.await_receipt(&hash, Duration::from_secs(5)).await;

    match result {
        Err(SdkError::ExecutionReverted { reason }) => {
            assert_eq!(reason, "Insufficient balance");
        }
        other => panic!("expected revert, got {:?}", other),
    }
}

#[tokio::test]
async fn test_await_receipt_dropped_transaction() {
    let (client, transport) = client_with_mock(true);
    transport.queue_response("tx", json!({ "status": "pending" }));
    transport.queue_response("tx", json!({ "status": "dropped" }));
    transport.set_response("tx", json!({ "status": "dropped" }));

    let hash: agx_sdk::H256 = TX_HASH.parse().unwrap();
    let result = client.await_receipt(&hash, Duration::from_secs(5)).await;

    assert!(matches!(result, Err(SdkError::TransactionDropped)));
}

#[tokio::test]
async fn test_await_receipt_tolerates_flaky_poll() {
    let (client, transport) = client_with_mock(true);
    transport.fail_times("tx", 1);
    transport.set_response("tx", receipt_json("success", 21000));

    let hash: agx_sdk::H256 = TX_HASH.parse().unwrap();
    let receipt = client
        .await_receipt(&hash, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(receipt.is_success());
    assert_eq!(transport.requests("tx"), 2);
}

// ==================== Confirm State Machine ====================

#[tokio::test]
async fn test_confirm_transitions_to_confirmed() {
    let (client, transport) = client_with_mock(true);
    transport.set_response("tx", receipt_json("success", 21000));

    let mut result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await
        .unwrap();
    let hash_before = *result.hash();

    client
        .confirm(&mut result, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(result.status, SubmitStatus::Confirmed);
    assert!(result.is_confirmed());
    assert_eq!(result.gas_used(), Some(21000));
    assert_eq!(result.block_number(), Some(128));
    // The hash is assigned at submission and never changes
    assert_eq!(result.hash(), &hash_before);
}

#[tokio::test]
async fn test_confirm_transitions_to_reverted() {
    let (client, transport) = client_with_mock(true);
    transport.set_response(
        "tx",
        json!({
            "status": "confirmed",
            "receipt": {
                "txHash": TX_HASH,
                "status": "reverted",
                "blockNumber": 128,
                "gasUsed": 30000,
                "revertReason": "paused",
            },
        }),
    );

    let mut result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await
        .unwrap();
    let outcome = client.confirm(&mut result, Duration::from_secs(5)).await;

    assert!(matches!(outcome, Err(SdkError::ExecutionReverted { .. })));
    assert_eq!(result.status, SubmitStatus::Reverted);
    // The revert receipt is still attached for inspection
    assert_eq!(result.gas_used(), Some(30000));
}

#[tokio::test]
async fn test_confirm_timeout_transitions_to_unknown() {
    let (client, transport) = client_with_mock(true);
    transport.set_response("tx", json!({ "status": "pending" }));

    let mut result = client
        .submit(CONTRACT, "transfer", &transfer_args(), U256::zero())
        .await
        .unwrap();
    let outcome = client.confirm(&mut result, Duration::from_millis(100)).await;

    assert!(matches!(outcome, Err(SdkError::Timeout { .. })));
    assert_eq!(result.status, SubmitStatus::Unknown);
    assert!(result.receipt.is_none());
}

#[tokio::test]
async fn test_execute_transaction_blocks_until_confirmed() {
    let (client, transport) = client_with_mock(true);
    transport.queue_response("tx", json!({ "status": "pending" }));
    transport.set_response("tx", receipt_json("success", 47000));

    let result = client
        .execute_transaction(
            CONTRACT,
            "transfer",
            &transfer_args(),
            U256::zero(),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    assert_eq!(result.status, SubmitStatus::Confirmed);
    assert_eq!(result.gas_used(), Some(47000));
}
