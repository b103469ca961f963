//! Transaction submission and confirmation
//!
//! Submission builds the signed call payload, posts it, and returns as soon
//! as the node accepts the transaction into its pool. Confirmation is a
//! separate polling loop with a deadline. Transport failures are retried
//! with exponential backoff during submission only; a poll that times out
//! is reported as a timeout, never re-submitted.

use std::time::Duration;

use agx_primitives::{H256, U256};
use agx_types::{CallPayload, Receipt, TxLookup, TxStatus};
use bytes::Bytes;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::abi::{encode_function_call, function_selector, method_signature, Token};
use crate::client::{parse_hash_field, tokens_to_json, AgefixClient};
use crate::types::{SubmitStatus, TransactionResult};
use crate::SdkError;

impl AgefixClient {
    /// Submit a state-changing contract method call
    ///
    /// Builds the call payload (method selector + encoded arguments +
    /// value), signs it with the configured key, and posts it to the node.
    /// Returns as soon as the node accepts the transaction into its pool;
    /// use [`await_receipt`](Self::await_receipt) or
    /// [`confirm`](Self::confirm) to wait for the outcome.
    pub async fn submit(
        &self,
        contract_address: &str,
        method: &str,
        args: &[Token],
        value: U256,
    ) -> Result<TransactionResult, SdkError> {
        let wallet = self.wallet()?;
        let contract = self.parse_address(contract_address)?;
        if method.is_empty() {
            return Err(SdkError::InvalidArgument(
                "method name must not be empty".to_string(),
            ));
        }

        let signature = method_signature(method, args);
        let data = encode_function_call(function_selector(&signature), args);

        let payload = CallPayload {
            chain_id: self.config.chain_id().to_string(),
            contract,
            data: Bytes::from(data),
            value,
        };
        let payload_signature = wallet.sign_digest(&payload.digest())?;

        let body = serde_json::json!({
            "contractAddress": contract.to_hex(),
            "method": method,
            "args": tokens_to_json(args),
            "value": value.to_string(),
            "chainId": self.config.chain_id(),
            "sender": wallet.address().to_hex(),
            "payload": format!("0x{}", hex::encode(&payload.data)),
            "signature": payload_signature.to_hex(),
        });

        debug!(contract = %contract, method, "submitting transaction");
        let response = self.post_with_retry("execute", body).await?;

        let tx_hash = parse_hash_field(&response, "txHash")?;
        debug!(tx_hash = %tx_hash, "transaction accepted");

        Ok(TransactionResult::submitted(tx_hash))
    }

    /// Wait for a transaction's receipt
    ///
    /// Polls the node at the configured interval until a receipt appears,
    /// `timeout` elapses, or the node reports the transaction dropped. On a
    /// revert the node's reason is carried in
    /// [`SdkError::ExecutionReverted`]. A timeout is a local-wait failure:
    /// the transaction may still confirm later, so re-poll with the same
    /// hash rather than re-submitting.
    pub async fn await_receipt(
        &self,
        tx_hash: &H256,
        timeout: Duration,
    ) -> Result<Receipt, SdkError> {
        let receipt = self.poll_receipt(tx_hash, timeout).await?;
        match receipt.status {
            TxStatus::Success => Ok(receipt),
            TxStatus::Reverted => Err(revert_error(&receipt)),
        }
    }

    /// Drive a submitted transaction to its final local status
    ///
    /// Delegates to the receipt poll and folds the outcome into `result`:
    /// `Confirmed` on success, `Reverted` on a revert (the error is still
    /// returned), `Unknown` on a local timeout.
    pub async fn confirm(
        &self,
        result: &mut TransactionResult,
        timeout: Duration,
    ) -> Result<(), SdkError> {
        match self.poll_receipt(result.hash(), timeout).await {
            Ok(receipt) => {
                let error = match receipt.status {
                    TxStatus::Success => None,
                    TxStatus::Reverted => Some(revert_error(&receipt)),
                };
                result.status = if error.is_none() {
                    SubmitStatus::Confirmed
                } else {
                    SubmitStatus::Reverted
                };
                result.receipt = Some(receipt);
                match error {
                    None => Ok(()),
                    Some(e) => Err(e),
                }
            }
            Err(e @ SdkError::Timeout { .. }) => {
                result.status = SubmitStatus::Unknown;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Submit a call and block until its receipt is observed
    ///
    /// Convenience wrapper over [`submit`](Self::submit) and
    /// [`confirm`](Self::confirm).
    pub async fn execute_transaction(
        &self,
        contract_address: &str,
        method: &str,
        args: &[Token],
        value: U256,
        timeout: Duration,
    ) -> Result<TransactionResult, SdkError> {
        let mut result = self.submit(contract_address, method, args, value).await?;
        self.confirm(&mut result, timeout).await?;
        Ok(result)
    }

    /// Poll for a receipt until the deadline, regardless of its status
    async fn poll_receipt(&self, tx_hash: &H256, timeout: Duration) -> Result<Receipt, SdkError> {
        let started = Instant::now();
        let poll_interval = self.config.poll_interval();

        loop {
            match self.lookup_transaction(tx_hash).await {
                Ok(TxLookup::Confirmed { receipt }) => return Ok(receipt),
                Ok(TxLookup::Dropped) => return Err(SdkError::TransactionDropped),
                Ok(TxLookup::Pending) => {
                    debug!(tx_hash = %tx_hash, "receipt not yet available");
                }
                // A flaky poll is not a chain failure; keep polling until
                // the deadline
                Err(SdkError::Transport(message)) => {
                    warn!(tx_hash = %tx_hash, %message, "receipt poll failed");
                }
                Err(other) => return Err(other),
            }

            if started.elapsed() + poll_interval > timeout {
                return Err(SdkError::Timeout {
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// POST with bounded retries and exponential backoff
    ///
    /// Only transport-level failures are retried; errors reported by the
    /// node are returned as-is.
    pub(crate) async fn post_with_retry(
        &self,
        route: &str,
        body: Value,
    ) -> Result<Value, SdkError> {
        let max_attempts = self.config.max_retries();
        let mut backoff = self.config.retry_backoff();
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.transport.post_json(route, body.clone()).await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!(route, attempt, "request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(SdkError::Transport(message)) => {
                    warn!(route, attempt, max_attempts, %message, "transport failure");
                    last_error = message;
                }
                Err(other) => return Err(other),
            }

            if attempt < max_attempts {
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }

        Err(SdkError::Network {
            attempts: max_attempts,
            message: last_error,
        })
    }
}

fn revert_error(receipt: &Receipt) -> SdkError {
    SdkError::ExecutionReverted {
        reason: receipt
            .revert_reason
            .clone()
            .unwrap_or_else(|| "execution reverted".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgefixClient;

    const CONTRACT: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d";

    #[tokio::test]
    async fn test_submit_returns_submitted_status() {
        let client = AgefixClient::new_mock();
        let result = client
            .submit(CONTRACT, "transfer", &[Token::uint(100)], U256::zero())
            .await
            .unwrap();

        assert_eq!(result.status, SubmitStatus::Submitted);
        assert!(result.receipt.is_none());
        assert!(!result.hash().is_zero());
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_method() {
        let client = AgefixClient::new_mock();
        let result = client.submit(CONTRACT, "", &[], U256::zero()).await;
        assert!(matches!(result, Err(SdkError::InvalidArgument(_))));
    }
}
