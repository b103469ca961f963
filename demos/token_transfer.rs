//! End-to-end token flow against a running AgeFix node
//!
//! Configure the environment first:
//!   export AGEFIX_RPC_URL=https://rpc.testnet.agefix.com
//!   export AGEFIX_CHAIN_ID=agefix-testnet-1
//!   export AGEFIX_PRIVATE_KEY=0x...
//!
//! Then run: cargo run --example token_transfer

use std::time::Duration;

use agx_primitives::{Address, U256};
use agx_sdk::contract::TokenContract;
use agx_sdk::{AgefixClient, ClientConfig};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agx_sdk=debug".into()),
        )
        .init();

    let config = ClientConfig::from_env().context("client configuration")?;
    let sender = config
        .wallet()
        .context("AGEFIX_PRIVATE_KEY is required for this demo")?
        .address()
        .to_hex();
    let client = AgefixClient::connect(config)?;

    println!("sender:  {}", sender);
    println!(
        "balance: {} AGX",
        client.get_balance(&sender).await?
    );

    // Deploy a fresh token and move some of it around
    let mut token = TokenContract::new(&client);
    let deployment = token
        .deploy("DemoToken", "DEMO", U256::from(1_000_000u64))
        .await?;
    println!(
        "deployed DemoToken at {} (block {})",
        deployment.contract_address, deployment.block_number
    );

    let recipient: Address = "0x1234567890123456789012345678901234567890".parse()?;
    let mut result = token.transfer(&recipient, U256::from(2500u64)).await?;
    println!("transfer submitted: {}", result.hash());

    client
        .confirm(&mut result, Duration::from_secs(30))
        .await
        .context("waiting for transfer receipt")?;
    println!(
        "confirmed in block {} using {} gas",
        result.block_number().unwrap_or_default(),
        result.gas_used().unwrap_or_default()
    );

    let balance = token.balance_of(&recipient).await?;
    println!("recipient balance: {}", balance);

    Ok(())
}
