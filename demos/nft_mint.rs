//! Deploy an NFT collection and mint into it
//!
//! Needs AGEFIX_RPC_URL, AGEFIX_CHAIN_ID, and AGEFIX_PRIVATE_KEY in the
//! environment. Run: cargo run --example nft_mint

use std::time::Duration;

use agx_primitives::U256;
use agx_sdk::contract::NftContract;
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
    let minter = *config
        .wallet()
        .context("AGEFIX_PRIVATE_KEY is required for this demo")?
        .address();
    let client = AgefixClient::connect(config)?;

    let mut nft = NftContract::new(&client);
    let deployment = nft.deploy("Demo Collection", "DEMO").await?;
    println!("deployed collection at {}", deployment.contract_address);

    let result = nft
        .mint(
            &minter,
            "ipfs://QmYwAPJzv5CZsnAzt8auVTL5oYYkRGy1wTdrDmbLSkhaQT",
            Duration::from_secs(30),
        )
        .await
        .context("minting")?;
    println!(
        "minted in block {} using {} gas",
        result.block_number().unwrap_or_default(),
        result.gas_used().unwrap_or_default()
    );

    let token_id = U256::from(1u64);
    println!("owner of #{}: {}", token_id, nft.owner_of(token_id).await?);
    println!("uri of   #{}: {}", token_id, nft.token_uri(token_id).await?);

    Ok(())
}
