//! Contract interaction helpers
//!
//! A [`Contract`] is a method registry for a deployed contract: it maps
//! method names to canonical signatures, selectors, and parameter types, so
//! calls can be validated before they reach the network and query results
//! can be decoded into typed values. [`TokenContract`] and [`NftContract`]
//! wrap the two stock AGXCL contract templates.

use agx_primitives::{Address, U256};
use bytes::Bytes;
use serde_json::Value;
use std::time::Duration;

use crate::abi::{decode, encode_function_call, function_selector, ParamType, Token};
use crate::client::AgefixClient;
use crate::types::{ContractDeployment, TransactionResult};
use crate::SdkError;

/// Method definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Method name
    pub name: String,
    /// Canonical signature (e.g., "transfer(address,uint256)")
    pub signature: String,
    /// Method selector (4 bytes)
    pub selector: [u8; 4],
    /// Input parameter types
    pub inputs: Vec<ParamType>,
    /// Output parameter types
    pub outputs: Vec<ParamType>,
}

impl FunctionDef {
    /// Create a new method definition
    pub fn new(
        name: impl Into<String>,
        signature: impl Into<String>,
        inputs: Vec<ParamType>,
        outputs: Vec<ParamType>,
    ) -> Self {
        let signature = signature.into();
        let selector = function_selector(&signature);
        Self {
            name: name.into(),
            signature,
            selector,
            inputs,
            outputs,
        }
    }
}

/// Method registry for a deployed contract
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    functions: Vec<FunctionDef>,
}

impl Contract {
    /// Create an empty registry for a contract
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Get the contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Add a method definition (builder style)
    pub fn with_function(mut self, function: FunctionDef) -> Self {
        self.functions.push(function);
        self
    }

    /// Get a method definition by name
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Validate arguments against a method's parameter types
    pub fn check_args(&self, method: &str, args: &[Token]) -> Result<&FunctionDef, SdkError> {
        let function = self
            .function(method)
            .ok_or_else(|| SdkError::InvalidArgument(format!("unknown method: {}", method)))?;

        if args.len() != function.inputs.len() {
            return Err(SdkError::InvalidArgument(format!(
                "{} expects {} arguments, got {}",
                method,
                function.inputs.len(),
                args.len()
            )));
        }
        for (i, (token, expected)) in args.iter().zip(function.inputs.iter()).enumerate() {
            if !type_matches(&token.type_of(), expected) {
                return Err(SdkError::InvalidArgument(format!(
                    "{} argument {} expects {}, got {}",
                    method,
                    i,
                    expected.name(),
                    token.type_of().name()
                )));
            }
        }

        Ok(function)
    }

    /// Encode a validated call (selector + arguments)
    pub fn encode_call(&self, method: &str, args: &[Token]) -> Result<Bytes, SdkError> {
        let function = self.check_args(method, args)?;
        Ok(Bytes::from(encode_function_call(function.selector, args)))
    }

    /// Decode a method's return words
    pub fn decode_output(&self, method: &str, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        let function = self
            .function(method)
            .ok_or_else(|| SdkError::AbiDecode(format!("unknown method: {}", method)))?;
        decode(&function.outputs, data)
    }
}

/// Uint widths all encode the same way; everything else matches exactly
fn type_matches(actual: &ParamType, expected: &ParamType) -> bool {
    match (actual, expected) {
        (ParamType::Uint(_), ParamType::Uint(_)) => true,
        (ParamType::Array(a), ParamType::Array(b)) => type_matches(a, b),
        (a, b) => a == b,
    }
}

/// Registry for the stock AGXCL token contract
pub fn token(address: Address) -> Contract {
    Contract::new(address)
        .with_function(FunctionDef::new("name", "name()", vec![], vec![ParamType::String]))
        .with_function(FunctionDef::new(
            "symbol",
            "symbol()",
            vec![],
            vec![ParamType::String],
        ))
        .with_function(FunctionDef::new(
            "totalSupply",
            "totalSupply()",
            vec![],
            vec![ParamType::Uint(256)],
        ))
        .with_function(FunctionDef::new(
            "balanceOf",
            "balanceOf(address)",
            vec![ParamType::Address],
            vec![ParamType::Uint(256)],
        ))
        .with_function(FunctionDef::new(
            "transfer",
            "transfer(address,uint256)",
            vec![ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        ))
        .with_function(FunctionDef::new(
            "approve",
            "approve(address,uint256)",
            vec![ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        ))
        .with_function(FunctionDef::new(
            "allowance",
            "allowance(address,address)",
            vec![ParamType::Address, ParamType::Address],
            vec![ParamType::Uint(256)],
        ))
        .with_function(FunctionDef::new(
            "transferFrom",
            "transferFrom(address,address,uint256)",
            vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        ))
}

/// Registry for the stock AGXCL NFT contract
pub fn nft(address: Address) -> Contract {
    Contract::new(address)
        .with_function(FunctionDef::new("name", "name()", vec![], vec![ParamType::String]))
        .with_function(FunctionDef::new(
            "symbol",
            "symbol()",
            vec![],
            vec![ParamType::String],
        ))
        .with_function(FunctionDef::new(
            "mint",
            "mint(address,string)",
            vec![ParamType::Address, ParamType::String],
            vec![ParamType::Uint(256)],
        ))
        .with_function(FunctionDef::new(
            "ownerOf",
            "ownerOf(uint256)",
            vec![ParamType::Uint(256)],
            vec![ParamType::Address],
        ))
        .with_function(FunctionDef::new(
            "tokenURI",
            "tokenURI(uint256)",
            vec![ParamType::Uint(256)],
            vec![ParamType::String],
        ))
        .with_function(FunctionDef::new(
            "balanceOf",
            "balanceOf(address)",
            vec![ParamType::Address],
            vec![ParamType::Uint(256)],
        ))
}

/// Decode a query result value into return words
///
/// The node returns typed method results as hex-encoded words.
fn result_words(data: &Value) -> Result<Vec<u8>, SdkError> {
    let s = data
        .as_str()
        .ok_or_else(|| SdkError::AbiDecode("query result is not a hex string".to_string()))?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| SdkError::AbiDecode(e.to_string()))
}

/// High-level wrapper for the stock AGXCL token contract
pub struct TokenContract<'a> {
    client: &'a AgefixClient,
    contract: Option<Contract>,
}

impl<'a> TokenContract<'a> {
    /// Create a wrapper that has not been bound to a deployment yet
    pub fn new(client: &'a AgefixClient) -> Self {
        Self {
            client,
            contract: None,
        }
    }

    /// Create a wrapper for an already deployed token
    pub fn at(client: &'a AgefixClient, address: Address) -> Self {
        Self {
            client,
            contract: Some(token(address)),
        }
    }

    /// Address of the bound deployment, if any
    pub fn address(&self) -> Option<&Address> {
        self.contract.as_ref().map(Contract::address)
    }

    fn contract(&self) -> Result<&Contract, SdkError> {
        self.contract
            .as_ref()
            .ok_or_else(|| SdkError::InvalidArgument("contract not deployed".to_string()))
    }

    /// Deploy a new token contract and bind this wrapper to it
    pub async fn deploy(
        &mut self,
        name: &str,
        symbol: &str,
        total_supply: U256,
    ) -> Result<ContractDeployment, SdkError> {
        let code = token_source(name, symbol, total_supply);
        let deployment = self.client.deploy_contract(&code, &[]).await?;
        self.contract = Some(token(deployment.contract_address));
        Ok(deployment)
    }

    /// Get the token balance of an account
    pub async fn balance_of(&self, owner: &Address) -> Result<U256, SdkError> {
        let contract = self.contract()?;
        let args = [Token::Address(*owner)];
        contract.check_args("balanceOf", &args)?;

        let result = self
            .client
            .query_contract(&contract.address().to_hex(), "balanceOf", &args)
            .await?;

        match contract
            .decode_output("balanceOf", &result_words(&result.data)?)?
            .pop()
        {
            Some(Token::Uint(balance)) => Ok(balance),
            other => Err(SdkError::AbiDecode(format!(
                "unexpected balanceOf result: {:?}",
                other
            ))),
        }
    }

    /// Transfer tokens to another account
    pub async fn transfer(
        &self,
        to: &Address,
        amount: U256,
    ) -> Result<TransactionResult, SdkError> {
        self.submit("transfer", &[Token::Address(*to), Token::Uint(amount)])
            .await
    }

    /// Approve a spender for an amount
    pub async fn approve(
        &self,
        spender: &Address,
        amount: U256,
    ) -> Result<TransactionResult, SdkError> {
        self.submit("approve", &[Token::Address(*spender), Token::Uint(amount)])
            .await
    }

    /// Transfer tokens on behalf of another account
    pub async fn transfer_from(
        &self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<TransactionResult, SdkError> {
        self.submit(
            "transferFrom",
            &[
                Token::Address(*from),
                Token::Address(*to),
                Token::Uint(amount),
            ],
        )
        .await
    }

    async fn submit(&self, method: &str, args: &[Token]) -> Result<TransactionResult, SdkError> {
        let contract = self.contract()?;
        contract.check_args(method, args)?;
        self.client
            .submit(&contract.address().to_hex(), method, args, U256::zero())
            .await
    }
}

/// High-level wrapper for the stock AGXCL NFT contract
pub struct NftContract<'a> {
    client: &'a AgefixClient,
    contract: Option<Contract>,
}

impl<'a> NftContract<'a> {
    /// Create a wrapper that has not been bound to a deployment yet
    pub fn new(client: &'a AgefixClient) -> Self {
        Self {
            client,
            contract: None,
        }
    }

    /// Create a wrapper for an already deployed collection
    pub fn at(client: &'a AgefixClient, address: Address) -> Self {
        Self {
            client,
            contract: Some(nft(address)),
        }
    }

    /// Address of the bound deployment, if any
    pub fn address(&self) -> Option<&Address> {
        self.contract.as_ref().map(Contract::address)
    }

    fn contract(&self) -> Result<&Contract, SdkError> {
        self.contract
            .as_ref()
            .ok_or_else(|| SdkError::InvalidArgument("contract not deployed".to_string()))
    }

    /// Deploy a new NFT contract and bind this wrapper to it
    pub async fn deploy(
        &mut self,
        name: &str,
        symbol: &str,
    ) -> Result<ContractDeployment, SdkError> {
        let code = nft_source(name, symbol);
        let deployment = self.client.deploy_contract(&code, &[]).await?;
        self.contract = Some(nft(deployment.contract_address));
        Ok(deployment)
    }

    /// Mint a new token, waiting for the receipt
    pub async fn mint(
        &self,
        to: &Address,
        uri: &str,
        timeout: Duration,
    ) -> Result<TransactionResult, SdkError> {
        let contract = self.contract()?;
        let args = [Token::Address(*to), Token::string(uri)];
        contract.check_args("mint", &args)?;
        self.client
            .execute_transaction(
                &contract.address().to_hex(),
                "mint",
                &args,
                U256::zero(),
                timeout,
            )
            .await
    }

    /// Get the owner of a token
    pub async fn owner_of(&self, token_id: U256) -> Result<Address, SdkError> {
        let contract = self.contract()?;
        let result = self
            .client
            .query_contract(
                &contract.address().to_hex(),
                "ownerOf",
                &[Token::Uint(token_id)],
            )
            .await?;

        match contract
            .decode_output("ownerOf", &result_words(&result.data)?)?
            .pop()
        {
            Some(Token::Address(owner)) => Ok(owner),
            other => Err(SdkError::AbiDecode(format!(
                "unexpected ownerOf result: {:?}",
                other
            ))),
        }
    }

    /// Get the metadata URI of a token
    pub async fn token_uri(&self, token_id: U256) -> Result<String, SdkError> {
        let contract = self.contract()?;
        let result = self
            .client
            .query_contract(
                &contract.address().to_hex(),
                "tokenURI",
                &[Token::Uint(token_id)],
            )
            .await?;

        match contract
            .decode_output("tokenURI", &result_words(&result.data)?)?
            .pop()
        {
            Some(Token::String(uri)) => Ok(uri),
            other => Err(SdkError::AbiDecode(format!(
                "unexpected tokenURI result: {:?}",
                other
            ))),
        }
    }
}

/// AGXCL source for the stock token contract
fn token_source(name: &str, symbol: &str, total_supply: U256) -> String {
    format!(
        r#"contract Token {{
  state {{
    string name = "{name}";
    string symbol = "{symbol}";
    uint256 totalSupply = {total_supply};
    mapping(address => uint256) balances;
    mapping(address => mapping(address => uint256)) allowances;
  }}

  constructor() {{
    balances[msg.sender] = totalSupply;
  }}

  function balanceOf(address account) public view returns (uint256) {{
    return balances[account];
  }}

  function transfer(address to, uint256 amount) public returns (bool) {{
    require(balances[msg.sender] >= amount, "Insufficient balance");
    balances[msg.sender] -= amount;
    balances[to] += amount;
    emit Transfer(msg.sender, to, amount);
    return true;
  }}

  function approve(address spender, uint256 amount) public returns (bool) {{
    allowances[msg.sender][spender] = amount;
    emit Approval(msg.sender, spender, amount);
    return true;
  }}

  function transferFrom(address from, address to, uint256 amount) public returns (bool) {{
    require(balances[from] >= amount, "Insufficient balance");
    require(allowances[from][msg.sender] >= amount, "Insufficient allowance");
    balances[from] -= amount;
    balances[to] += amount;
    allowances[from][msg.sender] -= amount;
    emit Transfer(from, to, amount);
    return true;
  }}

  event Transfer(address indexed from, address indexed to, uint256 value);
  event Approval(address indexed owner, address indexed spender, uint256 value);
}}
"#
    )
}

/// AGXCL source for the stock NFT contract
fn nft_source(name: &str, symbol: &str) -> String {
    format!(
        r#"contract NFT {{
  state {{
    string name = "{name}";
    string symbol = "{symbol}";
    uint256 nextTokenId = 1;
    mapping(uint256 => address) owners;
    mapping(uint256 => string) tokenURIs;
    mapping(address => uint256) balances;
  }}

  function mint(address to, string memory uri) public returns (uint256) {{
    uint256 tokenId = nextTokenId++;
    owners[tokenId] = to;
    tokenURIs[tokenId] = uri;
    balances[to]++;
    emit Mint(to, tokenId, uri);
    return tokenId;
  }}

  function ownerOf(uint256 tokenId) public view returns (address) {{
    return owners[tokenId];
  }}

  function tokenURI(uint256 tokenId) public view returns (string memory) {{
    return tokenURIs[tokenId];
  }}

  function balanceOf(address owner) public view returns (uint256) {{
    return balances[owner];
  }}

  event Mint(address indexed to, uint256 indexed tokenId, string uri);
}}
"#
    )
}
