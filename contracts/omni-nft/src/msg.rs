use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Binary, Uint128};
use cw721::Expiration;

type HumanAddr = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// Endpoint contract this collection registers with
    pub endpoint: HumanAddr,
    /// Native denom the endpoint quotes fees in
    pub fee_denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    // omnichain surface; token ids travel as the numeric payload slot
    SetTrustedRemote {
        src_chain_id: u16,
        src_address: Binary,
    },
    /// Burn `token_id` locally and message the remote chain to mint it for
    /// `to_address`. Attached funds are the fee budget.
    Send {
        dst_chain_id: u16,
        to_address: Binary,
        token_id: Uint128,
        refund_address: HumanAddr,
        fee_token: HumanAddr,
        adapter_params: Binary,
    },
    /// As Send, spending `owner`'s token with the caller's approval.
    SendFrom {
        owner: HumanAddr,
        dst_chain_id: u16,
        to_address: Binary,
        token_id: Uint128,
        refund_address: HumanAddr,
        fee_token: HumanAddr,
        adapter_params: Binary,
    },
    /// Inbound delivery, callable only by the endpoint.
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
    /// Self-dispatch target of LzReceive, callable only by the contract.
    NonblockingReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
    RetryMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
    // endpoint configuration passthroughs, admin only
    SetConfig {
        version: u16,
        chain_id: u16,
        config_type: u32,
        config: Binary,
    },
    SetSendVersion {
        version: u16,
    },
    SetReceiveVersion {
        version: u16,
    },
    ForceResumeReceive {
        src_chain_id: u16,
        src_address: Binary,
    },
    // cw721 surface
    TransferNft {
        recipient: HumanAddr,
        token_id: String,
    },
    Approve {
        spender: HumanAddr,
        token_id: String,
        expires: Option<Expiration>,
    },
    Revoke {
        spender: HumanAddr,
        token_id: String,
    },
    ApproveAll {
        operator: HumanAddr,
        expires: Option<Expiration>,
    },
    RevokeAll {
        operator: HumanAddr,
    },
    Mint {
        token_id: String,
        owner: HumanAddr,
        token_uri: Option<String>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    TrustedRemote {
        src_chain_id: u16,
    },
    FailedMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
    },
    EstimateSendFee {
        dst_chain_id: u16,
        to_address: Binary,
        token_id: Uint128,
        use_alt_fee_token: bool,
        adapter_params: Binary,
    },
    SupportsInterface {
        interface: String,
    },
    Config {
        version: u16,
        chain_id: u16,
        config_type: u32,
    },
    SendVersion {},
    HasRole {
        role: String,
        account: HumanAddr,
    },
    // cw721 surface
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
    NumTokens {},
    ContractInfo {},
    Tokens {
        owner: HumanAddr,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MigrateMsg {}
