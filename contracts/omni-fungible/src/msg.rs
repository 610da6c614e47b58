use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Binary, Uint128};
use cw20::Expiration;

type HumanAddr = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Endpoint contract this token registers with
    pub endpoint: HumanAddr,
    /// Native denom the endpoint quotes fees in
    pub fee_denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    // omnichain surface
    SetTrustedRemote {
        src_chain_id: u16,
        src_address: Binary,
    },
    /// Burn `amount` from the caller and message the remote chain to mint it
    /// for `to_address`. Attached funds are the fee budget.
    Send {
        dst_chain_id: u16,
        to_address: Binary,
        amount: Uint128,
        refund_address: HumanAddr,
        fee_token: HumanAddr,
        adapter_params: Binary,
    },
    /// As Send, spending `owner`'s balance against the caller's allowance.
    SendFrom {
        owner: HumanAddr,
        dst_chain_id: u16,
        to_address: Binary,
        amount: Uint128,
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
    // cw20 surface
    Transfer {
        recipient: HumanAddr,
        amount: Uint128,
    },
    TransferFrom {
        owner: HumanAddr,
        recipient: HumanAddr,
        amount: Uint128,
    },
    IncreaseAllowance {
        spender: HumanAddr,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    DecreaseAllowance {
        spender: HumanAddr,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    Burn {
        amount: Uint128,
    },
    Mint {
        recipient: HumanAddr,
        amount: Uint128,
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
        amount: Uint128,
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
    // cw20 surface
    Balance {
        address: HumanAddr,
    },
    TokenInfo {},
    Allowance {
        owner: HumanAddr,
        spender: HumanAddr,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MigrateMsg {}
