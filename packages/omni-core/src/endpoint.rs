//! Message types of the external endpoint collaborator. The endpoint itself
//! is out of scope; applications only ever talk to it through these shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Binary, Uint128};

type HumanAddr = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EndpointExecuteMsg {
    /// Hand a payload to the endpoint for cross-chain delivery. Funds
    /// attached to this message are the fee budget; refund accounting is the
    /// endpoint's business.
    Send {
        dst_chain_id: u16,
        dst_address: Binary,
        payload: Binary,
        refund_address: HumanAddr,
        fee_token: HumanAddr,
        adapter_params: Binary,
    },
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
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EndpointQueryMsg {
    EstimateFees {
        dst_chain_id: u16,
        user_application: HumanAddr,
        payload: Binary,
        pay_in_alt_token: bool,
        adapter_params: Binary,
    },
    GetOutboundNonce {
        chain_id: u16,
        address: HumanAddr,
    },
    GetSendVersion {
        user_application: HumanAddr,
    },
    GetConfig {
        version: u16,
        chain_id: u16,
        user_application: HumanAddr,
        config_type: u32,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct FeeEstimateResponse {
    pub native_fee: Uint128,
    pub alt_fee: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct OutboundNonceResponse {
    pub nonce: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct SendVersionResponse {
    pub version: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct EndpointConfigResponse {
    pub config: Binary,
}
