use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Binary, Uint128};

use crate::state::OutboundRecord;

type HumanAddr = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub native_fee: Uint128,
    pub alt_fee: Uint128,
}

/// Superset of the endpoint execute interface: the variants applications send
/// plus test controls (SetFees, SetReceiver, Deliver).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Send {
        dst_chain_id: u16,
        dst_address: Binary,
        payload: Binary,
        refund_address: HumanAddr,
        fee_token: HumanAddr,
        adapter_params: Binary,
    },
    // configuration surface, deliberately failing so passthrough callers can
    // observe verbatim error forwarding
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
    // test controls
    SetFees {
        native_fee: Uint128,
        alt_fee: Uint128,
    },
    SetReceiver {
        receiver: HumanAddr,
    },
    /// Push an inbound message into the registered receiver.
    Deliver {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
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
    /// Last outbound message recorded by Send.
    LastMessage {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct LastMessageResponse {
    pub message: Option<OutboundRecord>,
}

/// Inbound execute shape of the applications this mock delivers to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReceiverExecuteMsg {
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
}
