use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};

/// General messaging parameters, saved once at instantiation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigInfo {
    /// Address of the endpoint contract this application is registered with
    pub endpoint: Addr,
    /// Native denom the endpoint quotes its fees in
    pub fee_denom: String,
}

pub const CONFIG: Item<ConfigInfo> = Item::new("config");

/// chain id -> the one remote address trusted as counterpart on that chain.
/// Absence means "not trusted", never a default.
pub const TRUSTED_REMOTES: Map<u16, Vec<u8>> = Map::new("trusted_remotes");

/// (src_chain_id, src_address, nonce) -> keccak256 digest of the payload that
/// failed there. Keys are built with [`failed_message_key`].
pub const FAILED_MESSAGES: Map<&[u8], Vec<u8>> = Map::new("failed_messages");

/// Inbound message currently being dispatched to the application handler.
/// Written just before the dispatch submessage, consumed in the reply.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PendingReceipt {
    pub src_chain_id: u16,
    pub src_address: Binary,
    pub nonce: u64,
    pub payload: Binary,
}

pub const PENDING_RECEIPT: Item<PendingReceipt> = Item::new("pending_receipt");

pub fn failed_message_key(src_chain_id: u16, src_address: &[u8], nonce: u64) -> Vec<u8> {
    [
        &src_chain_id.to_be_bytes()[..],
        src_address,
        &nonce.to_be_bytes()[..],
    ]
    .concat()
}
