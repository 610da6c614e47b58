use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct FeeConfig {
    pub native_fee: Uint128,
    pub alt_fee: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct OutboundRecord {
    pub sender: Addr,
    pub dst_chain_id: u16,
    pub dst_address: Binary,
    pub payload: Binary,
}

pub const FEES: Item<FeeConfig> = Item::new("fees");
pub const RECEIVER: Item<Addr> = Item::new("receiver");
/// (dst chain, sending application) -> outbound nonce assigned so far
pub const OUTBOUND_NONCES: Map<(u16, &Addr), u64> = Map::new("outbound_nonces");
pub const LAST_MESSAGE: Item<OutboundRecord> = Item::new("last_message");
