pub mod base;
pub mod byte_utils;
pub mod endpoint;
pub mod error;
pub mod msg;
pub mod nonblocking;
pub mod payload;
pub mod role;
pub mod state;

/// Capability identifiers answered by SupportsInterface.
pub const CAP_BASE: &str = "omni.base";
pub const CAP_NONBLOCKING: &str = "omni.nonblocking";
pub const CAP_FUNGIBLE: &str = "omni.fungible";
pub const CAP_NFT: &str = "omni.nft";
pub const CAP_CW20: &str = "cw20";
pub const CAP_CW721: &str = "cw721";

/// Whether `id` is in a contract's capability list.
pub fn supports(capabilities: &[&str], id: &str) -> bool {
    capabilities.contains(&id)
}
