//! Wire format of bridge transfer payloads.
//!
//! Transfers travel as a length-prefixed recipient followed by a 256-bit
//! big-endian amount:
//!
//! ```text
//! 0       u8       recipient length L
//! 1       [u8; L]  recipient address bytes
//! 1+L     u256     amount
//! ```
//!
//! Amounts above 128 bits are rejected on parse; everything local is Uint128.

use cosmwasm_std::{Binary, StdResult, Uint128};

use crate::byte_utils::ByteUtils;
use crate::error::ContractError;

/// Recipients longer than this do not fit the wire format.
pub const MAX_RECIPIENT_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct TransferPayload {
    pub to_address: Binary,
    pub amount: Uint128,
}

impl TransferPayload {
    pub fn serialize(&self) -> StdResult<Vec<u8>> {
        if self.to_address.is_empty() || self.to_address.len() > MAX_RECIPIENT_LEN {
            return ContractError::InvalidRecipient.std_err();
        }
        let mut data: Vec<u8> = Vec::with_capacity(1 + self.to_address.len() + 32);
        data.push(self.to_address.len() as u8);
        data.extend_from_slice(self.to_address.as_slice());
        data.extend_from_slice(&[0u8; 16]);
        data.extend_from_slice(&self.amount.u128().to_be_bytes());
        Ok(data)
    }

    pub fn deserialize(data: &[u8]) -> StdResult<Self> {
        if data.is_empty() {
            return ContractError::InvalidTransferPayload.std_err();
        }
        let len = data.get_u8(0) as usize;
        if len == 0 || len > MAX_RECIPIENT_LEN {
            return ContractError::InvalidTransferPayload.std_err();
        }
        if data.len() != 1 + len + 32 {
            return ContractError::InvalidTransferPayload.std_err();
        }
        let to_address = data.get_bytes(1, len).to_vec();
        let (high, low) = data.get_u256(1 + len);
        if high != 0 {
            return ContractError::AmountTooHigh.std_err();
        }
        Ok(TransferPayload {
            to_address: Binary::from(to_address),
            amount: Uint128::new(low),
        })
    }
}
