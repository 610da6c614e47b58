use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;

/// The single admin role. Trust-registry mutation, endpoint configuration and
/// message retry are all gated on it.
pub const DEFAULT_ADMIN_ROLE: &str = "default_admin";

pub const ROLES: Map<(&str, &Addr), bool> = Map::new("roles");

pub fn grant_role(storage: &mut dyn Storage, role: &str, account: &Addr) -> StdResult<()> {
    ROLES.save(storage, (role, account), &true)
}

pub fn has_role(storage: &dyn Storage, role: &str, account: &Addr) -> bool {
    ROLES
        .may_load(storage, (role, account))
        .unwrap_or(None)
        .unwrap_or(false)
}

/// Error text follows the OpenZeppelin AccessControl surface so callers can
/// match on it across implementations.
pub fn assert_role(storage: &dyn Storage, role: &str, account: &Addr) -> StdResult<()> {
    if has_role(storage, role, account) {
        Ok(())
    } else {
        ContractError::MissingRole {
            account: account.to_string(),
            role: role.to_string(),
        }
        .std_err()
    }
}
