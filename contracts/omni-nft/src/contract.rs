use cosmwasm_std::{
    entry_point, to_binary, Addr, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo, Reply,
    Response, StdError, StdResult, Storage, Uint128,
};

use cw2::set_contract_version;
use cw721::{ContractInfoResponse, Cw721Query};
use cw721_base::state::{Cw721Contract, TokenInfo};
use cw721_base::ContractError;

use omni_core::base;
use omni_core::endpoint::EndpointExecuteMsg;
use omni_core::error::ContractError as OmniError;
use omni_core::msg::{RoleResponse, SupportsInterfaceResponse};
use omni_core::nonblocking;
use omni_core::payload::TransferPayload;
use omni_core::role;
use omni_core::{supports, CAP_BASE, CAP_CW721, CAP_NFT, CAP_NONBLOCKING};

use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};

const CONTRACT_NAME: &str = "crates.io:omni-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const CAPABILITIES: &[&str] = &[CAP_BASE, CAP_NONBLOCKING, CAP_NFT, CAP_CW721];

pub type Extension = Option<Empty>;
type TokenContract<'a> = Cw721Contract<'a, Extension, Empty>;
type Cw721ExecuteMsg = cw721_base::msg::ExecuteMsg<Extension>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    base::instantiate_base(deps.branch(), &info, msg.endpoint, msg.fee_denom)?;

    let contract = TokenContract::default();
    contract.contract_info.save(
        deps.storage,
        &ContractInfoResponse {
            name: msg.name,
            symbol: msg.symbol,
        },
    )?;
    // the instantiator doubles as admin and cw721 minter
    contract.minter.save(deps.storage, &info.sender)?;
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(_deps: DepsMut, _env: Env, _msg: MigrateMsg) -> StdResult<Response> {
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetTrustedRemote {
            src_chain_id,
            src_address,
        } => Ok(base::set_trusted_remote(deps, &info, src_chain_id, src_address)?),
        ExecuteMsg::Send {
            dst_chain_id,
            to_address,
            token_id,
            refund_address,
            fee_token,
            adapter_params,
        } => execute_send(
            deps,
            env,
            info,
            None,
            dst_chain_id,
            to_address,
            token_id,
            refund_address,
            fee_token,
            adapter_params,
        ),
        ExecuteMsg::SendFrom {
            owner,
            dst_chain_id,
            to_address,
            token_id,
            refund_address,
            fee_token,
            adapter_params,
        } => execute_send(
            deps,
            env,
            info,
            Some(owner),
            dst_chain_id,
            to_address,
            token_id,
            refund_address,
            fee_token,
            adapter_params,
        ),
        ExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => Ok(execute_lz_receive(
            deps,
            env,
            info,
            src_chain_id,
            src_address,
            nonce,
            payload,
        )?),
        ExecuteMsg::NonblockingReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => {
            nonblocking::assert_internal(&env, &info)?;
            Ok(receive_transfer(
                deps,
                src_chain_id,
                src_address,
                nonce,
                payload,
            )?)
        }
        ExecuteMsg::RetryMessage {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => Ok(nonblocking::retry_message(
            deps,
            &info,
            src_chain_id,
            src_address,
            nonce,
            payload,
            receive_transfer,
        )?),
        ExecuteMsg::SetConfig {
            version,
            chain_id,
            config_type,
            config,
        } => Ok(base::endpoint_admin_execute(
            deps,
            &info,
            EndpointExecuteMsg::SetConfig {
                version,
                chain_id,
                config_type,
                config,
            },
        )?),
        ExecuteMsg::SetSendVersion { version } => Ok(base::endpoint_admin_execute(
            deps,
            &info,
            EndpointExecuteMsg::SetSendVersion { version },
        )?),
        ExecuteMsg::SetReceiveVersion { version } => Ok(base::endpoint_admin_execute(
            deps,
            &info,
            EndpointExecuteMsg::SetReceiveVersion { version },
        )?),
        ExecuteMsg::ForceResumeReceive {
            src_chain_id,
            src_address,
        } => Ok(base::endpoint_admin_execute(
            deps,
            &info,
            EndpointExecuteMsg::ForceResumeReceive {
                src_chain_id,
                src_address,
            },
        )?),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::TransferNft {
                recipient,
                token_id,
            },
        ),
        ExecuteMsg::Approve {
            spender,
            token_id,
            expires,
        } => TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::Approve {
                spender,
                token_id,
                expires,
            },
        ),
        ExecuteMsg::Revoke { spender, token_id } => TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::Revoke { spender, token_id },
        ),
        ExecuteMsg::ApproveAll { operator, expires } => TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::ApproveAll { operator, expires },
        ),
        ExecuteMsg::RevokeAll { operator } => TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::RevokeAll { operator },
        ),
        ExecuteMsg::Mint {
            token_id,
            owner,
            token_uri,
        } => TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::Mint(cw721_base::msg::MintMsg {
                token_id,
                owner,
                token_uri,
                extension: None,
            }),
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn execute_send(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: Option<String>,
    dst_chain_id: u16,
    to_address: Binary,
    token_id: Uint128,
    refund_address: String,
    fee_token: String,
    adapter_params: Binary,
) -> Result<Response, ContractError> {
    if base::query_trusted_remote(deps.as_ref(), dst_chain_id)?
        .address
        .is_empty()
    {
        return Err(OmniError::ChannelNotTrusted.std().into());
    }

    // encode first so a recipient the wire format cannot carry is rejected
    // before any ownership is touched
    let payload = Binary::from(
        TransferPayload {
            to_address: to_address.clone(),
            amount: token_id,
        }
        .serialize()?,
    );

    debit_token(deps.branch(), &env, &info.sender, owner.as_deref(), token_id)?;

    let send = base::lz_send(
        deps.as_ref(),
        &env,
        &info,
        dst_chain_id,
        payload,
        refund_address,
        fee_token,
        adapter_params,
    )?;
    let nonce = base::next_outbound_nonce(deps.as_ref(), &env, dst_chain_id)?;

    let from = owner.unwrap_or_else(|| info.sender.to_string());
    Ok(Response::new()
        .add_message(send)
        .add_attribute("action", "send_to_chain")
        .add_event(
            Event::new("SendToChain")
                .add_attribute("sender", from)
                .add_attribute("dst_chain_id", dst_chain_id.to_string())
                .add_attribute("to_address", hex::encode(to_address.as_slice()))
                .add_attribute("token_id", token_id)
                .add_attribute("nonce", nonce.to_string()),
        ))
}

/// Remove the token being bridged out. The caller must be its owner or hold
/// an unexpired approval or operator grant; with an explicit `owner` the
/// token must actually belong to that owner.
fn debit_token(
    deps: DepsMut,
    env: &Env,
    sender: &Addr,
    owner: Option<&str>,
    token_id: Uint128,
) -> Result<(), ContractError> {
    let contract = TokenContract::default();
    let id = token_id.to_string();
    let token = contract.tokens.load(deps.storage, &id)?;

    if let Some(owner) = owner {
        if token.owner != owner {
            return Err(OmniError::NotOwnerOrApproved.std().into());
        }
    }
    if !can_spend(deps.as_ref(), env, sender, &token)? {
        return Err(OmniError::NotOwnerOrApproved.std().into());
    }

    contract.tokens.remove(deps.storage, &id)?;
    contract.decrement_tokens(deps.storage)?;
    Ok(())
}

fn can_spend(
    deps: Deps,
    env: &Env,
    sender: &Addr,
    token: &TokenInfo<Extension>,
) -> StdResult<bool> {
    if token.owner == *sender {
        return Ok(true);
    }
    if token
        .approvals
        .iter()
        .any(|a| a.spender == *sender && !a.is_expired(&env.block))
    {
        return Ok(true);
    }
    let contract = TokenContract::default();
    Ok(
        match contract
            .operators
            .may_load(deps.storage, (&token.owner, sender))?
        {
            Some(grant) => !grant.is_expired(&env.block),
            None => false,
        },
    )
}

fn execute_lz_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> StdResult<Response> {
    let dispatch = to_binary(&ExecuteMsg::NonblockingReceive {
        src_chain_id,
        src_address: src_address.clone(),
        nonce,
        payload: payload.clone(),
    })?;
    nonblocking::receive(
        deps,
        &env,
        &info,
        src_chain_id,
        src_address,
        nonce,
        payload,
        dispatch,
    )
}

/// Application handler: mint the bridged token id to the local recipient.
/// Duplicate delivery of an existing id fails here and lands in the failure
/// table instead of blocking the channel.
fn receive_transfer(
    deps: DepsMut,
    src_chain_id: u16,
    _src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> StdResult<Response> {
    let transfer = TransferPayload::deserialize(payload.as_slice())?;
    let recipient = String::from_utf8(transfer.to_address.to_vec())
        .map_err(|_| OmniError::InvalidRecipient.std())?;
    let recipient = deps
        .api
        .addr_validate(&recipient)
        .map_err(|_| OmniError::InvalidRecipient.std())?;

    let token_id = transfer.amount;
    mint_token(deps.storage, &token_id.to_string(), recipient.clone())?;

    Ok(Response::new()
        .add_attribute("action", "receive_from_chain")
        .add_event(
            Event::new("ReceiveFromChain")
                .add_attribute("src_chain_id", src_chain_id.to_string())
                .add_attribute("to_address", recipient)
                .add_attribute("token_id", token_id)
                .add_attribute("nonce", nonce.to_string()),
        ))
}

/// Bridge mint, bypassing the cw721 minter gate.
fn mint_token(storage: &mut dyn Storage, token_id: &str, owner: Addr) -> StdResult<()> {
    let contract = TokenContract::default();
    contract
        .tokens
        .update(storage, token_id, |existing| match existing {
            Some(_) => Err(StdError::generic_err("token already minted")),
            None => Ok(TokenInfo {
                owner,
                approvals: vec![],
                token_uri: None,
                extension: None,
            }),
        })?;
    contract.increment_tokens(storage)?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    nonblocking::handle_reply(deps, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    let contract = TokenContract::default();
    match msg {
        QueryMsg::TrustedRemote { src_chain_id } => {
            to_binary(&base::query_trusted_remote(deps, src_chain_id)?)
        }
        QueryMsg::FailedMessage {
            src_chain_id,
            src_address,
            nonce,
        } => to_binary(&nonblocking::query_failed_message(
            deps,
            src_chain_id,
            src_address,
            nonce,
        )?),
        QueryMsg::EstimateSendFee {
            dst_chain_id,
            to_address,
            token_id,
            use_alt_fee_token,
            adapter_params,
        } => {
            let payload = Binary::from(
                TransferPayload {
                    to_address,
                    amount: token_id,
                }
                .serialize()?,
            );
            to_binary(&base::estimate_fees(
                deps,
                &env,
                dst_chain_id,
                payload,
                use_alt_fee_token,
                adapter_params,
            )?)
        }
        QueryMsg::SupportsInterface { interface } => to_binary(&SupportsInterfaceResponse {
            supported: supports(CAPABILITIES, &interface),
        }),
        QueryMsg::Config {
            version,
            chain_id,
            config_type,
        } => to_binary(&base::query_endpoint_config(
            deps,
            &env,
            version,
            chain_id,
            config_type,
        )?),
        QueryMsg::SendVersion {} => to_binary(&base::query_send_version(deps, &env)?),
        QueryMsg::HasRole { role, account } => {
            let account = deps.api.addr_validate(&account)?;
            to_binary(&RoleResponse {
                has_role: role::has_role(deps.storage, &role, &account),
            })
        }
        QueryMsg::OwnerOf {
            token_id,
            include_expired,
        } => to_binary(&contract.owner_of(
            deps,
            env,
            token_id,
            include_expired.unwrap_or(false),
        )?),
        QueryMsg::NumTokens {} => to_binary(&contract.num_tokens(deps)?),
        QueryMsg::ContractInfo {} => to_binary(&contract.contract_info(deps)?),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => to_binary(&contract.tokens(deps, owner, start_after, limit)?),
    }
}
