use cosmwasm_std::{
    entry_point, to_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response,
    StdResult, Storage, Uint128,
};

use cw2::set_contract_version;
use cw20_base::allowances::{
    execute_burn_from, execute_decrease_allowance, execute_increase_allowance,
    execute_transfer_from, query_allowance,
};
use cw20_base::contract::{
    execute_burn, execute_mint, execute_transfer, query_balance, query_token_info,
};
use cw20_base::state::{MinterData, TokenInfo, BALANCES, TOKEN_INFO};
use cw20_base::ContractError;

use omni_core::base;
use omni_core::endpoint::EndpointExecuteMsg;
use omni_core::error::ContractError as OmniError;
use omni_core::msg::{RoleResponse, SupportsInterfaceResponse};
use omni_core::nonblocking;
use omni_core::payload::TransferPayload;
use omni_core::role;
use omni_core::{supports, CAP_BASE, CAP_CW20, CAP_FUNGIBLE, CAP_NONBLOCKING};

use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};

const CONTRACT_NAME: &str = "crates.io:omni-fungible";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const CAPABILITIES: &[&str] = &[CAP_BASE, CAP_NONBLOCKING, CAP_FUNGIBLE, CAP_CW20];

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    base::instantiate_base(deps.branch(), &info, msg.endpoint, msg.fee_denom)?;

    // the instantiator doubles as admin and cw20 minter
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
            mint: Some(MinterData {
                minter: info.sender,
                cap: None,
            }),
        },
    )?;
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
            amount,
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
            amount,
            refund_address,
            fee_token,
            adapter_params,
        ),
        ExecuteMsg::SendFrom {
            owner,
            dst_chain_id,
            to_address,
            amount,
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
            amount,
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
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute_transfer_from(deps, env, info, owner, recipient, amount),
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => execute_increase_allowance(deps, env, info, spender, amount, expires),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => execute_decrease_allowance(deps, env, info, spender, amount, expires),
        ExecuteMsg::Burn { amount } => execute_burn(deps, env, info, amount),
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, env, info, recipient, amount),
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
    amount: Uint128,
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
    // before any balance is touched
    let payload = Binary::from(
        TransferPayload {
            to_address: to_address.clone(),
            amount,
        }
        .serialize()?,
    );

    // debit before messaging; attached funds stay reserved for the fee
    let burn_info = MessageInfo {
        sender: info.sender.clone(),
        funds: vec![],
    };
    match &owner {
        Some(owner) => {
            execute_burn_from(deps.branch(), env.clone(), burn_info, owner.clone(), amount)?;
        }
        None => {
            execute_burn(deps.branch(), env.clone(), burn_info, amount)?;
        }
    }

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
                .add_attribute("amount", amount)
                .add_attribute("nonce", nonce.to_string()),
        ))
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

/// Application handler: mint the transferred amount to the local recipient.
/// Also the retry target, so it must be self-contained and StdResult-typed.
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

    mint_to(deps.storage, &recipient, transfer.amount)?;

    Ok(Response::new()
        .add_attribute("action", "receive_from_chain")
        .add_event(
            Event::new("ReceiveFromChain")
                .add_attribute("src_chain_id", src_chain_id.to_string())
                .add_attribute("to_address", recipient)
                .add_attribute("amount", transfer.amount)
                .add_attribute("nonce", nonce.to_string()),
        ))
}

/// Bridge mint, bypassing the cw20 minter gate.
fn mint_to(storage: &mut dyn Storage, recipient: &Addr, amount: Uint128) -> StdResult<()> {
    TOKEN_INFO.update(storage, |mut info| -> StdResult<_> {
        info.total_supply += amount;
        Ok(info)
    })?;
    BALANCES.update(storage, recipient, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default() + amount)
    })?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    nonblocking::handle_reply(deps, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
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
            amount,
            use_alt_fee_token,
            adapter_params,
        } => {
            let payload = Binary::from(TransferPayload { to_address, amount }.serialize()?);
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
        QueryMsg::Balance { address } => to_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_binary(&query_token_info(deps)?),
        QueryMsg::Allowance { owner, spender } => {
            to_binary(&query_allowance(deps, owner, spender)?)
        }
    }
}
