use cosmwasm_std::{
    entry_point, to_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult, Uint128, WasmMsg,
};

use cw2::set_contract_version;

use omni_core::endpoint::{
    EndpointConfigResponse, FeeEstimateResponse, OutboundNonceResponse, SendVersionResponse,
};

use crate::msg::{ExecuteMsg, InstantiateMsg, LastMessageResponse, QueryMsg, ReceiverExecuteMsg};
use crate::state::{FeeConfig, OutboundRecord, FEES, LAST_MESSAGE, OUTBOUND_NONCES, RECEIVER};

const CONTRACT_NAME: &str = "crates.io:mock-endpoint";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    FEES.save(
        deps.storage,
        &FeeConfig {
            native_fee: msg.native_fee,
            alt_fee: msg.alt_fee,
        },
    )?;
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::Send {
            dst_chain_id,
            dst_address,
            payload,
            ..
        } => {
            let nonce = OUTBOUND_NONCES
                .may_load(deps.storage, (dst_chain_id, &info.sender))?
                .unwrap_or_default()
                + 1;
            OUTBOUND_NONCES.save(deps.storage, (dst_chain_id, &info.sender), &nonce)?;
            LAST_MESSAGE.save(
                deps.storage,
                &OutboundRecord {
                    sender: info.sender,
                    dst_chain_id,
                    dst_address,
                    payload,
                },
            )?;
            Ok(Response::new()
                .add_attribute("action", "send")
                .add_attribute("nonce", nonce.to_string()))
        }
        ExecuteMsg::SetConfig { .. }
        | ExecuteMsg::SetSendVersion { .. }
        | ExecuteMsg::SetReceiveVersion { .. }
        | ExecuteMsg::ForceResumeReceive { .. } => Err(StdError::generic_err("executed!")),
        ExecuteMsg::SetFees {
            native_fee,
            alt_fee,
        } => {
            FEES.save(
                deps.storage,
                &FeeConfig {
                    native_fee,
                    alt_fee,
                },
            )?;
            Ok(Response::new().add_attribute("action", "set_fees"))
        }
        ExecuteMsg::SetReceiver { receiver } => {
            RECEIVER.save(deps.storage, &deps.api.addr_validate(&receiver)?)?;
            Ok(Response::new().add_attribute("action", "set_receiver"))
        }
        ExecuteMsg::Deliver {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => {
            let receiver = RECEIVER.load(deps.storage)?;
            Ok(Response::new()
                .add_attribute("action", "deliver")
                .add_message(CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr: receiver.to_string(),
                    msg: to_binary(&ReceiverExecuteMsg::LzReceive {
                        src_chain_id,
                        src_address,
                        nonce,
                        payload,
                    })?,
                    funds: vec![],
                })))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::EstimateFees {
            pay_in_alt_token, ..
        } => {
            let fees = FEES.load(deps.storage)?;
            let native_fee = if pay_in_alt_token {
                Uint128::zero()
            } else {
                fees.native_fee
            };
            to_binary(&FeeEstimateResponse {
                native_fee,
                alt_fee: fees.alt_fee,
            })
        }
        QueryMsg::GetOutboundNonce { chain_id, address } => {
            let address = deps.api.addr_validate(&address)?;
            let nonce = OUTBOUND_NONCES
                .may_load(deps.storage, (chain_id, &address))?
                .unwrap_or_default();
            to_binary(&OutboundNonceResponse { nonce })
        }
        QueryMsg::GetSendVersion { .. } => to_binary(&SendVersionResponse { version: 1 }),
        QueryMsg::GetConfig { .. } => to_binary(&EndpointConfigResponse {
            config: Binary::default(),
        }),
        QueryMsg::LastMessage {} => to_binary(&LastMessageResponse {
            message: LAST_MESSAGE.may_load(deps.storage)?,
        }),
    }
}
