//! Non-blocking inbound dispatch.
//!
//! Deliveries are not executed inline. The receive entrypoint authenticates
//! the source, records the message as pending and re-enters the contract
//! through a submessage with reply-on-always. A handler failure then rolls
//! back only the submessage's state while the reply persists a failure record
//! keyed by (source chain, source address, nonce), so one bad payload never
//! wedges the channel. An admin can later replay the exact payload; a retry
//! that fails again aborts wholesale and the record survives untouched.

use cosmwasm_std::{
    Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response, StdError,
    StdResult, SubMsg, SubMsgResult, WasmMsg,
};

use crate::base::authenticate;
use crate::byte_utils::keccak256;
use crate::error::ContractError;
use crate::msg::FailedMessageResponse;
use crate::role::{assert_role, DEFAULT_ADMIN_ROLE};
use crate::state::{failed_message_key, PendingReceipt, FAILED_MESSAGES, PENDING_RECEIPT};

pub const RECEIVE_REPLY_ID: u64 = 1;

/// Authenticate an inbound delivery and dispatch it to the application's own
/// handler through a catchable submessage. `dispatch` is the serialized
/// self-execute message the reply-protected handler lives behind.
pub fn receive(
    deps: DepsMut,
    env: &Env,
    info: &MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
    dispatch: Binary,
) -> StdResult<Response> {
    authenticate(deps.as_ref(), info, src_chain_id, src_address.as_slice())?;

    PENDING_RECEIPT.save(
        deps.storage,
        &PendingReceipt {
            src_chain_id,
            src_address,
            nonce,
            payload,
        },
    )?;

    Ok(Response::new().add_submessage(SubMsg::reply_always(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: env.contract.address.to_string(),
            msg: dispatch,
            funds: vec![],
        }),
        RECEIVE_REPLY_ID,
    )))
}

/// The dispatch target must only ever be reachable from the contract itself.
pub fn assert_internal(env: &Env, info: &MessageInfo) -> StdResult<()> {
    if info.sender != env.contract.address {
        return ContractError::NotDispatcher.std_err();
    }
    Ok(())
}

/// Settle the pending receipt. On handler success emit Executed; on failure
/// persist the payload digest and emit MessageFailed with the reason.
pub fn handle_reply(deps: DepsMut, msg: Reply) -> StdResult<Response> {
    if msg.id != RECEIVE_REPLY_ID {
        return Err(StdError::generic_err("unexpected reply id"));
    }
    let receipt = PENDING_RECEIPT.load(deps.storage)?;
    PENDING_RECEIPT.remove(deps.storage);

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new().add_event(executed_event(
            receipt.src_chain_id,
            &receipt.src_address,
            receipt.nonce,
            &receipt.payload,
        ))),
        SubMsgResult::Err(reason) => {
            let key = failed_message_key(
                receipt.src_chain_id,
                receipt.src_address.as_slice(),
                receipt.nonce,
            );
            let digest = keccak256(receipt.payload.as_slice());
            FAILED_MESSAGES.save(deps.storage, &key, &digest.to_vec())?;
            Ok(Response::new().add_event(
                Event::new("MessageFailed")
                    .add_attribute("src_chain_id", receipt.src_chain_id.to_string())
                    .add_attribute("src_address", hex::encode(receipt.src_address.as_slice()))
                    .add_attribute("nonce", receipt.nonce.to_string())
                    .add_attribute("payload", hex::encode(receipt.payload.as_slice()))
                    .add_attribute("reason", reason),
            ))
        }
    }
}

/// Replay a failed message through the application handler. Runs in-process
/// so a failing handler aborts the whole call and the record is kept.
pub fn retry_message<F>(
    deps: DepsMut,
    info: &MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
    handler: F,
) -> StdResult<Response>
where
    F: FnOnce(DepsMut, u16, Binary, u64, Binary) -> StdResult<Response>,
{
    assert_role(deps.storage, DEFAULT_ADMIN_ROLE, &info.sender)?;

    let key = failed_message_key(src_chain_id, src_address.as_slice(), nonce);
    let stored = match FAILED_MESSAGES.may_load(deps.storage, &key)? {
        Some(digest) if !digest.iter().all(|b| *b == 0) => digest,
        _ => return ContractError::NoStoredMessage.std_err(),
    };
    if stored != keccak256(payload.as_slice()) {
        return ContractError::PayloadMismatch.std_err();
    }
    FAILED_MESSAGES.remove(deps.storage, &key);

    let resp = handler(deps, src_chain_id, src_address.clone(), nonce, payload.clone())?;
    Ok(resp.add_event(executed_event(src_chain_id, &src_address, nonce, &payload)))
}

fn executed_event(src_chain_id: u16, src_address: &Binary, nonce: u64, payload: &Binary) -> Event {
    Event::new("Executed")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_address", hex::encode(src_address.as_slice()))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload", hex::encode(payload.as_slice()))
}

/// Digest of the stored failure, all zeroes when the slot is clear.
pub fn query_failed_message(
    deps: Deps,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
) -> StdResult<FailedMessageResponse> {
    let key = failed_message_key(src_chain_id, src_address.as_slice(), nonce);
    let digest = FAILED_MESSAGES
        .may_load(deps.storage, &key)?
        .unwrap_or_else(|| vec![0u8; 32]);
    Ok(FailedMessageResponse {
        payload_hash: Binary::from(digest),
    })
}
