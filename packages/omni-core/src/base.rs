//! Trust registry and outbound messaging, shared by every application built
//! on the endpoint. Contracts embed these handlers in their execute/query
//! dispatch and keep their own domain logic on top.

use cosmwasm_std::{
    to_binary, Addr, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, QueryRequest,
    Response, StdResult, Uint128, WasmMsg, WasmQuery,
};

use crate::endpoint::{
    EndpointConfigResponse, EndpointExecuteMsg, EndpointQueryMsg, FeeEstimateResponse,
    OutboundNonceResponse, SendVersionResponse,
};
use crate::error::ContractError;
use crate::msg::TrustedRemoteResponse;
use crate::role::{assert_role, grant_role, DEFAULT_ADMIN_ROLE};
use crate::state::{ConfigInfo, CONFIG, TRUSTED_REMOTES};

/// Save endpoint config and make the instantiator the admin.
pub fn instantiate_base(
    deps: DepsMut,
    info: &MessageInfo,
    endpoint: String,
    fee_denom: String,
) -> StdResult<()> {
    let cfg = ConfigInfo {
        endpoint: deps.api.addr_validate(&endpoint)?,
        fee_denom,
    };
    CONFIG.save(deps.storage, &cfg)?;
    grant_role(deps.storage, DEFAULT_ADMIN_ROLE, &info.sender)
}

pub fn set_trusted_remote(
    deps: DepsMut,
    info: &MessageInfo,
    src_chain_id: u16,
    address: Binary,
) -> StdResult<Response> {
    assert_role(deps.storage, DEFAULT_ADMIN_ROLE, &info.sender)?;
    TRUSTED_REMOTES.save(deps.storage, src_chain_id, &address.to_vec())?;
    Ok(Response::new().add_event(
        Event::new("SetTrustedRemote")
            .add_attribute("src_chain_id", src_chain_id.to_string())
            .add_attribute("src_address", hex::encode(address.as_slice())),
    ))
}

pub fn query_trusted_remote(deps: Deps, src_chain_id: u16) -> StdResult<TrustedRemoteResponse> {
    let address = TRUSTED_REMOTES
        .may_load(deps.storage, src_chain_id)?
        .unwrap_or_default();
    Ok(TrustedRemoteResponse {
        address: Binary::from(address),
    })
}

pub fn is_trusted_remote(deps: Deps, src_chain_id: u16, address: &[u8]) -> StdResult<bool> {
    Ok(match TRUSTED_REMOTES.may_load(deps.storage, src_chain_id)? {
        Some(trusted) => !trusted.is_empty() && trusted == address,
        None => false,
    })
}

/// Gate for inbound deliveries. The caller must be the endpoint and the
/// claimed source must match the trusted remote for that chain exactly.
pub fn authenticate(
    deps: Deps,
    info: &MessageInfo,
    src_chain_id: u16,
    src_address: &[u8],
) -> StdResult<()> {
    let cfg = CONFIG.load(deps.storage)?;
    if info.sender != cfg.endpoint {
        return ContractError::UnauthorizedCaller.std_err();
    }
    if src_address.is_empty() {
        return ContractError::IllegalAddress.std_err();
    }
    if !is_trusted_remote(deps, src_chain_id, src_address)? {
        return ContractError::UntrustedSource.std_err();
    }
    Ok(())
}

fn endpoint_addr(deps: Deps) -> StdResult<Addr> {
    Ok(CONFIG.load(deps.storage)?.endpoint)
}

/// Build the endpoint Send for an outbound payload. Rejects untrusted
/// destinations and fee budgets below the endpoint's own quote; all attached
/// funds are forwarded so the endpoint can refund any excess.
pub fn lz_send(
    deps: Deps,
    env: &Env,
    info: &MessageInfo,
    dst_chain_id: u16,
    payload: Binary,
    refund_address: String,
    fee_token: String,
    adapter_params: Binary,
) -> StdResult<CosmosMsg> {
    let cfg = CONFIG.load(deps.storage)?;
    let dst_address = match TRUSTED_REMOTES.may_load(deps.storage, dst_chain_id)? {
        Some(trusted) if !trusted.is_empty() => trusted,
        _ => return ContractError::ChannelNotTrusted.std_err(),
    };

    // quote in the fee mode the caller picked; an alt-token quote carries a
    // different native component than a native one
    let quote = estimate_fees(
        deps,
        env,
        dst_chain_id,
        payload.clone(),
        !fee_token.is_empty(),
        adapter_params.clone(),
    )?;
    if coins_of(&info.funds, &cfg.fee_denom) < quote.native_fee {
        return ContractError::InsufficientValue.std_err();
    }

    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: cfg.endpoint.to_string(),
        msg: to_binary(&EndpointExecuteMsg::Send {
            dst_chain_id,
            dst_address: Binary::from(dst_address),
            payload,
            refund_address,
            fee_token,
            adapter_params,
        })?,
        funds: info.funds.clone(),
    }))
}

pub fn estimate_fees(
    deps: Deps,
    env: &Env,
    dst_chain_id: u16,
    payload: Binary,
    pay_in_alt_token: bool,
    adapter_params: Binary,
) -> StdResult<FeeEstimateResponse> {
    deps.querier
        .query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: endpoint_addr(deps)?.to_string(),
            msg: to_binary(&EndpointQueryMsg::EstimateFees {
                dst_chain_id,
                user_application: env.contract.address.to_string(),
                payload,
                pay_in_alt_token,
                adapter_params,
            })?,
        }))
}

/// Nonce the endpoint will assign to the Send we are about to emit. Our
/// message to the endpoint only executes after the current call returns, so
/// the current outbound nonce plus one is the one our payload gets.
pub fn next_outbound_nonce(deps: Deps, env: &Env, dst_chain_id: u16) -> StdResult<u64> {
    let resp: OutboundNonceResponse =
        deps.querier
            .query(&QueryRequest::Wasm(WasmQuery::Smart {
                contract_addr: endpoint_addr(deps)?.to_string(),
                msg: to_binary(&EndpointQueryMsg::GetOutboundNonce {
                    chain_id: dst_chain_id,
                    address: env.contract.address.to_string(),
                })?,
            }))?;
    Ok(resp.nonce + 1)
}

pub fn query_send_version(deps: Deps, env: &Env) -> StdResult<SendVersionResponse> {
    deps.querier
        .query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: endpoint_addr(deps)?.to_string(),
            msg: to_binary(&EndpointQueryMsg::GetSendVersion {
                user_application: env.contract.address.to_string(),
            })?,
        }))
}

/// Version 0 means "whatever send version is currently active".
pub fn query_endpoint_config(
    deps: Deps,
    env: &Env,
    version: u16,
    chain_id: u16,
    config_type: u32,
) -> StdResult<EndpointConfigResponse> {
    let version = if version == 0 {
        query_send_version(deps, env)?.version
    } else {
        version
    };
    deps.querier
        .query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: endpoint_addr(deps)?.to_string(),
            msg: to_binary(&EndpointQueryMsg::GetConfig {
                version,
                chain_id,
                user_application: env.contract.address.to_string(),
                config_type,
            })?,
        }))
}

/// Admin-only passthrough to the endpoint's configuration surface.
pub fn endpoint_admin_execute(
    deps: DepsMut,
    info: &MessageInfo,
    msg: EndpointExecuteMsg,
) -> StdResult<Response> {
    assert_role(deps.storage, DEFAULT_ADMIN_ROLE, &info.sender)?;
    let endpoint = endpoint_addr(deps.as_ref())?;
    Ok(Response::new().add_message(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: endpoint.to_string(),
        msg: to_binary(&msg)?,
        funds: vec![],
    })))
}

pub fn coins_of(funds: &[Coin], denom: &str) -> Uint128 {
    funds
        .iter()
        .filter(|c| c.denom == denom)
        .map(|c| c.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{coins, from_binary, ContractResult, SystemResult};

    const ENDPOINT: &str = "endpoint";

    fn setup(deps: DepsMut) {
        let info = mock_info("admin", &[]);
        instantiate_base(deps, &info, ENDPOINT.to_string(), "uluna".to_string()).unwrap();
    }

    fn mock_endpoint_querier(deps: &mut cosmwasm_std::OwnedDeps<
        cosmwasm_std::MemoryStorage,
        cosmwasm_std::testing::MockApi,
        cosmwasm_std::testing::MockQuerier,
    >) {
        deps.querier.update_wasm(|query| match query {
            WasmQuery::Smart { contract_addr, msg } if contract_addr == ENDPOINT => {
                let msg: EndpointQueryMsg = cosmwasm_std::from_binary(msg).unwrap();
                let result = match msg {
                    EndpointQueryMsg::EstimateFees { pay_in_alt_token, .. } => {
                        to_binary(&FeeEstimateResponse {
                            native_fee: if pay_in_alt_token {
                                Uint128::zero()
                            } else {
                                Uint128::new(10)
                            },
                            alt_fee: Uint128::new(20),
                        })
                    }
                    EndpointQueryMsg::GetOutboundNonce { .. } => {
                        to_binary(&OutboundNonceResponse { nonce: 97 })
                    }
                    EndpointQueryMsg::GetSendVersion { .. } => {
                        to_binary(&SendVersionResponse { version: 2 })
                    }
                    EndpointQueryMsg::GetConfig { .. } => to_binary(&EndpointConfigResponse {
                        config: Binary::from(b"cfg".to_vec()),
                    }),
                };
                SystemResult::Ok(ContractResult::Ok(result.unwrap()))
            }
            _ => panic!("unexpected query"),
        });
    }

    #[test]
    fn trusted_remote_round_trip() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let resp = query_trusted_remote(deps.as_ref(), 5).unwrap();
        assert!(resp.address.is_empty());

        let admin = mock_info("admin", &[]);
        let remote = Binary::from(vec![0xaa, 0xbb]);
        let resp = set_trusted_remote(deps.as_mut(), &admin, 5, remote.clone()).unwrap();
        assert_eq!(resp.events[0].ty, "SetTrustedRemote");

        assert_eq!(query_trusted_remote(deps.as_ref(), 5).unwrap().address, remote);
        assert!(is_trusted_remote(deps.as_ref(), 5, &[0xaa, 0xbb]).unwrap());
        assert!(!is_trusted_remote(deps.as_ref(), 5, &[0xaa]).unwrap());
        assert!(!is_trusted_remote(deps.as_ref(), 6, &[0xaa, 0xbb]).unwrap());
    }

    #[test]
    fn set_trusted_remote_requires_admin() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let other = mock_info("other", &[]);
        let err = set_trusted_remote(deps.as_mut(), &other, 5, Binary::from(vec![1])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: AccessControl: account other is missing role default_admin"
        );
    }

    #[test]
    fn authenticate_checks_caller_and_source() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        let admin = mock_info("admin", &[]);
        set_trusted_remote(deps.as_mut(), &admin, 5, Binary::from(vec![0xaa])).unwrap();

        let from_endpoint = mock_info(ENDPOINT, &[]);
        authenticate(deps.as_ref(), &from_endpoint, 5, &[0xaa]).unwrap();

        let err =
            authenticate(deps.as_ref(), &mock_info("someone", &[]), 5, &[0xaa]).unwrap_err();
        assert_eq!(err.to_string(), "Generic error: illegal access");

        let err = authenticate(deps.as_ref(), &from_endpoint, 5, &[]).unwrap_err();
        assert_eq!(err.to_string(), "Generic error: illegal address");

        let err = authenticate(deps.as_ref(), &from_endpoint, 5, &[0xbb]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: invalid source sending contract"
        );

        let err = authenticate(deps.as_ref(), &from_endpoint, 6, &[0xaa]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: invalid source sending contract"
        );
    }

    #[test]
    fn lz_send_requires_trust_and_fee() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        mock_endpoint_querier(&mut deps);
        let env = mock_env();

        let payload = Binary::from(vec![1, 2, 3]);
        let sender = mock_info("user", &coins(10, "uluna"));
        let err = lz_send(
            deps.as_ref(),
            &env,
            &sender,
            5,
            payload.clone(),
            "user".to_string(),
            String::new(),
            Binary::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: destination chain is not a trusted source"
        );

        let admin = mock_info("admin", &[]);
        set_trusted_remote(deps.as_mut(), &admin, 5, Binary::from(vec![0xaa])).unwrap();

        let broke = mock_info("user", &coins(9, "uluna"));
        let err = lz_send(
            deps.as_ref(),
            &env,
            &broke,
            5,
            payload.clone(),
            "user".to_string(),
            String::new(),
            Binary::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: must send enough value to cover the message fee"
        );

        let msg = lz_send(
            deps.as_ref(),
            &env,
            &sender,
            5,
            payload.clone(),
            "user".to_string(),
            String::new(),
            Binary::default(),
        )
        .unwrap();
        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, ENDPOINT);
                assert_eq!(funds, coins(10, "uluna"));
                let sent: EndpointExecuteMsg = from_binary(&msg).unwrap();
                match sent {
                    EndpointExecuteMsg::Send {
                        dst_chain_id,
                        dst_address,
                        payload: sent_payload,
                        ..
                    } => {
                        assert_eq!(dst_chain_id, 5);
                        assert_eq!(dst_address, Binary::from(vec![0xaa]));
                        assert_eq!(sent_payload, payload);
                    }
                    other => panic!("unexpected message {other:?}"),
                }
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn lz_send_quotes_in_the_requested_fee_mode() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        mock_endpoint_querier(&mut deps);
        let env = mock_env();

        let admin = mock_info("admin", &[]);
        set_trusted_remote(deps.as_mut(), &admin, 5, Binary::from(vec![0xaa])).unwrap();

        // paying in the alt token, the native component of the quote is zero,
        // so a send with no native funds attached clears the fee check
        let sender = mock_info("user", &[]);
        let msg = lz_send(
            deps.as_ref(),
            &env,
            &sender,
            5,
            Binary::from(vec![1, 2, 3]),
            "user".to_string(),
            "alt_token".to_string(),
            Binary::default(),
        )
        .unwrap();
        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => {
                let sent: EndpointExecuteMsg = from_binary(&msg).unwrap();
                match sent {
                    EndpointExecuteMsg::Send { fee_token, .. } => {
                        assert_eq!(fee_token, "alt_token")
                    }
                    other => panic!("unexpected message {other:?}"),
                }
            }
            other => panic!("unexpected message {other:?}"),
        }

        // the native quote still applies when no fee token is picked
        let err = lz_send(
            deps.as_ref(),
            &env,
            &sender,
            5,
            Binary::from(vec![1, 2, 3]),
            "user".to_string(),
            String::new(),
            Binary::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: must send enough value to cover the message fee"
        );
    }

    #[test]
    fn next_outbound_nonce_is_current_plus_one() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        mock_endpoint_querier(&mut deps);
        assert_eq!(next_outbound_nonce(deps.as_ref(), &mock_env(), 5).unwrap(), 98);
    }

    #[test]
    fn config_query_resolves_version_zero() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        mock_endpoint_querier(&mut deps);
        let env = mock_env();

        assert_eq!(query_send_version(deps.as_ref(), &env).unwrap().version, 2);
        let resp = query_endpoint_config(deps.as_ref(), &env, 0, 5, 1).unwrap();
        assert_eq!(resp.config, Binary::from(b"cfg".to_vec()));
    }

    #[test]
    fn endpoint_admin_execute_is_admin_only() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let msg = EndpointExecuteMsg::SetSendVersion { version: 3 };
        let err =
            endpoint_admin_execute(deps.as_mut(), &mock_info("other", &[]), msg.clone())
                .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generic error: AccessControl: account other is missing role default_admin"
        );

        let resp =
            endpoint_admin_execute(deps.as_mut(), &mock_info("admin", &[]), msg).unwrap();
        assert_eq!(resp.messages.len(), 1);
    }
}
