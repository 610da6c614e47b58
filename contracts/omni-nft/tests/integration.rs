use cosmwasm_std::{coins, Addr, Binary, Uint128};
use cw721::OwnerOfResponse;
use cw_multi_test::{App, AppBuilder, ContractWrapper, Executor};

use mock_endpoint::msg::{
    ExecuteMsg as EndpointMsg, InstantiateMsg as EndpointInstantiate, QueryMsg as EndpointQuery,
};
use omni_core::endpoint::OutboundNonceResponse;
use omni_core::msg::FailedMessageResponse;
use omni_core::payload::TransferPayload;
use omni_nft::contract;
use omni_nft::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};

const ADMIN: &str = "admin";
const USER: &str = "user";
const FEE_DENOM: &str = "uluna";
const REMOTE_CHAIN: u16 = 1;

fn remote_address() -> Binary {
    Binary::from(vec![0xaa, 0xbb])
}

fn setup() -> (App, Addr, Addr) {
    let mut app = AppBuilder::new().build(|router, _api, storage| {
        router
            .bank
            .init_balance(storage, &Addr::unchecked(USER), coins(1_000, FEE_DENOM))
            .unwrap();
    });

    let endpoint_code = app.store_code(Box::new(ContractWrapper::new(
        mock_endpoint::contract::execute,
        mock_endpoint::contract::instantiate,
        mock_endpoint::contract::query,
    )));
    let endpoint = app
        .instantiate_contract(
            endpoint_code,
            Addr::unchecked(ADMIN),
            &EndpointInstantiate {
                native_fee: Uint128::new(10),
                alt_fee: Uint128::new(20),
            },
            &[],
            "endpoint",
            None,
        )
        .unwrap();

    let nft_code = app.store_code(Box::new(
        ContractWrapper::new(contract::execute, contract::instantiate, contract::query)
            .with_reply(contract::reply),
    ));
    let nft = app
        .instantiate_contract(
            nft_code,
            Addr::unchecked(ADMIN),
            &InstantiateMsg {
                name: "Omni Collection".to_string(),
                symbol: "ONFT".to_string(),
                endpoint: endpoint.to_string(),
                fee_denom: FEE_DENOM.to_string(),
            },
            &[],
            "omni-nft",
            None,
        )
        .unwrap();

    app.execute_contract(
        Addr::unchecked(ADMIN),
        endpoint.clone(),
        &EndpointMsg::SetReceiver {
            receiver: nft.to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        Addr::unchecked(ADMIN),
        nft.clone(),
        &ExecuteMsg::SetTrustedRemote {
            src_chain_id: REMOTE_CHAIN,
            src_address: remote_address(),
        },
        &[],
    )
    .unwrap();

    (app, endpoint, nft)
}

fn owner_of(app: &App, nft: &Addr, token_id: &str) -> Option<String> {
    app.wrap()
        .query_wasm_smart::<OwnerOfResponse>(
            nft,
            &QueryMsg::OwnerOf {
                token_id: token_id.to_string(),
                include_expired: None,
            },
        )
        .map(|r| r.owner)
        .ok()
}

fn failed_digest(app: &App, nft: &Addr, nonce: u64) -> Vec<u8> {
    let resp: FailedMessageResponse = app
        .wrap()
        .query_wasm_smart(
            nft,
            &QueryMsg::FailedMessage {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_address(),
                nonce,
            },
        )
        .unwrap();
    resp.payload_hash.to_vec()
}

fn token_payload(recipient: &[u8], token_id: u128) -> Binary {
    Binary::from(
        TransferPayload {
            to_address: Binary::from(recipient.to_vec()),
            amount: Uint128::new(token_id),
        }
        .serialize()
        .unwrap(),
    )
}

fn deliver(
    app: &mut App,
    endpoint: &Addr,
    nonce: u64,
    payload: Binary,
) -> cw_multi_test::AppResponse {
    app.execute_contract(
        Addr::unchecked(ADMIN),
        endpoint.clone(),
        &EndpointMsg::Deliver {
            src_chain_id: REMOTE_CHAIN,
            src_address: remote_address(),
            nonce,
            payload,
        },
        &[],
    )
    .unwrap()
}

fn mint(app: &mut App, nft: &Addr, token_id: &str, owner: &str) {
    app.execute_contract(
        Addr::unchecked(ADMIN),
        nft.clone(),
        &ExecuteMsg::Mint {
            token_id: token_id.to_string(),
            owner: owner.to_string(),
            token_uri: None,
        },
        &[],
    )
    .unwrap();
}

#[test]
fn send_burns_token_and_assigns_nonce() {
    let (mut app, endpoint, nft) = setup();
    mint(&mut app, &nft, "7", USER);

    let resp = app
        .execute_contract(
            Addr::unchecked(USER),
            nft.clone(),
            &ExecuteMsg::Send {
                dst_chain_id: REMOTE_CHAIN,
                to_address: Binary::from(b"remote_recipient".to_vec()),
                token_id: Uint128::new(7),
                refund_address: USER.to_string(),
                fee_token: String::new(),
                adapter_params: Binary::default(),
            },
            &coins(100, FEE_DENOM),
        )
        .unwrap();

    assert_eq!(owner_of(&app, &nft, "7"), None);
    let event = resp
        .events
        .iter()
        .find(|e| e.ty == "wasm-SendToChain")
        .expect("SendToChain event");
    let nonce = &event.attributes.iter().find(|a| a.key == "nonce").unwrap().value;
    assert_eq!(nonce, "1");

    let recorded: OutboundNonceResponse = app
        .wrap()
        .query_wasm_smart(
            &endpoint,
            &EndpointQuery::GetOutboundNonce {
                chain_id: REMOTE_CHAIN,
                address: nft.to_string(),
            },
        )
        .unwrap();
    assert_eq!(recorded.nonce, 1);
}

#[test]
fn duplicate_delivery_fails_then_retries_after_burn() {
    let (mut app, endpoint, nft) = setup();

    // first delivery mints the token
    let payload = token_payload(b"user", 7);
    let resp = deliver(&mut app, &endpoint, 1, payload.clone());
    assert!(resp.events.iter().any(|e| e.ty == "wasm-ReceiveFromChain"));
    assert_eq!(owner_of(&app, &nft, "7"), Some(USER.to_string()));

    // second delivery of the same id lands in the failure table
    let resp = deliver(&mut app, &endpoint, 2, payload.clone());
    let event = resp
        .events
        .iter()
        .find(|e| e.ty == "wasm-MessageFailed")
        .expect("MessageFailed event");
    let reason = &event.attributes.iter().find(|a| a.key == "reason").unwrap().value;
    assert!(reason.contains("token already minted"));
    let digest = failed_digest(&app, &nft, 2);
    assert_ne!(digest, vec![0u8; 32]);

    // still owned, the failed dispatch was rolled back
    assert_eq!(owner_of(&app, &nft, "7"), Some(USER.to_string()));

    // retry while the token still exists fails again and keeps the record
    let err = app
        .execute_contract(
            Addr::unchecked(ADMIN),
            nft.clone(),
            &ExecuteMsg::RetryMessage {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_address(),
                nonce: 2,
                payload: payload.clone(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("token already minted"));
    assert_eq!(failed_digest(&app, &nft, 2), digest);

    // burn the local copy by bridging it out, then the retry can mint again
    app.execute_contract(
        Addr::unchecked(USER),
        nft.clone(),
        &ExecuteMsg::Send {
            dst_chain_id: REMOTE_CHAIN,
            to_address: Binary::from(b"remote_recipient".to_vec()),
            token_id: Uint128::new(7),
            refund_address: USER.to_string(),
            fee_token: String::new(),
            adapter_params: Binary::default(),
        },
        &coins(100, FEE_DENOM),
    )
    .unwrap();
    assert_eq!(owner_of(&app, &nft, "7"), None);

    let resp = app
        .execute_contract(
            Addr::unchecked(ADMIN),
            nft.clone(),
            &ExecuteMsg::RetryMessage {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_address(),
                nonce: 2,
                payload,
            },
            &[],
        )
        .unwrap();
    assert!(resp.events.iter().any(|e| e.ty == "wasm-Executed"));
    assert_eq!(owner_of(&app, &nft, "7"), Some(USER.to_string()));
    assert_eq!(failed_digest(&app, &nft, 2), vec![0u8; 32]);

    // and the record is spent
    let err = app
        .execute_contract(
            Addr::unchecked(ADMIN),
            nft,
            &ExecuteMsg::RetryMessage {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_address(),
                nonce: 2,
                payload: token_payload(b"user", 7),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("no stored message"));
}

#[test]
fn direct_receive_calls_are_rejected() {
    let (mut app, _endpoint, nft) = setup();

    let err = app
        .execute_contract(
            Addr::unchecked(USER),
            nft.clone(),
            &ExecuteMsg::LzReceive {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_address(),
                nonce: 1,
                payload: token_payload(b"user", 7),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("illegal access"));

    let err = app
        .execute_contract(
            Addr::unchecked(USER),
            nft,
            &ExecuteMsg::NonblockingReceive {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_address(),
                nonce: 1,
                payload: token_payload(b"user", 7),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("caller must be the internal dispatcher"));
}
