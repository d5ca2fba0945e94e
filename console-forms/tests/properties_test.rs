//! Behaviour of the console's forms as seen by a user filling them in.

use console_forms::prelude::*;
use console_forms::{Requiredness, build_payload, select_rule_set, validate};

fn snapshot(pairs: &[(&str, FieldValue)]) -> FormSnapshot {
    pairs
        .iter()
        .fold(FormSnapshot::new(), |snapshot, (field, value)| {
            snapshot.with(*field, value.clone())
        })
}

fn endpoints(items: &[&str]) -> FieldValue {
    FieldValue::list(items.iter().copied())
}

// =============================================================================
// Beacon node Ethereum 1 endpoints
// =============================================================================

#[test]
fn test_prysm_off_mainnet_requires_endpoints() {
    let base = [
        ("client", FieldValue::text("prysm")),
        ("network", FieldValue::text("pyrmont")),
    ];
    let options = OptionSets::new();

    let empty = snapshot(&base);
    let rules = select_rule_set::<Eth1EndpointsProfile>(&empty, &options);
    assert!(validate(&empty, &rules).contains("eth1Endpoints"));

    let blank = empty.clone().with("eth1Endpoints", endpoints(&["", " "]));
    assert!(validate(&blank, &rules).contains("eth1Endpoints"));

    let two = empty.with(
        "eth1Endpoints",
        endpoints(&["http://geth-1:8545", "http://besu-1:8545"]),
    );
    assert!(validate(&two, &rules).is_valid());
}

#[test]
fn test_nimbus_and_teku_take_exactly_one_endpoint() {
    for client in ["nimbus", "teku"] {
        let base = FormSnapshot::new()
            .with("client", client)
            .with("network", "mainnet");
        let rules = select_rule_set::<Eth1EndpointsProfile>(&base, &OptionSets::new());

        assert!(validate(&base, &rules).contains("eth1Endpoints"), "{client}: none");

        let one = base.clone().with("eth1Endpoints", endpoints(&["http://geth-1:8545"]));
        assert!(validate(&one, &rules).is_valid(), "{client}: one");

        let two = base.with(
            "eth1Endpoints",
            endpoints(&["http://geth-1:8545", "http://geth-2:8545"]),
        );
        assert!(validate(&two, &rules).contains("eth1Endpoints"), "{client}: two");
    }
}

#[test]
fn test_other_clients_accept_any_number_of_endpoints() {
    let cases = [("lighthouse", "pyrmont"), ("prysm", "mainnet"), ("lighthouse", "mainnet")];

    for (client, network) in cases {
        let base = FormSnapshot::new()
            .with("client", client)
            .with("network", network);
        let rules = select_rule_set::<Eth1EndpointsProfile>(&base, &OptionSets::new());

        assert!(validate(&base, &rules).is_valid());
        let many = base.with(
            "eth1Endpoints",
            endpoints(&["http://a:8545", "http://b:8545", "http://c:8545"]),
        );
        assert!(validate(&many, &rules).is_valid());
    }
}

#[test]
fn test_endpoints_must_be_urls() {
    let base = FormSnapshot::new()
        .with("client", "lighthouse")
        .with("network", "mainnet")
        .with("eth1Endpoints", endpoints(&["geth-1:8545"]));
    let rules = select_rule_set::<Eth1EndpointsProfile>(&base, &OptionSets::new());
    assert!(validate(&base, &rules).contains("eth1Endpoints"));
}

// =============================================================================
// Engine guarantees
// =============================================================================

#[test]
fn test_validate_is_idempotent() {
    let snapshot = FormSnapshot::new()
        .with("name", "bad name")
        .with("client", "prysm")
        .with("beaconEndpoints", endpoints(&["http://a:5052", "http://b:5052"]));
    let rules = select_rule_set::<CreateValidatorProfile>(&snapshot, &OptionSets::new());

    let first = validate(&snapshot, &rules);
    for _ in 0..3 {
        assert_eq!(validate(&snapshot, &rules), first);
    }
    assert!(first.contains("name"));
    assert!(first.contains("walletPasswordSecretName"));
    assert!(first.contains("beaconEndpoints"));
    assert!(first.contains("keystores"));
}

#[test]
fn test_hidden_fields_never_reach_payload() {
    let snapshot = FormSnapshot::new()
        .with("name", "validator-1")
        .with("client", "teku")
        .with("network", "pyrmont")
        .with("keystores", endpoints(&["keystore-1"]))
        .with("walletPasswordSecretName", "wallet-password")
        .with("beaconEndpoints", endpoints(&["http://beacon-1:5051"]))
        .with("graffiti", "hello");
    let rules = select_rule_set::<CreateValidatorProfile>(&snapshot, &OptionSets::new());

    assert_eq!(
        rules.requiredness("walletPasswordSecretName"),
        Some(Requiredness::Hidden)
    );
    assert!(validate(&snapshot, &rules).is_valid());

    let payload = build_payload(&snapshot, &rules);
    assert!(!payload.contains("walletPasswordSecretName"));
    assert!(!payload.contains("graffiti"));
    assert!(payload.contains("beaconEndpoints"));
}

#[test]
fn test_forbidden_field_entered_by_user_is_an_error() {
    use console_forms::{FieldRule, RuleSet};

    let rules = RuleSet::new("forbidden").rules([
        FieldRule::required("name"),
        FieldRule::forbidden("graphqlPort"),
    ]);

    let mut snapshot = FormSnapshot::new()
        .with("name", "node-1")
        .with("graphqlPort", 8547i64);
    assert!(validate(&snapshot, &rules).is_valid());
    assert!(!build_payload(&snapshot, &rules).contains("graphqlPort"));

    snapshot.set("graphqlPort", 8547i64);
    assert_eq!(
        validate(&snapshot, &rules).get("graphqlPort"),
        Some("graphqlPort is not allowed")
    );
}

#[test]
fn test_switching_client_clears_wallet_password() {
    let snapshot = FormSnapshot::new().with("client", "prysm");
    let mut session = FormSession::<CreateValidatorProfile>::new(snapshot, OptionSets::new());
    session.set("walletPasswordSecretName", "wallet-password");

    let cleared = session.set("client", "lighthouse");
    assert_eq!(cleared, vec!["walletPasswordSecretName"]);
    assert!(!session.snapshot().contains("walletPasswordSecretName"));

    session.set("client", "prysm");
    assert_eq!(
        session.validate().get("walletPasswordSecretName"),
        Some("Please select a wallet password secret")
    );
}

#[test]
fn test_unmatched_snapshot_falls_back_to_permissive_rules() {
    let snapshot = FormSnapshot::new().with("client", "erigon");
    let rules = select_rule_set::<Eth1EndpointsProfile>(&snapshot, &OptionSets::new());
    assert_eq!(rules.requiredness("eth1Endpoints"), Some(Requiredness::Optional));
}

// =============================================================================
// Ethereum node APIs
// =============================================================================

fn api_session(client: &str, miner: bool) -> FormSession<ApiSettingsProfile> {
    let snapshot = FormSnapshot::new()
        .with("client", client)
        .with("miner", miner)
        .with("rpc", false)
        .with("ws", false)
        .with("graphql", false);
    FormSession::new(snapshot, OptionSets::new())
}

#[test]
fn test_nethermind_has_no_graphql_rule() {
    let session = api_session("nethermind", false);
    assert!(!session.rule_set().offers("graphql"));
    assert!(!session.rule_set().offers("graphqlPort"));
    assert!(!session.payload().contains("graphql"));

    let session = api_session("geth", false);
    assert!(session.rule_set().offers("graphql"));
    assert_eq!(
        session.rule_set().requiredness("graphqlPort"),
        Some(Requiredness::Hidden)
    );
}

#[test]
fn test_geth_miner_waits_for_confirmation() {
    let mut session = api_session("geth", true);
    let mut flow = ApiToggleFlow::new();

    let outcome = flow.toggle(&mut session, Api::Rpc, true).unwrap();
    assert_eq!(outcome, ToggleOutcome::AwaitingConfirmation(Api::Rpc));
    assert_eq!(flow.state(), ConfirmationState::PendingConfirmation(Api::Rpc));
    assert!(!session.snapshot().flag("rpc"));
    assert!(session.snapshot().flag("miner"));

    assert_eq!(
        flow.toggle(&mut session, Api::Ws, true),
        Err(ConfirmationError::AlreadyPending(Api::Rpc))
    );

    flow.confirm(&mut session).unwrap();
    assert_eq!(flow.state(), ConfirmationState::Confirmed);
    assert!(session.snapshot().flag("rpc"));
    assert!(!session.snapshot().flag("miner"));
    assert!(session.rule_set().is_visible("rpcPort"));

    // Mining is off now, so the next toggle applies straight away.
    let outcome = flow.toggle(&mut session, Api::Ws, true).unwrap();
    assert!(matches!(outcome, ToggleOutcome::Applied(_)));
    assert_eq!(flow.state(), ConfirmationState::Idle);
}

#[test]
fn test_besu_enables_apis_while_mining() {
    let mut session = api_session("besu", true);
    let mut flow = ApiToggleFlow::new();

    let outcome = flow.toggle(&mut session, Api::Graphql, true).unwrap();
    assert_eq!(outcome, ToggleOutcome::Applied(Vec::new()));
    assert!(session.snapshot().flag("graphql"));
    assert!(session.snapshot().flag("miner"));
    assert_eq!(flow.state(), ConfirmationState::Idle);
}

#[test]
fn test_confirm_without_pending_is_refused() {
    let mut session = api_session("geth", false);
    let mut flow = ApiToggleFlow::new();

    assert_eq!(
        flow.confirm(&mut session),
        Err(ConfirmationError::NothingPending)
    );
}

#[test]
fn test_api_payload_after_confirmation() {
    let mut session = api_session("parity", true);
    let mut flow = ApiToggleFlow::new();

    flow.toggle(&mut session, Api::Rpc, true).unwrap();
    flow.confirm(&mut session).unwrap();
    session.set("rpcPort", "8545");
    session.set("rpcAPI", vec!["eth", "net"]);

    let payload = session.prepare().unwrap();
    assert_eq!(
        payload.into_value(),
        serde_json::json!({
            "miner": false,
            "rpc": true,
            "rpcPort": 8545,
            "rpcAPI": ["eth", "net"],
            "ws": false,
            "graphql": false
        })
    );
}

// =============================================================================
// Payload value shapes
// =============================================================================

#[test]
fn test_blank_numeric_fields_send_defaults() {
    let mut session = FormSession::<NetworkingProfile>::new(FormSnapshot::new(), OptionSets::new());
    session.set("p2pPort", "");
    session.set("retainedBlocks", " ");

    assert!(session.validate().is_valid());
    assert_eq!(
        session.payload().into_value(),
        serde_json::json!({
            "nodePrivateKeySecretName": "",
            "p2pPort": 30333,
            "pruning": true,
            "retainedBlocks": 256,
            "syncMode": "full"
        })
    );
}

#[test]
fn test_single_endpoint_is_sent_as_list() {
    let mut session = FormSession::<CreateValidatorProfile>::new(FormSnapshot::new(), OptionSets::new());
    session.set("name", "validator-1");
    session.set("client", "teku");
    session.set("network", "pyrmont");
    session.set("keystores", "keystore-1");
    session.set("beaconEndpoints", "http://beacon:5052");

    assert!(session.validate().is_valid());
    let payload = session.payload();
    assert_eq!(
        payload.get("beaconEndpoints"),
        Some(&serde_json::json!(["http://beacon:5052"]))
    );
    assert_eq!(payload.get("keystores"), Some(&serde_json::json!(["keystore-1"])));
}
