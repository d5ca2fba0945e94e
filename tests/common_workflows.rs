//! Integration tests for common console workflows.
//!
//! These tests walk through forms the way the console uses them, from first
//! keystroke to the navigation that follows a successful request.

use async_trait::async_trait;
use chain_console::prelude::*;
use chain_console::{Deployment, GatewayError, select_rule_set, validate};
use std::sync::Mutex;

// =============================================================================
// Test gateway
// =============================================================================

#[derive(Default)]
struct InMemoryGateway {
    deployments: Mutex<Vec<(ResourceKind, Deployment)>>,
}

impl InMemoryGateway {
    fn names(&self, kind: ResourceKind) -> Vec<String> {
        self.deployments
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, d)| d.name.clone())
            .collect()
    }
}

#[async_trait]
impl ResourceGateway for InMemoryGateway {
    async fn create(&self, kind: ResourceKind, payload: &Payload) -> Result<Deployment, GatewayError> {
        let mut fields = payload.as_map().clone();
        let name = fields
            .remove("name")
            .and_then(|value| value.as_str().map(str::to_string))
            .ok_or_else(|| GatewayError::Rejected {
                status: 400,
                message: "name is required".to_string(),
            })?;

        let mut deployments = self.deployments.lock().unwrap();
        if deployments.iter().any(|(k, d)| *k == kind && d.name == name) {
            return Err(GatewayError::Rejected {
                status: 400,
                message: format!("{} by name {} already exist", kind, name),
            });
        }

        let deployment = Deployment { name, fields };
        deployments.push((kind, deployment.clone()));
        Ok(deployment)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        name: &str,
        payload: &Payload,
    ) -> Result<Deployment, GatewayError> {
        let mut deployments = self.deployments.lock().unwrap();
        let (_, deployment) = deployments
            .iter_mut()
            .find(|(k, d)| *k == kind && d.name == name)
            .ok_or_else(|| GatewayError::Rejected {
                status: 404,
                message: format!("{} by name {} doesn't exist", kind, name),
            })?;

        for (field, value) in payload.as_map() {
            deployment.fields.insert(field.clone(), value.clone());
        }
        Ok(deployment.clone())
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> Result<(), GatewayError> {
        let mut deployments = self.deployments.lock().unwrap();
        let before = deployments.len();
        deployments.retain(|(k, d)| !(*k == kind && d.name == name));
        if deployments.len() == before {
            return Err(GatewayError::Rejected {
                status: 404,
                message: format!("{} by name {} doesn't exist", kind, name),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Ethereum node lifecycle
// =============================================================================

#[tokio::test]
async fn test_ethereum_node_create_configure_delete() {
    let gateway = InMemoryGateway::default();

    // Create
    let mut create = FormSession::<CreateNodeProfile>::new(FormSnapshot::new(), OptionSets::new());
    create.set("name", "geth-1");
    create.set("client", "geth");
    create.set("network", "goerli");
    let created = create
        .submit_create(&gateway, ResourceKind::EthereumNode)
        .await
        .unwrap();
    assert_eq!(created.navigation.path, "/deployments/ethereum/nodes");
    assert_eq!(gateway.names(ResourceKind::EthereumNode), vec!["geth-1"]);

    // Enable JSON-RPC on a mining node
    let snapshot = FormSnapshot::new()
        .with("client", "geth")
        .with("miner", true)
        .with("rpc", false)
        .with("ws", false)
        .with("graphql", false);
    let mut api = FormSession::<ApiSettingsProfile>::new(snapshot, OptionSets::new());
    let mut flow = ApiToggleFlow::new();

    assert_eq!(
        flow.toggle(&mut api, Api::Rpc, true).unwrap(),
        ToggleOutcome::AwaitingConfirmation(Api::Rpc)
    );
    flow.confirm(&mut api).unwrap();
    api.set("rpcPort", 8545i64);
    api.set("rpcAPI", vec!["eth", "net", "web3"]);

    let updated = api
        .submit_update(&gateway, ResourceKind::EthereumNode, "geth-1")
        .await
        .unwrap();
    api.commit();
    assert_eq!(updated.deployment.get("miner"), Some(&serde_json::json!(false)));
    assert_eq!(updated.deployment.get("rpcPort"), Some(&serde_json::json!(8545)));
    assert!(!api.is_dirty());

    // Delete
    let navigation = DeleteAction::new(ResourceKind::EthereumNode, "geth-1")
        .delete(&gateway, "geth-1")
        .await
        .unwrap();
    assert_eq!(
        navigation.notification.unwrap().title,
        "Ethereum Node has been deleted"
    );
    assert!(gateway.names(ResourceKind::EthereumNode).is_empty());
}

#[tokio::test]
async fn test_duplicate_name_is_reported_and_form_stays_usable() {
    let gateway = InMemoryGateway::default();

    let mut form = FormSession::<CreatePeerProfile>::new(FormSnapshot::new(), OptionSets::new());
    form.set("name", "peer-1");
    form.submit_create(&gateway, ResourceKind::IpfsPeer).await.unwrap();

    let error = form
        .submit_create(&gateway, ResourceKind::IpfsPeer)
        .await
        .unwrap_err();
    assert_eq!(
        error,
        SubmitError::Server("IPFS Peer by name peer-1 already exist".to_string())
    );

    form.set("name", "peer-2");
    form.submit_create(&gateway, ResourceKind::IpfsPeer).await.unwrap();
    assert_eq!(gateway.names(ResourceKind::IpfsPeer), vec!["peer-1", "peer-2"]);
}

// =============================================================================
// Beacon node and validator
// =============================================================================

#[tokio::test]
async fn test_beacon_node_endpoints_follow_client_and_network() {
    let gateway = InMemoryGateway::default();

    let mut create = FormSession::<CreateBeaconNodeProfile>::new(FormSnapshot::new(), OptionSets::new());
    create.set("name", "beacon-1");
    create.set("client", "prysm");
    create.set("network", "pyrmont");
    assert_eq!(create.profile(), CreateBeaconNodeProfile::PrysmEndpoints);
    assert!(create.validate().contains("eth1Endpoints"));

    create.set("eth1Endpoints", vec!["http://geth-1:8545"]);
    assert!(create.validate().is_valid());

    // Switching to mainnet hides the endpoints and drops the typed value.
    assert_eq!(create.set("network", "mainnet"), vec!["eth1Endpoints"]);
    assert!(!create.payload().contains("eth1Endpoints"));

    create
        .submit_create(&gateway, ResourceKind::BeaconNode)
        .await
        .unwrap();

    // Later, on the node's page
    let snapshot = FormSnapshot::new()
        .with("client", "prysm")
        .with("network", "mainnet");
    let rules = select_rule_set::<Eth1EndpointsProfile>(&snapshot, &OptionSets::new());
    assert!(validate(&snapshot, &rules).is_valid());
}

#[test]
fn test_validator_form_shape_per_client() {
    let options = OptionSets::new();
    let expectations = [
        ("prysm", CreateValidatorProfile::Prysm, true),
        ("lighthouse", CreateValidatorProfile::Lighthouse, false),
        ("nimbus", CreateValidatorProfile::SingleEndpoint, false),
        ("teku", CreateValidatorProfile::SingleEndpoint, false),
    ];

    for (client, profile, wants_password) in expectations {
        let snapshot = FormSnapshot::new().with("client", client);
        let session = FormSession::<CreateValidatorProfile>::new(snapshot, options.clone());

        assert_eq!(session.profile(), profile, "{client}");
        assert_eq!(
            session.rule_set().is_visible("walletPasswordSecretName"),
            wants_password,
            "{client}"
        );
    }
}

// =============================================================================
// Polkadot networking
// =============================================================================

#[tokio::test]
async fn test_polkadot_networking_update() {
    let gateway = InMemoryGateway::default();
    let mut create = FormSession::<CreateNodeProfile>::new(FormSnapshot::new(), OptionSets::new());
    create.set("name", "dot-1");
    create.set("client", "parity");
    create.set("network", "kusama");
    create
        .submit_create(&gateway, ResourceKind::PolkadotNode)
        .await
        .unwrap();

    let mut networking = FormSession::<NetworkingProfile>::new(FormSnapshot::new(), OptionSets::new());
    networking.set("p2pPort", "0");
    let error = networking
        .submit_update(&gateway, ResourceKind::PolkadotNode, "dot-1")
        .await
        .unwrap_err();
    assert_eq!(
        error.validation().unwrap().get("p2pPort"),
        Some("P2P Port is between 1 and 65535")
    );

    networking.set("p2pPort", "30334");
    networking.set("pruning", false);
    let updated = networking
        .submit_update(&gateway, ResourceKind::PolkadotNode, "dot-1")
        .await
        .unwrap();

    assert_eq!(updated.deployment.get("p2pPort"), Some(&serde_json::json!(30334)));
    assert_eq!(updated.deployment.get("syncMode"), Some(&serde_json::json!("full")));
    assert!(updated.deployment.get("retainedBlocks").is_none());
}
