//! Submission of validated forms to the backend.
//!
//! A form session hands its stripped [`Payload`] to a [`ResourceGateway`].
//! Each session allows exactly one request in flight; a second submit while
//! one is outstanding fails with [`SubmitError::InFlight`] and never reaches
//! the gateway. Success produces a [`Navigation`] (create, delete) or an
//! [`Updated`] result; the post-submit notification travels inside the
//! returned value rather than through shared storage.

use crate::Payload;
use async_trait::async_trait;
use console_validation::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

const TARGET: &str = "console::submission";

/// Deployable resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    EthereumNode,
    BeaconNode,
    Validator,
    IpfsPeer,
    ClusterPeer,
    PolkadotNode,
    NearNode,
}

impl ResourceKind {
    /// Collection path on the API, relative to the base URL.
    pub fn api_path(self) -> &'static str {
        match self {
            ResourceKind::EthereumNode => "/ethereum/nodes",
            ResourceKind::BeaconNode => "/ethereum2/beaconnodes",
            ResourceKind::Validator => "/ethereum2/validators",
            ResourceKind::IpfsPeer => "/ipfs/peers",
            ResourceKind::ClusterPeer => "/ipfs/clusterpeers",
            ResourceKind::PolkadotNode => "/polkadot/nodes",
            ResourceKind::NearNode => "/near/nodes",
        }
    }

    /// Console page listing resources of this kind.
    pub fn list_page(self) -> &'static str {
        match self {
            ResourceKind::EthereumNode => "/deployments/ethereum/nodes",
            ResourceKind::BeaconNode => "/deployments/ethereum2/beaconnodes",
            ResourceKind::Validator => "/deployments/ethereum2/validators",
            ResourceKind::IpfsPeer => "/deployments/ipfs/peers",
            ResourceKind::ClusterPeer => "/deployments/ipfs/clusterpeers",
            ResourceKind::PolkadotNode => "/deployments/polkadot/nodes",
            ResourceKind::NearNode => "/deployments/near/nodes",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::EthereumNode => "Ethereum Node",
            ResourceKind::BeaconNode => "Beacon Node",
            ResourceKind::Validator => "Validator",
            ResourceKind::IpfsPeer => "IPFS Peer",
            ResourceKind::ClusterPeer => "Cluster Peer",
            ResourceKind::PolkadotNode => "Polkadot Node",
            ResourceKind::NearNode => "NEAR Node",
        }
    }

    /// Path of one resource on the API.
    pub fn resource_path(self, name: &str) -> String {
        format!("{}/{}", self.api_path(), name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Deployment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Map::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Failure reported by a [`ResourceGateway`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The API answered with a non-success status
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),
}

/// Downstream API collaborator.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    async fn create(&self, kind: ResourceKind, payload: &Payload) -> Result<Deployment, GatewayError>;

    async fn update(
        &self,
        kind: ResourceKind,
        name: &str,
        payload: &Payload,
    ) -> Result<Deployment, GatewayError>;

    async fn delete(&self, kind: ResourceKind, name: &str) -> Result<(), GatewayError>;
}

/// Why a submit did not succeed. Every variant leaves the form editable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Field validation failed; nothing was sent
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ValidationResult),

    /// Another request from the same form is still outstanding
    #[error("a request is already in flight")]
    InFlight,

    /// The API rejected the request; carries its error message
    #[error("{0}")]
    Server(String),

    #[error("transport error: {0}")]
    Transport(String),

    /// A delete was confirmed with a name other than the resource's
    #[error("type {expected} to confirm the deletion")]
    NameMismatch { expected: String },
}

impl SubmitError {
    /// Whether resubmitting the same values may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::InFlight | SubmitError::Transport(_))
    }

    /// Field errors, when validation blocked the submit.
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            SubmitError::Invalid(result) => Some(result),
            _ => None,
        }
    }
}

impl From<GatewayError> for SubmitError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Rejected { message, .. } => SubmitError::Server(message),
            GatewayError::Transport(message) => SubmitError::Transport(message),
        }
    }
}

/// Single in-flight request flag shared by a form and its pending request.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or fail with [`SubmitError::InFlight`].
    pub fn acquire(&self) -> Result<InFlight, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight {
                flag: Arc::clone(&self.in_flight),
            })
            .map_err(|_| SubmitError::InFlight)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held while a request is outstanding; releases the slot on drop, including
/// when the request fails or the future is dropped.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Message shown on the page the user lands on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub deployment_name: String,
}

/// Where to go after a successful request, and what to announce there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub path: String,
    pub notification: Option<Notification>,
}

impl Navigation {
    fn to_list(kind: ResourceKind, name: &str, verb: &str) -> Self {
        Self {
            path: kind.list_page().to_string(),
            notification: Some(Notification {
                title: format!("{} has been {}", kind.display_name(), verb),
                message: format!("{} has been {} successfully.", name, verb),
                deployment_name: name.to_string(),
            }),
        }
    }

    pub fn created(kind: ResourceKind, name: &str) -> Self {
        Self::to_list(kind, name, "created")
    }

    pub fn deleted(kind: ResourceKind, name: &str) -> Self {
        Self::to_list(kind, name, "deleted")
    }
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub deployment: Deployment,
    pub navigation: Navigation,
}

/// Result of a successful update. The form stays on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Updated {
    pub deployment: Deployment,
    pub message: String,
    /// Dependent read-only data should be refetched
    pub refresh: bool,
}

/// Send a create request for a prepared payload.
pub(crate) async fn create<G>(
    gateway: &G,
    guard: &SubmitGuard,
    kind: ResourceKind,
    payload: Payload,
) -> Result<Created, SubmitError>
where
    G: ResourceGateway + ?Sized,
{
    let _in_flight = guard.acquire()?;
    console_log::info!(target: TARGET, "creating {}", kind.display_name());

    match gateway.create(kind, &payload).await {
        Ok(deployment) => {
            console_log::info!(target: TARGET, "{} {} created", kind.display_name(), deployment.name);
            let navigation = Navigation::created(kind, &deployment.name);
            Ok(Created {
                deployment,
                navigation,
            })
        }
        Err(error) => {
            console_log::warn!(target: TARGET, "create {} failed: {}", kind.display_name(), error);
            Err(error.into())
        }
    }
}

/// Send an update request for a prepared payload.
pub(crate) async fn update<G>(
    gateway: &G,
    guard: &SubmitGuard,
    kind: ResourceKind,
    name: &str,
    payload: Payload,
) -> Result<Updated, SubmitError>
where
    G: ResourceGateway + ?Sized,
{
    let _in_flight = guard.acquire()?;
    console_log::info!(target: TARGET, "updating {} {}", kind.display_name(), name);

    match gateway.update(kind, name, &payload).await {
        Ok(deployment) => Ok(Updated {
            deployment,
            message: format!("{} has been updated", kind.display_name()),
            refresh: true,
        }),
        Err(error) => {
            console_log::warn!(target: TARGET, "update {} {} failed: {}", kind.display_name(), name, error);
            Err(error.into())
        }
    }
}

/// Delete one deployed resource (the danger zone of a resource page).
///
/// The user confirms by typing the resource name; nothing is sent until the
/// typed name matches.
#[derive(Debug, Clone)]
pub struct DeleteAction {
    kind: ResourceKind,
    name: String,
    guard: SubmitGuard,
}

impl DeleteAction {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            guard: SubmitGuard::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_in_flight(&self) -> bool {
        self.guard.is_in_flight()
    }

    /// Whether `typed` confirms the deletion, i.e. the delete button is enabled.
    pub fn is_confirmed(&self, typed: &str) -> bool {
        typed == self.name
    }

    pub async fn delete<G>(&self, gateway: &G, typed: &str) -> Result<Navigation, SubmitError>
    where
        G: ResourceGateway + ?Sized,
    {
        if !self.is_confirmed(typed) {
            return Err(SubmitError::NameMismatch {
                expected: self.name.clone(),
            });
        }
        let _in_flight = self.guard.acquire()?;
        console_log::info!(target: TARGET, "deleting {} {}", self.kind.display_name(), self.name);

        gateway
            .delete(self.kind, &self.name)
            .await
            .map(|()| Navigation::deleted(self.kind, &self.name))
            .map_err(|error| {
                console_log::warn!(
                    target: TARGET,
                    "delete {} {} failed: {}",
                    self.kind.display_name(),
                    self.name,
                    error
                );
                SubmitError::from(error)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(ResourceKind::BeaconNode.api_path(), "/ethereum2/beaconnodes");
        assert_eq!(
            ResourceKind::PolkadotNode.resource_path("dot-1"),
            "/polkadot/nodes/dot-1"
        );
        assert_eq!(ResourceKind::NearNode.to_string(), "NEAR Node");
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let guard = SubmitGuard::new();
        let token = guard.acquire().unwrap();
        assert!(guard.is_in_flight());
        assert_eq!(guard.acquire().unwrap_err(), SubmitError::InFlight);

        drop(token);
        assert!(!guard.is_in_flight());
        assert!(guard.acquire().is_ok());
    }

    #[test]
    fn test_gateway_errors_map_to_submit_errors() {
        let rejected = GatewayError::Rejected {
            status: 400,
            message: "node name already taken".to_string(),
        };
        let error = SubmitError::from(rejected);
        assert_eq!(error, SubmitError::Server("node name already taken".to_string()));
        assert!(!error.is_retryable());

        let error = SubmitError::from(GatewayError::Transport("connection refused".into()));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_deployment_keeps_raw_fields() {
        let deployment: Deployment =
            serde_json::from_str(r#"{"name": "geth-1", "client": "geth", "rpcPort": 8545}"#)
                .unwrap();
        assert_eq!(deployment.name, "geth-1");
        assert_eq!(deployment.get("rpcPort"), Some(&Value::from(8545)));
        assert!(deployment.get("name").is_none());
    }

    #[test]
    fn test_delete_confirmation_needs_exact_name() {
        let action = DeleteAction::new(ResourceKind::BeaconNode, "beacon-1");
        assert!(!action.is_confirmed(""));
        assert!(!action.is_confirmed("beacon-1 "));
        assert!(!action.is_confirmed("Beacon-1"));
        assert!(action.is_confirmed("beacon-1"));

        let error = SubmitError::NameMismatch {
            expected: "beacon-1".to_string(),
        };
        assert!(!error.is_retryable());
        assert_eq!(error.to_string(), "type beacon-1 to confirm the deletion");
    }

    #[test]
    fn test_navigation_notification() {
        let navigation = Navigation::deleted(ResourceKind::PolkadotNode, "dot-1");
        assert_eq!(navigation.path, "/deployments/polkadot/nodes");
        let notification = navigation.notification.unwrap();
        assert_eq!(notification.title, "Polkadot Node has been deleted");
        assert_eq!(notification.deployment_name, "dot-1");
    }
}
