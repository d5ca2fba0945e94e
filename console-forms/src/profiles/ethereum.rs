//! Ethereum node forms.

use super::{name_rule, port_rule, shown_if};
use crate::{Check, FieldRule, FormSession, FormSnapshot, OptionSets, RuleProfile, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const CLIENTS: &[&str] = &["geth", "besu", "parity", "nethermind"];

/// APIs a node can expose over JSON-RPC or WebSocket.
pub const API_OPTIONS: &[&str] = &[
    "admin", "clique", "debug", "eth", "miner", "net", "personal", "txpool", "web3",
];

/// Question asked before an API toggle switches mining off.
pub const MINING_PROMPT: &str = "Activating APIs (JSON-RPC Server, Web Socket Server or GraphQl Server) \
     will disable mining. Are you sure you want to continue?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EthereumClient {
    Geth,
    Besu,
    Parity,
    Nethermind,
}

impl EthereumClient {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "geth" => Some(EthereumClient::Geth),
            "besu" => Some(EthereumClient::Besu),
            "parity" => Some(EthereumClient::Parity),
            "nethermind" => Some(EthereumClient::Nethermind),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EthereumClient::Geth => "geth",
            EthereumClient::Besu => "besu",
            EthereumClient::Parity => "parity",
            EthereumClient::Nethermind => "nethermind",
        }
    }

    /// Nethermind ships without a GraphQL server.
    pub fn offers_graphql(self) -> bool {
        self != EthereumClient::Nethermind
    }

    /// Besu can serve APIs while mining.
    pub fn mines_with_apis(self) -> bool {
        self == EthereumClient::Besu
    }
}

impl fmt::Display for EthereumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New Ethereum node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateNodeProfile;

impl RuleProfile for CreateNodeProfile {
    const FORM: &'static str = "ethereum-node-create";

    fn select(_snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        CreateNodeProfile
    }

    fn rule_set(&self) -> RuleSet {
        RuleSet::new("ethereum-node-create").rules([
            name_rule(
                "Please provide a name for your node",
                "Node name shouldn't contain whitespaces",
            ),
            FieldRule::required("client")
                .message("Please choose your client")
                .check_with(Check::OneOf(CLIENTS), "Please choose your client"),
            FieldRule::required("network").message("Please choose your network"),
        ])
    }
}

/// API settings tab of an existing node.
///
/// Port and API list of each server are only shown while its toggle is on.
/// GraphQL has no rules at all on nethermind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSettingsProfile {
    pub client: Option<EthereumClient>,
    pub rpc: bool,
    pub ws: bool,
    pub graphql: bool,
}

impl ApiSettingsProfile {
    pub fn offers_graphql(&self) -> bool {
        self.client.is_none_or(EthereumClient::offers_graphql)
    }
}

impl RuleProfile for ApiSettingsProfile {
    const FORM: &'static str = "ethereum-node-api";

    fn select(snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        let client = snapshot.text("client").and_then(EthereumClient::parse);
        let graphql_offered = client.is_none_or(EthereumClient::offers_graphql);

        Self {
            client,
            rpc: snapshot.flag("rpc"),
            ws: snapshot.flag("ws"),
            graphql: graphql_offered && snapshot.flag("graphql"),
        }
    }

    fn rule_set(&self) -> RuleSet {
        let rules = RuleSet::new("ethereum-node-api").rules([
            FieldRule::optional("miner"),
            FieldRule::optional("rpc"),
            port_rule("rpcPort", self.rpc),
            shown_if(
                self.rpc,
                FieldRule::optional("rpcAPI").check(Check::EachOneOf(API_OPTIONS)),
            ),
            FieldRule::optional("ws"),
            port_rule("wsPort", self.ws),
            shown_if(
                self.ws,
                FieldRule::optional("wsAPI").check(Check::EachOneOf(API_OPTIONS)),
            ),
        ]);

        if self.offers_graphql() {
            rules.rules([
                FieldRule::optional("graphql"),
                port_rule("graphqlPort", self.graphql),
            ])
        } else {
            rules
        }
    }
}

/// Servers that can be toggled on the API settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Rpc,
    Ws,
    Graphql,
}

impl Api {
    /// Toggle field controlling this server.
    pub fn field(self) -> &'static str {
        match self {
            Api::Rpc => "rpc",
            Api::Ws => "ws",
            Api::Graphql => "graphql",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Api::Rpc => "JSON-RPC Server",
            Api::Ws => "Web Socket Server",
            Api::Graphql => "GraphQl Server",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    #[default]
    Idle,
    /// Enabling the API would stop mining; waiting for the user's answer
    PendingConfirmation(Api),
    /// The last request was confirmed
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The toggle was written; carries the fields cleared by the change
    Applied(Vec<&'static str>),
    /// Nothing was written; [`MINING_PROMPT`] must be answered first
    AwaitingConfirmation(Api),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfirmationError {
    #[error("a confirmation for {0} is already pending")]
    AlreadyPending(Api),

    #[error("nothing is awaiting confirmation")]
    NothingPending,

    #[error("{0} is not available for this client")]
    Unavailable(Api),
}

/// Confirmation step between enabling an API and switching mining off.
///
/// Enabling an API while the node mines (on any client but besu) does not
/// write the toggle; it waits for [`confirm`](Self::confirm), which turns
/// mining off and the API on, or [`cancel`](Self::cancel), which changes
/// nothing. Disabling is always written directly.
#[derive(Debug, Clone, Default)]
pub struct ApiToggleFlow {
    state: ConfirmationState,
}

impl ApiToggleFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn toggle(
        &mut self,
        session: &mut FormSession<ApiSettingsProfile>,
        api: Api,
        enabled: bool,
    ) -> Result<ToggleOutcome, ConfirmationError> {
        if let ConfirmationState::PendingConfirmation(pending) = self.state {
            return Err(ConfirmationError::AlreadyPending(pending));
        }
        if api == Api::Graphql && !session.profile().offers_graphql() {
            return Err(ConfirmationError::Unavailable(api));
        }

        self.state = ConfirmationState::Idle;

        let exempt = session
            .profile()
            .client
            .is_some_and(EthereumClient::mines_with_apis);
        if enabled && session.snapshot().flag("miner") && !exempt {
            self.state = ConfirmationState::PendingConfirmation(api);
            return Ok(ToggleOutcome::AwaitingConfirmation(api));
        }

        Ok(ToggleOutcome::Applied(session.set(api.field(), enabled)))
    }

    /// Stop mining and enable the pending API. Returns the fields cleared by
    /// the change.
    pub fn confirm(
        &mut self,
        session: &mut FormSession<ApiSettingsProfile>,
    ) -> Result<Vec<&'static str>, ConfirmationError> {
        let ConfirmationState::PendingConfirmation(api) = self.state else {
            return Err(ConfirmationError::NothingPending);
        };

        let mut cleared = session.set("miner", false);
        cleared.extend(session.set(api.field(), true));
        self.state = ConfirmationState::Confirmed;
        Ok(cleared)
    }

    pub fn cancel(&mut self) -> Result<(), ConfirmationError> {
        match self.state {
            ConfirmationState::PendingConfirmation(_) => {
                self.state = ConfirmationState::Idle;
                Ok(())
            }
            _ => Err(ConfirmationError::NothingPending),
        }
    }
}
