//! # Console Client
//!
//! HTTP gateway between validated console forms and the deployment API.
//!
//! [`ApiClient`] implements [`console_forms::ResourceGateway`], so a form
//! session submits through it directly. It also loads the upstream
//! [`console_forms::OptionSets`] (active Ethereum nodes, IPFS peers) that
//! endpoint selectors choose from.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use console_client::ApiClient;
//! use console_config::{ConfigManager, ConsoleSettings};
//! use console_forms::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ConsoleSettings::load(&ConfigManager::from_env()?)?;
//!     let client = ApiClient::from_settings(&settings)?;
//!
//!     let mut session = FormSession::<CreatePeerProfile>::new(FormSnapshot::new(), OptionSets::new());
//!     session.set("name", "peer-1");
//!
//!     let created = session.submit_create(&client, ResourceKind::IpfsPeer).await?;
//!     println!("go to {}", created.navigation.path);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

pub use client::ApiClient;
pub use config::{ApiClientConfig, ApiClientConfigBuilder};
pub use error::{ClientError, Result};
