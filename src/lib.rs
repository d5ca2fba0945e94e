// Chain Console - form validation and submission for blockchain deployments
//
// This library selects the rule set that applies to each console form,
// validates and strips form values, and submits them to the deployment API.

// Re-export the form engine
pub use console_forms::*;

// Re-export supporting crates
pub use console_log;
pub use console_validation;

#[cfg(feature = "config")]
pub use console_config;

#[cfg(feature = "client")]
pub use console_client;

// Prelude for common imports
pub mod prelude {
    pub use console_forms::prelude::*;
    pub use console_forms::{
        Created, DeleteAction, Navigation, Notification, Payload, RuleSet, Updated,
    };

    #[cfg(feature = "client")]
    pub use console_client::{ApiClient, ApiClientConfig};

    #[cfg(feature = "config")]
    pub use console_config::{ConfigManager, ConsoleSettings};
}
