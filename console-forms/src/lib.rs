//! Conditional validation and dependent-field visibility for console forms.
//!
//! Every create and update form of the console is described by a
//! [`RuleProfile`]: a small enum whose variants name the rule sets the form
//! can be in, plus a pure selection function from the current values (and
//! read-only upstream [`OptionSets`]) to one variant. The engine then:
//!
//! - validates a [`FormSnapshot`] against the selected [`RuleSet`], yielding a
//!   [`ValidationResult`] that maps each invalid field to one message;
//! - builds the [`Payload`] sent to the API, holding only fields that are
//!   required or optional under the selected rule set;
//! - clears fields that stop being shown when a change switches variants.
//!
//! # Examples
//!
//! ```
//! use console_forms::profiles::ethereum2::Eth1EndpointsProfile;
//! use console_forms::{FormSession, FormSnapshot, OptionSets};
//!
//! let snapshot = FormSnapshot::new()
//!     .with("client", "prysm")
//!     .with("network", "pyrmont");
//! let mut session = FormSession::<Eth1EndpointsProfile>::new(snapshot, OptionSets::new());
//!
//! assert_eq!(session.profile(), Eth1EndpointsProfile::Required);
//! assert!(session.validate().contains("eth1Endpoints"));
//!
//! session.set("eth1Endpoints", vec!["http://geth-1:8545"]);
//! assert!(session.validate().is_valid());
//! ```
//!
//! Submitting goes through a [`ResourceGateway`]; see [`submission`].

mod engine;
pub mod options;
mod profile;
pub mod profiles;
mod rule;
mod rule_set;
mod session;
mod snapshot;
pub mod submission;
mod value;

pub use engine::{Payload, build_payload, prepare, stale_fields, validate};
pub use options::{OptionSets, SelectOption};
pub use profile::{RuleProfile, select_rule_set};
pub use rule::{Check, FieldRule, Requiredness};
pub use rule_set::RuleSet;
pub use session::FormSession;
pub use snapshot::FormSnapshot;
pub use submission::{
    Created, DeleteAction, Deployment, GatewayError, Navigation, Notification, ResourceGateway,
    ResourceKind, SubmitError, SubmitGuard, Updated,
};
pub use value::FieldValue;

pub use console_validation::{ValidationError, ValidationResult};

/// Common imports for working with forms.
pub mod prelude {
    pub use crate::profiles::ethereum::{
        Api, ApiSettingsProfile, ApiToggleFlow, ConfirmationError, ConfirmationState,
        CreateNodeProfile, ToggleOutcome,
    };
    pub use crate::profiles::ethereum2::{
        CreateBeaconNodeProfile, CreateValidatorProfile, Eth1EndpointsProfile,
    };
    pub use crate::profiles::ipfs::{ClusterPeersProfile, CreatePeerProfile, PeerApiSettingsProfile};
    pub use crate::profiles::polkadot::NetworkingProfile;
    pub use crate::{
        FieldValue, FormSession, FormSnapshot, OptionSets, ResourceGateway, ResourceKind,
        RuleProfile, SubmitError, ValidationResult,
    };
}
