//! Per-instance form state.

use crate::engine::{self, Payload};
use crate::submission::{self, Created, ResourceKind, ResourceGateway, SubmitError, SubmitGuard, Updated};
use crate::{FieldValue, FormSnapshot, OptionSets, RuleProfile, RuleSet};
use console_validation::ValidationResult;

const TARGET: &str = "console::forms";

/// One live form: its values, the upstream options it selects from and the
/// rule set currently in force.
///
/// Every change re-runs selection. When the selected variant changes, fields
/// that were shown before but are no longer shown lose their value, so a
/// stale value can never be validated or submitted later.
#[derive(Debug, Clone)]
pub struct FormSession<P: RuleProfile> {
    snapshot: FormSnapshot,
    options: OptionSets,
    profile: P,
    rule_set: RuleSet,
    guard: SubmitGuard,
}

impl<P: RuleProfile> FormSession<P> {
    pub fn new(snapshot: FormSnapshot, options: OptionSets) -> Self {
        let profile = P::select(&snapshot, &options);
        console_log::debug!(target: TARGET, "{}: starting with {:?}", P::FORM, profile);

        Self {
            rule_set: profile.rule_set(),
            snapshot,
            options,
            profile,
            guard: SubmitGuard::new(),
        }
    }

    /// Record a user-entered value and reselect. Returns the fields cleared
    /// by the switch.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Vec<&'static str> {
        self.snapshot.set(field, value);
        self.reselect()
    }

    /// Replace the upstream option sets and reselect.
    pub fn set_options(&mut self, options: OptionSets) -> Vec<&'static str> {
        self.options = options;
        self.reselect()
    }

    fn reselect(&mut self) -> Vec<&'static str> {
        let next = P::select(&self.snapshot, &self.options);
        if next == self.profile {
            return Vec::new();
        }

        let rule_set = next.rule_set();
        let stale = engine::stale_fields(&self.rule_set, &rule_set);
        for field in &stale {
            self.snapshot.clear(field);
        }

        console_log::debug!(
            target: TARGET,
            "{}: {:?} -> {:?}, cleared {:?}",
            P::FORM,
            self.profile,
            next,
            stale
        );

        self.profile = next;
        self.rule_set = rule_set;
        stale
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &OptionSets {
        &self.options
    }

    pub fn profile(&self) -> P {
        self.profile
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn validate(&self) -> ValidationResult {
        engine::validate(&self.snapshot, &self.rule_set)
    }

    pub fn payload(&self) -> Payload {
        engine::build_payload(&self.snapshot, &self.rule_set)
    }

    pub fn prepare(&self) -> Result<Payload, SubmitError> {
        engine::prepare(&self.snapshot, &self.rule_set).map_err(SubmitError::Invalid)
    }

    /// Whether the user changed anything since loading or the last commit.
    pub fn is_dirty(&self) -> bool {
        self.snapshot.is_dirty()
    }

    /// Accept the current values as the new baseline after a save.
    pub fn commit(&mut self) {
        self.snapshot.mark_pristine();
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_in_flight()
    }

    /// Validate and create a new resource.
    pub async fn submit_create<G>(&self, gateway: &G, kind: ResourceKind) -> Result<Created, SubmitError>
    where
        G: ResourceGateway + ?Sized,
    {
        let payload = self.prepare()?;
        submission::create(gateway, &self.guard, kind, payload).await
    }

    /// Validate and update the resource `name`. Call [`commit`](Self::commit)
    /// once the result has been applied.
    pub async fn submit_update<G>(
        &self,
        gateway: &G,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Updated, SubmitError>
    where
        G: ResourceGateway + ?Sized,
    {
        let payload = self.prepare()?;
        submission::update(gateway, &self.guard, kind, name, payload).await
    }
}
