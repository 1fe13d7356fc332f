//! Site lifecycle state machine
//!
//! Transitions are driven by callers; nothing polls the remote service in the
//! background. The remote service stays authoritative, so this machine only
//! tracks the progress of a single multi-step operation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SiteError;

/// Lifecycle state of a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteState {
    /// No backing stack
    Absent,

    /// Stack creation requested
    Provisioning,

    /// Stack exists, deployment settings being applied
    Configuring,

    /// Initial update deployment queued or running
    Deploying,

    /// Last deployment finished
    Ready,

    /// Content update deployment queued or running
    DeployingUpdate,

    /// Destroy deployment queued or running
    Destroying,

    /// Resources destroyed, stack still present
    Destroyed,
}

impl SiteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteState::Absent => "absent",
            SiteState::Provisioning => "provisioning",
            SiteState::Configuring => "configuring",
            SiteState::Deploying => "deploying",
            SiteState::Ready => "ready",
            SiteState::DeployingUpdate => "deploying-update",
            SiteState::Destroying => "destroying",
            SiteState::Destroyed => "destroyed",
        }
    }

    /// True while a deployment for the site is expected to be in flight
    pub fn is_deploying(&self) -> bool {
        matches!(
            self,
            SiteState::Deploying | SiteState::DeployingUpdate | SiteState::Destroying
        )
    }
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteEvent {
    /// Create requested
    Create,

    /// Stack created
    StackCreated,

    /// Deployment settings patched
    SettingsPatched,

    /// In-flight deployment finished
    DeploymentSettled,

    /// Content update requested
    Update,

    /// Resource teardown requested
    Destroy,

    /// Stack removal requested
    Purge,
}

/// Lifecycle of one site
#[derive(Debug, Clone)]
pub struct SiteLifecycle {
    state: SiteState,
}

impl SiteLifecycle {
    /// Lifecycle of a site without a stack
    pub fn new() -> Self {
        Self::from_state(SiteState::Absent)
    }

    /// Lifecycle resuming at a known state
    pub fn from_state(state: SiteState) -> Self {
        Self { state }
    }

    /// Get current state
    pub fn state(&self) -> SiteState {
        self.state
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: SiteEvent) -> Result<SiteState, SiteError> {
        use SiteEvent as E;
        use SiteState as S;

        let new_state = match (self.state, event) {
            (S::Absent, E::Create) => S::Provisioning,
            (S::Provisioning, E::StackCreated) => S::Configuring,
            (S::Configuring, E::SettingsPatched) => S::Deploying,

            (S::Deploying | S::DeployingUpdate, E::DeploymentSettled) => S::Ready,
            (S::Destroying, E::DeploymentSettled) => S::Destroyed,

            // Updates queue behind whatever is running
            (S::Deploying | S::Ready | S::DeployingUpdate | S::Destroying | S::Destroyed, E::Update) => {
                S::DeployingUpdate
            }
            (S::Deploying | S::Ready | S::DeployingUpdate | S::Destroyed, E::Destroy) => S::Destroying,

            (state, E::Purge) if state != S::Absent && state != S::Provisioning => S::Absent,

            (state, event) => {
                return Err(SiteError::Transition(format!("{:?} -> {:?}", state, event)));
            }
        };

        self.state = new_state;
        Ok(new_state)
    }
}

impl Default for SiteLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
