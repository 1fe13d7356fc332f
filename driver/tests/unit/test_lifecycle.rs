//! Site lifecycle unit tests

use site_driver::errors::SiteError;
use site_driver::sites::lifecycle::{SiteEvent, SiteLifecycle, SiteState};

#[test]
fn test_lifecycle_initial_state() {
    let lifecycle = SiteLifecycle::new();
    assert_eq!(lifecycle.state(), SiteState::Absent);
    assert!(!lifecycle.state().is_deploying());
}

#[test]
fn test_lifecycle_update_flow() {
    let mut lifecycle = SiteLifecycle::from_state(SiteState::Ready);

    // Ready -> DeployingUpdate
    lifecycle.process(SiteEvent::Update).unwrap();
    assert_eq!(lifecycle.state(), SiteState::DeployingUpdate);

    // Updates queue behind each other
    lifecycle.process(SiteEvent::Update).unwrap();
    assert_eq!(lifecycle.state(), SiteState::DeployingUpdate);

    // DeployingUpdate -> Ready
    lifecycle.process(SiteEvent::DeploymentSettled).unwrap();
    assert_eq!(lifecycle.state(), SiteState::Ready);
}

#[test]
fn test_lifecycle_destroy_then_redeploy() {
    let mut lifecycle = SiteLifecycle::from_state(SiteState::Ready);

    lifecycle.process(SiteEvent::Destroy).unwrap();
    assert_eq!(lifecycle.state(), SiteState::Destroying);
    assert!(lifecycle.state().is_deploying());

    lifecycle.process(SiteEvent::DeploymentSettled).unwrap();
    assert_eq!(lifecycle.state(), SiteState::Destroyed);

    // The stack survives a destroy, so new content can be deployed to it
    lifecycle.process(SiteEvent::Update).unwrap();
    assert_eq!(lifecycle.state(), SiteState::DeployingUpdate);
}

#[test]
fn test_lifecycle_purge() {
    for state in [
        SiteState::Configuring,
        SiteState::Deploying,
        SiteState::Ready,
        SiteState::Destroying,
        SiteState::Destroyed,
    ] {
        let mut lifecycle = SiteLifecycle::from_state(state);
        assert_eq!(lifecycle.process(SiteEvent::Purge).unwrap(), SiteState::Absent);
    }
}

#[test]
fn test_lifecycle_invalid_transition() {
    let mut lifecycle = SiteLifecycle::new();

    // Absent -> Update is invalid
    let result = lifecycle.process(SiteEvent::Update);
    assert!(matches!(result, Err(SiteError::Transition(_))));
    assert_eq!(lifecycle.state(), SiteState::Absent);

    // A stack that was never created cannot be purged
    assert!(lifecycle.process(SiteEvent::Purge).is_err());

    // Destroy cannot be requested twice
    let mut lifecycle = SiteLifecycle::from_state(SiteState::Destroying);
    assert!(lifecycle.process(SiteEvent::Destroy).is_err());
    assert_eq!(lifecycle.state(), SiteState::Destroying);
}

#[test]
fn test_lifecycle_create_only_from_absent() {
    let mut lifecycle = SiteLifecycle::from_state(SiteState::Ready);
    assert!(lifecycle.process(SiteEvent::Create).is_err());

    let mut lifecycle = SiteLifecycle::new();
    assert!(lifecycle.process(SiteEvent::StackCreated).is_err());
}
