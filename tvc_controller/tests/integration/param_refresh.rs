//! Feature toggle polling through the controller.

use tempfile::TempDir;
use tvc_common::params::TURN_VISION_CONTROL_KEY;
use tvc_common::state::TurnControllerState::*;
use tvc_controller::config::load_config;
use tvc_controller::cycle::TurnController;
use tvc_controller::params::{Clock, FileParamStore, ManualClock};

use super::{CRUISE, LIMITS, harness, snapshot};

#[test]
fn toggle_change_is_seen_only_after_refresh_interval() {
    let mut h = harness(true);
    let curve = snapshot(Some(0.004), 0.0, false);

    let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve);
    assert_eq!(out.state, Entering);

    h.clock.set(1.0);
    h.store.set_bool(TURN_VISION_CONTROL_KEY, false);

    for t in [1.0, 2.5, 4.0, 4.99] {
        h.clock.set(t);
        let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve);
        assert!(h.tvc.is_feature_enabled(), "t={t}");
        assert_eq!(out.state, Entering, "t={t}");
    }

    h.clock.set(5.0);
    let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve);
    assert!(!h.tvc.is_feature_enabled());
    assert_eq!(out.state, Disabled);
    assert_eq!(out.v_turn, CRUISE);
}

#[test]
fn feature_off_at_start_blocks_entry_until_refreshed() {
    let mut h = harness(false);
    let curve = snapshot(Some(0.004), 0.0, false);

    assert_eq!(h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve).state, Disabled);

    h.clock.set(2.0);
    h.store.set_bool(TURN_VISION_CONTROL_KEY, true);
    assert_eq!(h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve).state, Disabled);

    h.clock.set(5.0);
    assert_eq!(h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve).state, Entering);
}

#[test]
fn bad_stored_value_keeps_previous_toggle() {
    let mut h = harness(true);
    let curve = snapshot(Some(0.004), 0.0, false);
    h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve);

    h.store.set_raw(TURN_VISION_CONTROL_KEY, "yes");
    h.clock.set(6.0);
    let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve);
    assert!(h.tvc.is_feature_enabled());
    assert_eq!(out.state, Entering);
}

#[test]
fn file_store_and_config_file_drive_the_controller() {
    let dir = TempDir::new().unwrap();
    let params = dir.path().join("params");
    std::fs::create_dir(&params).unwrap();
    std::fs::write(params.join(TURN_VISION_CONTROL_KEY), "1").unwrap();

    let config_path = dir.path().join("tvc.toml");
    std::fs::write(
        &config_path,
        r#"
[shared]
log_level = "debug"

[controller]
params_refresh_interval = 1.0
"#,
    )
    .unwrap();
    let config = load_config(&config_path).unwrap();
    assert_eq!(config.controller.params_refresh_interval, 1.0);

    let clock = ManualClock::new(10.0);
    let mut tvc = TurnController::new(
        config.controller,
        config.vehicle,
        FileParamStore::new(&params),
        clock.clone(),
    );
    let curve = snapshot(Some(0.004), 0.0, false);
    assert!(tvc.is_feature_enabled());
    assert_eq!(tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve).state, Entering);

    std::fs::write(params.join(TURN_VISION_CONTROL_KEY), "0").unwrap();
    clock.advance(0.5);
    assert_eq!(tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve).state, Entering);

    clock.advance(0.5);
    assert_eq!(clock.now(), 11.0);
    assert_eq!(tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &curve).state, Disabled);
}

#[test]
fn missing_param_file_reads_as_disabled() {
    let dir = TempDir::new().unwrap();
    let mut tvc = TurnController::new(
        Default::default(),
        Default::default(),
        FileParamStore::new(dir.path()),
        ManualClock::new(0.0),
    );
    assert!(!tvc.is_feature_enabled());
    let out = tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snapshot(Some(0.004), 0.0, false));
    assert_eq!(out.state, Disabled);
}
