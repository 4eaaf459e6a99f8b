use super::*;
use crate::render::device::{DeviceCall, RecordingDevice};

#[test]
fn first_applied_region_wins() {
    let mut state = ClipState::default();
    assert!(state.enable(ClipRegion::new(0, 0, 10, 10)));
    assert!(!state.enable(ClipRegion::new(20, 20, 30, 30)));
    assert_eq!(state.region(), Some(ClipRegion::new(0, 0, 10, 10)));
}

#[test]
fn disable_then_enable_takes_new_region() {
    let mut state = ClipState::Enabled(ClipRegion::new(0, 0, 10, 10));
    state.disable();
    assert!(!state.is_enabled());
    assert!(state.enable(ClipRegion::new(20, 20, 30, 30)));
    assert_eq!(state.region(), Some(ClipRegion::new(20, 20, 30, 30)));
}

#[test]
fn disable_is_always_legal() {
    let mut state = ClipState::Disabled;
    state.disable();
    assert_eq!(state, ClipState::Disabled);
}

#[test]
fn from_local_offsets_every_corner() {
    let r = ClipRegion::from_local(1, 2, 11, 12, (100, -50));
    assert_eq!(r, ClipRegion::new(101, -48, 111, -38));
    assert_eq!(r.to_rect(), Rect::new(101.0, -48.0, 111.0, -38.0));
}

#[test]
fn apply_reissues_or_disables() {
    let mut dev = RecordingDevice::new(8, 8);
    ClipState::Enabled(ClipRegion::new(1, 1, 4, 4))
        .apply(&mut dev)
        .unwrap();
    ClipState::Disabled.apply(&mut dev).unwrap();
    assert_eq!(
        dev.calls(),
        &[
            DeviceCall::EnableClip(ClipRegion::new(1, 1, 4, 4)),
            DeviceCall::DisableClip,
        ]
    );
}

#[test]
fn option_conversion() {
    assert_eq!(ClipState::from(None), ClipState::Disabled);
    let r = ClipRegion::new(0, 0, 1, 1);
    assert_eq!(ClipState::from(Some(r)), ClipState::Enabled(r));
}
