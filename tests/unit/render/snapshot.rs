use super::*;
use crate::{
    foundation::core::Color,
    render::clip::ClipRegion,
    render::device::{DeviceCall, RecordingDevice},
};

#[test]
fn component_names_round_trip_through_from_str() {
    for c in StateComponent::ALL {
        assert_eq!(c.name().parse::<StateComponent>().unwrap(), c);
    }
}

#[test]
fn unknown_component_name_is_rejected() {
    let err = "colour".parse::<StateComponent>().unwrap_err();
    assert!(matches!(err, RenderError::InvalidComponentSubset(_)));
    assert!(err.to_string().contains("colour"));
}

#[test]
fn component_set_parses_lists() {
    let set: ComponentSet = " color, alpha ,clip".parse().unwrap();
    assert_eq!(
        set,
        ComponentSet::COLOR | ComponentSet::ALPHA | ComponentSet::CLIP
    );
    assert_eq!("".parse::<ComponentSet>().unwrap(), ComponentSet::empty());
    assert!("color,bogus".parse::<ComponentSet>().is_err());
}

#[test]
fn every_bit_names_a_component() {
    assert_eq!(ComponentSet::all().bits(), u8::MAX);
    for bits in 0..=u8::MAX {
        let set = ComponentSet::from_bits_retain(bits);
        assert_eq!(set.components().count(), bits.count_ones() as usize);
        assert_eq!(set.components().collect::<ComponentSet>(), set);
    }
}

#[test]
fn components_iterate_in_restore_order() {
    let set = ComponentSet::BLEND_MODE | ComponentSet::POSITION | ComponentSet::CLIP;
    let order: Vec<_> = set.components().collect();
    assert_eq!(
        order,
        vec![
            StateComponent::Position,
            StateComponent::Clip,
            StateComponent::BlendMode
        ]
    );
}

#[test]
fn collect_from_components() {
    let set: ComponentSet = [StateComponent::Font, StateComponent::TextScale]
        .into_iter()
        .collect();
    assert_eq!(set, ComponentSet::FONT | ComponentSet::TEXT_SCALE);
    assert_eq!(ComponentSet::from(StateComponent::Alpha), ComponentSet::ALPHA);
}

#[test]
fn capture_replaces_mask_and_hides_stale_fields() {
    let mut ctx = RenderContext::new();
    ctx.move_to(3.0, 4.0);
    ctx.set_text_scale(2.0);

    let mut snap = Snapshot::blank();
    snap.capture(&ctx, Some(ComponentSet::POSITION | ComponentSet::TEXT_SCALE));
    assert_eq!(snap.position(), Some(Point::new(3.0, 4.0)));
    assert_eq!(snap.text_scale(), Some(2.0));
    assert!(!snap.is_capture_all());

    snap.capture(&ctx, Some(ComponentSet::ALPHA));
    assert_eq!(snap.captured(), ComponentSet::ALPHA);
    assert_eq!(snap.position(), None);
    assert_eq!(snap.text_scale(), None);
    assert_eq!(snap.alpha(), Some(1.0));
}

#[test]
fn capture_all_sets_flag_and_full_mask() {
    let ctx = RenderContext::new();
    let mut snap = Snapshot::blank();
    snap.capture(&ctx, None);
    assert!(snap.is_capture_all());
    assert_eq!(snap.captured(), ComponentSet::all());
    assert_eq!(snap.font(), Some(None));
    assert_eq!(snap.clip(), Some(ClipState::Disabled));
    assert_eq!(snap.blend_mode(), Some(BlendMode::Normal));
}

#[test]
fn color_and_alpha_restore_their_flags_verbatim() {
    let mut dev = RecordingDevice::new(8, 8);
    let mut ctx = RenderContext::new();
    let mut snap = Snapshot::blank();
    snap.capture(&ctx, Some(ComponentSet::COLOR | ComponentSet::ALPHA));

    ctx.set_color(Color::new(0.2, 0.3, 0.4, 0.5));
    snap.apply(&mut ctx, &mut dev).unwrap();

    assert_eq!(ctx.color(), Color::WHITE);
    assert!(!ctx.is_color_changed());
    assert!(!ctx.is_alpha_changed());
    assert!(dev.calls().is_empty());
}

#[test]
fn color_restore_keeps_current_alpha() {
    let mut dev = RecordingDevice::new(8, 8);
    let mut ctx = RenderContext::new();
    let mut snap = Snapshot::blank();
    snap.capture(&ctx, Some(ComponentSet::COLOR));

    ctx.set_color(Color::new(0.2, 0.3, 0.4, 0.5));
    snap.apply(&mut ctx, &mut dev).unwrap();

    assert_eq!(ctx.color(), Color::new(1.0, 1.0, 1.0, 0.5));
    assert!(!ctx.is_color_changed());
    assert!(ctx.is_alpha_changed());
}

#[test]
fn clip_and_blend_restores_reach_the_device() {
    let mut dev = RecordingDevice::new(8, 8);
    let mut ctx = RenderContext::new();
    ctx.enable_clip(&mut dev, 0, 0, 4, 4).unwrap();
    dev.take_calls();

    let mut snap = Snapshot::blank();
    snap.capture(&ctx, Some(ComponentSet::CLIP | ComponentSet::BLEND_MODE));
    ctx.disable_clip(&mut dev).unwrap();
    ctx.set_blend_mode(&mut dev, BlendMode::Multiply).unwrap();
    dev.take_calls();

    snap.apply(&mut ctx, &mut dev).unwrap();
    assert_eq!(ctx.clip(), Some(ClipRegion::new(0, 0, 4, 4)));
    assert_eq!(ctx.blend_mode(), BlendMode::Normal);
    assert_eq!(
        dev.calls(),
        &[
            DeviceCall::EnableClip(ClipRegion::new(0, 0, 4, 4)),
            DeviceCall::BlendMode(BlendMode::Normal),
        ]
    );
}
