use super::*;
use crate::{
    foundation::core::{BlendMode, Color},
    render::clip::ClipRegion,
    render::device::{DeviceCall, RecordingDevice, RenderDevice},
};

fn setup() -> (SnapshotStack, RenderContext, RecordingDevice) {
    (
        SnapshotStack::default(),
        RenderContext::new(),
        RecordingDevice::new(320, 240),
    )
}

#[test]
fn restore_on_empty_stack_underflows() {
    let (mut stack, mut ctx, mut dev) = setup();
    let err = stack.restore(&mut ctx, &mut dev).unwrap_err();
    assert!(matches!(err, RenderError::StackUnderflow));
    assert_eq!(stack.pool_stats().constructed, 0);
}

#[test]
fn save_all_then_restore_is_identity() {
    let (mut stack, mut ctx, mut dev) = setup();
    let font = dev.load_font("base.fnt").unwrap();
    ctx.set_font(Some(font));
    ctx.move_to(4.5, 6.25);
    ctx.set_color_alpha(0.7);
    ctx.enable_clip(&mut dev, 0, 0, 50, 50).unwrap();
    let before = ctx.clone();

    stack.save(&ctx, None);
    ctx.move_to(99.0, 99.0);
    ctx.set_color(Color::new(0.0, 0.5, 1.0, 0.1));
    ctx.set_font(Some(dev.load_font("other.fnt").unwrap()));
    ctx.set_text_scale(2.5);
    ctx.set_image_scale(0.5);
    ctx.disable_clip(&mut dev).unwrap();
    ctx.enable_clip(&mut dev, 1, 1, 2, 2).unwrap();
    ctx.set_blend_mode(&mut dev, BlendMode::Multiply).unwrap();
    stack.restore(&mut ctx, &mut dev).unwrap();

    assert_eq!(ctx, before);
    assert!(stack.is_empty());
}

#[test]
fn selective_restore_leaves_other_components() {
    let (mut stack, mut ctx, mut dev) = setup();
    let font = dev.load_font("f.fnt").unwrap();

    stack.save(&ctx, Some(ComponentSet::COLOR));
    ctx.set_color(Color::new(0.1, 0.2, 0.3, 0.4));
    ctx.set_font(Some(font.clone()));
    stack.restore(&mut ctx, &mut dev).unwrap();

    // COLOR covers RGB only; the alpha written by set_color stays.
    assert_eq!(ctx.color(), Color::new(1.0, 1.0, 1.0, 0.4));
    assert_eq!(ctx.font(), Some(&font));
}

#[test]
fn nested_restores_unwind_in_lifo_order() {
    let (mut stack, mut ctx, mut dev) = setup();

    stack.save(&ctx, Some(ComponentSet::POSITION));
    ctx.move_to(1.0, 1.0);
    stack.save(&ctx, Some(ComponentSet::POSITION));
    ctx.move_to(2.0, 2.0);
    assert_eq!(stack.depth(), 2);

    stack.restore(&mut ctx, &mut dev).unwrap();
    assert_eq!(ctx.absolute_x(), 1);
    stack.restore(&mut ctx, &mut dev).unwrap();
    assert_eq!(ctx.absolute_x(), 0);
    assert!(stack.restore(&mut ctx, &mut dev).is_err());
}

#[test]
fn pool_never_exceeds_max_depth() {
    let (mut stack, mut ctx, mut dev) = setup();

    for round in 0..50 {
        let depth = 1 + round % 4;
        for _ in 0..depth {
            stack.save(&ctx, Some(ComponentSet::ALPHA));
        }
        for _ in 0..depth {
            stack.restore(&mut ctx, &mut dev).unwrap();
        }
    }

    let st = stack.pool_stats();
    assert_eq!(st.constructed, 4);
    assert_eq!(st.free, 4);
    assert_eq!(st.allocations, (0..50u64).map(|r| 1 + r % 4).sum::<u64>());
}

#[test]
fn clip_restore_reissues_to_device() {
    let (mut stack, mut ctx, mut dev) = setup();
    ctx.enable_clip(&mut dev, 10, 10, 20, 20).unwrap();

    stack.save(&ctx, Some(ComponentSet::CLIP));
    ctx.disable_clip(&mut dev).unwrap();
    ctx.enable_clip(&mut dev, 30, 30, 40, 40).unwrap();
    dev.take_calls();

    stack.restore(&mut ctx, &mut dev).unwrap();
    assert_eq!(ctx.clip(), Some(ClipRegion::new(10, 10, 20, 20)));
    assert_eq!(
        dev.calls(),
        &[DeviceCall::EnableClip(ClipRegion::new(10, 10, 20, 20))]
    );
}

#[test]
fn restoring_a_disabled_clip_disables_device_clipping() {
    let (mut stack, mut ctx, mut dev) = setup();
    stack.save(&ctx, Some(ComponentSet::CLIP));
    ctx.enable_clip(&mut dev, 0, 0, 5, 5).unwrap();
    dev.take_calls();

    stack.restore(&mut ctx, &mut dev).unwrap();
    assert_eq!(ctx.clip(), None);
    assert_eq!(dev.calls(), &[DeviceCall::DisableClip]);
}

#[test]
fn blend_restore_always_hits_device() {
    let (mut stack, mut ctx, mut dev) = setup();
    stack.save(&ctx, Some(ComponentSet::BLEND_MODE));
    stack.restore(&mut ctx, &mut dev).unwrap();
    assert_eq!(dev.calls(), &[DeviceCall::BlendMode(BlendMode::Normal)]);
}

#[test]
fn non_device_components_restore_silently() {
    let (mut stack, mut ctx, mut dev) = setup();
    let subset = ComponentSet::all() - ComponentSet::CLIP - ComponentSet::BLEND_MODE;
    stack.save(&ctx, Some(subset));
    ctx.set_text_scale(4.0);
    stack.restore(&mut ctx, &mut dev).unwrap();
    assert_eq!(ctx.text_scale(), 1.0);
    assert!(dev.calls().is_empty());
}

#[test]
fn failed_restore_still_returns_snapshot_to_pool() {
    let (mut stack, mut ctx, mut dev) = setup();
    stack.save(&ctx, Some(ComponentSet::BLEND_MODE));
    dev.fail_next("device lost");

    let err = stack.restore(&mut ctx, &mut dev).unwrap_err();
    assert!(matches!(err, RenderError::Device(_)));
    assert!(stack.is_empty());
    assert_eq!(stack.pool_stats().free, 1);
}

#[test]
fn alpha_restore_brings_back_persistent_flag() {
    let (mut stack, mut ctx, mut dev) = setup();
    stack.save(&ctx, Some(ComponentSet::ALPHA));
    ctx.set_color_alpha(0.2);
    ctx.begin_frame();
    assert!(ctx.is_alpha_changed());

    stack.restore(&mut ctx, &mut dev).unwrap();
    assert!(!ctx.is_alpha_changed());
    assert_eq!(ctx.color().a, 1.0);
}
