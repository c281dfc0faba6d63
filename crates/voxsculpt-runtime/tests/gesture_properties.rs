//! End-to-end behaviour of the sculpting pipeline, driven frame by frame
//! with synthetic hands.

use voxsculpt_perception::sim::{Pose, SimHand, tracker_frame};
use voxsculpt_runtime::{InteractionSession, RenderSnapshot, SculptConfig};
use voxsculpt_types::{Axis, Gesture, HandLabel, Mode, TrackerFrame};

// ── helpers ─────────────────────────────────────────────────────────────────

fn left(pose: Pose) -> SimHand {
    SimHand::new(HandLabel::Left, pose).at(0.7, 0.5)
}

fn right(pose: Pose) -> SimHand {
    SimHand::new(HandLabel::Right, pose).at(0.3, 0.5)
}

fn run(session: &mut InteractionSession, hands: &[SimHand], frames: usize) -> RenderSnapshot {
    let frame = tracker_frame(hands);
    let mut last = session.snapshot();
    for _ in 0..frames {
        last = session.process_frame(&frame);
    }
    last
}

fn nothing(session: &mut InteractionSession) -> RenderSnapshot {
    session.process_frame(&TrackerFrame::empty())
}

/// Pinch with the right hand long enough to start a stroke, then open the
/// palm to commit it.  Leaves exactly one voxel at "4.8,0.0,0.0".
fn place_one_voxel(session: &mut InteractionSession) -> RenderSnapshot {
    run(session, &[right(Pose::Pinch)], 40);
    let snap = run(session, &[right(Pose::OpenPalm)], 1);
    nothing(session);
    snap
}

// ── idle ────────────────────────────────────────────────────────────────────

#[test]
fn no_hands_settles_to_idle_with_zero_timers() {
    let mut s = InteractionSession::default();
    run(&mut s, &[left(Pose::Fist), right(Pose::Pinch)], 20);
    assert!(!s.timers().all_zero());

    for _ in 0..3 {
        let snap = nothing(&mut s);
        assert_eq!(snap.mode, Mode::Idle);
        assert!(snap.indicators.is_empty());
        assert!(snap.cursor.is_none());
    }
    assert!(s.timers().all_zero());
    assert!(!s.is_grabbing() && !s.is_building() && !s.is_erasing());
}

// ── grab ────────────────────────────────────────────────────────────────────

#[test]
fn grab_latches_once_per_hold_and_rearms_after_release() {
    let mut s = InteractionSession::default();
    let fist = tracker_frame(&[left(Pose::Fist)]);
    let open = tracker_frame(&[left(Pose::OpenPalm)]);

    let mut rising_edges = 0;
    let mut was = false;
    let mut step = |s: &mut InteractionSession, frame: &TrackerFrame| {
        s.process_frame(frame);
        if s.is_grabbing() && !was {
            rising_edges += 1;
        }
        was = s.is_grabbing();
    };

    for _ in 0..100 {
        step(&mut s, &fist);
    }
    step(&mut s, &open);
    assert!(!s.is_grabbing());
    assert_eq!(s.timers().elapsed_ms(Gesture::Grab), 0.0);

    // 31 frames is 496 ms: not yet
    for _ in 0..31 {
        step(&mut s, &fist);
    }
    assert!(!s.is_grabbing());
    step(&mut s, &fist);
    assert!(s.is_grabbing());
    assert_eq!(rising_edges, 2);
}

// ── reset ───────────────────────────────────────────────────────────────────

#[test]
fn reset_clears_grid_and_transform_and_beats_grab() {
    let mut s = InteractionSession::default();
    place_one_voxel(&mut s);
    // pan the scene with a grab
    run(&mut s, &[left(Pose::Fist)], 32);
    run(&mut s, &[left(Pose::Fist).at(0.6, 0.5)], 30);
    let snap = run(&mut s, &[left(Pose::Neutral)], 1);
    assert_eq!(snap.voxel_count, 1);
    assert!(!snap.transform.is_identity());

    let both = [left(Pose::Fist), right(Pose::Fist)];
    let snap = run(&mut s, &both, 62);
    assert_eq!(snap.mode, Mode::ResetHolding);
    assert!(!s.is_grabbing());
    assert_eq!(s.timers().elapsed_ms(Gesture::Grab), 0.0);

    let snap = run(&mut s, &both, 1);
    assert_eq!(snap.mode, Mode::ResetComplete);
    assert_eq!(snap.voxel_count, 0);
    assert!(snap.voxels.is_empty());
    assert!(snap.transform.is_identity());
}

#[test]
fn reset_discards_an_active_stroke() {
    let mut s = InteractionSession::default();
    run(&mut s, &[right(Pose::Pinch)], 40);
    assert!(s.is_building());
    run(&mut s, &[left(Pose::Fist), right(Pose::Fist)], 1);
    assert!(!s.is_building());
    assert_eq!(s.engine().len(), 0);
}

// ── build ───────────────────────────────────────────────────────────────────

#[test]
fn build_syncs_then_strokes_then_commits() {
    let mut s = InteractionSession::default();
    let snap = run(&mut s, &[right(Pose::Pinch)], 31);
    assert_eq!(snap.mode, Mode::BuildSyncing);
    let cursor = snap.cursor.expect("cursor while syncing");
    assert_eq!(cursor.key.to_string(), "4.8,0.0,0.0");

    let snap = run(&mut s, &[right(Pose::Pinch)], 1);
    assert_eq!(snap.mode, Mode::Building);
    assert!(snap.sketch.is_empty());

    // drag right-to-left in the image: +x in the scene
    run(&mut s, &[right(Pose::Pinch)], 1);
    run(&mut s, &[right(Pose::Pinch).at(0.25, 0.5)], 15);
    // then diagonally; y must be clamped onto the locked x line
    let snap = run(&mut s, &[right(Pose::Pinch).at(0.2, 0.4)], 15);
    assert_eq!(s.engine().locked_axis(), Some(Axis::X));
    let sketched = snap.sketch.len();
    assert!(sketched >= 3, "sketch {:?}", snap.sketch.keys());
    assert!(
        snap.sketch
            .keys()
            .all(|k| k.tenths(Axis::Y) == 0 && k.tenths(Axis::Z) == 0)
    );
    assert_eq!(snap.voxel_count, 0);

    let snap = run(&mut s, &[right(Pose::OpenPalm).at(0.2, 0.4)], 1);
    assert_eq!(snap.voxel_count, sketched);
    assert!(snap.sketch.is_empty());
    assert!(snap.voxels.values().all(|v| v.color == "#a5b4fc"));

    // releasing again commits nothing more
    let snap = run(&mut s, &[right(Pose::OpenPalm).at(0.2, 0.4)], 5);
    assert_eq!(snap.voxel_count, sketched);
}

#[test]
fn committed_snapshot_is_unaffected_by_later_edits() {
    let mut s = InteractionSession::default();
    let before = place_one_voxel(&mut s);
    assert_eq!(before.voxels.len(), 1);
    run(&mut s, &[left(Pose::Fist), right(Pose::Fist)], 63);
    assert_eq!(s.engine().len(), 0);
    assert_eq!(before.voxels.len(), 1);
}

// ── erase ───────────────────────────────────────────────────────────────────

#[test]
fn erase_locks_then_removes_the_targeted_voxel() {
    let mut s = InteractionSession::default();
    place_one_voxel(&mut s);
    assert_eq!(s.engine().len(), 1);

    // pointing tip sits 0.1 above the PIP, so lower the hand to aim at y 0.5
    let hands = [left(Pose::Pinch), right(Pose::Point).at(0.3, 0.6)];
    let snap = run(&mut s, &hands, 31);
    assert_eq!(snap.mode, Mode::EraseLocking);
    assert!(snap.cursor.is_some_and(|c| c.erase));
    assert_eq!(snap.voxel_count, 1);

    let snap = run(&mut s, &hands, 1);
    assert_eq!(snap.mode, Mode::Erasing);
    assert_eq!(snap.voxel_count, 0);
}

#[test]
fn erase_on_empty_cell_is_noop() {
    let mut s = InteractionSession::default();
    place_one_voxel(&mut s);
    let hands = [left(Pose::Pinch), right(Pose::Point).at(0.5, 0.6)];
    let snap = run(&mut s, &hands, 50);
    assert_eq!(snap.mode, Mode::Erasing);
    assert_eq!(snap.voxel_count, 1);
}

// ── color cycle ─────────────────────────────────────────────────────────────

#[test]
fn peace_cycles_once_per_hold_and_wraps() {
    let mut cfg = SculptConfig::default();
    cfg.palette.truncate(5);
    let mut s = InteractionSession::new(cfg).expect("valid config");
    s.set_palette_index(4);

    let peace = [right(Pose::Peace)];
    let snap = run(&mut s, &peace, 31);
    assert_eq!(snap.palette_index, 4);
    let snap = run(&mut s, &peace, 1);
    assert_eq!(snap.palette_index, 0);

    // still holding: no further advance
    let snap = run(&mut s, &peace, 100);
    assert_eq!(snap.palette_index, 0);
    assert_eq!(snap.mode, Mode::CyclingColor);

    // curling the fingers drops the peace sign within two smoothed frames
    run(&mut s, &[right(Pose::Fist)], 3);
    let snap = run(&mut s, &peace, 32);
    assert_eq!(snap.palette_index, 1);
}

#[test]
fn new_color_applies_to_next_commit() {
    let mut s = InteractionSession::default();
    run(&mut s, &[right(Pose::Peace)], 32);
    nothing(&mut s);
    let snap = place_one_voxel(&mut s);
    assert!(snap.voxels.values().all(|v| v.color == "#fda4af"));
}

// ── clock ───────────────────────────────────────────────────────────────────

#[test]
fn timestamp_clock_uses_real_gaps() {
    let mut cfg = SculptConfig::default();
    cfg.clock = voxsculpt_kernel::ClockMode::Timestamp;
    let mut s = InteractionSession::new(cfg).expect("valid config");

    let mut frame = tracker_frame(&[left(Pose::Fist)]);
    for i in 0..5 {
        frame.timestamp_ms = Some(1000.0 + 100.0 * i as f64);
        s.process_frame(&frame);
    }
    // 16 + 4 * 100 ms
    assert!(!s.is_grabbing());
    frame.timestamp_ms = Some(1500.0);
    s.process_frame(&frame);
    assert!(s.is_grabbing());
}

fn timestamp_session() -> InteractionSession {
    let mut cfg = SculptConfig::default();
    cfg.clock = voxsculpt_kernel::ClockMode::Timestamp;
    InteractionSession::new(cfg).expect("valid config")
}

#[test]
fn tracker_stall_does_not_confirm_a_hold() {
    let mut s = timestamp_session();

    let mut empty = TrackerFrame::empty();
    empty.timestamp_ms = Some(0.0);
    s.process_frame(&empty);

    let mut pinch = tracker_frame(&[right(Pose::Pinch)]);
    pinch.timestamp_ms = Some(3000.0);
    let snap = s.process_frame(&pinch);
    assert_eq!(snap.mode, Mode::BuildSyncing);

    // a stall in the middle of a hold is credited as a single tick too
    pinch.timestamp_ms = Some(3050.0);
    s.process_frame(&pinch);
    pinch.timestamp_ms = Some(9000.0);
    let snap = s.process_frame(&pinch);
    assert_eq!(snap.mode, Mode::BuildSyncing);
    let build = s.timers().elapsed_ms(Gesture::Build);
    assert!((build - 82.0).abs() < 1e-3, "build elapsed {build}");
}

// ── pinch ───────────────────────────────────────────────────────────────────

#[test]
fn pinch_ignores_depth_separation_by_default() {
    let mut s = InteractionSession::default();
    let snap = run(&mut s, &[right(Pose::Pinch).thumb_depth_offset(0.06)], 1);
    assert_eq!(snap.mode, Mode::BuildSyncing);

    let mut cfg = SculptConfig::default();
    cfg.pinch_uses_depth = true;
    let mut s = InteractionSession::new(cfg).expect("valid config");
    let snap = run(&mut s, &[right(Pose::Pinch).thumb_depth_offset(0.06)], 1);
    assert_eq!(snap.mode, Mode::Idle);
}
