//! [`InteractionSession`] – the per-callback sculpting pipeline.
//!
//! Each call to [`InteractionSession::process_frame`] runs one tracker
//! callback to completion:
//!
//! 1. **Ingest** – validate each hand (a degenerate one is dropped with a
//!    warning), smooth it, and forget the smoothing state of labels that
//!    were not reported.
//! 2. **Classify** – compute a [`HandPose`] per hand.
//! 3. **Arbitrate** – let the `Reset > Rotate > Cycle` tiers claim the
//!    frame.  A claim releases every single-hand activity.
//! 4. **Single-hand** – otherwise run the left-hand grab, then right-hand
//!    erase/build.
//! 5. **Publish** – return a [`RenderSnapshot`].
//!
//! A frame with no usable hand zeroes every timer, drops every activity and
//! settles on [`Mode::Idle`].
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_perception::sim::{Pose, SimHand, tracker_frame};
//! use voxsculpt_runtime::session::InteractionSession;
//! use voxsculpt_types::{HandLabel, Mode, TrackerFrame};
//!
//! let mut session = InteractionSession::default();
//! assert_eq!(session.process_frame(&TrackerFrame::empty()).mode, Mode::Idle);
//!
//! let fists = tracker_frame(&[
//!     SimHand::new(HandLabel::Left, Pose::Fist),
//!     SimHand::new(HandLabel::Right, Pose::Fist),
//! ]);
//! assert_eq!(session.process_frame(&fists).mode, Mode::ResetHolding);
//! ```

use tracing::{debug, info, warn};
use voxsculpt_edit::{Palette, SceneTransformController, VoxelEditEngine};
use voxsculpt_kernel::{
    Claim, FrameClock, GestureArbiter, GestureTimers, PosePair, RightHandIntent, Tier,
    resolve_right_hand,
};
use voxsculpt_perception::{CoordinateMapper, Hand, HandPose, LandmarkSmoother, PinchDetector};
use voxsculpt_types::{Gesture, HandLabel, Mode, SculptError, TrackerFrame, VoxelKey};

use crate::config::SculptConfig;
use crate::snapshot::{Cursor, ProgressIndicator, RenderSnapshot, ScreenPoint};

/// Per-frame HUD output that does not live in the persistent state.
#[derive(Debug, Clone, Default)]
struct FrameOutput {
    indicators: Vec<ProgressIndicator>,
    cursor: Option<Cursor>,
}

impl FrameOutput {
    fn indicate(
        &mut self,
        gesture: Gesture,
        progress: f32,
        at: impl Into<ScreenPoint>,
        tint: Option<String>,
    ) {
        self.indicators.push(ProgressIndicator {
            gesture,
            progress,
            anchor: at.into(),
            tint,
        });
    }
}

pub struct InteractionSession {
    config: SculptConfig,
    smoother: LandmarkSmoother,
    pinch: PinchDetector,
    clock: FrameClock,
    timers: GestureTimers,
    arbiter: GestureArbiter,
    mapper: CoordinateMapper,
    engine: VoxelEditEngine,
    scene: SceneTransformController,
    palette: Palette,
    erasing: bool,
    mode: Mode,
    frame: u64,
    hand_count: usize,
    output: FrameOutput,
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::build(SculptConfig::default())
    }
}

impl InteractionSession {
    /// Create a session from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SculptError::Config`] when `config` fails
    /// [`SculptConfig::validate`].
    pub fn new(config: SculptConfig) -> Result<Self, SculptError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SculptConfig) -> Self {
        Self {
            smoother: LandmarkSmoother::new(config.lateral_blend, config.depth_blend),
            pinch: config.pinch_detector(),
            clock: FrameClock::new(config.clock, config.frame_tick_ms)
                .with_max_gap(config.max_frame_gap_ms),
            timers: GestureTimers::new(config.hold_durations()),
            arbiter: GestureArbiter::standard(),
            mapper: config.mapper(),
            engine: VoxelEditEngine::new(config.axis_lock_dead_zone),
            scene: SceneTransformController::new(config.rotate_gain, config.rotate_bias),
            palette: Palette::new(config.palette.clone()),
            erasing: false,
            mode: Mode::Idle,
            frame: 0,
            hand_count: 0,
            output: FrameOutput::default(),
            config,
        }
    }

    // ── accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &SculptConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timers(&self) -> &GestureTimers {
        &self.timers
    }

    pub fn engine(&self) -> &VoxelEditEngine {
        &self.engine
    }

    pub fn scene(&self) -> &SceneTransformController {
        &self.scene
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Jump to palette entry `index` (modulo the palette length).
    pub fn set_palette_index(&mut self, index: usize) {
        self.palette.set_active(index);
    }

    pub fn is_grabbing(&self) -> bool {
        self.scene.is_grabbing()
    }

    pub fn is_building(&self) -> bool {
        self.engine.is_stroking()
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    pub fn frames_processed(&self) -> u64 {
        self.frame
    }

    // ── pipeline ────────────────────────────────────────────────────────────

    /// Run one tracker callback through the whole pipeline.
    pub fn process_frame(&mut self, frame: &TrackerFrame) -> RenderSnapshot {
        self.frame += 1;
        self.hand_count = frame.hand_count();
        self.output = FrameOutput::default();
        let dt_ms = self.clock.advance(frame.timestamp_ms);

        let (left, right) = self.ingest(frame);
        let mode = if left.is_none() && right.is_none() {
            self.go_idle();
            Mode::Idle
        } else {
            self.step(left.as_ref(), right.as_ref(), dt_ms)
        };

        if mode != self.mode {
            debug!(frame = self.frame, from = %self.mode, to = %mode, "mode changed");
        }
        self.mode = mode;
        self.snapshot()
    }

    /// The state as of the last processed frame.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            frame: self.frame,
            mode: self.mode,
            voxels: self.engine.committed(),
            sketch: self.engine.sketch().clone(),
            transform: self.scene.transform(),
            indicators: self.output.indicators.clone(),
            cursor: self.output.cursor,
            hand_count: self.hand_count,
            voxel_count: self.engine.len(),
            palette_index: self.palette.active_index(),
            active_color: self.palette.active_hex().to_string(),
        }
    }

    fn ingest(&mut self, frame: &TrackerFrame) -> (Option<Hand>, Option<Hand>) {
        let mut left = None;
        let mut right = None;
        let mut seen_left = false;
        let mut seen_right = false;

        for hand_frame in frame.hands.iter().flatten() {
            match hand_frame.label {
                HandLabel::Left => seen_left = true,
                HandLabel::Right => seen_right = true,
            }
            let raw = match Hand::try_from(hand_frame) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(frame = self.frame, %err, "treating hand as absent");
                    continue;
                }
            };
            let smoothed = *self.smoother.smooth(raw.label(), raw.landmarks());
            let hand = Hand::new(raw.label(), smoothed);
            match hand.label() {
                HandLabel::Left => left = Some(hand),
                HandLabel::Right => right = Some(hand),
            }
        }

        if !seen_left {
            self.smoother.forget(HandLabel::Left);
        }
        if !seen_right {
            self.smoother.forget(HandLabel::Right);
        }
        (left, right)
    }

    fn go_idle(&mut self) {
        // hold time never spans a stretch with no hands
        self.clock.reset();
        self.engine.cancel_stroke();
        self.scene.release_grab();
        self.erasing = false;
        self.timers.reset_all();
    }

    fn step(&mut self, left: Option<&Hand>, right: Option<&Hand>, dt_ms: f32) -> Mode {
        let poses = PosePair::new(
            HandPose::classify(left, &self.pinch),
            HandPose::classify(right, &self.pinch),
        );

        if let Some(claim) = self.arbiter.arbitrate(&poses, &mut self.timers, dt_ms) {
            return self.run_exclusive(claim, &poses, left, right);
        }

        self.run_grab(&poses, left, dt_ms);
        match self.run_right_hand(&poses, right, dt_ms) {
            Some(mode) => mode,
            None if self.scene.is_grabbing() => Mode::Grabbing,
            None => Mode::Idle,
        }
    }

    // ── exclusive tiers ─────────────────────────────────────────────────────

    fn run_exclusive(
        &mut self,
        claim: Claim,
        poses: &PosePair,
        left: Option<&Hand>,
        right: Option<&Hand>,
    ) -> Mode {
        if claim.tier == Tier::Reset {
            self.engine.cancel_stroke();
        } else {
            self.release_stroke();
        }
        self.erasing = false;
        self.scene.release_grab();

        let centre = ScreenPoint::centre();
        let tick = claim.tick;
        match claim.tier {
            Tier::Reset => {
                self.output.indicate(Gesture::Reset, tick.progress, centre, None);
                if tick.confirmed {
                    let cleared = self.engine.len();
                    self.engine.hard_reset();
                    self.scene.reset();
                    info!(frame = self.frame, cleared, "hard reset");
                    Mode::ResetComplete
                } else {
                    Mode::ResetHolding
                }
            }
            Tier::Rotate => {
                self.output.indicate(Gesture::Rotate, tick.progress, centre, None);
                if !tick.confirmed {
                    return Mode::RotateEnabling;
                }
                if let (Some(l), Some(r)) = (left, right) {
                    self.scene.apply_rotation_delta(l.middle_mcp(), r.middle_mcp());
                }
                Mode::Rotating
            }
            Tier::Cycle => {
                let signer = if poses.right.peace { right } else { left };
                let tint = Some(self.palette.active_hex().to_string());
                if let Some(hand) = signer {
                    self.output
                        .indicate(Gesture::Cycle, tick.progress, hand.middle_mcp(), tint);
                }
                if tick.confirmed {
                    let index = self.palette.advance();
                    info!(frame = self.frame, index, color = self.palette.active_hex(), "palette cycled");
                }
                Mode::CyclingColor
            }
        }
    }

    // ── single-hand gestures ────────────────────────────────────────────────

    fn run_grab(&mut self, poses: &PosePair, left: Option<&Hand>, dt_ms: f32) {
        let holding = poses.grab_condition();
        let tick = self.timers.tick(Gesture::Grab, holding, dt_ms);

        let Some(hand) = left.filter(|_| holding) else {
            if self.scene.is_grabbing() {
                self.scene.release_grab();
                debug!(frame = self.frame, "grab released");
            }
            return;
        };

        if tick.confirmed {
            let world = self.mapper.to_world_planar(hand.middle_mcp());
            if !self.scene.is_grabbing() {
                self.scene.latch_grab(world);
            }
            self.scene.apply_grab(world);
        } else {
            self.output
                .indicate(Gesture::Grab, tick.progress, hand.wrist(), None);
        }
    }

    /// Returns the right hand's mode, or `None` when it is doing nothing.
    fn run_right_hand(
        &mut self,
        poses: &PosePair,
        right: Option<&Hand>,
        dt_ms: f32,
    ) -> Option<Mode> {
        let Some(hand) = right else {
            // tracking loss never places voxels
            self.engine.cancel_stroke();
            self.end_right_hand();
            return None;
        };

        let Some(intent) = resolve_right_hand(poses, self.scene.is_grabbing()) else {
            self.release_stroke();
            self.end_right_hand();
            return None;
        };

        let tip = hand.index_tip();
        let key = self.mapper.key_for(tip, &self.scene.transform());
        let erase = intent == RightHandIntent::Erase;
        self.output.cursor = Some(self.cursor(key, erase));

        match intent {
            RightHandIntent::Erase => {
                self.timers.reset(Gesture::Build);
                self.release_stroke();
                let tick = self.timers.tick(Gesture::Erase, true, dt_ms);
                if !tick.confirmed {
                    self.output.indicate(Gesture::Erase, tick.progress, tip, None);
                    return Some(Mode::EraseLocking);
                }
                if !self.erasing {
                    self.erasing = true;
                    debug!(frame = self.frame, "eraser locked");
                }
                self.engine.erase(&key);
                Some(Mode::Erasing)
            }
            RightHandIntent::Build => {
                self.timers.reset(Gesture::Erase);
                self.erasing = false;
                let tick = self.timers.tick(Gesture::Build, true, dt_ms);
                if !tick.confirmed {
                    let tint = Some(self.palette.active_hex().to_string());
                    self.output.indicate(Gesture::Build, tick.progress, tip, tint);
                    return Some(Mode::BuildSyncing);
                }
                if self.engine.is_stroking() {
                    self.engine.extend_stroke(key);
                } else {
                    self.engine.begin_stroke(key);
                }
                Some(Mode::Building)
            }
        }
    }

    fn end_right_hand(&mut self) {
        self.erasing = false;
        self.timers.reset(Gesture::Build);
        self.timers.reset(Gesture::Erase);
    }

    /// Commit the active stroke, if any, in the active color.
    fn release_stroke(&mut self) {
        if self.engine.is_stroking() {
            let color = self.palette.active_hex().to_string();
            self.engine.commit_stroke(&color);
        }
    }

    fn cursor(&self, key: VoxelKey, erase: bool) -> Cursor {
        Cursor {
            key,
            world: self.scene.transform().to_world(key.position()),
            erase,
        }
    }
}
