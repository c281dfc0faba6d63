//! Capture replay – feed a recorded JSON-lines tracker capture through an
//! [`InteractionSession`].
//!
//! A capture holds one [`TrackerFrame`] per line:
//!
//! ```text
//! {"hands":[{"label":"Right","landmarks":[{"x":0.3,"y":0.5,"z":0.0}, ...]}],"timestamp_ms":1000.0}
//! {"hands":null}
//! ```
//!
//! Blank lines are skipped; line numbers in errors are 1-based.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};
use voxsculpt_runtime::{InteractionSession, RenderSnapshot};
use voxsculpt_types::{Mode, SculptError, TrackerFrame};

/// A mode change observed during replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub frame: u64,
    pub from: Mode,
    pub to: Mode,
}

#[derive(Debug, Clone)]
pub struct ReplaySummary {
    /// Frames actually processed (fewer than the capture when interrupted).
    pub frames: usize,
    pub transitions: Vec<Transition>,
    pub interrupted: bool,
    pub last: RenderSnapshot,
}

/// Read and parse the capture file at `path`.
pub fn read_capture(path: &Path) -> Result<Vec<TrackerFrame>, SculptError> {
    let file = File::open(path)
        .map_err(|e| SculptError::Io(format!("cannot open {}: {e}", path.display())))?;
    let frames = parse_capture(BufReader::new(file))?;
    info!(path = %path.display(), frames = frames.len(), "capture loaded");
    Ok(frames)
}

pub fn parse_capture<R: BufRead>(reader: R) -> Result<Vec<TrackerFrame>, SculptError> {
    let mut frames = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SculptError::Io(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let frame = serde_json::from_str::<TrackerFrame>(&line).map_err(|e| {
            SculptError::Capture {
                line: idx + 1,
                message: e.to_string(),
            }
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Run `frames` through `session` in order, stopping early once `stop` is
/// set.  `on_transition` sees every mode change as it happens.
pub fn replay(
    session: &mut InteractionSession,
    frames: &[TrackerFrame],
    stop: &AtomicBool,
    mut on_transition: impl FnMut(&Transition),
) -> ReplaySummary {
    let mut transitions = Vec::new();
    let mut processed = 0;
    let mut interrupted = false;
    let mut last = session.snapshot();

    for frame in frames {
        if stop.load(Ordering::SeqCst) {
            interrupted = true;
            break;
        }
        let from = session.mode();
        last = session.process_frame(frame);
        processed += 1;
        if last.mode != from {
            let t = Transition {
                frame: last.frame,
                from,
                to: last.mode,
            };
            on_transition(&t);
            transitions.push(t);
        }
    }

    debug!(processed, interrupted, "replay finished");
    ReplaySummary {
        frames: processed,
        transitions,
        interrupted,
        last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use voxsculpt_perception::sim::{Pose, SimHand, tracker_frame};
    use voxsculpt_types::HandLabel;

    fn line(frame: &TrackerFrame) -> String {
        serde_json::to_string(frame).unwrap()
    }

    fn pinch_capture(frames: usize) -> String {
        let pinch = tracker_frame(&[SimHand::new(HandLabel::Right, Pose::Pinch).at(0.3, 0.5)]);
        let palm = tracker_frame(&[SimHand::new(HandLabel::Right, Pose::OpenPalm).at(0.3, 0.5)]);
        let mut out = String::new();
        for _ in 0..frames {
            out.push_str(&line(&pinch));
            out.push('\n');
        }
        out.push_str(&line(&palm));
        out.push('\n');
        out
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "{\"hands\":null}\n\n   \n{\"hands\":[]}\n";
        let frames = parse_capture(Cursor::new(text)).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].hand_count(), 0);
    }

    #[test]
    fn bad_line_reports_its_number() {
        let text = "{\"hands\":null}\n\nnot json\n";
        let err = parse_capture(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, SculptError::Capture { line: 3, .. }), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_capture(&dir.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, SculptError::Io(_)));
    }

    #[test]
    fn replay_builds_and_commits_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(pinch_capture(40).as_bytes()).unwrap();

        let frames = read_capture(file.path()).unwrap();
        let mut session = InteractionSession::default();
        let mut seen = Vec::new();
        let summary = replay(&mut session, &frames, &AtomicBool::new(false), |t| {
            seen.push(t.to)
        });

        assert_eq!(summary.frames, 41);
        assert!(!summary.interrupted);
        assert_eq!(summary.last.voxel_count, 1);
        assert_eq!(seen, vec![Mode::BuildSyncing, Mode::Building, Mode::Idle]);
        assert_eq!(summary.transitions.len(), 3);
    }

    #[test]
    fn stop_flag_halts_replay() {
        let frames = parse_capture(Cursor::new(pinch_capture(10))).unwrap();
        let mut session = InteractionSession::default();
        let summary = replay(&mut session, &frames, &AtomicBool::new(true), |_| {});
        assert!(summary.interrupted);
        assert_eq!(summary.frames, 0);
        assert_eq!(session.frames_processed(), 0);
    }
}
