//! Debounce properties over arbitrary frame streams.

use hand_gesture::{GestureClassifier, HandLandmarks, Landmark, Vote, LANDMARK_COUNT};
use proptest::prelude::*;
use tree_motion::{ModeSwitch, TreeMode};

const WRIST: usize = 0;
/// (tip, base) for thumb, index, middle, ring, pinky.
const DIGITS: [(usize, usize); 5] = [(4, 2), (8, 5), (12, 9), (16, 13), (20, 17)];

fn hand_with(extended: usize) -> HandLandmarks {
    let wrist = Landmark::new(0.5, 0.75, 0.0);
    let mut pts = [wrist; LANDMARK_COUNT];
    pts[WRIST] = wrist;
    for (k, &(tip, base)) in DIGITS.iter().enumerate() {
        let dx = (k as f32 - 2.0) * 0.0625;
        let b = Landmark::new(wrist.x + dx, wrist.y - 0.125, 0.0);
        pts[base] = b;
        pts[tip] = if k < extended {
            Landmark::new(wrist.x + 2.0 * dx, wrist.y - 0.25, 0.0)
        } else {
            b
        };
    }
    HandLandmarks::new(pts)
}

/// `None` = no hand, `Some(n)` = n digits extended.
fn frames() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::weighted(0.85, 0usize..=5), 0..200)
}

proptest! {
    #[test]
    fn counters_are_exclusive_and_commits_follow_a_full_run(stream in frames()) {
        let mut c = GestureClassifier::default();
        let mut mode = ModeSwitch::new(TreeMode::Formed);
        let hands: Vec<Option<HandLandmarks>> = stream.iter().map(|f| f.map(hand_with)).collect();
        let mut expected = TreeMode::Formed;

        for frame in &hands {
            let out = c.observe(frame.as_ref(), &mut mode);
            let s = c.state();
            prop_assert!(s.open_frames() == 0 || s.closed_frames() == 0);

            if let Some(change) = out.mode_change {
                match change.mode {
                    TreeMode::Chaos => {
                        prop_assert_eq!(out.vote, Vote::Open);
                        prop_assert_eq!(s.open_frames(), 6);
                    }
                    TreeMode::Formed => {
                        prop_assert_eq!(out.vote, Vote::Closed);
                        prop_assert_eq!(s.closed_frames(), 6);
                    }
                }
                prop_assert_ne!(change.mode, expected);
                expected = change.mode;
            }
            prop_assert_eq!(mode.mode(), expected);
        }
    }

    #[test]
    fn short_runs_never_commit(runs in prop::collection::vec((1usize..=5, prop::bool::ANY), 0..40)) {
        let mut c = GestureClassifier::default();
        let mut mode = ModeSwitch::new(TreeMode::Formed);
        let ambiguous = hand_with(3);
        for (len, open) in runs {
            let h = hand_with(if open { 5 } else { 0 });
            for _ in 0..len {
                prop_assert!(c.observe(Some(&h), &mut mode).mode_change.is_none());
            }
            c.observe(Some(&ambiguous), &mut mode);
        }
        prop_assert_eq!(mode.changes(), 0);
    }

    #[test]
    fn absent_frames_never_commit(prefix in 0usize..6, gap in 1usize..50) {
        let mut c = GestureClassifier::default();
        let mut mode = ModeSwitch::new(TreeMode::Formed);
        let open = hand_with(5);
        for _ in 0..prefix {
            c.observe(Some(&open), &mut mode);
        }
        for _ in 0..gap {
            let out = c.observe(None, &mut mode);
            prop_assert!(out.mode_change.is_none());
            prop_assert!(!out.hand.detected);
        }
        prop_assert_eq!(c.state().open_frames() as usize, prefix.saturating_sub(gap));
    }
}
