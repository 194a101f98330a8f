//! The single source of truth for the scene's discrete mode.
//!
//! The UI toggle and the gesture classifier both commit through the same
//! [`ModeSwitch`], so neither can act on a stale copy of the other's state.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// TreeMode
// ════════════════════════════════════════════════════════════════════════════

/// The two configurations every entity interpolates between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeMode {
    /// Scattered cloud ("unleashed").
    Chaos,
    /// Assembled tree ("restored").
    Formed,
}

impl TreeMode {
    pub fn toggled(self) -> Self {
        match self {
            TreeMode::Chaos  => TreeMode::Formed,
            TreeMode::Formed => TreeMode::Chaos,
        }
    }

    pub fn is_formed(self) -> bool { self == TreeMode::Formed }

    pub fn name(self) -> &'static str {
        match self {
            TreeMode::Chaos  => "CHAOS",
            TreeMode::Formed => "FORMED",
        }
    }
}

impl fmt::Display for TreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ModeChange: the edge-triggered notification
// ════════════════════════════════════════════════════════════════════════════

/// Who asked for a mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeSource {
    /// Explicit UI / keyboard toggle.
    Toggle,
    /// Confirmed hand gesture.
    Gesture,
}

/// Emitted exactly once per committed transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub mode:   TreeMode,
    pub source: ModeSource,
}

// ════════════════════════════════════════════════════════════════════════════
// ModeSwitch
// ════════════════════════════════════════════════════════════════════════════

/// Holds the current [`TreeMode`].  Changes are atomic: there is no
/// transitional state, the motion model does the catching up.
#[derive(Clone, Debug)]
pub struct ModeSwitch {
    mode:    TreeMode,
    changes: u64,
}

impl ModeSwitch {
    pub fn new(mode: TreeMode) -> Self {
        ModeSwitch { mode, changes: 0 }
    }

    pub fn mode(&self) -> TreeMode { self.mode }

    /// Number of committed transitions so far.
    pub fn changes(&self) -> u64 { self.changes }

    /// Commit `mode`.  Returns `None` when it is already current, so callers
    /// never emit redundant change events.
    pub fn set(&mut self, mode: TreeMode, source: ModeSource) -> Option<ModeChange> {
        if self.mode == mode {
            return None;
        }
        self.mode = mode;
        self.changes += 1;
        log::info!("mode -> {} ({:?})", mode, source);
        Some(ModeChange { mode, source })
    }

    /// Flip the mode.  Always produces a change.
    pub fn toggle(&mut self, source: ModeSource) -> ModeChange {
        let next = self.mode.toggled();
        self.set(next, source)
            .unwrap_or(ModeChange { mode: next, source })
    }
}

impl Default for ModeSwitch {
    fn default() -> Self { ModeSwitch::new(TreeMode::Formed) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
