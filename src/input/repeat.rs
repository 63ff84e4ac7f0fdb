//! Held-key auto-repeat for terminal environments.
//!
//! A directional key fires one immediate move on press; repeats start only
//! after an initial delay and then fire at a fixed cadence. Left, right, and
//! soft-drop are tracked independently in a small fixed-size structure owned
//! by the driver. The driver asks `wants_repeat` each tick and records the
//! repeat only when the engine accepted the move, so a piece pressed against
//! a wall does not burn its cadence.
//!
//! Most terminals never emit key-release events, so each held key also
//! remembers when an event last confirmed it and is force-released after a
//! short silence. Terminal auto-repeat keeps refreshing held keys; real
//! releases are honored immediately where the terminal reports them.

use crate::types::{DEFAULT_RELEASE_TIMEOUT_MS, INITIAL_MOVE_DELAY_MS, MOVE_REPEAT_DELAY_MS};

/// Horizontal repeat direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatDir {
    Left,
    Right,
}

impl RepeatDir {
    pub const BOTH: [RepeatDir; 2] = [RepeatDir::Left, RepeatDir::Right];

    /// Column delta of one move in this direction
    pub fn dx(self) -> i8 {
        match self {
            RepeatDir::Left => -1,
            RepeatDir::Right => 1,
        }
    }
}

/// Hold state for one key: press time, last repeat time, and the last
/// moment any event confirmed the key (for auto-release)
#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    pressed_at: Option<u64>,
    last_repeat: u64,
    last_seen: u64,
}

impl HeldKey {
    /// Returns true when the key was not held before (the press edge)
    fn press(&mut self, now_ms: u64) -> bool {
        self.last_seen = now_ms;
        if self.pressed_at.is_some() {
            return false;
        }
        self.pressed_at = Some(now_ms);
        self.last_repeat = 0;
        true
    }

    fn release(&mut self) {
        self.pressed_at = None;
    }

    fn release_if_stale(&mut self, now_ms: u64, timeout_ms: u64) {
        if self.pressed_at.is_some() && now_ms.saturating_sub(self.last_seen) > timeout_ms {
            self.pressed_at = None;
        }
    }
}

/// Per-direction held-key timers, owned by the driver and passed by
/// reference into the evaluation calls
#[derive(Debug, Clone)]
pub struct MoveRepeat {
    left: HeldKey,
    right: HeldKey,
    soft_drop: HeldKey,
    initial_delay_ms: u64,
    repeat_delay_ms: u64,
    release_timeout_ms: u64,
}

impl MoveRepeat {
    pub fn new() -> Self {
        Self::with_delays(INITIAL_MOVE_DELAY_MS, MOVE_REPEAT_DELAY_MS)
    }

    pub fn with_delays(initial_delay_ms: u64, repeat_delay_ms: u64) -> Self {
        Self {
            left: HeldKey::default(),
            right: HeldKey::default(),
            soft_drop: HeldKey::default(),
            initial_delay_ms,
            repeat_delay_ms,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    fn key(&self, dir: RepeatDir) -> &HeldKey {
        match dir {
            RepeatDir::Left => &self.left,
            RepeatDir::Right => &self.right,
        }
    }

    fn key_mut(&mut self, dir: RepeatDir) -> &mut HeldKey {
        match dir {
            RepeatDir::Left => &mut self.left,
            RepeatDir::Right => &mut self.right,
        }
    }

    /// Register a press (or a terminal auto-repeat of one). Returns true on
    /// the press edge, where the driver fires the single immediate move.
    pub fn press(&mut self, dir: RepeatDir, now_ms: u64) -> bool {
        self.key_mut(dir).press(now_ms)
    }

    pub fn release(&mut self, dir: RepeatDir) {
        self.key_mut(dir).release();
    }

    pub fn press_soft_drop(&mut self, now_ms: u64) {
        self.soft_drop.press(now_ms);
    }

    pub fn release_soft_drop(&mut self) {
        self.soft_drop.release();
    }

    /// Whether the gravity interval should run at the fast soft-drop rate
    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop.pressed_at.is_some()
    }

    /// Force-release keys no event has confirmed within the release
    /// timeout. Call once per tick, before evaluating repeats.
    pub fn refresh(&mut self, now_ms: u64) {
        self.left.release_if_stale(now_ms, self.release_timeout_ms);
        self.right.release_if_stale(now_ms, self.release_timeout_ms);
        self.soft_drop.release_if_stale(now_ms, self.release_timeout_ms);
    }

    /// Whether a held direction is due for a repeated move: held past the
    /// initial delay, and at least one repeat interval since the last one
    pub fn wants_repeat(&self, dir: RepeatDir, now_ms: u64) -> bool {
        let key = self.key(dir);
        match key.pressed_at {
            Some(pressed) => {
                now_ms.saturating_sub(pressed) >= self.initial_delay_ms
                    && now_ms.saturating_sub(key.last_repeat) >= self.repeat_delay_ms
            }
            None => false,
        }
    }

    /// Record that a repeat actually moved the piece, restarting its cadence
    pub fn record_repeat(&mut self, dir: RepeatDir, now_ms: u64) {
        self.key_mut(dir).last_repeat = now_ms;
    }

    pub fn reset(&mut self) {
        self.left = HeldKey::default();
        self.right = HeldKey::default();
        self.soft_drop = HeldKey::default();
    }
}

impl Default for MoveRepeat {
    fn default() -> Self {
        Self::new()
    }
}
