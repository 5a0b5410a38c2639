//! Input Flags and Jump Latch
//!
//! Per-tick input sampled from the host (keyboard, touch, or a replay), and
//! the latch that turns a held jump key into exactly one impulse.

use serde::{Serialize, Deserialize};

// =============================================================================
// INPUT FLAGS
// =============================================================================

/// Input state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    /// Left direction held.
    pub left_held: bool,
    /// Right direction held.
    pub right_held: bool,
    /// Jump key currently held.
    pub jump_held: bool,
    /// Jump key went down since the previous tick.
    pub jump_pressed: bool,
}

impl InputFlags {
    /// No input.
    pub const IDLE: Self = Self {
        left_held: false,
        right_held: false,
        jump_held: false,
        jump_pressed: false,
    };

    /// Create input with directions only.
    pub const fn with_direction(left_held: bool, right_held: bool) -> Self {
        Self {
            left_held,
            right_held,
            jump_held: false,
            jump_pressed: false,
        }
    }

    /// A fresh jump press this tick (key down and held).
    pub const fn jump_press() -> Self {
        Self {
            left_held: false,
            right_held: false,
            jump_held: true,
            jump_pressed: true,
        }
    }

    /// Whether any direction is held (selects the friction factor).
    #[inline]
    pub fn has_direction(&self) -> bool {
        self.left_held || self.right_held
    }

    /// Whether a jump is being asked for this tick.
    #[inline]
    pub fn jump_requested(&self) -> bool {
        self.jump_held || self.jump_pressed
    }
}

// =============================================================================
// JUMP LATCH
// =============================================================================

/// Turns one key press into one jump impulse.
///
/// A press arms the latch. The armed request stays pending while the key is
/// held, so a press made mid-air fires on landing. Once fired, the latch stays
/// spent until the key is released or the actor lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpLatch {
    used: bool,
}

impl JumpLatch {
    /// Create an armed latch.
    pub const fn new() -> Self {
        Self { used: false }
    }

    /// Whether the current press already produced its impulse.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Observe this tick's input. Release re-arms; a fresh press implies one.
    #[inline]
    pub fn observe(&mut self, input: &InputFlags) {
        if input.jump_pressed || !input.jump_held {
            self.used = false;
        }
    }

    /// Re-arm once the actor is back on a surface.
    #[inline]
    pub fn reset_on_landing(&mut self, landed: bool) {
        if landed {
            self.used = false;
        }
    }

    /// Fire if a jump is requested, the latch is armed, and the actor is
    /// resting. Returns whether the impulse should be applied.
    #[inline]
    pub fn try_fire(&mut self, input: &InputFlags, resting: bool) -> bool {
        if input.jump_requested() && !self.used && resting {
            self.used = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flags() {
        assert!(!InputFlags::IDLE.has_direction());
        assert!(InputFlags::with_direction(true, false).has_direction());
        assert!(InputFlags::with_direction(true, true).has_direction());
    }

    #[test]
    fn test_held_key_fires_once_per_landing() {
        let mut latch = JumpLatch::new();
        let press = InputFlags::jump_press();
        let hold = InputFlags { jump_pressed: false, ..press };

        latch.observe(&press);
        latch.reset_on_landing(true);
        assert!(latch.try_fire(&press, true));

        // Held while airborne: spent
        for _ in 0..10 {
            latch.observe(&hold);
            latch.reset_on_landing(false);
            assert!(!latch.try_fire(&hold, true));
        }
        assert!(latch.is_used());

        // Landing re-arms a held key
        latch.observe(&hold);
        latch.reset_on_landing(true);
        assert!(!latch.is_used());
        assert!(latch.try_fire(&hold, true));
    }

    #[test]
    fn test_release_rearms() {
        let mut latch = JumpLatch::new();
        let press = InputFlags::jump_press();

        latch.observe(&press);
        assert!(latch.try_fire(&press, true));
        assert!(latch.is_used());

        latch.observe(&InputFlags::IDLE);
        assert!(!latch.is_used());
    }

    #[test]
    fn test_midair_press_is_buffered_until_resting() {
        let mut latch = JumpLatch::new();
        let press = InputFlags::jump_press();
        let hold = InputFlags { jump_pressed: false, ..press };

        latch.observe(&press);
        assert!(!latch.try_fire(&press, false));

        latch.observe(&hold);
        assert!(!latch.try_fire(&hold, false));

        latch.observe(&hold);
        assert!(latch.try_fire(&hold, true));
    }

    #[test]
    fn test_fresh_press_rearms_without_release_tick() {
        let mut latch = JumpLatch::new();
        let press = InputFlags::jump_press();

        latch.observe(&press);
        assert!(latch.try_fire(&press, true));

        latch.observe(&press);
        assert!(latch.try_fire(&press, true));
    }
}
