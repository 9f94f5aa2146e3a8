//! # Movement State
//!
//! The discrete state of a moving entity and its transition rules: flight mode and its
//! toggle latch, jumping, swimming, the surrounding medium, and the per-side wall
//! contacts collision resolution keeps between ticks.

use log::debug;

/// The fluid an entity is submerged in, used by the host to pick a screen effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Medium {
    /// Air
    #[default]
    None,
    /// Water
    Water,
    /// Lava
    Lava,
}

/// One side of an axis: index `2 * axis + 1` for the positive side, `2 * axis` for the
/// negative side.
///
/// The order is: [XNEG, XPOS, YNEG, YPOS, ZNEG, ZPOS]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSide(usize);

impl WallSide {
    /// The side of `axis` (0 = X, 1 = Y, 2 = Z) that `positive` names.
    pub fn new(axis: usize, positive: bool) -> Self {
        WallSide(2 * axis + usize::from(positive))
    }

    /// Position in the six-slot contact table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which of the six axis sides the entity was flush against last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContacts([bool; 6]);

impl WallContacts {
    /// Whether the entity is touching a wall on `side`.
    pub fn is_touching(&self, side: WallSide) -> bool {
        self.0[side.index()]
    }

    /// Records whether the entity is touching a wall on `side`.
    pub fn set(&mut self, side: WallSide, touching: bool) {
        self.0[side.index()] = touching;
    }

    /// Forgets contacts opposite to the motion on `axis`. No motion keeps both sides.
    pub fn release_opposite(&mut self, axis: usize, velocity: f32) {
        if velocity > 0.0 {
            self.set(WallSide::new(axis, false), false);
        } else if velocity < 0.0 {
            self.set(WallSide::new(axis, true), false);
        }
    }
}

/// Flags describing how an entity is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementState {
    /// Free flight (no gravity, no jumping)
    pub flight_mode: bool,
    /// Set while the flight toggle key is down, so holding it toggles only once
    pub flight_mode_set: bool,
    /// Whether a jump is in progress
    pub jumping: bool,
    /// Whether the last collision ray touched liquid
    pub swimming: bool,
    /// What the entity is submerged in
    pub medium: Medium,
    /// Wall contacts from the previous tick
    pub hugging: WallContacts,
}

impl MovementState {
    /// Creates the state of a freshly spawned entity.
    pub fn new(flight_mode: bool) -> Self {
        MovementState {
            flight_mode,
            flight_mode_set: false,
            jumping: false,
            swimming: false,
            medium: Medium::None,
            hugging: WallContacts::default(),
        }
    }

    /// The flight toggle key went down. Toggles flight mode unless the key is still
    /// latched from an earlier press.
    ///
    /// # Returns
    /// Whether flight mode changed.
    pub fn press_flight_toggle(&mut self) -> bool {
        if self.flight_mode_set {
            return false;
        }
        self.flight_mode = !self.flight_mode;
        self.flight_mode_set = true;
        debug!("Flight mode {}", if self.flight_mode { "enabled" } else { "disabled" });
        true
    }

    /// The flight toggle key went up.
    pub fn release_flight_toggle(&mut self) {
        self.flight_mode_set = false;
    }

    /// Whether the jump key may start a jump now.
    pub fn can_start_jump(&self) -> bool {
        !self.flight_mode && !self.jumping
    }

    /// The jump key went up. Ends a jump that is only being held up by swimming.
    pub fn release_jump(&mut self) {
        if !self.flight_mode && self.jumping && self.swimming {
            self.jumping = false;
        }
    }

    /// A vertical collision ray hit something.
    ///
    /// # Returns
    /// `true` if the entity is jumping into liquid and should get an upward boost;
    /// otherwise the jump ends and this returns `false`.
    pub fn vertical_contact(&mut self, liquid: bool) -> bool {
        if self.jumping && liquid {
            return true;
        }
        self.jumping = false;
        false
    }
}
