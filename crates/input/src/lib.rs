#![warn(missing_docs)]
//! Input handling for keyboard and mouse, with press/release timestamps.
//!
//! Timestamps are caller-supplied milliseconds so replays stay deterministic.

use serde::{Deserialize, Serialize};
use slabcast_geometry::{Ray, Vec2};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::trace;

/// Physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scancode(pub u16);

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// First extra button.
    X1,
    /// Second extra button.
    X2,
}

/// A raw input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Key went down.
    KeyDown {
        /// Key.
        key: Scancode,
    },
    /// Key went up.
    KeyUp {
        /// Key.
        key: Scancode,
    },
    /// Mouse button went down.
    MouseDown {
        /// Button.
        button: MouseButton,
    },
    /// Mouse button went up.
    MouseUp {
        /// Button.
        button: MouseButton,
    },
    /// Pointer moved to an absolute position.
    MouseMotion {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Wheel scrolled.
    MouseWheel {
        /// Scroll amount (lines).
        delta: f32,
    },
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonRecord {
    down: bool,
    pressed_at: Option<u64>,
    released_at: Option<u64>,
    last_hold: Option<u64>,
}

/// Edge-triggered button state with press/release timestamps.
#[derive(Debug)]
pub struct ButtonTracker<B> {
    records: HashMap<B, ButtonRecord>,
    just_pressed: HashSet<B>,
    just_released: HashSet<B>,
}

impl<B> Default for ButtonTracker<B> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }
}

impl<B: Copy + Eq + Hash + std::fmt::Debug> ButtonTracker<B> {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press at `now_ms`. Returns `true` on an up-to-down transition.
    pub fn press(&mut self, button: B, now_ms: u64) -> bool {
        let record = self.records.entry(button).or_default();
        if record.down {
            return false;
        }
        record.down = true;
        record.pressed_at = Some(now_ms);
        self.just_pressed.insert(button);
        true
    }

    /// Record a release at `now_ms`. Returns `true` on a down-to-up transition.
    ///
    /// Releasing a button that is not down is ignored.
    pub fn release(&mut self, button: B, now_ms: u64) -> bool {
        let Some(record) = self.records.get_mut(&button).filter(|r| r.down) else {
            trace!(?button, "ignoring release of a button that is not down");
            return false;
        };
        record.down = false;
        record.released_at = Some(now_ms);
        record.last_hold = record.pressed_at.map(|at| now_ms.saturating_sub(at));
        self.just_released.insert(button);
        true
    }

    /// Reset per-frame edges (call at the start of each frame).
    pub fn begin_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Check if a button is currently down.
    pub fn is_down(&self, button: B) -> bool {
        self.records.get(&button).is_some_and(|r| r.down)
    }

    /// Check if a button went down this frame.
    pub fn just_pressed(&self, button: B) -> bool {
        self.just_pressed.contains(&button)
    }

    /// Check if a button went up this frame.
    pub fn just_released(&self, button: B) -> bool {
        self.just_released.contains(&button)
    }

    /// Time of the most recent press.
    pub fn pressed_at(&self, button: B) -> Option<u64> {
        self.records.get(&button).and_then(|r| r.pressed_at)
    }

    /// Time of the most recent release.
    pub fn released_at(&self, button: B) -> Option<u64> {
        self.records.get(&button).and_then(|r| r.released_at)
    }

    /// How long a currently-held button has been down.
    pub fn held_for(&self, button: B, now_ms: u64) -> Option<u64> {
        let record = self.records.get(&button).filter(|r| r.down)?;
        record.pressed_at.map(|at| now_ms.saturating_sub(at))
    }

    /// Duration of the last completed press.
    pub fn last_hold(&self, button: B) -> Option<u64> {
        self.records.get(&button).and_then(|r| r.last_hold)
    }

    /// Number of buttons currently down.
    pub fn down_count(&self) -> usize {
        self.records.values().filter(|r| r.down).count()
    }
}

/// Pointer position and per-frame motion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    /// Current position.
    pub position: Vec2,
    /// Position at the start of the frame.
    pub previous: Vec2,
    /// Wheel delta accumulated this frame.
    pub wheel: f32,
}

impl Pointer {
    /// Motion since the start of the frame.
    pub fn delta(&self) -> Vec2 {
        self.position - self.previous
    }

    fn begin_frame(&mut self) {
        self.previous = self.position;
        self.wheel = 0.0;
    }
}

/// Keyboard, mouse and pointer state.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keyboard keys.
    pub keys: ButtonTracker<Scancode>,
    /// Mouse buttons.
    pub mouse: ButtonTracker<MouseButton>,
    /// Pointer.
    pub pointer: Pointer,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event that happened at `now_ms`.
    pub fn handle_event(&mut self, event: &InputEvent, now_ms: u64) {
        match *event {
            InputEvent::KeyDown { key } => {
                self.keys.press(key, now_ms);
            }
            InputEvent::KeyUp { key } => {
                self.keys.release(key, now_ms);
            }
            InputEvent::MouseDown { button } => {
                self.mouse.press(button, now_ms);
            }
            InputEvent::MouseUp { button } => {
                self.mouse.release(button, now_ms);
            }
            InputEvent::MouseMotion { x, y } => {
                self.pointer.position = Vec2::new(x, y);
            }
            InputEvent::MouseWheel { delta } => {
                self.pointer.wheel += delta;
            }
        }
    }

    /// Reset per-frame state (call at the start of each frame).
    pub fn begin_frame(&mut self) {
        self.keys.begin_frame();
        self.mouse.begin_frame();
        self.pointer.begin_frame();
    }

    /// Segment from `anchor` to the pointer.
    pub fn aim_ray(&self, anchor: Vec2) -> Ray {
        Ray::between(anchor, self.pointer.position)
    }

    /// Axis value in `[-1, 1]` from a pair of keys.
    pub fn key_axis(&self, negative: Scancode, positive: Scancode) -> f32 {
        let mut axis = 0.0;
        if self.keys.is_down(positive) {
            axis += 1.0;
        }
        if self.keys.is_down(negative) {
            axis -= 1.0;
        }
        axis
    }
}
