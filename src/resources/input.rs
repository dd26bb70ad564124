//! Per-frame keyboard and mouse input resource.
//!
//! Captures the subset of input state the game cares about and exposes it to
//! systems via the [`InputState`] resource. WASD and the arrow keys both
//! move the player; the remaining bindings drive interaction and the
//! blackjack table.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    /// Inactive state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            key_binding: key,
            ..Self::default()
        }
    }

    /// Store this frame's readings.
    pub fn update(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Mouse cursor in screen space and the primary button.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    pub position: Vector2,
    pub primary_down: bool,
    pub primary_pressed: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vector2::zero(),
            primary_down: false,
            primary_pressed: false,
        }
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // World actions
    pub action_back: BoolState,
    pub action_1: BoolState,
    pub interact: BoolState,
    pub restart: BoolState,
    pub quit: BoolState,
    // Table actions
    pub bet_down: BoolState,
    pub bet_up: BoolState,
    pub hit: BoolState,
    pub stand: BoolState,
    pub next_hand: BoolState,
    pub mode_debug: BoolState,
    pub pointer: PointerState,
}

impl InputState {
    /// Up is held on either direction cluster.
    pub fn up(&self) -> bool {
        self.maindirection_up.active || self.secondarydirection_up.active
    }

    pub fn down(&self) -> bool {
        self.maindirection_down.active || self.secondarydirection_down.active
    }

    pub fn left(&self) -> bool {
        self.maindirection_left.active || self.secondarydirection_left.active
    }

    pub fn right(&self) -> bool {
        self.maindirection_right.active || self.secondarydirection_right.active
    }

    /// Every key-bound state, for polling in one pass.
    pub fn keys_mut(&mut self) -> [&mut BoolState; 19] {
        [
            &mut self.maindirection_up,
            &mut self.maindirection_left,
            &mut self.maindirection_down,
            &mut self.maindirection_right,
            &mut self.secondarydirection_up,
            &mut self.secondarydirection_down,
            &mut self.secondarydirection_left,
            &mut self.secondarydirection_right,
            &mut self.action_back,
            &mut self.action_1,
            &mut self.interact,
            &mut self.restart,
            &mut self.quit,
            &mut self.bet_down,
            &mut self.bet_up,
            &mut self.hit,
            &mut self.stand,
            &mut self.next_hand,
            &mut self.mode_debug,
        ]
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            action_1: BoolState::bound(KeyboardKey::KEY_SPACE),
            interact: BoolState::bound(KeyboardKey::KEY_E),
            restart: BoolState::bound(KeyboardKey::KEY_R),
            quit: BoolState::bound(KeyboardKey::KEY_Q),
            // Same keys as the arrows; only read while seated.
            bet_down: BoolState::bound(KeyboardKey::KEY_LEFT),
            bet_up: BoolState::bound(KeyboardKey::KEY_RIGHT),
            hit: BoolState::bound(KeyboardKey::KEY_H),
            stand: BoolState::bound(KeyboardKey::KEY_S),
            next_hand: BoolState::bound(KeyboardKey::KEY_N),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F1),
            pointer: PointerState::default(),
        }
    }
}
