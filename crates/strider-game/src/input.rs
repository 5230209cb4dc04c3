//! Input service with action-based mapping
//!
//! The controller consumes input through [`InputSource`], which yields one
//! [`InputFrame`] per frame. [`InputHandler`] is the default source, fed
//! from winit keyboard and mouse events.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-frame movement intent in camera space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Strafe axis in [-1, 1] (positive = right)
    pub horizontal: f32,
    /// Forward axis in [-1, 1] (positive = forward)
    pub vertical: f32,
    /// Whether sprint is held
    pub sprinting: bool,
}

impl MovementIntent {
    /// Build an intent, clamping both axes into [-1, 1]
    pub fn new(horizontal: f32, vertical: f32, sprinting: bool) -> Self {
        Self {
            horizontal: horizontal.clamp(-1.0, 1.0),
            vertical: vertical.clamp(-1.0, 1.0),
            sprinting,
        }
    }

    /// True when both axes are exactly zero
    pub fn is_idle(&self) -> bool {
        self.horizontal == 0.0 && self.vertical == 0.0
    }
}

/// Everything the controller reads from input in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub movement: MovementIntent,
    /// Look delta (x = yaw, y = pitch), unbounded
    pub camera: Vec2,
    /// One-shot jump request
    pub jump_requested: bool,
}

/// Input service polled once per frame by the controller
pub trait InputSource {
    /// Snapshot this frame's input and reset one-shot state
    fn poll(&mut self) -> InputFrame;
}

/// Actions the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    /// Held modifier
    Sprint,
}

/// Held and newly pressed actions plus accumulated look motion
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<InputAction>,
    pressed: HashSet<InputAction>,
    /// Look motion since the last poll, already scaled by sensitivity
    look: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Pressed since the last poll
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    /// Look motion accumulated since the last poll
    pub fn look(&self) -> Vec2 {
        self.look
    }

    /// -1, 0 or 1 from a pair of opposing actions
    pub fn axis(&self, negative: InputAction, positive: InputAction) -> f32 {
        f32::from(u8::from(self.is_held(positive))) - f32::from(u8::from(self.is_held(negative)))
    }

    fn press(&mut self, action: InputAction) {
        // Key repeat arrives as more presses while held
        if self.held.insert(action) {
            self.pressed.insert(action);
        }
    }

    fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    /// Drop one-shot presses and look motion, keep held actions
    pub fn clear_frame(&mut self) {
        self.pressed.clear();
        self.look = Vec2::ZERO;
    }
}

/// A physical input that can trigger an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Physical input to action table
#[derive(Debug, Clone)]
pub struct InputBindings {
    table: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        use InputAction::*;

        let mut bindings = Self {
            table: HashMap::new(),
        };
        for (key, action) in [
            (KeyCode::KeyW, MoveForward),
            (KeyCode::KeyS, MoveBackward),
            (KeyCode::KeyA, MoveLeft),
            (KeyCode::KeyD, MoveRight),
            (KeyCode::ArrowUp, MoveForward),
            (KeyCode::ArrowDown, MoveBackward),
            (KeyCode::ArrowLeft, MoveLeft),
            (KeyCode::ArrowRight, MoveRight),
            (KeyCode::Space, Jump),
            (KeyCode::ShiftLeft, Sprint),
            (KeyCode::ShiftRight, Sprint),
        ] {
            bindings.bind(key, action);
        }
        bindings
    }
}

impl InputBindings {
    /// Bindings with no entries
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Map a key or mouse button to an action, replacing any previous mapping
    pub fn bind(&mut self, binding: impl Into<InputBinding>, action: InputAction) {
        self.table.insert(binding.into(), action);
    }

    pub fn unbind(&mut self, binding: impl Into<InputBinding>) {
        self.table.remove(&binding.into());
    }

    /// Look up the action bound to a key or mouse button
    pub fn action(&self, binding: impl Into<InputBinding>) -> Option<InputAction> {
        self.table.get(&binding.into()).copied()
    }
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        InputBinding::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        InputBinding::Mouse(button)
    }
}

/// [`InputSource`] fed from winit window and device events
#[derive(Debug)]
pub struct InputHandler {
    /// Held/pressed actions and pending look motion
    pub state: InputState,
    pub bindings: InputBindings,
    /// Look units per pixel of mouse motion
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    /// Mouse motion only turns the camera while captured
    pub cursor_captured: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(InputBindings::default())
    }
}

impl InputHandler {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            state: InputState::new(),
            bindings,
            mouse_sensitivity: 0.1,
            invert_y: false,
            cursor_captured: false,
        }
    }

    fn apply(&mut self, binding: InputBinding, element_state: ElementState) {
        let Some(action) = self.bindings.action(binding) else {
            return;
        };
        match element_state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => self.state.release(action),
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key) = physical_key {
            self.apply(InputBinding::Key(key), element_state);
        }
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, element_state: ElementState) {
        self.apply(InputBinding::Mouse(button), element_state);
    }

    /// Raw device motion in pixels (y grows downward)
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_captured {
            return;
        }
        // Moving the mouse up looks up unless inverted
        let pitch_sign = if self.invert_y { 1.0 } else { -1.0 };
        self.state.look += Vec2::new(delta.0 as f32, delta.1 as f32 * pitch_sign) * self.mouse_sensitivity;
    }

    /// Releasing the cursor drops any pending look motion
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        if !captured {
            self.state.look = Vec2::ZERO;
        }
    }

    /// This frame's snapshot, without clearing anything
    pub fn frame(&self) -> InputFrame {
        use InputAction::*;

        let state = &self.state;
        InputFrame {
            movement: MovementIntent::new(
                state.axis(MoveLeft, MoveRight),
                state.axis(MoveBackward, MoveForward),
                state.is_held(Sprint),
            ),
            camera: state.look(),
            jump_requested: state.was_pressed(Jump),
        }
    }
}

impl InputSource for InputHandler {
    fn poll(&mut self) -> InputFrame {
        let frame = self.frame();
        self.state.clear_frame();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(bindings.action(KeyCode::KeyW), Some(InputAction::MoveForward));
        assert_eq!(bindings.action(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(bindings.action(KeyCode::KeyQ), None);
        assert_eq!(InputBindings::empty().action(KeyCode::KeyW), None);
    }

    #[test]
    fn test_axes_cancel_and_combine() {
        let mut handler = InputHandler::default();
        press(&mut handler, KeyCode::KeyW);
        press(&mut handler, KeyCode::KeyD);
        let frame = handler.frame();
        assert_eq!(frame.movement.vertical, 1.0);
        assert_eq!(frame.movement.horizontal, 1.0);

        press(&mut handler, KeyCode::KeyA);
        assert_eq!(handler.frame().movement.horizontal, 0.0);

        release(&mut handler, KeyCode::KeyD);
        assert_eq!(handler.frame().movement.horizontal, -1.0);
    }

    #[test]
    fn test_poll_consumes_jump_but_keeps_held() {
        let mut handler = InputHandler::default();
        press(&mut handler, KeyCode::Space);
        press(&mut handler, KeyCode::ShiftLeft);

        let first = handler.poll();
        assert!(first.jump_requested);
        assert!(first.movement.sprinting);

        // Key repeat while held is not a new jump
        press(&mut handler, KeyCode::Space);
        let second = handler.poll();
        assert!(!second.jump_requested);
        assert!(second.movement.sprinting);
    }

    #[test]
    fn test_mouse_motion_requires_capture() {
        let mut handler = InputHandler::default();
        handler.handle_mouse_motion((10.0, 5.0));
        assert_eq!(handler.poll().camera, Vec2::ZERO);

        handler.set_cursor_captured(true);
        handler.handle_mouse_motion((10.0, 5.0));
        handler.handle_mouse_motion((10.0, 5.0));
        let frame = handler.poll();
        assert!((frame.camera.x - 2.0).abs() < 1e-6);
        assert!((frame.camera.y + 1.0).abs() < 1e-6);
        assert_eq!(handler.poll().camera, Vec2::ZERO);

        handler.invert_y = true;
        handler.handle_mouse_motion((0.0, 5.0));
        assert!((handler.poll().camera.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mouse_button_binding() {
        let mut handler = InputHandler::default();
        handler.bindings.bind(MouseButton::Right, InputAction::Jump);
        handler.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(handler.poll().jump_requested);

        handler.bindings.unbind(KeyCode::Space);
        press(&mut handler, KeyCode::Space);
        assert!(!handler.poll().jump_requested);
    }

    #[test]
    fn test_intent_clamps_axes() {
        let intent = MovementIntent::new(3.0, -2.0, false);
        assert_eq!(intent.horizontal, 1.0);
        assert_eq!(intent.vertical, -1.0);
        assert!(!intent.is_idle());
        assert!(MovementIntent::default().is_idle());
    }
}
