//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Tracks keyboard and pointer input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Last absolute pointer position. `None` until the first sample arrives,
    /// which only sets the baseline and produces no delta.
    mouse_position: Option<(f64, f64)>,
    /// Pointer movement delta this frame (cursor position mode)
    mouse_delta: (f64, f64),
    /// Raw accumulated mouse delta (for cursor-locked mode)
    raw_mouse_delta: (f64, f64),

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_position: None,
            mouse_delta: (0.0, 0.0),
            raw_mouse_delta: (0.0, 0.0),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("move_forward".into(), vec![KeyCode::KeyW, KeyCode::ArrowUp]);
        map.insert("move_backward".into(), vec![KeyCode::KeyS, KeyCode::ArrowDown]);
        map.insert("move_left".into(), vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        map.insert("move_right".into(), vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        map.insert("move_up".into(), vec![KeyCode::Space, KeyCode::KeyE]);
        map.insert("move_down".into(), vec![KeyCode::ControlLeft, KeyCode::KeyQ]);
        map.insert("sprint".into(), vec![KeyCode::ShiftLeft, KeyCode::ShiftRight]);
        map.insert("toggle_shading".into(), vec![KeyCode::F1]);
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process an absolute pointer position (cursor position mode)
    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.mouse_position {
            self.mouse_delta.0 += x - last_x;
            self.mouse_delta.1 += y - last_y;
        }
        self.mouse_position = Some((x, y));
    }

    /// Process raw mouse delta (device motion, for locked cursor)
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_mouse_delta.0 += dx;
        self.raw_mouse_delta.1 += dy;
    }

    /// Forget the pointer baseline so the next position sample re-latches.
    /// Call when the cursor is released or recaptured.
    pub fn reset_pointer(&mut self) {
        self.mouse_position = None;
        self.mouse_delta = (0.0, 0.0);
        self.raw_mouse_delta = (0.0, 0.0);
    }

    /// Release every held key, e.g. when the window loses focus
    pub fn clear_keys(&mut self) {
        self.keys_down.clear();
        self.keys_just_pressed.clear();
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.raw_mouse_delta = (0.0, 0.0);
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Is an action currently held? (any bound key is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false)
    }

    /// +1 when `positive` is held, -1 for `negative`, 0 for both or neither
    pub fn action_axis(&self, positive: &str, negative: &str) -> f32 {
        let mut axis = 0.0;
        if self.is_action_pressed(positive) {
            axis += 1.0;
        }
        if self.is_action_pressed(negative) {
            axis -= 1.0;
        }
        axis
    }

    /// Get the pointer movement delta this frame (screen space, y down)
    pub fn mouse_delta(&self) -> (f64, f64) {
        self.mouse_delta
    }

    /// Get the raw mouse delta (accumulated device motion)
    pub fn raw_mouse_delta(&self) -> (f64, f64) {
        self.raw_mouse_delta
    }

    /// Combined pointer motion this frame as camera yaw/pitch input.
    /// Screen y grows downward, so it is inverted: moving up yields positive dy.
    pub fn look_delta(&self) -> (f32, f32) {
        let dx = self.mouse_delta.0 + self.raw_mouse_delta.0;
        let dy = self.mouse_delta.1 + self.raw_mouse_delta.1;
        (dx as f32, -dy as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_is_just_pressed_once() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::F1);
        assert!(input.is_action_just_pressed("toggle_shading"));

        // Key repeat while held must not re-trigger the toggle
        input.end_frame();
        input.process_key_down(KeyCode::F1);
        assert!(input.is_key_down(KeyCode::F1));
        assert!(!input.is_action_just_pressed("toggle_shading"));

        input.process_key_up(KeyCode::F1);
        input.process_key_down(KeyCode::F1);
        assert!(input.is_key_just_pressed(KeyCode::F1));
    }

    #[test]
    fn test_default_movement_bindings() {
        let mut input = InputState::new();
        let bindings = [
            (KeyCode::ArrowUp, "move_forward"),
            (KeyCode::KeyS, "move_backward"),
            (KeyCode::ArrowLeft, "move_left"),
            (KeyCode::KeyD, "move_right"),
            (KeyCode::Space, "move_up"),
            (KeyCode::KeyQ, "move_down"),
            (KeyCode::ShiftRight, "sprint"),
        ];
        for (key, action) in bindings {
            assert!(!input.is_action_pressed(action));
            input.process_key_down(key);
            assert!(input.is_action_pressed(action), "{key:?} should drive {action}");
            input.process_key_up(key);
            assert!(!input.is_action_pressed(action));
        }
        assert!(!input.is_action_pressed("unbound"));
    }

    #[test]
    fn test_rebinding_replaces_keys() {
        let mut input = InputState::new();
        input.bind_action("move_up", vec![KeyCode::KeyR]);

        input.process_key_down(KeyCode::Space);
        assert!(!input.is_action_pressed("move_up"));

        input.process_key_down(KeyCode::KeyR);
        assert!(input.is_action_pressed("move_up"));
    }

    #[test]
    fn test_action_axis() {
        let mut input = InputState::new();
        assert_eq!(input.action_axis("move_forward", "move_backward"), 0.0);

        input.process_key_down(KeyCode::KeyW);
        assert_eq!(input.action_axis("move_forward", "move_backward"), 1.0);

        input.process_key_down(KeyCode::KeyS);
        assert_eq!(input.action_axis("move_forward", "move_backward"), 0.0);

        input.process_key_up(KeyCode::KeyW);
        assert_eq!(input.action_axis("move_forward", "move_backward"), -1.0);
    }

    #[test]
    fn test_first_pointer_sample_is_baseline() {
        let mut input = InputState::new();

        input.process_mouse_move(960.0, 540.0);
        assert_eq!(input.mouse_delta(), (0.0, 0.0));

        input.process_mouse_move(970.0, 535.0);
        let delta = input.mouse_delta();
        assert!((delta.0 - 10.0).abs() < 1e-10);
        assert!((delta.1 + 5.0).abs() < 1e-10);

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_reset_pointer_relatches() {
        let mut input = InputState::new();
        input.process_mouse_move(10.0, 10.0);
        input.process_mouse_move(20.0, 20.0);
        input.reset_pointer();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));

        input.process_mouse_move(500.0, 500.0);
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_raw_delta_accumulates() {
        let mut input = InputState::new();
        input.process_mouse_raw_delta(3.0, -1.0);
        input.process_mouse_raw_delta(2.0, -4.0);
        assert_eq!(input.raw_mouse_delta(), (5.0, -5.0));

        input.end_frame();
        assert_eq!(input.raw_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_look_delta_inverts_y() {
        let mut input = InputState::new();
        input.process_mouse_move(100.0, 100.0);
        input.process_mouse_move(104.0, 90.0);
        assert_eq!(input.look_delta(), (4.0, 10.0));

        input.end_frame();
        input.process_mouse_raw_delta(-2.0, 3.0);
        assert_eq!(input.look_delta(), (-2.0, -3.0));
    }

    #[test]
    fn test_clear_keys() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyW);
        input.process_key_down(KeyCode::ShiftLeft);
        input.clear_keys();
        assert!(!input.is_action_pressed("move_forward"));
        assert!(!input.is_action_pressed("sprint"));
    }
}
