//! Mapping from held actions and pointer motion to camera movement

use ridge_core::config::CameraConfig;
use ridge_render::FlyCamera;
use ridge_runtime::InputState;

/// Apply one frame of input to the camera.
///
/// Sprint swaps the speed before any movement, so a sprinting frame moves at
/// `sprint_speed` on every axis.
pub fn apply_input(camera: &mut FlyCamera, input: &InputState, config: &CameraConfig, dt: f32) {
    let speed = if input.is_action_pressed("sprint") {
        config.sprint_speed
    } else {
        config.move_speed
    };
    camera.set_speed(speed);

    if input.is_action_pressed("move_forward") {
        camera.move_forward(dt);
    }
    if input.is_action_pressed("move_backward") {
        camera.move_backward(dt);
    }
    if input.is_action_pressed("move_right") {
        camera.move_right(dt);
    }
    if input.is_action_pressed("move_left") {
        camera.move_left(dt);
    }
    if input.is_action_pressed("move_up") {
        camera.move_up(dt);
    }
    if input.is_action_pressed("move_down") {
        camera.move_down(dt);
    }

    let (dx, dy) = input.look_delta();
    if dx != 0.0 || dy != 0.0 {
        camera.rotate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridge_core::Vec3;
    use winit::keyboard::KeyCode;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn idle_input_leaves_camera_alone() {
        let config = CameraConfig::default();
        let mut camera = FlyCamera::from_config(&config);
        let input = InputState::new();

        apply_input(&mut camera, &input, &config, 0.5);
        assert_eq!(camera.position(), Vec3::new(0.0, 30.0, 0.0));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn forward_key_moves_at_walk_speed() {
        let config = CameraConfig::default();
        let mut camera = FlyCamera::from_config(&config);
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyW);

        apply_input(&mut camera, &input, &config, 1.0);
        assert!(approx(camera.position(), Vec3::new(0.0, 30.0, -10.0)));
    }

    #[test]
    fn sprint_uses_sprint_speed() {
        let config = CameraConfig::default();
        let mut camera = FlyCamera::from_config(&config);
        let mut input = InputState::new();
        input.process_key_down(KeyCode::ShiftLeft);
        input.process_key_down(KeyCode::Space);

        apply_input(&mut camera, &input, &config, 0.5);
        assert!(approx(camera.position(), Vec3::new(0.0, 50.0, 0.0)));
        assert_eq!(camera.speed(), config.sprint_speed);

        input.process_key_up(KeyCode::ShiftLeft);
        apply_input(&mut camera, &input, &config, 0.0);
        assert_eq!(camera.speed(), config.move_speed);
    }

    #[test]
    fn opposing_keys_cancel() {
        let config = CameraConfig::default();
        let mut camera = FlyCamera::from_config(&config);
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyA);
        input.process_key_down(KeyCode::KeyD);

        apply_input(&mut camera, &input, &config, 1.0);
        assert!(approx(camera.position(), Vec3::new(0.0, 30.0, 0.0)));
    }

    #[test]
    fn pointer_up_pitches_camera_up() {
        let config = CameraConfig::default();
        let mut camera = FlyCamera::from_config(&config);
        let mut input = InputState::new();
        // Screen y decreases when the pointer moves up
        input.process_mouse_raw_delta(0.0, -100.0);

        apply_input(&mut camera, &input, &config, 0.0);
        assert!((camera.pitch() - 10.0).abs() < 1e-4);
        assert!(camera.forward().y > 0.0);
    }
}
