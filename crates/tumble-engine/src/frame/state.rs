use crate::math::{self, Mat4};
use crate::mode::RenderMode;

use super::{FrameConstants, SceneConfig};

/// Animation clock plus the fixed scene parameters used to derive
/// [`FrameConstants`].
///
/// `accumulated_time` is the only state carried across frames. It only grows, and
/// only while the mode is [`RenderMode::Animated3D`]. It is kept in `f64` so a
/// 1/60 s tick still registers after weeks of uptime.
#[derive(Debug, Clone)]
pub struct FrameState {
    config: SceneConfig,
    accumulated_time: f64,
}

impl FrameState {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            accumulated_time: 0.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Seconds of animation played so far.
    #[inline]
    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    /// Current model rotation angle in radians, wrapped into `(-TAU, TAU)`.
    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        let angle = self.accumulated_time * f64::from(self.config.animation.angular_velocity);
        (angle % std::f64::consts::TAU) as f32
    }

    /// Advances the clock (animated mode only) and derives this frame's constants.
    ///
    /// Zero, negative or NaN `delta_seconds` leave the clock untouched. `aspect` is
    /// the current viewport width / height; a degenerate value (minimized window)
    /// falls back to 1.0.
    pub fn advance(&mut self, delta_seconds: f32, mode: RenderMode, aspect: f32) -> FrameConstants {
        if mode.is_animated() && delta_seconds > 0.0 {
            self.accumulated_time += f64::from(delta_seconds);
        }
        self.constants(aspect)
    }

    /// Derives constants for the current clock without advancing it.
    pub fn constants(&self, aspect: f32) -> FrameConstants {
        let anim = &self.config.animation;
        let cam = &self.config.camera;

        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        let model = math::rotation(self.rotation_angle(), anim.axis);
        let view = math::look_at(cam.eye, cam.center, cam.up);
        let projection = math::perspective(
            math::degrees_to_radians(cam.fov_y_degrees),
            aspect,
            cam.near,
            cam.far,
        );

        let model_view: Mat4 = view * model;

        FrameConstants {
            model_view_projection: projection * model_view,
            normal_matrix: math::inverse_transpose(math::upper_left_3x3(model_view)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::SceneConfig;
    use crate::math::Mat3;
    use approx::assert_relative_eq;

    const ASPECT: f32 = 4.0 / 3.0;

    fn assert_mat4_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.cols.iter().flatten().zip(b.cols.iter().flatten()) {
            assert_relative_eq!(x, y, epsilon = 1e-5);
        }
    }

    fn assert_mat3_eq(a: Mat3, b: Mat3) {
        for (x, y) in a.cols.iter().flatten().zip(b.cols.iter().flatten()) {
            assert_relative_eq!(x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn static_mode_freezes_time() {
        let mut fs = FrameState::new(SceneConfig::default());
        for _ in 0..10 {
            fs.advance(0.0, RenderMode::Static2D, ASPECT);
            fs.advance(0.25, RenderMode::Static2D, ASPECT);
        }
        assert_eq!(fs.accumulated_time(), 0.0);
    }

    #[test]
    fn animated_mode_accumulates() {
        let mut fs = FrameState::new(SceneConfig::default());
        fs.advance(0.5, RenderMode::Animated3D, ASPECT);
        fs.advance(0.25, RenderMode::Animated3D, ASPECT);
        assert_relative_eq!(fs.accumulated_time(), 0.75);
        assert_relative_eq!(fs.rotation_angle(), 0.375);
    }

    #[test]
    fn non_positive_delta_is_ignored() {
        let mut fs = FrameState::new(SceneConfig::default());
        fs.advance(1.0, RenderMode::Animated3D, ASPECT);
        fs.advance(0.0, RenderMode::Animated3D, ASPECT);
        fs.advance(-3.0, RenderMode::Animated3D, ASPECT);
        fs.advance(f32::NAN, RenderMode::Animated3D, ASPECT);
        assert_eq!(fs.accumulated_time(), 1.0);
    }

    #[test]
    fn split_deltas_match_single_delta() {
        let (dt1, dt2) = (0.3, 0.45);

        let mut split = FrameState::new(SceneConfig::default());
        split.advance(dt1, RenderMode::Animated3D, ASPECT);
        let a = split.advance(dt2, RenderMode::Animated3D, ASPECT);

        let mut single = FrameState::new(SceneConfig::default());
        let b = single.advance(dt1 + dt2, RenderMode::Animated3D, ASPECT);

        assert_mat4_eq(a.model_view_projection, b.model_view_projection);
        assert_mat3_eq(a.normal_matrix, b.normal_matrix);
    }

    #[test]
    fn sixty_ticks_make_one_second() {
        let mut fs = FrameState::new(SceneConfig::default());
        for _ in 0..60 {
            fs.advance(1.0 / 60.0, RenderMode::Animated3D, ASPECT);
        }
        assert_relative_eq!(fs.accumulated_time(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(fs.rotation_angle(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn long_uptime_keeps_advancing() {
        let mut fs = FrameState::new(SceneConfig::default());
        // One week of animation.
        fs.advance(604_800.0, RenderMode::Animated3D, ASPECT);
        let before = fs.accumulated_time();
        for _ in 0..60 {
            fs.advance(1.0 / 60.0, RenderMode::Animated3D, ASPECT);
        }
        assert_relative_eq!(fs.accumulated_time() - before, 1.0, epsilon = 1e-6);

        let angle = fs.rotation_angle();
        assert!(angle.is_finite());
        assert!(angle.abs() < std::f32::consts::TAU);
    }

    #[test]
    fn rotation_angle_wraps_full_turns() {
        let mut fs = FrameState::new(SceneConfig::default());
        let turn = 2.0 * std::f32::consts::TAU;
        fs.advance(turn + 1.0, RenderMode::Animated3D, ASPECT);
        assert_relative_eq!(fs.rotation_angle(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn constants_compose_projection_view_model() {
        let mut fs = FrameState::new(SceneConfig::default());
        let out = fs.advance(2.0, RenderMode::Animated3D, ASPECT);

        let cfg = SceneConfig::default();
        let cam = cfg.camera;
        let model = math::rotation(1.0, cfg.animation.axis);
        let view = math::look_at(cam.eye, cam.center, cam.up);
        let proj = math::perspective(
            math::degrees_to_radians(cam.fov_y_degrees),
            ASPECT,
            cam.near,
            cam.far,
        );
        assert_mat4_eq(out.model_view_projection, proj * (view * model));
    }

    #[test]
    fn normal_matrix_is_rotation_for_rigid_model_view() {
        let mut fs = FrameState::new(SceneConfig::default());
        let out = fs.advance(1.3, RenderMode::Animated3D, ASPECT);

        // Pure rotation: the inverse-transpose equals the matrix itself.
        let cfg = SceneConfig::default();
        let model = math::rotation(fs.rotation_angle(), cfg.animation.axis);
        let view = math::look_at(cfg.camera.eye, cfg.camera.center, cfg.camera.up);
        assert_mat3_eq(out.normal_matrix, (view * model).upper_left_3x3());
    }

    #[test]
    fn degenerate_aspect_stays_finite() {
        let mut fs = FrameState::new(SceneConfig::default());
        for aspect in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let out = fs.advance(0.1, RenderMode::Animated3D, aspect);
            assert!(out.model_view_projection.is_finite());
        }
    }

    #[test]
    fn static_mode_keeps_last_animated_pose() {
        let mut fs = FrameState::new(SceneConfig::default());
        let animated = fs.advance(0.8, RenderMode::Animated3D, ASPECT);
        let frozen = fs.advance(0.5, RenderMode::Static2D, ASPECT);
        assert_eq!(animated, frozen);
    }
}
