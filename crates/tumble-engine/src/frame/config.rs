use thiserror::Error;

use crate::math::Vec3;

/// Model animation parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Rotation speed in radians per second of accumulated time.
    pub angular_velocity: f32,

    /// Rotation axis; normalized by the transform builder.
    pub axis: Vec3,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            angular_velocity: 0.5,
            axis: Vec3::new(0.7, 1.0, 0.0),
        }
    }
}

/// Fixed camera placement and lens.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,

    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,

    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 4.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 65.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Scene configuration consumed by `FrameState`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SceneConfig {
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
}

/// Rejected scene configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} is not finite")]
    NonFinite(&'static str),

    #[error("rotation axis has zero length")]
    ZeroAxis,

    #[error("camera eye and center coincide")]
    EyeAtCenter,

    #[error("camera up vector is parallel to the view direction")]
    UpParallelToView,

    #[error("vertical field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f32),

    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f32, far: f32 },
}

/// Below this, a vector is treated as zero-length and a cross product as parallel.
const DEGENERATE_EPSILON: f32 = 1e-6;

impl SceneConfig {
    /// Checks the inputs the per-frame transform math assumes are well formed.
    ///
    /// Run once when the renderer is initialized; the hot path does no checking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.animation;
        let c = &self.camera;

        if !a.angular_velocity.is_finite() {
            return Err(ConfigError::NonFinite("angular velocity"));
        }
        for (name, v) in [
            ("rotation axis", a.axis),
            ("camera eye", c.eye),
            ("camera center", c.center),
            ("camera up", c.up),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        if a.axis.length() <= DEGENERATE_EPSILON {
            return Err(ConfigError::ZeroAxis);
        }

        let view_dir = c.eye - c.center;
        if view_dir.length() <= DEGENERATE_EPSILON {
            return Err(ConfigError::EyeAtCenter);
        }
        if c.up.cross(view_dir.normalize()).length() <= DEGENERATE_EPSILON {
            return Err(ConfigError::UpParallelToView);
        }

        if !(c.fov_y_degrees > 0.0 && c.fov_y_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(c.fov_y_degrees));
        }
        if !(c.near > 0.0 && c.far > c.near && c.far.is_finite()) {
            return Err(ConfigError::ClipPlanes {
                near: c.near,
                far: c.far,
            });
        }

        Ok(())
    }
}
