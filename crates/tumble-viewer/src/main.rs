mod cube;
mod input;
mod texture;

use anyhow::Result;
use tumble_engine::device::{FlatVertex, GpuInit, SceneAssets};
use tumble_engine::frame::SceneConfig;
use tumble_engine::logging::{init_logging, LoggingConfig};
use tumble_engine::mode::{ModeController, RenderMode};
use tumble_engine::window::{Runtime, RuntimeConfig};

use input::ViewerApp;

/// Selects the starting mode: `2d` or `3d`.
const MODE_ENV: &str = "TUMBLE_MODE";

const TRIANGLE: [FlatVertex; 3] = [
    FlatVertex::new([0.0, 0.75, 0.0, 1.0], [1.0, 0.0, 0.0, 1.0]),
    FlatVertex::new([-0.75, -0.75, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]),
    FlatVertex::new([0.75, -0.75, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]),
];

fn parse_mode(value: &str) -> Option<RenderMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "2d" => Some(RenderMode::Static2D),
        "3d" => Some(RenderMode::Animated3D),
        _ => None,
    }
}

fn initial_mode() -> RenderMode {
    let Ok(value) = std::env::var(MODE_ENV) else {
        return RenderMode::default();
    };
    parse_mode(&value).unwrap_or_else(|| {
        log::warn!("ignoring {MODE_ENV}={value:?}; expected `2d` or `3d`");
        RenderMode::default()
    })
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let assets = SceneAssets {
        mesh: cube::cube(2.0),
        texture: texture::checkerboard(256, 32),
        triangle: TRIANGLE,
    };

    let modes = ModeController::new(initial_mode());
    log::info!("starting in {} mode (Space/2 toggles, Esc quits)", modes.current());

    let gpu_init = GpuInit {
        present_mode: wgpu::PresentMode::AutoVsync,
        ..Default::default()
    };

    Runtime::run(
        RuntimeConfig::default(),
        gpu_init,
        SceneConfig::default(),
        assets,
        modes,
        ViewerApp::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!(parse_mode("2d"), Some(RenderMode::Static2D));
        assert_eq!(parse_mode(" 3D\n"), Some(RenderMode::Animated3D));
        assert_eq!(parse_mode("4d"), None);
    }

    #[test]
    fn triangle_is_counter_clockwise() {
        let [a, b, c] = TRIANGLE.map(|v| v.position);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross > 0.0);
    }
}
