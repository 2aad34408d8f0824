//! Keyboard handling: mode toggle and quit.

use tumble_engine::core::{App, AppControl};
use tumble_engine::mode::{ModeController, RenderMode};
use tumble_engine::render::TickOutcome;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    ToggleMode,
    Quit,
}

/// Maps a key transition to an action. Only fresh presses count; auto-repeat
/// would otherwise flicker the mode while the key is held.
pub fn key_action(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<KeyAction> {
    if state != ElementState::Pressed || repeat {
        return None;
    }
    match key {
        PhysicalKey::Code(KeyCode::Space | KeyCode::Digit2 | KeyCode::Numpad2) => {
            Some(KeyAction::ToggleMode)
        }
        PhysicalKey::Code(KeyCode::Escape) => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Status line logged whenever the mode flips.
pub fn mode_banner(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Static2D => "2D On",
        RenderMode::Animated3D => "2D Off",
    }
}

#[derive(Debug, Default)]
pub struct ViewerApp {
    presented: u64,
}

impl App for ViewerApp {
    fn on_window_event(&mut self, event: &WindowEvent, modes: &ModeController) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };

        match key_action(event.physical_key, event.state, event.repeat) {
            Some(KeyAction::ToggleMode) => {
                let mode = modes.toggle();
                log::info!("{}", mode_banner(mode));
                AppControl::Continue
            }
            Some(KeyAction::Quit) => AppControl::Exit,
            None => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, outcome: &TickOutcome) -> AppControl {
        if let TickOutcome::Presented { .. } = outcome {
            self.presented += 1;
            if self.presented == 1 {
                log::debug!("first frame presented: {outcome:?}");
            }
        }
        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    fn press(code: KeyCode) -> Option<KeyAction> {
        key_action(PhysicalKey::Code(code), ElementState::Pressed, false)
    }

    // ── key mapping ───────────────────────────────────────────────────────

    #[test]
    fn toggle_keys() {
        assert_eq!(press(KeyCode::Space), Some(KeyAction::ToggleMode));
        assert_eq!(press(KeyCode::Digit2), Some(KeyAction::ToggleMode));
        assert_eq!(press(KeyCode::Numpad2), Some(KeyAction::ToggleMode));
    }

    #[test]
    fn escape_quits() {
        assert_eq!(press(KeyCode::Escape), Some(KeyAction::Quit));
    }

    #[test]
    fn releases_and_repeats_ignored() {
        let space = PhysicalKey::Code(KeyCode::Space);
        assert_eq!(key_action(space, ElementState::Released, false), None);
        assert_eq!(key_action(space, ElementState::Pressed, true), None);
    }

    #[test]
    fn other_keys_ignored() {
        assert_eq!(press(KeyCode::KeyA), None);
        let unknown = PhysicalKey::Unidentified(NativeKeyCode::Unidentified);
        assert_eq!(key_action(unknown, ElementState::Pressed, false), None);
    }

    // ── app ───────────────────────────────────────────────────────────────

    #[test]
    fn banner_follows_mode() {
        assert_eq!(mode_banner(RenderMode::Static2D), "2D On");
        assert_eq!(mode_banner(RenderMode::Animated3D), "2D Off");
    }

    #[test]
    fn frames_never_stop_the_app() {
        let mut app = ViewerApp::default();
        assert_eq!(app.on_frame(&TickOutcome::Skipped), AppControl::Continue);
        assert_eq!(app.presented, 0);
    }
}
