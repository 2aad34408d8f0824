use winit::event::WindowEvent;

use crate::mode::ModeController;
use crate::render::TickOutcome;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary.
///
/// The runtime owns the window and the renderer; the app only reacts to input
/// (typically by flipping the render mode) and observes tick results.
pub trait App {
    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent, modes: &ModeController) -> AppControl {
        let _ = (event, modes);
        AppControl::Continue
    }

    /// Called after each tick.
    fn on_frame(&mut self, outcome: &TickOutcome) -> AppControl {
        let _ = outcome;
        AppControl::Continue
    }
}
