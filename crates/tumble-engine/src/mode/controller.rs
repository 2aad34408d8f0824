use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// What the renderer draws each frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum RenderMode {
    /// Rotating textured mesh; the animation clock advances.
    #[default]
    Animated3D = 0,
    /// Single flat triangle; the animation clock is frozen.
    Static2D = 1,
}

impl RenderMode {
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            RenderMode::Animated3D => RenderMode::Static2D,
            RenderMode::Static2D => RenderMode::Animated3D,
        }
    }

    #[inline]
    pub const fn is_animated(self) -> bool {
        matches!(self, RenderMode::Animated3D)
    }

    #[inline]
    const fn from_bits(bits: u8) -> Self {
        if bits & 1 == 0 {
            RenderMode::Animated3D
        } else {
            RenderMode::Static2D
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::Animated3D => "3D",
            RenderMode::Static2D => "2D",
        })
    }
}

/// Shared handle to the current render mode.
///
/// Clones observe the same value. Writes are single atomic stores, so a toggle
/// issued from a UI thread is never partially visible to the render thread. The
/// renderer samples the mode once at the start of each tick; a change takes effect
/// on the next tick, never mid-frame.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Arc<AtomicU8>,
}

impl ModeController {
    pub fn new(initial: RenderMode) -> Self {
        Self {
            mode: Arc::new(AtomicU8::new(initial as u8)),
        }
    }

    /// Returns the mode the next tick will render with.
    #[inline]
    pub fn current(&self) -> RenderMode {
        RenderMode::from_bits(self.mode.load(Ordering::Acquire))
    }

    /// Requests `mode`. Setting the current mode again is a no-op.
    #[inline]
    pub fn set_mode(&self, mode: RenderMode) {
        self.mode.store(mode as u8, Ordering::Release);
    }

    /// Flips the mode and returns the new value.
    pub fn toggle(&self) -> RenderMode {
        let prev = self.mode.fetch_xor(1, Ordering::AcqRel);
        RenderMode::from_bits(prev).toggled()
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(RenderMode::default())
    }
}
