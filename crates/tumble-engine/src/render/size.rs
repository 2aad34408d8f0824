/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// wgpu cannot configure or present a zero-area surface (minimized window).
    #[inline]
    pub const fn is_renderable(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width / height; 1.0 for a zero-area surface.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_renderable() {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_four_by_three() {
        assert_eq!(SurfaceSize::new(800, 600).aspect(), 4.0 / 3.0);
    }

    #[test]
    fn zero_area_is_not_renderable() {
        assert!(!SurfaceSize::new(0, 600).is_renderable());
        assert!(!SurfaceSize::new(800, 0).is_renderable());
        assert_eq!(SurfaceSize::new(0, 0).aspect(), 1.0);
    }
}
