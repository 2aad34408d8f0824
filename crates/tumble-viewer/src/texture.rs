//! Procedural checkerboard used in place of an image asset.

use tumble_engine::device::TextureData;

const LIGHT: [u8; 4] = [230, 230, 230, 255];
const DARK: [u8; 4] = [40, 90, 160, 255];

/// `size`×`size` RGBA8 checkerboard with square cells of `cell` pixels.
pub fn checkerboard(size: u32, cell: u32) -> TextureData {
    let cell = cell.max(1);
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let light = (x / cell + y / cell) % 2 == 0;
            rgba.extend_from_slice(if light { &LIGHT } else { &DARK });
        }
    }

    TextureData {
        width: size,
        height: size,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(t: &TextureData, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * t.width + x) * 4) as usize;
        [t.rgba[i], t.rgba[i + 1], t.rgba[i + 2], t.rgba[i + 3]]
    }

    #[test]
    fn well_formed() {
        let t = checkerboard(64, 8);
        assert_eq!(t.rgba.len(), 64 * 64 * 4);
        assert_eq!(t.problem(), None);
    }

    #[test]
    fn cells_alternate() {
        let t = checkerboard(16, 4);
        assert_eq!(pixel(&t, 0, 0), LIGHT);
        assert_eq!(pixel(&t, 3, 3), LIGHT);
        assert_eq!(pixel(&t, 4, 0), DARK);
        assert_eq!(pixel(&t, 0, 4), DARK);
        assert_eq!(pixel(&t, 4, 4), LIGHT);
    }
}
