use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::quirks::SpriteEdges;

/// One byte per pixel, row-major, indexed as `y * DISPLAY_WIDTH + x`
pub type FrameBuffer = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// # Display
/// A 64x32 monochrome screen. Pixels are only ever changed by clearing the
/// whole screen or by XOR-ing a sprite onto it.
///
/// Every change raises a redraw flag that stays up until the host reads it
/// with `take_redraw`.
#[derive(Clone)]
pub struct Display {
    frame_buffer: FrameBuffer,
    redraw: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            redraw: false,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer.fill(0);
        self.redraw = true;
    }

    /// XORs `rows` onto the screen with the top-left corner at x, y.
    /// Each row byte is 8 pixels wide, most significant bit leftmost.
    ///
    /// Returns true if any pixel was switched from on to off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8], edges: SpriteEdges) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in rows.iter().enumerate() {
            let py = origin_y + row;
            if edges == SpriteEdges::Clip && py >= DISPLAY_HEIGHT {
                break;
            }
            for bit in 0..8 {
                let px = origin_x + bit;
                if edges == SpriteEdges::Clip && px >= DISPLAY_WIDTH {
                    break;
                }
                let sprite_pixel = (byte >> (7 - bit)) & 0x1;
                if sprite_pixel == 0 {
                    continue;
                }
                let index = (py % DISPLAY_HEIGHT) * DISPLAY_WIDTH + px % DISPLAY_WIDTH;
                collision |= self.frame_buffer[index] != 0;
                self.frame_buffer[index] ^= sprite_pixel;
            }
        }

        self.redraw = true;
        collision
    }

    /// Whether pixel (x, y) is lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y * DISPLAY_WIDTH + x] != 0
    }

    pub fn frame_buffer(&self) -> FrameBuffer {
        self.frame_buffer
    }

    /// Returns the redraw flag and lowers it
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_display {
    use super::*;
    use crate::constants::SPRITE_SHEET;
    use proptest::prelude::*;

    fn lit(display: &Display) -> usize {
        display.frame_buffer().iter().filter(|p| **p != 0).count()
    }

    #[test]
    fn test_draws_glyph() {
        let mut display = Display::new();
        // the 0 glyph at 1, 1
        let collision = display.draw_sprite(1, 1, &SPRITE_SHEET[0..5], SpriteEdges::Wrap);
        assert!(!collision);
        let row = |y: usize| (1..5).map(|x| display.pixel(x, y) as u8).collect::<Vec<_>>();
        assert_eq!(row(1), [1, 1, 1, 1]);
        assert_eq!(row(2), [1, 0, 0, 1]);
        assert_eq!(row(3), [1, 0, 0, 1]);
        assert_eq!(row(4), [1, 0, 0, 1]);
        assert_eq!(row(5), [1, 1, 1, 1]);
        assert_eq!(lit(&display), 14);
    }

    #[test]
    fn test_draw_xors() {
        let mut display = Display::new();
        display.draw_sprite(2, 0, &[0b0101_0000], SpriteEdges::Wrap);
        display.draw_sprite(2, 0, &[0b1100_0000], SpriteEdges::Wrap);
        let row: Vec<bool> = (2..6).map(|x| display.pixel(x, 0)).collect();
        assert_eq!(row, [true, false, false, true]);
    }

    #[test]
    fn test_drawing_twice_erases_and_collides() {
        let mut display = Display::new();
        let sprite = &SPRITE_SHEET[40..45];
        assert!(!display.draw_sprite(10, 10, sprite, SpriteEdges::Wrap));
        assert!(display.draw_sprite(10, 10, sprite, SpriteEdges::Wrap));
        assert_eq!(lit(&display), 0);
    }

    #[test]
    fn test_no_collision_without_overlap() {
        let mut display = Display::new();
        display.draw_sprite(0, 0, &[0xF0], SpriteEdges::Wrap);
        assert!(!display.draw_sprite(4, 0, &[0xF0], SpriteEdges::Wrap));
    }

    #[test]
    fn test_wraps_at_edges() {
        let mut display = Display::new();
        display.draw_sprite(62, 31, &[0xF0, 0xF0], SpriteEdges::Wrap);
        assert!(display.pixel(62, 31));
        assert!(display.pixel(63, 31));
        assert!(display.pixel(0, 31));
        assert!(display.pixel(1, 31));
        assert!(display.pixel(0, 0));
        assert!(display.pixel(62, 0));
        assert_eq!(lit(&display), 8);
    }

    #[test]
    fn test_clips_at_edges() {
        let mut display = Display::new();
        display.draw_sprite(62, 31, &[0xF0, 0xF0], SpriteEdges::Clip);
        assert!(display.pixel(62, 31));
        assert!(display.pixel(63, 31));
        assert_eq!(lit(&display), 2);
    }

    #[test]
    fn test_start_position_wraps_even_when_clipping() {
        let mut display = Display::new();
        display.draw_sprite(64 + 3, 32 + 2, &[0x80], SpriteEdges::Clip);
        assert!(display.pixel(3, 2));
    }

    #[test]
    fn test_redraw_flag_is_one_shot() {
        let mut display = Display::new();
        assert!(!display.take_redraw());
        display.draw_sprite(0, 0, &[0x80], SpriteEdges::Wrap);
        assert!(display.take_redraw());
        assert!(!display.take_redraw());
        display.clear();
        assert!(display.take_redraw());
    }

    proptest! {
        #[test]
        fn test_clear_zeroes_any_screen(
            sprites in prop::collection::vec((any::<u8>(), any::<u8>(), prop::collection::vec(any::<u8>(), 1..=15)), 0..20)
        ) {
            let mut display = Display::new();
            for (x, y, rows) in &sprites {
                display.draw_sprite(*x, *y, rows, SpriteEdges::Wrap);
            }
            display.clear();
            prop_assert!(display.frame_buffer().iter().all(|p| *p == 0));
        }
    }
}
