use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, HIRES_DISPLAY_HEIGHT, HIRES_DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x] and sized for the largest resolution.
/// Only the top-left `width() x height()` cells are visible.
pub type FrameBuffer = [[bool; HIRES_DISPLAY_WIDTH]; HIRES_DISPLAY_HEIGHT];

/// # Display
/// A monochrome pixel grid: 64x32 in the standard resolution, 128x64 in the extended one.
///
/// Sprites are XORed onto the grid. A sprite pixel that turns off a lit pixel is a
/// collision, which is how Chip-8 programs detect that two objects touched.
#[derive(Copy, Clone)]
pub struct Display {
    frame_buffer: FrameBuffer,
    hires: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[false; HIRES_DISPLAY_WIDTH]; HIRES_DISPLAY_HEIGHT],
            hires: false,
        }
    }

    pub fn width(&self) -> usize {
        if self.hires {
            HIRES_DISPLAY_WIDTH
        } else {
            DISPLAY_WIDTH
        }
    }

    pub fn height(&self) -> usize {
        if self.hires {
            HIRES_DISPLAY_HEIGHT
        } else {
            DISPLAY_HEIGHT
        }
    }

    pub fn is_hires(&self) -> bool {
        self.hires
    }

    /// Switches resolution; the screen is cleared either way
    pub fn set_hires(&mut self, hires: bool) {
        self.hires = hires;
        self.clear();
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y][x]
    }

    /// The visible rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        let width = self.width();
        self.frame_buffer[..self.height()]
            .iter()
            .map(move |row| &row[..width])
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[false; HIRES_DISPLAY_WIDTH]; HIRES_DISPLAY_HEIGHT];
    }

    /// XORs an 8 pixel wide sprite (one byte per row) onto the screen at x, y.
    /// Returns whether any lit pixel was turned off.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8], wrap: bool) -> bool {
        self.blit(x, y, sprite.iter().map(|row| u16::from(*row)), 8, wrap)
    }

    /// XORs a 16x16 sprite (two big-endian bytes per row) onto the screen at x, y.
    /// Returns whether any lit pixel was turned off.
    pub fn draw_wide(&mut self, x: usize, y: usize, sprite: &[u8], wrap: bool) -> bool {
        let rows = sprite
            .chunks(2)
            .map(|pair| u16::from(pair[0]) << 8 | u16::from(*pair.get(1).unwrap_or(&0)));
        self.blit(x, y, rows, 16, wrap)
    }

    /// Pixels landing at or past the right or bottom edge are discarded, including a
    /// start position that is already off screen. With `wrap` set both the start and the
    /// overflowing pixels fold back onto the opposite edge.
    fn blit(
        &mut self,
        x: usize,
        y: usize,
        rows: impl Iterator<Item = u16>,
        sprite_width: usize,
        wrap: bool,
    ) -> bool {
        let (width, height) = (self.width(), self.height());
        let (x, y) = if wrap { (x % width, y % height) } else { (x, y) };
        let mut collision = false;

        for (row, bits) in rows.enumerate() {
            let mut py = y + row;
            if py >= height {
                if !wrap {
                    break;
                }
                py %= height;
            }
            for bit in 0..sprite_width {
                if (bits >> (sprite_width - 1 - bit)) & 1 == 0 {
                    continue;
                }
                let mut px = x + bit;
                if px >= width {
                    if !wrap {
                        break;
                    }
                    px %= width;
                }
                let pixel = &mut self.frame_buffer[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }

    /// Moves the visible picture down n rows, blanking the rows it uncovers
    pub fn scroll_down(&mut self, n: usize) {
        let (width, height) = (self.width(), self.height());
        for y in (0..height).rev() {
            for x in 0..width {
                self.frame_buffer[y][x] = y >= n && self.frame_buffer[y - n][x];
            }
        }
    }

    /// Moves the visible picture right n columns, blanking the columns it uncovers
    pub fn scroll_right(&mut self, n: usize) {
        let (width, height) = (self.width(), self.height());
        for row in self.frame_buffer[..height].iter_mut() {
            for x in (0..width).rev() {
                row[x] = x >= n && row[x - n];
            }
        }
    }

    /// Moves the visible picture left n columns, blanking the columns it uncovers
    pub fn scroll_left(&mut self, n: usize) {
        let (width, height) = (self.width(), self.height());
        for row in self.frame_buffer[..height].iter_mut() {
            for x in 0..width {
                row[x] = x + n < width && row[x + n];
            }
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
