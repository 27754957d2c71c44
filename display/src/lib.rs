use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vm8::constants::{HIRES_DISPLAY_HEIGHT, HIRES_DISPLAY_WIDTH};

/// # Display
/// Presents a Chip-8 display in an SDL2 window.
///
/// The window is sized for the 128x64 extended resolution; a 64x32 picture is
/// stretched to fill it. The display only gets a call to `render` when the Chip-8's
/// picture has changed.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the window size in pixels of each low resolution Chip-8 pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "vm8",
                HIRES_DISPLAY_WIDTH as u32 * scale / 2,
                HIRES_DISPLAY_HEIGHT as u32 * scale / 2,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 display as the contents of an SDL2 RGB24 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the visible rows into a 1D array by concatenating them
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Mapping lit pixels to 255 intensity and unlit ones to 0
    ///
    /// # Arguments
    /// * `frame` a Chip-8 display
    fn frame_to_sdl_texture(frame: &vm8::Display) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(*pixel).take(3))
            .map(|pixel| if pixel { 255 } else { 0 })
            .collect()
    }

    /// Formats the Chip-8 display as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 display
    pub fn render(&mut self, frame: &vm8::Display) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                frame.width() as u32,
                frame.height() as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_length = frame.width() * 3;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(row_length).enumerate() {
                buffer[row * pitch..row * pitch + row_length].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
