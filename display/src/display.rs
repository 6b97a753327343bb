use sdl2::pixels::PixelFormatEnum;

use ocho_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use ocho_core::FrameBuffer;

/// # Display
/// A thin SDL2 window over the machine's 64x32 monochrome frame buffer.
/// Only gets a `render` call when the frame buffer actually changed.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

// TODO handle errors better
impl Display {
    /// Creates a window sized `64*scale x 32*scale` bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each Chip-8 pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Self {
        let video_subsystem = sdl.video().unwrap();
        let window = video_subsystem
            .window(
                "Ocho",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();
        let canvas = window.into_canvas().build().unwrap();

        Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        }
    }

    /// Formats the frame buffer for rendering as an SDL2 RGB24 texture.
    ///
    /// The frame buffer is already a flat row-major pixel array, so each
    /// on/off pixel just becomes three 255/0 color channels.
    ///
    /// # Arguments
    /// * `frame` the machine's frame buffer
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|&on| {
                let channel = if on { 0xFF } else { 0x00 };
                std::iter::repeat(channel).take(3)
            })
            .collect()
    }

    /// Renders the frame buffer as an SDL2 RGB24 texture.
    ///
    /// # Arguments
    /// * `frame` the machine's frame buffer
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture(frame));
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_texture() {
        let mut frame: FrameBuffer = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        // (1, 0) and (0, 1)
        frame[1] = true;
        frame[DISPLAY_WIDTH] = true;
        let texture = Display::frame_to_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[3..6].copy_from_slice(&[255, 255, 255]);
        expected[192..195].copy_from_slice(&[255, 255, 255]);

        assert_eq!(texture, expected);
    }
}
