//! Software rasterizer for frame display lists
//!
//! Fills rectangles and draws lines into an RGBA buffer. Text commands are
//! left to the host, which owns fonts.

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use super::shapes::DrawCommand;

/// 8-bit RGBA pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Row-major pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = color;
        }
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, pos: IVec2, size: IVec2, color: Rgba) {
        let x0 = pos.x.max(0);
        let y0 = pos.y.max(0);
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        let x1 = pos.x.saturating_add(size.x).min(width);
        let y1 = pos.y.saturating_add(size.y).min(height);
        for y in y0..y1 {
            let row = self.index(0, y as u32);
            for x in x0..x1 {
                self.pixels[row + x as usize] = color;
            }
        }
    }

    /// One-pixel line, endpoints included
    pub fn draw_line(&mut self, from: IVec2, to: IVec2, color: Rgba) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs());
        if steps == 0 {
            self.put(from.x, from.y, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = from.x as f32 + delta.x as f32 * t;
            let y = from.y as f32 + delta.y as f32 * t;
            self.put(x.round() as i32, y.round() as i32, color);
        }
    }

    /// Draw every non-text command in order
    pub fn draw(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::FillRect { pos, size, color } => self.fill_rect(*pos, *size, *color),
                DrawCommand::Line { from, to, color } => self.draw_line(*from, *to, *color),
                DrawCommand::Text { .. } => {}
            }
        }
    }

    /// Raw RGBA bytes for hosts that upload textures
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Binary PPM (P6) image, alpha dropped
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.pixels.len() * 3);
        for p in &self.pixels {
            out.extend_from_slice(&[p.r, p.g, p.b]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = PixelBuffer::new(10, 10, Rgba::default());
        buf.fill_rect(IVec2::new(8, 8), IVec2::new(5, 5), RED);
        assert_eq!(buf.get(9, 9), Some(RED));
        assert_eq!(buf.get(7, 7), Some(Rgba::default()));
        buf.fill_rect(IVec2::new(-3, -3), IVec2::new(4, 4), RED);
        assert_eq!(buf.get(0, 0), Some(RED));
        assert_eq!(buf.get(1, 1), Some(Rgba::default()));
    }

    #[test]
    fn test_line_endpoints() {
        let mut buf = PixelBuffer::new(10, 10, Rgba::default());
        buf.draw_line(IVec2::new(2, 0), IVec2::new(2, 9), RED);
        assert_eq!(buf.get(2, 0), Some(RED));
        assert_eq!(buf.get(2, 9), Some(RED));
        assert_eq!(buf.get(3, 5), Some(Rgba::default()));
        // Off-buffer lines are clipped, not a panic
        buf.draw_line(IVec2::new(10, 0), IVec2::new(10, 9), RED);
    }

    #[test]
    fn test_bytes_and_ppm() {
        let buf = PixelBuffer::new(2, 1, RED);
        assert_eq!(buf.as_bytes(), &[255, 0, 0, 255, 255, 0, 0, 255]);
        let ppm = buf.to_ppm();
        assert!(ppm.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(&ppm[ppm.len() - 6..], &[255, 0, 0, 255, 0, 0]);
    }

    #[test]
    fn test_wide_buffer_indexing() {
        // 70_000 * 70_000 overflows u32; offsets past u32::MAX must still land
        let width = 70_000;
        let mut buf = PixelBuffer::new(width, 2, Rgba::default());
        buf.fill_rect(IVec2::new(69_990, 1), IVec2::new(20, 5), RED);
        assert_eq!(buf.get(69_999, 1), Some(RED));
        assert_eq!(buf.get(69_989, 1), Some(Rgba::default()));
        assert_eq!(buf.get(69_999, 0), Some(Rgba::default()));
        assert_eq!(buf.get(width, 1), None);
        assert_eq!(buf.index(69_999, 1), 139_999);
        assert_eq!(buf.index(0, 70_000), 4_900_000_000);
    }
}
