use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{PathchainError, PathchainResult};

/// Host-side render target: premultiplied RGBA8, row-major, `width * height * 4` bytes.
///
/// The buffer length always matches the dimensions; hosts can rewrite pixels through
/// [`Frame::data_mut`] but cannot resize the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Fully transparent frame.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.pixel_count() * 4],
        }
    }

    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let mut frame = Self::new(canvas);
        frame.clear(color.to_premul_opaque());
        frame
    }

    /// Wrap an existing premultiplied buffer. Fails if its length is not `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PathchainResult<Self> {
        let expected = Canvas::new(width, height).pixel_count().saturating_mul(4);
        if data.len() != expected {
            return Err(PathchainError::validation(format!(
                "frame buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn clear(&mut self, premul_rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul_rgba);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Un-premultiplied copy of the pixel data, suitable for PNG encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
