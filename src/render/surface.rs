use crate::foundation::core::Canvas;
use crate::foundation::error::{PathchainError, PathchainResult};

/// Owned, canvas-sized premultiplied RGBA8 image.
///
/// Surfaces are never patched in place after they are drawn: a rebuild allocates a fresh
/// surface and drops the old one.
pub struct Surface {
    canvas: Canvas,
    pub(crate) pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.canvas.width)
            .field("height", &self.canvas.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a transparent surface. Fails if either dimension is zero or exceeds `u16`.
    pub fn new(canvas: Canvas) -> PathchainResult<Self> {
        let (w, h) = surface_dims(canvas)?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub fn is_blank(&self) -> bool {
        self.data().iter().all(|&b| b == 0)
    }
}

pub(crate) fn surface_dims(canvas: Canvas) -> PathchainResult<(u16, u16)> {
    let w: u16 = canvas.width.try_into().map_err(|_| {
        PathchainError::render(format!("surface width {} exceeds u16", canvas.width))
    })?;
    let h: u16 = canvas.height.try_into().map_err(|_| {
        PathchainError::render(format!("surface height {} exceeds u16", canvas.height))
    })?;
    if w == 0 || h == 0 {
        return Err(PathchainError::render(format!(
            "surface must be non-empty, got {w}x{h}"
        )));
    }
    Ok((w, h))
}
