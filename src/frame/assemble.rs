use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::Canvas,
    foundation::error::{LoopError, LoopResult},
};

/// Raw decoder output for one latent point: channel-planar RGB, values nominally in `[0, 1]`.
///
/// Layout is `R[0..n] G[0..n] B[0..n]` with `n = width * height`, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceResult {
    canvas: Canvas,
    planes: Vec<f32>,
}

impl InferenceResult {
    /// Wrap a decoder output buffer, checking it covers `canvas` exactly.
    pub fn new(canvas: Canvas, planes: Vec<f32>) -> LoopResult<Self> {
        let want = 3 * canvas.pixel_count();
        if planes.len() != want {
            return Err(LoopError::precondition(format!(
                "decoded buffer has {} values, expected 3 * {}x{} = {want}",
                planes.len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self { canvas, planes })
    }

    /// Image size the planes describe.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Flat channel-planar values.
    pub fn planes(&self) -> &[f32] {
        &self.planes
    }
}

/// One displayable animation frame: straight-alpha RGBA8, alpha always 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = 4 * (y as usize * self.width as usize + x as usize);
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the frame as a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> LoopResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| LoopError::encode(format!("write png '{}': {e}", path.display())))
    }
}

/// Scale a unit value to a byte.
///
/// The product is computed in double precision and rounded half-up. The float to integer cast
/// saturates, so values outside `[0, 1]` pin to 0 or 255 and NaN becomes 0.
#[inline]
fn unit_to_byte(v: f32) -> u8 {
    (255.0 * f64::from(v)).round() as u8
}

/// Convert a decoded buffer into an interleaved RGBA frame.
pub fn assemble(result: &InferenceResult) -> Frame {
    let canvas = result.canvas;
    let n = canvas.pixel_count();
    let (r, rest) = result.planes.split_at(n);
    let (g, b) = rest.split_at(n);

    let mut data = vec![0u8; 4 * n];
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        px[0] = unit_to_byte(r[i]);
        px[1] = unit_to_byte(g[i]);
        px[2] = unit_to_byte(b[i]);
        px[3] = 255;
    }

    Frame {
        width: canvas.width,
        height: canvas.height,
        data,
    }
}

/// Convert a bare decoder buffer for `canvas`, rejecting buffers of the wrong length.
pub fn assemble_planes(canvas: Canvas, planes: Vec<f32>) -> LoopResult<Frame> {
    InferenceResult::new(canvas, planes).map(|r| assemble(&r))
}

#[cfg(test)]
#[path = "../../tests/unit/frame/assemble.rs"]
mod tests;
