//! Textures for spatially-varying material albedo.
//!
//! Image data arrives as an already-decoded flat RGB byte buffer (file
//! loading and format decoding live outside the core); the sampling here
//! is nearest-texel with clamped coordinates.

use std::sync::Arc;

use crate::material::Color;
use ember_math::Vec3;
use thiserror::Error;

/// Errors that can occur while wrapping a texture buffer.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("zero-sized image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("stride {stride} too small for {width} RGB pixels per row")]
    StrideTooSmall { stride: usize, width: u32 },

    #[error("buffer holds {actual} bytes, needs {required} for {height} rows of stride {stride}")]
    BufferTooSmall {
        actual: usize,
        required: usize,
        stride: usize,
        height: u32,
    },
}

/// Trait for textures that can be evaluated at a surface point.
pub trait Texture: Send + Sync {
    /// Get the texture color at UV coordinates (u, v) and world point `p`.
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single uniform color everywhere.
#[derive(Clone)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// A 3D checkerboard of two nested textures.
///
/// The pattern is driven by world position, not UV, so it tiles across
/// any geometry without seams.
pub struct Checker {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl Checker {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    /// Checkerboard of two solid colors.
    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self {
            even: Arc::new(SolidColor::new(even)),
            odd: Arc::new(SolidColor::new(odd)),
        }
    }
}

impl Texture for Checker {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// An image texture over a decoded RGB byte buffer.
///
/// `stride` is the byte distance between rows, which may exceed
/// `3 * width` for padded buffers. Row 0 is the top of the image, so v
/// is flipped at lookup.
pub struct ImageTexture {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl ImageTexture {
    /// Wrap a flat RGB byte buffer.
    ///
    /// The buffer is validated up front so sampling can index without
    /// bounds failures.
    pub fn new(data: Vec<u8>, width: u32, height: u32, stride: usize) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage { width, height });
        }
        if stride < 3 * width as usize {
            return Err(TextureError::StrideTooSmall { stride, width });
        }
        let required = stride * (height as usize - 1) + 3 * width as usize;
        if data.len() < required {
            return Err(TextureError::BufferTooSmall {
                actual: data.len(),
                required,
                stride,
                height,
            });
        }

        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        // Clamp to [0, 1], flip v so v = 0 is the bottom of the image
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        // Nearest texel, clamped to the last row/column
        let i = ((u * self.width as f32) as usize).min(self.width as usize - 1);
        let j = ((v * self.height as f32) as usize).min(self.height as usize - 1);

        let offset = j * self.stride + i * 3;
        let color_scale = 1.0 / 255.0;
        Color::new(
            color_scale * self.data[offset] as f32,
            color_scale * self.data[offset + 1] as f32,
            color_scale * self.data[offset + 2] as f32,
        )
    }
}
