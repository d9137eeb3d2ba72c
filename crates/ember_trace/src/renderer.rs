//! Pixel rendering and image output helpers.

use crate::camera::{Camera, Projection};
use crate::hittable::Hittable;
use crate::integrator::{ray_color, Background};
use crate::material::Color;
use crate::sampler::multi_jitter;
use ember_math::sampling::sample_square;
use ember_math::Vec2;
use rand::RngCore;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel; square counts get a multi-jittered grid,
    /// other counts fall back to independent per-sample jitter
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// What escaping rays see
    pub background: Background,
    /// Ray generation mode
    pub projection: Projection,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Background::Solid(Color::ZERO),
            projection: Projection::Perspective,
        }
    }
}

/// Render a single pixel with a fresh multi-jittered sample pattern.
///
/// (x, y) are image coordinates with the origin at the top-left; the
/// vertical flip into camera space happens here so callers and buffers
/// can stay in display order.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let grid = (config.samples_per_pixel as f64).sqrt().round() as usize;
    let pattern = if grid * grid == config.samples_per_pixel as usize {
        multi_jitter(grid, grid, rng)
    } else {
        // Sample count is not a perfect square: jitter each sample
        // independently over the pixel instead
        (0..config.samples_per_pixel)
            .map(|_| Vec2::splat(0.5) + sample_square(rng))
            .collect()
    };

    let mut pixel_color = Color::ZERO;
    for offset in &pattern {
        let s = (x as f32 + offset.x) / (width - 1) as f32;
        let t = 1.0 - (y as f32 + offset.y) / (height - 1) as f32;
        let ray = camera.get_ray(s, t, config.projection, rng);
        pixel_color += ray_color(&ray, &config.background, world, config.max_depth, rng);
    }

    pixel_color / pattern.len() as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
///
/// Row-major with y = 0 at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Serialize as a binary PPM (P6) image.
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        for color in &self.pixels {
            let [r, g, b, _] = color_to_rgba(*color);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}
