//! Procedural sky backdrop texture.
//!
//! A vertical three-stop gradient with a band of faint white ellipse
//! speckles in the upper half that reads as distant cloud haze. Regenerated
//! whenever the zone blend moves far enough; cheap enough to rebuild on the
//! CPU but too expensive to run every frame.

use rand::{Rng, SeedableRng};

/// RGBA pixel.
#[derive(Debug, Clone, Copy)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
            a: 255,
        }
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Generated texture data, row-major RGBA.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl TextureData {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::from_rgb(0.0, 0.0, 0.0); (width * height) as usize],
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = pixel;
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_bytes());
        }
        bytes
    }
}

/// Three color stops for the sky gradient: top, mid (at 45% height), bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub top: [f32; 3],
    pub mid: [f32; 3],
    pub bottom: [f32; 3],
}

impl SkyGradient {
    /// Per-channel blend between two gradients.
    pub fn blend(a: &SkyGradient, b: &SkyGradient, t: f32) -> SkyGradient {
        let mix = |x: [f32; 3], y: [f32; 3]| {
            [
                x[0] * (1.0 - t) + y[0] * t,
                x[1] * (1.0 - t) + y[1] * t,
                x[2] * (1.0 - t) + y[2] * t,
            ]
        };
        SkyGradient {
            top: mix(a.top, b.top),
            mid: mix(a.mid, b.mid),
            bottom: mix(a.bottom, b.bottom),
        }
    }
}

/// Texture edge size.
pub const SKY_TEXTURE_SIZE: u32 = 1024;
/// Cloud speckle count.
const SPECKLE_COUNT: u32 = 2200;
/// Speckles only appear above this row fraction of the texture... below is
/// horizon haze where clouds would look wrong.
const SPECKLE_BAND: f32 = 0.6;

/// The gradient mid stop sits at 45% height, matching the backdrop's visual
/// horizon.
const MID_STOP: f32 = 0.45;

/// Generate the sky backdrop for a blended gradient. Deterministic per seed.
pub fn generate_sky(gradient: &SkyGradient, seed: u64) -> TextureData {
    let size = SKY_TEXTURE_SIZE;
    let mut tex = TextureData::new(size, size);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    // Vertical gradient, top row = top stop.
    for y in 0..size {
        let v = y as f32 / (size - 1) as f32;
        let color = if v < MID_STOP {
            let t = v / MID_STOP;
            [
                gradient.top[0] + (gradient.mid[0] - gradient.top[0]) * t,
                gradient.top[1] + (gradient.mid[1] - gradient.top[1]) * t,
                gradient.top[2] + (gradient.mid[2] - gradient.top[2]) * t,
            ]
        } else {
            let t = (v - MID_STOP) / (1.0 - MID_STOP);
            [
                gradient.mid[0] + (gradient.bottom[0] - gradient.mid[0]) * t,
                gradient.mid[1] + (gradient.bottom[1] - gradient.mid[1]) * t,
                gradient.mid[2] + (gradient.bottom[2] - gradient.mid[2]) * t,
            ]
        };
        let pixel = Pixel::from_rgb(color[0], color[1], color[2]);
        for x in 0..size {
            tex.set_pixel(x, y, pixel);
        }
    }

    // Cloud speckles: faint white ellipses in the upper band.
    for _ in 0..SPECKLE_COUNT {
        let cy = rng.gen_range(0.0..size as f32 * SPECKLE_BAND);
        let cx = rng.gen_range(0.0..size as f32);
        let half_w = rng.gen_range(16.0..120.0f32);
        let half_h = rng.gen_range(6.0..30.0f32);
        let alpha = rng.gen_range(0.02..0.18f32) * 0.10;
        let rot: f32 = rng.gen_range(0.0..std::f32::consts::PI);
        let (sin_r, cos_r) = rot.sin_cos();

        let x0 = (cx - half_w).floor().max(0.0) as u32;
        let x1 = ((cx + half_w).ceil() as u32).min(size - 1);
        let y0 = (cy - half_w).floor().max(0.0) as u32;
        let y1 = ((cy + half_w).ceil() as u32).min(size - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                // Rotate into ellipse space.
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let ex = dx * cos_r + dy * sin_r;
                let ey = -dx * sin_r + dy * cos_r;
                let d = (ex / half_w).powi(2) + (ey / half_h).powi(2);
                if d <= 1.0 {
                    let p = tex.get_pixel(x, y);
                    let blend = |c: u8| {
                        let f = c as f32 / 255.0;
                        ((f + (1.0 - f) * alpha) * 255.0) as u8
                    };
                    tex.set_pixel(
                        x,
                        y,
                        Pixel {
                            r: blend(p.r),
                            g: blend(p.g),
                            b: blend(p.b),
                            a: 255,
                        },
                    );
                }
            }
        }
    }

    tex
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> SkyGradient {
        SkyGradient {
            top: [0.95, 0.98, 1.0],
            mid: [0.72, 0.90, 1.0],
            bottom: [0.11, 0.16, 0.35],
        }
    }

    #[test]
    fn texture_has_expected_dimensions() {
        let tex = generate_sky(&gradient(), 7);
        assert_eq!(tex.width, SKY_TEXTURE_SIZE);
        assert_eq!(tex.height, SKY_TEXTURE_SIZE);
        assert_eq!(tex.to_bytes().len(), (SKY_TEXTURE_SIZE * SKY_TEXTURE_SIZE * 4) as usize);
    }

    #[test]
    fn bottom_row_matches_bottom_stop() {
        let g = gradient();
        let tex = generate_sky(&g, 7);
        // Bottom rows sit below the speckle band, so the gradient is exact.
        let p = tex.get_pixel(100, SKY_TEXTURE_SIZE - 1);
        assert_eq!(p.r, (g.bottom[0] * 255.0) as u8);
        assert_eq!(p.g, (g.bottom[1] * 255.0) as u8);
        assert_eq!(p.b, (g.bottom[2] * 255.0) as u8);
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generate_sky(&gradient(), 3);
        let b = generate_sky(&gradient(), 3);
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn gradient_blend_endpoints() {
        let a = gradient();
        let b = SkyGradient {
            top: [1.0, 0.82, 0.69],
            mid: [1.0, 0.55, 0.42],
            bottom: [0.11, 0.05, 0.08],
        };
        assert_eq!(SkyGradient::blend(&a, &b, 0.0), a);
        assert_eq!(SkyGradient::blend(&a, &b, 1.0), b);
        let half = SkyGradient::blend(&a, &b, 0.5);
        assert!((half.top[0] - (a.top[0] + b.top[0]) * 0.5).abs() < 1e-6);
    }
}
