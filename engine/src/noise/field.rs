//! Noise Fields
//!
//! Deterministic 4-channel Perlin fields sampled like a texture. One field
//! seeds cell elevation and terrain at grid build time; another displaces mesh
//! vertices so the hex layout looks less regular.

use glam::Vec4;
use ::noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Phase offsets applied to the r, g, b channels when `shift` is enabled.
/// Alpha is never shifted.
const CHANNEL_SHIFT: [f64; 4] = [1.0, 2.0, 3.0, 0.0];

/// Generation parameters for a noise field. Two fields with equal params are
/// bit-identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Perlin permutation seed
    pub seed: u32,
    /// Per-channel frequency (r, g, b, a)
    pub scales: [f32; 4],
    /// Field width in samples
    pub width: u32,
    /// Field height in samples
    pub height: u32,
    /// Decorrelate r, g and b by shifting their phase
    pub shift: bool,
}

impl NoiseParams {
    /// Params with the same scale on every channel.
    pub fn uniform(seed: u32, scale: f32, width: u32, height: u32, shift: bool) -> Self {
        Self {
            seed,
            scales: [scale; 4],
            width,
            height,
            shift,
        }
    }

    /// Stable textual key for cache lookups and file names.
    ///
    /// Format: `{seed}-{r},{g},{b},{a}-{width}x{height}-{s|u}`.
    pub fn key(&self) -> String {
        let [r, g, b, a] = self.scales;
        format!(
            "{}-{},{},{},{}-{}x{}-{}",
            self.seed,
            r,
            g,
            b,
            a,
            self.width,
            self.height,
            if self.shift { "s" } else { "u" }
        )
    }
}

impl Default for NoiseParams {
    /// The mesh perturbation field: high frequency, shifted channels.
    fn default() -> Self {
        Self::uniform(1, 10.0, 512, 512, true)
    }
}

/// A generated field of RGBA samples in `[0, 1]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField {
    width: u32,
    height: u32,
    samples: Vec<[f32; 4]>,
}

impl NoiseField {
    /// Generate a field from params. Pure function of `params`.
    pub fn generate(params: &NoiseParams) -> Self {
        let perlin = Perlin::new(params.seed);
        let width = params.width.max(1);
        let height = params.height.max(1);
        let shift = if params.shift { CHANNEL_SHIFT } else { [0.0; 4] };

        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let v = y as f64 / height as f64;
            for x in 0..width {
                let u = x as f64 / width as f64;
                let mut pixel = [0.0f32; 4];
                for (channel, value) in pixel.iter_mut().enumerate() {
                    let scale = params.scales[channel] as f64;
                    let offset = shift[channel];
                    let n = perlin.get([u * scale + offset, v * scale + offset]);
                    *value = (n * 0.5 + 0.5).clamp(0.0, 1.0) as f32;
                }
                samples.push(pixel);
            }
        }

        Self {
            width,
            height,
            samples,
        }
    }

    /// A single mid-range texel. Perturbing by it displaces nothing.
    pub fn neutral() -> Self {
        Self {
            width: 1,
            height: 1,
            samples: vec![[0.5; 4]],
        }
    }

    /// Build a field from raw samples. Returns `None` if the length is wrong.
    pub fn from_samples(width: u32, height: u32, samples: Vec<[f32; 4]>) -> Option<Self> {
        if width == 0 || height == 0 || samples.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[[f32; 4]] {
        &self.samples
    }

    /// Direct texel fetch with repeat wrapping.
    pub fn pixel(&self, x: i32, y: i32) -> Vec4 {
        let xi = x.rem_euclid(self.width as i32) as usize;
        let yi = y.rem_euclid(self.height as i32) as usize;
        Vec4::from_array(self.samples[xi + yi * self.width as usize])
    }

    /// Bilinear sample at texture coordinate `(x * scale, z * scale)`.
    ///
    /// Texture space is `[0, 1)` per axis with repeat wrapping and texel
    /// centers at half-integer pixel positions.
    pub fn sample_bilinear(&self, x: f32, z: f32, scale: f32) -> Vec4 {
        let px = x * scale * self.width as f32 - 0.5;
        let py = z * scale * self.height as f32 - 0.5;
        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let s00 = self.pixel(x0, y0);
        let s10 = self.pixel(x0 + 1, y0);
        let s01 = self.pixel(x0, y0 + 1);
        let s11 = self.pixel(x0 + 1, y0 + 1);

        let bottom = s00.lerp(s10, fx);
        let top = s01.lerp(s11, fx);
        bottom.lerp(top, fy)
    }

    /// Round every sample to 16-bit precision, matching what a PNG store holds.
    pub fn quantized(&self) -> Self {
        let samples = self
            .samples
            .iter()
            .map(|pixel| pixel.map(|v| dequantize(quantize(v))))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            samples,
        }
    }
}

/// `[0, 1]` float to 16-bit channel.
pub fn quantize(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16
}

/// 16-bit channel to `[0, 1]` float.
pub fn dequantize(value: u16) -> f32 {
    value as f32 / u16::MAX as f32
}
