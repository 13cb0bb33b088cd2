//! Raw-pixel to model-input image transforms.
//!
//! Mirrors the usual digit-classification preprocessing chain: scale `u8`
//! pixels to [0, 1], normalize with fixed mean/std, then optionally
//! center-crop and resize. Applied lazily on every item access.

use ndarray::{Array2, ArrayView2, s};
use serde::{Deserialize, Serialize};

/// Interpolation used when resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Nearest-neighbour sampling.
    Nearest,
    /// Bilinear interpolation with half-pixel centers.
    Bilinear,
}

/// Crop/resize geometry and normalization constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Side length of the centered crop window; no-op when it matches the input.
    pub center_crop: usize,
    /// Output side length; no-op when it matches the cropped size.
    pub resize: usize,
    /// Interpolation for the resize step.
    pub resize_mode: ResizeMode,
    /// Normalization mean (digit-image convention 0.1307).
    pub mean: f32,
    /// Normalization standard deviation (digit-image convention 0.3081).
    pub std: f32,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            center_crop: 28,
            resize: 28,
            resize_mode: ResizeMode::Bilinear,
            mean: 0.1307,
            std: 0.3081,
        }
    }
}

impl ImageTransform {
    /// Scale, normalize, crop, and resize one raw image.
    pub fn apply(&self, raw: ArrayView2<'_, u8>) -> Array2<f32> {
        let mut image = raw.mapv(|p| (f32::from(p) / 255.0 - self.mean) / self.std);
        let (h, w) = image.dim();
        if self.center_crop < h.min(w) {
            let top = (h - self.center_crop) / 2;
            let left = (w - self.center_crop) / 2;
            image = image
                .slice(s![
                    top..top + self.center_crop,
                    left..left + self.center_crop
                ])
                .to_owned();
        }
        if self.resize != image.nrows() {
            image = match self.resize_mode {
                ResizeMode::Nearest => resize_nearest(&image, self.resize),
                ResizeMode::Bilinear => resize_bilinear(&image, self.resize),
            };
        }
        image
    }
}

fn resize_nearest(src: &Array2<f32>, out: usize) -> Array2<f32> {
    let (h, w) = src.dim();
    Array2::from_shape_fn((out, out), |(r, c)| {
        let sr = (((r as f32 + 0.5) * h as f32 / out as f32) as usize).min(h - 1);
        let sc = (((c as f32 + 0.5) * w as f32 / out as f32) as usize).min(w - 1);
        src[(sr, sc)]
    })
}

fn resize_bilinear(src: &Array2<f32>, out: usize) -> Array2<f32> {
    let (h, w) = src.dim();
    let scale_r = h as f32 / out as f32;
    let scale_c = w as f32 / out as f32;
    Array2::from_shape_fn((out, out), |(r, c)| {
        // Half-pixel source coordinates, clamped to the image.
        let sr = ((r as f32 + 0.5) * scale_r - 0.5).clamp(0.0, (h - 1) as f32);
        let sc = ((c as f32 + 0.5) * scale_c - 0.5).clamp(0.0, (w - 1) as f32);
        let r0 = sr.floor() as usize;
        let c0 = sc.floor() as usize;
        let r1 = (r0 + 1).min(h - 1);
        let c1 = (c0 + 1).min(w - 1);
        let fr = sr - r0 as f32;
        let fc = sc - c0 as f32;
        let top = src[(r0, c0)] * (1.0 - fc) + src[(r0, c1)] * fc;
        let bottom = src[(r1, c0)] * (1.0 - fc) + src[(r1, c1)] * fc;
        top * (1.0 - fr) + bottom * fr
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn default_transform_only_normalizes() {
        let raw = Array2::from_elem((28, 28), 255_u8);
        let out = ImageTransform::default().apply(raw.view());
        assert_eq!(out.dim(), (28, 28));
        let expected = (1.0 - 0.1307) / 0.3081;
        assert!((out[(0, 0)] - expected).abs() < 1e-6);
    }

    #[test]
    fn center_crop_takes_middle_window() {
        let mut raw = Array2::zeros((28, 28));
        raw[(14, 14)] = 255_u8;
        let t = ImageTransform {
            center_crop: 4,
            resize: 4,
            ..ImageTransform::default()
        };
        let out = t.apply(raw.view());
        assert_eq!(out.dim(), (4, 4));
        // (14, 14) lands at (2, 2) inside the 4×4 window starting at (12, 12).
        let bright = (255.0 / 255.0 - 0.1307) / 0.3081;
        assert!((out[(2, 2)] - bright).abs() < 1e-6);
    }

    #[test]
    fn nearest_resize_of_constant_image_is_constant() {
        let raw = Array2::from_elem((28, 28), 128_u8);
        let t = ImageTransform {
            resize: 14,
            resize_mode: ResizeMode::Nearest,
            ..ImageTransform::default()
        };
        let out = t.apply(raw.view());
        assert_eq!(out.dim(), (14, 14));
        let expected = (128.0 / 255.0 - 0.1307) / 0.3081;
        assert!(out.iter().all(|p| (p - expected).abs() < 1e-6));
    }

    #[test]
    fn bilinear_resize_stays_within_source_range() {
        let raw = Array2::from_shape_fn((28, 28), |(r, c)| ((r * c) % 256) as u8);
        let t = ImageTransform {
            resize: 10,
            resize_mode: ResizeMode::Bilinear,
            ..ImageTransform::default()
        };
        let normalized = raw.mapv(|p| (f32::from(p) / 255.0 - 0.1307) / 0.3081);
        let lo = normalized.iter().fold(f32::INFINITY, |m, &v| m.min(v));
        let hi = normalized.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        let out = t.apply(raw.view());
        assert!(out.iter().all(|&p| p >= lo - 1e-6 && p <= hi + 1e-6));
    }
}
