//! Affine transform composition and decomposition utilities.
//!
//! Everything is built on [`kurbo::Affine`]. Composition and inversion come
//! straight from kurbo; this module adds the QR-style decomposition used to
//! re-apply a composed transform onto an object's pose attributes.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

/// The parts of an affine matrix, split the way a drawable object stores
/// its pose: translation, per-axis scale, rotation and x-skew.
///
/// `angle` and `skew_x` are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decomposed {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
    pub skew_x: f64,
}

impl Default for Decomposed {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            skew_x: 0.0,
        }
    }
}

impl Decomposed {
    /// Rebuild the affine matrix from its parts.
    ///
    /// The composition order is translate, rotate, skew, scale, matching
    /// [`decompose`].
    pub fn recompose(&self) -> Affine {
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::rotate(self.angle.to_radians())
            * Affine::skew(self.skew_x.to_radians().tan(), 0.0)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

/// Decompose an affine matrix into translation, scale, rotation and x-skew.
///
/// A near-zero matrix decomposes without panicking; the caller gets the
/// degenerate scale back as-is.
pub fn decompose(transform: Affine) -> Decomposed {
    let [a, b, c, d, e, f] = transform.as_coeffs();

    let denom = a * a + b * b;
    let angle = b.atan2(a);
    let scale_x = denom.sqrt();
    let scale_y = if scale_x.abs() > f64::EPSILON {
        (a * d - c * b) / scale_x
    } else {
        0.0
    };
    let skew_x = if denom.abs() > f64::EPSILON {
        (a * c + b * d).atan2(denom)
    } else {
        0.0
    };

    Decomposed {
        translate_x: e,
        translate_y: f,
        scale_x,
        scale_y,
        angle: angle.to_degrees(),
        skew_x: skew_x.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_affine_close(left: Affine, right: Affine) {
        let l = left.as_coeffs();
        let r = right.as_coeffs();
        for i in 0..6 {
            assert!(
                (l[i] - r[i]).abs() < 1e-9,
                "coefficient {i} differs: {} vs {}",
                l[i],
                r[i]
            );
        }
    }

    #[test]
    fn test_decompose_identity() {
        let d = decompose(Affine::IDENTITY);
        assert!((d.translate_x).abs() < f64::EPSILON);
        assert!((d.translate_y).abs() < f64::EPSILON);
        assert!((d.scale_x - 1.0).abs() < 1e-12);
        assert!((d.scale_y - 1.0).abs() < 1e-12);
        assert!(d.angle.abs() < 1e-12);
        assert!(d.skew_x.abs() < 1e-12);
    }

    #[test]
    fn test_decompose_translation() {
        let d = decompose(Affine::translate((12.5, -7.0)));
        assert!((d.translate_x - 12.5).abs() < 1e-12);
        assert!((d.translate_y + 7.0).abs() < 1e-12);
        assert!((d.scale_x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decompose_rotation_and_scale() {
        let transform = Affine::translate((10.0, 20.0))
            * Affine::rotate(30f64.to_radians())
            * Affine::scale_non_uniform(2.0, 3.0);
        let d = decompose(transform);
        assert!((d.angle - 30.0).abs() < 1e-9);
        assert!((d.scale_x - 2.0).abs() < 1e-9);
        assert!((d.scale_y - 3.0).abs() < 1e-9);
        assert!((d.translate_x - 10.0).abs() < 1e-9);
        assert!((d.translate_y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_recompose_roundtrip() {
        let transform = Affine::translate((-4.0, 9.0))
            * Affine::rotate(72f64.to_radians())
            * Affine::scale_non_uniform(0.5, 1.25);
        assert_affine_close(decompose(transform).recompose(), transform);
    }

    #[test]
    fn test_roundtrip_with_skew() {
        let transform = Affine::translate((3.0, 1.0))
            * Affine::rotate(15f64.to_radians())
            * Affine::skew(20f64.to_radians().tan(), 0.0)
            * Affine::scale_non_uniform(1.5, 0.75);
        assert_affine_close(decompose(transform).recompose(), transform);
    }

    #[test]
    fn test_degenerate_scale_does_not_panic() {
        let d = decompose(Affine::scale(0.0));
        assert!(d.scale_x.abs() < f64::EPSILON);
        assert!(d.scale_y.abs() < f64::EPSILON);
    }
}
