//! Kaleidoscope fold: angular mirroring of a coordinate into one repeating
//! wedge, producing the radial symmetry of the effect.

use crate::formula::gmod;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Number of mirrored wedges around the circle.
pub const SECTIONS: f32 = 10.0;

/// Angular width of one wedge.
pub const WEDGE: f32 = TAU / SECTIONS;

/// Fold an angle into `[0, PI / SECTIONS]`.
///
/// The angle is wrapped into one wedge, then reflected around the wedge
/// midline, so an angle and its mirror image inside the wedge land on the
/// same folded value.
pub fn fold_angle(angle: f32) -> f32 {
    let ma = gmod(angle, WEDGE);
    (ma - PI / SECTIONS).abs()
}

/// Fold a position through the kaleidoscope and re-center it into the unit
/// sample range.
///
/// `spin` is added to the polar angle before folding; radius is preserved,
/// so the fold only mirrors, never scales.
pub fn fold_point(pos: Vec2, spin: f32) -> Vec2 {
    let rad = pos.length();
    let angle = pos.y.atan2(pos.x) + spin;
    let ma = fold_angle(angle);
    Vec2::new(ma.cos(), ma.sin()) * rad + Vec2::splat(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {} ~ {}", a, b);
    }

    #[test]
    fn test_fold_angle_mirror_symmetric() {
        // an angle and its reflection within one wedge fold identically
        let mut theta = 0.0f32;
        while theta < WEDGE {
            assert_close(fold_angle(theta), fold_angle(WEDGE - theta));
            theta += WEDGE / 64.0;
        }
    }

    #[test]
    fn test_fold_angle_bounded_by_half_wedge() {
        let mut theta = -12.0f32;
        while theta < 12.0 {
            let folded = fold_angle(theta);
            assert!(folded >= 0.0 && folded <= PI / SECTIONS + 1e-6);
            theta += 0.01;
        }
    }

    #[test]
    fn test_fold_angle_periodic_per_wedge() {
        assert_close(fold_angle(0.1), fold_angle(0.1 + WEDGE));
        assert_close(fold_angle(0.1), fold_angle(0.1 + 3.0 * WEDGE));
    }

    #[test]
    fn test_fold_point_mirror_symmetric() {
        let rad = 0.3f32;
        let mut theta = 0.0f32;
        while theta < WEDGE {
            let a = Vec2::new(theta.cos(), theta.sin()) * rad;
            let mirrored = WEDGE - theta;
            let b = Vec2::new(mirrored.cos(), mirrored.sin()) * rad;
            let fa = fold_point(a, 0.0);
            let fb = fold_point(b, 0.0);
            assert_close(fa.x, fb.x);
            assert_close(fa.y, fb.y);
            theta += WEDGE / 32.0;
        }
    }

    #[test]
    fn test_fold_point_preserves_radius() {
        for i in 0..50 {
            let theta = i as f32 * 0.41;
            let rad = 0.05 + (i as f32) * 0.01;
            let pos = Vec2::new(theta.cos(), theta.sin()) * rad;
            let folded = fold_point(pos, 0.7);
            assert_close((folded - Vec2::splat(0.5)).length(), rad);
        }
    }

    #[test]
    fn test_fold_point_center_maps_to_sample_center() {
        let folded = fold_point(Vec2::ZERO, 0.0);
        assert_close(folded.x, 0.5);
        assert_close(folded.y, 0.5);
    }
}
