//! # Metal Plasticity Helpers
//!
//! Small relations shared by the bilinear and tabulated metal models.
//! Callers check the domain conditions (`Et < E`, `Tm > Tr`) first; these
//! functions do not.

use serde::{Deserialize, Serialize};

/// Plastic hardening modulus from the elastic and tangent moduli.
///
/// ```text
/// Ep = E · Et / (E − Et)
/// ```
#[inline]
pub fn plastic_modulus(e: f64, etan: f64) -> f64 {
    e * etan / (e - etan)
}

/// One point of an effective-stress / effective-plastic-strain curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardeningPoint {
    pub eps: f64,
    pub stress: f64,
}

/// Linear-hardening curve sampled at `points` equally spaced plastic
/// strains from 0 to `eps_max`: `σ = σy + Ep · εp`.
pub fn hardening_curve(sigy: f64, ep: f64, eps_max: f64, points: usize) -> Vec<HardeningPoint> {
    if points < 2 {
        return vec![HardeningPoint { eps: 0.0, stress: sigy }];
    }
    let step = eps_max / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let eps = step * i as f64;
            HardeningPoint {
                eps,
                stress: sigy + ep * eps,
            }
        })
        .collect()
}

/// Temperature span between melting and room temperature: Tm − Tr
#[inline]
pub fn homologous_range(tm: f64, tr: f64) -> f64 {
    tm - tr
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plastic_modulus() {
        // E = 210 GPa, Et = 1 GPa
        assert_relative_eq!(plastic_modulus(210_000.0, 1_000.0), 210_000.0 * 1_000.0 / 209_000.0);
    }

    #[test]
    fn test_hardening_curve_endpoints() {
        let curve = hardening_curve(250.0, 1000.0, 0.21, 8);
        assert_eq!(curve.len(), 8);
        assert_eq!(curve[0].eps, 0.0);
        assert_eq!(curve[0].stress, 250.0);
        assert_relative_eq!(curve[7].eps, 0.21);
        assert_relative_eq!(curve[7].stress, 250.0 + 1000.0 * 0.21);
        assert_relative_eq!(curve[1].eps, 0.03);
    }

    #[test]
    fn test_hardening_curve_degenerate() {
        let curve = hardening_curve(250.0, 1000.0, 0.2, 1);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].stress, 250.0);
    }
}
