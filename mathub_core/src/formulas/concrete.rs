//! # Concrete Formulas
//!
//! Empirical relations for normal-weight concrete, all in MPa and mm.
//!
//! ## Notation
//!
//! - `fc` = characteristic cylinder compressive strength (MPa)
//! - `fcm` = mean compressive strength, `fc + 8` (MPa)
//! - `dmax` = maximum aggregate size (mm)
//! - `ft` = uniaxial tensile strength (MPa)
//! - `GF` = fracture energy (N/mm)
//!
//! ## References
//!
//! - CEB-FIP Model Code 1990, Eq. 2.1-16 (Ec), 2.1-7 (GF)
//! - fib Model Code 2010, Eq. 5.1-3a/b (fctm)
//! - Novozhilov et al. (2022) for the CSCM cap and rate fits
//!
//! The cap, hardening and rate fits are regression curves. Their coefficients
//! are reproduced exactly and must not be rounded.

use serde::{Deserialize, Serialize};

/// Offset between characteristic and mean strength (MPa)
pub const DELTA_F: f64 = 8.0;

/// Reference modulus Ec0 (MPa)
pub const EC0: f64 = 21.5e3;

/// Reference strength fcm0 (MPa)
pub const FCM0: f64 = 10.0;

/// MPa to psi
pub const PSI_PER_MPA: f64 = 145.038;

/// Strength above which the logarithmic tensile-strength branch applies (MPa)
pub const TENSILE_BRANCH_FC: f64 = 50.0;

/// Mean compressive strength: fcm = fc + 8
#[inline]
pub fn mean_strength(fc: f64) -> f64 {
    fc + DELTA_F
}

/// Young's modulus used by the calibrated cap and damage-plasticity decks.
///
/// ```text
/// E = Ec0 · ((fcm + Δf) / fcm0)^(1/3),   fcm = fc + Δf
/// ```
///
/// The strength offset is applied twice, so `E(30) = 21500 · 4.6^(1/3)`.
/// The published calibration was fitted with this form and is kept as is.
#[inline]
pub fn elastic_modulus(fc: f64) -> f64 {
    let fcm = mean_strength(fc);
    EC0 * ((fcm + DELTA_F) / FCM0).powf(1.0 / 3.0)
}

/// Model Code 1990 tangent modulus: `Ec = Ec0 · (fcm / fcm0)^(1/3)`
#[inline]
pub fn tangent_modulus(fc: f64) -> f64 {
    EC0 * (mean_strength(fc) / FCM0).powf(1.0 / 3.0)
}

/// Shear modulus: G = E / (2(1 + ν))
#[inline]
pub fn shear_modulus(e: f64, nu: f64) -> f64 {
    e / (2.0 * (1.0 + nu))
}

/// Bulk modulus: K = E / (3(1 − 2ν))
#[inline]
pub fn bulk_modulus(e: f64, nu: f64) -> f64 {
    e / (3.0 * (1.0 - 2.0 * nu))
}

/// Uniaxial tensile strength (Model Code 2010).
///
/// - `ft = 0.3 · fc^(2/3)`                 for fc ≤ 50
/// - `ft = 2.12 · ln(1 + 0.1 · (fc + 8))`  for fc > 50
///
/// The two branches do not meet exactly at 50 MPa; each side keeps its own
/// formula.
#[inline]
pub fn tensile_strength(fc: f64) -> f64 {
    if fc <= TENSILE_BRANCH_FC {
        0.3 * fc.powf(2.0 / 3.0)
    } else {
        2.12 * (1.0 + 0.1 * mean_strength(fc)).ln()
    }
}

/// Fracture energy pair (N/mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractureEnergy {
    /// Base value from aggregate size
    pub gf0: f64,
    /// Strength-scaled value
    pub gf: f64,
}

/// Fracture energy (Model Code 1990).
///
/// ```text
/// GF0 = 0.021 + 5.357e-4 · dmax
/// GF  = GF0 · (fcm / fcm0)^0.7
/// ```
#[inline]
pub fn fracture_energy(fc: f64, dmax: f64) -> FractureEnergy {
    let gf0 = 0.021 + 5.357e-4 * dmax;
    let gf = gf0 * (mean_strength(fc) / FCM0).powf(0.7);
    FractureEnergy { gf0, gf }
}

/// Crack opening at zero stress for linear softening: wc = 2·GF / ft (mm)
#[inline]
pub fn crack_width(fc: f64, dmax: f64) -> f64 {
    2.0 * fracture_energy(fc, dmax).gf / tensile_strength(fc)
}

/// Shear-failure surface parameters of the continuous surface cap model:
/// compressive meridian plus the torsion (1) and tension (2) meridians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapShape {
    pub alpha: f64,
    pub theta: f64,
    pub lamda: f64,
    pub beta: f64,
    pub alpha1: f64,
    pub theta1: f64,
    pub lamda1: f64,
    pub beta1: f64,
    pub alpha2: f64,
    pub theta2: f64,
    pub lamda2: f64,
    pub beta2: f64,
}

/// Cap-model meridian fits as functions of fc (Novozhilov et al. 2022)
pub fn cap_shape(fc: f64) -> CapShape {
    CapShape {
        alpha: 13.9846 * (fc / 68.8756).exp() - 13.8981,
        theta: 0.3533 - 3.3294e-4 * fc - 3.8182e-6 * fc.powi(2),
        lamda: 3.6657 * (fc / 39.9363).exp() - 4.7092,
        beta: 18.17791 * fc.powf(-1.7163),

        alpha1: 0.82,
        theta1: 0.0,
        lamda1: 0.24,
        beta1: 0.33565 * fc.powf(-0.95383),

        alpha2: 0.76,
        theta2: 0.0,
        lamda2: 0.26,
        beta2: 0.285 * fc.powf(-0.94843),
    }
}

/// Cap aspect ratio and initial cap location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapHardening {
    pub r: f64,
    pub xd: f64,
}

/// R = 4.45994·e^(−fc/11.51679) + 1.95358, XD = 17.087 + 1.892·fc
pub fn cap_hardening(fc: f64) -> CapHardening {
    CapHardening {
        r: 4.45994 * (-fc / 11.51679).exp() + 1.95358,
        xd: 17.087 + 1.892 * fc,
    }
}

/// Viscoplastic rate-effect parameters of the cap model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateParameters {
    pub eta0c: f64,
    pub nc: f64,
    pub eta0t: f64,
    pub nt: f64,
    pub overc: f64,
    pub overt: f64,
    pub srate: f64,
    pub repow: f64,
}

/// Rate parameters as functions of fc.
///
/// `eta0c` is fitted against strength in psi (`fc · 145.038`); the other
/// fits use MPa. The tensile overstress limit reuses the compressive fit.
pub fn rate_parameters(fc: f64) -> RateParameters {
    let fpsi = fc * PSI_PER_MPA;
    let overc = 1.309663e-2 * fc.powi(2) - 0.3927659 * fc + 21.45;

    RateParameters {
        eta0c: 1.2772337e-11 * fpsi.powi(2) - 1.0613722e-7 * fpsi + 3.203497e-4,
        nc: 0.78,
        eta0t: 8.0614774e-13 * fc.powi(2) - 9.77736719e-10 * fc + 5.0752351e-5,
        nt: 0.48,
        overc,
        overt: overc,
        srate: 1.0,
        repow: 1.0,
    }
}

/// Eccentricity of the Willam-Warnke deviatoric section (Grassl & Jirásek).
///
/// ```text
/// fbc = 1.16 · fc
/// ε   = ft · (fbc² − fc²) / (fbc · (fc² − ft²))
/// e   = (1 + ε) / (2 − ε)
/// ```
pub fn eccentricity(fc: f64, ft: f64) -> f64 {
    let fbc = 1.16 * fc;
    let eps = ft * (fbc.powi(2) - fc.powi(2)) / (fbc * (fc.powi(2) - ft.powi(2)));
    (1.0 + eps) / (2.0 - eps)
}
