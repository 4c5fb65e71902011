//! # Mooney-Rivlin Moduli
//!
//! Small-strain moduli of the two-term Mooney-Rivlin strain energy
//! `W = C10 (I1 − 3) + C01 (I2 − 3)`.

use serde::{Deserialize, Serialize};

/// Initial moduli of a Mooney-Rivlin solid (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RubberModuli {
    /// Shear modulus G = 2(C10 + C01)
    pub shear: f64,
    /// Young's modulus E = 2G(1 + ν)
    pub young: f64,
    /// Bulk modulus K = 2G(1 + ν) / (3(1 − 2ν))
    pub bulk: f64,
}

/// Moduli from the two Mooney-Rivlin constants and Poisson's ratio
pub fn mooney_rivlin_moduli(c10: f64, c01: f64, nu: f64) -> RubberModuli {
    let shear = 2.0 * (c10 + c01);
    let young = 2.0 * shear * (1.0 + nu);
    RubberModuli {
        shear,
        young,
        bulk: young / (3.0 * (1.0 - 2.0 * nu)),
    }
}
