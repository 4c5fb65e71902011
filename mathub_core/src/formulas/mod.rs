//! # Material Formulas
//!
//! Closed-form empirical and analytic formulas that turn a handful of
//! physical inputs into solver parameters. Generators share these; no model
//! carries its own copy of a constant.
//!
//! ## Modules
//!
//! - [`concrete`] - strength, stiffness, fracture and cap-model fits (MPa, mm)
//! - [`metal`] - hardening and thermal-softening helpers
//! - [`rubber`] - Mooney-Rivlin moduli
//!
//! ## Units
//!
//! All generators write the `mm-ms-g-N-MPa` system: lengths in mm, time in
//! ms, mass in g, force in N, stress in MPa, density in g/mm³.

pub mod concrete;
pub mod metal;
pub mod rubber;

use serde::{Deserialize, Serialize};

pub use concrete::{
    bulk_modulus, cap_hardening, cap_shape, crack_width, eccentricity, elastic_modulus,
    fracture_energy, mean_strength, rate_parameters, shear_modulus, tangent_modulus,
    tensile_strength, CapHardening, CapShape, FractureEnergy, RateParameters,
};
pub use metal::{hardening_curve, homologous_range, plastic_modulus, HardeningPoint};
pub use rubber::{mooney_rivlin_moduli, RubberModuli};

/// Unit system written into every generated deck
pub const UNIT_SYSTEM: &str = "mm-ms-g-N-MPa";

/// Published source of a formula set or a calibration.
///
/// Generators cite these in the comment banner of each deck so the numbers
/// can be traced back to their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// CEB-FIP Model Code 1990 (modulus, fracture energy)
    ModelCode1990,
    /// fib Model Code 2010 (tensile strength)
    ModelCode2010,
    /// Novozhilov, Dmitriev & Mikhaluk (2022), CSCM calibration
    Novozhilov2022,
    /// Murray (2007), FHWA CSCM users manual
    Murray2007,
    /// Broadhouse (1995), Winfrith concrete model
    Broadhouse1995,
    /// Malvar et al. (1997), K&C concrete model
    Malvar1997,
    /// Grassl et al. (2013), CDPM2
    Grassl2013,
    /// Johnson & Cook (1983)
    JohnsonCook1983,
    /// Cowper & Symonds (1957), strain-rate scaling
    CowperSymonds1957,
    /// Mooney (1940) / Rivlin (1948) hyperelasticity
    MooneyRivlin,
}

impl Reference {
    /// Full citation for deck banners and the catalog
    pub fn citation(&self) -> &'static str {
        match self {
            Reference::ModelCode1990 => "CEB-FIP Model Code 1990, Thomas Telford (1993)",
            Reference::ModelCode2010 => "fib Model Code for Concrete Structures 2010, Ernst & Sohn (2013)",
            Reference::Novozhilov2022 => {
                "Novozhilov, Dmitriev & Mikhaluk, Precise calibration of the continuous surface cap model \
                 for concrete simulation, Buildings 12(5) 636 (2022), doi:10.3390/buildings12050636"
            }
            Reference::Murray2007 => "Murray, Users Manual for LS-DYNA Concrete Material Model 159, FHWA-HRT-05-062 (2007)",
            Reference::Broadhouse1995 => "Broadhouse, The Winfrith concrete model in LS-DYNA3D, SPD/D(95)363 (1995)",
            Reference::Malvar1997 => {
                "Malvar, Crawford, Wesevich & Simons, A plasticity concrete material model for DYNA3D, \
                 Int. J. Impact Eng. 19 (1997)"
            }
            Reference::Grassl2013 => {
                "Grassl, Xenos, Nystrom, Rempling & Gylltoft, A damage-plasticity approach to modelling \
                 the failure of concrete, Int. J. Solids Struct. 50 (2013)"
            }
            Reference::JohnsonCook1983 => {
                "Johnson & Cook, A constitutive model and data for metals subjected to large strains, \
                 high strain rates and high temperatures (1983)"
            }
            Reference::CowperSymonds1957 => "Cowper & Symonds, Strain hardening and strain-rate effects (1957)",
            Reference::MooneyRivlin => "Mooney, J. Appl. Phys. 11 (1940); Rivlin, Phil. Trans. R. Soc. A 241 (1948)",
        }
    }

    /// Short form for tables
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::ModelCode1990 => "MC1990",
            Reference::ModelCode2010 => "MC2010",
            Reference::Novozhilov2022 => "Novozhilov 2022",
            Reference::Murray2007 => "Murray 2007",
            Reference::Broadhouse1995 => "Broadhouse 1995",
            Reference::Malvar1997 => "Malvar 1997",
            Reference::Grassl2013 => "Grassl 2013",
            Reference::JohnsonCook1983 => "Johnson-Cook 1983",
            Reference::CowperSymonds1957 => "Cowper-Symonds 1957",
            Reference::MooneyRivlin => "Mooney-Rivlin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citations_are_single_line() {
        let all = [
            Reference::ModelCode1990,
            Reference::ModelCode2010,
            Reference::Novozhilov2022,
            Reference::Murray2007,
            Reference::Broadhouse1995,
            Reference::Malvar1997,
            Reference::Grassl2013,
            Reference::JohnsonCook1983,
            Reference::CowperSymonds1957,
            Reference::MooneyRivlin,
        ];
        for r in all {
            assert!(!r.citation().contains('\n'), "{:?} citation spans lines", r);
            assert!(!r.short_form().is_empty());
        }
        assert!(Reference::Novozhilov2022.citation().contains("10.3390/buildings12050636"));
    }
}
