//! # Material Models
//!
//! One module per LS-DYNA material generator. Each module declares
//!
//! - a static `FIELDS` table of user inputs,
//! - a pure `derive` step computing solver parameters with [`crate::formulas`],
//! - a pure `render` step laying the parameters out with [`crate::card`],
//! - a `DEFINITION` tying them together for the registry.
//!
//! | Key | Keyword | Family |
//! |-----|---------|--------|
//! | `mat003_plastic_kinematic` | `*MAT_PLASTIC_KINEMATIC` | metal |
//! | `mat015_johnson_cook` | `*MAT_JOHNSON_COOK` | metal |
//! | `mat024_piecewise_linear_plasticity` | `*MAT_PIECEWISE_LINEAR_PLASTICITY` | metal |
//! | `mat027_mooney_rivlin` | `*MAT_MOONEY-RIVLIN_RUBBER` | rubber |
//! | `mat072_kcc_rel3` | `*MAT_CONCRETE_DAMAGE_REL3` | concrete |
//! | `mat084_winfrith` | `*MAT_WINFRITH_CONCRETE` | concrete |
//! | `mat159_cscm` | `*MAT_CSCM` | concrete |
//! | `mat273_cdp` | `*MAT_CDPM` | concrete |

pub mod cdpm;
pub mod cscm;
pub mod johnson_cook;
pub mod kcc;
pub mod mooney_rivlin;
pub mod piecewise_linear;
pub mod plastic_kinematic;
pub mod winfrith;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::card::DeckBuilder;
use crate::errors::{CardError, CardResult};
use crate::fields::{FieldSpec, InputValues};
use crate::registry::GeneratorDefinition;

// ===== SHARED FIELD KEYS =====

/// Material ID
pub const MID: &str = "mid";
/// Mass density
pub const RO: &str = "ro";
/// Characteristic compressive strength of concrete
pub const FC: &str = "fc_mpa";
/// Maximum aggregate size
pub const DMAX: &str = "dmax_mm";
/// Poisson's ratio of concrete
pub const POISSON: &str = "poisson_ratio";

/// Normal-weight concrete density (g/mm³)
pub const CONCRETE_DENSITY: f64 = 2.3e-3;

/// Structural steel density (g/mm³)
pub const STEEL_DENSITY: f64 = 7.85e-3;

/// Cowper-Symonds C of mild steel, 40.4 /s expressed in 1/ms
pub const MILD_STEEL_SRC: f64 = 40.4e-3;

/// Every built-in generator
pub fn standard_definitions() -> [GeneratorDefinition; 8] {
    [
        plastic_kinematic::DEFINITION,
        johnson_cook::DEFINITION,
        piecewise_linear::DEFINITION,
        mooney_rivlin::DEFINITION,
        kcc::DEFINITION,
        winfrith::DEFINITION,
        cscm::DEFINITION,
        cdpm::DEFINITION,
    ]
}

// ===== DERIVED PARAMETERS =====

/// Named quantities computed by a generator's derive step.
///
/// Keys follow the solver field names where a quantity maps onto one
/// (`g`, `k`, `gfc`), so a derived map reads like the card it feeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedParams(BTreeMap<String, f64>);

impl DerivedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First quantity that is NaN or infinite, in key order
    pub fn first_non_finite(&self) -> Option<(&str, f64)> {
        self.iter().find(|(_, v)| !v.is_finite())
    }
}

// ===== SHARED HELPERS =====

pub(crate) const fn mid_field(default: f64) -> FieldSpec {
    FieldSpec::integer(MID, "Material ID (MID)", "-", default).with_min(1.0)
}

pub(crate) const fn fc_field() -> FieldSpec {
    FieldSpec::number(FC, "Compressive strength (fc)", "MPa", 30.0)
        .with_min(1.0)
        .with_step(0.1)
}

pub(crate) const fn dmax_field() -> FieldSpec {
    FieldSpec::number(DMAX, "Max aggregate size (dmax)", "mm", 16.0)
        .with_min(1.0)
        .with_step(0.1)
}

pub(crate) const fn concrete_density_field() -> FieldSpec {
    FieldSpec::number(RO, "Mass density (RO)", "g/mm^3", CONCRETE_DENSITY)
        .with_min(1e-6)
        .with_step(1e-4)
        .advanced()
}

pub(crate) const fn concrete_poisson_field() -> FieldSpec {
    FieldSpec::number(POISSON, "Poisson ratio (PR)", "-", 0.2)
        .with_min(0.0)
        .with_max(0.49)
        .with_step(0.01)
        .advanced()
}

/// A required input that must be strictly positive
pub(crate) fn positive(generator: &str, inputs: &InputValues, key: &str) -> CardResult<f64> {
    let value = inputs.require(generator, key)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CardError::derivation(generator, key, format!("must be positive, got {}", value)))
    }
}

/// Strength and aggregate size shared by every concrete generator
pub(crate) fn concrete_inputs(generator: &str, inputs: &InputValues) -> CardResult<(f64, f64)> {
    Ok((positive(generator, inputs, FC)?, positive(generator, inputs, DMAX)?))
}

/// Start a deck with the common banner, deck title, material keyword and
/// material title. `notes` are extra `$` lines written after the banner.
pub(crate) fn open_deck(def: &GeneratorDefinition, title: &str, notes: &[String]) -> DeckBuilder {
    let mut deck = DeckBuilder::new();
    deck.comment(format!(
        "Material Hub: {} ({}, MAT_{:03}, v{})",
        def.name, def.keyword, def.material_id, def.version
    ))
    .comment(format!("Units: {}", def.units));
    for reference in def.references {
        deck.comment(format!("Ref: {}", reference.citation()));
    }
    for note in notes {
        deck.comment(note);
    }
    deck.deck_title(format!("Material Hub deck: {}", def.name))
        .keyword(format!("{}_TITLE", def.keyword))
        .title(title);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DeckLine;

    #[test]
    fn test_derived_params_non_finite() {
        let mut d = DerivedParams::new();
        d.insert("g", 1.0).insert("k", f64::NAN).insert("a", 2.0);
        assert_eq!(d.len(), 3);
        let (key, value) = d.first_non_finite().unwrap();
        assert_eq!(key, "k");
        assert!(value.is_nan());
    }

    #[test]
    fn test_positive_guard() {
        let inputs: InputValues = [(FC, -5.0), (DMAX, 16.0)].into_iter().collect();
        let err = concrete_inputs("mat159_cscm", &inputs).unwrap_err();
        assert_eq!(err.error_code(), "DERIVATION_ERROR");

        let empty = InputValues::new();
        assert!(positive("mat159_cscm", &empty, FC).is_err());
    }

    #[test]
    fn test_open_deck_layout() {
        let card = open_deck(&cscm::DEFINITION, "MAT_CSCM_30.0MPa", &["Derived: none".to_string()]).finish();
        let texts: Vec<&str> = card.lines().iter().map(DeckLine::text).collect();

        assert_eq!(texts[0], "*KEYWORD");
        assert!(texts[1].starts_with("$ Material Hub: CSCM Concrete (*MAT_CSCM, MAT_159"));
        assert_eq!(texts[2], "$ Units: mm-ms-g-N-MPa");
        assert!(texts.contains(&"$ Derived: none"));
        let kw = texts.iter().position(|t| *t == "*MAT_CSCM_TITLE").unwrap();
        assert_eq!(texts[kw + 1], "MAT_CSCM_30.0MPa");
        assert!(texts.iter().position(|t| *t == "*TITLE").unwrap() < kw);
    }

    #[test]
    fn test_standard_keys_are_unique() {
        let defs = standard_definitions();
        let mut keys: Vec<_> = defs.iter().map(|d| d.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), defs.len());
    }
}
