//! # Concrete Damage Plasticity Model 2 (MAT_273)
//!
//! `*MAT_CDPM` with exponential tensile softening (`TYPE = 2`). Stiffness,
//! strength and fracture energy follow the same Model Code fits as the cap
//! model; the plasticity and damage constants are the values recommended by
//! Grassl et al. for normal-strength concrete.
//!
//! - `e` [`elastic_modulus`], `ft` [`tensile_strength`]
//! - `ecc` Willam-Warnke eccentricity from `fc`, `ft` and `fbc = 1.16 fc`
//! - `wf = GF / ft`, the crack opening of the exponential law

use crate::card::{CardText, Field};
use crate::errors::{CardError, CardResult};
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{
    eccentricity, elastic_modulus, fracture_energy, tensile_strength, Reference, UNIT_SYSTEM,
};
use crate::models::{
    concrete_density_field, concrete_inputs, concrete_poisson_field, dmax_field, fc_field,
    mid_field, open_deck, DerivedParams, DMAX, FC, MID, POISSON, RO,
};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat273_cdp";

// ===== PLASTICITY CONSTANTS =====

/// Initial hardening yield strength ratio
const QH0: f64 = 0.3;
/// Hardening modulus
const HP: f64 = 0.5;
/// Hardening ductility parameters
const AH: f64 = 0.08;
const BH: f64 = 0.003;
const CH: f64 = 2.0;
const DH: f64 = 1.0e-6;
/// Ductility under shear
const AS: f64 = 15.0;
/// Flow-rule non-associativity
const DF: f64 = 0.85;
/// Rate-dependence reference strength (MPa)
const FC0: f64 = 10.0;

// ===== DAMAGE CONSTANTS =====

/// Exponential tensile softening
const SOFTENING_TYPE: f64 = 2.0;
/// Compressive damage ductility
const BS: f64 = 1.0;
/// Compressive damage strain threshold
const EFC: f64 = 1.0e-4;

pub const FIELDS: &[FieldSpec] = &[
    fc_field(),
    dmax_field(),
    mid_field(1001.0),
    concrete_density_field(),
    concrete_poisson_field(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 273,
    version: 1,
    name: "Concrete Damage Plasticity Model 2",
    category: MaterialCategory::Concrete,
    keyword: "*MAT_CDPM",
    units: UNIT_SYSTEM,
    references: &[
        Reference::Grassl2013,
        Reference::ModelCode1990,
        Reference::ModelCode2010,
    ],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::StrengthAndAggregate,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let (fc, dmax) = concrete_inputs(KEY, inputs)?;

    let ft = tensile_strength(fc);
    if ft >= fc {
        return Err(CardError::derivation(
            KEY,
            "ecc",
            format!("tensile strength {:.3} MPa is not below fc {:.3} MPa", ft, fc),
        ));
    }
    let gf = fracture_energy(fc, dmax).gf;

    let mut d = DerivedParams::new();
    d.insert("e", elastic_modulus(fc))
        .insert("ft", ft)
        .insert("ecc", eccentricity(fc, ft))
        .insert("gf", gf)
        .insert("wf", gf / ft);
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let fc = inputs.get(FC).unwrap_or(0.0);
    let dmax = inputs.get(DMAX).unwrap_or(0.0);
    let title = format!(
        "CDPM_{}MPa_dmax{}mm",
        plain_decimal(fc, 1),
        plain_decimal(dmax, 1)
    );

    let mut deck = open_deck(def, &title, &[]);
    deck.card(&[
        Field::int("mid", inputs.get(MID)),
        Field::decimal("ro", inputs.get(RO), 4),
        Field::decimal("e", d.get("e"), 1),
        Field::decimal("pr", inputs.get(POISSON), 2),
        Field::decimal("ecc", d.get("ecc"), 4),
        Field::decimal("qh0", QH0, 2),
        Field::decimal("ft", d.get("ft"), 3),
        Field::decimal("fc", fc, 1),
    ])
    .card(&[
        Field::decimal("hp", HP, 2),
        Field::decimal("ah", AH, 3),
        Field::decimal("bh", BH, 4),
        Field::decimal("ch", CH, 1),
        Field::auto("dh", DH),
        Field::decimal("as", AS, 1),
        Field::decimal("df", DF, 2),
        Field::decimal("fc0", FC0, 1),
    ])
    .card(&[
        Field::decimal("type", SOFTENING_TYPE, 1),
        Field::decimal("bs", BS, 1),
        Field::decimal("wf", d.get("wf"), 5),
        Field::decimal("wf1", 0.0, 1),
        Field::decimal("ft1", 0.0, 1),
        Field::decimal("strflg", 0.0, 1),
        Field::decimal("failflg", 0.0, 1),
        Field::decimal("efc", EFC, 4),
    ]);
    deck.finish()
}
