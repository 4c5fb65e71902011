//! # Winfrith Concrete (MAT_084)
//!
//! Smeared-crack concrete model. Derived from strength and aggregate size:
//!
//! - `tm` tangent modulus, Model Code 1990 single-offset form
//! - `uts` tensile strength, Model Code 2010
//! - `fe` crack width at zero stress, `2·GF / ft` (linear softening)
//! - `asize` aggregate radius, `dmax / 2`
//!
//! No rebar is smeared in (`e`, `ys`, `eh`, `uelong` all zero), rate effects
//! are off and the crack-opening curve cards are left blank.

use crate::card::{CardText, Field};
use crate::errors::CardResult;
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{crack_width, tangent_modulus, tensile_strength, Reference, UNIT_SYSTEM};
use crate::models::{
    concrete_density_field, concrete_inputs, concrete_poisson_field, dmax_field, fc_field,
    mid_field, open_deck, DerivedParams, DMAX, FC, MID, POISSON, RO,
};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat084_winfrith";

/// RATE = 1: strain-rate effects off
const RATE: f64 = 1.0;

/// CONM = -3: units flag for mm, ms, g (density in g/mm³)
const CONM: f64 = -3.0;

pub const FIELDS: &[FieldSpec] = &[
    fc_field(),
    dmax_field(),
    mid_field(99.0),
    concrete_density_field(),
    concrete_poisson_field(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 84,
    version: 1,
    name: "Winfrith Concrete",
    category: MaterialCategory::Concrete,
    keyword: "*MAT_WINFRITH_CONCRETE",
    units: UNIT_SYSTEM,
    references: &[
        Reference::Broadhouse1995,
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

    let mut d = DerivedParams::new();
    d.insert("tm", tangent_modulus(fc))
        .insert("uts", tensile_strength(fc))
        .insert("fe", crack_width(fc, dmax))
        .insert("asize", dmax / 2.0);
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let fc = inputs.get(FC).unwrap_or(0.0);
    let dmax = inputs.get(DMAX).unwrap_or(0.0);
    let title = format!(
        "WINFRITH_Concrete_{}MPa_dmax_{}mm",
        plain_decimal(fc, 1),
        plain_decimal(dmax, 1)
    );

    let eps: Vec<Field> = ["eps1", "eps2", "eps3", "eps4", "eps5", "eps6", "eps7", "eps8"]
        .into_iter()
        .map(|label| Field::decimal(label, 0.0, 1))
        .collect();
    let p: Vec<Field> = ["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8"]
        .into_iter()
        .map(|label| Field::decimal(label, 0.0, 1))
        .collect();

    let mut deck = open_deck(def, &title, &[]);
    deck.card(&[
        Field::int("mid", inputs.get(MID)),
        Field::decimal("ro", inputs.get(RO), 4),
        Field::decimal("tm", d.get("tm"), 1),
        Field::decimal("pr", inputs.get(POISSON), 2),
        Field::decimal("ucs", fc, 1),
        Field::decimal("uts", d.get("uts"), 3),
        Field::decimal("fe", d.get("fe"), 4),
        Field::decimal("asize", d.get("asize"), 1),
    ])
    .card(&[
        Field::decimal("e", 0.0, 1),
        Field::decimal("ys", 0.0, 1),
        Field::decimal("eh", 0.0, 1),
        Field::decimal("uelong", 0.0, 1),
        Field::decimal("rate", RATE, 1),
        Field::decimal("conm", CONM, 1),
        Field::decimal("conl", 0.0, 1),
        Field::decimal("cont", 0.0, 1),
    ])
    .card(&eps)
    .card(&p);
    deck.finish()
}
