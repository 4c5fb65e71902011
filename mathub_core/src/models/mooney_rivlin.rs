//! # Mooney-Rivlin Rubber (MAT_027)
//!
//! Two-constant hyperelastic rubber given directly by `A` (C10) and `B`
//! (C01). Card 2 (test-curve fitting) is left blank. The small-strain
//! moduli are derived for reference and written as comments.

use crate::card::{CardText, Field};
use crate::errors::{CardError, CardResult};
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{mooney_rivlin_moduli, Reference, UNIT_SYSTEM};
use crate::models::{mid_field, open_deck, DerivedParams, MID, RO};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat027_mooney_rivlin";

pub const FIELDS: &[FieldSpec] = &[
    mid_field(1.0),
    FieldSpec::number(RO, "Mass density (RO)", "g/mm^3", 1.1e-3)
        .with_min(1e-6)
        .with_step(1e-4),
    FieldSpec::number("pr", "Poisson ratio (PR)", "-", 0.495)
        .with_min(0.0)
        .with_max(0.4999)
        .with_step(0.001),
    FieldSpec::number("a", "Constant C10 (A)", "MPa", 0.5).with_step(0.01),
    FieldSpec::number("b", "Constant C01 (B)", "MPa", 0.1).with_step(0.01),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 27,
    version: 1,
    name: "Mooney-Rivlin Rubber",
    category: MaterialCategory::Rubber,
    keyword: "*MAT_MOONEY-RIVLIN_RUBBER",
    units: UNIT_SYSTEM,
    references: &[Reference::MooneyRivlin],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::MaterialId,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let a = inputs.require(KEY, "a")?;
    let b = inputs.require(KEY, "b")?;
    let pr = inputs.require(KEY, "pr")?;

    let moduli = mooney_rivlin_moduli(a, b, pr);
    if moduli.shear <= 0.0 {
        return Err(CardError::derivation(
            KEY,
            "g",
            format!("A + B must be positive, got {}", a + b),
        ));
    }

    let mut d = DerivedParams::new();
    d.insert("g", moduli.shear)
        .insert("e", moduli.young)
        .insert("k", moduli.bulk);
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let value = |key: &str| inputs.get(key);
    let title = format!(
        "MAT_MOONEY-RIVLIN_C10_{}_C01_{}",
        plain_decimal(value("a").unwrap_or(0.0), 3),
        plain_decimal(value("b").unwrap_or(0.0), 3)
    );
    let note = format!(
        "Derived: G = {} MPa, E = {} MPa, K = {} MPa",
        plain_decimal(d.get("g").unwrap_or(0.0), 4),
        plain_decimal(d.get("e").unwrap_or(0.0), 4),
        plain_decimal(d.get("k").unwrap_or(0.0), 2)
    );

    let mut deck = open_deck(def, &title, &[note]);
    deck.card(&[
        Field::int("mid", value(MID)),
        Field::decimal("ro", value(RO), 5),
        Field::decimal("pr", value("pr"), 4),
        Field::decimal("a", value("a"), 4),
        Field::decimal("b", value("b"), 4),
        Field::decimal("ref", 0.0, 1),
    ])
    .card(&[
        Field::decimal("sgl", 0.0, 1),
        Field::decimal("sw", 0.0, 1),
        Field::decimal("st", 0.0, 1),
        Field::int("lcid1", 0.0),
        Field::decimal("data", 0.0, 1),
        Field::int("lcid2", 0.0),
        Field::decimal("bstart", 0.0, 1),
        Field::decimal("tramp", 0.0, 1),
    ]);
    deck.finish()
}
