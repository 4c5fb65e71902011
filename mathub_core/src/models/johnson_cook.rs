//! # Johnson-Cook (MAT_015)
//!
//! Flow stress `σ = (A + B εp^n)(1 + C ln ε̇*)(1 − T*^m)` with the five-term
//! Johnson-Cook fracture strain. Defaults are the published 4340 steel
//! constants converted to mm-ms-g-N-MPa.
//!
//! The shear modulus is derived from `E` and `PR`. An equation of state is
//! not written; for solid elements the deck relies on the elastic bulk
//! response (`PR` on card 1).

use crate::card::{CardText, Field};
use crate::errors::{CardError, CardResult};
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{homologous_range, shear_modulus, Reference, UNIT_SYSTEM};
use crate::models::{mid_field, open_deck, positive, DerivedParams, MID, RO};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat015_johnson_cook";

/// Spall type 2: pressure cutoff from the maximum principal stress
const SPALL: f64 = 2.0;

/// Minimum plastic strain increment before fracture is allowed
const EFMIN: f64 = 1.0e-6;

pub const FIELDS: &[FieldSpec] = &[
    mid_field(1.0),
    FieldSpec::number(RO, "Mass density (RO)", "g/mm^3", 7.83e-3)
        .with_min(1e-6)
        .with_step(1e-4),
    FieldSpec::number("e", "Young's modulus (E)", "MPa", 200_000.0).with_min(1.0),
    FieldSpec::number("pr", "Poisson ratio (PR)", "-", 0.29)
        .with_min(0.0)
        .with_max(0.49)
        .with_step(0.01),
    FieldSpec::number("a", "Yield stress (A)", "MPa", 792.0).with_min(0.0),
    FieldSpec::number("b", "Hardening modulus (B)", "MPa", 510.0).with_min(0.0),
    FieldSpec::number("n", "Hardening exponent (N)", "-", 0.26).with_min(0.0),
    FieldSpec::number("c", "Strain-rate coefficient (C)", "-", 0.014).with_min(0.0),
    FieldSpec::number("m", "Thermal softening exponent (M)", "-", 1.03).with_min(0.0),
    FieldSpec::number("tm", "Melt temperature (TM)", "K", 1793.0).with_min(0.0),
    FieldSpec::number("tr", "Room temperature (TR)", "K", 294.0).with_min(0.0),
    FieldSpec::number("epso", "Reference strain rate (EPSO)", "1/ms", 1.0e-3)
        .with_min(1e-12)
        .advanced(),
    FieldSpec::number("cp", "Specific heat (CP)", "mJ/(g K)", 477.0)
        .with_min(0.0)
        .advanced(),
    FieldSpec::number("d1", "Fracture constant D1", "-", 0.05).advanced(),
    FieldSpec::number("d2", "Fracture constant D2", "-", 3.44).advanced(),
    FieldSpec::number("d3", "Fracture constant D3", "-", -2.12).advanced(),
    FieldSpec::number("d4", "Fracture constant D4", "-", 0.002).advanced(),
    FieldSpec::number("d5", "Fracture constant D5", "-", 0.61).advanced(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 15,
    version: 1,
    name: "Johnson-Cook",
    category: MaterialCategory::Metal,
    keyword: "*MAT_JOHNSON_COOK",
    units: UNIT_SYSTEM,
    references: &[Reference::JohnsonCook1983],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::MaterialId,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let e = positive(KEY, inputs, "e")?;
    let pr = inputs.require(KEY, "pr")?;
    let tm = inputs.require(KEY, "tm")?;
    let tr = inputs.require(KEY, "tr")?;

    let range = homologous_range(tm, tr);
    if range <= 0.0 {
        return Err(CardError::derivation(
            KEY,
            "tm",
            format!("melt temperature {} must exceed room temperature {}", tm, tr),
        ));
    }

    let mut d = DerivedParams::new();
    d.insert("g", shear_modulus(e, pr)).insert("dtemp", range);
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let value = |key: &str| inputs.get(key);
    let title = format!(
        "MAT_JOHNSON_COOK_A{}MPa",
        plain_decimal(value("a").unwrap_or(0.0), 1)
    );

    let mut deck = open_deck(def, &title, &[]);
    deck.card(&[
        Field::int("mid", value(MID)),
        Field::decimal("ro", value(RO), 5),
        Field::decimal("g", d.get("g"), 1),
        Field::decimal("e", value("e"), 1),
        Field::decimal("pr", value("pr"), 2),
        Field::decimal("dtf", 0.0, 1),
        Field::decimal("vp", 0.0, 1),
        Field::decimal("rateop", 0.0, 1),
    ])
    .card(&[
        Field::decimal("a", value("a"), 1),
        Field::decimal("b", value("b"), 1),
        Field::decimal("n", value("n"), 3),
        Field::decimal("c", value("c"), 4),
        Field::decimal("m", value("m"), 2),
        Field::decimal("tm", value("tm"), 1),
        Field::decimal("tr", value("tr"), 1),
        Field::auto("epso", value("epso")),
    ])
    .card(&[
        Field::decimal("cp", value("cp"), 1),
        Field::decimal("pc", 0.0, 1),
        Field::decimal("spall", SPALL, 1),
        Field::decimal("it", 0.0, 1),
        Field::decimal("d1", value("d1"), 3),
        Field::decimal("d2", value("d2"), 3),
        Field::decimal("d3", value("d3"), 3),
        Field::decimal("d4", value("d4"), 4),
    ])
    .card(&[
        Field::decimal("d5", value("d5"), 3),
        Field::decimal("c2/p", 0.0, 1),
        Field::decimal("erod", 0.0, 1),
        Field::auto("efmin", EFMIN),
        Field::decimal("numint", 0.0, 1),
    ]);
    deck.finish()
}
