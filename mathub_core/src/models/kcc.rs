//! # Karagozian & Case Concrete, Release III (MAT_072R3)
//!
//! `*MAT_CONCRETE_DAMAGE_REL3` in its parameter-generation form: with
//! `A0 = -fc` the solver builds the three failure surfaces, the damage
//! function and the strain-rate table itself, so only a handful of fields
//! are written and every other field stays zero.
//!
//! | Field | Value |
//! |-------|-------|
//! | `ft` | [`tensile_strength`] |
//! | `a0` | `-fc` (triggers auto generation) |
//! | `rsize` | `1 / 25.4`, inches per mm |
//! | `ucf` | `145.038`, psi per MPa |
//! | `locwidth` | `3 · dmax` |
//!
//! Auto generation also expects an equation of state. This deck only
//! carries the material cards; the EOS is left to the model.

use crate::card::{CardText, Field};
use crate::errors::CardResult;
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::concrete::PSI_PER_MPA;
use crate::formulas::{tensile_strength, Reference, UNIT_SYSTEM};
use crate::models::{
    concrete_density_field, concrete_inputs, concrete_poisson_field, dmax_field, fc_field,
    mid_field, open_deck, DerivedParams, DMAX, FC, MID, POISSON, RO,
};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat072_kcc_rel3";

/// Length conversion to inches
const RSIZE: f64 = 1.0 / 25.4;

/// Localization width in aggregate diameters
const LOCWIDTH_FACTOR: f64 = 3.0;

pub const FIELDS: &[FieldSpec] = &[
    fc_field(),
    dmax_field(),
    mid_field(1001.0),
    concrete_density_field(),
    concrete_poisson_field(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 72,
    version: 1,
    name: "Karagozian & Case Concrete Rel3",
    category: MaterialCategory::Concrete,
    keyword: "*MAT_CONCRETE_DAMAGE_REL3",
    units: UNIT_SYSTEM,
    references: &[Reference::Malvar1997, Reference::ModelCode2010],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::StrengthAndAggregate,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let (fc, dmax) = concrete_inputs(KEY, inputs)?;

    let mut d = DerivedParams::new();
    d.insert("ft", tensile_strength(fc))
        .insert("a0", -fc)
        .insert("rsize", RSIZE)
        .insert("ucf", PSI_PER_MPA)
        .insert("locwidth", LOCWIDTH_FACTOR * dmax);
    Ok(d)
}

/// Zero-valued fields, one per label
fn zeros(labels: &[&'static str]) -> Vec<Field> {
    labels.iter().map(|&label| Field::decimal(label, 0.0, 1)).collect()
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let fc = inputs.get(FC).unwrap_or(0.0);
    let dmax = inputs.get(DMAX).unwrap_or(0.0);
    let title = format!(
        "KCC_REL3_{}MPa_dmax{}mm",
        plain_decimal(fc, 1),
        plain_decimal(dmax, 1)
    );

    let mut deck = open_deck(def, &title, &[]);
    deck.card(&[
        Field::int("mid", inputs.get(MID)),
        Field::decimal("ro", inputs.get(RO), 4),
        Field::decimal("pr", inputs.get(POISSON), 2),
    ])
    .card(&[
        Field::decimal("ft", d.get("ft"), 3),
        Field::decimal("a0", d.get("a0"), 1),
        Field::decimal("a1", 0.0, 1),
        Field::decimal("a2", 0.0, 1),
        Field::decimal("b1", 0.0, 1),
        Field::decimal("omega", 0.0, 1),
        Field::decimal("a1f", 0.0, 1),
    ])
    .card(&[
        Field::decimal("slambda", 0.0, 1),
        Field::int("nout", 0.0),
        Field::decimal("edrop", 0.0, 1),
        Field::decimal("rsize", d.get("rsize"), 5),
        Field::decimal("ucf", d.get("ucf"), 3),
        Field::int("lcrate", 0.0),
        Field::decimal("locwidth", d.get("locwidth"), 1),
        Field::int("npts", 0.0),
    ])
    .card(&zeros(&[
        "lambda01", "lambda02", "lambda03", "lambda04", "lambda05", "lambda06", "lambda07",
        "lambda08",
    ]))
    .card(&zeros(&[
        "lambda09", "lambda10", "lambda11", "lambda12", "lambda13", "b3", "a0y", "a1y",
    ]))
    .card(&zeros(&[
        "eta01", "eta02", "eta03", "eta04", "eta05", "eta06", "eta07", "eta08",
    ]))
    .card(&zeros(&[
        "eta09", "eta10", "eta11", "eta12", "eta13", "b2", "a2f", "a2y",
    ]));
    deck.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::validate;

    fn defaults() -> InputValues {
        validate(FIELDS, &DEFINITION.defaults()).unwrap()
    }

    #[test]
    fn test_auto_generation_fields() {
        let d = derive(&defaults()).unwrap();
        assert_eq!(d.get("a0"), Some(-30.0));
        assert_eq!(d.get("locwidth"), Some(48.0));
        assert_eq!(d.get("ucf"), Some(145.038));
    }

    #[test]
    fn test_render_seven_cards() {
        let values = defaults();
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let data: Vec<&str> = card.data_lines().collect();
        assert_eq!(data.len(), 7);
        assert_eq!(data[0].len(), 30);
        assert_eq!(data[1].len(), 70);
        assert_eq!(&data[1][10..20], "     -30.0");
        assert_eq!(&data[2][30..40], "   0.03937");
        assert_eq!(&data[2][40..50], "   145.038");
        assert_eq!(&data[2][60..70], "      48.0");
        assert!(data[3..].iter().all(|l| l.len() == 80));
    }

    #[test]
    fn test_eight_character_labels_fill_first_column() {
        let values = defaults();
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let text = card.to_text();
        assert!(text.contains("$#lambda01  lambda02"));
        assert!(text.contains("$# slambda      nout"));
    }
}
