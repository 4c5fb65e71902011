//! # Plastic Kinematic (MAT_003)
//!
//! Bilinear elastic-plastic metal with isotropic/kinematic hardening mix
//! (`beta`) and Cowper-Symonds rate scaling (`src`, `srp`). Inputs map onto
//! the card one to one; the shear, bulk and plastic hardening moduli are
//! derived for reference and written as comments.

use crate::card::{CardText, Field};
use crate::errors::{CardError, CardResult};
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{bulk_modulus, plastic_modulus, shear_modulus, Reference, UNIT_SYSTEM};
use crate::models::{
    mid_field, open_deck, positive, DerivedParams, MID, MILD_STEEL_SRC, RO, STEEL_DENSITY,
};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat003_plastic_kinematic";

pub const FIELDS: &[FieldSpec] = &[
    mid_field(1.0),
    FieldSpec::number(RO, "Mass density (RO)", "g/mm^3", STEEL_DENSITY)
        .with_min(1e-6)
        .with_step(1e-4),
    FieldSpec::number("e", "Young's modulus (E)", "MPa", 210_000.0).with_min(1.0),
    FieldSpec::number("pr", "Poisson ratio (PR)", "-", 0.3)
        .with_min(0.0)
        .with_max(0.49)
        .with_step(0.01),
    FieldSpec::number("sigy", "Yield stress (SIGY)", "MPa", 250.0).with_min(0.0),
    FieldSpec::number("etan", "Tangent modulus (ETAN)", "MPa", 1_000.0).with_min(0.0),
    FieldSpec::number("beta", "Hardening parameter (BETA)", "-", 0.0)
        .with_min(0.0)
        .with_max(1.0)
        .with_step(0.1),
    FieldSpec::number("src", "Cowper-Symonds C (SRC)", "1/ms", MILD_STEEL_SRC)
        .with_min(0.0)
        .advanced(),
    FieldSpec::number("srp", "Cowper-Symonds P (SRP)", "-", 5.0)
        .with_min(0.0)
        .advanced(),
    FieldSpec::number("fs", "Failure strain (FS)", "-", 0.0)
        .with_min(0.0)
        .advanced(),
    FieldSpec::integer("vp", "Rate formulation (VP)", "-", 0.0)
        .with_min(0.0)
        .with_max(1.0)
        .advanced(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 3,
    version: 1,
    name: "Plastic Kinematic",
    category: MaterialCategory::Metal,
    keyword: "*MAT_PLASTIC_KINEMATIC",
    units: UNIT_SYSTEM,
    references: &[Reference::CowperSymonds1957],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::MaterialId,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let e = positive(KEY, inputs, "e")?;
    let pr = inputs.require(KEY, "pr")?;
    let etan = inputs.require(KEY, "etan")?;

    if etan >= e {
        return Err(CardError::derivation(
            KEY,
            "ep",
            format!("tangent modulus {} must be below Young's modulus {}", etan, e),
        ));
    }

    let mut d = DerivedParams::new();
    d.insert("g", shear_modulus(e, pr))
        .insert("k", bulk_modulus(e, pr))
        .insert("ep", plastic_modulus(e, etan));
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let value = |key: &str| inputs.get(key);
    let title = format!(
        "MAT_PLASTIC_KINEMATIC_SIGY{}MPa",
        plain_decimal(value("sigy").unwrap_or(0.0), 1)
    );
    let note = format!(
        "Derived: G = {} MPa, K = {} MPa, Ep = {} MPa",
        plain_decimal(d.get("g").unwrap_or(0.0), 1),
        plain_decimal(d.get("k").unwrap_or(0.0), 1),
        plain_decimal(d.get("ep").unwrap_or(0.0), 1)
    );

    let mut deck = open_deck(def, &title, &[note]);
    deck.card(&[
        Field::int("mid", value(MID)),
        Field::decimal("ro", value(RO), 5),
        Field::decimal("e", value("e"), 1),
        Field::decimal("pr", value("pr"), 2),
        Field::decimal("sigy", value("sigy"), 1),
        Field::decimal("etan", value("etan"), 1),
        Field::decimal("beta", value("beta"), 2),
    ])
    .card(&[
        Field::auto("src", value("src")),
        Field::decimal("srp", value("srp"), 1),
        Field::decimal("fs", value("fs"), 3),
        Field::decimal("vp", value("vp"), 1),
    ]);
    deck.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::validate;
    use approx::assert_relative_eq;

    fn defaults() -> InputValues {
        validate(FIELDS, &DEFINITION.defaults()).unwrap()
    }

    #[test]
    fn test_derive_steel() {
        let d = derive(&defaults()).unwrap();
        assert_relative_eq!(d.get("g").unwrap(), 210_000.0 / 2.6);
        assert_relative_eq!(d.get("k").unwrap(), 175_000.0, max_relative = 1e-12);
        assert_relative_eq!(d.get("ep").unwrap(), 210_000.0 * 1_000.0 / 209_000.0);
    }

    #[test]
    fn test_tangent_above_elastic_rejected() {
        let mut values = defaults();
        values.insert("etan", 300_000.0);
        let err = derive(&values).unwrap_err();
        assert_eq!(err.error_code(), "DERIVATION_ERROR");
    }

    #[test]
    fn test_render_cards() {
        let values = defaults();
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let data: Vec<&str> = card.data_lines().collect();
        assert_eq!(data.len(), 2);
        assert_eq!(
            data[0],
            "         1   0.00785  210000.0      0.30     250.0    1000.0      0.00"
        );
        assert_eq!(data[1], "    0.0404       5.0     0.000       0.0");

        let text = card.to_text();
        assert!(text.contains("$ Derived: G = 80769.2 MPa, K = 175000.0 MPa, Ep = 1004.8 MPa\n"));
        assert!(text.contains("\nMAT_PLASTIC_KINEMATIC_SIGY250.0MPa\n"));
    }
}
