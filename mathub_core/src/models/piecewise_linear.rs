//! # Piecewise Linear Plasticity (MAT_024)
//!
//! Elasto-plastic metal with an 8-point effective stress versus effective
//! plastic strain curve written inline (cards 3 and 4). The curve is the
//! linear-hardening line through `SIGY` with slope `Ep = E·Et / (E − Et)`,
//! sampled at equal strain steps up to `eps_max`.

use crate::card::{CardText, Field};
use crate::errors::{CardError, CardResult};
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{hardening_curve, plastic_modulus, Reference, UNIT_SYSTEM};
use crate::models::{
    mid_field, open_deck, positive, DerivedParams, MID, MILD_STEEL_SRC, RO, STEEL_DENSITY,
};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat024_piecewise_linear_plasticity";

/// Points on the inline curve
pub const CURVE_POINTS: usize = 8;

const EPS_LABELS: [&str; CURVE_POINTS] =
    ["eps1", "eps2", "eps3", "eps4", "eps5", "eps6", "eps7", "eps8"];
const ES_LABELS: [&str; CURVE_POINTS] = ["es1", "es2", "es3", "es4", "es5", "es6", "es7", "es8"];

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
    FieldSpec::number("eps_max", "Last curve plastic strain", "-", 0.2)
        .with_min(1e-4)
        .with_max(10.0)
        .with_step(0.01),
    FieldSpec::number("fail", "Failure plastic strain (FAIL)", "-", 0.0)
        .with_min(0.0)
        .advanced(),
    FieldSpec::number("tdel", "Minimum time step for deletion (TDEL)", "ms", 0.0)
        .with_min(0.0)
        .advanced(),
    FieldSpec::number("c", "Cowper-Symonds C", "1/ms", MILD_STEEL_SRC)
        .with_min(0.0)
        .advanced(),
    FieldSpec::number("p", "Cowper-Symonds P", "-", 5.0)
        .with_min(0.0)
        .advanced(),
    FieldSpec::integer("vp", "Rate formulation (VP)", "-", 0.0)
        .with_min(0.0)
        .with_max(1.0)
        .advanced(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 24,
    version: 1,
    name: "Piecewise Linear Plasticity",
    category: MaterialCategory::Metal,
    keyword: "*MAT_PIECEWISE_LINEAR_PLASTICITY",
    units: UNIT_SYSTEM,
    references: &[Reference::CowperSymonds1957],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::MaterialId,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let e = positive(KEY, inputs, "e")?;
    let sigy = inputs.require(KEY, "sigy")?;
    let etan = inputs.require(KEY, "etan")?;
    let eps_max = positive(KEY, inputs, "eps_max")?;

    if etan >= e {
        return Err(CardError::derivation(
            KEY,
            "ep",
            format!("tangent modulus {} must be below Young's modulus {}", etan, e),
        ));
    }

    let ep = plastic_modulus(e, etan);
    let mut d = DerivedParams::new();
    d.insert("ep", ep);
    for (i, point) in hardening_curve(sigy, ep, eps_max, CURVE_POINTS).iter().enumerate() {
        d.insert(EPS_LABELS[i], point.eps).insert(ES_LABELS[i], point.stress);
    }
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let value = |key: &str| inputs.get(key);
    let title = format!(
        "MAT_PIECEWISE_LINEAR_SIGY{}MPa",
        plain_decimal(value("sigy").unwrap_or(0.0), 1)
    );
    let note = format!(
        "Derived: Ep = {} MPa, linear hardening to eps = {}",
        plain_decimal(d.get("ep").unwrap_or(0.0), 1),
        plain_decimal(value("eps_max").unwrap_or(0.0), 4)
    );

    let eps: Vec<Field> = EPS_LABELS
        .iter()
        .map(|&label| Field::decimal(label, d.get(label), 4))
        .collect();
    let es: Vec<Field> = ES_LABELS
        .iter()
        .map(|&label| Field::decimal(label, d.get(label), 2))
        .collect();

    let mut deck = open_deck(def, &title, &[note]);
    deck.card(&[
        Field::int("mid", value(MID)),
        Field::decimal("ro", value(RO), 5),
        Field::decimal("e", value("e"), 1),
        Field::decimal("pr", value("pr"), 2),
        Field::decimal("sigy", value("sigy"), 1),
        Field::decimal("etan", value("etan"), 1),
        Field::decimal("fail", value("fail"), 3),
        Field::decimal("tdel", value("tdel"), 1),
    ])
    .card(&[
        Field::auto("c", value("c")),
        Field::decimal("p", value("p"), 1),
        Field::int("lcss", 0.0),
        Field::int("lcsr", 0.0),
        Field::decimal("vp", value("vp"), 1),
    ])
    .card(&eps)
    .card(&es);
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
    fn test_curve_is_monotonic() {
        let d = derive(&defaults()).unwrap();
        assert_eq!(d.get("eps1"), Some(0.0));
        assert_eq!(d.get("es1"), Some(250.0));
        assert_relative_eq!(d.get("eps8").unwrap(), 0.2);
        for i in 1..CURVE_POINTS {
            assert!(d.get(ES_LABELS[i]).unwrap() > d.get(ES_LABELS[i - 1]).unwrap());
        }
    }

    #[test]
    fn test_zero_tangent_gives_flat_curve() {
        let mut values = defaults();
        values.insert("etan", 0.0);
        let d = derive(&values).unwrap();
        assert_eq!(d.get("es8"), Some(250.0));
    }

    #[test]
    fn test_rate_constant_is_per_millisecond() {
        let c = DEFINITION.field("c").unwrap();
        assert_eq!(c.unit, "1/ms");
        assert_relative_eq!(c.default, 0.0404);

        let mut values = defaults();
        values.insert("c", 2.5e-5);
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let rate_line = card.data_lines().nth(1).unwrap();
        let written: f64 = rate_line[0..10].trim().parse().unwrap();
        assert_relative_eq!(written, 2.5e-5, max_relative = 1e-3);
    }

    #[test]
    fn test_render_cards() {
        let values = defaults();
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let data: Vec<&str> = card.data_lines().collect();
        assert_eq!(data.len(), 4);
        assert_eq!(data[1].len(), 50);
        assert_eq!(&data[1][0..10], "    0.0404");
        assert_eq!(&data[2][0..10], "    0.0000");
        assert_eq!(&data[2][70..80], "    0.2000");
        assert_eq!(&data[3][0..10], "    250.00");
        assert!(card.to_text().contains("$#    eps1      eps2"));
    }
}
