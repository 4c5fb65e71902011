//! # Continuous Surface Cap Model (MAT_159)
//!
//! Full `*MAT_CSCM` parameter set for normal-strength concrete from two
//! physical inputs, compressive strength and maximum aggregate size.
//!
//! ## Derived quantities
//!
//! | Card field | Source |
//! |------------|--------|
//! | `g`, `k` | [`elastic_modulus`] with the input Poisson ratio |
//! | `alpha`..`beta2` | [`cap_shape`] (Novozhilov et al. 2022) |
//! | `r`, `xd` | [`cap_hardening`] |
//! | `gft`, `gfs` | [`fracture_energy`] `GF` |
//! | `gfc` | `100 · GF` |
//! | `eta0c`..`rep0w` | [`rate_parameters`] |
//!
//! The remaining fields (`w`, `d1`, `d2`, `b`, `d`, `pwrc`, `pwrt`, erosion
//! and output flags) are fixed calibration constants.

use crate::card::{CardText, Field};
use crate::errors::CardResult;
use crate::fields::{FieldSpec, InputValues};
use crate::format::plain_decimal;
use crate::formulas::{
    bulk_modulus, cap_hardening, cap_shape, elastic_modulus, fracture_energy, rate_parameters,
    shear_modulus, Reference, UNIT_SYSTEM,
};
use crate::models::{
    concrete_density_field, concrete_inputs, concrete_poisson_field, dmax_field, fc_field,
    mid_field, open_deck, DerivedParams, DMAX, FC, MID, POISSON, RO,
};
use crate::registry::{FilenameStyle, GeneratorDefinition, MaterialCategory};

const KEY: &str = "mat159_cscm";

/// Element erosion threshold (max principal strain 5%)
const ERODE: f64 = 1.05;

/// Maximum plastic volume compaction
const W: f64 = 0.065;
const D1: f64 = 6.11e-4;
const D2: f64 = 2.0e-6;

/// Compressive softening shape
const B: f64 = 100.0;
/// Tensile softening shape
const D: f64 = 0.1;

/// Compressive fracture energy as a multiple of GF
const GFC_FACTOR: f64 = 100.0;

pub const FIELDS: &[FieldSpec] = &[
    fc_field(),
    dmax_field(),
    mid_field(1001.0),
    concrete_density_field(),
    concrete_poisson_field(),
];

pub const DEFINITION: GeneratorDefinition = GeneratorDefinition {
    key: KEY,
    material_id: 159,
    version: 2,
    name: "CSCM Concrete",
    category: MaterialCategory::Concrete,
    keyword: "*MAT_CSCM",
    units: UNIT_SYSTEM,
    references: &[
        Reference::Novozhilov2022,
        Reference::Murray2007,
        Reference::ModelCode1990,
    ],
    fields: FIELDS,
    derive,
    render,
    filename: FilenameStyle::StrengthAndAggregate,
};

pub fn derive(inputs: &InputValues) -> CardResult<DerivedParams> {
    let (fc, dmax) = concrete_inputs(KEY, inputs)?;
    let nu = inputs.require(KEY, POISSON)?;

    let e = elastic_modulus(fc);
    let cap = cap_shape(fc);
    let hardening = cap_hardening(fc);
    let energy = fracture_energy(fc, dmax);
    let rate = rate_parameters(fc);

    let mut d = DerivedParams::new();
    d.insert("e", e)
        .insert("g", shear_modulus(e, nu))
        .insert("k", bulk_modulus(e, nu))
        .insert("alpha", cap.alpha)
        .insert("theta", cap.theta)
        .insert("lamda", cap.lamda)
        .insert("beta", cap.beta)
        .insert("alpha1", cap.alpha1)
        .insert("theta1", cap.theta1)
        .insert("lamda1", cap.lamda1)
        .insert("beta1", cap.beta1)
        .insert("alpha2", cap.alpha2)
        .insert("theta2", cap.theta2)
        .insert("lamda2", cap.lamda2)
        .insert("beta2", cap.beta2)
        .insert("r", hardening.r)
        .insert("xd", hardening.xd)
        .insert("gf0", energy.gf0)
        .insert("gft", energy.gf)
        .insert("gfs", energy.gf)
        .insert("gfc", GFC_FACTOR * energy.gf)
        .insert("eta0c", rate.eta0c)
        .insert("nc", rate.nc)
        .insert("eta0t", rate.eta0t)
        .insert("nt", rate.nt)
        .insert("overc", rate.overc)
        .insert("overt", rate.overt)
        .insert("srate", rate.srate)
        .insert("repow", rate.repow);
    Ok(d)
}

pub fn render(def: &GeneratorDefinition, inputs: &InputValues, d: &DerivedParams) -> CardText {
    let fc = inputs.get(FC).unwrap_or(0.0);
    let dmax = inputs.get(DMAX).unwrap_or(0.0);
    let title = format!(
        "MAT_CSCM_{}MPa_dmax{}mm",
        plain_decimal(fc, 1),
        plain_decimal(dmax, 1)
    );

    let mut deck = open_deck(def, &title, &[]);
    deck.card(&[
        Field::int("mid", inputs.get(MID)),
        Field::decimal("ro", inputs.get(RO), 4),
        Field::int("nplot", 1.0),
        Field::int("incre", 0.0),
        Field::int("irate", 0.0),
        Field::decimal("erode", ERODE, 2),
        Field::int("recov", 0.0),
        Field::int("itretrc", 0.0),
    ])
    .card(&[Field::decimal("pred", 0.0, 1)])
    .card(&[
        Field::decimal("g", d.get("g"), 1),
        Field::decimal("k", d.get("k"), 1),
        Field::decimal("alpha", d.get("alpha"), 4),
        Field::decimal("theta", d.get("theta"), 7),
        Field::decimal("lamda", d.get("lamda"), 5),
        Field::auto("beta", d.get("beta")),
        Field::decimal("nh", 0.0, 1),
        Field::decimal("ch", 0.0, 1),
    ])
    .card(&[
        Field::decimal("alpha1", d.get("alpha1"), 2),
        Field::decimal("theta1", d.get("theta1"), 1),
        Field::decimal("lamda1", d.get("lamda1"), 2),
        Field::auto("beta1", d.get("beta1")),
        Field::decimal("alpha2", d.get("alpha2"), 2),
        Field::decimal("theta2", d.get("theta2"), 1),
        Field::decimal("lamda2", d.get("lamda2"), 2),
        Field::auto("beta2", d.get("beta2")),
    ])
    .card(&[
        Field::decimal("r", d.get("r"), 5),
        Field::decimal("xd", d.get("xd"), 3),
        Field::decimal("w", W, 3),
        Field::decimal("d1", D1, 6),
        Field::decimal("d2", D2, 6),
    ])
    .card(&[
        Field::decimal("b", B, 1),
        Field::decimal("gfc", d.get("gfc"), 4),
        Field::decimal("d", D, 1),
        Field::decimal("gft", d.get("gft"), 4),
        Field::decimal("gfs", d.get("gfs"), 4),
        Field::decimal("pwrc", 5.0, 1),
        Field::decimal("pwrt", 1.0, 1),
        Field::decimal("pmod", 0.0, 1),
    ])
    .card(&[
        Field::decimal("eta0c", d.get("eta0c"), 7),
        Field::decimal("nc", d.get("nc"), 2),
        Field::decimal("etaot", d.get("eta0t"), 7),
        Field::decimal("nt", d.get("nt"), 2),
        Field::decimal("overc", d.get("overc"), 5),
        Field::decimal("overt", d.get("overt"), 5),
        Field::decimal("srate", d.get("srate"), 1),
        Field::decimal("rep0w", d.get("repow"), 1),
    ]);
    deck.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DeckLine;
    use crate::fields::validate;
    use approx::assert_relative_eq;

    fn inputs(fc: f64, dmax: f64) -> InputValues {
        let mut values = validate(FIELDS, &DEFINITION.defaults()).unwrap();
        values.insert(FC, fc);
        values.insert(DMAX, dmax);
        values
    }

    #[test]
    fn test_derive_at_30_mpa() {
        let d = derive(&inputs(30.0, 16.0)).unwrap();
        assert!((d.get("g").unwrap() - 14898.64).abs() < 0.1);
        assert!((d.get("k").unwrap() - 19864.85).abs() < 0.1);
        assert_relative_eq!(d.get("gf0").unwrap(), 0.0295712, max_relative = 1e-12);
        assert_relative_eq!(d.get("gfc").unwrap(), 100.0 * d.get("gft").unwrap());
        assert_eq!(d.get("gft"), d.get("gfs"));
        assert_eq!(d.get("overc"), d.get("overt"));
    }

    #[test]
    fn test_poisson_ratio_changes_moduli_only() {
        let mut a = inputs(30.0, 16.0);
        let b = inputs(30.0, 16.0);
        a.insert(POISSON, 0.15);
        let da = derive(&a).unwrap();
        let db = derive(&b).unwrap();
        assert!(da.get("g").unwrap() > db.get("g").unwrap());
        assert_eq!(da.get("alpha"), db.get("alpha"));
        assert_eq!(da.get("e"), db.get("e"));
    }

    #[test]
    fn test_render_layout() {
        let values = inputs(30.0, 16.0);
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let headers: Vec<&str> = card
            .lines()
            .iter()
            .filter(|l| matches!(l, DeckLine::ColumnHeader(_)))
            .map(DeckLine::text)
            .collect();

        // title header plus seven cards
        assert_eq!(headers.len(), 8);
        assert_eq!(
            headers[1],
            "$#     mid        ro     nplot     incre     irate     erode     recov   itretrc"
        );
        assert!(headers[7].ends_with("     rep0w"));

        let data: Vec<&str> = card.data_lines().collect();
        assert_eq!(data.len(), 7);
        assert_eq!(
            data[0],
            "      1001    0.0023         1         0         0      1.05         0         0"
        );
        assert_eq!(data[1], "       0.0");
        assert_eq!(&data[2][0..10], "   14898.6");
        assert!(card.to_text().contains("\nMAT_CSCM_30.0MPa_dmax16.0mm\n"));
    }

    #[test]
    fn test_low_density_is_not_written_as_zero() {
        let mut values = inputs(30.0, 16.0);
        values.insert(RO, 4.0e-5);
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let first = card.data_lines().next().unwrap();
        let ro: f64 = first[10..20].trim().parse().unwrap();
        assert_relative_eq!(ro, 4.0e-5, max_relative = 1e-3);
    }

    #[test]
    fn test_cap_shape_columns_at_high_strength() {
        let values = inputs(120.0, 16.0);
        let d = derive(&values).unwrap();
        let card = render(&DEFINITION, &values, &d);
        let data: Vec<&str> = card.data_lines().collect();
        let column = |line: &str, i: usize| -> f64 { line[i * 10..(i + 1) * 10].trim().parse().unwrap() };

        assert_relative_eq!(column(data[2], 5), d.get("beta").unwrap(), max_relative = 1e-4);
        assert_relative_eq!(column(data[3], 3), d.get("beta1").unwrap(), max_relative = 1e-4);
        assert_relative_eq!(column(data[3], 7), d.get("beta2").unwrap(), max_relative = 1e-4);
        assert_relative_eq!(column(data[2], 3), d.get("theta").unwrap(), max_relative = 1e-4);
    }

    #[test]
    fn test_small_rate_coefficients_keep_significant_digits() {
        let values = inputs(30.0, 16.0);
        let card = render(&DEFINITION, &values, &derive(&values).unwrap());
        let rate_line = card.data_lines().last().unwrap();
        let eta0t: f64 = rate_line[20..30].trim().parse().unwrap();
        assert!(eta0t > 0.0);
        assert_relative_eq!(eta0t, rate_parameters(30.0).eta0t, max_relative = 1e-2);
    }
}
