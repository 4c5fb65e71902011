//! # Input Fields and Validation
//!
//! Each generator declares its user-editable inputs as a static table of
//! [`FieldSpec`]s. Raw values arrive from a form, a JSON file or the command
//! line as [`RawValue`]s and are turned into [`InputValues`] by [`validate`].
//!
//! ## Validation rules
//!
//! - Missing or blank value: the field default is used.
//! - Text is trimmed and parsed as a number; anything that is not a finite
//!   number is rejected as [`FieldProblem::NotNumeric`].
//! - Integer fields are truncated toward zero after parsing.
//! - Declared bounds are checked after truncation.
//!
//! Validation does not stop at the first bad field: every issue is collected
//! so a UI can mark all invalid inputs at once.
//!
//! ## Example
//!
//! ```rust
//! use mathub_core::fields::{validate, FieldSpec, RawInputs, RawValue};
//!
//! const FIELDS: &[FieldSpec] = &[
//!     FieldSpec::number("fc_mpa", "Compressive strength (fc)", "MPa", 30.0).with_min(1.0),
//!     FieldSpec::integer("mid", "Material ID (MID)", "-", 1.0).with_min(1.0),
//! ];
//!
//! let mut raw = RawInputs::new();
//! raw.insert("mid".to_string(), RawValue::Text("12.7".to_string()));
//!
//! let values = validate(FIELDS, &raw).unwrap();
//! assert_eq!(values.get("fc_mpa"), Some(30.0));
//! assert_eq!(values.get("mid"), Some(12.0));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CardError, CardResult, FieldIssue, FieldProblem};

/// Numeric kind of an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Any finite real number
    Number,
    /// Whole number, truncated toward zero
    Integer,
}

/// Description of one user-editable input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Stable key used in input maps (e.g. "fc_mpa")
    pub key: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    /// Unit text ("MPa", "mm", "-")
    pub unit: &'static str,
    pub kind: FieldKind,
    /// Value used when the input is missing or blank
    pub default: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Suggested UI increment
    pub step: Option<f64>,
    /// Hidden in the basic form, shown when all fields are requested
    pub advanced: bool,
}

impl FieldSpec {
    /// A real-valued field
    pub const fn number(key: &'static str, label: &'static str, unit: &'static str, default: f64) -> Self {
        FieldSpec {
            key,
            label,
            unit,
            kind: FieldKind::Number,
            default,
            min: None,
            max: None,
            step: None,
            advanced: false,
        }
    }

    /// A whole-number field (IDs, flags)
    pub const fn integer(key: &'static str, label: &'static str, unit: &'static str, default: f64) -> Self {
        FieldSpec {
            kind: FieldKind::Integer,
            step: Some(1.0),
            ..FieldSpec::number(key, label, unit, default)
        }
    }

    pub const fn with_min(self, min: f64) -> Self {
        FieldSpec { min: Some(min), ..self }
    }

    pub const fn with_max(self, max: f64) -> Self {
        FieldSpec { max: Some(max), ..self }
    }

    pub const fn with_step(self, step: f64) -> Self {
        FieldSpec { step: Some(step), ..self }
    }

    /// Mark as an advanced field
    pub const fn advanced(self) -> Self {
        FieldSpec { advanced: true, ..self }
    }

    /// Check bounds for an already-coerced value
    fn check_bounds(&self, value: f64) -> Option<FieldProblem> {
        if let Some(min) = self.min {
            if value < min {
                return Some(FieldProblem::BelowMinimum { min });
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(FieldProblem::AboveMaximum { max });
            }
        }
        None
    }
}

/// An input value before validation.
///
/// Deserializes from JSON `null`, numbers and strings:
///
/// ```json
/// { "fc_mpa": 40, "dmax_mm": "19", "mid": null }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Cleared input; the field default is used
    Blank,
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Blank => Ok(()),
            RawValue::Number(v) => write!(f, "{}", v),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Raw inputs keyed by field key
pub type RawInputs = BTreeMap<String, RawValue>;

/// Validated, fully populated input values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValues(BTreeMap<String, f64>);

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Value of a field the derivation cannot work without.
    ///
    /// Validated inputs always carry every declared field; this only fails
    /// when a derivation is called directly with a hand-built map.
    pub fn require(&self, generator: &str, key: &str) -> CardResult<f64> {
        self.get(key)
            .ok_or_else(|| CardError::derivation(generator, key, "input value is missing"))
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
}

impl<K: Into<String>> FromIterator<(K, f64)> for InputValues {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        InputValues(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Coerce a raw value to a number. `Ok(None)` means blank.
fn coerce(raw: &RawValue) -> Result<Option<f64>, FieldProblem> {
    let parsed = match raw {
        RawValue::Blank => return Ok(None),
        RawValue::Number(v) => *v,
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map_err(|_| FieldProblem::NotNumeric)?
        }
    };

    if parsed.is_finite() {
        Ok(Some(parsed))
    } else {
        Err(FieldProblem::NotNumeric)
    }
}

/// Validate raw inputs against a field table.
///
/// Unknown keys in `raw` are ignored. Returns every field value on success,
/// or a single [`CardError::Validation`] listing all rejected fields.
pub fn validate(fields: &[FieldSpec], raw: &RawInputs) -> CardResult<InputValues> {
    let mut values = InputValues::new();
    let mut issues = Vec::new();

    for field in fields {
        let supplied = raw.get(field.key);
        let coerced = match supplied.map(coerce).transpose() {
            Ok(v) => v.flatten(),
            Err(problem) => {
                let text = supplied.map(ToString::to_string).unwrap_or_default();
                issues.push(FieldIssue::new(field.key, text, problem));
                continue;
            }
        };

        let mut value = coerced.unwrap_or(field.default);
        if field.kind == FieldKind::Integer {
            value = value.trunc();
        }

        if let Some(problem) = field.check_bounds(value) {
            issues.push(FieldIssue::new(field.key, value.to_string(), problem));
            continue;
        }

        values.insert(field.key, value);
    }

    if issues.is_empty() {
        Ok(values)
    } else {
        Err(CardError::validation(issues))
    }
}

/// Default values of a field table as raw inputs
pub fn defaults_of(fields: &[FieldSpec]) -> RawInputs {
    fields
        .iter()
        .map(|f| (f.key.to_string(), RawValue::Number(f.default)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::number("fc_mpa", "Compressive strength (fc)", "MPa", 30.0)
            .with_min(1.0)
            .with_step(0.1),
        FieldSpec::integer("mid", "Material ID (MID)", "-", 1001.0).with_min(1.0),
        FieldSpec::number("poisson_ratio", "Poisson ratio", "-", 0.2)
            .with_min(0.0)
            .with_max(0.49)
            .advanced(),
    ];

    fn raw(pairs: &[(&str, RawValue)]) -> RawInputs {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_missing_and_blank_use_defaults() {
        let inputs = raw(&[
            ("fc_mpa", RawValue::Blank),
            ("mid", RawValue::Text("   ".to_string())),
        ]);
        let values = validate(FIELDS, &inputs).unwrap();
        assert_eq!(values.get("fc_mpa"), Some(30.0));
        assert_eq!(values.get("mid"), Some(1001.0));
        assert_eq!(values.get("poisson_ratio"), Some(0.2));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_text_is_parsed() {
        let inputs = raw(&[("fc_mpa", RawValue::from(" 45.5 "))]);
        let values = validate(FIELDS, &inputs).unwrap();
        assert_eq!(values.get("fc_mpa"), Some(45.5));
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        let inputs = raw(&[("mid", RawValue::Number(7.9))]);
        let values = validate(FIELDS, &inputs).unwrap();
        assert_eq!(values.get("mid"), Some(7.0));
    }

    #[test]
    fn test_integer_truncation_happens_before_bounds() {
        let inputs = raw(&[("mid", RawValue::Number(0.9))]);
        let err = validate(FIELDS, &inputs).unwrap_err();
        assert_eq!(err.issues()[0].problem, FieldProblem::BelowMinimum { min: 1.0 });
    }

    #[test]
    fn test_collects_every_issue() {
        let inputs = raw(&[
            ("fc_mpa", RawValue::Number(-5.0)),
            ("mid", RawValue::from("abc")),
            ("poisson_ratio", RawValue::Number(0.5)),
        ]);
        let err = validate(FIELDS, &inputs).unwrap_err();
        let issues = err.issues();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].field, "fc_mpa");
        assert_eq!(issues[0].problem, FieldProblem::BelowMinimum { min: 1.0 });
        assert_eq!(issues[1].field, "mid");
        assert_eq!(issues[1].problem, FieldProblem::NotNumeric);
        assert_eq!(issues[1].value, "abc");
        assert_eq!(issues[2].problem, FieldProblem::AboveMaximum { max: 0.49 });
    }

    #[test]
    fn test_non_finite_is_not_numeric() {
        let inputs = raw(&[
            ("fc_mpa", RawValue::from("NaN")),
            ("mid", RawValue::Number(f64::INFINITY)),
        ]);
        let err = validate(FIELDS, &inputs).unwrap_err();
        assert!(err.issues().iter().all(|i| i.problem == FieldProblem::NotNumeric));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let inputs = raw(&[("colour", RawValue::from("blue"))]);
        assert!(validate(FIELDS, &inputs).is_ok());
    }

    #[test]
    fn test_raw_value_json() {
        let parsed: RawInputs =
            serde_json::from_str(r#"{ "fc_mpa": 40, "dmax_mm": "19", "mid": null }"#).unwrap();
        assert_eq!(parsed["fc_mpa"], RawValue::Number(40.0));
        assert_eq!(parsed["dmax_mm"], RawValue::Text("19".to_string()));
        assert_eq!(parsed["mid"], RawValue::Blank);
    }

    #[test]
    fn test_defaults_of() {
        let defaults = defaults_of(FIELDS);
        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults["mid"], RawValue::Number(1001.0));
    }
}
