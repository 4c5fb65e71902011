//! # Generator Registry
//!
//! A [`GeneratorDefinition`] bundles everything needed to turn raw form
//! values into a keyword deck: the field table, a pure `derive` step and a
//! pure `render` step. The [`GeneratorRegistry`] maps stable keys such as
//! `mat159_cscm` to definitions and runs the whole pipeline:
//!
//! ```text
//! RawInputs -> validate -> InputValues -> derive -> DerivedParams
//!           -> finiteness check -> render -> CardText + filename
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mathub_core::fields::{RawInputs, RawValue};
//! use mathub_core::registry::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::standard().unwrap();
//!
//! let mut raw = RawInputs::new();
//! raw.insert("fc_mpa".to_string(), RawValue::Number(30.0));
//! raw.insert("dmax_mm".to_string(), RawValue::Number(16.0));
//! raw.insert("mid".to_string(), RawValue::Number(1001.0));
//!
//! let result = registry.generate("mat159_cscm", &raw).unwrap();
//! assert_eq!(result.filename, "MAT_CSCM_30.0MPa_dmax16.0mm_mid1001.k");
//! assert!(result.text.starts_with("*KEYWORD\n"));
//! ```
//!
//! The registry holds only `'static` tables and function pointers, so it is
//! `Send + Sync` and can be shared by reference across threads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::CardText;
use crate::errors::{CardError, CardResult};
use crate::fields::{defaults_of, validate, FieldSpec, InputValues, RawInputs};
use crate::format::plain_decimal;
use crate::formulas::Reference;
use crate::models::{self, DerivedParams};

/// Pure derivation step: validated inputs to named solver parameters
pub type DeriveFn = fn(&InputValues) -> CardResult<DerivedParams>;

/// Pure rendering step: inputs plus derived parameters to deck text
pub type RenderFn = fn(&GeneratorDefinition, &InputValues, &DerivedParams) -> CardText;

// ============================================================================
// Definition
// ============================================================================

/// Material family, used for grouping in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Metal,
    Rubber,
    Concrete,
}

impl MaterialCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::Metal => "Metals",
            MaterialCategory::Rubber => "Rubbers",
            MaterialCategory::Concrete => "Concrete",
        }
    }
}

/// How the output filename is built from the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilenameStyle {
    /// `<Tag>_MID<mid>.k`
    MaterialId,
    /// `<Tag>_<fc>MPa_dmax<dmax>mm_mid<mid>.k`, one decimal on fc and dmax
    StrengthAndAggregate,
}

/// Static description of one material generator.
#[derive(Clone, Copy)]
pub struct GeneratorDefinition {
    /// Stable registry key, `mat<id>_<name>`
    pub key: &'static str,
    /// LS-DYNA material number
    pub material_id: u32,
    /// Calibration revision of this generator
    pub version: u32,
    /// Human-readable name
    pub name: &'static str,
    pub category: MaterialCategory,
    /// Material keyword without the `_TITLE` suffix, e.g. `*MAT_CSCM`
    pub keyword: &'static str,
    /// Unit system written into the deck banner
    pub units: &'static str,
    pub references: &'static [Reference],
    pub fields: &'static [FieldSpec],
    pub derive: DeriveFn,
    pub render: RenderFn,
    pub filename: FilenameStyle,
}

impl fmt::Debug for GeneratorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorDefinition")
            .field("key", &self.key)
            .field("material_id", &self.material_id)
            .field("version", &self.version)
            .field("keyword", &self.keyword)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

impl GeneratorDefinition {
    /// Default raw inputs for every field
    pub fn defaults(&self) -> RawInputs {
        defaults_of(self.fields)
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Fields for a form; advanced fields only when `all` is set
    pub fn visible_fields(&self, all: bool) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| all || !f.advanced)
    }

    /// Filesystem-safe tag derived from the keyword
    pub fn tag(&self) -> String {
        sanitize_tag(self.keyword)
    }

    /// Output filename for a set of validated inputs
    pub fn filename_for(&self, inputs: &InputValues) -> String {
        let value = |key: &str, decimals: usize| plain_decimal(inputs.get(key).unwrap_or(0.0), decimals);
        let mid = value(models::MID, 0);
        match self.filename {
            FilenameStyle::MaterialId => format!("{}_MID{}.k", self.tag(), mid),
            FilenameStyle::StrengthAndAggregate => format!(
                "{}_{}MPa_dmax{}mm_mid{}.k",
                self.tag(),
                value(models::FC, 1),
                value(models::DMAX, 1),
                mid
            ),
        }
    }

    /// Run the full pipeline for this generator
    pub fn run(&self, raw: &RawInputs) -> CardResult<GenerationResult> {
        let inputs = validate(self.fields, raw)?;
        let derived = (self.derive)(&inputs)?;

        if let Some((quantity, value)) = derived.first_non_finite() {
            return Err(CardError::derivation(
                self.key,
                quantity,
                format!("evaluated to {}", value),
            ));
        }

        let card = (self.render)(self, &inputs, &derived);
        let filename = self.filename_for(&inputs);

        tracing::debug!(
            generator = self.key,
            filename = %filename,
            lines = card.lines().len(),
            "generated deck"
        );

        Ok(GenerationResult {
            key: self.key.to_string(),
            filename,
            text: card.to_text(),
            inputs,
            derived,
        })
    }

    pub fn summary(&self) -> GeneratorSummary {
        GeneratorSummary {
            key: self.key.to_string(),
            material_id: self.material_id,
            version: self.version,
            name: self.name.to_string(),
            category: self.category,
            keyword: self.keyword.to_string(),
            units: self.units.to_string(),
            references: self.references.iter().map(|r| r.short_form().to_string()).collect(),
            fields: self.fields.to_vec(),
        }
    }
}

/// Keyword text made safe for a filename: whitespace becomes `_`, and
/// `*`, `$`, `/` and `\` are dropped.
pub fn sanitize_tag(keyword: &str) -> String {
    keyword
        .chars()
        .filter(|c| !matches!(c, '*' | '$' | '/' | '\\'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

// ============================================================================
// Results
// ============================================================================

/// Output of one successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub key: String,
    /// Suggested output filename
    pub filename: String,
    /// Complete deck text, `\n` line endings
    pub text: String,
    /// Validated inputs actually used
    pub inputs: InputValues,
    /// Intermediate quantities, for display and auditing
    pub derived: DerivedParams,
}

/// Serializable description of a generator for listings and UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorSummary {
    pub key: String,
    pub material_id: u32,
    pub version: u32,
    pub name: String,
    pub category: MaterialCategory,
    pub keyword: String,
    pub units: String,
    pub references: Vec<String>,
    pub fields: Vec<FieldSpec>,
}

// ============================================================================
// Registry
// ============================================================================

/// Key to definition map with lexicographic iteration order.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, GeneratorDefinition>,
}

impl GeneratorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in generator
    pub fn standard() -> CardResult<Self> {
        let mut registry = Self::new();
        for definition in models::standard_definitions() {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Add a generator. Keys are unique.
    pub fn register(&mut self, definition: GeneratorDefinition) -> CardResult<()> {
        if self.generators.contains_key(definition.key) {
            return Err(CardError::duplicate_key(definition.key));
        }
        tracing::debug!(
            generator = definition.key,
            fields = definition.fields.len(),
            "registered generator"
        );
        self.generators.insert(definition.key, definition);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&GeneratorDefinition> {
        self.generators.get(key)
    }

    /// Registered keys in lexicographic order
    pub fn list_keys(&self) -> Vec<&'static str> {
        self.generators.keys().copied().collect()
    }

    /// Definitions in key order
    pub fn definitions(&self) -> impl Iterator<Item = &GeneratorDefinition> {
        self.generators.values()
    }

    pub fn summaries(&self) -> Vec<GeneratorSummary> {
        self.definitions().map(GeneratorDefinition::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Validate, derive and render with the generator registered under `key`
    pub fn generate(&self, key: &str, raw: &RawInputs) -> CardResult<GenerationResult> {
        self.get(key)
            .ok_or_else(|| CardError::unknown_generator(key))?
            .run(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================
