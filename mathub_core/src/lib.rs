//! # mathub_core - LS-DYNA Material Card Engine
//!
//! `mathub_core` turns a few physical inputs (concrete strength, aggregate
//! size, metal or rubber constants) into ready-to-include LS-DYNA keyword
//! decks. Every generator is a pair of pure functions, so the same inputs
//! always produce byte-identical text.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: validate, derive and render are pure functions
//! - **JSON-First**: inputs, results, summaries and errors serialize with serde
//! - **Rich Errors**: structured, collect-all validation errors
//! - **Column-exact**: values are always written 10 characters wide
//!
//! ## Quick Start
//!
//! ```rust
//! use mathub_core::{GeneratorRegistry, RawInputs};
//!
//! let registry = GeneratorRegistry::standard().unwrap();
//! let winfrith = registry.get("mat084_winfrith").unwrap();
//!
//! let result = registry.generate(winfrith.key, &winfrith.defaults()).unwrap();
//! assert!(result.text.contains("*MAT_WINFRITH_CONCRETE_TITLE"));
//!
//! // Missing inputs fall back to the field defaults
//! let same = registry.generate("mat084_winfrith", &RawInputs::new()).unwrap();
//! assert_eq!(result.text, same.text);
//! ```
//!
//! ## Modules
//!
//! - [`format`] - fixed-width number formatting
//! - [`formulas`] - concrete, metal and rubber formulas
//! - [`card`] - keyword deck builder
//! - [`fields`] - input field tables and validation
//! - [`models`] - the eight material generators
//! - [`registry`] - generator lookup and the generation pipeline
//! - [`catalog`] - Markdown reference of all generators
//! - [`file_io`] - input presets and atomic deck writes
//! - [`errors`] - structured error types

pub mod card;
pub mod catalog;
pub mod errors;
pub mod fields;
pub mod file_io;
pub mod format;
pub mod formulas;
pub mod models;
pub mod registry;

pub use card::{CardText, DeckBuilder, Field};
pub use errors::{CardError, CardResult, FieldIssue, FieldProblem};
pub use fields::{FieldSpec, InputValues, RawInputs, RawValue};
pub use file_io::{load_inputs, save_deck};
pub use models::DerivedParams;
pub use registry::{GenerationResult, GeneratorDefinition, GeneratorRegistry, GeneratorSummary};
