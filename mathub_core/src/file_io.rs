//! # File I/O Module
//!
//! Reading input presets and writing generated decks:
//! - **Input presets**: JSON objects of field key to value (`null`, number or
//!   numeric string), loaded as [`RawInputs`]
//! - **Atomic saves**: a deck is written to `<name>.tmp`, synced, then renamed,
//!   so a failed run never leaves a partial `.k` file behind
//!
//! ## Example
//!
//! ```rust,no_run
//! use mathub_core::file_io::{load_inputs, save_deck};
//! use mathub_core::GeneratorRegistry;
//! use std::path::Path;
//!
//! let registry = GeneratorRegistry::standard()?;
//! let inputs = load_inputs(Path::new("c40.json"))?;
//! let result = registry.generate("mat159_cscm", &inputs)?;
//! let path = save_deck(&result, Path::new("decks"))?;
//! println!("wrote {}", path.display());
//! # Ok::<(), mathub_core::errors::CardError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{CardError, CardResult};
use crate::fields::RawInputs;
use crate::registry::GenerationResult;

/// Load a JSON input preset.
///
/// ```json
/// { "fc_mpa": 40, "dmax_mm": "19", "mid": null }
/// ```
pub fn load_inputs(path: &Path) -> CardResult<RawInputs> {
    let content = fs::read_to_string(path).map_err(|e| {
        CardError::file_error("read inputs", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&content).map_err(|e| {
        CardError::file_error("parse inputs", path.display().to_string(), e.to_string())
    })
}

/// Write deck text to `path` with atomic write semantics.
///
/// 1. Write to a temporary file (`.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename `.tmp` to the final name (atomic on most filesystems)
pub fn write_atomic(path: &Path, text: &str) -> CardResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CardError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file
        .write_all(text.as_bytes())
        .and_then(|()| tmp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(CardError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        ));
    }
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CardError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save a generated deck into `dir` under its suggested filename.
///
/// The directory is created if needed. Returns the final path.
pub fn save_deck(result: &GenerationResult, dir: &Path) -> CardResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        CardError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;

    let path = dir.join(&result.filename);
    write_atomic(&path, &result.text)?;

    tracing::debug!(path = %path.display(), bytes = result.text.len(), "saved deck");
    Ok(path)
}

/// `deck.k` -> `deck.k.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::RawValue;
    use crate::registry::GeneratorRegistry;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("mathub_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("/out/deck.k")), Path::new("/out/deck.k.tmp"));
    }

    #[test]
    fn test_load_inputs() {
        let path = temp_path("inputs.json");
        fs::write(&path, r#"{ "fc_mpa": 40, "dmax_mm": "19", "mid": null }"#).unwrap();

        let raw = load_inputs(&path).unwrap();
        assert_eq!(raw.get("fc_mpa"), Some(&RawValue::Number(40.0)));
        assert_eq!(raw.get("dmax_mm"), Some(&RawValue::Text("19".to_string())));
        assert_eq!(raw.get("mid"), Some(&RawValue::Blank));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_inputs_errors() {
        let missing = load_inputs(&temp_path("missing.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");

        let path = temp_path("bad.json");
        fs::write(&path, "[1, 2").unwrap();
        let bad = load_inputs(&path).unwrap_err();
        assert!(matches!(bad, CardError::FileError { ref operation, .. } if operation == "parse inputs"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_deck_is_atomic() {
        let dir = temp_path("decks");
        let registry = GeneratorRegistry::standard().unwrap();
        let result = registry.generate("mat084_winfrith", &RawInputs::new()).unwrap();

        let path = save_deck(&result, &dir).unwrap();
        assert_eq!(path, dir.join("MAT_WINFRITH_CONCRETE_30.0MPa_dmax16.0mm_mid99.k"));
        assert_eq!(fs::read_to_string(&path).unwrap(), result.text);
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_into_file_fails_cleanly() {
        let blocker = temp_path("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let registry = GeneratorRegistry::standard().unwrap();
        let result = registry.generate("mat003_plastic_kinematic", &RawInputs::new()).unwrap();

        let err = save_deck(&result, &blocker).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let _ = fs::remove_file(&blocker);
    }
}
