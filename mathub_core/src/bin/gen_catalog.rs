//! Generate CATALOG.md from the generator registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog
//! ```
//!
//! The generated file is written to `mathub_core/CATALOG.md`.

use std::fs;
use std::path::Path;

use mathub_core::catalog::generate_catalog_markdown;
use mathub_core::GeneratorRegistry;

fn main() {
    println!("Generating CATALOG.md...");

    let registry = match GeneratorRegistry::standard() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error building registry: {}", e);
            std::process::exit(1);
        }
    };

    let markdown = generate_catalog_markdown(&registry);

    // Relative to the workspace root
    let output_path = Path::new("mathub_core/CATALOG.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
