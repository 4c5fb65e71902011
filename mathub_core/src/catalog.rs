//! # Generator Catalog
//!
//! Markdown reference of every registered generator: keyword, inputs with
//! defaults and bounds, references, and a sample deck rendered from the
//! defaults. Written to `CATALOG.md` by the `gen-catalog` binary.

use crate::fields::FieldKind;
use crate::format::plain_decimal;
use crate::registry::{GeneratorDefinition, GeneratorRegistry, MaterialCategory};

/// Bound or `-` when unbounded
fn bound(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn write_generator(output: &mut String, def: &GeneratorDefinition) {
    output.push_str(&format!("### {} (`{}`)\n\n", def.name, def.key));
    output.push_str(&format!(
        "**Keyword:** `{}_TITLE` (MAT_{:03}, version {})\n\n",
        def.keyword, def.material_id, def.version
    ));
    output.push_str(&format!("**Units:** {}\n\n", def.units));

    output.push_str("**Inputs:**\n\n");
    output.push_str("| Key | Label | Unit | Default | Min | Max | Advanced |\n");
    output.push_str("|-----|-------|------|---------|-----|-----|----------|\n");
    for field in def.fields {
        let default = match field.kind {
            FieldKind::Integer => plain_decimal(field.default, 0),
            FieldKind::Number => field.default.to_string(),
        };
        output.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} | {} |\n",
            field.key,
            field.label,
            field.unit,
            default,
            bound(field.min),
            bound(field.max),
            if field.advanced { "yes" } else { "" }
        ));
    }
    output.push('\n');

    output.push_str("**References:**\n");
    for reference in def.references {
        output.push_str(&format!("- {}\n", reference.citation()));
    }
    output.push('\n');

    match def.run(&def.defaults()) {
        Ok(result) => {
            output.push_str(&format!("**Sample (defaults):** `{}`\n\n", result.filename));
            output.push_str("```text\n");
            output.push_str(&result.text);
            output.push_str("```\n\n");
        }
        Err(e) => {
            output.push_str(&format!(
                "**Sample:** defaults do not generate ({})\n\n",
                e
            ));
        }
    }

    output.push_str("---\n\n");
}

/// Generate the complete CATALOG.md content.
///
/// ```rust
/// use mathub_core::catalog::generate_catalog_markdown;
/// use mathub_core::GeneratorRegistry;
///
/// let registry = GeneratorRegistry::standard().unwrap();
/// let markdown = generate_catalog_markdown(&registry);
/// assert!(markdown.contains("Material Hub Generator Catalog"));
/// assert!(markdown.contains("`mat159_cscm`"));
/// ```
pub fn generate_catalog_markdown(registry: &GeneratorRegistry) -> String {
    let mut output = String::with_capacity(32_000);

    output.push_str(
        r#"# Material Hub Generator Catalog

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

Every generator turns a few physical inputs into an LS-DYNA material deck.
Inputs not supplied fall back to the defaults listed here. Advanced inputs
are hidden in the basic form.

---

"#,
    );

    let categories = [
        MaterialCategory::Concrete,
        MaterialCategory::Metal,
        MaterialCategory::Rubber,
    ];
    for category in categories {
        let defs: Vec<&GeneratorDefinition> = registry
            .definitions()
            .filter(|d| d.category == category)
            .collect();
        if defs.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));
        for def in defs {
            write_generator(&mut output, def);
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Generators:** {}\n\n",
        registry.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_every_generator() {
        let registry = GeneratorRegistry::standard().unwrap();
        let markdown = generate_catalog_markdown(&registry);
        for key in registry.list_keys() {
            assert!(markdown.contains(&format!("(`{}`)", key)), "missing {}", key);
        }
        assert!(markdown.contains("## Concrete"));
        assert!(markdown.contains("## Metals"));
        assert!(markdown.contains("- **Total Generators:** 8"));
        assert!(!markdown.contains("defaults do not generate"));
    }

    #[test]
    fn test_generator_section_layout() {
        let registry = GeneratorRegistry::standard().unwrap();
        let markdown = generate_catalog_markdown(&registry);
        assert!(markdown.contains(
            "### CSCM Concrete (`mat159_cscm`)\n\n**Keyword:** `*MAT_CSCM_TITLE` (MAT_159, version 2)\n\n"
        ));
        assert!(markdown.contains("| `fc_mpa` |"));
        assert!(markdown.contains("**Sample (defaults):** `MAT_CSCM_30.0MPa_dmax16.0mm_mid1001.k`\n\n```text\n*KEYWORD\n"));
    }

    #[test]
    fn test_empty_registry() {
        let markdown = generate_catalog_markdown(&GeneratorRegistry::new());
        assert!(!markdown.contains("## Concrete"));
        assert!(markdown.contains("- **Total Generators:** 0"));
    }
}
