// build.rs

//! Compiles the fixed usage labels into a `t!` macro.
//!
//! `locales/en.toml` holds every key. The selected language is layered over it,
//! so a partial translation still builds.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

type Labels = BTreeMap<String, String>;

fn main() {
    println!("cargo:rerun-if-env-changed=ARGMETA_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let lang = selected_language();
    let mut labels = read_labels("locales/en.toml")
        .unwrap_or_else(|e| panic!("English labels are required: {}", e));
    if lang != "en" {
        match read_labels(&format!("locales/{}.toml", lang)) {
            Ok(translated) => labels.extend(translated),
            Err(e) => println!("cargo:warning={}; using English labels.", e),
        }
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by Cargo");
    fs::write(Path::new(&out_dir).join("translations.rs"), label_macro(&labels))
        .expect("Failed to write translations.rs");
}

/// The first `lang_*` feature (alphabetically), then `ARGMETA_LANG`, then English.
fn selected_language() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    features.sort();
    features
        .into_iter()
        .next()
        .or_else(|| env::var("ARGMETA_LANG").ok())
        .unwrap_or_else(|| "en".to_string())
}

fn read_labels(path: &str) -> Result<Labels, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    toml::from_str(&content).map_err(|e| format!("cannot parse {}: {}", path, e))
}

/// One arm per key; any other key is rejected at compile time.
fn label_macro(labels: &Labels) -> String {
    let mut code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for (key, text) in labels {
        code.push_str(&format!("    ({:?}) => {{ {:?} }};\n", key, text));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n}\n",
    );
    code
}
