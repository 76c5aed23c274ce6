use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Flat key → text table loaded from a locale file.
pub type LocaleTable = HashMap<String, String>;

/// Load a JSON locale file into a flat table.
///
/// The top level must be an object. See [`flatten_messages`] for how nested
/// values are keyed.
pub fn load_locale_file(path: &Path) -> Result<LocaleTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read locale file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse locale file: {:?}", path))?;

    match json {
        Value::Object(map) => Ok(flatten_messages(&map)),
        _ => bail!("Locale file {:?} must contain a JSON object", path),
    }
}

/// Flatten a nested message object into dotted keys.
///
/// `{"home": {"title": "Accueil"}}` becomes `home.title → Accueil`. Only
/// string leaves are translations; numbers, booleans, nulls and arrays are
/// skipped. Top-level keys that already contain dots are kept as they are,
/// so flat tables load unchanged.
pub fn flatten_messages(messages: &Map<String, Value>) -> LocaleTable {
    let mut table = LocaleTable::new();
    flatten_object(messages, "", &mut table);
    table
}

fn flatten_object(map: &Map<String, Value>, prefix: &str, table: &mut LocaleTable) {
    for (key, value) in map {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::String(text) => {
                table.insert(full_key, text.clone());
            }
            Value::Object(nested) => flatten_object(nested, &full_key, table),
            _ => {}
        }
    }
}
