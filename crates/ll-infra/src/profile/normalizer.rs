//! Storage-boundary normalization.
//!
//! Profile documents written by older clients or the hosted service use camelCase
//! or snake_case keys, and store the home address either nested or flattened into
//! the personal section. Everything is folded into the canonical
//! [`StoredProfile`] here so nothing past the port sees those differences.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use ll_core::{ProfileDraft, SectionData, SectionId, StoredProfile};
use serde_json::{Map, Value};
use tracing::warn;

const ADDRESS_ALIASES: [(&str, &[&str]); 4] = [
    (
        "street",
        &["street", "street_address", "address_line1", "address_street"],
    ),
    ("city", &["city", "address_city"]),
    ("state", &["state", "address_state"]),
    ("zip", &["zip", "zip_code", "postal_code", "address_zip"]),
];

const COMPLETION_KEYS: [&str; 3] = ["completion", "completion_flags", "section_completion"];
const PROFILE_COMPLETE_KEYS: [&str; 3] = ["profile_complete", "is_complete", "complete"];
const PERCENTAGE_KEYS: [&str; 2] = ["completion_percentage", "percentage"];

/// Fields stored as text that older documents may hold as numbers.
const TEXT_FIELDS: [&str; 3] = ["years_of_experience", "zip", "npi"];

/// Convert a raw stored profile document into the canonical shape.
///
/// Unknown keys are ignored and missing fields default. A section whose value
/// cannot be read is dropped with a warning instead of failing the whole profile.
pub fn normalize_profile(raw: &Value) -> Result<StoredProfile> {
    let canonical = canonicalize_keys(raw);
    let Value::Object(root) = canonical else {
        bail!("profile document must be a JSON object");
    };

    let container = match root.get("sections") {
        Some(Value::Object(sections)) => sections,
        _ => &root,
    };

    let mut draft = ProfileDraft::default();
    for id in SectionId::ALL {
        let Some(value) = container.get(id.snake_key()) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match section_from_value(id, value.clone()) {
            Ok(data) => draft.set(data),
            Err(err) => warn!(section = %id, error = %err, "dropping unreadable stored section"),
        }
    }

    Ok(StoredProfile {
        draft,
        completion_flags: completion_flags(&root),
        profile_complete: first_bool(&root, &PROFILE_COMPLETE_KEYS).unwrap_or(false),
        completion_percentage: percentage(&root),
    })
}

fn section_from_value(id: SectionId, mut value: Value) -> Result<SectionData> {
    if let Value::Object(object) = &mut value {
        if id == SectionId::PersonalIdentifiers {
            unify_address(object);
        }
        stringify_text_fields(object);
    }
    SectionData::from_value(id, value).with_context(|| format!("invalid {} section", id.snake_key()))
}

/// Folds flattened address keys into a nested `address` object.
///
/// A non-empty nested value wins over its flattened counterpart.
fn unify_address(personal: &mut Map<String, Value>) {
    let mut nested = match personal.remove("address") {
        Some(Value::Object(address)) => address,
        Some(Value::String(street)) if !street.trim().is_empty() => {
            let mut address = Map::new();
            address.insert("street".into(), Value::String(street));
            address
        }
        _ => Map::new(),
    };

    for (field, aliases) in ADDRESS_ALIASES {
        let nested_value = nested.get(field).filter(|v| !is_blank_value(v)).cloned();
        let flat_value = aliases
            .iter()
            .filter_map(|alias| personal.remove(*alias))
            .find(|v| !is_blank_value(v));
        if let Some(value) = nested_value.or(flat_value) {
            nested.insert(field.to_string(), value);
        }
    }

    stringify_text_fields(&mut nested);
    personal.insert("address".into(), Value::Object(nested));
}

fn stringify_text_fields(object: &mut Map<String, Value>) {
    for field in TEXT_FIELDS {
        let text = match object.get(field) {
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        object.insert(field.to_string(), Value::String(text));
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn completion_flags(root: &Map<String, Value>) -> BTreeMap<SectionId, bool> {
    let Some(Value::Object(flags)) = COMPLETION_KEYS.iter().find_map(|key| root.get(*key)) else {
        return BTreeMap::new();
    };
    flags
        .iter()
        .filter_map(|(key, value)| Some((SectionId::from_key(key)?, value.as_bool()?)))
        .collect()
}

fn first_bool(root: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| root.get(*key)?.as_bool())
}

fn percentage(root: &Map<String, Value>) -> u8 {
    PERCENTAGE_KEYS
        .iter()
        .find_map(|key| {
            let value = root.get(*key)?;
            value
                .as_f64()
                .or_else(|| value.as_str()?.trim().parse::<f64>().ok())
        })
        .map(|p| p.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

/// Rewrites every object key to snake_case, at any depth.
pub fn canonicalize_keys(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut out = Map::with_capacity(object.len());
            for (key, value) in object {
                let key = to_snake_case(key);
                let value = canonicalize_keys(value);
                // a null never replaces a value seen under the other spelling
                if out.contains_key(&key) && value.is_null() {
                    continue;
                }
                out.insert(key, value);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize_keys).collect()),
        other => other.clone(),
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
