// Conversões entre o texto passado pelo operador e valores BSON

use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Parses a value given on the command line or in the environment.
///
/// JSON literals keep their type (`1000` is an integer, `[]` an empty array,
/// `true` a boolean). Anything that is not valid JSON is taken verbatim as a
/// string, so `--value Wizard` works without quoting.
pub fn parse_value(raw: &str) -> Bson {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(json) => json_to_bson(json),
        Err(_) => Bson::String(raw.to_string()),
    }
}

fn json_to_bson(json: Value) -> Bson {
    match json {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Bson::Int32(small),
                    Err(_) => Bson::Int64(i),
                }
            } else {
                Bson::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => {
            let mut doc = Document::new();
            for (key, value) in map {
                doc.insert(key, json_to_bson(value));
            }
            Bson::Document(doc)
        }
    }
}

/// Valor legível usado nas linhas de confirmação
pub fn display_value(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        Bson::Double(d) => d.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Resolves a dotted field path (`profile.inventory`) the way the store does
/// for `$set` / `$unset`, walking through embedded documents.
pub fn lookup_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let value = doc.get(head)?;
    match rest {
        None => Some(value),
        Some(rest) => match value {
            Bson::Document(inner) => lookup_path(inner, rest),
            _ => None,
        },
    }
}

/// Writes `value` at a dotted path, creating embedded documents on the way.
/// A non-document in the middle of the path leaves `doc` unchanged.
#[cfg(test)]
pub fn set_path(doc: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            doc.insert(path, value);
        }
        Some((head, rest)) => {
            if !doc.contains_key(head) {
                doc.insert(head, Document::new());
            }
            if let Some(Bson::Document(inner)) = doc.get_mut(head) {
                set_path(inner, rest, value);
            }
        }
    }
}

#[cfg(test)]
pub fn remove_path(doc: &mut Document, path: &str) {
    match path.split_once('.') {
        None => {
            doc.remove(path);
        }
        Some((head, rest)) => {
            if let Some(Bson::Document(inner)) = doc.get_mut(head) {
                remove_path(inner, rest);
            }
        }
    }
}

/// Equality that ignores the integer/double width a value was stored with.
pub fn values_match(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(i) => Some(*i as f64),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(d) => Some(*d),
        _ => None,
    }
}
