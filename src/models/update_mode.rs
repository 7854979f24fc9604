use mongodb::bson::{Bson, Document};

use crate::utils::value::{display_value, lookup_path, values_match};

/// What a single document write changes: fields to set and fields to remove.
/// Fields not named here are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    pub set: Document,
    pub unset: Vec<String>,
}

impl Patch {
    pub fn set(field: &str, value: Bson) -> Self {
        let mut set = Document::new();
        set.insert(field, value);
        Self {
            set,
            unset: Vec::new(),
        }
    }

    pub fn unset(fields: Vec<String>) -> Self {
        Self {
            set: Document::new(),
            unset: fields,
        }
    }

    /// MongoDB update document (`$set` / `$unset`).
    pub fn to_update(&self) -> Document {
        let mut update = Document::new();
        if !self.set.is_empty() {
            update.insert("$set", self.set.clone());
        }
        if !self.unset.is_empty() {
            let mut removed = Document::new();
            for field in &self.unset {
                removed.insert(field.as_str(), "");
            }
            update.insert("$unset", removed);
        }
        update
    }

    /// Applies the patch to a local copy of a document.
    #[cfg(test)]
    pub fn apply_to(&self, doc: &mut Document) {
        for (field, value) in &self.set {
            crate::utils::value::set_path(doc, field, value.clone());
        }
        for field in &self.unset {
            crate::utils::value::remove_path(doc, field);
        }
    }
}

/// The batch operations the updater knows how to run over a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateMode {
    /// Overwrite `field` on every document.
    Set { field: String, value: Bson },
    /// Write `field` only where it is absent or null.
    SetIfMissing { field: String, value: Bson },
    /// Write `to` only where `field` currently equals `from`.
    Replace { field: String, from: Bson, to: Bson },
    /// Remove whichever of `fields` are present.
    Unset { fields: Vec<String> },
}

impl UpdateMode {
    /// Patch for one document, or `None` when the document is left alone.
    pub fn patch_for(&self, fields: &Document) -> Option<Patch> {
        match self {
            UpdateMode::Set { field, value } => Some(Patch::set(field, value.clone())),
            UpdateMode::SetIfMissing { field, value } => match lookup_path(fields, field) {
                None | Some(Bson::Null) => Some(Patch::set(field, value.clone())),
                Some(_) => None,
            },
            UpdateMode::Replace { field, from, to } => match lookup_path(fields, field) {
                Some(current) if values_match(current, from) => {
                    Some(Patch::set(field, to.clone()))
                }
                _ => None,
            },
            UpdateMode::Unset { fields: names } => {
                let present: Vec<String> = names
                    .iter()
                    .filter(|name| lookup_path(fields, name).is_some())
                    .cloned()
                    .collect();
                if present.is_empty() {
                    None
                } else {
                    Some(Patch::unset(present))
                }
            }
        }
    }

    /// Linha impressa no stdout depois de cada escrita
    pub fn confirmation(&self, id: &str, patch: &Patch, unit: &str) -> String {
        match self {
            UpdateMode::Set { value, .. } => {
                let value = display_value(value);
                if unit.is_empty() {
                    format!("Updated {} to {}", id, value)
                } else {
                    format!("Updated {} to {} {}", id, value, unit)
                }
            }
            UpdateMode::SetIfMissing { field, .. } => format!("Added {} to {}", field, id),
            UpdateMode::Replace { field, from, to } => format!(
                "Updated {}: {} {} -> {}",
                id,
                field,
                display_value(from),
                display_value(to)
            ),
            UpdateMode::Unset { .. } => format!("Removed {} from {}", patch.unset.join(", "), id),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            UpdateMode::Set { field, value } => {
                format!("set {} = {}", field, display_value(value))
            }
            UpdateMode::SetIfMissing { field, value } => {
                format!("set {} = {} where missing", field, display_value(value))
            }
            UpdateMode::Replace { field, from, to } => format!(
                "replace {} {} -> {}",
                field,
                display_value(from),
                display_value(to)
            ),
            UpdateMode::Unset { fields } => format!("unset {}", fields.join(", ")),
        }
    }
}
