use mongodb::bson::{Bson, Document};

use crate::utils::AppError;

/// A document as enumerated from a collection: its key plus the fields it
/// held at the time it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHandle {
    key: Bson,
    fields: Document,
}

impl DocumentHandle {
    /// Splits `_id` off a raw document.
    pub fn from_document(mut doc: Document) -> Result<Self, AppError> {
        let key = doc
            .remove("_id")
            .ok_or_else(|| AppError::Connection("document without _id in listing".to_string()))?;
        Ok(Self { key, fields: doc })
    }

    pub fn key(&self) -> &Bson {
        &self.key
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// The id as printed to the operator ("user id").
    pub fn id(&self) -> String {
        match &self.key {
            Bson::String(s) => s.clone(),
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        }
    }
}
