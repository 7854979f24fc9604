// DocumentStore em memória usado nos testes do job

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use mongodb::bson::{Bson, Document};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::{DocumentStore, DocumentStream};
use crate::models::{DocumentHandle, Patch};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    rejected: RwLock<HashSet<String>>,
    unauthorized: bool,
    writes: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store em que toda chamada falha como se as credenciais fossem recusadas
    pub fn unauthorized() -> Self {
        Self {
            unauthorized: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, collection: &str, id: &str, mut fields: Document) {
        fields.insert("_id", id);
        self.collections
            .write()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(fields);
    }

    pub fn reject_updates_for(&self, id: &str) {
        self.rejected.write().unwrap().insert(id.to_string());
    }

    pub fn remove(&self, collection: &str, id: &str) {
        if let Some(docs) = self.collections.write().unwrap().get_mut(collection) {
            docs.retain(|doc| doc.get("_id") != Some(&Bson::String(id.to_string())));
        }
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .read()
            .unwrap()
            .get(collection)?
            .iter()
            .find(|doc| doc.get("_id") == Some(&Bson::String(id.to_string())))
            .cloned()
    }

    pub fn writes(&self) -> usize {
        *self.writes.read().unwrap()
    }

    fn check_auth(&self) -> Result<(), AppError> {
        if self.unauthorized {
            return Err(AppError::Authentication("credentials refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, collection: &str) -> Result<DocumentStream, AppError> {
        self.check_auth()?;
        let snapshot = self
            .collections
            .read()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default();
        Ok(stream::iter(snapshot.into_iter().map(DocumentHandle::from_document)).boxed())
    }

    async fn apply_patch(
        &self,
        collection: &str,
        handle: &DocumentHandle,
        patch: &Patch,
    ) -> Result<(), AppError> {
        self.check_auth()?;
        let id = handle.id();
        if self.rejected.read().unwrap().contains(&id) {
            return Err(AppError::update(id, "permission denied"));
        }

        let mut collections = self.collections.write().unwrap();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.get("_id") == Some(handle.key())))
            .ok_or_else(|| AppError::update(id.clone(), "document no longer exists"))?;

        patch.apply_to(doc);
        *self.writes.write().unwrap() += 1;
        Ok(())
    }
}
