pub mod credentials;
#[cfg(test)]
pub mod memory;
pub mod store;

pub use credentials::*;
pub use store::*;

use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;

use crate::models::{DocumentHandle, Patch};
use crate::utils::AppError;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Connects with the given credentials and verifies the connection, so
    /// bad credentials or an unreachable cluster fail before any write.
    pub async fn connect(credentials: &Credentials) -> Result<Self, AppError> {
        let db_name = credentials.database_name()?;

        let mut client_options = ClientOptions::parse(credentials.uri.as_str())
            .await
            .map_err(|e| AppError::Authentication(format!("invalid connection uri: {}", e)))?;

        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        log::info!("🔌 Connecting to MongoDB database: {}", db_name);

        // Testa a conexão antes de qualquer escrita
        db.list_collection_names().await?;

        log::info!("✅ MongoDB connected successfully");

        Ok(Self { db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn list_documents(&self, collection: &str) -> Result<DocumentStream, AppError> {
        let cursor = self
            .collection::<Document>(collection)
            .find(doc! {})
            .await?;

        Ok(cursor
            .map(|result| {
                result
                    .map_err(AppError::from)
                    .and_then(DocumentHandle::from_document)
            })
            .boxed())
    }

    async fn apply_patch(
        &self,
        collection: &str,
        handle: &DocumentHandle,
        patch: &Patch,
    ) -> Result<(), AppError> {
        let filter = doc! { "_id": handle.key().clone() };

        let result = self
            .collection::<Document>(collection)
            .update_one(filter, patch.to_update())
            .await
            .map_err(|e| classify_write_error(handle, e))?;

        if result.matched_count == 0 {
            return Err(AppError::update(handle.id(), "document no longer exists"));
        }

        Ok(())
    }
}

/// O servidor recusou a escrita deste documento: segue a política de falha.
/// Qualquer outro erro do driver (rede, seleção de servidor, autenticação)
/// é fatal para o lote.
fn classify_write_error(handle: &DocumentHandle, err: mongodb::error::Error) -> AppError {
    let rejected = matches!(
        err.kind.as_ref(),
        ErrorKind::Write(_) | ErrorKind::Command(_)
    );
    if rejected {
        AppError::update(handle.id(), err)
    } else {
        AppError::from(err)
    }
}
