#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database, IndexModel};
use tokio::sync::OnceCell;

use crate::models::User;
use crate::utils::AppError;

pub const USERS_COLLECTION: &str = "users";

/// The two queries the auth handlers need.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user whose `id` and `password` both match exactly.
    async fn find_by_credentials(&self, id: &str, password: &str) -> Result<Vec<User>, AppError>;

    /// Inserts without any uniqueness check; returns the inserted count.
    async fn insert_user(&self, user: &User) -> Result<usize, AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Lookup index on `users.id`. Deliberately non-unique: registration
    /// accepts repeated ids.
    async fn ensure_indexes(&self) {
        let index = IndexModel::builder().keys(doc! { "id": 1 }).build();

        match self.users().create_index(index).await {
            Ok(_) => log::info!("Index ready: users(id)"),
            Err(e) => log::debug!("Index on users(id) not created: {}", e),
        }
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_credentials(&self, id: &str, password: &str) -> Result<Vec<User>, AppError> {
        let cursor = self
            .users()
            .find(doc! { "id": id, "password": password })
            .await?;

        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn insert_user(&self, user: &User) -> Result<usize, AppError> {
        let result = self.users().insert_many([user]).await?;
        Ok(result.inserted_ids.len())
    }
}

/// Shared slot for the user store. Empty until the startup connection
/// finishes; set at most once.
#[derive(Clone, Default)]
pub struct DbHandle {
    store: Arc<OnceCell<Arc<dyn UserStore>>>,
}

impl DbHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, store: Arc<dyn UserStore>) -> Result<(), AppError> {
        self.store
            .set(store)
            .map_err(|_| AppError::DatabaseError("database handle already initialized".to_string()))
    }

    pub fn store(&self) -> Result<Arc<dyn UserStore>, AppError> {
        self.store.get().cloned().ok_or(AppError::DatabaseUnavailable)
    }

    pub fn is_connected(&self) -> bool {
        self.store.initialized()
    }
}
