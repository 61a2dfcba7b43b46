use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, Set};
use url::Url;

use crate::entities::blob;
use crate::error::AppError;
use crate::store::BlobStore;

pub fn resolve_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("stratplan.db")
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn open_lock(path: &Path) -> Result<fd_lock::RwLock<File>, AppError> {
    let lock_path = path.with_extension("lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path)?;
    Ok(fd_lock::RwLock::new(file))
}

pub async fn connect(path: &Path) -> Result<DatabaseConnection, AppError> {
    let mut url = Url::from_file_path(path)
        .map_err(|_| AppError::InvalidInput(format!("invalid sqlite path: {}", path.display())))?;
    url.set_query(Some("mode=rwc"));
    let sqlite_url = url.as_str().replacen("file://", "sqlite://", 1);
    Ok(Database::connect(&sqlite_url).await?)
}

pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut blob_stmt = schema.create_table_from_entity(blob::Entity);
    blob_stmt.if_not_exists();
    db.execute(builder.build(&blob_stmt)).await?;

    Ok(())
}

/// Blob store backed by a single SQLite table.
pub struct SqliteBlobStore {
    db: DatabaseConnection,
}

impl SqliteBlobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens (creating if needed) the database file and its schema.
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        ensure_parent_dir(path)?;
        let db = connect(path).await?;
        ensure_schema(&db).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = blob::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?;
        Ok(row.map(|row| row.value))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), AppError> {
        let active = blob::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(Utc::now()),
        };
        blob::Entity::insert(active)
            .on_conflict(
                OnConflict::column(blob::Column::Key)
                    .update_columns([blob::Column::Value, blob::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_store() -> (TempDir, SqliteBlobStore) {
        let dir = TempDir::new().expect("temp dir");
        let db_path = resolve_db_path(dir.path());
        let store = SqliteBlobStore::open(&db_path).await.expect("open store");
        (dir, store)
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let (_dir, store) = setup_store().await;
        assert_eq!(store.get("absent").await.expect("get"), None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_value() {
        let (_dir, store) = setup_store().await;
        store.put("k", "first".to_string()).await.expect("put");
        store.put("k", "second".to_string()).await.expect("put");
        assert_eq!(store.get("k").await.expect("get"), Some("second".to_string()));
        let rows = blob::Entity::find().all(&store.db).await.expect("rows");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn reopening_keeps_data_and_schema() {
        let dir = TempDir::new().expect("temp dir");
        let db_path = resolve_db_path(&dir.path().join("nested"));
        {
            let store = SqliteBlobStore::open(&db_path).await.expect("open store");
            store.put("k", "kept".to_string()).await.expect("put");
        }
        let store = SqliteBlobStore::open(&db_path).await.expect("reopen store");
        assert_eq!(store.get("k").await.expect("get"), Some("kept".to_string()));
    }
}
