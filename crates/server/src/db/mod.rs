//! Database operations for the QuickBite document store.
//!
//! # Database: `quickbite`
//!
//! ## Collections
//!
//! - `customers` - registered customers (unique email, unique phone)
//! - `restaurants` - restaurant catalog with embedded outlets and menus
//!
//! Uniqueness lives in the store: [`ensure_indexes`] declares the unique
//! indexes at startup and the repositories map duplicate-key write errors
//! to [`RepositoryError::Conflict`]. The service layer performs no locking
//! and no multi-document transactions; per-document write atomicity is all
//! the model needs.

pub mod customers;
pub mod restaurants;

use bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use secrecy::ExposeSecret;
use thiserror::Error;

pub use customers::CustomerRepository;
pub use restaurants::RestaurantRepository;

use crate::config::AppConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver error from mongodb.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique-index violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Connect to the document store and select the configured database.
///
/// # Errors
///
/// Returns the driver error if the URI cannot be parsed or resolved.
pub async fn connect(config: &AppConfig) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(config.mongodb_uri.expose_secret()).await?;
    Ok(client.database(&config.db_name))
}

/// Declare the unique indexes the data model relies on.
///
/// Idempotent: the server treats re-creating an identical index as a no-op.
///
/// # Errors
///
/// Returns the driver error if an index cannot be created.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    fn unique(keys: Document) -> IndexModel {
        IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build()
    }

    let customers = db.collection::<Document>(customers::COLLECTION);
    customers.create_index(unique(doc! { "email": 1 })).await?;
    customers.create_index(unique(doc! { "phone": 1 })).await?;

    let restaurants = db.collection::<Document>(restaurants::COLLECTION);
    restaurants
        .create_index(unique(doc! { "owner.email": 1 }))
        .await?;
    restaurants
        .create_index(unique(doc! { "owner.contact": 1 }))
        .await?;

    Ok(())
}

/// Whether the driver error is a unique-index (duplicate key) violation.
///
/// Inserts surface it as a write error; `findAndModify` as a command error.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    const DUPLICATE_KEY: i32 = 11000;

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == DUPLICATE_KEY,
        ErrorKind::Command(command_err) => command_err.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Map a driver error, turning duplicate-key violations into [`RepositoryError::Conflict`].
fn map_write_error(err: mongodb::error::Error, conflict_msg: &str) -> RepositoryError {
    if is_duplicate_key(&err) {
        RepositoryError::Conflict(conflict_msg.to_owned())
    } else {
        RepositoryError::Database(err)
    }
}
