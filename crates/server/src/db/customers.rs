//! Customer repository for document-store operations.
//!
//! The stored document carries the password hash; everything this module
//! hands back is the credential-free domain form, except the dedicated
//! lookup the login flow uses.

use bson::{Document, doc};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use quickbite_core::{CustomerId, Email, OrderId, Phone, Role};

use super::{RepositoryError, map_write_error};
use crate::models::customer::{Customer, CustomerDocument};

/// Collection name for customer documents.
pub const COLLECTION: &str = "customers";

/// Conflict message when an insert or update trips a unique index.
const DUPLICATE_MSG: &str = "email or phone already registered";

/// Repository for customer database operations.
pub struct CustomerRepository {
    collection: Collection<CustomerDocument>,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Every customer document, in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored document fails
    /// domain validation.
    pub async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let documents: Vec<CustomerDocument> =
            self.collection.find(doc! {}).await?.try_collect().await?;

        documents.into_iter().map(to_domain).collect()
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document fails
    /// domain validation.
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await?;

        document.map(to_domain).transpose()
    }

    /// Get a customer together with the stored password hash.
    ///
    /// The login flow is the only caller; the hash does not leave the
    /// repository layer through any other path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document fails
    /// domain validation.
    pub async fn password_hash_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        let Some(document) = self
            .collection
            .find_one(doc! { "email": email.as_str() })
            .await?
        else {
            return Ok(None);
        };

        let hash = document.password_hash.clone();
        Ok(Some((to_domain(document)?, hash)))
    }

    /// Insert a new customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or phone is already
    /// registered; `RepositoryError::Database` for other driver errors.
    pub async fn insert(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        phone: &Phone,
    ) -> Result<Customer, RepositoryError> {
        let document = CustomerDocument {
            id: Some(bson::oid::ObjectId::new()),
            name: name.to_owned(),
            email: email.as_str().to_owned(),
            password_hash: password_hash.to_owned(),
            phone: phone.as_str().to_owned(),
            role: Role::Customer,
            addresses: Vec::new(),
            orders: Vec::new(),
            registered_on: Utc::now(),
        };

        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_MSG))?;

        to_domain(document)
    }

    /// Apply a partial `$set` update and return the post-update document.
    ///
    /// Returns `None` if no customer has the id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the update trips a unique
    /// index; `RepositoryError::Database` for other driver errors.
    pub async fn update_partial(
        &self,
        id: CustomerId,
        set: Document,
    ) -> Result<Option<Customer>, RepositoryError> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_object_id() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_MSG))?;

        updated.map(to_domain).transpose()
    }

    /// Remove a customer by id. Returns whether a document was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() })
            .await?;

        Ok(deleted.is_some())
    }
}

/// Convert a stored document into the credential-free domain form.
fn to_domain(document: CustomerDocument) -> Result<Customer, RepositoryError> {
    let id = document.id.ok_or_else(|| {
        RepositoryError::DataCorruption("customer document without _id".to_owned())
    })?;
    let email = Email::parse(&document.email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in store: {e}")))?;
    let phone = Phone::parse(&document.phone)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid phone in store: {e}")))?;

    Ok(Customer {
        id: CustomerId::new(id),
        name: document.name,
        email,
        phone,
        role: document.role,
        addresses: document.addresses,
        orders: document.orders.into_iter().map(OrderId::new).collect(),
        registered_on: document.registered_on,
    })
}
