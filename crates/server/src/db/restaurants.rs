//! Restaurant repository for document-store operations.

use bson::{Document, doc};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use quickbite_core::{Email, OrderId, Phone, RestaurantId};

use super::{RepositoryError, map_write_error};
use crate::models::restaurant::{
    NewRestaurant, Owner, OwnerDocument, Restaurant, RestaurantDocument,
};

/// Collection name for restaurant documents.
pub const COLLECTION: &str = "restaurants";

/// Conflict message when an insert or update trips a unique index.
const DUPLICATE_MSG: &str = "owner email or contact already registered";

/// Repository for restaurant database operations.
pub struct RestaurantRepository {
    collection: Collection<RestaurantDocument>,
}

impl RestaurantRepository {
    /// Create a new restaurant repository.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Every restaurant document, in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored document fails
    /// domain validation.
    pub async fn find_all(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let documents: Vec<RestaurantDocument> =
            self.collection.find(doc! {}).await?.try_collect().await?;

        documents.into_iter().map(to_domain).collect()
    }

    /// Get a restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document fails
    /// domain validation.
    pub async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RepositoryError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await?;

        document.map(to_domain).transpose()
    }

    /// Insert a newly onboarded restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the owner email or contact is
    /// already registered; `RepositoryError::Database` for other driver
    /// errors.
    pub async fn insert(&self, new: NewRestaurant) -> Result<Restaurant, RepositoryError> {
        let document = RestaurantDocument {
            id: Some(bson::oid::ObjectId::new()),
            name: new.name,
            owner: OwnerDocument {
                name: new.owner.name,
                email: new.owner.email.into_inner(),
                contact: new.owner.contact.into_inner(),
            },
            poc_designation: new.poc_designation,
            outlets: new.outlets,
            cuisines: new.cuisines,
            menus: new.menus,
            is_veg: new.is_veg,
            rating: None,
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
    /// Returns `None` if no restaurant has the id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the update trips a unique
    /// index; `RepositoryError::Database` for other driver errors.
    pub async fn update_partial(
        &self,
        id: RestaurantId,
        set: Document,
    ) -> Result<Option<Restaurant>, RepositoryError> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_object_id() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_MSG))?;

        updated.map(to_domain).transpose()
    }

    /// Remove a restaurant by id. Returns whether a document was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: RestaurantId) -> Result<bool, RepositoryError> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() })
            .await?;

        Ok(deleted.is_some())
    }
}

/// Convert a stored document into the domain form.
fn to_domain(document: RestaurantDocument) -> Result<Restaurant, RepositoryError> {
    let id = document.id.ok_or_else(|| {
        RepositoryError::DataCorruption("restaurant document without _id".to_owned())
    })?;
    let owner_email = Email::parse(&document.owner.email).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid owner email in store: {e}"))
    })?;
    let owner_contact = Phone::parse(&document.owner.contact).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid owner contact in store: {e}"))
    })?;

    Ok(Restaurant {
        id: RestaurantId::new(id),
        name: document.name,
        owner: Owner {
            name: document.owner.name,
            email: owner_email,
            contact: owner_contact,
        },
        poc_designation: document.poc_designation,
        outlets: document.outlets,
        cuisines: document.cuisines,
        menus: document.menus,
        is_veg: document.is_veg,
        rating: document.rating,
        orders: document.orders.into_iter().map(OrderId::new).collect(),
        registered_on: document.registered_on,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_document() -> RestaurantDocument {
        RestaurantDocument {
            id: Some(bson::oid::ObjectId::new()),
            name: "Udupi Grand".to_string(),
            owner: OwnerDocument {
                name: "Ravi".to_string(),
                email: "ravi@udupigrand.example.com".to_string(),
                contact: "+919812345678".to_string(),
            },
            poc_designation: "owner".to_string(),
            outlets: Vec::new(),
            cuisines: "South Indian".to_string(),
            menus: Vec::new(),
            is_veg: true,
            rating: None,
            orders: Vec::new(),
            registered_on: Utc::now(),
        }
    }

    #[test]
    fn test_to_domain_parses_owner() {
        let restaurant = to_domain(sample_document()).unwrap();
        assert_eq!(restaurant.owner.email.as_str(), "ravi@udupigrand.example.com");
        assert_eq!(restaurant.owner.contact.as_str(), "+919812345678");
    }

    #[test]
    fn test_to_domain_rejects_invalid_owner_contact() {
        let mut document = sample_document();
        document.owner.contact = "call me".to_string();

        assert!(matches!(
            to_domain(document),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
