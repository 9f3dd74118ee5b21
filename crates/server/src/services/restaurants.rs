//! Restaurant service: catalog CRUD.
//!
//! Follows the customer service's conventions: tagged outcomes, exact
//! user-facing messages, uniqueness delegated to the store.

use bson::{Bson, Document};
use mongodb::Database;
use serde::Deserialize;

use quickbite_core::{Email, Phone, Price, RestaurantId};

use super::{ServiceError, blank};
use crate::db::RestaurantRepository;
use crate::models::restaurant::{MenuCategory, NewRestaurant, Outlet, Owner, Restaurant};
use crate::services::customers::Deleted;

const MSG_DOESNT_EXIST: &str = "Restaurant doesn't exist";
const MSG_NOT_FOUND: &str = "Restaurant not found";
const MSG_OWNER_UPDATES: &str = "Owner details cannot be updated here";

/// Owner sub-object of the create request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// Create request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRestaurantInput {
    pub name: Option<String>,
    pub owner: Option<OwnerInput>,
    pub poc_designation: Option<String>,
    #[serde(default)]
    pub outlets: Vec<Outlet>,
    pub cuisines: Option<String>,
    #[serde(default)]
    pub menus: Vec<MenuCategory>,
    pub is_veg: Option<bool>,
}

/// Partial-update request body.
///
/// `owner` is captured as raw JSON so owner changes can be rejected
/// outright: they touch the unique contact details and go through a
/// dedicated flow instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRestaurantInput {
    pub name: Option<String>,
    pub poc_designation: Option<String>,
    pub cuisines: Option<String>,
    pub is_veg: Option<bool>,
    pub outlets: Option<Vec<Outlet>>,
    pub menus: Option<Vec<MenuCategory>>,
    pub rating: Option<Bson>,
    pub owner: Option<serde_json::Value>,
}

/// Restaurant service.
pub struct RestaurantService {
    restaurants: RestaurantRepository,
}

impl RestaurantService {
    /// Create a new restaurant service.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            restaurants: RestaurantRepository::new(db),
        }
    }

    /// Every restaurant in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<Restaurant>, ServiceError> {
        Ok(self.restaurants.find_all().await?)
    }

    /// A single restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no restaurant has the id.
    pub async fn get(&self, id: RestaurantId) -> Result<Restaurant, ServiceError> {
        self.restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(MSG_DOESNT_EXIST.to_owned()))
    }

    /// Onboard a new restaurant.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when a required field is missing
    /// or malformed, `ServiceError::Conflict` when the owner email or
    /// contact is already registered.
    pub async fn create(&self, input: CreateRestaurantInput) -> Result<Restaurant, ServiceError> {
        let new = validate_create(input)?;
        Ok(self.restaurants.insert(new).await?)
    }

    /// Apply a partial update and return the updated restaurant.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the payload touches `owner` or
    /// carries a malformed field, `ServiceError::NotFound` if no restaurant
    /// has the id.
    pub async fn update(
        &self,
        id: RestaurantId,
        input: UpdateRestaurantInput,
    ) -> Result<Restaurant, ServiceError> {
        let set = build_update_document(&input)?;

        // Nothing to change: behave like a read
        if set.is_empty() {
            return self.get(id).await;
        }

        self.restaurants
            .update_partial(id, set)
            .await?
            .ok_or_else(|| ServiceError::NotFound(MSG_DOESNT_EXIST.to_owned()))
    }

    /// Delete a restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no restaurant has the id.
    pub async fn delete(&self, id: RestaurantId) -> Result<Deleted, ServiceError> {
        if self.restaurants.delete(id).await? {
            Ok(Deleted { deleted: true })
        } else {
            Err(ServiceError::NotFound(MSG_NOT_FOUND.to_owned()))
        }
    }
}

/// Check create input presence and parse the typed fields.
fn validate_create(input: CreateRestaurantInput) -> Result<NewRestaurant, ServiceError> {
    let mut missing = Vec::new();
    if blank(input.name.as_ref()) {
        missing.push("name");
    }
    if blank(input.poc_designation.as_ref()) {
        missing.push("poc_designation");
    }
    if blank(input.cuisines.as_ref()) {
        missing.push("cuisines");
    }
    let owner = input.owner.as_ref();
    if owner.is_none_or(|o| blank(o.name.as_ref())) {
        missing.push("owner.name");
    }
    if owner.is_none_or(|o| blank(o.email.as_ref())) {
        missing.push("owner.email");
    }
    if owner.is_none_or(|o| blank(o.contact.as_ref())) {
        missing.push("owner.contact");
    }
    if !missing.is_empty() {
        return Err(ServiceError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    validate_menus(&input.menus)?;

    let owner = input.owner.unwrap_or_default();
    let email = Email::parse(owner.email.as_deref().unwrap_or_default())
        .map_err(|e| ServiceError::Validation(format!("Invalid owner email: {e}")))?;
    let contact = Phone::parse(owner.contact.as_deref().unwrap_or_default())
        .map_err(|e| ServiceError::Validation(format!("Invalid owner contact: {e}")))?;

    Ok(NewRestaurant {
        name: input.name.unwrap_or_default().trim().to_owned(),
        owner: Owner {
            name: owner.name.unwrap_or_default().trim().to_owned(),
            email,
            contact,
        },
        poc_designation: input.poc_designation.unwrap_or_default().trim().to_owned(),
        outlets: input.outlets,
        cuisines: input.cuisines.unwrap_or_default().trim().to_owned(),
        menus: input.menus,
        is_veg: input.is_veg.unwrap_or(true),
    })
}

/// Check every menu item carries a well-formed price.
///
/// The wire type is transparent over the decimal, so non-negativity is
/// enforced here rather than in serde.
fn validate_menus(menus: &[MenuCategory]) -> Result<(), ServiceError> {
    for category in menus {
        for item in &category.items {
            Price::new(item.price.amount()).map_err(|e| {
                ServiceError::Validation(format!("Invalid price for '{}': {e}", item.name))
            })?;
        }
    }
    Ok(())
}

/// Build the `$set` document for a partial update.
///
/// Rejects any payload touching `owner` regardless of other fields.
fn build_update_document(input: &UpdateRestaurantInput) -> Result<Document, ServiceError> {
    if input.owner.is_some() {
        return Err(ServiceError::Validation(MSG_OWNER_UPDATES.to_owned()));
    }

    let mut set = Document::new();
    if let Some(name) = input.name.as_deref() {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Name cannot be empty".to_owned()));
        }
        set.insert("name", name);
    }
    if let Some(poc) = input.poc_designation.as_deref() {
        set.insert("poc_designation", poc.trim());
    }
    if let Some(cuisines) = input.cuisines.as_deref() {
        set.insert("cuisines", cuisines.trim());
    }
    if let Some(is_veg) = input.is_veg {
        set.insert("is_veg", is_veg);
    }
    if let Some(outlets) = &input.outlets {
        let encoded = bson::to_bson(outlets)
            .map_err(|e| ServiceError::Fault(format!("encode outlets: {e}")))?;
        set.insert("outlets", encoded);
    }
    if let Some(menus) = &input.menus {
        validate_menus(menus)?;
        let encoded = bson::to_bson(menus)
            .map_err(|e| ServiceError::Fault(format!("encode menus: {e}")))?;
        set.insert("menus", encoded);
    }
    if let Some(rating) = &input.rating {
        set.insert("rating", rating.clone());
    }

    Ok(set)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn validation_message(err: ServiceError) -> String {
        match err {
            ServiceError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn valid_input() -> CreateRestaurantInput {
        CreateRestaurantInput {
            name: Some("Udupi Grand".to_string()),
            owner: Some(OwnerInput {
                name: Some("Ravi Shetty".to_string()),
                email: Some("Ravi@UdupiGrand.example.com".to_string()),
                contact: Some("+91 98123 45678".to_string()),
            }),
            poc_designation: Some("owner".to_string()),
            outlets: Vec::new(),
            cuisines: Some("South Indian".to_string()),
            menus: Vec::new(),
            is_veg: None,
        }
    }

    /// Build a single-item menu the way the wire does, so the transparent
    /// price type is not pre-validated.
    fn menu_with_price(price: &str) -> Vec<MenuCategory> {
        serde_json::from_value(serde_json::json!([{
            "category_name": "Dosas",
            "items": [{
                "name": "Masala Dosa",
                "price": price,
                "veg_mark": "veg",
            }],
        }]))
        .unwrap()
    }

    #[test]
    fn test_create_lists_missing_fields() {
        let input = CreateRestaurantInput {
            name: Some("Udupi Grand".to_string()),
            ..CreateRestaurantInput::default()
        };
        let msg = validation_message(validate_create(input).unwrap_err());
        assert_eq!(
            msg,
            "Missing required fields: poc_designation, cuisines, owner.name, owner.email, owner.contact"
        );
    }

    #[test]
    fn test_create_parses_owner() {
        let new = validate_create(valid_input()).unwrap();
        assert_eq!(new.owner.email.as_str(), "ravi@udupigrand.example.com");
        assert_eq!(new.owner.contact.as_str(), "+919812345678");
        assert!(new.is_veg);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let mut input = valid_input();
        input.menus = menu_with_price("-1.00");
        let msg = validation_message(validate_create(input).unwrap_err());
        assert!(msg.contains("Masala Dosa"));
    }

    #[test]
    fn test_update_rejects_owner_even_with_other_fields() {
        let input = UpdateRestaurantInput {
            name: Some("New Name".to_string()),
            owner: Some(serde_json::json!({ "email": "new@example.com" })),
            ..UpdateRestaurantInput::default()
        };
        assert_eq!(
            validation_message(build_update_document(&input).unwrap_err()),
            "Owner details cannot be updated here"
        );
    }

    #[test]
    fn test_update_builds_set_document() {
        let input = UpdateRestaurantInput {
            cuisines: Some("South Indian, Chaat".to_string()),
            is_veg: Some(false),
            ..UpdateRestaurantInput::default()
        };
        let set = build_update_document(&input).unwrap();
        assert_eq!(set.get_str("cuisines").unwrap(), "South Indian, Chaat");
        assert!(!set.get_bool("is_veg").unwrap());
        assert!(!set.contains_key("name"));
    }

    #[test]
    fn test_update_encodes_menus() {
        let input = UpdateRestaurantInput {
            menus: Some(menu_with_price("120.00")),
            ..UpdateRestaurantInput::default()
        };
        let set = build_update_document(&input).unwrap();
        assert!(set.get_array("menus").is_ok());
    }
}
