//! Restaurant domain and document types.
//!
//! A restaurant owns its outlets and its menu tree outright: categories and
//! items are embedded sub-documents, never references. Orders, like on the
//! customer side, are weak references to documents defined elsewhere.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickbite_core::{Email, OrderId, Phone, Price, RestaurantId};

/// Veg / non-veg marking on a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VegMark {
    Veg,
    NonVeg,
}

/// A physical outlet of a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    /// Nearby landmark shown to riders.
    pub landmark: String,
    /// City.
    pub city: String,
    /// Street address.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    pub veg_mark: VegMark,
    /// Optional image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-form offer data; the ordering flow interprets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers: Option<Document>,
    /// Whether the kitchen is currently delivering this item.
    #[serde(default = "default_true")]
    pub availability: bool,
}

/// A named menu category holding its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub category_name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Restaurant owner contact details (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Owner {
    /// Owner's name.
    pub name: String,
    /// Owner email (unique across restaurants).
    pub email: Email,
    /// Owner contact number (unique across restaurants).
    pub contact: Phone,
}

/// A restaurant (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Restaurant {
    /// Unique restaurant ID.
    pub id: RestaurantId,
    /// Restaurant name.
    pub name: String,
    /// Owner contact details.
    pub owner: Owner,
    /// Who the platform talks to ("owner", "manager", ...).
    pub poc_designation: String,
    /// Physical outlets.
    pub outlets: Vec<Outlet>,
    /// Free-form cuisines description ("South Indian, Chaat").
    pub cuisines: String,
    /// Menu categories with their items.
    pub menus: Vec<MenuCategory>,
    /// Whether the whole restaurant is vegetarian.
    pub is_veg: bool,
    /// Free-form rating payload; aggregation is out of scope.
    pub rating: Option<Bson>,
    /// Weak references to order documents.
    pub orders: Vec<OrderId>,
    /// When the restaurant was onboarded.
    pub registered_on: DateTime<Utc>,
}

/// Stored owner sub-document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerDocument {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// The stored shape of a restaurant (collection `restaurants`).
///
/// Owner email and contact are stored raw and re-validated when mapped to
/// [`Restaurant`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub owner: OwnerDocument,
    pub poc_designation: String,
    #[serde(default)]
    pub outlets: Vec<Outlet>,
    pub cuisines: String,
    #[serde(default)]
    pub menus: Vec<MenuCategory>,
    #[serde(default = "default_true")]
    pub is_veg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Bson>,
    #[serde(default)]
    pub orders: Vec<ObjectId>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub registered_on: DateTime<Utc>,
}

/// Validated fields for onboarding a restaurant.
///
/// Produced by the service layer's create validation; the repository turns
/// it into a [`RestaurantDocument`].
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub owner: Owner,
    pub poc_designation: String,
    pub outlets: Vec<Outlet>,
    pub cuisines: String,
    pub menus: Vec<MenuCategory>,
    pub is_veg: bool,
}

const fn default_true() -> bool {
    true
}
