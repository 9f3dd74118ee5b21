//! Customer domain and document types.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickbite_core::{CustomerId, Email, OrderId, Phone, Role};

/// A delivery address embedded in a customer document.
///
/// Owned by the customer: written and deleted with it, never referenced
/// from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Short label ("home", "office").
    pub label: String,
    /// Street address line.
    pub line1: String,
    /// City.
    pub city: String,
    /// Optional landmark for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// Optional postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

/// A registered customer (domain type).
///
/// This is what handlers serialize; it carries no credential material.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Email address (unique across customers).
    pub email: Email,
    /// Phone number (unique across customers).
    pub phone: Phone,
    /// Account role.
    pub role: Role,
    /// Embedded delivery addresses.
    pub addresses: Vec<Address>,
    /// Weak references to order documents, resolved by a separate lookup.
    pub orders: Vec<OrderId>,
    /// When the customer registered.
    pub registered_on: DateTime<Utc>,
}

/// The stored shape of a customer (collection `customers`).
///
/// Email and phone are stored raw and re-validated when mapped to
/// [`Customer`]; the password hash never leaves this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub orders: Vec<ObjectId>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub registered_on: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_document() -> CustomerDocument {
        CustomerDocument {
            id: Some(ObjectId::new()),
            name: "Asha Venkat".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            phone: "+919876543210".to_string(),
            role: Role::Customer,
            addresses: vec![Address {
                label: "home".to_string(),
                line1: "14 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                landmark: Some("opposite the metro station".to_string()),
                pincode: None,
            }],
            orders: Vec::new(),
            registered_on: Utc::now(),
        }
    }

    #[test]
    fn test_document_bson_roundtrip() {
        let document = sample_document();
        let encoded = bson::to_document(&document).unwrap();

        // Stored under the raw key the driver expects
        assert!(encoded.contains_key("_id"));
        assert!(encoded.get_datetime("registered_on").is_ok());

        let decoded: CustomerDocument = bson::from_document(encoded).unwrap();
        assert_eq!(decoded.email, document.email);
        assert_eq!(decoded.phone, document.phone);
        assert_eq!(decoded.addresses, document.addresses);
    }

    #[test]
    fn test_document_defaults_for_missing_fields() {
        // Older documents may predate role/addresses/orders
        let document = bson::doc! {
            "_id": ObjectId::new(),
            "name": "Ravi",
            "email": "ravi@example.com",
            "password_hash": "hash",
            "phone": "9876543210",
            "registered_on": bson::DateTime::now(),
        };

        let decoded: CustomerDocument = bson::from_document(document).unwrap();
        assert_eq!(decoded.role, Role::Customer);
        assert!(decoded.addresses.is_empty());
        assert!(decoded.orders.is_empty());
    }

    #[test]
    fn test_customer_serializes_without_credentials() {
        let customer = Customer {
            id: CustomerId::generate(),
            name: "Asha Venkat".to_string(),
            email: Email::parse("asha@example.com").unwrap(),
            phone: Phone::parse("+919876543210").unwrap(),
            role: Role::Customer,
            addresses: Vec::new(),
            orders: Vec::new(),
            registered_on: Utc::now(),
        };

        let json = serde_json::to_value(&customer).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object.get("role").unwrap(), "customer");
        // Id travels as plain hex, not as an extended-JSON object
        assert!(object.get("id").unwrap().is_string());
    }
}
