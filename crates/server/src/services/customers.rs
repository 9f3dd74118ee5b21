//! Customer service: registration, login, and customer CRUD.

use bson::Document;
use mongodb::Database;
use serde::{Deserialize, Serialize};

use quickbite_core::{CustomerId, Email, Phone};

use super::{ServiceError, auth, auth::TokenIssuer, blank};
use crate::db::CustomerRepository;
use crate::models::customer::Customer;

const MSG_DOESNT_EXIST: &str = "Customer doesn't exist";
const MSG_NOT_FOUND: &str = "Customer not found";
const MSG_EMAIL_NOT_REGISTERED: &str = "Email is not registered";
const MSG_INCORRECT_PASSWORD: &str = "Incorrect Password";
const MSG_ENTER_EMAIL: &str = "Enter registered email";
const MSG_ENTER_PASSWORD: &str = "Enter password";
const MSG_ENTER_BOTH: &str = "Enter email and password";
const MSG_ADDRESS_UPDATES: &str = "Address updates are not implemented yet";

/// Registration request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial-update request body.
///
/// `addresses` is captured as raw JSON so its mere presence can be
/// rejected: address updates are not implemented yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub addresses: Option<serde_json::Value>,
}

/// Successful register/login payload.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub customer: Customer,
    pub access_token: String,
}

/// Successful delete payload.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Customer service.
///
/// Handles registration, login, and customer CRUD. Uniqueness of email and
/// phone is the store's job; this layer only maps the resulting conflicts.
pub struct CustomerService<'a> {
    customers: CustomerRepository,
    tokens: &'a TokenIssuer,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub fn new(db: &Database, tokens: &'a TokenIssuer) -> Self {
        Self {
            customers: CustomerRepository::new(db),
            tokens,
        }
    }

    /// Every registered customer, credential-free.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.customers.find_all().await?)
    }

    /// A single customer by id.
    ///
    /// The lookup is by primary key, so exactly one document can match.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no customer has the id.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, ServiceError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(MSG_DOESNT_EXIST.to_owned()))
    }

    /// Register a new customer and issue an identity token.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when a required field is missing
    /// or malformed, `ServiceError::Conflict` when the email or phone is
    /// already registered.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse, ServiceError> {
        let (name, email, password, phone) = validate_register(input)?;

        let password_hash = auth::hash_password(&password)?;
        let customer = self
            .customers
            .insert(&name, &email, &password_hash, &phone)
            .await?;
        let access_token = self.tokens.issue(customer.id)?;

        Ok(AuthResponse {
            customer,
            access_token,
        })
    }

    /// Log a customer in and issue a fresh identity token.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` carrying the exact user-facing
    /// message for every recoverable failure: missing fields, unknown
    /// email, wrong password.
    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse, ServiceError> {
        let (email, password) = validate_login(&input)?;

        let Some((customer, stored_hash)) = self.customers.password_hash_by_email(&email).await?
        else {
            return Err(ServiceError::Validation(MSG_EMAIL_NOT_REGISTERED.to_owned()));
        };

        if auth::verify_password(&password, &stored_hash).is_err() {
            return Err(ServiceError::Validation(MSG_INCORRECT_PASSWORD.to_owned()));
        }

        let access_token = self.tokens.issue(customer.id)?;
        Ok(AuthResponse {
            customer,
            access_token,
        })
    }

    /// Apply a partial update and return the updated customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the payload touches
    /// `addresses` or carries a malformed field, `ServiceError::NotFound`
    /// if no customer has the id.
    pub async fn update(
        &self,
        id: CustomerId,
        input: UpdateCustomerInput,
    ) -> Result<Customer, ServiceError> {
        let set = build_update_document(&input)?;

        // Nothing to change: behave like a read
        if set.is_empty() {
            return self.get(id).await;
        }

        self.customers
            .update_partial(id, set)
            .await?
            .ok_or_else(|| ServiceError::NotFound(MSG_DOESNT_EXIST.to_owned()))
    }

    /// Delete a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no customer has the id.
    pub async fn delete(&self, id: CustomerId) -> Result<Deleted, ServiceError> {
        if self.customers.delete(id).await? {
            Ok(Deleted { deleted: true })
        } else {
            Err(ServiceError::NotFound(MSG_NOT_FOUND.to_owned()))
        }
    }
}

/// Check register input presence and parse the typed fields.
fn validate_register(
    input: RegisterInput,
) -> Result<(String, Email, String, Phone), ServiceError> {
    let mut missing = Vec::new();
    if blank(input.name.as_ref()) {
        missing.push("name");
    }
    if blank(input.email.as_ref()) {
        missing.push("email");
    }
    if blank(input.password.as_ref()) {
        missing.push("password");
    }
    if blank(input.phone.as_ref()) {
        missing.push("phone");
    }
    if !missing.is_empty() {
        return Err(ServiceError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let name = input.name.unwrap_or_default().trim().to_owned();
    let email = Email::parse(input.email.as_deref().unwrap_or_default())
        .map_err(|e| ServiceError::Validation(format!("Invalid email: {e}")))?;
    let phone = Phone::parse(input.phone.as_deref().unwrap_or_default())
        .map_err(|e| ServiceError::Validation(format!("Invalid phone: {e}")))?;
    let password = input.password.unwrap_or_default();

    Ok((name, email, password, phone))
}

/// Presence check for login, with the three distinct messages.
fn validate_login(input: &LoginInput) -> Result<(Email, String), ServiceError> {
    let message = match (blank(input.email.as_ref()), blank(input.password.as_ref())) {
        (true, true) => Some(MSG_ENTER_BOTH),
        (true, false) => Some(MSG_ENTER_EMAIL),
        (false, true) => Some(MSG_ENTER_PASSWORD),
        (false, false) => None,
    };
    if let Some(message) = message {
        return Err(ServiceError::Validation(message.to_owned()));
    }

    // A syntactically invalid email cannot be registered, so it gets the
    // same answer a lookup miss would
    let email = Email::parse(input.email.as_deref().unwrap_or_default())
        .map_err(|_| ServiceError::Validation(MSG_EMAIL_NOT_REGISTERED.to_owned()))?;
    let password = input.password.clone().unwrap_or_default();

    Ok((email, password))
}

/// Build the `$set` document for a partial update.
///
/// Rejects any payload touching `addresses` regardless of other fields.
fn build_update_document(input: &UpdateCustomerInput) -> Result<Document, ServiceError> {
    if input.addresses.is_some() {
        return Err(ServiceError::Validation(MSG_ADDRESS_UPDATES.to_owned()));
    }

    let mut set = Document::new();
    if let Some(name) = input.name.as_deref() {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Name cannot be empty".to_owned()));
        }
        set.insert("name", name);
    }
    if let Some(email) = input.email.as_deref() {
        let email = Email::parse(email)
            .map_err(|e| ServiceError::Validation(format!("Invalid email: {e}")))?;
        set.insert("email", email.as_str());
    }
    if let Some(phone) = input.phone.as_deref() {
        let phone = Phone::parse(phone)
            .map_err(|e| ServiceError::Validation(format!("Invalid phone: {e}")))?;
        set.insert("phone", phone.as_str());
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

    #[test]
    fn test_login_missing_email() {
        let input = LoginInput {
            email: None,
            password: Some("secret-dosa".to_string()),
        };
        assert_eq!(
            validation_message(validate_login(&input).unwrap_err()),
            "Enter registered email"
        );
    }

    #[test]
    fn test_login_missing_password() {
        let input = LoginInput {
            email: Some("asha@example.com".to_string()),
            password: None,
        };
        assert_eq!(
            validation_message(validate_login(&input).unwrap_err()),
            "Enter password"
        );
    }

    #[test]
    fn test_login_missing_both() {
        let input = LoginInput::default();
        assert_eq!(
            validation_message(validate_login(&input).unwrap_err()),
            "Enter email and password"
        );
    }

    #[test]
    fn test_login_empty_counts_as_missing() {
        let input = LoginInput {
            email: Some("  ".to_string()),
            password: Some("secret-dosa".to_string()),
        };
        assert_eq!(
            validation_message(validate_login(&input).unwrap_err()),
            "Enter registered email"
        );
    }

    #[test]
    fn test_login_unparseable_email_reads_as_unregistered() {
        let input = LoginInput {
            email: Some("not-an-email".to_string()),
            password: Some("secret-dosa".to_string()),
        };
        assert_eq!(
            validation_message(validate_login(&input).unwrap_err()),
            "Email is not registered"
        );
    }

    #[test]
    fn test_login_valid_input() {
        let input = LoginInput {
            email: Some("Asha@Example.com".to_string()),
            password: Some("secret-dosa".to_string()),
        };
        let (email, password) = validate_login(&input).unwrap();
        assert_eq!(email.as_str(), "asha@example.com");
        assert_eq!(password, "secret-dosa");
    }

    #[test]
    fn test_register_lists_missing_fields() {
        let input = RegisterInput {
            name: Some("Asha".to_string()),
            ..RegisterInput::default()
        };
        let msg = validation_message(validate_register(input).unwrap_err());
        assert_eq!(msg, "Missing required fields: email, password, phone");
    }

    #[test]
    fn test_register_parses_fields() {
        let input = RegisterInput {
            name: Some("  Asha Venkat  ".to_string()),
            email: Some("Asha@Example.com".to_string()),
            password: Some("secret-dosa".to_string()),
            phone: Some("+91 98765 43210".to_string()),
        };
        let (name, email, password, phone) = validate_register(input).unwrap();
        assert_eq!(name, "Asha Venkat");
        assert_eq!(email.as_str(), "asha@example.com");
        assert_eq!(password, "secret-dosa");
        assert_eq!(phone.as_str(), "+919876543210");
    }

    #[test]
    fn test_register_rejects_bad_phone() {
        let input = RegisterInput {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            password: Some("secret-dosa".to_string()),
            phone: Some("call me maybe".to_string()),
        };
        let msg = validation_message(validate_register(input).unwrap_err());
        assert!(msg.starts_with("Invalid phone"));
    }

    #[test]
    fn test_update_rejects_addresses_even_with_other_fields() {
        let input = UpdateCustomerInput {
            name: Some("New Name".to_string()),
            addresses: Some(serde_json::json!([{ "label": "home" }])),
            ..UpdateCustomerInput::default()
        };
        assert_eq!(
            validation_message(build_update_document(&input).unwrap_err()),
            "Address updates are not implemented yet"
        );
    }

    #[test]
    fn test_update_builds_set_document() {
        let input = UpdateCustomerInput {
            name: Some("  Asha V  ".to_string()),
            email: Some("New@Example.com".to_string()),
            phone: None,
            addresses: None,
        };
        let set = build_update_document(&input).unwrap();
        assert_eq!(set.get_str("name").unwrap(), "Asha V");
        assert_eq!(set.get_str("email").unwrap(), "new@example.com");
        assert!(!set.contains_key("phone"));
    }

    #[test]
    fn test_update_empty_set_for_empty_input() {
        let set = build_update_document(&UpdateCustomerInput::default()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_update_canonicalizes_phone() {
        let input = UpdateCustomerInput {
            phone: Some("(080) 2345-6789".to_string()),
            ..UpdateCustomerInput::default()
        };
        let set = build_update_document(&input).unwrap();
        assert_eq!(set.get_str("phone").unwrap(), "08023456789");
    }
}
