//! Customer commands.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use food_delivery_core::Email;
use food_delivery_ordering::OrderingService;
use food_delivery_ordering::models::NewCustomer;

use super::{CommandError, print_json};

/// Registration input as given on the command line.
pub struct Registration {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: Email,
    pub password: SecretString,
}

/// Hash a password using Argon2id.
fn hash_password(password: &SecretString) -> Result<String, CommandError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CommandError::PasswordHash)
}

/// Register a customer and print the new id.
///
/// # Errors
///
/// Returns an error if hashing fails or the email is already registered.
pub async fn register(
    service: &OrderingService,
    registration: Registration,
) -> Result<(), CommandError> {
    let customer = NewCustomer {
        password_hash: hash_password(&registration.password)?,
        name: registration.name,
        phone: registration.phone,
        address: registration.address,
        email: registration.email,
    };

    match service.register_customer(&customer).await {
        Ok(id) => print_json(&json!({ "customer_id": id })),
        Err(e) if e.is_unique_violation() => Err(CommandError::InvalidArgument(format!(
            "a customer with email {} already exists",
            customer.email
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Print the customer registered under `email`.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if there is no such customer.
pub async fn show(service: &OrderingService, email: &Email) -> Result<(), CommandError> {
    let customer = service
        .find_customer(email)
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("customer {email}")))?;

    print_json(&customer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn test_hash_password_produces_verifiable_argon2id_hash() {
        let password = SecretString::from("correct horse battery staple".to_string());
        let hash = hash_password(&password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse battery staple", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn test_hash_password_salts_each_call() {
        let password = SecretString::from("same".to_string());
        assert_ne!(
            hash_password(&password).unwrap(),
            hash_password(&password).unwrap()
        );
    }
}
