//! Validation of user-facing request parameters.
//!
//! Both validators take the raw, untyped parameters (query string map or
//! JSON object), reject keys they do not know, and collect every field
//! violation before returning.

use std::collections::HashMap;

use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::services::AuthService;
use crate::validation::FieldErrors;

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Minimum length (in characters) of a provider account id.
pub const MIN_PROVIDER_ID_LEN: usize = 6;

/// Maximum length (in characters) of a display name.
pub const MAX_NAME_LEN: usize = 100;

/// Status assigned to newly created users.
pub const USER_STATUS_ACTIVE: &str = "active";

const EXISTS_KEYS: &[&str] = &["service", "id"];
const CREATE_KEYS: &[&str] = &["name", "email", "service", "id", "providerData"];

/* --------------------------------------------------------------------------
   Validated inputs
   -------------------------------------------------------------------------- */

/// Parameters of the "does this provider account exist" check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsQuery {
    pub service: AuthService,
    pub id: String,
}

/// A user registration request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub service: AuthService,
    pub provider_id: String,
    pub provider_data: Option<Value>,
}

/* --------------------------------------------------------------------------
   Validators
   -------------------------------------------------------------------------- */

/// Validate the merged path + query parameters of the exists check.
pub fn validate_exists_params(params: &HashMap<String, String>) -> Result<ExistsQuery, CoreError> {
    let mut errors = FieldErrors::new();
    errors.reject_unknown_keys(params.keys(), EXISTS_KEYS);

    let service = check_service(&mut errors, params.get("service").map(String::as_str));
    let id = params.get("id").map(String::as_str).unwrap_or_default();
    check_provider_id(&mut errors, id);

    let Some(service) = service.filter(|_| errors.is_empty()) else {
        return Err(errors.into_error());
    };

    Ok(ExistsQuery {
        service,
        id: id.to_string(),
    })
}

/// Validate a registration body.
pub fn validate_create_user(body: &Map<String, Value>) -> Result<NewUser, CoreError> {
    let mut errors = FieldErrors::new();
    errors.reject_unknown_keys(body.keys(), CREATE_KEYS);

    let name = match body.get("name") {
        None | Some(Value::Null) => {
            errors.push("name", "Name is required");
            String::new()
        }
        Some(Value::String(raw)) => {
            let name = raw.trim();
            if name.is_empty() {
                errors.push("name", "Name is required");
            } else if name.chars().count() > MAX_NAME_LEN {
                errors.push(
                    "name",
                    format!("Name must be at most {MAX_NAME_LEN} characters long"),
                );
            }
            name.to_string()
        }
        Some(_) => {
            errors.push("name", "Name must be a string");
            String::new()
        }
    };

    let email = match body.get("email") {
        None | Some(Value::Null) => None,
        Some(Value::String(email)) => {
            if !email.as_str().validate_email() {
                errors.push("email", "Email must be a valid email address");
            }
            Some(email.clone())
        }
        Some(_) => {
            errors.push("email", "Email must be a valid email address");
            None
        }
    };

    let service = match body.get("service") {
        None | Some(Value::Null) => check_service(&mut errors, None),
        Some(Value::String(service)) => check_service(&mut errors, Some(service)),
        Some(_) => check_service(&mut errors, Some("")),
    };

    // Telegram account ids are numeric, so integers are accepted as well.
    let provider_id = match body.get("id") {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        Some(_) => {
            errors.push("id", "User ID must be a string");
            None
        }
    };
    if let Some(id) = &provider_id {
        check_provider_id(&mut errors, id);
    }

    let provider_data = match body.get("providerData") {
        None | Some(Value::Null) => None,
        Some(value @ Value::Object(_)) => Some(value.clone()),
        Some(_) => {
            errors.push("providerData", "Provider data must be an object");
            None
        }
    };

    let Some(service) = service.filter(|_| errors.is_empty()) else {
        return Err(errors.into_error());
    };

    Ok(NewUser {
        name,
        email,
        service,
        provider_id: provider_id.unwrap_or_default(),
        provider_data,
    })
}

/* --------------------------------------------------------------------------
   Field checks
   -------------------------------------------------------------------------- */

fn check_service(errors: &mut FieldErrors, raw: Option<&str>) -> Option<AuthService> {
    match raw {
        None => {
            errors.push("service", "Service is required");
            None
        }
        Some(raw) => match raw.parse::<AuthService>() {
            Ok(service) => Some(service),
            Err(e) => {
                errors.push("service", e.to_string());
                None
            }
        },
    }
}

fn check_provider_id(errors: &mut FieldErrors, id: &str) {
    if id.is_empty() {
        errors.push("id", "User ID is required");
    } else if id.chars().count() < MIN_PROVIDER_ID_LEN {
        errors.push(
            "id",
            format!("User ID must be at least {MIN_PROVIDER_ID_LEN} characters long"),
        );
    }
}
