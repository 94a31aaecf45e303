//! Handlers for the `users` actions.
//!
//! Both handlers take their input untyped (raw query map, raw JSON object)
//! and hand it to the validators in `passkeep_core::users`, so unknown keys
//! and wrong types are reported as field errors instead of extractor
//! rejections. Extractor rejections that remain (malformed path, query or
//! JSON) are rendered through [`AppError::BadRequest`].

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use passkeep_core::error::CoreError;
use passkeep_core::services::AuthService;
use passkeep_core::types::Timestamp;
use passkeep_core::users::{validate_create_user, validate_exists_params, USER_STATUS_ACTIVE};
use passkeep_core::validation::collect_params;
use passkeep_db::models::auth_provider::CreateAuthProvider;
use passkeep_db::models::user::CreateUser;
use passkeep_db::repositories::{AuthProviderRepo, UserRepo};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::response::Success;
use crate::state::AppState;

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

const ACCOUNT_TAKEN: &str = "User already exists";
const EMAIL_TAKEN: &str = "Email is already registered";

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
    pub service: AuthService,
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct LinkedProvider {
    pub service: AuthService,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub user: CreatedUser,
    pub provider: LinkedProvider,
}

// ---------------------------------------------------------------------------
// Existence check
// ---------------------------------------------------------------------------

/// GET /users/exists/{id}?service=
///
/// Whether a provider account is already linked to a user. The path `id`
/// takes precedence over an `id` query parameter. Query keys may appear
/// only once.
pub async fn exists(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: RawQuery,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let mut params = query_params(query)?;
    params.insert("id".to_string(), id);
    check_exists(&state, params).await
}

/// GET /users/exists?service=&id=
///
/// Same check with both parameters in the query string.
pub async fn exists_by_query(
    State(state): State<AppState>,
    query: RawQuery,
) -> AppResult<impl IntoResponse> {
    let params = query_params(query)?;
    check_exists(&state, params).await
}

async fn check_exists(
    state: &AppState,
    params: HashMap<String, String>,
) -> AppResult<Json<Success<ExistsResponse>>> {
    let query = validate_exists_params(&params)?;
    let exists = AuthProviderRepo::exists(&state.pool, query.service.as_str(), &query.id).await?;

    tracing::debug!(service = %query.service, exists, "Checked provider account");

    Ok(Json(Success::new(ExistsResponse {
        exists,
        service: query.service,
        id: query.id,
    })))
}

fn query_params(query: RawQuery) -> AppResult<HashMap<String, String>> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(collect_params(pairs)?)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// POST /users
///
/// Create a user together with its first linked provider account.
/// Returns 201 with the new user, 409 if the account or email is taken.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let input = validate_create_user(&body)?;

    if AuthProviderRepo::exists(&state.pool, input.service.as_str(), &input.provider_id).await? {
        return Err(CoreError::Conflict(ACCOUNT_TAKEN.into()).into());
    }
    if let Some(email) = &input.email {
        if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
            return Err(CoreError::Conflict(EMAIL_TAKEN.into()).into());
        }
    }

    let new_user = CreateUser {
        uid: uuid::Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        status: USER_STATUS_ACTIVE.to_string(),
    };
    let new_provider = CreateAuthProvider {
        provider: input.service.as_str().to_string(),
        provider_id: input.provider_id,
        provider_data: input.provider_data,
    };

    // Unique violations from a concurrent registration get the same messages.
    let (user, provider) = UserRepo::create_with_provider(&state.pool, &new_user, &new_provider)
        .await
        .map_err(|err| match registration_conflict(&err) {
            Some(message) => AppError::from(CoreError::Conflict(message.into())),
            None => AppError::from(err),
        })?;

    tracing::info!(
        user_id = user.id,
        uid = %user.uid,
        service = %input.service,
        "User created",
    );

    let response = CreateUserResponse {
        user: CreatedUser {
            uid: user.uid,
            name: user.name,
            email: user.email,
            status: user.status,
            created_at: user.created_at,
        },
        provider: LinkedProvider {
            service: input.service,
            id: provider.provider_id,
        },
    };

    Ok((StatusCode::CREATED, Json(Success::new(response))))
}

/// Conflict message for a unique violation raised while inserting a user
/// and its provider account, `None` for any other error.
///
/// SQLite names the violated columns (`users.email`) in the message.
pub fn registration_conflict(err: &sqlx::Error) -> Option<&'static str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }
    if db_err.message().contains("users.email") {
        Some(EMAIL_TAKEN)
    } else {
        Some(ACCOUNT_TAKEN)
    }
}
