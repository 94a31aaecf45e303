use crate::routing::{RouteBuilder, RouteError};
use crate::state::AppState;

/// Routes of the `users` scope.
pub fn declare(users: &mut RouteBuilder<'_, AppState>) -> Result<(), RouteError> {
    users
        .get("/exists", "users/exists_by_query")?
        .get("/exists/{id}", "users/exists")?
        .post("/", "users/create")?;
    Ok(())
}
