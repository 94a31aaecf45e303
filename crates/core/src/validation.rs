//! Field-level validation primitives.
//!
//! Request validators collect every violation into a [`FieldErrors`]
//! accumulator instead of stopping at the first one, then convert it into
//! a [`CoreError::InvalidFields`] so the API layer can render the
//! `{ path, message }` list clients rely on.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single violation, addressed by the parameter or body key it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Accumulates [`FieldError`]s in the order they are detected.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record one error per key that is not in `allowed`, sorted by key so
    /// the output does not depend on map iteration order.
    pub fn reject_unknown_keys<'a, I>(&mut self, keys: I, allowed: &[&str])
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut unknown: Vec<&String> = keys
            .into_iter()
            .filter(|key| !allowed.contains(&key.as_str()))
            .collect();
        unknown.sort();

        for key in unknown {
            self.push(
                key.as_str(),
                format!("Additional parameters are not allowed: {key}"),
            );
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    pub fn into_error(self) -> CoreError {
        CoreError::InvalidFields(self.errors)
    }
}

/// Fold raw `key=value` pairs into a map.
///
/// A key given more than once is an error rather than last-wins, reported
/// once per key and sorted by key.
pub fn collect_params<I>(pairs: I) -> Result<HashMap<String, String>, CoreError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut params = HashMap::new();
    let mut repeated = BTreeSet::new();

    for (key, value) in pairs {
        if params.contains_key(&key) {
            repeated.insert(key);
        } else {
            params.insert(key, value);
        }
    }

    let mut errors = FieldErrors::new();
    for key in repeated {
        let message = format!("Parameter must not be repeated: {key}");
        errors.push(key, message);
    }
    errors.into_result()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn clean_accumulator_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn into_result_returns_all_recorded_errors() {
        let mut errors = FieldErrors::new();
        errors.push("a", "first");
        errors.push("b", "second");

        let err = errors.into_result().unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(list) if list.len() == 2 && list[0].path == "a");
    }

    #[test]
    fn unknown_keys_are_reported_sorted() {
        let keys = vec!["zeta".to_string(), "id".to_string(), "alpha".to_string()];
        let mut errors = FieldErrors::new();
        errors.reject_unknown_keys(&keys, &["id"]);

        let list = match errors.into_error() {
            CoreError::InvalidFields(list) => list,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].path, "alpha");
        assert_eq!(list[1].path, "zeta");
        assert!(list[0]
            .message
            .contains("Additional parameters are not allowed"));
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn distinct_params_are_collected() {
        let params = collect_params(pairs(&[("service", "github"), ("id", "validuser123")])).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["service"], "github");
    }

    #[test]
    fn repeated_params_are_rejected_once_per_key() {
        let err = collect_params(pairs(&[
            ("service", "github"),
            ("service", "email"),
            ("id", "a"),
            ("id", "b"),
            ("id", "c"),
        ]))
        .unwrap_err();

        assert_matches!(
            err,
            CoreError::InvalidFields(list)
                if list == vec![
                    FieldError::new("id", "Parameter must not be repeated: id"),
                    FieldError::new("service", "Parameter must not be repeated: service"),
                ]
        );
    }
}
