use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;

/// JSON body that has been deserialized and validated before reaching the
/// handler. Both failures become `AppError::Validation` (400).
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value.validate().map_err(|e| AppError::Validation(first_message(&e)))?;

        Ok(Self(value))
    }
}

/// Picks one human-readable message out of the error set. Fields are visited
/// in name order so the result is stable.
pub fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields
        .into_iter()
        .filter_map(|field| {
            field_errors.get(field)?.first().map(|err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("El campo '{field}' no es válido"),
            })
        })
        .next()
        .unwrap_or_else(|| "Datos no válidos".to_string())
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
