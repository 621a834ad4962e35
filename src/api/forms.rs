//! Account form endpoints
//!
//! Each endpoint answers 200 with `{"valid": true, "errors": {}}` when the
//! submission passes and 422 with the per-field messages when it does not.

use axum::{
    Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::forms::{
    LoginForm, RegistrationForm, UpdateUserForm, UploadedFile, ValidationOutcome,
};

pub fn create_forms_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(validate_login))
        .route("/register", post(validate_registration))
        .route("/users/{user_id}/update", post(validate_update))
}

/// POST /forms/login
pub async fn validate_login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Response {
    outcome_response(state.account_forms.validate_login(&form))
}

/// POST /forms/register
pub async fn validate_registration(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<Response, ApiError> {
    let outcome = state.account_forms.validate_registration(&form).await?;
    Ok(outcome_response(outcome))
}

/// POST /forms/users/{user_id}/update
///
/// Multipart body with text parts `email` and `username` and an optional
/// file part `picture`. Other parts are ignored.
pub async fn validate_update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_update_form(multipart).await?;

    debug!(
        user_id = %user_id,
        has_picture = form.picture.is_some(),
        "Validating profile update"
    );

    let outcome = state.account_forms.validate_update(&user_id, &form).await?;
    Ok(outcome_response(outcome))
}

async fn read_update_form(mut multipart: Multipart) -> Result<UpdateUserForm, ApiError> {
    let mut form = UpdateUserForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "email" | "username" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read field '{}': {}", name, e))
                        .with_param(name.clone())
                })?;

                if name == "email" {
                    form.email = value;
                } else {
                    form.username = value;
                }
            }
            "picture" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(|s| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read file '{}': {}", filename, e))
                        .with_param("picture")
                })?;

                // Browsers send an empty, nameless part when no file was chosen
                let mut picture = UploadedFile::new(filename, data);

                if let Some(content_type) = content_type {
                    picture = picture.with_content_type(content_type);
                }

                if !picture.is_empty() {
                    form.picture = Some(picture);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn outcome_response(outcome: ValidationOutcome) -> Response {
    let status = if outcome.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    (status, Json(outcome)).into_response()
}
