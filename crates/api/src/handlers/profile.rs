//! Handlers for the authenticated user's own profile.
//!
//! The update endpoint accepts a multipart form so the avatar file can ride
//! along with the text fields. Sequencing invariants: the ownership check
//! happens before any mutation, a new avatar file is fully written to disk
//! before the database reference is swapped, and the replaced file is only
//! removed after the swap has committed.

use std::path::Path as FsPath;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use extranet_core::avatar::{generate_avatar_filename, resolve_avatar_url, DEFAULT_AVATAR_PATH};
use extranet_core::error::CoreError;
use extranet_core::types::DbId;
use extranet_db::models::user::ProfileFields;
use extranet_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::Ack;
use crate::state::AppState;

/// Public path prefix under which avatar files are served.
const AVATAR_URL_PREFIX: &str = "/uploads/avatars";

/// Response body for `GET /profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub username: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    /// Absolute URL of the avatar; the default avatar when no custom one is set.
    pub avatar_url: String,
}

/// Collected fields of the multipart profile-update form.
#[derive(Debug, Default)]
struct ProfileUpdateForm {
    id: Option<DbId>,
    name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
    remove_avatar: bool,
    /// Original filename and content of the uploaded avatar, if any.
    avatar: Option<(String, Bytes)>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/profile
///
/// Return the caller's own profile. There is no endpoint shape for reading
/// anyone else's.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let avatar_url = resolve_avatar_url(user.avatar.as_deref(), &state.config.public_base_url);

    Ok(Json(ProfileResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        surname: user.surname,
        email: user.email,
        avatar_url,
    }))
}

/// POST /api/v1/profile/update
///
/// Multipart form: `id`, `name`, `surname`, `email`, `remove_avatar`, and an
/// optional `avatar` file. Profile fields are applied unconditionally --
/// absent or empty text fields clear the column.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<Ack>> {
    let form = read_form(&mut multipart).await?;

    let target_id = form
        .id
        .ok_or_else(|| AppError::BadRequest("Missing id field".into()))?;

    // Ownership gate, before any file write or row mutation.
    if auth.user_id != target_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only modify your own profile.".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, target_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: target_id,
        }))?;
    let previous_avatar = user.avatar;

    let fields = ProfileFields {
        name: form.name,
        surname: form.surname,
        email: form.email,
    };
    UserRepo::update_profile(&state.pool, target_id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: target_id,
        }))?;

    if form.remove_avatar {
        UserRepo::set_avatar(&state.pool, target_id, None).await?;
        cleanup_replaced_avatar(&state.config.avatar_dir, previous_avatar.as_deref()).await;
    } else if let Some((original_name, data)) = form.avatar {
        // The file must be on disk before the reference swap.
        let filename = generate_avatar_filename(&original_name);
        let dest = state.config.avatar_dir.join(&filename);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store avatar: {e}")))?;

        let reference = format!("{AVATAR_URL_PREFIX}/{filename}");
        UserRepo::set_avatar(&state.pool, target_id, Some(&reference)).await?;
        cleanup_replaced_avatar(&state.config.avatar_dir, previous_avatar.as_deref()).await;
    }

    tracing::info!(user_id = target_id, "Profile updated");

    Ok(Json(Ack::ok()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Drain the multipart stream into a [`ProfileUpdateForm`].
///
/// Field order in the stream is not guaranteed, so everything is collected
/// before any decision is made. Unknown fields are ignored.
async fn read_form(multipart: &mut Multipart) -> AppResult<ProfileUpdateForm> {
    let mut form = ProfileUpdateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "id" => {
                let text = text_field(field).await?;
                let id = text
                    .trim()
                    .parse::<DbId>()
                    .map_err(|_| AppError::BadRequest("id must be an integer".into()))?;
                form.id = Some(id);
            }
            "name" => form.name = non_empty(text_field(field).await?),
            "surname" => form.surname = non_empty(text_field(field).await?),
            "email" => form.email = non_empty(text_field(field).await?),
            "remove_avatar" => form.remove_avatar = text_field(field).await? == "true",
            "avatar" => {
                let original = field.file_name().unwrap_or("avatar").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !data.is_empty() {
                    form.avatar = Some((original, data));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Read a text field, mapping decode failures to a 400.
async fn text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Empty submitted values clear the column, same as absent ones.
fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Best-effort deletion of a replaced avatar file.
///
/// The default avatar is never deleted. A failed deletion is logged, not
/// fatal -- the reference swap has already committed.
async fn cleanup_replaced_avatar(avatar_dir: &FsPath, previous: Option<&str>) {
    let Some(previous) = previous else {
        return;
    };
    if previous == DEFAULT_AVATAR_PATH {
        return;
    }
    // The reference is a URL path; only its final segment names the file.
    let Some(filename) = previous.rsplit('/').next() else {
        return;
    };
    if filename.is_empty() {
        return;
    }

    let path = avatar_dir.join(filename);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete replaced avatar file");
        }
    }
}
