//! Avatar file naming and public URL resolution.
//!
//! Uploaded avatars are stored under a generated collision-resistant name so
//! a client-supplied filename can never clobber another user's file. A NULL
//! avatar reference resolves to the well-known default avatar, which is
//! never deleted.

use uuid::Uuid;

/// Public path of the default avatar, relative to the server base URL.
pub const DEFAULT_AVATAR_PATH: &str = "/uploads/avatars/default.png";

/// Longest extension we will carry over from an uploaded filename.
const MAX_EXT_LEN: usize = 8;

/// Generate a storage filename for an uploaded avatar.
///
/// The name is a UUID v4 with the original file's extension appended,
/// lowercased. Extensions containing anything but ASCII alphanumerics, or
/// longer than [`MAX_EXT_LEN`], are dropped entirely.
///
/// # Examples
///
/// ```
/// use extranet_core::avatar::generate_avatar_filename;
///
/// let name = generate_avatar_filename("Holiday Photo.PNG");
/// assert!(name.ends_with(".png"));
/// ```
pub fn generate_avatar_filename(original_name: &str) -> String {
    let stem = Uuid::new_v4().to_string();
    match sanitized_extension(original_name) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Extract a safe, lowercased extension from an uploaded filename.
fn sanitized_extension(original_name: &str) -> Option<String> {
    let (stem, ext) = original_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > MAX_EXT_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Resolve a stored avatar reference to an absolute public URL.
///
/// `reference` is the path stored in the `users.avatar` column; `None` means
/// the user has no custom avatar and gets the default.
pub fn resolve_avatar_url(reference: Option<&str>, base_url: &str) -> String {
    let path = reference.unwrap_or(DEFAULT_AVATAR_PATH);
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
