//! Repository for the `users` table.

use sqlx::PgPool;

use extranet_core::types::DbId;

use crate::models::user::{CreateUser, ProfileFields, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, password_hash, name, surname, email, avatar, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Violating the `uq_users_username` constraint surfaces as a database
    /// error with code 23505; the caller classifies it into a conflict.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, name, surname, email, avatar)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(&input.email)
            .bind(&input.avatar)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive; usernames are lowercase by rule).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Whether a username is already taken.
    ///
    /// Advisory only: a register racing past this check is still caught by
    /// the unique constraint at insert time.
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Apply profile fields unconditionally: `None` clears the column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        fields: &ProfileFields,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = $2,
                surname = $3,
                email = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.surname)
            .bind(&fields.email)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the avatar reference. Returns `true` if the row was updated.
    pub async fn set_avatar(
        pool: &PgPool,
        id: DbId,
        avatar: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET avatar = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(avatar)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
