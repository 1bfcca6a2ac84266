//! Persistence for cities, videos and accounts.
//!
//! Each request does one independent single-document operation. There is no
//! version field: concurrent writes to the same document are last-write-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::{NewUser, User};
use crate::document::{City, NewCity, NewVideo, ValidationError, Video};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Required fields missing at write time.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Uniqueness constraint violation.
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A stored row that no longer maps onto the model.
    #[error("corrupt {entity} record: {reason}")]
    Corrupt {
        entity: &'static str,
        reason: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CityStore: Send + Sync {
    /// All cities in creation order.
    async fn list_cities(&self) -> StoreResult<Vec<City>>;

    async fn find_city(&self, id: Uuid) -> StoreResult<Option<City>>;

    async fn find_city_by_slug(&self, slug: &str) -> StoreResult<Option<City>>;

    /// Validate and insert. Fails with `Conflict` on a duplicate slug.
    async fn insert_city(&self, city: NewCity) -> StoreResult<City>;

    /// Validate and overwrite an existing city, refreshing `updated_at`.
    /// Fails with `NotFound` when the id is unknown.
    async fn update_city(&self, city: City) -> StoreResult<City>;

    /// `false` when nothing was deleted.
    async fn delete_city(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait VideoStore: Send + Sync {
    /// All videos in creation order.
    async fn list_videos(&self) -> StoreResult<Vec<Video>>;

    async fn insert_video(&self, video: NewVideo) -> StoreResult<Video>;

    async fn delete_video(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Fails with `Conflict` on a duplicate username.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// Overwrite an existing account, refreshing `updated_at`.
    async fn update_user(&self, user: User) -> StoreResult<User>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait ContentStore: CityStore + VideoStore + UserStore {
    /// Cheap connectivity check.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for health output.
    fn backend(&self) -> &'static str;
}
