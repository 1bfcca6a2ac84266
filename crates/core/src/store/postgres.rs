//! PostgreSQL-backed store.
//!
//! Localized fields and the nested section/activity arrays are JSONB columns
//! holding exactly the wire shape, so the full view round-trips unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{CityStore, ContentStore, StoreError, StoreResult, UserStore, VideoStore};
use crate::auth::{NewUser, Role, User};
use crate::document::{Activity, City, NewCity, NewVideo, Section, Video};
use crate::i18n::LocalizedText;

const CITY_COLUMNS: &str = "id, name, slug, hero_image, intro_text, sections, activities, \
                            created_at, updated_at";

const VIDEO_COLUMNS: &str = "id, title, url, description, thumbnail, created_at, updated_at";

const USER_COLUMNS: &str = "id, username, email, password_hash, role, is_active, last_login, \
                            created_at, updated_at";

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct CityRow {
    id: Uuid,
    name: Json<LocalizedText>,
    slug: String,
    hero_image: String,
    intro_text: Json<LocalizedText>,
    sections: Json<Vec<Section>>,
    activities: Json<Vec<Activity>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City {
            id: row.id,
            name: row.name.0,
            slug: row.slug,
            hero_image: row.hero_image,
            intro_text: row.intro_text.0,
            sections: row.sections.0,
            activities: row.activities.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct VideoRow {
    id: Uuid,
    title: Json<LocalizedText>,
    url: String,
    description: Json<LocalizedText>,
    thumbnail: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        Video {
            id: row.id,
            title: row.title.0,
            url: row.url,
            description: row.description.0,
            thumbnail: row.thumbnail,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e| StoreError::Corrupt {
            entity: "User",
            reason: format!("{e}"),
        })?;
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Turn a unique violation into `Conflict`; pass everything else through.
fn classify(err: sqlx::Error, entity: &'static str, field: &'static str, value: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict {
                entity,
                field,
                value: value.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl CityStore for PgStore {
    async fn list_cities(&self) -> StoreResult<Vec<City>> {
        let query = format!("SELECT {CITY_COLUMNS} FROM cities ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, CityRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn find_city(&self, id: Uuid) -> StoreResult<Option<City>> {
        let query = format!("SELECT {CITY_COLUMNS} FROM cities WHERE id = $1");
        let row = sqlx::query_as::<_, CityRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(City::from))
    }

    async fn find_city_by_slug(&self, slug: &str) -> StoreResult<Option<City>> {
        let query = format!("SELECT {CITY_COLUMNS} FROM cities WHERE slug = $1");
        let row = sqlx::query_as::<_, CityRow>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(City::from))
    }

    async fn insert_city(&self, city: NewCity) -> StoreResult<City> {
        city.validate()?;
        let city = city.into_city(Utc::now());
        let query = format!(
            "INSERT INTO cities (id, name, slug, hero_image, intro_text, sections, activities,
                                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {CITY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CityRow>(&query)
            .bind(city.id)
            .bind(Json(&city.name))
            .bind(&city.slug)
            .bind(&city.hero_image)
            .bind(Json(&city.intro_text))
            .bind(Json(&city.sections))
            .bind(Json(&city.activities))
            .bind(city.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "City", "slug", &city.slug))?;
        Ok(row.into())
    }

    async fn update_city(&self, city: City) -> StoreResult<City> {
        city.validate()?;
        let query = format!(
            "UPDATE cities SET
                name = $2,
                slug = $3,
                hero_image = $4,
                intro_text = $5,
                sections = $6,
                activities = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {CITY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CityRow>(&query)
            .bind(city.id)
            .bind(Json(&city.name))
            .bind(&city.slug)
            .bind(&city.hero_image)
            .bind(Json(&city.intro_text))
            .bind(Json(&city.sections))
            .bind(Json(&city.activities))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(e, "City", "slug", &city.slug))?;
        row.map(City::from)
            .ok_or(StoreError::NotFound { entity: "City" })
    }

    async fn delete_city(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl VideoStore for PgStore {
    async fn list_videos(&self) -> StoreResult<Vec<Video>> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, VideoRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Video::from).collect())
    }

    async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
        video.validate()?;
        let video = video.into_video(Utc::now());
        let query = format!(
            "INSERT INTO videos (id, title, url, description, thumbnail, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {VIDEO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VideoRow>(&query)
            .bind(video.id)
            .bind(Json(&video.title))
            .bind(&video.url)
            .bind(Json(&video.description))
            .bind(&video.thumbnail)
            .bind(video.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn delete_video(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user(Utc::now());
        let query = format!(
            "INSERT INTO users (id, username, email, password_hash, role, is_active, created_at,
                                updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "User", "username", &user.username))?
            .try_into()
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let query = format!(
            "UPDATE users SET
                username = $2,
                email = $3,
                password_hash = $4,
                role = $5,
                is_active = $6,
                last_login = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.last_login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(e, "User", "username", &user.username))?
            .map(User::try_from)
            .transpose()?
            .ok_or(StoreError::NotFound { entity: "User" })
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
