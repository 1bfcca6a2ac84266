use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CityStore, ContentStore, StoreError, StoreResult, UserStore, VideoStore};
use crate::auth::{NewUser, User};
use crate::document::{City, NewCity, NewVideo, Video};

/// Process-local store. Keeps insertion order and enforces the same
/// uniqueness rules as the database schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cities: RwLock<Vec<City>>,
    videos: RwLock<Vec<Video>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(cities: &[City], slug: &str, except: Option<Uuid>) -> bool {
    cities
        .iter()
        .any(|c| c.slug == slug && Some(c.id) != except)
}

fn username_taken(users: &[User], username: &str, except: Option<Uuid>) -> bool {
    users
        .iter()
        .any(|u| u.username == username && Some(u.id) != except)
}

fn slug_conflict(slug: &str) -> StoreError {
    StoreError::Conflict {
        entity: "City",
        field: "slug",
        value: slug.to_string(),
    }
}

fn username_conflict(username: &str) -> StoreError {
    StoreError::Conflict {
        entity: "User",
        field: "username",
        value: username.to_string(),
    }
}

#[async_trait]
impl CityStore for MemoryStore {
    async fn list_cities(&self) -> StoreResult<Vec<City>> {
        Ok(self.cities.read().await.clone())
    }

    async fn find_city(&self, id: Uuid) -> StoreResult<Option<City>> {
        Ok(self.cities.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_city_by_slug(&self, slug: &str) -> StoreResult<Option<City>> {
        Ok(self
            .cities
            .read()
            .await
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn insert_city(&self, city: NewCity) -> StoreResult<City> {
        city.validate()?;
        let mut cities = self.cities.write().await;
        if slug_taken(&cities, &city.slug, None) {
            return Err(slug_conflict(&city.slug));
        }
        let city = city.into_city(Utc::now());
        cities.push(city.clone());
        Ok(city)
    }

    async fn update_city(&self, mut city: City) -> StoreResult<City> {
        city.validate()?;
        let mut cities = self.cities.write().await;
        if slug_taken(&cities, &city.slug, Some(city.id)) {
            return Err(slug_conflict(&city.slug));
        }
        let slot = cities
            .iter_mut()
            .find(|c| c.id == city.id)
            .ok_or(StoreError::NotFound { entity: "City" })?;
        city.created_at = slot.created_at;
        city.updated_at = Utc::now();
        *slot = city.clone();
        Ok(city)
    }

    async fn delete_city(&self, id: Uuid) -> StoreResult<bool> {
        let mut cities = self.cities.write().await;
        let before = cities.len();
        cities.retain(|c| c.id != id);
        Ok(cities.len() < before)
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn list_videos(&self) -> StoreResult<Vec<Video>> {
        Ok(self.videos.read().await.clone())
    }

    async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
        video.validate()?;
        let video = video.into_video(Utc::now());
        self.videos.write().await.push(video.clone());
        Ok(video)
    }

    async fn delete_video(&self, id: Uuid) -> StoreResult<bool> {
        let mut videos = self.videos.write().await;
        let before = videos.len();
        videos.retain(|v| v.id != id);
        Ok(videos.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if username_taken(&users, &user.username, None) {
            return Err(username_conflict(&user.username));
        }
        let user = user.into_user(Utc::now());
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, mut user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if username_taken(&users, &user.username, Some(user.id)) {
            return Err(username_conflict(&user.username));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound { entity: "User" })?;
        user.created_at = slot.created_at;
        user.updated_at = Utc::now();
        *slot = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
