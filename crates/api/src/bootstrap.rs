use cityfolio_core::auth::password::hash_password;
use cityfolio_core::auth::{NewUser, Role};
use cityfolio_core::store::ContentStore;

use crate::config::AdminCredentials;

/// Create the bootstrap admin account unless one with that username exists.
/// Returns `true` when an account was created.
pub async fn ensure_admin(
    store: &dyn ContentStore,
    admin: &AdminCredentials,
) -> anyhow::Result<bool> {
    if store.find_user_by_username(&admin.username).await?.is_some() {
        tracing::debug!(username = %admin.username, "Admin account present");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;

    let user = store
        .insert_user(NewUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    tracing::warn!(
        user_id = %user.id,
        username = %user.username,
        "Created default admin account; change its password after first login"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityfolio_core::store::{MemoryStore, UserStore};

    fn credentials() -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_string(),
            email: "admin@investment-site.com".to_string(),
            password: "Admin@123456".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_the_admin_once() {
        let store = MemoryStore::new();

        assert!(ensure_admin(&store, &credentials()).await.unwrap());
        assert!(!ensure_admin(&store, &credentials()).await.unwrap());

        let admin = store.find_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.is_active);
        assert!(admin.password_hash.starts_with("$argon2id$"));
    }
}
