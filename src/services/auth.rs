// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
    services::access_control::{ROLE_STAFF, ROLE_SUPER_ADMIN},
};

// The first account on a fresh instance bootstraps it and gets the top of
// the hierarchy; every later registration starts at the bottom and must be
// promoted by an administrator.
fn bootstrap_role(existing_users: i64) -> &'static str {
    if existing_users == 0 {
        ROLE_SUPER_ADMIN
    } else {
        ROLE_STAFF
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: sqlx::PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: sqlx::PgPool) -> Self {
        Self { user_repo, jwt_secret, pool }
    }

    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        // bcrypt is CPU-bound, keep it off the async workers
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("hashing task failed: {}", e))??;

        // The count and the insert share a transaction so the bootstrap
        // decision and the row it is based on commit together.
        let mut tx = self.pool.begin().await?;
        let role = bootstrap_role(self.user_repo.count_users(&mut *tx).await?);
        let new_user = self
            .user_repo
            .create_user(&mut *tx, name, email, &hashed_password, role)
            .await?;
        tx.commit().await?;

        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Deactivated accounts fail exactly like wrong passwords.
        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("password verify task failed: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.user_repo.touch_last_login(user.id).await?;
        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }
        Ok(user)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::access_control::{has_role, role_level, ROLE_ADMIN};
    use crate::models::auth::User;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn first_account_bootstraps_the_hierarchy() {
        assert_eq!(bootstrap_role(0), ROLE_SUPER_ADMIN);
        assert_eq!(bootstrap_role(1), ROLE_STAFF);
        assert_eq!(bootstrap_role(42), ROLE_STAFF);
    }

    // The bootstrap account must clear the admin floor guarding user and
    // role administration, or a fresh instance could never be configured.
    #[test]
    fn bootstrap_account_passes_the_admin_floor() {
        let founder = User {
            id: Uuid::new_v4(),
            name: "Founder".into(),
            email: "founder@example.com".into(),
            password_hash: String::new(),
            role: bootstrap_role(0).into(),
            role_id: None,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };
        assert!(has_role(Some(&founder), &[ROLE_ADMIN]));
        assert!(role_level(bootstrap_role(1)) < role_level(ROLE_ADMIN));
    }
}
