use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use tracing::warn;

use crate::config::Config;
use crate::domain::models::{auth::Claims, user::User};
use crate::domain::ports::UserRepository;
use crate::error::AppError;

const MAX_FAILED_ATTEMPTS: i64 = 5;
const LOCKOUT_MINUTES: i64 = 15;
const TOKEN_TTL_DAYS: i64 = 7;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let normalized = email.trim().to_lowercase();

        if self.users.find_by_email(&normalized).await?.is_some() {
            return Err(AppError::Conflict("Email already in use".into()));
        }

        let password_hash = self.hash_password(password)?;
        let user = User::new(
            normalized,
            first_name.trim().to_string(),
            last_name.trim().to_string(),
            password_hash,
        );

        self.users.create(&user).await
    }

    /// Checks the lockout window before the password. A failed attempt
    /// increments the counter; the fifth consecutive failure arms a
    /// 15-minute lockout and resets the counter.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let normalized = email.trim().to_lowercase();

        let mut user = self
            .users
            .find_by_email(&normalized)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.lockout_enabled {
            if let Some(until) = user.lockout_until {
                if until > Utc::now() {
                    return Err(AppError::AccountLocked);
                }
            }
        }

        if !self.verify_password(password, &user.password_hash) {
            user.failed_attempts += 1;
            if user.lockout_enabled && user.failed_attempts >= MAX_FAILED_ATTEMPTS {
                user.lockout_until = Some(Utc::now() + Duration::minutes(LOCKOUT_MINUTES));
                user.failed_attempts = 0;
                warn!(user_id = %user.id, "account locked after repeated failed logins");
            }
            self.users.update_lockout_state(&user).await?;
            return Err(AppError::Unauthorized);
        }

        user.failed_attempts = 0;
        user.lockout_until = None;
        self.users.update_lockout_state(&user).await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AppError::Internal)
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
