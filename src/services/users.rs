//! Registration, login and token verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Credentials, Token, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a user and return a fresh token
    pub fn register(&self, credentials: Credentials) -> AppResult<Token> {
        credentials.validate()?;

        let user = User {
            username: credentials.username.clone(),
            password_hash: self.hash_password(&credentials.password)?,
            created_at: Utc::now(),
        };
        self.repository.users.create(user)?;
        tracing::info!("User registered: {}", credentials.username);

        self.issue_token(&credentials.username)
    }

    pub fn login(&self, credentials: Credentials) -> AppResult<Token> {
        let user = self
            .repository
            .users
            .get_by_username(&credentials.username)
            .map_err(|_| AppError::Authentication("Authentication failed".to_string()))?;

        if !self.verify_password(&user, &credentials.password)? {
            tracing::warn!("Failed login for {}", credentials.username);
            return Err(AppError::Authentication("Authentication failed".to_string()));
        }

        self.issue_token(&user.username)
    }

    /// Decode a bearer token into its claims
    pub fn verify_token(&self, token: &str) -> AppResult<UserClaims> {
        UserClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }

    fn issue_token(&self, username: &str) -> AppResult<Token> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.jwt_expiration_minutes)).timestamp(),
        };
        let access_token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(Token {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
