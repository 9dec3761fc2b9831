use anyhow::anyhow;
use tracing::{info, instrument};

use expense_tracker_auth::create_access_token;
use expense_tracker_config::JwtConfig;
use expense_tracker_core::{AppError, hash_password, verify_password};

use crate::repository::RepoError;

use super::model::{AuthResponse, LoginRequest, NewUser, RegisterRequest};
use super::repository::UserRepository;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto, jwt_config), fields(email = %dto.email))]
    pub async fn register(
        users: &dyn UserRepository,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = dto.email.trim().to_string();

        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::bad_request(anyhow!("Email already exists")));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create(NewUser {
                name: dto.name.trim().to_string(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepoError::Conflict => AppError::bad_request(anyhow!("Email already exists")),
                other => AppError::from(other),
            })?;

        let token = create_access_token(user.id, &user.email, jwt_config)?;

        info!(user_id = user.id, "User registered");

        Ok(AuthResponse { user, token })
    }

    #[instrument(skip(users, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let invalid_credentials = || AppError::unauthorized(anyhow!("Invalid credentials"));

        let user = users
            .find_by_email(dto.email.trim())
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(invalid_credentials());
        }

        let user = user.into_user();
        let token = create_access_token(user.id, &user.email, jwt_config)?;

        Ok(AuthResponse { user, token })
    }
}
