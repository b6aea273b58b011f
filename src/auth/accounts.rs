use tracing::{info, warn};

use super::password::{hash_password, verify_against_dummy, verify_password};
use crate::db::{
    is_unique_violation, Admin, AdminRepository, DbPool, NewAdmin, NewUser, User, UserRepository,
};
use crate::error::AppError;
use crate::validation::{validate_email, validate_required};

/// Which kind of account a login or signup page is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Admin,
    User,
}

impl AccountRole {
    pub fn label(&self) -> &'static str {
        match self {
            AccountRole::Admin => "Administrator",
            AccountRole::User => "User",
        }
    }

    pub fn login_path(&self) -> &'static str {
        match self {
            AccountRole::Admin => "/admin/login",
            AccountRole::User => "/user/login",
        }
    }

    pub fn register_path(&self) -> &'static str {
        match self {
            AccountRole::Admin => "/admin/register",
            AccountRole::User => "/user/register",
        }
    }

    pub fn needs_email(&self) -> bool {
        matches!(self, AccountRole::User)
    }
}

/// Account creation and credential checks for both roles
#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    admins: AdminRepository,
}

impl AccountService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            admins: AdminRepository::new(pool),
        }
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn admins(&self) -> &AdminRepository {
        &self.admins
    }

    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let username = username.trim();
        let email = email.trim();

        let mut errors = Vec::new();
        if let Err(e) = validate_required(username, "Username") {
            errors.push(e);
        }
        if let Err(e) = validate_email(email) {
            errors.push(e);
        }
        if let Err(e) = validate_required(password, "Password") {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        if self
            .users
            .find_by_username_or_email(username, email)
            .await?
            .is_some()
        {
            return Err(duplicate_user());
        }

        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        };
        let user = self.users.insert(&new_user).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_user()
            } else {
                AppError::from(e)
            }
        })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn register_admin(&self, username: &str, password: &str) -> Result<Admin, AppError> {
        let username = username.trim();

        let mut errors = Vec::new();
        if let Err(e) = validate_required(username, "Username") {
            errors.push(e);
        }
        if let Err(e) = validate_required(password, "Password") {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        if self.admins.find_by_username(username).await?.is_some() {
            return Err(duplicate_admin());
        }

        let new_admin = NewAdmin {
            username: username.to_string(),
            password_hash: hash_password(password)?,
        };
        let admin = self.admins.insert(&new_admin).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_admin()
            } else {
                AppError::from(e)
            }
        })?;

        info!(admin_id = admin.id, username = %admin.username, "Admin registered");
        Ok(admin)
    }

    /// Exact username match, then password check. Both failure modes look identical.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.users.find_by_username(username.trim()).await?;
        match user {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            Some(_) => {
                warn!("Failed user login");
                Err(AppError::InvalidCredentials)
            }
            None => {
                verify_against_dummy(password);
                warn!("Failed user login");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    pub async fn authenticate_admin(&self, username: &str, password: &str) -> Result<Admin, AppError> {
        let admin = self.admins.find_by_username(username.trim()).await?;
        match admin {
            Some(admin) if verify_password(password, &admin.password_hash) => Ok(admin),
            Some(_) => {
                warn!("Failed admin login");
                Err(AppError::InvalidCredentials)
            }
            None => {
                verify_against_dummy(password);
                warn!("Failed admin login");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

fn duplicate_user() -> AppError {
    AppError::DuplicateAccount("Username or email already exists.".to_string())
}

fn duplicate_admin() -> AppError {
    AppError::DuplicateAccount("Username already exists.".to_string())
}
