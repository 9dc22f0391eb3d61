use crate::domain::{UserEmail, UserLogin};
use secrecy::Secret;

/// Identity submitted when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: UserLogin,
    pub email: UserEmail,
    pub password: Secret<String>,
}

/// New login and email submitted when updating a user.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub login: UserLogin,
    pub email: UserEmail,
}
