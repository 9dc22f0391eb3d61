//! Random identity data for throwaway users.
//!
//! Logins are not checked for uniqueness: a collision is left to the quote
//! service to reject, which fails the check that hit it.

use crate::domain::{LOGIN_ALPHABET, NewUser, UserEmail, UserLogin, UserUpdate};
use fake::Fake;
use fake::faker::internet::en::{Password, SafeEmail};
use rand::Rng;
use secrecy::Secret;

pub const DEFAULT_LOGIN_LENGTH: usize = 12;
pub const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 16;

/// Draws `length` characters uniformly, with replacement, from `LOGIN_ALPHABET`.
pub fn random_login(length: usize) -> String {
    random_login_with_rng(&mut rand::thread_rng(), length)
}

pub fn random_login_with_rng<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| LOGIN_ALPHABET[rng.gen_range(0..LOGIN_ALPHABET.len())] as char)
        .collect()
}

pub fn random_email() -> String {
    SafeEmail().fake()
}

pub fn random_password() -> Secret<String> {
    Secret::new(Password(MIN_PASSWORD_LENGTH..MAX_PASSWORD_LENGTH).fake())
}

impl NewUser {
    pub fn generate() -> Self {
        Self {
            login: UserLogin::generate(),
            email: UserEmail::generate(),
            password: random_password(),
        }
    }
}

impl UserUpdate {
    pub fn generate() -> Self {
        Self {
            login: UserLogin::generate(),
            email: UserEmail::generate(),
        }
    }
}
