use crate::fixtures::{DEFAULT_LOGIN_LENGTH, random_login};

/// Characters the quote service accepts in a login.
pub const LOGIN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLogin(String);

impl UserLogin {
    /// Returns an instance of `UserLogin` if the input is non-empty and made
    /// only of lowercase ASCII letters, digits and underscores.
    pub fn parse(s: String) -> Result<UserLogin, String> {
        if s.is_empty() {
            return Err("A login must not be empty.".to_string());
        }
        match s.bytes().find(|b| !LOGIN_ALPHABET.contains(b)) {
            Some(b) => Err(format!(
                "{} is not a valid login: {:?} is not allowed.",
                s, b as char
            )),
            None => Ok(Self(s)),
        }
    }

    /// A fresh random login of `DEFAULT_LOGIN_LENGTH` characters.
    pub fn generate() -> Self {
        Self(random_login(DEFAULT_LOGIN_LENGTH))
    }
}

impl AsRef<str> for UserLogin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
