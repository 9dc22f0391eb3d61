mod new_user;
mod user_email;
mod user_login;

pub use new_user::{NewUser, UserUpdate};
pub use user_email::UserEmail;
pub use user_login::{LOGIN_ALPHABET, UserLogin};
