//! Accounts, password hashing and bearer tokens.

pub mod password;
pub mod token;
pub mod user;

pub use token::{Claims, TokenConfig, TokenError};
pub use user::{NewUser, Role, User, UserProfile};
