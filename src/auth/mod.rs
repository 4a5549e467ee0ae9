//! Account authentication: bcrypt password hashes and HS256 bearer tokens.

pub mod password;
pub mod token;

pub use token::{AuthUser, Claims, TokenIssuer};
