// ABOUTME: Credential and token handling for Drinkwise
// ABOUTME: Provides password hashing, signed access tokens and user account storage

pub mod error;
pub mod password;
pub mod tokens;
pub mod users;

// Re-export main types for convenience
pub use error::{AuthError, AuthResult};
pub use password::{hash_password, spawn_hash_password, spawn_verify_password, verify_password};
pub use tokens::{Claims, TokenService};
pub use users::storage::UserStorage;
pub use users::{User, UserProfile};
