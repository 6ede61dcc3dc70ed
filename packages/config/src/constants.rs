// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Drinkwise

// Secrets
pub const SECRET_KEY: &str = "SECRET_KEY";

// Database Configuration
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";

// Server Configuration
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Token Configuration
pub const ACCESS_TOKEN_EXPIRE_MINUTES: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";

