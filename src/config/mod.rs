use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::query::PageLimits;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub query: QueryConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
    pub seed_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub max_request_size_bytes: usize,
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiry_minutes: i64,
    pub password_min_length: usize,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub storage_dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Query overrides
        if let Ok(v) = env::var("QUERY_DEFAULT_PAGE_SIZE") {
            self.query.default_page_size = v.parse().unwrap_or(self.query.default_page_size);
        }
        if let Ok(v) = env::var("QUERY_MAX_PAGE_SIZE") {
            self.query.max_page_size = v.parse().unwrap_or(self.query.max_page_size);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
                self.database.backend = StorageBackend::Postgres;
            }
        }
        match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => self.database.backend = StorageBackend::Memory,
            Ok("postgres") => self.database.backend = StorageBackend::Postgres,
            _ => {}
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }
        if let Ok(v) = env::var("DATABASE_SEED_DATA") {
            self.database.seed_data = v.parse().unwrap_or(self.database.seed_data);
        }

        // API overrides
        if let Some(port) = env::var("WALKS_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Ok(v) = env::var("API_PUBLIC_BASE_URL") {
            self.api.public_base_url = Some(v.trim_end_matches('/').to_string());
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Ok(v) = env::var("JWT_AUDIENCE") {
            self.security.jwt_audience = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_MINUTES") {
            self.security.jwt_expiry_minutes = v.parse().unwrap_or(self.security.jwt_expiry_minutes);
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_MIN_LENGTH") {
            self.security.password_min_length = v.parse().unwrap_or(self.security.password_min_length);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Image overrides
        if let Ok(v) = env::var("IMAGES_STORAGE_DIR") {
            self.images.storage_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("IMAGES_MAX_FILE_SIZE_BYTES") {
            self.images.max_file_size_bytes = v.parse().unwrap_or(self.images.max_file_size_bytes);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            query: QueryConfig::default(),
            database: DatabaseConfig {
                backend: StorageBackend::Memory,
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
                seed_data: true,
            },
            api: ApiConfig {
                port: 5268,
                max_request_size_bytes: 12 * 1024 * 1024, // 12MB
                public_base_url: None,
            },
            security: SecurityConfig {
                jwt_secret: "development-only-secret-change-me-before-deploying".to_string(),
                jwt_issuer: "https://localhost:5268/".to_string(),
                jwt_audience: "https://localhost:5268/".to_string(),
                jwt_expiry_minutes: 15,
                password_min_length: 6,
                cors_origins: vec!["*".to_string()],
            },
            images: ImageConfig::default(),
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            query: QueryConfig::default(),
            database: DatabaseConfig {
                backend: StorageBackend::Postgres,
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
                seed_data: true,
            },
            api: ApiConfig {
                port: 5268,
                max_request_size_bytes: 12 * 1024 * 1024,
                public_base_url: None,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_issuer: "https://staging.example.com/".to_string(),
                jwt_audience: "https://staging.example.com/".to_string(),
                jwt_expiry_minutes: 15,
                password_min_length: 8,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            images: ImageConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            query: QueryConfig::default(),
            database: DatabaseConfig {
                backend: StorageBackend::Postgres,
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
                seed_data: false,
            },
            api: ApiConfig {
                port: 8080,
                max_request_size_bytes: 11 * 1024 * 1024,
                public_base_url: None,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_issuer: "https://app.example.com/".to_string(),
                jwt_audience: "https://app.example.com/".to_string(),
                jwt_expiry_minutes: 15,
                password_min_length: 8,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            images: ImageConfig::default(),
        }
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_size: self.query.default_page_size.max(1),
            max_size: self.query.max_page_size.max(1),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: crate::query::DEFAULT_PAGE_SIZE,
            max_page_size: crate::query::MAX_PAGE_SIZE,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("Images"),
            max_file_size_bytes: 10 * 1024 * 1024, // 10MB
            allowed_extensions: vec![".jpg".to_string(), ".jpeg".to_string(), ".png".to_string()],
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
