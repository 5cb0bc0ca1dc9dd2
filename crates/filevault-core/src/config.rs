//! Configuration module
//!
//! Server, database, storage and logging settings read from the environment.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 5;
const SERVER_PORT: u16 = 8080;
const DB_PORT: u16 = 5432;
const MAX_FILE_SIZE_MB: usize = 10;

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Settings shared by every process in the deployment
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub log_format: LogFormat,
}

/// File service configuration
#[derive(Clone, Debug)]
pub struct FileServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub max_file_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FileServiceConfig>);

impl Config {
    fn as_service(&self) -> &FileServiceConfig {
        &self.0
    }

    pub fn is_production(&self) -> bool {
        let env = self.as_service().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = FileServiceConfig::from_vars(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_service().base.log_format
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.as_service().database_url
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_service().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_service().s3_bucket.as_deref()
    }

    /// S3_REGION wins over AWS_REGION
    pub fn s3_region(&self) -> Option<&str> {
        self.as_service()
            .s3_region
            .as_deref()
            .or(self.as_service().aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_service().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_service().local_storage_path.as_deref()
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_service().max_file_size_bytes
    }
}

impl FileServiceConfig {
    /// Build the configuration from a variable lookup.
    ///
    /// `Config::from_env` passes the process environment; tests pass a map.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let log_format = match var("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::Compact,
        };

        let base = BaseConfig {
            server_port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(SERVER_PORT),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: var("DB_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            log_format,
        };

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&var, &base.environment)?,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        let max_file_size_mb: usize = var("MAX_FILE_SIZE_MB")
            .and_then(|v| v.parse().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);
        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                anyhow::anyhow!("MAX_FILE_SIZE_MB is too large: {}", max_file_size_mb)
            })?;

        Ok(Self {
            base,
            database_url,
            storage_backend,
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION"),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_region: var("AWS_REGION"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            max_file_size_bytes,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if !matches!(self.s3_bucket.as_deref(), Some(bucket) if !bucket.is_empty()) {
            return Err(anyhow::anyhow!("S3_BUCKET must be set"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

fn database_url_from_parts<F>(var: &F, environment: &str) -> Result<String, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let host = var("DB_HOST")
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL or DB_HOST must be set"))?;
    let port = var("DB_PORT")
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DB_PORT);
    let user = var("DB_USER").ok_or_else(|| anyhow::anyhow!("DB_USER must be set"))?;
    let password = var("DB_PASS").unwrap_or_default();

    let name_var = if environment.eq_ignore_ascii_case("test") {
        "TEST_DB_NAME"
    } else {
        "DB_NAME"
    };
    let name = var(name_var).ok_or_else(|| anyhow::anyhow!("{} must be set", name_var))?;

    if password.is_empty() {
        Ok(format!("postgres://{}@{}:{}/{}", user, host, port, name))
    } else {
        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }
}
