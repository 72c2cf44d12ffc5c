//! Configuration module
//!
//! Environment-driven configuration for the API and services. Notification
//! recipients and the frontend URL are explicit configuration here rather
//! than literals scattered through the notification code.

use std::env;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_PHOTO_SIZE_MB: usize = 5;
const NOTIFY_TIMEOUT_SECS: u64 = 20;

/// Application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Photo upload limits
    pub max_photo_size_bytes: usize,
    pub allowed_photo_content_types: Vec<String>,
    // Notification routing
    pub manager_email: String,
    pub tto_email: String,
    pub engineer_email: String,
    pub seller_email: String,
    pub frontend_url: String,
    // SMTP transport
    pub email_enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    /// Bound on a single notification send. The workflow tolerates
    /// notification failure, so a hung SMTP connection must not hold a
    /// request open indefinitely.
    pub notify_timeout_seconds: u64,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_photo_size_mb = env::var("MAX_PHOTO_SIZE_MB")
            .unwrap_or_else(|_| MAX_PHOTO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_PHOTO_SIZE_MB);

        let allowed_photo_content_types = env::var("ALLOWED_PHOTO_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/jpg,image/png,image/gif".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_photo_size_bytes: max_photo_size_mb * 1024 * 1024,
            allowed_photo_content_types,
            manager_email: env::var("MANAGER_EMAIL")
                .unwrap_or_else(|_| "slthrmanager@gmail.com".to_string()),
            tto_email: env::var("TTO_EMAIL").unwrap_or_else(|_| "slttto@gmail.com".to_string()),
            engineer_email: env::var("ENGINEER_EMAIL")
                .unwrap_or_else(|_| "engineerslt38@gmail.com".to_string()),
            seller_email: env::var("SELLER_EMAIL")
                .unwrap_or_else(|_| "slttiersellerseller@gmail.com".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://tire-frontend.vercel.app".to_string())
                .trim_end_matches('/')
                .to_string(),
            email_enabled: env::var("EMAIL_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            smtp_host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&p| p > 0),
            smtp_user: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_from: env::var("SMTP_FROM").ok().filter(|s| !s.is_empty()),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            notify_timeout_seconds: env::var("NOTIFY_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| NOTIFY_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(NOTIFY_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.database_url.starts_with("postgresql://") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.email_enabled && (self.smtp_host.is_none() || self.smtp_from.is_none()) {
            return Err(anyhow::anyhow!(
                "EMAIL_ENABLED=true requires SMTP_HOST and SMTP_FROM to be set"
            ));
        }

        if self.max_photo_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_PHOTO_SIZE_MB must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 4000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            environment: "development".to_string(),
            database_url: "postgresql://localhost/tireflow".to_string(),
            db_max_connections: 20,
            db_timeout_seconds: 30,
            max_photo_size_bytes: 5 * 1024 * 1024,
            allowed_photo_content_types: vec!["image/jpeg".to_string()],
            manager_email: "manager@example.com".to_string(),
            tto_email: "tto@example.com".to_string(),
            engineer_email: "engineer@example.com".to_string(),
            seller_email: "seller@example.com".to_string(),
            frontend_url: "http://localhost:3001".to_string(),
            email_enabled: false,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            notify_timeout_seconds: 20,
        }
    }

    #[test]
    fn validate_accepts_development_wildcard_cors() {
        let mut config = base_config();
        config.cors_origins = vec!["*".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_wildcard_cors_in_production() {
        let mut config = base_config();
        config.environment = "production".to_string();
        config.cors_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_email_enabled_without_smtp() {
        let mut config = base_config();
        config.email_enabled = true;
        assert!(config.validate().is_err());

        config.smtp_host = Some("smtp.example.com".to_string());
        config.smtp_from = Some("noreply@example.com".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let mut config = base_config();
        config.database_url = "mysql://localhost/tireflow".to_string();
        assert!(config.validate().is_err());
    }
}
