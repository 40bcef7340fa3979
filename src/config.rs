use std::{env, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub results_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub store_timeout: Duration,
    pub leaderboard_limit: usize,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: SecretString::from(
                env::var("MONGO_CONN_STRING")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizboard".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            results_collection: env::var("RESULTS_COLLECTION")
                .unwrap_or_else(|_| "results".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_timeout: Duration::from_millis(
                env::var("STORE_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(5000),
            ),
            leaderboard_limit: env::var("LEADERBOARD_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    /// Rejects settings that would make every store call or leaderboard read useless.
    pub fn validate(&self) -> AppResult<()> {
        if self.store_timeout.is_zero() {
            return Err(AppError::ValidationError(
                "STORE_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        if self.leaderboard_limit == 0 {
            return Err(AppError::ValidationError(
                "LEADERBOARD_LIMIT must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: SecretString::from("mongodb://localhost:27017".to_string()),
            mongo_db_name: "quizboard-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            results_collection: "results".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            store_timeout: Duration::from_millis(500),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            cors_allowed_origin: None,
        }
    }
}
