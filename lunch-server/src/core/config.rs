use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/lunch-hunter | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | Runtime environment |
/// | CITIES | Липецк,Ковров | Comma-separated list of served cities |
/// | BROWSE_PAGE_SIZE | 1 | Venues per page in end-user browsing |
/// | ADMIN_PAGE_SIZE | 5 | Venues per page in admin selection steps |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Cities venues can belong to; users pick one of these
    pub cities: Vec<String>,
    /// Page size of end-user list views (one venue per "page" by default)
    pub browse_page_size: i64,
    /// Page size of the admin venue-selection steps
    pub select_page_size: i64,
}

impl Config {
    /// Load the configuration from environment variables, with defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/lunch-hunter".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            cities: std::env::var("CITIES")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_else(|_| vec!["Липецк".to_string(), "Ковров".to_string()]),
            browse_page_size: std::env::var("BROWSE_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1),
            select_page_size: std::env::var("ADMIN_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Override the work dir and port, keeping everything else from the
    /// environment. Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database").join("lunch.db")
    }

    /// Make sure the work dir subdirectories exist
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        let work_dir = PathBuf::from(&self.work_dir);
        std::fs::create_dir_all(work_dir.join("database"))?;
        std::fs::create_dir_all(work_dir.join("logs"))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_and_database_path_sits_under_the_work_dir() {
        let config = Config::with_overrides("/tmp/lunch-test", 4000);
        assert_eq!(config.work_dir, "/tmp/lunch-test");
        assert_eq!(config.http_port, 4000);
        assert!(config.database_path().starts_with("/tmp/lunch-test"));
        assert!(config.database_path().ends_with("database/lunch.db"));
    }
}
