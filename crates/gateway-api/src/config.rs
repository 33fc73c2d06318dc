use std::env;
use std::time::Duration;

/// Service configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Deployment label, e.g. "prod" or "staging"
    pub environment: String,
    pub aws_region: String,
    pub dynamodb_table: String,
    /// Bucket listed by `GET /api/files`
    pub s3_bucket_data: String,
    pub s3_bucket_static: String,
    /// Redis host; empty means localhost
    pub redis_endpoint: String,
    pub redis_port: String,
    /// Requests still running after this long are aborted
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "prod".to_string(),
            aws_region: "us-east-1".to_string(),
            dynamodb_table: String::new(),
            s3_bucket_data: String::new(),
            s3_bucket_static: String::new(),
            redis_endpoint: String::new(),
            redis_port: "6379".to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parse configuration from an arbitrary variable source.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let request_timeout = var("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            port,
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            aws_region: var("AWS_REGION").unwrap_or(defaults.aws_region),
            dynamodb_table: var("DYNAMODB_TABLE").unwrap_or_default(),
            s3_bucket_data: var("S3_BUCKET_DATA").unwrap_or_default(),
            s3_bucket_static: var("S3_BUCKET_STATIC").unwrap_or_default(),
            redis_endpoint: var("REDIS_ENDPOINT").unwrap_or_default(),
            redis_port: var("REDIS_PORT").unwrap_or(defaults.redis_port),
            request_timeout,
        }
    }
}
