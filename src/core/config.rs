use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub aws: AwsConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

/// Connection settings shared by the member table and photo bucket clients
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// AWS region used for both DynamoDB and S3
    pub region: String,
    /// Endpoint override (e.g. LocalStack), unset for real AWS
    pub endpoint_url: Option<String>,
}

/// Initial storage targets, editable at runtime from the settings page
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub dynamodb_table: Option<String>,
    pub s3_bucket: Option<String>,
}

impl Config {
    /// Read configuration from the process environment
    ///
    /// `.env` is loaded by `main` before this is called.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            aws: AwsConfig::from_env(),
            registry: RegistryConfig::from_env(),
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AwsConfig {
    const DEFAULT_REGION: &'static str = "ap-northeast-2";

    pub fn from_env() -> Self {
        let region = env::var("AWS_REGION")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_REGION.to_string());
        let endpoint_url = env::var("AWS_ENDPOINT_URL").ok().filter(|s| !s.is_empty());

        Self {
            region,
            endpoint_url,
        }
    }
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Only use identifiers if they are non-empty
        let dynamodb_table = lookup("DYNAMODB_TABLE").filter(|s| !s.is_empty());
        let s3_bucket = lookup("S3_BUCKET").filter(|s| !s.is_empty());

        Self {
            dynamodb_table,
            s3_bucket,
        }
    }
}
