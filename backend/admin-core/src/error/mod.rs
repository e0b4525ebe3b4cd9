pub mod api_client;
pub mod config;
pub mod logging;

pub use api_client::ApiClientError;
pub use config::ConfigError;
pub use logging::LoggingError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    ApiClient(#[from] api_client::ApiClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
}
