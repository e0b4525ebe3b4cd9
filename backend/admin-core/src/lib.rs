pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;

#[cfg(test)]
mod tests;

pub const ADMIN_API_SCHEME: &str = "https";
pub const ADMIN_API_HOST: &str = "api.pressroom.news";
pub const DEFAULT_API_BASE_URL: &str =
    const_format::concatcp!(ADMIN_API_SCHEME, "://", ADMIN_API_HOST);
