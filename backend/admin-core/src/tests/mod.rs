mod client;
mod error;
mod logging;
