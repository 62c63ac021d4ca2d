pub mod client;
pub mod server;
pub mod toml_config;

pub use client::ClientConfig;
pub use server::ServerConfig;
pub use toml_config::FileConfig;
