#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "https://mock-stock-api.com/api/stocks";
pub const DEFAULT_OUTPUT_PATH: &str = "pe_stocks.json";
