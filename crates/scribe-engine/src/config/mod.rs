pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{
    BrowserEngine, CodegenConfig, RecordingConfig, ScribeConfig, SecurityConfig, SelectorConfig,
};
