mod loader;
mod rules;

pub use loader::{
    load_config, FetchcurlConfig, HeaderRules, LoadedConfig, ProfileConfig, CONFIG_FILE_NAME,
};
pub use rules::apply_header_rules;
