// src/config/mod.rs
pub mod tracker;

pub use tracker::{
    load_config_default, load_config_from, NotifySettings, SearchSettings, TrackerConfig,
    ENV_CONFIG_PATH, ENV_TOKEN,
};
