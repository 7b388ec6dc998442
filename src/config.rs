use anyhow::Context;
use log::info;
use serde::Deserialize;
use std::{env, fs::File};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// OpenWeather API key. Can be left out of the file and supplied via the
    /// environment instead; it should never land in source control.
    #[serde(default)]
    pub api_key: String,
    /// Fallback city when neither typed input nor a geolocated position is
    /// available
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Language code sent to the provider; also the locale of every
    /// user-facing string in this crate
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_city() -> String {
    "Bruxelles".into()
}

fn default_language() -> String {
    "fr".into()
}

impl Config {
    const PATH: &'static str = "./config.json";
    const API_KEY_VAR: &'static str = "METEO_API_KEY";

    pub fn load() -> anyhow::Result<Self> {
        info!("Loading config from `{}`", Self::PATH);
        let file = File::open(Self::PATH)
            .with_context(|| format!("Error opening config file {}", Self::PATH))?;
        let mut config: Self = serde_json::from_reader(file)
            .context(format!("Error parsing config file {}", Self::PATH))?;
        if let Ok(key) = env::var(Self::API_KEY_VAR) {
            config.api_key = key;
        }
        anyhow::ensure!(
            !config.api_key.is_empty(),
            "No API key: set `api_key` in {} or the {} variable",
            Self::PATH,
            Self::API_KEY_VAR
        );
        Ok(config)
    }
}
