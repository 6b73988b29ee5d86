use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub page: PageConfig,
    pub display: DisplayConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PageConfig {
    /// Location relative cue sources are resolved against
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    pub show_timestamp: bool,
    pub bar_width: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page: PageConfig { url: String::new() },
            display: DisplayConfig {
                show_timestamp: false,
                bar_width: 640.0,
            },
            fetch: FetchConfig { timeout_secs: 10 },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("vtt-thumbnails")
    }

    /// Load with `file` (any extension `config` understands) as the optional
    /// config file.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("page.url", "")?
            .set_default("display.show_timestamp", false)?
            .set_default("display.bar_width", 640.0)?
            .set_default("fetch.timeout_secs", 10)?
            .add_source(config::File::with_name(file).required(false))
            // e.g. VTT_THUMBNAILS__DISPLAY__BAR_WIDTH=1280
            .add_source(
                config::Environment::with_prefix("VTT_THUMBNAILS")
                    .prefix_separator("__")
                    .separator("__"),
            );

        builder.build()?.try_deserialize()
    }
}
