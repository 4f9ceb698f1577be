//! Configuration loading and validation

use railboard_display::BoardLayout;

use super::types::BoardConfig;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML could not be parsed into a config (byte offset if known)
    Syntax { offset: Option<usize> },
    /// Station code is not three letters
    InvalidStation,
    /// No service rows
    ZeroRows,
    /// More rows than fit above the banner
    TooManyRows { max: usize },
    /// Empty API key
    MissingApiKey,
    /// Empty Wi-Fi SSID
    MissingSsid,
    /// Base URL is not http(s)
    InvalidBaseUrl,
    /// A retry limit or size ceiling is zero
    ZeroLimit,
    /// Banner keeps no lines
    ZeroBannerLines,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Syntax { offset: Some(offset) } => {
                write!(f, "config syntax error at byte {}", offset)
            }
            ConfigError::Syntax { offset: None } => f.write_str("config syntax error"),
            ConfigError::InvalidStation => f.write_str("station codes must be 3 letters"),
            ConfigError::ZeroRows => f.write_str("rows must be at least 1"),
            ConfigError::TooManyRows { max } => write!(f, "rows must be at most {}", max),
            ConfigError::MissingApiKey => f.write_str("api_key is empty"),
            ConfigError::MissingSsid => f.write_str("wifi ssid is empty"),
            ConfigError::InvalidBaseUrl => f.write_str("base_url must be http or https"),
            ConfigError::ZeroLimit => f.write_str("retry limits must be non-zero"),
            ConfigError::ZeroBannerLines => f.write_str("banner_lines must be at least 1"),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a TOML config
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(text).map_err(|e| {
            let offset = e.span().map(|span| span.start);
            warn!("Config parse error at {}", offset);
            ConfigError::Syntax { offset }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a running board depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_station_code(&self.origin) || !is_station_code(&self.destination) {
            return Err(ConfigError::InvalidStation);
        }
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        let max = BoardLayout::default().max_rows();
        if self.rows > max {
            return Err(ConfigError::TooManyRows { max });
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.wifi.ssid.is_empty() {
            return Err(ConfigError::MissingSsid);
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl);
        }
        if self.retry.connect_attempts == 0 || self.retry.max_body_len == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if self.messages.banner_lines == 0 {
            return Err(ConfigError::ZeroBannerLines);
        }
        Ok(())
    }
}

fn is_station_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}
