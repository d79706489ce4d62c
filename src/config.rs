use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_SITE_NAME: &str = "Kertai Milk";
pub const DEFAULT_BUSINESS_NUMBER: &str = "254112676725";
// Placeholder until the real relay form id is known.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/your-form-id";
pub const DEFAULT_BUSY_LABEL: &str = "Sending...";

/// Every tunable the page scripts rely on.
///
/// `Default` carries the compiled-in values; `from_env` lets a deployment
/// override the ones that differ per site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub site_name: String,
    pub business_number: String,
    pub relay_endpoint: String,
    pub busy_label: String,
    pub banner_display: Duration,
    pub banner_fade: Duration,
    pub header_offset: f64,
    pub scroll_debounce: Duration,
    pub reveal_threshold: f64,
    pub enquiry_scroll_delay: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            business_number: DEFAULT_BUSINESS_NUMBER.to_string(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            busy_label: DEFAULT_BUSY_LABEL.to_string(),
            banner_display: Duration::from_millis(5_000),
            banner_fade: Duration::from_millis(500),
            header_offset: 80.0,
            scroll_debounce: Duration::from_millis(50),
            reveal_threshold: 0.85,
            enquiry_scroll_delay: Duration::from_millis(100),
        }
    }
}

impl SiteConfig {
    /// Loads `.env` if present and applies overrides from
    /// `SITE_NAME`, `WHATSAPP_BUSINESS_NUMBER`, `RELAY_ENDPOINT` and
    /// `BANNER_DISPLAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("SITE_NAME") {
            config.site_name = name;
        }
        if let Some(number) = lookup("WHATSAPP_BUSINESS_NUMBER") {
            config.business_number = number;
        }
        if let Some(endpoint) = lookup("RELAY_ENDPOINT") {
            config.relay_endpoint = endpoint;
        }
        if let Some(ms) = lookup("BANNER_DISPLAY_MS") {
            let parsed = ms.trim().parse::<u64>().map_err(|_| ConfigError::InvalidDuration {
                var: "BANNER_DISPLAY_MS",
                value: ms.clone(),
            })?;
            config.banner_display = Duration::from_millis(parsed);
        }

        config.validate()?;
        tracing::debug!(
            "Loaded site config for {} (relay: {})",
            config.site_name,
            config.relay_endpoint
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.relay_endpoint)?;
        if self.business_number.is_empty()
            || !self.business_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::InvalidBusinessNumber(self.business_number.clone()));
        }
        Ok(())
    }
}
