//! Order Store Config

use std::time::Duration;

use clap::Args;
use kledje::orders::RestOrderStoreConfig;

/// Order store settings.
#[derive(Debug, Args)]
pub(crate) struct OrdersConfig {
    /// Base URL of the hosted order table; orders stay in memory when unset
    #[arg(long, env = "KLEDJE_ORDERS_URL")]
    pub orders_url: Option<String>,

    /// API key for the hosted order table
    #[arg(long, env = "KLEDJE_ORDERS_API_KEY", hide_env_values = true)]
    pub orders_api_key: Option<String>,

    /// Seconds the order store is given to accept an order
    #[arg(long, env = "KLEDJE_SUBMIT_TIMEOUT_SECS", default_value_t = 15)]
    pub submit_timeout_secs: u64,
}

impl OrdersConfig {
    pub(crate) fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    /// REST store settings, or `None` when orders should stay in memory.
    pub(crate) fn rest(&self) -> Result<Option<RestOrderStoreConfig>, String> {
        let Some(url) = self.orders_url.as_deref() else {
            return Ok(None);
        };

        let api_key = self
            .orders_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| "KLEDJE_ORDERS_API_KEY is required with KLEDJE_ORDERS_URL".to_string())?;

        Ok(Some(RestOrderStoreConfig {
            timeout: self.submit_timeout(),
            ..RestOrderStoreConfig::new(url, api_key)
        }))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config(url: Option<&str>, key: Option<&str>) -> OrdersConfig {
        OrdersConfig {
            orders_url: url.map(str::to_string),
            orders_api_key: key.map(str::to_string),
            submit_timeout_secs: 5,
        }
    }

    #[test]
    fn no_url_means_memory_store() -> TestResult {
        assert!(config(None, Some("anon")).rest()?.is_none());

        Ok(())
    }

    #[test]
    fn url_requires_api_key() {
        assert!(config(Some("https://shop.example.co"), None).rest().is_err());
        assert!(config(Some("https://shop.example.co"), Some(" ")).rest().is_err());
    }

    #[test]
    fn rest_config_uses_submit_timeout() -> TestResult {
        let rest = config(Some("https://shop.example.co"), Some("anon"))
            .rest()?
            .ok_or("expected rest config")?;

        assert_eq!(rest.base_url, "https://shop.example.co");
        assert_eq!(rest.table, "orders");
        assert_eq!(rest.timeout, Duration::from_secs(5));

        Ok(())
    }
}
