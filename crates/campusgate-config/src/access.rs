//! Route guard configuration.
//!
//! # Environment Variables
//!
//! - `ACCESS_BYPASS_SEGMENTS`: Comma-separated path segments whose portals skip
//!   the page allow-list (default: `teacher,student,parent`)
//! - `PERMISSION_FETCH_TIMEOUT_SECS`: Upper bound on one permission fetch
//!   (default: `10`)
//! - `SESSION_SWEEP_INTERVAL_SECS`: How often sessions whose token has expired
//!   are dropped (default: `60`)

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::split_list;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessConfig {
    /// Path segments that bypass the allow-list.
    pub bypass_segments: Vec<String>,

    /// A fetch still pending after this long resolves to default-deny.
    pub fetch_timeout: Duration,

    pub session_sweep_interval: Duration,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            bypass_segments: vec![
                "teacher".to_string(),
                "student".to_string(),
                "parent".to_string(),
            ],
            fetch_timeout: Duration::from_secs(10),
            session_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bypass_segments = env::var("ACCESS_BYPASS_SEGMENTS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.bypass_segments);

        Self {
            bypass_segments,
            fetch_timeout: secs_from_env("PERMISSION_FETCH_TIMEOUT_SECS", defaults.fetch_timeout),
            session_sweep_interval: secs_from_env(
                "SESSION_SWEEP_INTERVAL_SECS",
                defaults.session_sweep_interval,
            ),
        }
    }
}

fn secs_from_env(key: &str, default: Duration) -> Duration {
    match env::var(key) {
        Ok(raw) => parse_secs(&raw).unwrap_or_else(|| {
            warn!(key = %key, value = %raw, "Invalid duration, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Whole, positive seconds.
fn parse_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_access_config() {
        let config = AccessConfig::default();
        assert_eq!(config.bypass_segments, vec!["teacher", "student", "parent"]);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.session_sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs("30"), Some(Duration::from_secs(30)));
        assert_eq!(parse_secs(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_secs("0"), None);
        assert_eq!(parse_secs("soon"), None);
    }
}
