//! Match configuration.

use chrono::Duration;

/// Parameters for journey matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Maximum distance between the two origins, and between the two
    /// destinations (km).
    pub radius_km: f64,

    /// Maximum difference between departure times (minutes).
    pub time_window_mins: i64,
}

impl MatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(radius_km: f64, time_window_mins: i64) -> Self {
        Self {
            radius_km,
            time_window_mins,
        }
    }

    /// Get time window as a Duration.
    pub fn time_window(&self) -> Duration {
        Duration::minutes(self.time_window_mins)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            radius_km: 5.0,
            time_window_mins: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MatchConfig::default();

        assert_eq!(config.radius_km, 5.0);
        assert_eq!(config.time_window_mins, 30);
        assert_eq!(config.time_window(), Duration::minutes(30));
    }

    #[test]
    fn custom_config() {
        let config = MatchConfig::new(2.5, 15);

        assert_eq!(config.radius_km, 2.5);
        assert_eq!(config.time_window(), Duration::minutes(15));
    }
}
