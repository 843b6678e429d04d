use serde::{Deserialize, Serialize};

const MPH_TO_MPS: f64 = 0.447_04;

/// Parameters for turning raw road geometry into a travel-time graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Assumed average driving speed, miles per hour
    pub speed_mph: f64,
    /// Treat features with a truthy `oneway` property as single-direction
    pub respect_oneway: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            speed_mph: 25.0,
            respect_oneway: true,
        }
    }
}

impl NetworkConfig {
    pub fn speed_mps(&self) -> f64 {
        self.speed_mph * MPH_TO_MPS
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_speed_converts_to_meters_per_second() {
        let config = NetworkConfig::default();
        assert_relative_eq!(config.speed_mps(), 11.176, epsilon = 1e-9);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: NetworkConfig = serde_json::from_str(r#"{"speed_mph": 40.0}"#).unwrap();
        assert_eq!(config.speed_mph, 40.0);
        assert!(config.respect_oneway);
    }
}
