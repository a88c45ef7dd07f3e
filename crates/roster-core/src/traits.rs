//! Cross-cutting traits shared by the store and service layers.

use async_trait::async_trait;
use serde::Serialize;

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy(_) => "unhealthy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_flags() {
        assert!(HealthStatus::Healthy.is_healthy());
        let down = HealthStatus::Unhealthy("connection refused".to_string());
        assert!(down.is_unhealthy());
        assert_eq!(down.as_str(), "unhealthy");
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_value(HealthStatus::Unhealthy("timeout".to_string())).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["reason"], "timeout");
    }
}
