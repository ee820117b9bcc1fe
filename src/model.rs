//! # Domain model
//! Read-only inputs to the scoring engine: the organizational risk `Profile` and the
//! candidate risk `Event`s. Both are owned by external stores; the engine only borrows them.
//!
//! JSON uses camelCase field names, matching what the surrounding application stores.
//! Every collection defaults to empty so sparse records deserialize cleanly.

use serde::{Deserialize, Serialize};

/// Organization risk profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    /// Free text, matched case-insensitively against the industry table.
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub business_units: Vec<BusinessUnit>,
    #[serde(default)]
    pub areas_of_concern: Vec<AreaOfConcern>,
    #[serde(default)]
    pub regions: Vec<String>,
    /// Consumed by the surrounding application, not by the scoring weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
}

impl BusinessUnit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaOfConcern {
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

impl AreaOfConcern {
    pub fn new(category: impl Into<String>, priority: Priority) -> Self {
        Self {
            category: category.into(),
            description: String::new(),
            priority,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Geopolitical risk event (news-like record).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictive_analytics: Option<PredictiveAnalytics>,
    /// Lifecycle flag; only "active" events are offered to the engine by the API layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Event {
    /// Predicted timeframe, if the event carries predictive analytics.
    pub fn timeframe(&self) -> Option<Timeframe> {
        self.predictive_analytics.as_ref().and_then(|p| p.timeframe)
    }

    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("active"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveAnalytics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
}

/// Event severity. Unrecognized values deserialize to `Unknown` (neutral multiplier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

/// Predicted timeframe. Unrecognized values deserialize to `Unknown` (neutral multiplier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_event_deserializes() {
        let e: Event = serde_json::from_str(r#"{"title":"Port strike"}"#).unwrap();
        assert_eq!(e.title, "Port strike");
        assert!(e.categories.is_empty());
        assert!(e.severity.is_none());
        assert!(e.timeframe().is_none());
        assert!(!e.is_active());
    }

    #[test]
    fn unknown_enum_values_are_tolerated() {
        let e: Event = serde_json::from_str(
            r#"{"severity":"catastrophic","predictiveAnalytics":{"timeframe":"someday"}}"#,
        )
        .unwrap();
        assert_eq!(e.severity, Some(Severity::Unknown));
        assert_eq!(e.timeframe(), Some(Timeframe::Unknown));
    }

    #[test]
    fn profile_uses_camel_case() {
        let p: Profile = serde_json::from_str(
            r#"{
                "industry": "Technology",
                "businessUnits": [{"name": "semiconductor"}],
                "areasOfConcern": [{"category": "trade disputes", "priority": "high"}],
                "regions": ["asia-pacific"],
                "riskTolerance": "medium"
            }"#,
        )
        .unwrap();
        assert_eq!(p.business_units[0].name, "semiconductor");
        assert_eq!(p.areas_of_concern[0].priority, Priority::High);
        assert_eq!(p.risk_tolerance, Some(RiskTolerance::Medium));
    }

    #[test]
    fn status_check_is_case_insensitive() {
        let e = Event {
            status: Some(" Active ".into()),
            ..Default::default()
        };
        assert!(e.is_active());
    }
}
