// 🧱 Timeline Model - platform records and the transitions between them

use crate::month::Month;
use serde::{Deserialize, Serialize};

// ============================================================================
// INPUT RECORDS
// ============================================================================

/// One technology platform's active interval and lane membership,
/// as declared in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRecord {
    /// Unique name, also the node label in the rendered diagram
    pub name: String,

    /// Lane the platform belongs to (e.g. "compute", "messaging")
    pub group: String,

    /// Month the platform entered service
    pub start: Month,

    /// Month the platform left service; `None` while still in service
    #[serde(default)]
    pub end: Option<Month>,
}

impl PlatformRecord {
    /// True while the platform has no end month yet.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// A weighted directed edge: usage migrating from one platform to
/// another, effective at `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionLink {
    pub source: String,
    pub target: String,

    /// Flow width in the diagram; must be positive
    pub value: f64,

    /// Month the migration took effect
    pub date: Month,
}

// ============================================================================
// CLOSED NODES
// ============================================================================

/// Where a node in the closed timeline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeOrigin {
    /// Declared in the input configuration
    Declared,

    /// Appended by the closing pass to terminate an open interval
    Synthetic,
}

/// A record after the closing pass: interval fully bounded, endpoint
/// roles known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformNode {
    pub name: String,
    pub group: String,
    pub start: Month,
    pub end: Month,
    pub origin: NodeOrigin,

    /// Name appears as `source` of at least one link
    pub is_source: bool,

    /// Name appears as `target` of at least one link
    pub is_target: bool,
}

impl PlatformNode {
    pub fn is_synthetic(&self) -> bool {
        self.origin == NodeOrigin::Synthetic
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_record_detection() {
        let record = PlatformRecord {
            name: "Edge Proxy".to_string(),
            group: "gateway".to_string(),
            start: "2016-10".parse().unwrap(),
            end: None,
        };
        assert!(record.is_open());

        let closed = PlatformRecord {
            end: Some("2018-06".parse().unwrap()),
            ..record
        };
        assert!(!closed.is_open());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let json = r#"{"name":"Batch VMs","group":"compute","start":"2016-10","end":"2018-06"}"#;
        let record: PlatformRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.name, "Batch VMs");
        assert_eq!(record.start.to_string(), "2016-10");
        assert_eq!(record.end.unwrap().to_string(), "2018-06");
    }

    #[test]
    fn test_record_json_missing_end_is_open() {
        let json = r#"{"name":"Service Bus","group":"messaging","start":"2016-10"}"#;
        let record: PlatformRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_open());

        let json = r#"{"name":"Service Bus","group":"messaging","start":"2016-10","end":null}"#;
        let record: PlatformRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_open());
    }

    #[test]
    fn test_record_json_rejects_malformed_month() {
        let json = r#"{"name":"Batch VMs","group":"compute","start":"2016-1"}"#;
        assert!(serde_json::from_str::<PlatformRecord>(json).is_err());
    }

    #[test]
    fn test_link_json_roundtrip() {
        let json = r#"{"source":"A","target":"B","value":2.0,"date":"2023-03"}"#;
        let link: TransitionLink = serde_json::from_str(json).unwrap();

        assert_eq!(link.source, "A");
        assert_eq!(link.target, "B");
        assert_eq!(link.value, 2.0);
        assert_eq!(link.date.to_string(), "2023-03");
    }
}
