//! Payload types published on the bus
//!
//! All types use camelCase JSON serialization for wire compatibility with
//! the log collector.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Forwarded entry of an ordinary level: the level name and the raw arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLog {
    pub level: String,
    pub msg: Vec<Value>,
}

/// Forwarded audit entry keyed by the acting user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub user_id: String,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Always `"audit"`
    pub level: String,
}

/// Data part of a bus envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogEnvelope {
    Audit(AuditLog),
    Remote(RemoteLog),
}

impl LogEnvelope {
    pub fn remote(level: impl Into<String>, msg: &[Value]) -> Self {
        Self::Remote(RemoteLog {
            level: level.into(),
            msg: msg.to_vec(),
        })
    }

    pub fn audit(user_id: impl Into<String>, msg: impl Into<String>, payload: Option<Value>) -> Self {
        Self::Audit(AuditLog {
            user_id: user_id.into(),
            msg: msg.into(),
            payload,
            level: crate::level::AUDIT.to_string(),
        })
    }

    /// Level name carried by the envelope
    pub fn level(&self) -> &str {
        match self {
            Self::Audit(audit) => &audit.level,
            Self::Remote(remote) => &remote.level,
        }
    }
}

/// What actually goes over the wire: a fresh correlation id plus the entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusEnvelope {
    /// Unique per publish (uuid v4)
    pub correlation_id: String,
    pub data: LogEnvelope,
}

impl BusEnvelope {
    /// Wrap an entry with a newly generated correlation id
    pub fn new(data: LogEnvelope) -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_wire_shape() {
        let env = LogEnvelope::remote("error", &[json!("x"), json!({"code": 7})]);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({"level": "error", "msg": ["x", {"code": 7}]}));
    }

    #[test]
    fn test_audit_wire_shape() {
        let env = LogEnvelope::audit("u1", "did thing", Some(json!({"x": 1})));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({"userId": "u1", "msg": "did thing", "payload": {"x": 1}, "level": "audit"})
        );
    }

    #[test]
    fn test_audit_without_payload_omits_field() {
        let env = LogEnvelope::audit("u1", "login", None);
        let value = serde_json::to_value(&env).unwrap();
        assert!(value.get("payload").is_none());
        assert_eq!(env.level(), "audit");
    }

    #[test]
    fn test_bus_envelope_fresh_ids() {
        let a = BusEnvelope::new(LogEnvelope::remote("remote", &[]));
        let b = BusEnvelope::new(LogEnvelope::remote("remote", &[]));
        assert_ne!(a.correlation_id, b.correlation_id);

        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["correlationId"], json!(a.correlation_id));
        assert_eq!(value["data"]["level"], "remote");
    }

    #[test]
    fn test_untagged_deserialize_picks_audit() {
        let env: LogEnvelope = serde_json::from_value(
            json!({"userId": "u2", "msg": "m", "level": "audit"}),
        )
        .unwrap();
        assert!(matches!(env, LogEnvelope::Audit(ref a) if a.user_id == "u2"));
    }
}
