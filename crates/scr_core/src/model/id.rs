//! Opaque entity identifiers and their generation.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier shared by students, courses and enrollments.
///
/// Persisted ids are loaded verbatim, so this wraps a plain string rather
/// than a parsed UUID. Numeric ids are accepted and kept as their decimal
/// text; `null` loads as the empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self(text)),
            Value::Number(number) => Ok(Self(number.to_string())),
            Value::Null => Ok(Self::default()),
            other => Err(D::Error::custom(format!("unsupported id value `{other}`"))),
        }
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

/// How fresh identifiers are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random v4 UUID from the OS CSPRNG.
    #[default]
    Random,
    /// v7 UUID: millisecond timestamp prefix plus random tail.
    TimeOrdered,
}

impl IdStrategy {
    /// Generates a fresh identifier.
    ///
    /// Ids are never derived from collection length or a counter, so a
    /// deleted record's id is never handed out again.
    pub fn generate(self) -> EntityId {
        match self {
            Self::Random => Uuid::new_v4().into(),
            Self::TimeOrdered => Uuid::now_v7().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityId, IdStrategy};
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique_for_both_strategies() {
        for strategy in [IdStrategy::Random, IdStrategy::TimeOrdered] {
            let ids: HashSet<EntityId> = (0..256).map(|_| strategy.generate()).collect();
            assert_eq!(ids.len(), 256);
        }
    }

    #[test]
    fn entity_id_serializes_as_bare_string() {
        let id = EntityId::from("id_legacy_01");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json, serde_json::json!("id_legacy_01"));
    }
}
