use crate::error::MemoryError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactName {
    Total,
    MemFree,
    UsedBytes,
    Capacity,
    SwapTotal,
    SwapFree,
    SwapUsedBytes,
    SwapCapacity,
}

impl FactName {
    pub const ALL: [FactName; 8] = [
        FactName::Total,
        FactName::MemFree,
        FactName::UsedBytes,
        FactName::Capacity,
        FactName::SwapTotal,
        FactName::SwapFree,
        FactName::SwapUsedBytes,
        FactName::SwapCapacity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactName::Total => "total",
            FactName::MemFree => "memfree",
            FactName::UsedBytes => "used_bytes",
            FactName::Capacity => "capacity",
            FactName::SwapTotal => "swap_total",
            FactName::SwapFree => "swap_free",
            FactName::SwapUsedBytes => "swap_used_bytes",
            FactName::SwapCapacity => "swap_capacity",
        }
    }
}

impl fmt::Display for FactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactName {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FactName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| MemoryError::UnknownFact { name: s.to_string() })
    }
}

/// A resolved fact: a byte count or a `"NN.NN%"` utilization string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FactValue {
    Bytes(u64),
    Percent(String),
}

impl FactValue {
    pub fn as_bytes(&self) -> Option<u64> {
        match self {
            FactValue::Bytes(b) => Some(*b),
            FactValue::Percent(_) => None,
        }
    }

    pub fn as_percent(&self) -> Option<&str> {
        match self {
            FactValue::Percent(p) => Some(p),
            FactValue::Bytes(_) => None,
        }
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bytes(b) => write!(f, "{}", b),
            FactValue::Percent(p) => f.write_str(p),
        }
    }
}

/// All eight memory facts, populated together from a single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFactSet {
    pub total: u64,
    pub memfree: u64,
    pub used_bytes: u64,
    pub capacity: String,
    pub swap_total: u64,
    pub swap_free: u64,
    pub swap_used_bytes: u64,
    pub swap_capacity: String,
}

impl MemoryFactSet {
    pub fn get(&self, name: FactName) -> FactValue {
        match name {
            FactName::Total => FactValue::Bytes(self.total),
            FactName::MemFree => FactValue::Bytes(self.memfree),
            FactName::UsedBytes => FactValue::Bytes(self.used_bytes),
            FactName::Capacity => FactValue::Percent(self.capacity.clone()),
            FactName::SwapTotal => FactValue::Bytes(self.swap_total),
            FactName::SwapFree => FactValue::Bytes(self.swap_free),
            FactName::SwapUsedBytes => FactValue::Bytes(self.swap_used_bytes),
            FactName::SwapCapacity => FactValue::Percent(self.swap_capacity.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_str() {
        for name in FactName::ALL {
            assert_eq!(name.as_str().parse::<FactName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "MemTotal".parse::<FactName>().unwrap_err();
        assert!(matches!(err, MemoryError::UnknownFact { ref name } if name == "MemTotal"));
    }

    #[test]
    fn values_serialize_untagged() {
        assert_eq!(serde_json::to_string(&FactValue::Bytes(1024)).unwrap(), "1024");
        assert_eq!(
            serde_json::to_string(&FactValue::Percent("12.50%".into())).unwrap(),
            "\"12.50%\""
        );
    }
}
