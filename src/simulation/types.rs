//! Core types for the warehouse simulation
//!
//! Identifiers, operation metadata values and model constants.

use std::fmt;

use ordered_float::OrderedFloat;

/// A wrapper type for AGV IDs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgvId(pub String);

/// A wrapper type for operation IDs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(pub String);

/// A wrapper type for industrial process IDs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(AgvId);
string_id!(OperationId);
string_id!(ProcessId);

/// A value stored in an operation's auxiliary data map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataValue {
    Text(String),
    Number(OrderedFloat<f64>),
    Flag(bool),
}

impl DataValue {
    pub fn number(value: f64) -> Self {
        DataValue::Number(OrderedFloat(value))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Number(value) => Some(value.into_inner()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            DataValue::Flag(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::number(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Flag(value)
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Text(value) => f.write_str(value),
            DataValue::Number(value) => write!(f, "{}", value),
            DataValue::Flag(value) => write!(f, "{}", value),
        }
    }
}

/// Data key under which transport operations record their distance (meters)
pub const DATA_KEY_DISTANCE_M: &str = "distance_m";

/// Fixed start/stop and docking overhead added to every transport, in minutes
pub const TRANSPORT_OVERHEAD_MINUTES: f64 = 0.5;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
