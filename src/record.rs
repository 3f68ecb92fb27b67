//! Record shapes flowing through the pipeline.
//!
//! Rules are written against the small capability traits below (`Named`,
//! `Contact`, `Aged`, `Valued`) rather than against concrete structs, so one
//! rule serves every record type that carries the field.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-defined record identifier. Rendered verbatim in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

/// A unit of input data. Records are moved by value through the pipeline.
pub trait Record: Clone + fmt::Debug {
    fn id(&self) -> RecordId;
}

pub trait Named: Record {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

pub trait Contact: Record {
    fn email(&self) -> &str;
    fn set_email(&mut self, email: String);
}

pub trait Aged: Record {
    fn age(&self) -> i64;
}

pub trait Valued: Record {
    fn value(&self) -> f64;
}

pub trait Timestamped: Record {
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

/// A row loaded from tabular input: `id,name,value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: i64,
    pub name: String,
    pub value: f64,
}

impl DataRecord {
    pub fn new(id: i64, name: impl Into<String>, value: f64) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }
}

impl Record for DataRecord {
    fn id(&self) -> RecordId {
        RecordId::Int(self.id)
    }
}

impl Named for DataRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Valued for DataRecord {
    fn value(&self) -> f64 {
        self.value
    }
}

/// A person record with contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    /// When the record was captured, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ContactRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Record for ContactRecord {
    fn id(&self) -> RecordId {
        RecordId::Text(self.id.clone())
    }
}

impl Named for ContactRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Contact for ContactRecord {
    fn email(&self) -> &str {
        &self.email
    }

    fn set_email(&mut self, email: String) {
        self.email = email;
    }
}

impl Aged for ContactRecord {
    fn age(&self) -> i64 {
        self.age
    }
}

impl Timestamped for ContactRecord {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}
