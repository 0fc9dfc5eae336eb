//! Wikidata identifier newtypes
//!
//! Entity identifiers ("Q42") and property identifiers ("P31") are opaque
//! keys into the remote knowledge graph. They are validated on construction
//! and ordered by their numeric part, which gives the fetch layer a stable,
//! deterministic statement ordering across repeated requests.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wikidata entity identifier, e.g. "Q42"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Qid(String);

/// Wikidata property identifier, e.g. "P31"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pid(String);

fn validate(raw: &str, prefix: char) -> Result<()> {
    let mut chars = raw.chars();
    if chars.next() != Some(prefix) {
        return Err(Error::InvalidInput(format!(
            "identifier must start with '{}': {}",
            prefix, raw
        )));
    }
    let digits = &raw[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!("malformed identifier: {}", raw)));
    }
    Ok(())
}

impl Qid {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        validate(&raw, 'Q')?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of the identifier, used for stable ordering
    pub fn number(&self) -> u64 {
        self.0[1..].parse().unwrap_or(u64::MAX)
    }

    /// Extract a Qid from an entity URI such as
    /// `http://www.wikidata.org/entity/Q42`
    pub fn from_entity_uri(uri: &str) -> Option<Self> {
        let tail = uri.rsplit('/').next()?;
        Self::new(tail).ok()
    }
}

impl Pid {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        validate(&raw, 'P')?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn number(&self) -> u64 {
        self.0[1..].parse().unwrap_or(u64::MAX)
    }

    /// Extract a Pid from a property URI such as
    /// `http://www.wikidata.org/prop/direct/P31`
    pub fn from_property_uri(uri: &str) -> Option<Self> {
        let tail = uri.rsplit('/').next()?;
        Self::new(tail).ok()
    }
}

impl FromStr for Qid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl FromStr for Pid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Qid {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Pid {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Qid> for String {
    fn from(qid: Qid) -> Self {
        qid.0
    }
}

impl From<Pid> for String {
    fn from(pid: Pid) -> Self {
        pid.0
    }
}

impl fmt::Display for Qid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialOrd for Qid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Qid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.number().cmp(&other.number())
    }
}

impl PartialOrd for Pid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.number().cmp(&other.number())
    }
}
