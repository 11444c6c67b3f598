//! Composite resource identifiers
//!
//! Attachment-style resources have no identifier of their own in Lightsail,
//! so their Terraform ID is built by joining the names involved with `_`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SEPARATOR: char = '_';

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} ID '{id}': expected {expected} parts separated by '_', found {found}")]
pub struct IdError {
    kind: &'static str,
    id: String,
    expected: usize,
    found: usize,
}

fn split_parts<const N: usize>(kind: &'static str, id: &str) -> Result<[String; N], IdError> {
    let parts: Vec<String> = id.split(SEPARATOR).map(str::to_string).collect();
    let found = parts.len();

    if parts.iter().any(String::is_empty) {
        return Err(IdError {
            kind,
            id: id.to_string(),
            expected: N,
            found,
        });
    }

    parts.try_into().map_err(|_| IdError {
        kind,
        id: id.to_string(),
        expected: N,
        found,
    })
}

/// `<left>_<right>`, e.g. `data-disk_web-1` for a disk attached to an
/// instance or `lb-1_web-1` for a load balancer attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentId {
    pub left: String,
    pub right: String,
}

impl AttachmentId {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.left, self.right)
    }
}

impl FromStr for AttachmentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [left, right] = split_parts::<2>("attachment", s)?;
        Ok(Self { left, right })
    }
}

/// `<name>_<domain>_<type>_<target>` for a DNS record in a Lightsail domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntryId {
    pub name: String,
    pub domain_name: String,
    pub record_type: String,
    pub target: String,
}

impl fmt::Display for DomainEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.name, self.domain_name, self.record_type, self.target
        )
    }
}

impl FromStr for DomainEntryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [name, domain_name, record_type, target] = split_parts::<4>("domain entry", s)?;
        Ok(Self {
            name,
            domain_name,
            record_type,
            target,
        })
    }
}
