//! Entity type enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of sensitive value a span covers
///
/// Serializes as its upper-case label (`"PERSON"`, `"PHONE_NUMBER"`, ...).
/// Labels the detector does not know are carried through as [`EntityType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Person names
    Person,
    /// Email addresses
    EmailAddress,
    /// Telephone numbers
    PhoneNumber,
    /// Payment card numbers
    CreditCard,
    /// US Social Security Numbers
    UsSsn,
    /// US bank account numbers
    UsBankNumber,
    /// Cities, addresses and other places
    Location,
    /// Nationality, religious or political group
    Nrp,
    /// Dates and times
    DateTime,
    /// IPv4/IPv6 addresses
    IpAddress,
    /// Any other detector label
    Other(String),
}

impl EntityType {
    /// Every type known to the built-in detector, in default selection order
    pub const KNOWN: [EntityType; 10] = [
        EntityType::Person,
        EntityType::EmailAddress,
        EntityType::PhoneNumber,
        EntityType::CreditCard,
        EntityType::UsSsn,
        EntityType::UsBankNumber,
        EntityType::Location,
        EntityType::Nrp,
        EntityType::DateTime,
        EntityType::IpAddress,
    ];

    /// Upper-case label used in redaction tokens and on the wire
    pub fn label(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::CreditCard => "CREDIT_CARD",
            Self::UsSsn => "US_SSN",
            Self::UsBankNumber => "US_BANK_NUMBER",
            Self::Location => "LOCATION",
            Self::Nrp => "NRP",
            Self::DateTime => "DATE_TIME",
            Self::IpAddress => "IP_ADDRESS",
            Self::Other(label) => label,
        }
    }

    /// All known types as an owned list
    pub fn all_known() -> Vec<EntityType> {
        Self::KNOWN.to_vec()
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PERSON" | "NAME" => Self::Person,
            "EMAIL_ADDRESS" | "EMAIL" => Self::EmailAddress,
            "PHONE_NUMBER" | "PHONE" => Self::PhoneNumber,
            "CREDIT_CARD" => Self::CreditCard,
            "US_SSN" | "SSN" => Self::UsSsn,
            "US_BANK_NUMBER" => Self::UsBankNumber,
            "LOCATION" => Self::Location,
            "NRP" => Self::Nrp,
            "DATE_TIME" | "DATE" => Self::DateTime,
            "IP_ADDRESS" => Self::IpAddress,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.label().to_string()
    }
}

impl FromStr for EntityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
