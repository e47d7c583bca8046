//! Core client types for clientbook.
//!
//! This module defines the customer record kept by the store and the
//! fields a form collects for it.

use serde::{Deserialize, Serialize};

/// A form field of a client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The client's name.
    Name,
    /// The client's email address.
    Email,
    /// The client's phone number.
    Phone,
    /// The six digit code of the client's company.
    CompanyCode,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 4] = [Self::Name, Self::Email, Self::Phone, Self::CompanyCode];

    /// Stable identifier of the field (form input id, JSON key).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CompanyCode => "company_code",
        }
    }

    /// Parse a field from its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CompanyCode => "company code",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A client that has not been stored yet.
///
/// The store assigns the id on insert, so callers never provide one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// The client's name.
    pub name: String,
    /// The client's email address.
    pub email: String,
    /// The client's phone number.
    pub phone: String,
    /// The six digit company code.
    pub company_code: String,
}

impl NewClient {
    /// Create a new unsaved client.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        company_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            company_code: company_code.into(),
        }
    }

    /// Attach a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: i64) -> ClientRecord {
        ClientRecord {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company_code: self.company_code,
        }
    }

    /// Get the value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::CompanyCode => &self.company_code,
        }
    }
}

/// A stored client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Store-assigned identifier, immutable after creation.
    pub id: i64,
    /// The client's name.
    pub name: String,
    /// The client's email address.
    pub email: String,
    /// The client's phone number.
    pub phone: String,
    /// The six digit company code.
    pub company_code: String,
}

impl ClientRecord {
    /// Get the value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::CompanyCode => &self.company_code,
        }
    }

    /// The business fields of this record, without the id.
    #[must_use]
    pub fn to_new_client(&self) -> NewClient {
        NewClient {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company_code: self.company_code.clone(),
        }
    }
}
