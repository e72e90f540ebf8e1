use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five user-entered resume fields.
///
/// Every field is plain text; an empty string means "not filled in yet".
/// Format rules live in `form::validation`, never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub description: String,
}

impl Record {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Position => &self.position,
            Field::Description => &self.description,
        }
    }

    /// Returns a copy of this record with one field replaced.
    pub fn with_field(&self, field: Field, value: impl Into<String>) -> Record {
        let mut next = self.clone();
        let value = value.into();
        match field {
            Field::Name => next.name = value,
            Field::Email => next.email = value,
            Field::Phone => next.phone = value,
            Field::Position => next.position = value,
            Field::Description => next.description = value,
        }
        next
    }
}

/// Names a single field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Position,
    Description,
}

impl Field {
    /// Display and export order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Position,
        Field::Description,
    ];

    /// Stable key used in form posts, JSON bodies and URL paths.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Position => "position",
            Field::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone Number",
            Field::Position => "Position",
            Field::Description => "Description",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::Email | Field::Phone)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
