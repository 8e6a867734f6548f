//! Domain DTOs for the student API.
//!
//! # Design
//! `Student` mirrors the server's JSON schema but is defined independently
//! from the mock-server crate. Integration tests catch any schema drift
//! between the two.
//!
//! Text fields tolerate `null` and absence so that records with unset
//! optional columns (typically `address2`) still parse.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier value reserved for a record the server has not assigned yet.
pub const NEW_STUDENT_ID: i64 = 0;

/// A single student record as exchanged with the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub mobile: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address1: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address2: String,
}

impl Student {
    /// The blank record bound to the form when nothing is being edited.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the record has not been persisted yet.
    pub fn is_new(&self) -> bool {
        self.id == NEW_STUDENT_ID
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
