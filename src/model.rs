//! Wire types shared by the store, the HTTP surface, and the summarizer.

use serde::{Deserialize, Serialize};

/// Identifier used as the store key; supplied by the caller, never generated.
pub type StudentId = i64;

/// A student record as stored and exchanged over HTTP.
///
/// Missing fields decode to their zero value so that validation, not deserialization, reports
/// them with a rule-specific message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    /// Caller-supplied identifier; zero is treated as absent.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Age in years; zero is treated as absent.
    pub age: u32,
    /// Contact address, stored exactly as submitted.
    pub email: String,
}

/// Response body for `GET /students/{id}/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    /// Identifier of the summarized record.
    pub student_id: StudentId,
    /// Name of the summarized record at the time it was read.
    pub name: String,
    /// Generated profile text, trimmed.
    pub summary: String,
}
