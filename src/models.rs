use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported identity document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cédula de ciudadanía.
    #[serde(rename = "CC")]
    Cc,
    /// Cédula de extranjería.
    #[serde(rename = "CE")]
    Ce,
    /// Tax identification number.
    #[serde(rename = "NIT")]
    Nit,
    #[serde(rename = "PASSPORT")]
    Passport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Cc,
        DocumentType::Ce,
        DocumentType::Nit,
        DocumentType::Passport,
    ];

    /// Wire tag for this document type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Cc => "CC",
            DocumentType::Ce => "CE",
            DocumentType::Nit => "NIT",
            DocumentType::Passport => "PASSPORT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    /// Parses the exact (case-sensitive) wire tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type '{}'", s))
    }
}

/// Raw form submission as received from a caller, before validation.
///
/// Both fields are optional so that a missing field surfaces as a
/// field-level validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupForm {
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
}

impl LookupForm {
    pub fn new(document_type: impl Into<String>, document_number: impl Into<String>) -> Self {
        Self {
            document_type: Some(document_type.into()),
            document_number: Some(document_number.into()),
        }
    }
}

/// Validated lookup input.
///
/// Only constructed by the validator, so `document_number` is always at least
/// five ASCII letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupPayload {
    pub document_type: DocumentType,
    pub document_number: String,
}

/// Outcome of a single lookup attempt.
///
/// Exactly one of `data` and `error` is set, matching `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub success: bool,
    pub reference: String,
    /// ISO-8601 UTC completion time.
    pub timestamp: String,
    pub query: LookupPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LookupData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<LookupErrorInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupData {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<LookupDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupDetails {
    pub document_type: DocumentType,
    pub document_number: String,
    pub verified: bool,
    pub last_updated: String,
    pub additional_info: AdditionalInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    pub region: String,
    pub status: String,
    pub verification_level: String,
}

/// Error block carried inside a failed [`LookupResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupErrorInfo {
    pub code: String,
    pub message: String,
}

pub const SIMULATION_ERROR_CODE: &str = "SIMULATION_ERROR";
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

impl LookupResult {
    /// Builds a successful result with the synthetic record for `query`.
    pub fn found(
        reference: String,
        timestamp: String,
        query: LookupPayload,
        last_updated: String,
    ) -> Self {
        let details = LookupDetails {
            document_type: query.document_type,
            document_number: query.document_number.clone(),
            verified: true,
            last_updated,
            additional_info: AdditionalInfo {
                region: "Colombia".to_string(),
                status: "Active".to_string(),
                verification_level: "High".to_string(),
            },
        };

        Self {
            success: true,
            reference,
            timestamp,
            query,
            data: Some(LookupData {
                status: "FOUND".to_string(),
                message: "Document found in system".to_string(),
                details: Some(details),
            }),
            error: None,
        }
    }

    /// Builds a failed result carrying `code` and `message`.
    pub fn failed(
        reference: String,
        timestamp: String,
        query: LookupPayload,
        code: &str,
        message: &str,
    ) -> Self {
        Self {
            success: false,
            reference,
            timestamp,
            query,
            data: None,
            error: Some(LookupErrorInfo {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }

    /// Fallback result when the lookup task itself could not complete.
    ///
    /// The reference carries only the epoch millis, with no random suffix.
    pub fn unknown_failure(query: LookupPayload, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self::failed(
            format!("REF-{}", now.timestamp_millis()),
            crate::simulator::iso_timestamp(now),
            query,
            UNKNOWN_ERROR_CODE,
            "An unexpected error occurred",
        )
    }

    /// Two-space indented JSON, the format used when exporting a result.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
