/// Validation rules for lookup form submissions
///
/// Turns a raw [`LookupForm`] into a [`LookupPayload`] or a map of
/// field-level messages keyed by the wire field name.
use crate::models::{DocumentType, LookupForm, LookupPayload};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

pub const DOCUMENT_TYPE_FIELD: &str = "documentType";
pub const DOCUMENT_NUMBER_FIELD: &str = "documentNumber";

pub const MIN_DOCUMENT_NUMBER_LEN: usize = 5;

pub const DOCUMENT_TYPE_MESSAGE: &str = "Document type must be one of CC, CE, NIT, PASSPORT";
pub const DOCUMENT_NUMBER_LENGTH_MESSAGE: &str = "Document number must be at least 5 characters";
pub const DOCUMENT_NUMBER_CHARSET_MESSAGE: &str =
    "Document number can only contain letters and numbers";

/// Field-level validation failures, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn document_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("static regex is valid"))
}

/// Validate the document type tag (exact, case-sensitive match).
pub fn validate_document_type(raw: &str) -> Result<DocumentType, &'static str> {
    raw.parse::<DocumentType>().map_err(|_| DOCUMENT_TYPE_MESSAGE)
}

/// Validate a document number.
///
/// Checks, in order:
/// - at least [`MIN_DOCUMENT_NUMBER_LEN`] characters
/// - ASCII letters and digits only
///
/// When both fail the character-class message is returned.
pub fn validate_document_number(raw: &str) -> Result<(), &'static str> {
    let mut failure = None;

    if raw.chars().count() < MIN_DOCUMENT_NUMBER_LEN {
        failure = Some(DOCUMENT_NUMBER_LENGTH_MESSAGE);
    }
    if !document_number_regex().is_match(raw) {
        failure = Some(DOCUMENT_NUMBER_CHARSET_MESSAGE);
    }

    match failure {
        Some(msg) => Err(msg),
        None => Ok(()),
    }
}

/// Validate a raw form submission.
///
/// Missing fields are validated as empty strings. Every failing field is
/// reported; the document number is passed through unchanged on success.
pub fn validate_lookup_form(form: &LookupForm) -> Result<LookupPayload, ValidationErrors> {
    let raw_type = form.document_type.as_deref().unwrap_or("");
    let raw_number = form.document_number.as_deref().unwrap_or("");

    let mut errors = ValidationErrors::new();

    let document_type = match validate_document_type(raw_type) {
        Ok(t) => Some(t),
        Err(msg) => {
            errors.insert(DOCUMENT_TYPE_FIELD, msg);
            None
        }
    };

    if let Err(msg) = validate_document_number(raw_number) {
        errors.insert(DOCUMENT_NUMBER_FIELD, msg);
    }

    match document_type {
        Some(document_type) if errors.is_empty() => Ok(LookupPayload {
            document_type,
            document_number: raw_number.to_string(),
        }),
        _ => {
            tracing::warn!("❌ Lookup form rejected: {}", errors);
            Err(errors)
        }
    }
}
