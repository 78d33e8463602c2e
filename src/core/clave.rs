//! Clave and consecutive-number synthesis.
//!
//! Hacienda identifies every fiscal document by a 50-digit clave and a
//! 20-digit consecutive number. Journals that opt into structured numbering
//! compose the consecutive from branch, terminal, document-type code, and a
//! zero-padded sequence; other journals reuse the digits of the accounting
//! document number.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use super::codes::DocumentType;
use super::error::FacturaError;
use super::types::JournalConfig;

/// Costa Rica country code, first segment of every clave.
const COUNTRY_CODE: &str = "506";

/// Situation code for a normally emitted document.
const SITUATION_NORMAL: &str = "1";

/// Digits of a document number, slashes and all other separators stripped.
pub fn number_digits(number: &str) -> String {
    number.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Resolve the 2-digit document-type code for a journal.
///
/// A journal without a configured type falls back to Factura Electrónica
/// and logs a warning instead of failing.
pub fn resolve_type_code(journal: &JournalConfig) -> &'static str {
    match journal.document_type {
        Some(dt) => dt.code(),
        None => {
            warn!("journal has no electronic document type, defaulting to Factura Electrónica");
            DocumentType::FacturaElectronica.code()
        }
    }
}

/// Synthesize the 20-digit consecutive number for a document.
///
/// Structured journals produce `branch(3) + terminal(5) + type(2) +
/// sequence(10)`; unstructured journals zero-pad the digits of the document
/// number to 20. The synthesis is idempotent: the same inputs always
/// produce the same fixed-width output.
pub fn consecutive_number(journal: &JournalConfig, number: &str) -> Result<String, FacturaError> {
    let digits = number_digits(number);
    if digits.is_empty() {
        return Err(FacturaError::Numbering(format!(
            "document number '{number}' contains no digits"
        )));
    }

    if !journal.structured_numbering {
        return Ok(pad_left(&digits, 20));
    }

    let branch = journal.branch.as_deref().ok_or_else(|| {
        FacturaError::Numbering("structured numbering requires a branch code".into())
    })?;
    let terminal = journal.terminal.as_deref().ok_or_else(|| {
        FacturaError::Numbering("structured numbering requires a terminal code".into())
    })?;

    if branch.is_empty() || branch.len() > 3 || !branch.chars().all(|c| c.is_ascii_digit()) {
        return Err(FacturaError::Numbering(format!(
            "branch code '{branch}' must be numeric with at most 3 digits"
        )));
    }
    if terminal.is_empty() || terminal.len() > 5 || !terminal.chars().all(|c| c.is_ascii_digit()) {
        return Err(FacturaError::Numbering(format!(
            "terminal code '{terminal}' must be numeric with at most 5 digits"
        )));
    }

    Ok(format!(
        "{}{}{}{}",
        pad_left(branch, 3),
        pad_left(terminal, 5),
        resolve_type_code(journal),
        pad_left(&digits, 10),
    ))
}

/// Compose the 50-digit clave for a document.
///
/// `506` + day/month/year (2 digits each) + emitter identification padded
/// to 12 + 20-digit consecutive + situation digit + 8-digit security code
/// derived from the document number.
pub fn document_key(
    issue_date: NaiveDate,
    emitter_identification: &str,
    consecutive: &str,
    number: &str,
) -> Result<String, FacturaError> {
    if consecutive.len() != 20 {
        return Err(FacturaError::Numbering(format!(
            "consecutive number must be 20 digits, got {}",
            consecutive.len()
        )));
    }
    let id_digits = number_digits(emitter_identification);
    if id_digits.is_empty() {
        return Err(FacturaError::Numbering(
            "emitter identification contains no digits".into(),
        ));
    }
    if id_digits.len() > 12 {
        return Err(FacturaError::Numbering(format!(
            "emitter identification '{emitter_identification}' exceeds 12 digits"
        )));
    }

    let key = format!(
        "{}{:02}{:02}{:02}{}{}{}{}",
        COUNTRY_CODE,
        issue_date.day(),
        issue_date.month(),
        issue_date.year() % 100,
        pad_left(&id_digits, 12),
        consecutive,
        SITUATION_NORMAL,
        pad_left(&number_digits(number), 8),
    );
    debug_assert_eq!(key.len(), 50);
    Ok(key)
}

/// Zero-pad on the left to `width`, keeping the trailing digits on overflow.
fn pad_left(digits: &str, width: usize) -> String {
    if digits.len() >= width {
        digits[digits.len() - width..].to_string()
    } else {
        format!("{digits:0>width$}")
    }
}
