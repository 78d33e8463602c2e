//! Electronic document records and the submission lifecycle.
//!
//! An [`ElectronicDocument`] is the persistent record of one generated
//! XML file: its content, its state, and the response Hacienda gave.
//! State moves strictly forward within one submission:
//!
//! ```text
//! Draft -> Sent -> Accepted | Rejected | Error
//! ```
//!
//! Re-dispatching a document with the same name replaces the record and
//! starts over from Draft.

mod dispatch;

pub use dispatch::dispatch_invoice;

use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// Lifecycle state of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Generated and signed, not yet submitted.
    Draft,
    /// Submitted; awaiting or holding a non-final acknowledgement.
    Sent,
    /// Hacienda accepted the document.
    Accepted,
    /// Hacienda rejected the document.
    Rejected,
    /// Submission or processing failed.
    Error,
}

impl DocumentState {
    /// Final states admit no further transitions within a submission.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Error)
    }
}

/// Persistent record of one generated document and its Hacienda response.
#[derive(Debug, Clone)]
pub struct ElectronicDocument {
    /// Unique document name, normally the invoice number.
    pub name: String,
    pub xml_filename: String,
    /// The signed XML exactly as submitted.
    pub xml_file: String,
    pub response_filename: Option<String>,
    pub response_file: Option<String>,
    pub state: DocumentState,
    pub send_date: Option<DateTime<FixedOffset>>,
    pub response_date: Option<DateTime<FixedOffset>>,
    /// Last status or error message, for display.
    pub message: Option<String>,
}

impl ElectronicDocument {
    pub fn new(name: impl Into<String>, xml_file: impl Into<String>) -> Self {
        let name = name.into();
        let xml_filename = xml_filename(&name);
        Self {
            name,
            xml_filename,
            xml_file: xml_file.into(),
            response_filename: None,
            response_file: None,
            state: DocumentState::Draft,
            send_date: None,
            response_date: None,
            message: None,
        }
    }

    /// Attach the response Hacienda returned, stamping the filename with
    /// the response time.
    pub fn record_response(&mut self, body: String, at: DateTime<FixedOffset>) {
        let stem = self.xml_filename.trim_end_matches(".xml");
        self.response_filename = Some(format!("{stem}_{}.xml", at.format("%Y%m%d%H%M%S")));
        self.response_file = Some(body);
        self.response_date = Some(at);
    }
}

/// Filesystem-safe XML filename derived from the document name.
pub fn xml_filename(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c == ' ' { '-' } else { c })
        .collect();
    format!("{stem}.xml")
}

/// Storage for document records, keyed by name.
///
/// `upsert` replaces any record with the same name, so re-dispatching a
/// corrected invoice overwrites the failed attempt.
pub trait DocumentStore: Send {
    fn upsert(&mut self, document: ElectronicDocument);
    fn find(&self, name: &str) -> Option<&ElectronicDocument>;
}

/// In-memory store, sufficient for tests and batch runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, ElectronicDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn upsert(&mut self, document: ElectronicDocument) {
        self.documents.insert(document.name.clone(), document);
    }

    fn find(&self, name: &str) -> Option<&ElectronicDocument> {
        self.documents.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_is_sanitized() {
        assert_eq!(xml_filename("FE/2026/42"), "FE-2026-42.xml");
        assert_eq!(xml_filename("FE 42"), "FE-42.xml");
    }

    #[test]
    fn final_states() {
        assert!(!DocumentState::Draft.is_final());
        assert!(!DocumentState::Sent.is_final());
        assert!(DocumentState::Accepted.is_final());
        assert!(DocumentState::Rejected.is_final());
        assert!(DocumentState::Error.is_final());
    }

    #[test]
    fn response_filename_carries_timestamp() {
        let mut doc = ElectronicDocument::new("FE/42", "<A/>");
        let at = chrono::FixedOffset::west_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 10, 14, 30, 5)
            .unwrap();
        doc.record_response("{}".into(), at);
        assert_eq!(doc.response_filename.as_deref(), Some("FE-42_20260310143005.xml"));
        assert_eq!(doc.response_date, Some(at));
    }

    #[test]
    fn upsert_replaces_by_name() {
        let mut store = MemoryStore::new();
        let mut doc = ElectronicDocument::new("FE/42", "<A/>");
        doc.state = DocumentState::Error;
        store.upsert(doc);

        let fresh = ElectronicDocument::new("FE/42", "<B/>");
        store.upsert(fresh);

        assert_eq!(store.len(), 1);
        let stored = store.find("FE/42").unwrap();
        assert_eq!(stored.state, DocumentState::Draft);
        assert_eq!(stored.xml_file, "<B/>");
    }
}
