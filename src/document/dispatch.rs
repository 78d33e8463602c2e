use chrono::{DateTime, FixedOffset, Utc};
use tracing::{info, warn};

use super::{DocumentState, DocumentStore, ElectronicDocument};
use crate::api::{ApiConfig, ReceptionApi, ReceptionOutcome};
use crate::core::{FacturaError, Invoice};
use crate::firma::{CertificateBundle, sign_xml};
use crate::xml::{EmissionContext, costa_rica_offset, to_xml};

/// Generate, sign, persist, and submit an invoice in one pass.
///
/// The record is upserted as `Sent` before the network call, so a crash
/// mid-submission leaves an auditable trail. No retries: any transport,
/// authentication, or signing failure lands the document in `Error` with
/// the cause in `message`, and the caller re-dispatches after fixing the
/// problem. Configuration and generation errors are returned instead,
/// since no document record exists to blame yet.
pub async fn dispatch_invoice(
    invoice: &Invoice,
    ctx: &EmissionContext,
    bundle: &CertificateBundle,
    pin: &str,
    config: &ApiConfig,
    api: &dyn ReceptionApi,
    store: &mut dyn DocumentStore,
) -> Result<ElectronicDocument, FacturaError> {
    config.validate()?;
    let name = invoice
        .effective_number()
        .ok_or_else(|| FacturaError::Validation("document must have a number".into()))?
        .to_string();

    let xml = to_xml(invoice, ctx)?;
    let signed = match sign_xml(&xml, bundle, pin, ctx.emitted_at) {
        Ok(signed) => signed,
        Err(e) => {
            warn!(document = %name, error = %e, "signing failed");
            let mut doc = ElectronicDocument::new(name.clone(), xml);
            fail(&mut doc, &e, store);
            return Ok(doc);
        }
    };

    let mut doc = ElectronicDocument::new(name.clone(), signed);
    store.upsert(doc.clone());

    doc.state = DocumentState::Sent;
    doc.send_date = Some(local_now());
    store.upsert(doc.clone());

    let token = match api.authenticate(config).await {
        Ok(token) => token,
        Err(e) => {
            warn!(document = %name, error = %e, "authentication failed");
            fail(&mut doc, &e, store);
            return Ok(doc);
        }
    };

    let response = match api.submit(config, &token, &doc.xml_file).await {
        Ok(response) => response,
        Err(e) => {
            warn!(document = %name, error = %e, "submission failed");
            fail(&mut doc, &e, store);
            return Ok(doc);
        }
    };

    doc.record_response(response.body.clone(), local_now());
    doc.message = response.message.clone().or_else(|| response.status.clone());
    doc.state = match response.outcome {
        ReceptionOutcome::Accepted => DocumentState::Accepted,
        ReceptionOutcome::Rejected => DocumentState::Rejected,
        ReceptionOutcome::Error => DocumentState::Error,
        // Not yet resolved; the record stays Sent until a later check.
        ReceptionOutcome::Acknowledged => DocumentState::Sent,
    };
    info!(document = %name, state = ?doc.state, "submission completed");
    store.upsert(doc.clone());
    Ok(doc)
}

fn fail(doc: &mut ElectronicDocument, error: &FacturaError, store: &mut dyn DocumentStore) {
    doc.state = DocumentState::Error;
    doc.message = Some(error.to_string());
    store.upsert(doc.clone());
}

fn local_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&costa_rica_offset())
}
