#![cfg(feature = "lifecycle")]

use chrono::{NaiveDate, TimeZone};
use facturacr::api::{ApiConfig, MockApi, ReceptionOutcome};
use facturacr::core::*;
use facturacr::document::{DocumentState, DocumentStore, MemoryStore, dispatch_invoice};
use facturacr::firma::CertificateBundle;
use facturacr::xml::{EmissionContext, costa_rica_offset};
use rsa::RsaPrivateKey;
use rsa::pkcs8::EncodePrivateKey;
use rust_decimal_macros::dec;

const PIN: &str = "1234";

fn test_bundle() -> CertificateBundle {
    let mut rng = rand::thread_rng();
    let key = RsaPrivateKey::new(&mut rng, 2048).expect("keygen");
    let key_der = key.to_pkcs8_der().expect("pkcs8");
    let pfx = p12::PFX::new(
        b"test-certificate-der",
        key_der.as_bytes(),
        None,
        PIN,
        "hacienda",
    )
    .expect("pfx");
    CertificateBundle::from_der(pfx.to_der())
}

fn ctx() -> EmissionContext {
    EmissionContext::new(
        costa_rica_offset()
            .with_ymd_and_hms(2026, 3, 10, 14, 30, 0)
            .unwrap(),
    )
}

fn invoice() -> Invoice {
    InvoiceBuilder::new("FE/42", NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        .emitter(
            PartyBuilder::new("Comercial Tica S.A.")
                .identification(IdentificationType::Juridica, "3101123456")
                .build(),
        )
        .sale_condition(SaleCondition::Contado)
        .add_payment(PaymentEntry::new(PaymentMethod::Efectivo))
        .add_line(
            LineItemBuilder::new("Servicio", dec!(1), dec!(50000))
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .journal(JournalConfig {
            document_type: Some(DocumentType::FacturaElectronica),
            branch: Some("1".into()),
            terminal: Some("1".into()),
            structured_numbering: true,
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn accepted_submission_reaches_final_state() {
    let mock = MockApi::new();
    let config = ApiConfig::sandbox("cpj-3-101-123456@stag", "secret");
    let mut store = MemoryStore::new();

    let doc = dispatch_invoice(
        &invoice(),
        &ctx(),
        &test_bundle(),
        PIN,
        &config,
        &mock,
        &mut store,
    )
    .await
    .unwrap();

    assert_eq!(doc.state, DocumentState::Accepted);
    assert_eq!(doc.message.as_deref(), Some("aceptado"));
    assert!(doc.send_date.is_some());
    assert!(doc.response_date.is_some());
    assert!(doc.response_filename.as_deref().unwrap().starts_with("FE-42_"));
    assert!(doc.response_file.as_deref().unwrap().contains("aceptado"));

    // The submitted payload is the signed document.
    let submitted = mock.submitted();
    assert_eq!(submitted.len(), 1);
    assert!(submitted[0].contains("<ds:Signature"));
    assert!(submitted[0].contains("<Clave>"));

    assert_eq!(store.find("FE/42").unwrap().state, DocumentState::Accepted);
}

#[tokio::test]
async fn rejection_is_recorded() {
    let mock = MockApi::new();
    mock.push_outcome(ReceptionOutcome::Rejected, "rechazado");
    let config = ApiConfig::sandbox("u", "p");
    let mut store = MemoryStore::new();

    let doc = dispatch_invoice(
        &invoice(),
        &ctx(),
        &test_bundle(),
        PIN,
        &config,
        &mock,
        &mut store,
    )
    .await
    .unwrap();

    assert_eq!(doc.state, DocumentState::Rejected);
    assert_eq!(doc.message.as_deref(), Some("rechazado"));
}

#[tokio::test]
async fn acknowledgement_keeps_document_sent() {
    let mock = MockApi::new();
    mock.push_outcome(ReceptionOutcome::Acknowledged, "recibido");
    let config = ApiConfig::sandbox("u", "p");
    let mut store = MemoryStore::new();

    let doc = dispatch_invoice(
        &invoice(),
        &ctx(),
        &test_bundle(),
        PIN,
        &config,
        &mock,
        &mut store,
    )
    .await
    .unwrap();

    assert_eq!(doc.state, DocumentState::Sent);
    assert!(doc.response_file.is_some());
}

#[tokio::test]
async fn authentication_failure_lands_in_error() {
    let mock = MockApi::failing_auth();
    let config = ApiConfig::sandbox("u", "wrong");
    let mut store = MemoryStore::new();

    let doc = dispatch_invoice(
        &invoice(),
        &ctx(),
        &test_bundle(),
        PIN,
        &config,
        &mock,
        &mut store,
    )
    .await
    .unwrap();

    assert_eq!(doc.state, DocumentState::Error);
    assert!(doc.message.as_deref().unwrap().contains("401"));
    // Nothing was submitted and the generated XML is kept for retry.
    assert!(mock.submitted().is_empty());
    assert!(doc.xml_file.contains("<ds:Signature"));
    assert!(doc.response_file.is_none());
}

#[tokio::test]
async fn reception_error_lands_in_error() {
    let mock = MockApi::new();
    mock.push_error(FacturaError::Api("reception endpoint returned 500".into()));
    let config = ApiConfig::sandbox("u", "p");
    let mut store = MemoryStore::new();

    let doc = dispatch_invoice(
        &invoice(),
        &ctx(),
        &test_bundle(),
        PIN,
        &config,
        &mock,
        &mut store,
    )
    .await
    .unwrap();

    assert_eq!(doc.state, DocumentState::Error);
    assert!(doc.message.as_deref().unwrap().contains("500"));
    assert_eq!(store.find("FE/42").unwrap().state, DocumentState::Error);
}

#[tokio::test]
async fn redispatch_overwrites_the_failed_record() {
    let mock = MockApi::new();
    mock.push_error(FacturaError::Api("reception endpoint returned 500".into()));
    let config = ApiConfig::sandbox("u", "p");
    let mut store = MemoryStore::new();
    let bundle = test_bundle();

    let first = dispatch_invoice(&invoice(), &ctx(), &bundle, PIN, &config, &mock, &mut store)
        .await
        .unwrap();
    assert_eq!(first.state, DocumentState::Error);

    let second = dispatch_invoice(&invoice(), &ctx(), &bundle, PIN, &config, &mock, &mut store)
        .await
        .unwrap();
    assert_eq!(second.state, DocumentState::Accepted);

    assert_eq!(store.len(), 1);
    assert_eq!(store.find("FE/42").unwrap().state, DocumentState::Accepted);
}

#[tokio::test]
async fn missing_credentials_fail_before_any_record() {
    let mock = MockApi::new();
    let config = ApiConfig::sandbox("user", "");
    let mut store = MemoryStore::new();

    let err = dispatch_invoice(
        &invoice(),
        &ctx(),
        &test_bundle(),
        PIN,
        &config,
        &mock,
        &mut store,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, FacturaError::Config(_)));
    assert!(store.is_empty());
    assert!(mock.submitted().is_empty());
}

#[tokio::test]
async fn bad_signing_bundle_records_error_with_unsigned_xml() {
    let mock = MockApi::new();
    let config = ApiConfig::sandbox("u", "p");
    let mut store = MemoryStore::new();
    let bundle = CertificateBundle::from_der(vec![0u8; 8]);

    let doc = dispatch_invoice(&invoice(), &ctx(), &bundle, PIN, &config, &mock, &mut store)
        .await
        .unwrap();

    assert_eq!(doc.state, DocumentState::Error);
    assert!(doc.message.as_deref().unwrap().contains("signing"));
    assert!(!doc.xml_file.contains("<ds:Signature"));
    assert!(mock.submitted().is_empty());
}
