//! Generate the Hacienda 4.4 XML for an invoice and print it.
//!
//! Run with: `cargo run --example xml_generation --features xml`

use chrono::NaiveDate;
use facturacr::core::*;
use facturacr::xml::{EmissionContext, to_xml};
use rust_decimal_macros::dec;

fn main() -> Result<(), FacturaError> {
    let invoice = InvoiceBuilder::new("FE/42", NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        .emitter(
            PartyBuilder::new("Comercial Tica S.A.")
                .identification(IdentificationType::Juridica, "3101123456")
                .build(),
        )
        .sale_condition(SaleCondition::Contado)
        .add_payment(PaymentEntry::new(PaymentMethod::Efectivo))
        .add_line(
            LineItemBuilder::new("Servicio profesional", dec!(1), dec!(50000))
                .unit_code("Sp")
                .cabys("8314100000100")
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .journal(JournalConfig {
            document_type: Some(DocumentType::FacturaElectronica),
            branch: Some("1".into()),
            terminal: Some("1".into()),
            structured_numbering: true,
        })
        .note("Factura de ejemplo")
        .build()?;

    let ctx = EmissionContext::now().activity_code("620100");
    let xml = to_xml(&invoice, &ctx)?;
    println!("{xml}");
    Ok(())
}
