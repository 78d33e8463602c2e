//! Build a validated invoice and print its totals.
//!
//! Run with: `cargo run --example basic_invoice`

use chrono::NaiveDate;
use facturacr::core::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), FacturaError> {
    let invoice = InvoiceBuilder::new("FE/2026/0042", NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        .emitter(
            PartyBuilder::new("Comercial Tica S.A.")
                .identification(IdentificationType::Juridica, "3101123456")
                .phone("506", "22223333")
                .email("factura@tica.cr")
                .build(),
        )
        .receiver(
            PartyBuilder::new("Cliente Ejemplo")
                .identification(IdentificationType::Fisica, "109870654")
                .build(),
        )
        .sale_condition(SaleCondition::Contado)
        .add_payment(PaymentEntry::new(PaymentMethod::Transferencia))
        .add_line(
            LineItemBuilder::new("Servicio profesional", dec!(10), dec!(25000))
                .unit_code("Sp")
                .cabys("8314100000100")
                .discount(dec!(0.05), "Cliente frecuente")
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .add_line(LineItemBuilder::new("Libro técnico", dec!(2), dec!(18000)).build())
        .build()?;

    let totals = invoice.totals.as_ref().expect("totals are calculated");
    println!("Documento:       {}", invoice.number);
    println!("Venta total:     {}", totals.sale_total);
    println!("Descuentos:      {}", totals.discount_total);
    println!("Venta neta:      {}", totals.net_total);
    println!("Gravado/exento:  {} / {}", totals.taxable_total, totals.exempt_total);
    println!("Impuesto:        {}", totals.tax_total);
    println!("Comprobante:     {}", totals.grand_total);
    for bucket in &totals.tax_breakdown {
        println!(
            "  IVA tarifa {} ({}%): base {} impuesto {}",
            bucket.rate_code.code(),
            bucket.rate,
            bucket.base,
            bucket.amount
        );
    }
    Ok(())
}
