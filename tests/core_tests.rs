use chrono::NaiveDate;
use facturacr::core::*;
use rust_decimal_macros::dec;

fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

fn emitter() -> Party {
    PartyBuilder::new("Comercial Tica S.A.")
        .identification(IdentificationType::Juridica, "3101123456")
        .build()
}

fn base() -> InvoiceBuilder {
    InvoiceBuilder::new("FE/42", issue_date())
        .emitter(emitter())
        .sale_condition(SaleCondition::Contado)
        .add_payment(PaymentEntry::new(PaymentMethod::Efectivo))
}

#[test]
fn totals_follow_line_math() {
    let invoice = base()
        .add_line(
            LineItemBuilder::new("Producto", dec!(2), dec!(1000))
                .discount(dec!(0.10), "Cliente frecuente")
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .add_line(LineItemBuilder::new("Libro", dec!(1), dec!(500)).build())
        .build()
        .unwrap();

    let totals = invoice.totals.unwrap();
    // Line 1: 2000 total, 200 discount, 1800 subtotal, 234 tax.
    assert_eq!(totals.sale_total, dec!(2500));
    assert_eq!(totals.discount_total, dec!(200));
    assert_eq!(totals.net_total, dec!(2300));
    assert_eq!(totals.tax_total, dec!(234));
    assert_eq!(totals.grand_total, dec!(2534));
    // Whole-line split: the taxed line is fully taxable, the other exempt.
    assert_eq!(totals.taxable_total, dec!(1800));
    assert_eq!(totals.exempt_total, dec!(500));
}

#[test]
fn tax_breakdown_groups_by_type_and_tariff() {
    let invoice = base()
        .add_line(
            LineItemBuilder::new("A", dec!(1), dec!(100))
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .add_line(
            LineItemBuilder::new("B", dec!(1), dec!(200))
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .add_line(
            LineItemBuilder::new("C", dec!(1), dec!(1000))
                .tax(TaxType::Iva, TaxRateCode::Reducida2, dec!(2))
                .build(),
        )
        .build()
        .unwrap();

    let totals = invoice.totals.unwrap();
    assert_eq!(totals.tax_breakdown.len(), 2);
    let general = totals
        .tax_breakdown
        .iter()
        .find(|b| b.rate_code == TaxRateCode::TarifaGeneral)
        .unwrap();
    assert_eq!(general.base, dec!(300));
    assert_eq!(general.amount, dec!(39));
}

#[test]
fn grand_total_is_net_plus_tax() {
    let invoice = base()
        .add_line(
            LineItemBuilder::new("Servicio", dec!(3), dec!(1234.56))
                .discount(dec!(0.05), "Promoción")
                .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
                .build(),
        )
        .build()
        .unwrap();
    let totals = invoice.totals.unwrap();
    assert_eq!(totals.grand_total, totals.net_total + totals.tax_total);
    assert_eq!(totals.net_total, totals.sale_total - totals.discount_total);
}

#[test]
fn otros_condition_requires_detail() {
    let err = base()
        .sale_condition(SaleCondition::Otros)
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("sale_condition"));

    let ok = base()
        .sale_condition(SaleCondition::Otros)
        .sale_condition_other("Permuta")
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build();
    assert!(ok.is_ok());
}

#[test]
fn credit_conditions_require_a_term() {
    let err = InvoiceBuilder::new("FE/43", issue_date())
        .emitter(emitter())
        .sale_condition(SaleCondition::Credito)
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("credit_term_days"));

    // Credit sales may omit payment entries once the term is set.
    let ok = InvoiceBuilder::new("FE/43", issue_date())
        .emitter(emitter())
        .sale_condition(SaleCondition::Credito)
        .credit_term_days(30)
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build();
    assert!(ok.is_ok());
}

#[test]
fn cash_sales_require_a_payment_entry() {
    let err = InvoiceBuilder::new("FE/44", issue_date())
        .emitter(emitter())
        .sale_condition(SaleCondition::Contado)
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("payments"));
}

#[test]
fn at_most_four_payment_entries() {
    let mut builder = base().add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build());
    for _ in 0..4 {
        builder = builder.add_payment(PaymentEntry::new(PaymentMethod::Tarjeta));
    }
    let err = builder.build().unwrap_err();
    assert!(err.to_string().contains("payments"));
}

#[test]
fn payment_amounts_must_be_positive() {
    let err = base()
        .add_payment(PaymentEntry::with_amount(PaymentMethod::Tarjeta, dec!(0)))
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("amount"));
}

#[test]
fn otros_payment_requires_detail() {
    let err = InvoiceBuilder::new("FE/45", issue_date())
        .emitter(emitter())
        .sale_condition(SaleCondition::Contado)
        .add_payment(PaymentEntry::new(PaymentMethod::Otros))
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("detail"));
}

#[test]
fn structured_consecutive_number() {
    let journal = JournalConfig {
        document_type: Some(DocumentType::FacturaElectronica),
        branch: Some("1".into()),
        terminal: Some("12".into()),
        structured_numbering: true,
    };
    let consecutive = consecutive_number(&journal, "FE/42").unwrap();
    assert_eq!(consecutive, "00100012010000000042");
    assert_eq!(consecutive.len(), 20);
}

#[test]
fn structured_numbering_demands_branch_and_terminal() {
    let journal = JournalConfig {
        document_type: Some(DocumentType::FacturaElectronica),
        branch: None,
        terminal: Some("1".into()),
        structured_numbering: true,
    };
    assert!(matches!(
        consecutive_number(&journal, "FE/42").unwrap_err(),
        FacturaError::Numbering(_)
    ));

    let journal = JournalConfig {
        document_type: Some(DocumentType::FacturaElectronica),
        branch: Some("12AB".into()),
        terminal: Some("1".into()),
        structured_numbering: true,
    };
    assert!(consecutive_number(&journal, "FE/42").is_err());
}

#[test]
fn unstructured_consecutive_pads_number_digits() {
    let journal = JournalConfig::default();
    assert_eq!(
        consecutive_number(&journal, "FE/2026/77").unwrap(),
        "00000000000000202677"
    );
}

#[test]
fn document_key_structure() {
    let journal = JournalConfig {
        document_type: Some(DocumentType::FacturaElectronica),
        branch: Some("1".into()),
        terminal: Some("1".into()),
        structured_numbering: true,
    };
    let consecutive = consecutive_number(&journal, "FE/42").unwrap();
    let key = document_key(issue_date(), "3101123456", &consecutive, "FE/42").unwrap();

    assert_eq!(key.len(), 50);
    assert!(key.chars().all(|c| c.is_ascii_digit()));
    assert!(key.starts_with("506"));
    // ddmmyy
    assert_eq!(&key[3..9], "100326");
    // Emitter identification padded to 12.
    assert_eq!(&key[9..21], "003101123456");
    assert_eq!(&key[21..41], consecutive);
    // Situation digit.
    assert_eq!(&key[41..42], "1");
}

#[test]
fn document_key_is_deterministic() {
    let journal = JournalConfig::default();
    let consecutive = consecutive_number(&journal, "7").unwrap();
    let a = document_key(issue_date(), "101230456", &consecutive, "7").unwrap();
    let b = document_key(issue_date(), "101230456", &consecutive, "7").unwrap();
    assert_eq!(a, b);
}

#[test]
fn effective_number_falls_back_to_reference() {
    let invoice = InvoiceBuilder::new("", issue_date())
        .reference("REF-9")
        .emitter(emitter())
        .sale_condition(SaleCondition::Contado)
        .add_payment(PaymentEntry::new(PaymentMethod::Efectivo))
        .add_line(LineItemBuilder::new("X", dec!(1), dec!(100)).build())
        .build_unchecked()
        .unwrap();
    assert_eq!(invoice.effective_number(), Some("REF-9"));
}
