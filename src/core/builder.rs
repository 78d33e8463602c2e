use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::codes::*;
use super::error::FacturaError;
use super::types::*;
use super::validation;

/// Builder for constructing valid electronic documents.
///
/// ```
/// use facturacr::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("FE-0001", NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
///     .emitter(PartyBuilder::new("Comercial Tica S.A.")
///         .identification(IdentificationType::Juridica, "3101123456")
///         .build())
///     .sale_condition(SaleCondition::Contado)
///     .add_payment(PaymentEntry::new(PaymentMethod::Efectivo))
///     .add_line(LineItemBuilder::new("Servicio", dec!(1), dec!(1000))
///         .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
///         .build())
///     .build();
/// ```
pub struct InvoiceBuilder {
    number: String,
    reference: Option<String>,
    issue_date: NaiveDate,
    currency_code: String,
    exchange_rate: Decimal,
    currency_decimals: u32,
    emitter: Option<Party>,
    receiver: Option<Party>,
    lines: Vec<LineItem>,
    sale_condition: SaleCondition,
    sale_condition_other: Option<String>,
    credit_term_days: u32,
    payments: Vec<PaymentEntry>,
    notes: Vec<String>,
    journal: JournalConfig,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            reference: None,
            issue_date,
            currency_code: "CRC".to_string(),
            exchange_rate: Decimal::ONE,
            currency_decimals: 5,
            emitter: None,
            receiver: None,
            lines: Vec::new(),
            sale_condition: SaleCondition::Contado,
            sale_condition_other: None,
            credit_term_days: 0,
            payments: Vec::new(),
            notes: Vec::new(),
            journal: JournalConfig::default(),
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set currency code and exchange rate against the colón.
    pub fn currency(mut self, code: impl Into<String>, exchange_rate: Decimal) -> Self {
        self.currency_code = code.into();
        self.exchange_rate = exchange_rate;
        self
    }

    /// Decimal precision for monetary fields (Hacienda default: 5).
    pub fn currency_decimals(mut self, decimals: u32) -> Self {
        self.currency_decimals = decimals;
        self
    }

    pub fn emitter(mut self, party: Party) -> Self {
        self.emitter = Some(party);
        self
    }

    pub fn receiver(mut self, party: Party) -> Self {
        self.receiver = Some(party);
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn sale_condition(mut self, condition: SaleCondition) -> Self {
        self.sale_condition = condition;
        self
    }

    pub fn sale_condition_other(mut self, detail: impl Into<String>) -> Self {
        self.sale_condition_other = Some(detail.into());
        self
    }

    pub fn credit_term_days(mut self, days: u32) -> Self {
        self.credit_term_days = days;
        self
    }

    pub fn add_payment(mut self, payment: PaymentEntry) -> Self {
        self.payments.push(payment);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn journal(mut self, journal: JournalConfig) -> Self {
        self.journal = journal;
        self
    }

    /// Build the invoice, calculating totals and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, FacturaError> {
        let mut invoice = self.assemble()?;
        validation::calculate_totals(&mut invoice);

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FacturaError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without validation — useful for testing or importing external data.
    pub fn build_unchecked(self) -> Result<Invoice, FacturaError> {
        let mut invoice = self.assemble()?;
        validation::calculate_totals(&mut invoice);
        Ok(invoice)
    }

    fn assemble(self) -> Result<Invoice, FacturaError> {
        let emitter = self
            .emitter
            .ok_or_else(|| FacturaError::Builder("emitter is required".into()))?;

        if self.lines.is_empty() {
            return Err(FacturaError::Builder(
                "at least one line item is required".into(),
            ));
        }

        // Input limits to prevent abuse
        if self.lines.len() > 1000 {
            return Err(FacturaError::Builder(
                "document cannot have more than 1,000 line items".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(FacturaError::Builder(
                "document number cannot exceed 200 characters".into(),
            ));
        }

        Ok(Invoice {
            number: self.number,
            reference: self.reference,
            issue_date: self.issue_date,
            currency_code: self.currency_code,
            exchange_rate: self.exchange_rate,
            currency_decimals: self.currency_decimals,
            emitter,
            receiver: self.receiver,
            lines: self.lines,
            sale_condition: self.sale_condition,
            sale_condition_other: self.sale_condition_other,
            credit_term_days: self.credit_term_days,
            payments: self.payments,
            notes: self.notes,
            journal: self.journal,
            totals: None,
        })
    }
}

/// Builder for Party (emitter/receiver).
pub struct PartyBuilder {
    name: String,
    trade_name: Option<String>,
    identification: Option<Identification>,
    location: Option<Location>,
    phone: Option<Phone>,
    email: Option<String>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trade_name: None,
            identification: None,
            location: None,
            phone: None,
            email: None,
        }
    }

    pub fn trade_name(mut self, name: impl Into<String>) -> Self {
        self.trade_name = Some(name.into());
        self
    }

    pub fn identification(mut self, kind: IdentificationType, number: impl Into<String>) -> Self {
        self.identification = Some(Identification {
            kind,
            number: number.into(),
        });
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn phone(mut self, country_code: impl Into<String>, number: impl Into<String>) -> Self {
        self.phone = Some(Phone {
            country_code: country_code.into(),
            number: number.into(),
        });
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            trade_name: self.trade_name,
            identification: self.identification,
            location: self.location,
            phone: self.phone,
            email: self.email,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    unit_code: Option<String>,
    cabys_code: Option<String>,
    commercial_code: Option<String>,
    discount_rate: Decimal,
    discount_reason: Option<String>,
    taxes: Vec<LineTax>,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            unit_code: None,
            cabys_code: None,
            commercial_code: None,
            discount_rate: Decimal::ZERO,
            discount_reason: None,
            taxes: Vec::new(),
        }
    }

    pub fn unit_code(mut self, code: impl Into<String>) -> Self {
        self.unit_code = Some(code.into());
        self
    }

    pub fn cabys(mut self, code: impl Into<String>) -> Self {
        self.cabys_code = Some(code.into());
        self
    }

    pub fn commercial_code(mut self, code: impl Into<String>) -> Self {
        self.commercial_code = Some(code.into());
        self
    }

    /// Discount as a fraction of the line total (0.10 = 10%).
    pub fn discount(mut self, rate: Decimal, reason: impl Into<String>) -> Self {
        self.discount_rate = rate;
        self.discount_reason = Some(reason.into());
        self
    }

    pub fn tax(mut self, tax_type: TaxType, rate_code: TaxRateCode, rate: Decimal) -> Self {
        self.taxes.push(LineTax {
            tax_type,
            rate_code,
            rate,
        });
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            unit_code: self.unit_code,
            cabys_code: self.cabys_code,
            commercial_code: self.commercial_code,
            discount_rate: self.discount_rate,
            discount_reason: self.discount_reason,
            taxes: self.taxes,
            amounts: None,
        }
    }
}
