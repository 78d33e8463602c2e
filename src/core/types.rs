use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::*;

/// An invoice-like accounting document ready for electronic filing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Human-readable document number (e.g. "FE/2026/0042").
    pub number: String,
    /// Fallback reference used when the number is absent.
    pub reference: Option<String>,
    /// Issue date of the underlying accounting document.
    pub issue_date: NaiveDate,
    /// ISO 4217 currency code (e.g. "CRC", "USD").
    pub currency_code: String,
    /// Exchange rate against the colón; 1 for CRC documents.
    pub exchange_rate: Decimal,
    /// Decimal precision for monetary fields; Hacienda default is 5.
    pub currency_decimals: u32,
    /// Issuing party (the company).
    pub emitter: Party,
    /// Receiving party; tickets may legally omit it.
    pub receiver: Option<Party>,
    /// Invoice lines.
    pub lines: Vec<LineItem>,
    /// Condición de venta.
    pub sale_condition: SaleCondition,
    /// Free-text detail, required when the condition is `Otros`.
    pub sale_condition_other: Option<String>,
    /// Credit term in days; required for credit conditions.
    pub credit_term_days: u32,
    /// Up to four payment method entries.
    pub payments: Vec<PaymentEntry>,
    /// Free-text narration emitted in the `Otros` block.
    pub notes: Vec<String>,
    /// Per-journal electronic invoicing configuration.
    pub journal: JournalConfig,
    /// Calculated totals (set by `calculate_totals()`).
    pub totals: Option<Totals>,
}

/// Per-invoice-book configuration assigned by Hacienda.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Electronic document kind emitted from this journal.
    pub document_type: Option<DocumentType>,
    /// 3-digit branch code.
    pub branch: Option<String>,
    /// 5-digit terminal / point-of-sale code.
    pub terminal: Option<String>,
    /// Opt into structured 20-digit consecutive numbering.
    pub structured_numbering: bool,
}

/// Emitter or receiver party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Trade name, when it differs from the registered name.
    pub trade_name: Option<String>,
    pub identification: Option<Identification>,
    pub location: Option<Location>,
    pub phone: Option<Phone>,
    pub email: Option<String>,
}

/// Identification document of a party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identification {
    pub kind: IdentificationType,
    /// Digits only, no separators.
    pub number: String,
}

/// Postal location per the official territorial catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Province code, 1..=7.
    pub province: u8,
    /// 2-digit canton code within the province.
    pub canton: String,
    /// 2-digit district code within the canton.
    pub district: String,
    /// Optional 2-digit neighborhood code within the district.
    pub neighborhood: Option<String>,
    /// Free-text directions ("Otras señas").
    pub address: String,
}

/// Phone number with country calling code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    pub country_code: String,
    pub number: String,
}

/// One invoice line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description (Detalle).
    pub description: String,
    pub quantity: Decimal,
    /// Unit price before tax and discount.
    pub unit_price: Decimal,
    /// Official measurement-unit code; "Unid" when unset.
    pub unit_code: Option<String>,
    /// CABYS goods/services code.
    pub cabys_code: Option<String>,
    /// Seller's own commercial code.
    pub commercial_code: Option<String>,
    /// Discount rate as a fraction of the line total (0.10 = 10%).
    pub discount_rate: Decimal,
    /// Reason text required when a discount is applied.
    pub discount_reason: Option<String>,
    /// Taxes on the line; only the first is attached to the line tax block.
    pub taxes: Vec<LineTax>,
    /// Calculated amounts (set by `calculate_totals()`).
    pub amounts: Option<LineAmounts>,
}

/// A tax applied to a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineTax {
    pub tax_type: TaxType,
    pub rate_code: TaxRateCode,
    /// Rate percentage (13 = 13%).
    pub rate: Decimal,
}

/// Calculated per-line amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineAmounts {
    /// quantity × unit price, before discount and tax.
    pub total: Decimal,
    /// total × discount rate.
    pub discount: Decimal,
    /// total − discount.
    pub subtotal: Decimal,
    /// Tax charged on the subtotal.
    pub tax: Decimal,
    /// subtotal + tax.
    pub line_total: Decimal,
}

/// One payment method entry; at most four per document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub method: PaymentMethod,
    /// Detail text, required for `Otros`.
    pub detail: Option<String>,
    /// Amount covered by this method; must be positive when present.
    pub amount: Option<Decimal>,
}

impl PaymentEntry {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            detail: None,
            amount: None,
        }
    }

    pub fn with_amount(method: PaymentMethod, amount: Decimal) -> Self {
        Self {
            method,
            detail: None,
            amount: Some(amount),
        }
    }
}

/// Document summary totals (ResumenFactura).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of subtotals of lines carrying at least one tax.
    pub taxable_total: Decimal,
    /// Sum of subtotals of lines carrying no tax.
    pub exempt_total: Decimal,
    /// Sum of all line totals before discount.
    pub sale_total: Decimal,
    /// Sum of all line discounts.
    pub discount_total: Decimal,
    /// sale_total − discount_total.
    pub net_total: Decimal,
    /// Total tax across all lines.
    pub tax_total: Decimal,
    /// net_total + tax_total.
    pub grand_total: Decimal,
    /// Tax amounts grouped by (tax type, tariff code).
    pub tax_breakdown: Vec<TaxBreakdown>,
}

/// One (tax type, tariff) bucket of the document summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub tax_type: TaxType,
    pub rate_code: TaxRateCode,
    pub rate: Decimal,
    /// Net base the tax was computed on.
    pub base: Decimal,
    pub amount: Decimal,
}

impl Invoice {
    /// Document number with the reference fallback applied.
    pub fn effective_number(&self) -> Option<&str> {
        if !self.number.trim().is_empty() {
            Some(self.number.as_str())
        } else {
            self.reference.as_deref().filter(|r| !r.trim().is_empty())
        }
    }
}
