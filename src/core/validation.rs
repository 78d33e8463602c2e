use std::collections::HashMap;

use rust_decimal::Decimal;

use super::codes::*;
use super::error::ValidationError;
use super::types::*;

/// Validate an invoice against the Hacienda 4.4 structural rules.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.effective_number().is_none() {
        errors.push(ValidationError::new(
            "number",
            "document must have a number or a reference",
        ));
    }

    if invoice.currency_code.trim().is_empty() {
        errors.push(ValidationError::new(
            "currency_code",
            "currency code must not be empty",
        ));
    } else if invoice.currency_code.len() != 3 {
        errors.push(ValidationError::new(
            "currency_code",
            "currency code must be 3 characters (ISO 4217)",
        ));
    }

    if invoice.exchange_rate <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "exchange_rate",
            "exchange rate must be positive",
        ));
    }

    validate_sale_condition(invoice, &mut errors);
    validate_payments(invoice, &mut errors);
    validate_journal(&invoice.journal, &mut errors);
    validate_party(&invoice.emitter, "emitter", &mut errors);
    if let Some(receiver) = &invoice.receiver {
        validate_party(receiver, "receiver", &mut errors);
    }

    if invoice.lines.is_empty() {
        errors.push(ValidationError::new(
            "lines",
            "document must have at least one line item",
        ));
    }
    for (i, line) in invoice.lines.iter().enumerate() {
        validate_line(line, i, &mut errors);
    }

    errors
}

fn validate_sale_condition(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    if invoice.sale_condition == SaleCondition::Otros
        && invoice
            .sale_condition_other
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    {
        errors.push(ValidationError::new(
            "sale_condition_other",
            "sale condition 'Otros' requires a detail text",
        ));
    }

    if invoice.sale_condition.requires_credit_term() {
        if invoice.credit_term_days == 0 {
            errors.push(ValidationError::new(
                "credit_term_days",
                "credit sale conditions require a credit term greater than zero",
            ));
        }
    } else if invoice.credit_term_days > 0 {
        errors.push(ValidationError::new(
            "credit_term_days",
            "credit term may only be set for credit sale conditions",
        ));
    }
}

fn validate_payments(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    if invoice.payments.len() > 4 {
        errors.push(ValidationError::new(
            "payments",
            "at most four payment methods may be reported",
        ));
    }

    if invoice.payments.is_empty() && !invoice.sale_condition.allows_empty_payments() {
        errors.push(ValidationError::new(
            "payments",
            "at least one payment method is required for this sale condition",
        ));
    }

    for (i, payment) in invoice.payments.iter().enumerate() {
        if payment.method == PaymentMethod::Otros
            && payment
                .detail
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            errors.push(ValidationError::new(
                format!("payments[{i}].detail"),
                "payment method 'Otros' requires a detail text",
            ));
        }
        if let Some(amount) = payment.amount {
            if amount <= Decimal::ZERO {
                errors.push(ValidationError::new(
                    format!("payments[{i}].amount"),
                    "payment amount must be greater than zero",
                ));
            }
        }
    }
}

/// Branch and terminal codes must be numeric-only and length-bounded.
pub fn validate_journal(journal: &JournalConfig, errors: &mut Vec<ValidationError>) {
    if let Some(branch) = journal.branch.as_deref() {
        if branch.is_empty() || branch.len() > 3 || !branch.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::new(
                "journal.branch",
                "branch code must be numeric with at most 3 digits",
            ));
        }
    }
    if let Some(terminal) = journal.terminal.as_deref() {
        if terminal.is_empty()
            || terminal.len() > 5
            || !terminal.chars().all(|c| c.is_ascii_digit())
        {
            errors.push(ValidationError::new(
                "journal.terminal",
                "terminal code must be numeric with at most 5 digits",
            ));
        }
    }
}

fn validate_party(party: &Party, prefix: &str, errors: &mut Vec<ValidationError>) {
    if party.name.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.name"),
            "name must not be empty",
        ));
    }

    if let Some(identification) = &party.identification {
        if identification.number.trim().is_empty()
            || !identification.number.chars().all(|c| c.is_ascii_digit())
        {
            errors.push(ValidationError::new(
                format!("{prefix}.identification.number"),
                "identification number must be digits only",
            ));
        }
    }

    if let Some(location) = &party.location {
        if !(1..=7).contains(&location.province) {
            errors.push(ValidationError::new(
                format!("{prefix}.location.province"),
                "province code must be between 1 and 7",
            ));
        }
    }
}

fn validate_line(line: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("lines[{index}]");

    if line.description.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.description"),
            "line description must not be empty",
        ));
    }
    if line.quantity <= Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must be greater than zero",
        ));
    }
    if line.unit_price.is_sign_negative() {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
        ));
    }
    if line.discount_rate.is_sign_negative() || line.discount_rate > Decimal::ONE {
        errors.push(ValidationError::new(
            format!("{prefix}.discount_rate"),
            "discount rate must be between 0 and 1",
        ));
    }
    if line.discount_rate > Decimal::ZERO
        && line
            .discount_reason
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    {
        errors.push(ValidationError::new(
            format!("{prefix}.discount_reason"),
            "a discount requires a reason text",
        ));
    }
    for (t, tax) in line.taxes.iter().enumerate() {
        if tax.rate.is_sign_negative() {
            errors.push(ValidationError::new(
                format!("{prefix}.taxes[{t}].rate"),
                "tax rate must not be negative",
            ));
        }
    }
}

/// Calculate per-line amounts and document totals (mutates in place).
///
/// The taxable/exempt split is per whole line: a line with any tax
/// contributes its full subtotal to the taxable bucket, a line with none
/// goes entirely to the exempt bucket.
pub fn calculate_totals(invoice: &mut Invoice) {
    let mut sale_total = Decimal::ZERO;
    let mut discount_total = Decimal::ZERO;
    let mut taxable_total = Decimal::ZERO;
    let mut exempt_total = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;

    let mut groups: HashMap<(TaxType, TaxRateCode), (Decimal, Decimal)> = HashMap::new();

    for line in &mut invoice.lines {
        let total = line.quantity * line.unit_price;
        let discount = total * line.discount_rate;
        let subtotal = total - discount;

        let mut line_tax = Decimal::ZERO;
        for tax in &line.taxes {
            let amount = subtotal * tax.rate / Decimal::ONE_HUNDRED;
            line_tax += amount;
            let entry = groups
                .entry((tax.tax_type, tax.rate_code))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += subtotal;
            entry.1 += amount;
        }

        sale_total += total;
        discount_total += discount;
        if line.taxes.is_empty() {
            exempt_total += subtotal;
        } else {
            taxable_total += subtotal;
        }
        tax_total += line_tax;

        line.amounts = Some(LineAmounts {
            total,
            discount,
            subtotal,
            tax: line_tax,
            line_total: subtotal + line_tax,
        });
    }

    let mut tax_breakdown: Vec<TaxBreakdown> = groups
        .into_iter()
        .map(|((tax_type, rate_code), (base, amount))| TaxBreakdown {
            tax_type,
            rate_code,
            rate: rate_code.percentage(),
            base,
            amount,
        })
        .collect();
    // Sort for deterministic output
    tax_breakdown.sort_by(|a, b| {
        a.tax_type
            .code()
            .cmp(b.tax_type.code())
            .then(a.rate_code.code().cmp(b.rate_code.code()))
    });

    let net_total = sale_total - discount_total;
    invoice.totals = Some(Totals {
        taxable_total,
        exempt_total,
        sale_total,
        discount_total,
        net_total,
        tax_total,
        grand_total: net_total + tax_total,
        tax_breakdown,
    });
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
