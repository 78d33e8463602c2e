use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;

use super::root_element;
use super::xml_utils::{XmlResult, XmlWriter};
use crate::core::*;

/// Quantities are always rendered with 5 decimal places.
const QUANTITY_DP: u32 = 5;
/// Tax rates are always rendered with 2 decimal places.
const RATE_DP: u32 = 2;

/// Emission-time inputs the invoice record does not carry itself.
#[derive(Debug, Clone)]
pub struct EmissionContext {
    /// Emission timestamp, local Costa Rican time.
    pub emitted_at: DateTime<FixedOffset>,
    /// Emitter's economic activity code, when registered.
    pub activity_code: Option<String>,
}

impl EmissionContext {
    pub fn new(emitted_at: DateTime<FixedOffset>) -> Self {
        Self {
            emitted_at,
            activity_code: None,
        }
    }

    /// Context stamped with the current wall clock in Costa Rican time.
    pub fn now() -> Self {
        Self::new(Utc::now().with_timezone(&costa_rica_offset()))
    }

    pub fn activity_code(mut self, code: impl Into<String>) -> Self {
        self.activity_code = Some(code.into());
        self
    }
}

/// UTC−06:00; Costa Rica has no daylight saving.
pub fn costa_rica_offset() -> FixedOffset {
    FixedOffset::west_opt(6 * 3600).expect("-06:00 is a valid offset")
}

/// Generate the Hacienda 4.4 XML document for an invoice.
///
/// Pure function of the invoice plus the emission context — no network or
/// cryptographic access. Totals must have been calculated (the builder
/// does this).
pub fn to_xml(invoice: &Invoice, ctx: &EmissionContext) -> XmlResult {
    let totals = invoice.totals.as_ref().ok_or_else(|| {
        FacturaError::Builder("totals must be calculated before XML generation".into())
    })?;
    let number = invoice.effective_number().ok_or_else(|| {
        FacturaError::Validation("document must have a number or a reference".into())
    })?;
    let emitter_id = invoice.emitter.identification.as_ref().ok_or_else(|| {
        FacturaError::Validation("emitter identification is required for the clave".into())
    })?;

    let consecutive = consecutive_number(&invoice.journal, number)?;
    let clave = document_key(invoice.issue_date, &emitter_id.number, &consecutive, number)?;
    let doc_type = invoice
        .journal
        .document_type
        .unwrap_or(DocumentType::FacturaElectronica);
    let (root, ns) = root_element(doc_type);

    let money = invoice.currency_decimals;
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(root, &[("xmlns", ns.as_str())])?;
    w.text_element("Clave", &clave)?;
    if let Some(activity) = &ctx.activity_code {
        w.text_element("CodigoActividadEmisor", activity)?;
    }
    w.text_element("NumeroConsecutivo", &consecutive)?;
    w.text_element(
        "FechaEmision",
        &ctx.emitted_at.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
    )?;

    write_party(&mut w, &invoice.emitter, "Emisor")?;
    if let Some(receiver) = &invoice.receiver {
        write_party(&mut w, receiver, "Receptor")?;
    }

    w.text_element("CondicionVenta", invoice.sale_condition.code())?;
    if invoice.sale_condition == SaleCondition::Otros {
        if let Some(detail) = &invoice.sale_condition_other {
            w.text_element("CondicionVentaOtros", detail)?;
        }
    }
    if invoice.credit_term_days > 0 {
        w.text_element("PlazoCredito", &invoice.credit_term_days.to_string())?;
    }

    w.start_element("DetalleServicio")?;
    for (i, line) in invoice.lines.iter().enumerate() {
        write_line(&mut w, line, i + 1, money)?;
    }
    w.end_element("DetalleServicio")?;

    write_summary(&mut w, invoice, totals, money)?;

    if !invoice.notes.is_empty() {
        w.start_element("Otros")?;
        for note in &invoice.notes {
            w.text_element("OtroTexto", note)?;
        }
        w.end_element("Otros")?;
    }

    w.end_element(root)?;
    w.into_string()
}

fn write_party(w: &mut XmlWriter, party: &Party, tag: &str) -> Result<(), FacturaError> {
    w.start_element(tag)?;
    w.text_element("Nombre", &party.name)?;

    if let Some(identification) = &party.identification {
        w.start_element("Identificacion")?;
        w.text_element("Tipo", identification.kind.code())?;
        w.text_element("Numero", &identification.number)?;
        w.end_element("Identificacion")?;
    }

    if let Some(trade_name) = &party.trade_name {
        w.text_element("NombreComercial", trade_name)?;
    }

    if let Some(location) = &party.location {
        w.start_element("Ubicacion")?;
        w.text_element("Provincia", &location.province.to_string())?;
        w.text_element("Canton", &location.canton)?;
        w.text_element("Distrito", &location.district)?;
        if let Some(neighborhood) = &location.neighborhood {
            w.text_element("Barrio", neighborhood)?;
        }
        w.text_element("OtrasSenas", &location.address)?;
        w.end_element("Ubicacion")?;
    }

    if let Some(phone) = &party.phone {
        w.start_element("Telefono")?;
        w.text_element("CodigoPais", &phone.country_code)?;
        w.text_element("NumTelefono", &phone.number)?;
        w.end_element("Telefono")?;
    }

    if let Some(email) = &party.email {
        w.text_element("CorreoElectronico", email)?;
    }

    w.end_element(tag)?;
    Ok(())
}

fn write_line(
    w: &mut XmlWriter,
    line: &LineItem,
    position: usize,
    money: u32,
) -> Result<(), FacturaError> {
    let amounts = line.amounts.as_ref().ok_or_else(|| {
        FacturaError::Builder("line amounts must be calculated before XML generation".into())
    })?;

    w.start_element("LineaDetalle")?;
    w.text_element("NumeroLinea", &position.to_string())?;
    if let Some(cabys) = &line.cabys_code {
        w.text_element("CodigoCABYS", cabys)?;
    }
    if let Some(commercial) = &line.commercial_code {
        w.start_element("CodigoComercial")?;
        // 04 = internal seller code
        w.text_element("Tipo", "04")?;
        w.text_element("Codigo", commercial)?;
        w.end_element("CodigoComercial")?;
    }
    w.amount_element("Cantidad", line.quantity, QUANTITY_DP)?;
    w.text_element(
        "UnidadMedida",
        line.unit_code.as_deref().unwrap_or(crate::catalog::DEFAULT_UNIT),
    )?;
    w.text_element("Detalle", &line.description)?;
    w.amount_element("PrecioUnitario", line.unit_price, money)?;
    w.amount_element("MontoTotal", amounts.total, money)?;

    if amounts.discount > Decimal::ZERO {
        w.start_element("Descuento")?;
        w.amount_element("MontoDescuento", amounts.discount, money)?;
        if let Some(reason) = &line.discount_reason {
            w.text_element("NaturalezaDescuento", reason)?;
        }
        w.end_element("Descuento")?;
    }

    w.amount_element("SubTotal", amounts.subtotal, money)?;

    // Only the first tax is attached to the line tax block.
    if let Some(tax) = line.taxes.first() {
        w.start_element("Impuesto")?;
        w.text_element("Codigo", tax.tax_type.code())?;
        w.text_element("CodigoTarifaIVA", tax.rate_code.code())?;
        w.amount_element("Tarifa", tax.rate, RATE_DP)?;
        w.amount_element("Monto", amounts.tax, money)?;
        w.end_element("Impuesto")?;
    }

    w.amount_element("ImpuestoNeto", amounts.tax, money)?;
    w.amount_element("MontoTotalLinea", amounts.line_total, money)?;
    w.end_element("LineaDetalle")?;
    Ok(())
}

fn write_summary(
    w: &mut XmlWriter,
    invoice: &Invoice,
    totals: &Totals,
    money: u32,
) -> Result<(), FacturaError> {
    // Service/goods split by measurement unit.
    let mut serv_taxable = Decimal::ZERO;
    let mut serv_exempt = Decimal::ZERO;
    let mut merc_taxable = Decimal::ZERO;
    let mut merc_exempt = Decimal::ZERO;
    for line in &invoice.lines {
        let Some(amounts) = &line.amounts else {
            continue;
        };
        let service = is_service_unit(line.unit_code.as_deref());
        match (service, line.taxes.is_empty()) {
            (true, false) => serv_taxable += amounts.subtotal,
            (true, true) => serv_exempt += amounts.subtotal,
            (false, false) => merc_taxable += amounts.subtotal,
            (false, true) => merc_exempt += amounts.subtotal,
        }
    }

    w.start_element("ResumenFactura")?;

    w.start_element("CodigoTipoMoneda")?;
    w.text_element("CodigoMoneda", &invoice.currency_code)?;
    w.amount_element("TipoCambio", invoice.exchange_rate, money)?;
    w.end_element("CodigoTipoMoneda")?;

    w.amount_element("TotalServGravados", serv_taxable, money)?;
    w.amount_element("TotalServExentos", serv_exempt, money)?;
    // Exoneration and non-subject categories are not populated by this
    // system; the schema still requires the tags with a literal zero.
    w.amount_element("TotalServExonerado", Decimal::ZERO, money)?;
    w.amount_element("TotalMercanciasGravadas", merc_taxable, money)?;
    w.amount_element("TotalMercanciasExentas", merc_exempt, money)?;
    w.amount_element("TotalMercExonerada", Decimal::ZERO, money)?;
    w.amount_element("TotalGravado", totals.taxable_total, money)?;
    w.amount_element("TotalExento", totals.exempt_total, money)?;
    w.amount_element("TotalExonerado", Decimal::ZERO, money)?;
    w.amount_element("TotalNoSujeto", Decimal::ZERO, money)?;
    w.amount_element("TotalVenta", totals.sale_total, money)?;
    w.amount_element("TotalDescuentos", totals.discount_total, money)?;
    w.amount_element("TotalVentaNeta", totals.net_total, money)?;

    for breakdown in &totals.tax_breakdown {
        w.start_element("TotalDesgloseImpuesto")?;
        w.text_element("Codigo", breakdown.tax_type.code())?;
        w.text_element("CodigoTarifaIVA", breakdown.rate_code.code())?;
        w.amount_element("TotalMontoImpuesto", breakdown.amount, money)?;
        w.end_element("TotalDesgloseImpuesto")?;
    }

    w.amount_element("TotalImpuesto", totals.tax_total, money)?;

    for payment in &invoice.payments {
        w.start_element("MedioPago")?;
        w.text_element("TipoMedioPago", payment.method.code())?;
        if let Some(detail) = &payment.detail {
            w.text_element("MedioPagoOtros", detail)?;
        }
        if let Some(amount) = payment.amount {
            w.amount_element("TotalMedioPago", amount, money)?;
        }
        w.end_element("MedioPago")?;
    }

    w.amount_element("TotalComprobante", totals.grand_total, money)?;
    w.end_element("ResumenFactura")?;
    Ok(())
}

/// Unit codes that classify a line as a service rather than merchandise.
fn is_service_unit(code: Option<&str>) -> bool {
    matches!(
        code,
        Some("Sp" | "Spe" | "St" | "Os" | "Al" | "Alc" | "Cm" | "I" | "h" | "d" | "min" | "s")
    )
}
