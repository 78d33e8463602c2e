//! Closed Hacienda code lists (Anexos y Estructuras v4.4).
//!
//! Every list the tax authority publishes as a fixed vocabulary is a tagged
//! enum with an explicit `code()` / `from_code()` table so an unmapped code
//! is a compile-time hole, not a silent string.

use serde::{Deserialize, Serialize};

/// Electronic document kinds and their 2-digit Hacienda type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// FE — Factura Electrónica.
    FacturaElectronica,
    /// ND — Nota de Débito.
    NotaDebito,
    /// NC — Nota de Crédito.
    NotaCredito,
    /// TE — Tiquete Electrónico.
    TiqueteElectronico,
    /// CCE — Confirmación de aceptación de comprobante.
    ConfirmacionAceptacion,
    /// CPCE — Confirmación parcial de comprobante.
    ConfirmacionParcial,
    /// RCE — Rechazo de comprobante.
    Rechazo,
    /// FEC — Factura Electrónica de Compra.
    FacturaCompra,
    /// FEE — Factura Electrónica de Exportación.
    FacturaExportacion,
    /// REP — Recibo Electrónico de Pago.
    ReciboPago,
}

impl DocumentType {
    /// 2-digit type code used inside the consecutive number and clave.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FacturaElectronica => "01",
            Self::NotaDebito => "02",
            Self::NotaCredito => "03",
            Self::TiqueteElectronico => "04",
            Self::ConfirmacionAceptacion => "05",
            Self::ConfirmacionParcial => "06",
            Self::Rechazo => "07",
            Self::FacturaCompra => "08",
            Self::FacturaExportacion => "09",
            Self::ReciboPago => "10",
        }
    }

    /// Short label used in journal configuration ("FE", "NC", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::FacturaElectronica => "FE",
            Self::NotaDebito => "ND",
            Self::NotaCredito => "NC",
            Self::TiqueteElectronico => "TE",
            Self::ConfirmacionAceptacion => "CCE",
            Self::ConfirmacionParcial => "CPCE",
            Self::Rechazo => "RCE",
            Self::FacturaCompra => "FEC",
            Self::FacturaExportacion => "FEE",
            Self::ReciboPago => "REP",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::FacturaElectronica),
            "02" => Some(Self::NotaDebito),
            "03" => Some(Self::NotaCredito),
            "04" => Some(Self::TiqueteElectronico),
            "05" => Some(Self::ConfirmacionAceptacion),
            "06" => Some(Self::ConfirmacionParcial),
            "07" => Some(Self::Rechazo),
            "08" => Some(Self::FacturaCompra),
            "09" => Some(Self::FacturaExportacion),
            "10" => Some(Self::ReciboPago),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "FE" => Some(Self::FacturaElectronica),
            "ND" => Some(Self::NotaDebito),
            "NC" => Some(Self::NotaCredito),
            "TE" => Some(Self::TiqueteElectronico),
            "CCE" => Some(Self::ConfirmacionAceptacion),
            "CPCE" => Some(Self::ConfirmacionParcial),
            "RCE" => Some(Self::Rechazo),
            "FEC" => Some(Self::FacturaCompra),
            "FEE" => Some(Self::FacturaExportacion),
            "REP" => Some(Self::ReciboPago),
            _ => None,
        }
    }
}

/// Condición de venta — payment-terms classification required on every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleCondition {
    /// 01 — Contado.
    Contado,
    /// 02 — Crédito.
    Credito,
    /// 03 — Consignación.
    Consignacion,
    /// 04 — Apartado.
    Apartado,
    /// 05 — Arrendamiento con opción de compra.
    ArrendamientoOpcionCompra,
    /// 06 — Arrendamiento en función financiera.
    ArrendamientoFinanciero,
    /// 07 — Cobro a favor de un tercero.
    CobroTercero,
    /// 08 — Servicios prestados al Estado.
    ServiciosEstado,
    /// 09 — Pago de servicios prestados al Estado.
    PagoServiciosEstado,
    /// 10 — Venta a crédito en IVA hasta 90 días.
    VentaCreditoIva,
    /// 11 — Pago de venta a crédito en IVA hasta 90 días.
    PagoVentaCreditoIva,
    /// 12 — Venta de mercancía no nacionalizada.
    MercanciaNoNacionalizada,
    /// 13 — Venta de bienes usados no contribuyente.
    BienesUsadosNoContribuyente,
    /// 14 — Arrendamiento operativo.
    ArrendamientoOperativo,
    /// 15 — Arrendamiento financiero.
    ArrendamientoFinancieroPuro,
    /// 99 — Otros (requires a free-text detail).
    Otros,
}

impl SaleCondition {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Contado => "01",
            Self::Credito => "02",
            Self::Consignacion => "03",
            Self::Apartado => "04",
            Self::ArrendamientoOpcionCompra => "05",
            Self::ArrendamientoFinanciero => "06",
            Self::CobroTercero => "07",
            Self::ServiciosEstado => "08",
            Self::PagoServiciosEstado => "09",
            Self::VentaCreditoIva => "10",
            Self::PagoVentaCreditoIva => "11",
            Self::MercanciaNoNacionalizada => "12",
            Self::BienesUsadosNoContribuyente => "13",
            Self::ArrendamientoOperativo => "14",
            Self::ArrendamientoFinancieroPuro => "15",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Contado),
            "02" => Some(Self::Credito),
            "03" => Some(Self::Consignacion),
            "04" => Some(Self::Apartado),
            "05" => Some(Self::ArrendamientoOpcionCompra),
            "06" => Some(Self::ArrendamientoFinanciero),
            "07" => Some(Self::CobroTercero),
            "08" => Some(Self::ServiciosEstado),
            "09" => Some(Self::PagoServiciosEstado),
            "10" => Some(Self::VentaCreditoIva),
            "11" => Some(Self::PagoVentaCreditoIva),
            "12" => Some(Self::MercanciaNoNacionalizada),
            "13" => Some(Self::BienesUsadosNoContribuyente),
            "14" => Some(Self::ArrendamientoOperativo),
            "15" => Some(Self::ArrendamientoFinancieroPuro),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }

    /// Conditions that require a credit term in days.
    pub fn requires_credit_term(&self) -> bool {
        matches!(self, Self::Credito | Self::VentaCreditoIva)
    }

    /// Conditions that may legitimately carry no payment method entry.
    pub fn allows_empty_payments(&self) -> bool {
        matches!(
            self,
            Self::Credito | Self::ServiciosEstado | Self::VentaCreditoIva
        )
    }
}

/// Medio de pago codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// 01 — Efectivo.
    Efectivo,
    /// 02 — Tarjeta.
    Tarjeta,
    /// 03 — Cheque.
    Cheque,
    /// 04 — Transferencia o depósito bancario.
    Transferencia,
    /// 05 — Recaudado por terceros.
    RecaudadoTerceros,
    /// 06 — SINPE Móvil.
    SinpeMovil,
    /// 07 — Plataforma digital.
    PlataformaDigital,
    /// 99 — Otros (requires a free-text detail).
    Otros,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Efectivo => "01",
            Self::Tarjeta => "02",
            Self::Cheque => "03",
            Self::Transferencia => "04",
            Self::RecaudadoTerceros => "05",
            Self::SinpeMovil => "06",
            Self::PlataformaDigital => "07",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Efectivo),
            "02" => Some(Self::Tarjeta),
            "03" => Some(Self::Cheque),
            "04" => Some(Self::Transferencia),
            "05" => Some(Self::RecaudadoTerceros),
            "06" => Some(Self::SinpeMovil),
            "07" => Some(Self::PlataformaDigital),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

/// Hacienda tax classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// 01 — Impuesto al Valor Agregado.
    Iva,
    /// 02 — Impuesto Selectivo de Consumo.
    SelectivoConsumo,
    /// 03 — Impuesto Único a los Combustibles.
    Combustibles,
    /// 04 — Impuesto específico de Bebidas Alcohólicas.
    BebidasAlcoholicas,
    /// 05 — Impuesto a Bebidas sin Alcohol y Jabones.
    BebidasSinAlcohol,
    /// 06 — Impuesto a los Productos de Tabaco.
    Tabaco,
    /// 07 — IVA (cálculo especial).
    IvaCalculoEspecial,
    /// 08 — IVA Régimen de Bienes Usados (Factor).
    IvaBienesUsados,
    /// 12 — Impuesto Específico al Cemento.
    Cemento,
    /// 99 — Otros.
    Otros,
}

impl TaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Iva => "01",
            Self::SelectivoConsumo => "02",
            Self::Combustibles => "03",
            Self::BebidasAlcoholicas => "04",
            Self::BebidasSinAlcohol => "05",
            Self::Tabaco => "06",
            Self::IvaCalculoEspecial => "07",
            Self::IvaBienesUsados => "08",
            Self::Cemento => "12",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Iva),
            "02" => Some(Self::SelectivoConsumo),
            "03" => Some(Self::Combustibles),
            "04" => Some(Self::BebidasAlcoholicas),
            "05" => Some(Self::BebidasSinAlcohol),
            "06" => Some(Self::Tabaco),
            "07" => Some(Self::IvaCalculoEspecial),
            "08" => Some(Self::IvaBienesUsados),
            "12" => Some(Self::Cemento),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

/// Official IVA tariff codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRateCode {
    /// 01 — Tarifa 0% (Art. 32 RLIVA).
    TarifaCero,
    /// 02 — Tarifa reducida 1%.
    Reducida1,
    /// 03 — Tarifa reducida 2%.
    Reducida2,
    /// 04 — Tarifa reducida 4%.
    Reducida4,
    /// 05 — Tarifa transitoria 0%.
    Transitoria0,
    /// 06 — Tarifa transitoria 4%.
    Transitoria4,
    /// 07 — Tarifa transitoria 8%.
    Transitoria8,
    /// 08 — Tarifa general 13%.
    TarifaGeneral,
    /// 09 — Tarifa reducida 0.5%.
    ReducidaMedia,
    /// 10 — Tarifa exenta.
    Exenta,
    /// 11 — Tarifa 0% sin derecho a crédito.
    CeroSinCredito,
}

impl TaxRateCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TarifaCero => "01",
            Self::Reducida1 => "02",
            Self::Reducida2 => "03",
            Self::Reducida4 => "04",
            Self::Transitoria0 => "05",
            Self::Transitoria4 => "06",
            Self::Transitoria8 => "07",
            Self::TarifaGeneral => "08",
            Self::ReducidaMedia => "09",
            Self::Exenta => "10",
            Self::CeroSinCredito => "11",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::TarifaCero),
            "02" => Some(Self::Reducida1),
            "03" => Some(Self::Reducida2),
            "04" => Some(Self::Reducida4),
            "05" => Some(Self::Transitoria0),
            "06" => Some(Self::Transitoria4),
            "07" => Some(Self::Transitoria8),
            "08" => Some(Self::TarifaGeneral),
            "09" => Some(Self::ReducidaMedia),
            "10" => Some(Self::Exenta),
            "11" => Some(Self::CeroSinCredito),
            _ => None,
        }
    }

    /// Official percentage for the tariff, in percent.
    pub fn percentage(&self) -> rust_decimal::Decimal {
        use rust_decimal_macros::dec;
        match self {
            Self::TarifaCero | Self::Transitoria0 | Self::Exenta | Self::CeroSinCredito => dec!(0),
            Self::Reducida1 => dec!(1),
            Self::Reducida2 => dec!(2),
            Self::Reducida4 | Self::Transitoria4 => dec!(4),
            Self::Transitoria8 => dec!(8),
            Self::TarifaGeneral => dec!(13),
            Self::ReducidaMedia => dec!(0.5),
        }
    }
}

/// Identification document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentificationType {
    /// 01 — Cédula Física.
    Fisica,
    /// 02 — Cédula Jurídica.
    Juridica,
    /// 03 — DIMEX.
    Dimex,
    /// 04 — NITE.
    Nite,
    /// 05 — Identificación Extranjera.
    Extranjero,
}

impl IdentificationType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fisica => "01",
            Self::Juridica => "02",
            Self::Dimex => "03",
            Self::Nite => "04",
            Self::Extranjero => "05",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Fisica),
            "02" => Some(Self::Juridica),
            "03" => Some(Self::Dimex),
            "04" => Some(Self::Nite),
            "05" => Some(Self::Extranjero),
            _ => None,
        }
    }
}
