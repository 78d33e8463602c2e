//! Hacienda 4.4 XML document generation.

mod document;
mod xml_utils;

pub use document::{EmissionContext, costa_rica_offset, to_xml};
pub use xml_utils::{XmlWriter, format_fixed};

use crate::core::DocumentType;

/// Base URL of the 4.4 schema namespaces.
const SCHEMA_BASE: &str = "https://cdn.comprobanteselectronicos.go.cr/xml-schemas/v4.4";

/// Root element name and namespace for each document kind.
pub fn root_element(document_type: DocumentType) -> (&'static str, String) {
    let (root, schema) = match document_type {
        DocumentType::FacturaElectronica => ("FacturaElectronica", "facturaElectronica"),
        DocumentType::NotaDebito => ("NotaDebitoElectronica", "notaDebitoElectronica"),
        DocumentType::NotaCredito => ("NotaCreditoElectronica", "notaCreditoElectronica"),
        DocumentType::TiqueteElectronico => ("TiqueteElectronico", "tiqueteElectronico"),
        DocumentType::FacturaCompra => ("FacturaElectronicaCompra", "facturaElectronicaCompra"),
        DocumentType::FacturaExportacion => (
            "FacturaElectronicaExportacion",
            "facturaElectronicaExportacion",
        ),
        DocumentType::ReciboPago => ("ReciboElectronicoPago", "reciboElectronicoPago"),
        DocumentType::ConfirmacionAceptacion
        | DocumentType::ConfirmacionParcial
        | DocumentType::Rechazo => ("MensajeReceptor", "mensajeReceptor"),
    };
    (root, format!("{SCHEMA_BASE}/{schema}"))
}
