//! CABYS goods/services catalog lookup.
//!
//! The official CABYS catalog has ~20,000 13-digit codes. This module
//! ships a small working subset with each entry's default IVA tariff;
//! callers with the full catalog can still validate shape with
//! [`is_valid_cabys_shape`].

use crate::core::TaxRateCode;

/// One CABYS catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabysEntry {
    /// 13-digit CABYS code.
    pub code: &'static str,
    pub description: &'static str,
    /// Default IVA tariff for the good/service.
    pub default_rate: TaxRateCode,
}

/// Look up a CABYS code in the bundled subset.
pub fn find_cabys(code: &str) -> Option<&'static CabysEntry> {
    CABYS_CODES
        .binary_search_by(|entry| entry.code.cmp(code))
        .ok()
        .map(|i| &CABYS_CODES[i])
}

/// A CABYS code is 13 ASCII digits.
pub fn is_valid_cabys_shape(code: &str) -> bool {
    code.len() == 13 && code.chars().all(|c| c.is_ascii_digit())
}

/// Bundled subset, sorted by code for binary search.
static CABYS_CODES: &[CabysEntry] = &[
    CabysEntry {
        code: "0111100000100",
        description: "Arroz con cáscara",
        default_rate: TaxRateCode::Reducida1,
    },
    CabysEntry {
        code: "0141100010100",
        description: "Leche cruda de vacuno",
        default_rate: TaxRateCode::Reducida1,
    },
    CabysEntry {
        code: "2399200000100",
        description: "Cemento hidráulico",
        default_rate: TaxRateCode::TarifaGeneral,
    },
    CabysEntry {
        code: "4721800000100",
        description: "Libros impresos",
        default_rate: TaxRateCode::Exenta,
    },
    CabysEntry {
        code: "8111000000100",
        description: "Servicios de consultoría en gestión",
        default_rate: TaxRateCode::TarifaGeneral,
    },
    CabysEntry {
        code: "8121600000100",
        description: "Servicios jurídicos",
        default_rate: TaxRateCode::TarifaGeneral,
    },
    CabysEntry {
        code: "8314100000100",
        description: "Servicios de diseño y desarrollo de software",
        default_rate: TaxRateCode::TarifaGeneral,
    },
    CabysEntry {
        code: "9311100000100",
        description: "Servicios de salud humana",
        default_rate: TaxRateCode::Reducida4,
    },
];
