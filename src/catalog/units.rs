//! Official Hacienda measurement-unit codes.
//!
//! The full catalog has ~80 codes; this covers the subset most used on
//! goods and services documents. Codes are case-sensitive.

/// Check whether `code` is a known Hacienda measurement-unit code.
pub fn is_known_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// Default unit code for lines that specify none.
pub const DEFAULT_UNIT: &str = "Unid";

/// Sorted list of common Hacienda unit codes. Sorted for binary search.
static UNIT_CODES: &[&str] = &[
    "Al",   // Alquiler de uso habitacional
    "Alc",  // Alquiler de uso comercial
    "Cm",   // Comisiones
    "Gal",  // Galón
    "I",    // Intereses
    "L",    // Litro
    "Os",   // Otro tipo de servicio
    "Oth",  // Otros
    "Sp",   // Servicios profesionales
    "Spe",  // Servicios personales
    "St",   // Servicios técnicos
    "Unid", // Unidad
    "cm",   // Centímetro
    "d",    // Día
    "g",    // Gramo
    "h",    // Hora
    "kg",   // Kilogramo
    "km",   // Kilómetro
    "m",    // Metro
    "mL",   // Mililitro
    "min",  // Minuto
    "mm",   // Milímetro
    "s",    // Segundo
    "t",    // Tonelada
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_sorted() {
        let mut sorted = UNIT_CODES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, UNIT_CODES);
    }

    #[test]
    fn known_codes() {
        assert!(is_known_unit_code("Unid"));
        assert!(is_known_unit_code("Sp"));
        assert!(is_known_unit_code("kg"));
        assert!(!is_known_unit_code("unid"));
        assert!(!is_known_unit_code("XYZ"));
    }
}
