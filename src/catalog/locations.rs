//! Territorial catalog: provinces, cantons, districts, neighborhoods.
//!
//! Lookups are keyed by the numeric codes Hacienda uses in the Ubicacion
//! block. A seeded subset is bundled; the lookup functions return `None`
//! for codes outside it, which callers treat as "name unknown", not as an
//! invalid document.

/// Province names, indexed by code 1..=7.
static PROVINCES: &[(u8, &str)] = &[
    (1, "San José"),
    (2, "Alajuela"),
    (3, "Cartago"),
    (4, "Heredia"),
    (5, "Guanacaste"),
    (6, "Puntarenas"),
    (7, "Limón"),
];

/// (province, canton code, name).
static CANTONS: &[(u8, &str, &str)] = &[
    (1, "01", "San José"),
    (1, "02", "Escazú"),
    (1, "03", "Desamparados"),
    (1, "08", "Goicoechea"),
    (2, "01", "Alajuela"),
    (2, "02", "San Ramón"),
    (3, "01", "Cartago"),
    (4, "01", "Heredia"),
    (5, "01", "Liberia"),
    (6, "01", "Puntarenas"),
    (7, "01", "Limón"),
];

/// (province, canton, district code, name).
static DISTRICTS: &[(u8, &str, &str, &str)] = &[
    (1, "01", "01", "Carmen"),
    (1, "01", "02", "Merced"),
    (1, "01", "03", "Hospital"),
    (1, "02", "01", "Escazú"),
    (1, "02", "02", "San Antonio"),
    (2, "01", "01", "Alajuela"),
    (3, "01", "01", "Oriental"),
    (4, "01", "01", "Heredia"),
];

/// (province, canton, district, neighborhood code, name).
static NEIGHBORHOODS: &[(u8, &str, &str, &str, &str)] = &[
    (1, "01", "01", "01", "Amón"),
    (1, "01", "01", "02", "Aranjuez"),
    (1, "01", "02", "01", "Bajos de la Unión"),
    (1, "02", "01", "01", "Centro"),
];

pub fn province_name(code: u8) -> Option<&'static str> {
    PROVINCES.iter().find(|(c, _)| *c == code).map(|(_, n)| *n)
}

pub fn canton_name(province: u8, canton: &str) -> Option<&'static str> {
    CANTONS
        .iter()
        .find(|(p, c, _)| *p == province && *c == canton)
        .map(|(_, _, n)| *n)
}

pub fn district_name(province: u8, canton: &str, district: &str) -> Option<&'static str> {
    DISTRICTS
        .iter()
        .find(|(p, c, d, _)| *p == province && *c == canton && *d == district)
        .map(|(_, _, _, n)| *n)
}

pub fn neighborhood_name(
    province: u8,
    canton: &str,
    district: &str,
    neighborhood: &str,
) -> Option<&'static str> {
    NEIGHBORHOODS
        .iter()
        .find(|(p, c, d, b, _)| {
            *p == province && *c == canton && *d == district && *b == neighborhood
        })
        .map(|(_, _, _, _, n)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn province_lookup() {
        assert_eq!(province_name(1), Some("San José"));
        assert_eq!(province_name(7), Some("Limón"));
        assert_eq!(province_name(8), None);
    }

    #[test]
    fn hierarchy_lookup() {
        assert_eq!(canton_name(1, "02"), Some("Escazú"));
        assert_eq!(district_name(1, "01", "02"), Some("Merced"));
        assert_eq!(neighborhood_name(1, "01", "01", "02"), Some("Aranjuez"));
        assert_eq!(district_name(5, "01", "99"), None);
    }
}
