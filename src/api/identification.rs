use serde::Deserialize;
use tracing::debug;

use super::ApiConfig;
use crate::core::{FacturaError, Location, Party, PartyBuilder};

/// Contact record returned by the identification lookup endpoint.
///
/// The endpoint has answered with Spanish and English key names over
/// time, so every field accepts both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartyRecord {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "correo", alias = "correo_electronico")]
    pub email: Option<String>,
    #[serde(default, alias = "telefono")]
    pub phone: Option<String>,
    #[serde(default, alias = "direccion")]
    pub address: Option<PartyAddress>,
}

/// Address field of a lookup response: either a plain line of text or a
/// structured object with postal and territorial-catalog codes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PartyAddress {
    Line(String),
    Detailed(AddressDetail),
}

/// Structured address as the lookup endpoint reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressDetail {
    #[serde(default, alias = "linea1")]
    pub line1: Option<String>,
    #[serde(default, alias = "codigo_postal")]
    pub postal_code: Option<String>,
    /// Province code, 1..=7.
    #[serde(default, alias = "provincia")]
    pub province: Option<u8>,
    /// 2-digit canton code within the province.
    #[serde(default)]
    pub canton: Option<String>,
    /// 2-digit district code within the canton.
    #[serde(default, alias = "distrito")]
    pub district: Option<String>,
    /// 2-digit neighborhood code within the district.
    #[serde(default, alias = "barrio")]
    pub neighborhood: Option<String>,
}

impl PartyRecord {
    /// The free-text address line, whichever shape the response used.
    pub fn address_line(&self) -> Option<&str> {
        match self.address.as_ref()? {
            PartyAddress::Line(line) => Some(line.as_str()),
            PartyAddress::Detailed(detail) => detail.line1.as_deref(),
        }
    }

    /// Build a [`Party`] from the looked-up contact data, for
    /// pre-populating a receiver. Territorial codes, when present,
    /// become the party's location.
    pub fn to_party(&self) -> Option<Party> {
        let name = self.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        let mut builder = PartyBuilder::new(name);
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            builder = builder.email(email);
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            builder = builder.phone("506", phone);
        }
        if let Some(location) = self.location() {
            builder = builder.location(location);
        }
        Some(builder.build())
    }

    fn location(&self) -> Option<Location> {
        let Some(PartyAddress::Detailed(detail)) = self.address.as_ref() else {
            return None;
        };
        Some(Location {
            province: detail.province?,
            canton: detail.canton.clone()?,
            district: detail.district.clone()?,
            neighborhood: detail.neighborhood.clone(),
            address: detail.line1.clone().unwrap_or_default(),
        })
    }
}

/// Look up a taxpayer's contact data by identification number.
///
/// Read-only collaborator flow, separate from document submission; no
/// bearer token is required.
pub async fn lookup_identification(
    http: &reqwest::Client,
    config: &ApiConfig,
    identification: &str,
) -> Result<PartyRecord, FacturaError> {
    let digits: String = identification
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Err(FacturaError::Api(
            "identification number has no digits".into(),
        ));
    }
    let url = config.identification_url(&digits);
    debug!(%url, "looking up identification");

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| FacturaError::Api(format!("identification lookup failed: {e}")))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FacturaError::Api(format!(
            "identification {digits} is not registered"
        )));
    }
    if !status.is_success() {
        return Err(FacturaError::Api(format!(
            "identification lookup returned {status}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| FacturaError::Api(format!("identification response is not JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_spanish_keys_with_flat_address() {
        let body = r#"{
            "nombre": "COMERCIAL TICA S.A.",
            "correo": "factura@tica.cr",
            "telefono": "22223333",
            "direccion": "San José, Escazú"
        }"#;
        let record: PartyRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.name.as_deref(), Some("COMERCIAL TICA S.A."));
        assert_eq!(record.email.as_deref(), Some("factura@tica.cr"));
        assert_eq!(record.address_line(), Some("San José, Escazú"));
    }

    #[test]
    fn deserializes_nested_address_object() {
        let body = r#"{
            "nombre": "Cliente Ejemplo",
            "direccion": {"linea1": "200 m norte", "codigo_postal": "10201"}
        }"#;
        let record: PartyRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.address_line(), Some("200 m norte"));
        let Some(PartyAddress::Detailed(detail)) = &record.address else {
            panic!("expected structured address");
        };
        assert_eq!(detail.postal_code.as_deref(), Some("10201"));
    }

    #[test]
    fn deserializes_english_keys() {
        let body = r#"{"name": "Cliente", "email": "c@x.cr", "phone": "88887777"}"#;
        let record: PartyRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.name.as_deref(), Some("Cliente"));
        assert_eq!(record.phone.as_deref(), Some("88887777"));
    }

    #[test]
    fn territorial_codes_become_a_location() {
        let body = r#"{
            "nombre": "Cliente Ejemplo",
            "direccion": {
                "linea1": "200 m norte",
                "provincia": 1,
                "canton": "02",
                "distrito": "01",
                "barrio": "01"
            }
        }"#;
        let record: PartyRecord = serde_json::from_str(body).unwrap();
        let party = record.to_party().unwrap();
        let location = party.location.unwrap();
        assert_eq!(location.province, 1);
        assert_eq!(location.canton, "02");
        assert_eq!(location.district, "01");
        assert_eq!(location.neighborhood.as_deref(), Some("01"));
        assert_eq!(location.address, "200 m norte");
    }

    #[test]
    fn partial_codes_yield_no_location() {
        let body = r#"{"nombre": "X", "direccion": {"linea1": "Y", "canton": "02"}}"#;
        let record: PartyRecord = serde_json::from_str(body).unwrap();
        let party = record.to_party().unwrap();
        assert!(party.location.is_none());
    }

    #[test]
    fn party_from_record() {
        let record = PartyRecord {
            name: Some("Cliente Ejemplo".into()),
            email: Some("c@x.cr".into()),
            phone: Some("88887777".into()),
            address: None,
        };
        let party = record.to_party().unwrap();
        assert_eq!(party.name, "Cliente Ejemplo");
        assert_eq!(party.email.as_deref(), Some("c@x.cr"));
        assert_eq!(party.phone.as_ref().unwrap().number, "88887777");
    }

    #[test]
    fn nameless_record_yields_no_party() {
        assert!(PartyRecord::default().to_party().is_none());
    }
}
