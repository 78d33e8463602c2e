//! XAdES-BES enveloped signatures for Hacienda documents.
//!
//! Hacienda hands out signing credentials as a PKCS#12 bundle protected by
//! a numeric pin. [`sign_xml`] extracts the RSA key and certificate from
//! the bundle, builds the `ds:Signature` block with the XAdES qualifying
//! properties Hacienda expects (RSA-SHA256, SHA-256 digests, the fixed
//! signature policy), and splices it into the document before the closing
//! root tag.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, FixedOffset};
use p12::PFX;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::core::FacturaError;

/// Signature policy every Hacienda 4.4 document references.
const POLICY_URI: &str = "https://www.hacienda.go.cr/ATV/ComprobanteElectronico/docs/esquemas/2016/v4.4/Resolucion_General_sobre_disposiciones_tecnicas_comprobantes_electronicos_para_efectos_tributarios.pdf";
/// SHA-256 digest of the policy document, base64.
const POLICY_DIGEST: &str = "0h7Q3dFHhu0bHbcZEgVc07cEcDlquUeG08HG6Iototo=";

const DSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";
const XADES_NS: &str = "http://uri.etsi.org/01903/v1.3.2#";

const SIGNATURE_ID: &str = "Signature-1";
const SIGNED_PROPERTIES_ID: &str = "SignedProperties-1";
const KEY_INFO_ID: &str = "KeyInfo-1";

/// A PKCS#12 credential bundle as distributed by Hacienda (`.p12` file).
#[derive(Clone)]
pub struct CertificateBundle {
    der: Vec<u8>,
}

impl CertificateBundle {
    pub fn from_der(der: Vec<u8>) -> Self {
        Self { der }
    }

    /// Bundles are often stored base64-encoded in configuration backends.
    pub fn from_base64(encoded: &str) -> Result<Self, FacturaError> {
        let der = BASE64
            .decode(encoded.trim())
            .map_err(|e| FacturaError::Firma(format!("invalid base64 certificate: {e}")))?;
        Ok(Self::from_der(der))
    }
}

impl std::fmt::Debug for CertificateBundle {
    // Never print key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("der_len", &self.der.len())
            .finish()
    }
}

/// Sign an unsigned Hacienda document, returning the signed XML.
///
/// The input must be a complete document whose root element has no
/// signature yet. The signature block is inserted immediately before the
/// closing root tag.
pub fn sign_xml(
    xml: &str,
    bundle: &CertificateBundle,
    pin: &str,
    signing_time: DateTime<FixedOffset>,
) -> Result<String, FacturaError> {
    let (key, cert_der) = extract_credentials(bundle, pin)?;

    let doc_digest = sha256_b64(xml.as_bytes());
    let cert_b64 = BASE64.encode(&cert_der);
    let cert_digest = sha256_b64(&cert_der);

    let signed_properties = signed_properties_xml(signing_time, &cert_digest);
    let properties_digest = sha256_b64(signed_properties.as_bytes());

    let key_info = key_info_xml(&cert_b64);
    let key_info_digest = sha256_b64(key_info.as_bytes());

    let signed_info = signed_info_xml(&doc_digest, &key_info_digest, &properties_digest);
    let signature_value = rsa_sha256(&key, signed_info.as_bytes())?;

    let signature = format!(
        "<ds:Signature xmlns:ds=\"{DSIG_NS}\" Id=\"{SIGNATURE_ID}\">\
         {signed_info}\
         <ds:SignatureValue>{signature_value}</ds:SignatureValue>\
         {key_info}\
         <ds:Object>\
         <xades:QualifyingProperties xmlns:xades=\"{XADES_NS}\" Target=\"#{SIGNATURE_ID}\">\
         {signed_properties}\
         </xades:QualifyingProperties>\
         </ds:Object>\
         </ds:Signature>"
    );

    insert_before_closing_root(xml, &signature)
}

fn extract_credentials(
    bundle: &CertificateBundle,
    pin: &str,
) -> Result<(RsaPrivateKey, Vec<u8>), FacturaError> {
    let pfx = PFX::parse(&bundle.der)
        .map_err(|e| FacturaError::Firma(format!("invalid PKCS#12 bundle: {e:?}")))?;

    let keys = pfx
        .key_bags(pin)
        .map_err(|e| FacturaError::Firma(format!("cannot decrypt key bag: {e:?}")))?;
    let key_der = keys
        .first()
        .ok_or_else(|| FacturaError::Firma("bundle contains no private key".into()))?;

    let certs = pfx
        .cert_bags(pin)
        .map_err(|e| FacturaError::Firma(format!("cannot decrypt certificate bag: {e:?}")))?;
    let cert_der = certs
        .first()
        .cloned()
        .ok_or_else(|| FacturaError::Firma("bundle contains no certificate".into()))?;

    let key = RsaPrivateKey::from_pkcs8_der(key_der)
        .or_else(|_| RsaPrivateKey::from_pkcs1_der(key_der))
        .map_err(|e| FacturaError::Firma(format!("unsupported private key encoding: {e}")))?;

    Ok((key, cert_der))
}

fn rsa_sha256(key: &RsaPrivateKey, data: &[u8]) -> Result<String, FacturaError> {
    let digest = Sha256::digest(data);
    let signature = key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| FacturaError::Firma(format!("RSA signing failed: {e}")))?;
    Ok(BASE64.encode(signature))
}

fn sha256_b64(data: &[u8]) -> String {
    BASE64.encode(Sha256::digest(data))
}

fn signed_info_xml(doc_digest: &str, key_info_digest: &str, properties_digest: &str) -> String {
    format!(
        "<ds:SignedInfo>\
         <ds:CanonicalizationMethod Algorithm=\"http://www.w3.org/TR/2001/REC-xml-c14n-20010315\"/>\
         <ds:SignatureMethod Algorithm=\"http://www.w3.org/2001/04/xmldsig-more#rsa-sha256\"/>\
         <ds:Reference Id=\"Reference-0\" URI=\"\">\
         <ds:Transforms>\
         <ds:Transform Algorithm=\"http://www.w3.org/2000/09/xmldsig#enveloped-signature\"/>\
         </ds:Transforms>\
         <ds:DigestMethod Algorithm=\"http://www.w3.org/2001/04/xmlenc#sha256\"/>\
         <ds:DigestValue>{doc_digest}</ds:DigestValue>\
         </ds:Reference>\
         <ds:Reference URI=\"#{KEY_INFO_ID}\">\
         <ds:DigestMethod Algorithm=\"http://www.w3.org/2001/04/xmlenc#sha256\"/>\
         <ds:DigestValue>{key_info_digest}</ds:DigestValue>\
         </ds:Reference>\
         <ds:Reference Type=\"http://uri.etsi.org/01903#SignedProperties\" URI=\"#{SIGNED_PROPERTIES_ID}\">\
         <ds:DigestMethod Algorithm=\"http://www.w3.org/2001/04/xmlenc#sha256\"/>\
         <ds:DigestValue>{properties_digest}</ds:DigestValue>\
         </ds:Reference>\
         </ds:SignedInfo>"
    )
}

fn key_info_xml(cert_b64: &str) -> String {
    format!(
        "<ds:KeyInfo Id=\"{KEY_INFO_ID}\">\
         <ds:X509Data>\
         <ds:X509Certificate>{cert_b64}</ds:X509Certificate>\
         </ds:X509Data>\
         </ds:KeyInfo>"
    )
}

fn signed_properties_xml(signing_time: DateTime<FixedOffset>, cert_digest: &str) -> String {
    let time = signing_time.format("%Y-%m-%dT%H:%M:%S%:z");
    format!(
        "<xades:SignedProperties Id=\"{SIGNED_PROPERTIES_ID}\">\
         <xades:SignedSignatureProperties>\
         <xades:SigningTime>{time}</xades:SigningTime>\
         <xades:SigningCertificate>\
         <xades:Cert>\
         <xades:CertDigest>\
         <ds:DigestMethod Algorithm=\"http://www.w3.org/2001/04/xmlenc#sha256\"/>\
         <ds:DigestValue>{cert_digest}</ds:DigestValue>\
         </xades:CertDigest>\
         </xades:Cert>\
         </xades:SigningCertificate>\
         <xades:SignaturePolicyIdentifier>\
         <xades:SignaturePolicyId>\
         <xades:SigPolicyId>\
         <xades:Identifier>{POLICY_URI}</xades:Identifier>\
         </xades:SigPolicyId>\
         <xades:SigPolicyHash>\
         <ds:DigestMethod Algorithm=\"http://www.w3.org/2001/04/xmlenc#sha256\"/>\
         <ds:DigestValue>{POLICY_DIGEST}</ds:DigestValue>\
         </xades:SigPolicyHash>\
         </xades:SignaturePolicyId>\
         </xades:SignaturePolicyIdentifier>\
         </xades:SignedSignatureProperties>\
         </xades:SignedProperties>"
    )
}

fn insert_before_closing_root(xml: &str, signature: &str) -> Result<String, FacturaError> {
    let at = xml
        .rfind("</")
        .ok_or_else(|| FacturaError::Firma("document has no closing root tag".into()))?;
    let mut out = String::with_capacity(xml.len() + signature.len());
    out.push_str(&xml[..at]);
    out.push_str(signature);
    out.push_str(&xml[at..]);
    Ok(out)
}
