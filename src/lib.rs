//! # facturacr
//!
//! Costa Rican electronic invoicing (Hacienda XML 4.4): document
//! generation, XAdES-BES signing, and submission to the Hacienda
//! reception API, with the full draft → sent → accepted/rejected/error
//! document lifecycle.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Amounts are rendered with round-half-up (commercial) rounding at the
//! precision Hacienda mandates for each field.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use facturacr::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("FE-0001", NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
//!     .emitter(PartyBuilder::new("Comercial Tica S.A.")
//!         .identification(IdentificationType::Juridica, "3101123456")
//!         .build())
//!     .receiver(PartyBuilder::new("Cliente Ejemplo")
//!         .identification(IdentificationType::Fisica, "109870654")
//!         .build())
//!     .sale_condition(SaleCondition::Contado)
//!     .add_payment(PaymentEntry::new(PaymentMethod::Efectivo))
//!     .add_line(LineItemBuilder::new("Servicio profesional", dec!(1), dec!(50000))
//!         .tax(TaxType::Iva, TaxRateCode::TarifaGeneral, dec!(13))
//!         .build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.totals.unwrap().grand_total, dec!(56500));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, code tables, validation, clave/consecutive numbering |
//! | `xml` | Hacienda 4.4 XML document generation |
//! | `firma` | XAdES-BES enveloped signature (PKCS#12 + RSA-SHA256) |
//! | `api` | Token/reception/identification HTTP client |
//! | `lifecycle` | Electronic document record, state machine, orchestration |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod catalog;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "firma")]
pub mod firma;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "lifecycle")]
pub mod document;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
