//! Static Hacienda reference catalogs: CABYS codes, measurement units,
//! and the territorial (canton/district/neighborhood) tables.

pub mod cabys;
pub mod locations;
pub mod units;

pub use cabys::{CabysEntry, find_cabys, is_valid_cabys_shape};
pub use locations::{canton_name, district_name, neighborhood_name, province_name};
pub use units::{DEFAULT_UNIT, is_known_unit_code};
