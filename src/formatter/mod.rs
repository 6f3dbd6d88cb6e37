//! BSON value conversion for tabular output
//!
//! Every document field ends up as a single text cell in the exported CSV.
//! [`CellConverter`] decides how each BSON type is rendered:
//! - scalars as their plain text form (`42`, `true`, `4.5`)
//! - datetimes as RFC 3339 strings
//! - arrays and embedded documents as relaxed extended JSON
//! - null and undefined as an empty cell

mod cell;
mod converter;
mod helpers;

pub use cell::CellConverter;
pub use converter::BsonConverter;
pub use helpers::{binary_to_hex, datetime_to_iso_string};
