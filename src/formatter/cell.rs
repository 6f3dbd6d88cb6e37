use mongodb::bson::Bson;

use super::converter::BsonConverter;
use super::helpers::{binary_to_hex, datetime_to_iso_string};

/// Converts BSON values to CSV cell text
#[derive(Debug, Default, Clone, Copy)]
pub struct CellConverter;

impl CellConverter {
    pub fn new() -> Self {
        Self
    }
}

impl BsonConverter for CellConverter {
    type Output = String;

    fn convert(&self, value: &Bson) -> String {
        match value {
            Bson::String(s) => s.clone(),
            Bson::Int32(n) => n.to_string(),
            Bson::Int64(n) => n.to_string(),
            // Debug keeps the fraction on whole values (4.0, not 4)
            Bson::Double(f) => format!("{f:?}"),
            Bson::Boolean(b) => b.to_string(),
            Bson::Null | Bson::Undefined => String::new(),
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::DateTime(dt) => datetime_to_iso_string(dt),
            Bson::Decimal128(d) => d.to_string(),
            Bson::Array(_) | Bson::Document(_) => value.clone().into_relaxed_extjson().to_string(),
            Bson::Binary(bin) => binary_to_hex(bin),
            Bson::RegularExpression(regex) => format!("/{}/{}", regex.pattern, regex.options),
            Bson::Timestamp(ts) => format!("Timestamp({}, {})", ts.time, ts.increment),
            Bson::Symbol(s) | Bson::JavaScriptCode(s) => s.clone(),
            Bson::MinKey => String::from("MinKey"),
            Bson::MaxKey => String::from("MaxKey"),
            other => format!("{:?}", other),
        }
    }
}
