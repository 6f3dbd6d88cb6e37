//! Core converter trait for BSON value conversion

use mongodb::bson::Bson;

/// Core trait for BSON value conversion
///
/// Implemented once per output target; the export path only needs text cells.
pub trait BsonConverter {
    /// Output type of the conversion
    type Output;

    /// Convert a BSON value to the output type
    fn convert(&self, value: &Bson) -> Self::Output;

    /// Convert an optional BSON value
    ///
    /// An absent value converts to the output's default.
    fn convert_optional(&self, value: Option<&Bson>) -> Self::Output
    where
        Self::Output: Default,
    {
        value.map(|v| self.convert(v)).unwrap_or_default()
    }
}
