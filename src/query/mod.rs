//! Filter construction for review queries

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document, doc};

use crate::config::QueryConfig;

/// Build the review filter for a query
///
/// Exact match on `appId`, `store` and `lang`, and an inclusive range on
/// `date` from `start_date` to `end_date`.
pub fn build_review_filter(query: &QueryConfig) -> Document {
    doc! {
        "appId": query.app_id.as_str(),
        "store": query.store.as_str(),
        "lang": query.lang.as_str(),
        "date": {
            "$gte": to_bson_datetime(&query.start_date),
            "$lte": to_bson_datetime(&query.end_date),
        },
    }
}

/// Convert a chrono UTC timestamp to a BSON datetime (millisecond precision)
pub fn to_bson_datetime(dt: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_query() -> QueryConfig {
        QueryConfig {
            app_id: "com.example.app".to_string(),
            store: "google_play".to_string(),
            lang: "pt".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        }
    }

    #[test]
    fn test_build_review_filter() {
        let filter = build_review_filter(&sample_query());
        let start = bson::DateTime::from_millis(1_704_067_200_000);
        let end = bson::DateTime::from_millis(1_706_745_599_000);

        assert_eq!(
            filter,
            doc! {
                "appId": "com.example.app",
                "store": "google_play",
                "lang": "pt",
                "date": { "$gte": start, "$lte": end },
            }
        );
    }

    #[test]
    fn test_range_bounds_are_inclusive_operators() {
        let filter = build_review_filter(&sample_query());
        let range = filter.get_document("date").unwrap();
        let keys: Vec<&str> = range.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["$gte", "$lte"]);
    }

    #[test]
    fn test_to_bson_datetime() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(to_bson_datetime(&dt).timestamp_millis(), 1000);
    }
}
