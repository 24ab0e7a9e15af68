//! Ordered shape matchers for the upstream response envelopes.
//!
//! Each matcher either recognises its shape and returns the interesting part
//! of the payload, or reports no match. Callers try them in order and stop at
//! the first match; later shapes are never consulted once one matches.

use serde_json::Value;

use crate::json::path;

/// Where the array of list entries lives in a list payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEnvelope {
    /// `[ .. ]`
    Bare,
    /// `{ "items": [ .. ] }`
    Items,
    /// `{ "data": { "items": [ .. ] } }`
    DataItems,
    /// `{ "data": [ .. ] }`
    Data,
}

impl ListEnvelope {
    pub const ALL: [ListEnvelope; 4] = [Self::Bare, Self::Items, Self::DataItems, Self::Data];

    /// The entries of `json`, if it has this shape.
    pub fn entries(self, json: &Value) -> Option<&[Value]> {
        let candidate = match self {
            Self::Bare => Some(json),
            Self::Items => json.get("items"),
            Self::DataItems => path(json, "data.items"),
            Self::Data => json.get("data"),
        };
        candidate?.as_array().map(Vec::as_slice)
    }

    /// The first envelope that matches `json`, with its entries.
    pub fn detect(json: &Value) -> Option<(Self, &[Value])> {
        Self::ALL.into_iter().find_map(|envelope| envelope.entries(json).map(|entries| (envelope, entries)))
    }
}

/// Where the movie record lives inside a detail payload's container.
///
/// The container is `.data` when that is an object, otherwise the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEnvelope {
    /// `{ "movie": { .. } }`
    Movie,
    /// `{ "item": { .. } }`
    Item,
    /// The container is the movie record itself.
    Container,
}

/// Fields that make an object recognisable as a title record.
const IDENTIFYING_FIELDS: [&str; 6] = ["slug", "name", "title", "origin_name", "_id", "id"];

impl DetailEnvelope {
    pub const ALL: [DetailEnvelope; 3] = [Self::Movie, Self::Item, Self::Container];

    /// The object holding the movie record and (usually) the episode list.
    pub fn container(json: &Value) -> Option<&Value> {
        match json.get("data") {
            Some(data) if data.is_object() => Some(data),
            _ => Some(json).filter(|root| root.is_object()),
        }
    }

    /// The movie record within `container`, if it has this shape.
    ///
    /// A bare container only counts when it carries an identifying field;
    /// otherwise an error envelope such as `{"status": "error"}` would pass
    /// for an empty title.
    pub fn record(self, container: &Value) -> Option<&Value> {
        match self {
            Self::Movie => container.get("movie").filter(|v| v.is_object()),
            Self::Item => container.get("item").filter(|v| v.is_object()),
            Self::Container => {
                Some(container).filter(|c| IDENTIFYING_FIELDS.iter().any(|f| c.get(f).is_some_and(crate::json::truthy)))
            },
        }
    }

    /// The first envelope that locates a movie record, with the record.
    pub fn detect(container: &Value) -> Option<(Self, &Value)> {
        Self::ALL.into_iter().find_map(|envelope| envelope.record(container).map(|record| (envelope, record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!([1]), Some(ListEnvelope::Bare))]
    #[case(json!({"items": [1]}), Some(ListEnvelope::Items))]
    #[case(json!({"data": {"items": [1]}}), Some(ListEnvelope::DataItems))]
    #[case(json!({"data": [1]}), Some(ListEnvelope::Data))]
    #[case(json!({"items": {"not": "array"}, "data": [1]}), Some(ListEnvelope::Data))]
    #[case(json!({"status": "success"}), None)]
    #[case(json!("nope"), None)]
    fn test_list_envelope_detection(#[case] json: Value, #[case] expected: Option<ListEnvelope>) {
        assert_eq!(ListEnvelope::detect(&json).map(|(envelope, _)| envelope), expected);
    }

    #[test]
    fn test_list_envelope_first_match_wins() {
        let json = json!({"items": [1], "data": {"items": [2, 3]}});
        let (envelope, entries) = ListEnvelope::detect(&json).unwrap();
        assert_eq!(envelope, ListEnvelope::Items);
        assert_eq!(entries, &[json!(1)]);
    }

    #[rstest]
    #[case(json!({"movie": {"slug": "a"}}), Some(DetailEnvelope::Movie))]
    #[case(json!({"data": {"item": {"slug": "a"}}}), Some(DetailEnvelope::Item))]
    #[case(json!({"data": {"slug": "a"}}), Some(DetailEnvelope::Container))]
    #[case(json!({"slug": "a", "episodes": []}), Some(DetailEnvelope::Container))]
    #[case(json!({"movie": "broken", "name": "Fallback"}), Some(DetailEnvelope::Container))]
    #[case(json!({"status": "error", "message": "not found"}), None)]
    #[case(json!([{"slug": "a"}]), None)]
    #[case(json!(null), None)]
    fn test_detail_envelope_detection(#[case] json: Value, #[case] expected: Option<DetailEnvelope>) {
        let detected = DetailEnvelope::container(&json).and_then(DetailEnvelope::detect).map(|(envelope, _)| envelope);
        assert_eq!(detected, expected);
    }
}
