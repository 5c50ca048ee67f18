//! Client-facing query specification
//!
//! This is the reduced, stable surface callers use instead of the engine's
//! Query DSL. Every section is optional; a missing section is simply left
//! out of the translated query rather than treated as an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Root query specification
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuerySpec {
    /// Full-text clause over one or more fields
    #[serde(default)]
    pub text_query: Option<TextQuery>,

    /// Non-scoring filters
    #[serde(default)]
    pub filters: Option<Filters>,

    /// Highlight the text-query fields in the response
    #[serde(default)]
    pub highlight: bool,

    /// Pagination
    #[serde(default)]
    pub page: Option<Page>,

    /// Sort order; the field name `"geo"` is a reserved token that expands
    /// to a geo-distance sort borrowing the geo filter's center
    #[serde(default)]
    pub sort: Option<Vec<SortSpec>>,

    /// Restrict the engine response to these fields
    #[serde(default)]
    pub return_fields: Option<Vec<String>>,
}

/// Full-text search over an ordered set of fields
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextQuery {
    pub fields: Vec<String>,
    pub value: String,
    /// `true` requires all terms to match (operator `and`), `false` any
    #[serde(default)]
    pub exact: bool,
}

/// Filter sections; each map entry becomes one filter-context clause
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Filters {
    /// Exact-term equality
    #[serde(default)]
    pub equal: HashMap<String, Value>,

    /// Set membership
    #[serde(default, rename = "in")]
    pub r#in: HashMap<String, Vec<Value>>,

    /// Bounded ranges; bounds pass through unchanged
    #[serde(default)]
    pub range: HashMap<String, RangeSpec>,

    /// Distance from a coordinate
    #[serde(default)]
    pub geo: Option<GeoFilter>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RangeSpec {
    #[serde(default)]
    pub gte: Option<Value>,
    #[serde(default)]
    pub lte: Option<Value>,
    #[serde(default)]
    pub gt: Option<Value>,
    #[serde(default)]
    pub lt: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoFilter {
    /// Name of the geo_point field
    pub field: String,
    pub lat: f64,
    pub lon: f64,
    /// e.g. `"5km"`; defaults to 5km when omitted
    #[serde(default)]
    pub distance_radius: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// 1-based; page 1 and absent are equivalent
    #[serde(default)]
    pub current_page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SortSpec {
    pub field: String,
    /// `"desc"` or `"asc"`; anything else falls back to ascending
    #[serde(default)]
    pub direction: String,
}

impl RangeSpec {
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none() && self.gt.is_none() && self.lt.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal() {
        let spec: QuerySpec = serde_json::from_value(json!({})).unwrap();
        assert!(spec.text_query.is_none());
        assert!(spec.filters.is_none());
        assert!(!spec.highlight);
        assert!(spec.page.is_none());
        assert!(spec.sort.is_none());
        assert!(spec.return_fields.is_none());
    }

    #[test]
    fn test_deserialize_text_query() {
        let spec: QuerySpec = serde_json::from_value(json!({
            "text_query": {"fields": ["name_cn", "name_en"], "value": "机场"}
        }))
        .unwrap();
        let tq = spec.text_query.unwrap();
        assert_eq!(tq.fields, vec!["name_cn", "name_en"]);
        assert_eq!(tq.value, "机场");
        assert!(!tq.exact);
    }

    #[test]
    fn test_deserialize_filters() {
        let spec: QuerySpec = serde_json::from_value(json!({
            "filters": {
                "equal": {"city_id": 1},
                "in": {"hotel_category_id": [123, 124]},
                "range": {"hotel_star": {"gte": 4, "lte": 5}},
                "geo": {"field": "location", "lat": 22.11, "lon": 11.22}
            }
        }))
        .unwrap();
        let filters = spec.filters.unwrap();
        assert_eq!(filters.equal["city_id"], json!(1));
        assert_eq!(filters.r#in["hotel_category_id"].len(), 2);
        assert_eq!(filters.range["hotel_star"].gte, Some(json!(4)));
        let geo = filters.geo.unwrap();
        assert_eq!(geo.field, "location");
        assert!(geo.distance_radius.is_none());
    }

    #[test]
    fn test_deserialize_page_and_sort() {
        let spec: QuerySpec = serde_json::from_value(json!({
            "page": {"current_page": 2, "page_size": 10},
            "sort": [
                {"field": "geo", "direction": "asc"},
                {"field": "hotel_product_id", "direction": "desc"}
            ]
        }))
        .unwrap();
        let page = spec.page.unwrap();
        assert_eq!(page.current_page, Some(2));
        assert_eq!(page.page_size, Some(10));
        let sort = spec.sort.unwrap();
        assert_eq!(sort[0].field, "geo");
        assert_eq!(sort[1].direction, "desc");
    }

    #[test]
    fn test_range_spec_is_empty() {
        assert!(RangeSpec::default().is_empty());
        let spec = RangeSpec {
            gt: Some(json!(10)),
            ..Default::default()
        };
        assert!(!spec.is_empty());
    }
}
