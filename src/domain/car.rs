//! Car record, write payloads, and search filter.

use crate::domain::filter::{
    parse_member, parse_non_negative, parse_take, reject_unknown_fields, SortOrder, DEFAULT_TAKE,
};
use crate::domain::validate;
use crate::error::Issue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload; id and timestamps are storage-assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCar {
    pub name: String,
}

/// Validated update payload. Timestamps are storage-managed; the update
/// statement refreshes `updated_at` itself.
#[derive(Clone, Debug, PartialEq)]
pub struct CarUpdate {
    pub id: Uuid,
    pub name: String,
}

pub fn parse_new_car(body: &Value) -> Result<NewCar, Vec<Issue>> {
    let mut issues = Vec::new();
    let Some(map) = validate::as_object(body, &mut issues) else {
        return Err(issues);
    };
    let name = validate::required_string(map, "name", 1, 255, &mut issues);
    match name {
        Some(name) if issues.is_empty() => Ok(NewCar { name }),
        _ => Err(issues),
    }
}

pub fn parse_car_update(body: &Value) -> Result<CarUpdate, Vec<Issue>> {
    let mut issues = Vec::new();
    let Some(map) = validate::as_object(body, &mut issues) else {
        return Err(issues);
    };
    let id = validate::required_uuid(map, "id", &mut issues);
    let name = validate::required_string(map, "name", 1, 255, &mut issues);
    match (id, name) {
        (Some(id), Some(name)) if issues.is_empty() => Ok(CarUpdate { id, name }),
        _ => Err(issues),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarSortColumn {
    Name,
    CreatedAt,
    UpdatedAt,
}

impl CarSortColumn {
    pub fn column(&self) -> &'static str {
        match self {
            CarSortColumn::Name => "name",
            CarSortColumn::CreatedAt => "created_at",
            CarSortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for CarSortColumn {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CarSortColumn::Name),
            "createdAt" => Ok(CarSortColumn::CreatedAt),
            "updatedAt" => Ok(CarSortColumn::UpdatedAt),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarFilter {
    pub query: Option<String>,
    pub skip: i64,
    pub take: i64,
    pub sort_by: CarSortColumn,
    pub sort_order: SortOrder,
}

const KNOWN_FIELDS: &[&str] = &["query", "skip", "take", "sortBy", "sortOrder"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarFilterDraft {
    pub query: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<CarSortColumn>,
    pub sort_order: Option<SortOrder>,
}

impl CarFilterDraft {
    pub fn coerce(params: &HashMap<String, String>) -> Result<Self, Vec<Issue>> {
        let mut issues = Vec::new();
        reject_unknown_fields(params, KNOWN_FIELDS, &mut issues);

        let draft = CarFilterDraft {
            query: params.get("query").cloned(),
            skip: params
                .get("skip")
                .and_then(|raw| parse_non_negative("skip", raw, &mut issues)),
            take: params
                .get("take")
                .and_then(|raw| parse_take("take", raw, &mut issues)),
            sort_by: params
                .get("sortBy")
                .and_then(|raw| parse_member("sortBy", raw, &mut issues)),
            sort_order: params
                .get("sortOrder")
                .and_then(|raw| parse_member("sortOrder", raw, &mut issues)),
        };

        if issues.is_empty() {
            Ok(draft)
        } else {
            Err(issues)
        }
    }

    pub fn with_defaults(self) -> CarFilter {
        CarFilter {
            query: self.query,
            skip: self.skip.unwrap_or(0),
            take: self.take.unwrap_or(DEFAULT_TAKE),
            sort_by: self.sort_by.unwrap_or(CarSortColumn::UpdatedAt),
            sort_order: self.sort_order.unwrap_or(SortOrder::Desc),
        }
    }
}

impl CarFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, Vec<Issue>> {
        CarFilterDraft::coerce(params).map(CarFilterDraft::with_defaults)
    }
}

impl Default for CarFilter {
    fn default() -> Self {
        CarFilterDraft::default().with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_input_applies_all_defaults() {
        let filter = CarFilter::from_query(&params(&[])).unwrap();
        assert_eq!(
            filter,
            CarFilter {
                query: None,
                skip: 0,
                take: DEFAULT_TAKE,
                sort_by: CarSortColumn::UpdatedAt,
                sort_order: SortOrder::Desc,
            }
        );
    }

    #[test]
    fn unknown_parameter_fails_the_whole_filter() {
        assert!(CarFilter::from_query(&params(&[("statuses", "active")])).is_err());
    }

    #[test]
    fn new_car_requires_a_name() {
        assert!(parse_new_car(&json!({})).is_err());
        assert!(parse_new_car(&json!({"name": ""})).is_err());
        assert_eq!(
            parse_new_car(&json!({"name": "Tesla"})).unwrap(),
            NewCar {
                name: "Tesla".into()
            }
        );
    }

    #[test]
    fn car_update_requires_id_and_name() {
        let id = Uuid::new_v4();
        let ok = parse_car_update(&json!({"id": id.to_string(), "name": "Tesla"})).unwrap();
        assert_eq!(ok.id, id);
        assert!(parse_car_update(&json!({"name": "Tesla"})).is_err());
        assert!(parse_car_update(&json!({"id": "not-a-uuid", "name": "Tesla"})).is_err());
    }
}
