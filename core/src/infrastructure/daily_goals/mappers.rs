use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::daily_goals::{
    entities::{
        DailyGoals, DailyGoalsRecord, FoodEntry, GoalDescriptor, NutritionGoals, NutritionInfo,
        NutritionItem, UserProfileGoals,
    },
    value_objects::TIMESTAMP_FORMAT,
};

/// Row of `food_entries` as returned by `select=*`; unused columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodEntryRow {
    #[serde(default)]
    pub userid: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "nutritionInfo", default)]
    pub nutrition_info: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfileRow {
    #[serde(rename = "nutritionGoals", default)]
    pub nutrition_goals: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DailyGoalsRow<'a> {
    pub user_id: &'a str,
    pub date: String,
    pub goals: &'a DailyGoals,
}

impl From<FoodEntryRow> for FoodEntry {
    fn from(row: FoodEntryRow) -> Self {
        Self {
            user_id: row.userid.unwrap_or_default(),
            logged_at: row.date.as_deref().and_then(parse_timestamp),
            nutrition_info: row.nutrition_info.as_ref().and_then(nutrition_info_from_value),
        }
    }
}

impl From<UserProfileRow> for UserProfileGoals {
    fn from(row: UserProfileRow) -> Self {
        Self {
            nutrition_goals: row.nutrition_goals.and_then(nutrition_goals_from_value),
        }
    }
}

impl<'a> From<&'a DailyGoalsRecord> for DailyGoalsRow<'a> {
    fn from(record: &'a DailyGoalsRecord) -> Self {
        Self {
            user_id: &record.user_id,
            date: record.date.format("%Y-%m-%d").to_string(),
            goals: &record.goals,
        }
    }
}

/// Accepts RFC3339 (normalized to UTC) and timezone-less ISO 8601 timestamps.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Reads `{ "nutrition": [...] }`. A missing or non-array list means no payload;
/// malformed items inside a list are dropped.
pub fn nutrition_info_from_value(value: &Value) -> Option<NutritionInfo> {
    let items = value.get("nutrition")?.as_array()?;

    let nutrition = items
        .iter()
        .filter_map(|item| match NutritionItem::deserialize(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Skipping malformed nutrition item {}: {}", item, e);
                None
            }
        })
        .collect();

    Some(NutritionInfo { nutrition })
}

/// Only a JSON object counts as a goals mapping.
pub fn nutrition_goals_from_value(value: Value) -> Option<NutritionGoals> {
    let Value::Object(goals) = value else {
        return None;
    };

    Some(
        goals
            .into_iter()
            .map(|(component, goal)| {
                let descriptor = match goal {
                    Value::Object(fields) => fields,
                    _ => GoalDescriptor::new(),
                };
                (component, descriptor)
            })
            .collect(),
    )
}
