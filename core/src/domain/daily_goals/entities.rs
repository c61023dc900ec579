use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

/// Target-related fields of one goal, passed through untouched.
pub type GoalDescriptor = serde_json::Map<String, serde_json::Value>;

/// Per-user goals keyed by nutrition component, in the order the profile stores them.
pub type NutritionGoals = IndexMap<String, GoalDescriptor>;

/// Goals with their computed `actual` totals, keyed like [`NutritionGoals`].
pub type DailyGoals = IndexMap<String, DailyGoal>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionItem {
    pub component: String,
    pub value: f64,
}

impl NutritionItem {
    pub fn new(component: impl Into<String>, value: f64) -> Self {
        Self {
            component: component.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub nutrition: Vec<NutritionItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodEntry {
    pub user_id: String,
    pub logged_at: Option<NaiveDateTime>,
    /// `None` when the stored payload is missing or its nutrition list is not an array.
    pub nutrition_info: Option<NutritionInfo>,
}

impl FoodEntry {
    pub fn new(
        user_id: impl Into<String>,
        logged_at: NaiveDateTime,
        nutrition: Vec<NutritionItem>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            logged_at: Some(logged_at),
            nutrition_info: Some(NutritionInfo { nutrition }),
        }
    }

    pub fn without_nutrition(user_id: impl Into<String>, logged_at: NaiveDateTime) -> Self {
        Self {
            user_id: user_id.into(),
            logged_at: Some(logged_at),
            nutrition_info: None,
        }
    }
}

/// Projection of a user profile row onto its nutrition goals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfileGoals {
    pub nutrition_goals: Option<NutritionGoals>,
}

const ACTUAL_FIELD: &str = "actual";

/// Serializes as the goal fields with `actual` set to the computed total.
/// `actual` takes the place of a stored `actual` field, or comes last.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyGoal {
    pub goal: GoalDescriptor,
    pub actual: f64,
}

impl Serialize for DailyGoal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let stored_actual = self.goal.contains_key(ACTUAL_FIELD);
        let len = self.goal.len() + usize::from(!stored_actual);
        let mut map = serializer.serialize_map(Some(len))?;

        for (field, value) in &self.goal {
            if field == ACTUAL_FIELD {
                map.serialize_entry(field, &Actual(self.actual))?;
            } else {
                map.serialize_entry(field, value)?;
            }
        }
        if !stored_actual {
            map.serialize_entry(ACTUAL_FIELD, &Actual(self.actual))?;
        }

        map.end()
    }
}

// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole totals are written as JSON integers so `7.0` reads back as `7`.
struct Actual(f64);

impl Serialize for Actual {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyGoalsRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub goals: DailyGoals,
}
