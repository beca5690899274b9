use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u16,
    pub location: String,
    #[serde(default)]
    pub objectives: Option<String>,
}

impl TrainingSession {
    pub fn new(date: NaiveDate, time: NaiveTime, duration_minutes: u16, location: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            date,
            time,
            duration_minutes,
            location: location.into(),
            objectives: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
