use serde::{Deserialize, Serialize};

/// Weekly recurring appointment. `day_of_week`: 0 = Sunday … 6 = Saturday.
/// Times are zero-padded `HH:MM`, so string order is time order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A slot before it has been given an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTimeSlot {
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: u8,
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub subject: Option<String>,
    pub location: Option<String>,
}

/// Partial update: only `Some` fields are merged into the slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSlotPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub day_of_week: Option<u8>,
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub subject: Option<String>,
    pub location: Option<String>,
}

impl TimeSlotPatch {
    pub fn is_empty(&self) -> bool {
        *self == TimeSlotPatch::default()
    }

    pub(crate) fn merge_into(self, slot: &mut TimeSlot) {
        if let Some(v) = self.start_time {
            slot.start_time = v;
        }
        if let Some(v) = self.end_time {
            slot.end_time = v;
        }
        if let Some(v) = self.day_of_week {
            slot.day_of_week = v;
        }
        // a new student replaces the name as well, even with none known
        if let Some(v) = self.student_id {
            slot.student_id = Some(v);
            slot.student_name = self.student_name;
        } else if let Some(v) = self.student_name {
            slot.student_name = Some(v);
        }
        if let Some(v) = self.subject {
            slot.subject = Some(v);
        }
        if let Some(v) = self.location {
            slot.location = Some(v);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(deserialize_with = "crate::models::qr::de_text")]
    pub id: String,
    pub name: String,
}

impl Student {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}
