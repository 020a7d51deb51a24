use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct NewDepartment {
    pub dept_name: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FacultyInput {
    pub faculty_name: String,
    pub dept_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnavailabilityInput {
    pub day: String,
    pub start_time: String,
}

/// Course create/update body. A fixed course pins day, slot and room.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CourseInput {
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub dept_name: String,
    pub year: u32,
    pub semester: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_fixed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_room_id: Option<u32>,
}

impl CourseInput {
    /// Checks the backend would otherwise reject with a 400
    pub fn validate(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("type", &self.course_type),
            ("dept_name", &self.dept_name),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if !missing.is_empty() {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        }

        if self.is_fixed
            && (self.fixed_day.is_none() || self.fixed_slot.is_none() || self.fixed_room_id.is_none())
        {
            return Err(
                "For a fixed class, 'fixed_day', 'fixed_slot', and 'fixed_room_id' are required."
                    .to_string(),
            );
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RoomInput {
    pub name: String,
    pub capacity: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resources: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Room {
    #[serde(alias = "room_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub resources: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionInput {
    pub dept_name: String,
    pub year: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hours_per_day: Option<u32>,
}

/// Query filters shared by section and allocation listings
#[derive(Clone, Debug, Default, Serialize)]
pub struct DepartmentYear {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct StudentInput {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BulkStudentDelete {
    pub student_ids: Vec<u32>,
}
