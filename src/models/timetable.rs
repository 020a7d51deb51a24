use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Teacher or room reference; the backend sends names for some endpoints
/// and numeric ids for others
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `N/A` or blank: the backend's stand-in for an unstaffed or unroomed slot
    pub fn is_placeholder(&self) -> bool {
        let id = self.0.trim();
        id.is_empty() || id.eq_ignore_ascii_case("n/a")
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId(value.to_string())
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ResourceId(s),
            Raw::Int(n) => ResourceId(n.to_string()),
            Raw::Float(n) => ResourceId(n.to_string()),
        })
    }
}

/// One scheduled class as returned by the timetable endpoints
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimetableSlot {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default, alias = "faculty", deserialize_with = "assigned")]
    pub teacher: Option<ResourceId>,
    #[serde(default, deserialize_with = "assigned")]
    pub room: Option<ResourceId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub day: String,
    #[serde(default, alias = "start", deserialize_with = "non_blank")]
    pub start_time: Option<String>,
    #[serde(default, alias = "end")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
}

impl TimetableSlot {
    /// Same day, same start, same end; an unscheduled slot matches nothing
    pub fn same_time(&self, other: &TimetableSlot) -> bool {
        self.is_scheduled()
            && self.day == other.day
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }

    /// Has both a day and a start time
    pub fn is_scheduled(&self) -> bool {
        !self.day.is_empty() && self.start_time.is_some()
    }

    pub fn time_label(&self) -> String {
        let start = self.start_time.as_deref().unwrap_or("unscheduled");
        match &self.end_time {
            Some(end) => format!("{} {}-{}", self.day, start, end),
            None => format!("{} {}", self.day, start),
        }
    }
}

fn assigned<'de, D>(deserializer: D) -> Result<Option<ResourceId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ResourceId>::deserialize(deserializer)?.filter(|id| !id.is_placeholder()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Query filters accepted by `/get_timetable`
#[derive(Clone, Debug, Default, Serialize)]
pub struct TimetableFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl TimetableFilters {
    /// Build from `key=value` pairs; unknown keys are rejected
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut filters = TimetableFilters::default();

        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.trim() {
                "dept_name" | "department" => filters.dept_name = Some(value.to_string()),
                "year" => {
                    filters.year = Some(
                        value
                            .parse()
                            .map_err(|_| format!("year must be a number, got '{}'", value))?,
                    )
                }
                "section" => filters.section = Some(value.to_string()),
                other => return Err(format!("unknown timetable filter '{}'", other)),
            }
        }

        Ok(filters)
    }
}

/// `/teacher/timetable` payload
#[derive(Clone, Debug, Deserialize)]
pub struct TeacherTimetable {
    pub timetable: Vec<TimetableSlot>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// `/student/timetable` payload
#[derive(Clone, Debug, Deserialize)]
pub struct StudentTimetable {
    pub timetable: Vec<TimetableSlot>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub id: u8,
    pub time: &'static str,
    pub label: &'static str,
}

/// The four daily teaching slots the backend schedules into
pub const STANDARD_TIME_SLOTS: [TimeSlot; 4] = [
    TimeSlot { id: 1, time: "09:00", label: "09:00 AM" },
    TimeSlot { id: 2, time: "11:00", label: "11:00 AM" },
    TimeSlot { id: 3, time: "13:00", label: "01:00 PM" },
    TimeSlot { id: 4, time: "15:00", label: "03:00 PM" },
];
