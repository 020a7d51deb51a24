use crate::models::timetable::TimetableSlot;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Dropdown value meaning "no restriction"
pub const ALL: &str = "all";

/// Text search plus dropdown selections over backend records
///
/// The search term matches case-insensitively as a substring of any of the
/// search fields; every dropdown must match its field exactly.
#[derive(Clone, Debug, Default)]
pub struct ListFilter {
    search: String,
    search_fields: Vec<String>,
    selections: Vec<(String, String)>,
}

impl ListFilter {
    pub fn new<I, S>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search: String::new(),
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            selections: Vec::new(),
        }
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = term.trim().to_lowercase();
        self
    }

    /// Restrict `field` to `value`; [`ALL`] or an empty value clears it
    pub fn select(mut self, field: &str, value: &str) -> Self {
        self.selections.retain(|(f, _)| f != field);
        if !value.is_empty() && value != ALL {
            self.selections.push((field.to_string(), value.to_string()));
        }
        self
    }

    pub fn matches(&self, record: &Value) -> bool {
        let search_hit = self.search.is_empty()
            || self.search_fields.iter().any(|field| {
                field_text(record, field).is_some_and(|text| text.to_lowercase().contains(&self.search))
            });

        search_hit
            && self
                .selections
                .iter()
                .all(|(field, value)| field_text(record, field).as_deref() == Some(value.as_str()))
    }

    pub fn apply<'a>(&self, records: &'a [Value]) -> Vec<&'a Value> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sorted distinct values of `field`, for populating a dropdown
pub fn distinct_values(records: &[Value], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| field_text(r, field))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One day's classes in start-time order, unscheduled ones last
pub fn slots_for_day<'a>(slots: &'a [TimetableSlot], day: &str) -> Vec<&'a TimetableSlot> {
    let mut classes: Vec<&TimetableSlot> = slots
        .iter()
        .filter(|s| s.day.eq_ignore_ascii_case(day))
        .collect();
    classes.sort_by(|a, b| match (&a.start_time, &b.start_time) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    classes
}

fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rooms() -> Vec<Value> {
        vec![
            json!({"name": "LH-1", "building": "Main", "type": "lecture", "capacity": 120}),
            json!({"name": "Lab-2", "building": "Annex", "type": "lab", "capacity": 40}),
            json!({"name": "LH-3", "building": "Annex", "type": "lecture", "capacity": 60}),
        ]
    }

    fn names(records: Vec<&Value>) -> Vec<&str> {
        records.iter().filter_map(|r| r["name"].as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_fields() {
        let rooms = rooms();
        let filter = ListFilter::new(["name", "building"]).search("annex");
        assert_eq!(names(filter.apply(&rooms)), vec!["Lab-2", "LH-3"]);

        let filter = ListFilter::new(["name", "building"]).search("lh");
        assert_eq!(names(filter.apply(&rooms)), vec!["LH-1", "LH-3"]);
    }

    #[test]
    fn test_dropdowns_combine_with_search() {
        let rooms = rooms();
        let filter = ListFilter::new(["name"])
            .search("l")
            .select("type", "lecture")
            .select("building", "Annex");
        assert_eq!(names(filter.apply(&rooms)), vec!["LH-3"]);
    }

    #[test]
    fn test_all_clears_a_dropdown() {
        let rooms = rooms();
        let filter = ListFilter::new(["name"])
            .select("type", "lab")
            .select("type", ALL);
        assert_eq!(filter.apply(&rooms).len(), 3);
    }

    #[test]
    fn test_numeric_fields_compare_as_text() {
        let rooms = rooms();
        let filter = ListFilter::new(["name"]).select("capacity", "40");
        assert_eq!(names(filter.apply(&rooms)), vec!["Lab-2"]);
    }

    #[test]
    fn test_distinct_values() {
        assert_eq!(distinct_values(&rooms(), "building"), vec!["Annex", "Main"]);
        assert!(distinct_values(&rooms(), "missing").is_empty());
    }

    #[test]
    fn test_slots_for_day() {
        let slots: Vec<TimetableSlot> = serde_json::from_value(json!([
            {"day": "Monday", "start_time": "11:00"},
            {"day": "Tuesday", "start_time": "09:00"},
            {"day": "monday", "start_time": "09:00"},
            {"day": "Monday", "start_time": null}
        ]))
        .unwrap();

        let monday = slots_for_day(&slots, "Monday");
        let starts: Vec<&str> = monday.iter().filter_map(|s| s.start_time.as_deref()).collect();
        assert_eq!(starts, vec!["09:00", "11:00"]);
        assert_eq!(monday.len(), 3);
        assert!(monday[2].start_time.is_none());
    }
}
