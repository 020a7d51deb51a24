use crate::api::client::ApiClient;
use crate::core::error::ApiResult;
use crate::models::timetable::{TimeSlot, TimetableFilters, TimetableSlot, STANDARD_TIME_SLOTS};
use crate::utils::query::with_query;
use serde_json::Value;

impl ApiClient {
    /// Raw `/get_timetable` payload; unset filters are left out of the query
    pub async fn get_timetable(&self, filters: &TimetableFilters) -> ApiResult<Value> {
        self.get(&with_query("/get_timetable", filters)?).await
    }

    /// Same call, decoded into slots whatever envelope the backend used
    pub async fn timetable_slots(&self, filters: &TimetableFilters) -> ApiResult<Vec<TimetableSlot>> {
        self.get_list(&with_query("/get_timetable", filters)?).await
    }

    pub fn standard_time_slots(&self) -> &'static [TimeSlot] {
        &STANDARD_TIME_SLOTS
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock_backend::{MockBackend, MockResponse};
    use crate::models::session::Role;
    use crate::models::timetable::{ResourceId, TimetableFilters};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_filters_become_query() {
        let backend = MockBackend::start()
            .await
            .with(Method::GET, "/get_timetable", MockResponse::json(200, json!([])));
        let client = backend.client_as(Role::Admin);

        client.get_timetable(&TimetableFilters::default()).await.unwrap();
        let filters = TimetableFilters::from_pairs(["dept_name=CSE", "year=2", "section="]).unwrap();
        client.get_timetable(&filters).await.unwrap();

        let sent = backend.requests_to("/get_timetable");
        assert_eq!(sent[0].query, None);
        assert_eq!(sent[1].query.as_deref(), Some("dept_name=CSE&year=2"));
    }

    #[tokio::test]
    async fn test_slots_from_any_envelope() {
        let slot = json!({
            "course": "DBMS",
            "faculty": 12,
            "room": 5,
            "day": "Friday",
            "start": "13:00",
            "end": "15:00"
        });
        let backend = MockBackend::start().await.with(
            Method::GET,
            "/get_timetable",
            MockResponse::json(200, json!({"timetable": [slot]})),
        );
        let client = backend.client_as(Role::Student);

        let slots = client
            .timetable_slots(&TimetableFilters::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].teacher, Some(ResourceId::from(12u32)));
        assert_eq!(slots[0].start_time.as_deref(), Some("13:00"));
    }

    #[tokio::test]
    async fn test_null_start_time_does_not_break_the_list() {
        let backend = MockBackend::start().await.with(
            Method::GET,
            "/get_timetable",
            MockResponse::json(
                200,
                json!([
                    {"id": 1, "faculty": "Dr. Rao", "room": "LH-1", "day": "Monday", "start_time": "09:00"},
                    {"id": 2, "faculty": "N/A", "room": "LH-2", "day": "Monday", "start_time": null}
                ]),
            ),
        );
        let client = backend.client_as(Role::Admin);

        let slots = client
            .timetable_slots(&TimetableFilters::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].start_time, None);
        assert_eq!(slots[1].teacher, None);
    }

    #[test]
    fn test_standard_time_slots() {
        let slots = crate::models::timetable::STANDARD_TIME_SLOTS;
        let times: Vec<&str> = slots.iter().map(|s| s.time).collect();
        assert_eq!(times, vec!["09:00", "11:00", "13:00", "15:00"]);
    }
}
