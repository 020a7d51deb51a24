use crate::api::client::ApiClient;
use crate::api::envelope::decode;
use crate::core::error::ApiResult;
use crate::models::requests::{MarkRoom, RoomStatus, SwapRequestDraft};
use crate::models::timetable::{StudentTimetable, TeacherTimetable};
use serde_json::Value;

impl ApiClient {
    pub async fn teacher_timetable(&self) -> ApiResult<TeacherTimetable> {
        match self.get("/teacher/timetable").await? {
            Some(value) => decode(value).map(Some),
            None => Ok(None),
        }
    }

    pub async fn mark_room(&self, room_id: u32, status: RoomStatus, notes: &str) -> ApiResult<Value> {
        let body = MarkRoom {
            room_id,
            status,
            notes: notes.to_string(),
        };
        self.post("/teacher/mark_room", &body).await
    }

    pub async fn room_status(&self) -> ApiResult<Value> {
        self.get("/rooms/status").await
    }

    pub async fn my_swap_requests(&self) -> ApiResult<Value> {
        self.get("/teacher/swap-requests").await
    }

    pub async fn create_swap_request(&self, draft: &SwapRequestDraft) -> ApiResult<Value> {
        self.post("/teacher/swap-requests", draft).await
    }

    pub async fn student_timetable(&self) -> ApiResult<StudentTimetable> {
        match self.get("/student/timetable").await? {
            Some(value) => decode(value).map(Some),
            None => Ok(None),
        }
    }

    pub async fn student_profile(&self) -> ApiResult<Value> {
        self.get("/student/profile").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock_backend::{MockBackend, MockResponse};
    use crate::core::error::ApiError;
    use crate::models::requests::{RoomStatus, SwapRequestDraft};
    use crate::models::session::Role;
    use crate::models::timetable::ResourceId;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_teacher_timetable_is_typed() {
        let backend = MockBackend::start().await.with(
            Method::GET,
            "/teacher/timetable",
            MockResponse::json(
                200,
                json!({
                    "teacher_name": "Dr. Rao",
                    "department": "CSE",
                    "timetable": [{
                        "id": 11,
                        "course": "Compilers",
                        "section": "A",
                        "room": "LH-2",
                        "day": "Monday",
                        "start_time": "09:00",
                        "end_time": "11:00"
                    }]
                }),
            ),
        );
        let client = backend.client_as(Role::Teacher);

        let timetable = client.teacher_timetable().await.unwrap().unwrap();
        assert_eq!(timetable.teacher_name.as_deref(), Some("Dr. Rao"));
        assert_eq!(timetable.timetable.len(), 1);
        assert_eq!(timetable.timetable[0].room, Some(ResourceId::from("LH-2")));
    }

    #[tokio::test]
    async fn test_teacher_timetable_without_session_is_none() {
        let backend = MockBackend::start().await.with(
            Method::GET,
            "/teacher/timetable",
            MockResponse::json(401, json!({"error": "Token is missing"})),
        );
        let client = backend.client_as(Role::Teacher);

        assert!(client.teacher_timetable().await.unwrap().is_none());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_malformed_timetable_is_unexpected() {
        let backend = MockBackend::start().await.with(
            Method::GET,
            "/student/timetable",
            MockResponse::json(200, json!({"message": "No timetable yet"})),
        );
        let client = backend.client_as(Role::Student);

        let err = client.student_timetable().await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_mark_room_and_swap_request_bodies() {
        let backend = MockBackend::start()
            .await
            .with(Method::POST, "/teacher/mark_room", MockResponse::json(200, json!({"ok": true})))
            .with(
                Method::POST,
                "/teacher/swap-requests",
                MockResponse::json(201, json!({"id": 5})),
            );
        let client = backend.client_as(Role::Teacher);

        client.mark_room(3, RoomStatus::Occupied, "").await.unwrap();
        client
            .create_swap_request(&SwapRequestDraft {
                original_timetable_id: 11,
                proposed_day: "Tuesday".to_string(),
                proposed_start_time: "11:00".to_string(),
                reason: "conference".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            backend.requests_to("/teacher/mark_room")[0].json(),
            json!({"room_id": 3, "status": "occupied", "notes": ""})
        );
        assert_eq!(
            backend.requests_to("/teacher/swap-requests")[0].json()["proposed_day"],
            "Tuesday"
        );
    }
}
