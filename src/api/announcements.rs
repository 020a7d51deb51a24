use crate::api::client::ApiClient;
use crate::core::error::ApiResult;
use crate::models::requests::{AnnouncementDraft, ChatMessage};
use serde_json::Value;

impl ApiClient {
    pub async fn announcements(&self) -> ApiResult<Value> {
        self.get("/api/announcements").await
    }

    pub async fn create_announcement(&self, draft: &AnnouncementDraft) -> ApiResult<Value> {
        self.post("/api/announcements", draft).await
    }

    pub async fn send_chat_message(&self, message: &str) -> ApiResult<Value> {
        let body = ChatMessage {
            message: message.to_string(),
        };
        self.post("/api/chatbot", &body).await
    }

    pub async fn chat_history(&self) -> ApiResult<Value> {
        self.get("/api/chat/conversation").await
    }

    pub async fn clear_chat_history(&self) -> ApiResult<Value> {
        self.trigger("/api/chat/clear").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock_backend::{MockBackend, MockResponse};
    use crate::models::requests::AnnouncementDraft;
    use crate::models::session::Role;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_announcement_omits_unset_fields() {
        let backend = MockBackend::start().await.with(
            Method::POST,
            "/api/announcements",
            MockResponse::json(201, json!({"id": 1})),
        );
        let client = backend.client_as(Role::Admin);

        client
            .create_announcement(&AnnouncementDraft {
                title: "Exams".to_string(),
                message: "Midterms start Monday".to_string(),
                priority: Some("high".to_string()),
                target_roles: None,
                expires_at: None,
            })
            .await
            .unwrap();

        assert_eq!(
            backend.requests_to("/api/announcements")[0].json(),
            json!({"title": "Exams", "message": "Midterms start Monday", "priority": "high"})
        );
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let backend = MockBackend::start()
            .await
            .with(
                Method::POST,
                "/api/chatbot",
                MockResponse::json(200, json!({"response": "Room LH-1 is free"})),
            )
            .with(Method::POST, "/api/chat/clear", MockResponse::json(200, json!({"cleared": true})));
        let client = backend.client_as(Role::Student);

        let reply = client.send_chat_message("Is LH-1 free?").await.unwrap().unwrap();
        assert_eq!(reply["response"], "Room LH-1 is free");
        client.clear_chat_history().await.unwrap();

        assert_eq!(
            backend.requests_to("/api/chatbot")[0].json(),
            json!({"message": "Is LH-1 free?"})
        );
        assert_eq!(backend.requests_to("/api/chat/clear").len(), 1);
    }
}
