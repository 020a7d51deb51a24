use crate::api::client::ApiClient;
use crate::core::error::ApiResult;
use crate::models::requests::{LeaveRequestDraft, StatusQuery};
use crate::utils::query::{item_path, with_query};
use serde_json::Value;

const LEAVE_REQUEST: &str = "/leave/request";

/// Leave requests filed by the signed-in teacher
impl ApiClient {
    pub async fn submit_leave_request(&self, draft: &LeaveRequestDraft) -> ApiResult<Value> {
        self.post(LEAVE_REQUEST, draft).await
    }

    /// `status = None` lists every request regardless of state
    pub async fn my_leave_requests(&self, status: Option<&str>) -> ApiResult<Value> {
        let path = match status {
            Some(status) => with_query(
                "/leave/my-requests",
                &StatusQuery {
                    status: status.to_string(),
                },
            )?,
            None => "/leave/my-requests".to_string(),
        };
        self.get(&path).await
    }

    pub async fn leave_request(&self, request_id: u32) -> ApiResult<Value> {
        self.get(&item_path(LEAVE_REQUEST, request_id)).await
    }

    pub async fn update_leave_request(
        &self,
        request_id: u32,
        draft: &LeaveRequestDraft,
    ) -> ApiResult<Value> {
        self.put(&item_path(LEAVE_REQUEST, request_id), draft).await
    }

    pub async fn cancel_leave_request(&self, request_id: u32) -> ApiResult<Value> {
        self.delete(&item_path(LEAVE_REQUEST, request_id)).await
    }
}
