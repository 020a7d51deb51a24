use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Free,
    Occupied,
}

#[derive(Clone, Debug, Serialize)]
pub struct MarkRoom {
    pub room_id: u32,
    pub status: RoomStatus,
    pub notes: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwapRequestDraft {
    pub original_timetable_id: u32,
    pub proposed_day: String,
    pub proposed_start_time: String,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwapRejection {
    pub reason: String,
}

/// Leave request body; dates are `YYYY-MM-DD`
#[derive(Clone, Debug, Serialize)]
pub struct LeaveRequestDraft {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct AdminNotes {
    pub admin_notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveDecision {
    Approve,
    Reject,
}

#[derive(Clone, Debug, Serialize)]
pub struct BulkLeaveAction {
    pub action: LeaveDecision,
    pub request_ids: Vec<u32>,
    pub admin_notes: String,
}

/// Filters for the admin leave-request listing
#[derive(Clone, Debug, Serialize)]
pub struct LeaveRequestQuery {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
}

impl Default for LeaveRequestQuery {
    fn default() -> Self {
        Self {
            status: "pending".to_string(),
            department: None,
            leave_type: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusQuery {
    pub status: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_roles: Option<String>,
    /// ISO-8601 timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk_leave_action_shape() {
        let action = BulkLeaveAction {
            action: LeaveDecision::Reject,
            request_ids: vec![1, 2],
            admin_notes: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "reject", "request_ids": [1, 2], "admin_notes": ""})
        );
    }

    #[test]
    fn test_leave_query_defaults_to_pending() {
        let query = LeaveRequestQuery::default();
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "status=pending");
    }

    #[test]
    fn test_mark_room_status_lowercase() {
        let body = MarkRoom {
            room_id: 4,
            status: RoomStatus::Occupied,
            notes: String::new(),
        };
        assert_eq!(serde_json::to_value(&body).unwrap()["status"], "occupied");
    }
}
