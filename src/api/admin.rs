use crate::api::client::ApiClient;
use crate::core::error::{ApiError, ApiResult};
use crate::models::catalog::{
    BulkStudentDelete, CourseInput, DepartmentYear, FacultyInput, NewDepartment, Room, RoomInput,
    SectionInput, StudentInput, UnavailabilityInput,
};
use crate::models::requests::{
    AdminNotes, BulkLeaveAction, LeaveDecision, LeaveRequestQuery, StatusQuery, SwapRejection,
};
use crate::utils::query::{item_path, with_query};
use serde::Serialize;
use serde_json::Value;

const DEPARTMENTS: &str = "/admin/departments";
const FACULTY: &str = "/admin/faculty";
const STUDENTS: &str = "/admin/students";
const SECTIONS: &str = "/admin/sections";
const COURSES: &str = "/admin/courses";
const ROOMS: &str = "/admin/rooms";
const SWAP_REQUESTS: &str = "/admin/swap-requests";
const LEAVE_REQUESTS: &str = "/admin/leave-requests";

/// Admin dashboard endpoints
impl ApiClient {
    pub async fn departments(&self) -> ApiResult<Value> {
        self.get(DEPARTMENTS).await
    }

    pub async fn add_department(&self, dept_name: &str) -> ApiResult<Value> {
        let body = NewDepartment {
            dept_name: dept_name.to_string(),
        };
        self.post(DEPARTMENTS, &body).await
    }

    pub async fn faculty(&self) -> ApiResult<Value> {
        self.get(FACULTY).await
    }

    pub async fn add_faculty(&self, faculty: &FacultyInput) -> ApiResult<Value> {
        self.post(FACULTY, faculty).await
    }

    pub async fn update_faculty(&self, faculty_id: u32, faculty: &FacultyInput) -> ApiResult<Value> {
        self.put(&item_path(FACULTY, faculty_id), faculty).await
    }

    pub async fn delete_faculty(&self, faculty_id: u32) -> ApiResult<Value> {
        self.delete(&item_path(FACULTY, faculty_id)).await
    }

    pub async fn faculty_unavailability(&self, faculty_id: u32) -> ApiResult<Value> {
        self.get(&format!("{}/unavailability", item_path(FACULTY, faculty_id)))
            .await
    }

    pub async fn add_faculty_unavailability(
        &self,
        faculty_id: u32,
        slot: &UnavailabilityInput,
    ) -> ApiResult<Value> {
        self.post(&format!("{}/unavailability", item_path(FACULTY, faculty_id)), slot)
            .await
    }

    pub async fn delete_faculty_unavailability(&self, slot_id: u32) -> ApiResult<Value> {
        self.delete(&item_path("/admin/unavailability", slot_id)).await
    }

    pub async fn courses(&self) -> ApiResult<Value> {
        self.get(COURSES).await
    }

    pub async fn add_course(&self, course: &CourseInput) -> ApiResult<Value> {
        course.validate().map_err(ApiError::Request)?;
        self.post(COURSES, course).await
    }

    pub async fn update_course(&self, course_id: u32, course: &CourseInput) -> ApiResult<Value> {
        course.validate().map_err(ApiError::Request)?;
        self.put(&item_path(COURSES, course_id), course).await
    }

    pub async fn delete_course(&self, course_id: u32) -> ApiResult<Value> {
        self.delete(&item_path(COURSES, course_id)).await
    }

    pub async fn rooms(&self) -> ApiResult<Vec<Room>> {
        self.get_list(ROOMS).await
    }

    pub async fn add_room(&self, room: &RoomInput) -> ApiResult<Value> {
        self.post(ROOMS, room).await
    }

    pub async fn sections(&self, filter: &DepartmentYear) -> ApiResult<Value> {
        self.get(&with_query(SECTIONS, filter)?).await
    }

    pub async fn add_section(&self, section: &SectionInput) -> ApiResult<Value> {
        self.post(SECTIONS, section).await
    }

    pub async fn students(&self) -> ApiResult<Value> {
        self.get(STUDENTS).await
    }

    pub async fn student(&self, student_id: u32) -> ApiResult<Value> {
        self.get(&item_path(STUDENTS, student_id)).await
    }

    pub async fn add_student(&self, student: &StudentInput) -> ApiResult<Value> {
        self.post(STUDENTS, student).await
    }

    pub async fn update_student(&self, student_id: u32, student: &StudentInput) -> ApiResult<Value> {
        self.put(&item_path(STUDENTS, student_id), student).await
    }

    pub async fn delete_student(&self, student_id: u32) -> ApiResult<Value> {
        self.delete(&item_path(STUDENTS, student_id)).await
    }

    pub async fn delete_students(&self, student_ids: &[u32]) -> ApiResult<Value> {
        let body = BulkStudentDelete {
            student_ids: student_ids.to_vec(),
        };
        self.post("/admin/students/delete_bulk", &body).await
    }

    pub async fn course_allocations(&self, filter: &DepartmentYear) -> ApiResult<Value> {
        self.get(&with_query("/admin/allocations", filter)?).await
    }

    pub async fn set_course_allocation<T: Serialize + ?Sized>(
        &self,
        allocation: &T,
    ) -> ApiResult<Value> {
        self.post("/admin/allocations", allocation).await
    }

    /// Ask the backend to run its solver; this can take a while
    pub async fn generate_timetable(&self) -> ApiResult<Value> {
        self.trigger("/admin/generate_timetable").await
    }

    pub async fn users(&self) -> ApiResult<Value> {
        self.get("/admin/users").await
    }

    pub async fn register_user<T: Serialize + ?Sized>(&self, user: &T) -> ApiResult<Value> {
        self.post("/admin/users/register", user).await
    }

    pub async fn swap_requests(&self, status: &str) -> ApiResult<Value> {
        let query = StatusQuery {
            status: status.to_string(),
        };
        self.get(&with_query(SWAP_REQUESTS, &query)?).await
    }

    pub async fn approve_swap_request(&self, request_id: u32) -> ApiResult<Value> {
        self.trigger(&format!("{}/approve", item_path(SWAP_REQUESTS, request_id)))
            .await
    }

    pub async fn reject_swap_request(&self, request_id: u32, reason: &str) -> ApiResult<Value> {
        let body = SwapRejection {
            reason: reason.to_string(),
        };
        self.post(&format!("{}/reject", item_path(SWAP_REQUESTS, request_id)), &body)
            .await
    }

    pub async fn leave_requests(&self, query: &LeaveRequestQuery) -> ApiResult<Value> {
        self.get(&with_query(LEAVE_REQUESTS, query)?).await
    }

    pub async fn leave_request_details(&self, request_id: u32) -> ApiResult<Value> {
        self.get(&item_path(LEAVE_REQUESTS, request_id)).await
    }

    pub async fn decide_leave_request(
        &self,
        request_id: u32,
        decision: LeaveDecision,
        admin_notes: &str,
    ) -> ApiResult<Value> {
        let action = match decision {
            LeaveDecision::Approve => "approve",
            LeaveDecision::Reject => "reject",
        };
        let body = AdminNotes {
            admin_notes: admin_notes.to_string(),
        };
        self.post(&format!("{}/{}", item_path(LEAVE_REQUESTS, request_id), action), &body)
            .await
    }

    pub async fn leave_stats(&self) -> ApiResult<Value> {
        self.get("/admin/leave-requests/stats").await
    }

    pub async fn bulk_leave_action(&self, action: &BulkLeaveAction) -> ApiResult<Value> {
        self.post("/admin/leave-requests/bulk-action", action).await
    }
}
