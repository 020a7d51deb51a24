// Pre-dashboard endpoints without the /admin prefix, still served by older backends

use crate::api::client::ApiClient;
use crate::core::error::ApiResult;
use crate::models::catalog::{CourseInput, DepartmentYear, FacultyInput, NewDepartment, RoomInput, SectionInput};
use crate::utils::query::with_query;
use serde::Serialize;
use serde_json::Value;

impl ApiClient {
    pub async fn legacy_departments(&self) -> ApiResult<Value> {
        self.get("/get_departments").await
    }

    pub async fn legacy_add_department(&self, dept_name: &str) -> ApiResult<Value> {
        let body = NewDepartment {
            dept_name: dept_name.to_string(),
        };
        self.post("/add_department", &body).await
    }

    pub async fn legacy_faculty(&self) -> ApiResult<Value> {
        self.get("/get_faculty").await
    }

    pub async fn legacy_add_faculty(&self, faculty: &FacultyInput) -> ApiResult<Value> {
        self.post("/add_faculty", faculty).await
    }

    pub async fn legacy_courses(&self, filter: &DepartmentYear) -> ApiResult<Value> {
        self.get(&with_query("/get_courses", filter)?).await
    }

    pub async fn legacy_add_course(&self, course: &CourseInput) -> ApiResult<Value> {
        self.post("/add_course", course).await
    }

    pub async fn legacy_rooms(&self) -> ApiResult<Value> {
        self.get("/get_rooms").await
    }

    pub async fn legacy_add_room(&self, room: &RoomInput) -> ApiResult<Value> {
        self.post("/add_room", room).await
    }

    pub async fn legacy_sections(&self, filter: &DepartmentYear) -> ApiResult<Value> {
        self.get(&with_query("/get_sections", filter)?).await
    }

    pub async fn legacy_add_section(&self, section: &SectionInput) -> ApiResult<Value> {
        self.post("/add_section", section).await
    }

    pub async fn legacy_course_allocations(&self, filter: &DepartmentYear) -> ApiResult<Value> {
        self.get(&with_query("/get_course_allocations", filter)?).await
    }

    pub async fn legacy_set_course_allocation<T: Serialize + ?Sized>(
        &self,
        allocation: &T,
    ) -> ApiResult<Value> {
        self.post("/set_course_allocation", allocation).await
    }

    pub async fn legacy_generate_timetable(&self) -> ApiResult<Value> {
        self.trigger("/generate_timetable").await
    }
}
