use crate::api::client::{ApiClient, RequestOptions};
use crate::core::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Collections the backend accepts CSV bulk uploads for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    Departments,
    Faculty,
    Sections,
    Students,
}

impl UploadKind {
    pub fn path(&self) -> &'static str {
        match self {
            UploadKind::Departments => "/upload/departments",
            UploadKind::Faculty => "/upload/faculty",
            UploadKind::Sections => "/upload/sections",
            UploadKind::Students => "/upload/students",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_start_matches("/upload/"))
    }
}

impl ApiClient {
    /// Send CSV contents as the multipart field `file`
    pub async fn upload_csv(
        &self,
        kind: UploadKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ApiResult<Value> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let form = Form::new().part("file", part);

        info!(kind = %kind, file = file_name, "Uploading CSV");
        self.request(kind.path(), RequestOptions::multipart(form)).await
    }

    pub async fn upload_csv_file(&self, kind: UploadKind, path: &Path) -> ApiResult<Value> {
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Request(format!("Failed to read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.csv", kind));

        self.upload_csv(kind, &file_name, contents).await
    }

    /// Have the backend regenerate its seed CSV files
    pub async fn generate_csvs(&self) -> ApiResult<Value> {
        self.trigger("/generate_csvs").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_backend::{MockBackend, MockResponse};
    use crate::models::session::Role;
    use reqwest::Method;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_upload_is_multipart_without_json_content_type() {
        let backend = MockBackend::start().await.with(
            Method::POST,
            "/upload/faculty",
            MockResponse::json(200, json!({"inserted": 2})),
        );
        let client = backend.client_as(Role::Admin);

        let reply = client
            .upload_csv(UploadKind::Faculty, "faculty.csv", b"name,dept\nRao,CSE\n".to_vec())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply["inserted"], 2);

        let sent = &backend.requests_to("/upload/faculty")[0];
        let content_type = sent.header("content-type").unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        assert_eq!(sent.header("x-access-token").as_deref(), Some("admin-token"));

        let body = String::from_utf8_lossy(&sent.body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"faculty.csv\""));
        assert!(body.contains("Rao,CSE"));
    }

    #[tokio::test]
    async fn test_upload_from_disk() {
        let backend = MockBackend::start().await.with(
            Method::POST,
            "/upload/students",
            MockResponse::text(200, "Uploaded"),
        );
        let client = backend.client_as(Role::Admin);

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "username,year").unwrap();
        writeln!(file, "s101,2").unwrap();

        let reply = client
            .upload_csv_file(UploadKind::Students, file.path())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply, json!({"message": "Uploaded"}));
    }

    #[tokio::test]
    async fn test_missing_file_is_request_error() {
        let backend = MockBackend::start().await;
        let client = backend.client_as(Role::Admin);

        let err = client
            .upload_csv_file(UploadKind::Sections, Path::new("/nonexistent/sections.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_kind_paths() {
        assert_eq!(UploadKind::Departments.path(), "/upload/departments");
        assert_eq!(UploadKind::Students.to_string(), "students");
    }
}
