//! Stateless HTTP request builder and response parser for the student API.
//!
//! # Design
//! `StudentClient` holds only the resource URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Any 2xx status counts as success.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Student;

/// Path of the student collection relative to the API origin.
pub const STUDENT_RESOURCE_PATH: &str = "/api/Student";

/// Synchronous, stateless client for the student API.
#[derive(Debug, Clone)]
pub struct StudentClient {
    base_url: String,
}

impl StudentClient {
    /// `origin` is scheme, host and port, e.g. `https://localhost:7233`.
    pub fn new(origin: &str) -> Self {
        Self {
            base_url: format!("{}{STUDENT_RESOURCE_PATH}", origin.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_students(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, self.base_url.clone())
    }

    pub fn build_get_student(&self, id: i64) -> HttpRequest {
        self.bodyless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_student(&self, student: &Student) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Post, self.base_url.clone(), student)
    }

    pub fn build_update_student(&self, id: i64, student: &Student) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Put, self.item_url(id), student)
    }

    pub fn build_delete_student(&self, id: i64) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_students(&self, response: HttpResponse) -> Result<Vec<Student>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// A created record must carry a server-assigned id.
    pub fn parse_create_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        check_status(&response)?;
        let created: Student = decode(&response.body)?;
        if created.is_new() {
            return Err(ApiError::Deserialization(
                "created student has no server-assigned id".to_string(),
            ));
        }
        Ok(created)
    }

    /// Returns `None` when the server acknowledged the update without a body.
    pub fn parse_update_student(&self, response: HttpResponse) -> Result<Option<Student>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        decode(&response.body).map(Some)
    }

    pub fn parse_delete_student(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn bodyless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json_body(
        &self,
        method: HttpMethod,
        path: String,
        student: &Student,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(student).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-2xx status codes to `ApiError::Server`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StudentClient {
        StudentClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn sample() -> Student {
        Student {
            id: 0,
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            mobile: "5550100".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            address1: "4 Lake View".to_string(),
            address2: String::new(),
        }
    }

    #[test]
    fn build_list_students_produces_correct_request() {
        let req = client().build_list_students();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/Student");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_student_targets_item() {
        let req = client().build_get_student(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/Student/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_student_posts_json_to_collection() {
        let req = client().build_create_student(&sample()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/Student");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 0);
        assert_eq!(body["name"], "Meera");
        assert_eq!(body["city"], "Pune");
    }

    #[test]
    fn build_update_student_puts_to_item() {
        let student = Student { id: 5, ..sample() };
        let req = client().build_update_student(5, &student).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/Student/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 5);
    }

    #[test]
    fn build_delete_student_has_no_body() {
        let req = client().build_delete_student(9);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/Student/9");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = StudentClient::new("https://localhost:7233/");
        assert_eq!(client.base_url(), "https://localhost:7233/api/Student");
    }

    #[test]
    fn parse_list_students_keeps_server_order() {
        let body = r#"[{"id":3,"name":"C"},{"id":1,"name":"A"},{"id":2,"name":"B"}]"#;
        let students = client().parse_list_students(response(200, body)).unwrap();
        let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn parse_list_students_bad_json() {
        let err = client().parse_list_students(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_get_student_not_found() {
        let err = client().parse_get_student(response(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_create_student_accepts_any_2xx() {
        let body = r#"{"id":11,"name":"Meera"}"#;
        assert_eq!(client().parse_create_student(response(201, body)).unwrap().id, 11);
        assert_eq!(client().parse_create_student(response(200, body)).unwrap().id, 11);
    }

    #[test]
    fn parse_create_student_rejects_unassigned_id() {
        let missing = client().parse_create_student(response(201, r#"{"name":"Ghost"}"#));
        assert!(matches!(missing, Err(ApiError::Deserialization(_))));

        let zero = client().parse_create_student(response(201, r#"{"id":0,"name":"Ghost"}"#));
        assert!(matches!(zero, Err(ApiError::Deserialization(_))));
    }

    #[test]
    fn parse_create_student_server_error() {
        let err = client()
            .parse_create_student(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_update_student_with_body() {
        let body = r#"{"id":5,"name":"Renamed"}"#;
        let updated = client().parse_update_student(response(200, body)).unwrap();
        assert_eq!(updated.unwrap().name, "Renamed");
    }

    #[test]
    fn parse_update_student_without_body() {
        assert!(client().parse_update_student(response(204, "")).unwrap().is_none());
    }

    #[test]
    fn parse_delete_student_ignores_body() {
        assert!(client().parse_delete_student(response(204, "")).is_ok());
        assert!(client().parse_delete_student(response(200, r#"{"id":1}"#)).is_ok());
    }

    #[test]
    fn parse_delete_student_not_found() {
        let err = client().parse_delete_student(response(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }
}
