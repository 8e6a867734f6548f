//! Async API gateway: one logical operation, one HTTP round-trip.
//!
//! # Design
//! `StudentGateway` pairs the stateless `StudentClient` with a `Transport`.
//! The controller depends on the `StudentApi` trait rather than the gateway
//! so it can be driven by an in-memory fake in tests. Every call is
//! single-shot: no retry, no timeout, no cancellation.

use async_trait::async_trait;

use crate::client::StudentClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::Student;

#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ApiError>;
    async fn get(&self, id: i64) -> Result<Student, ApiError>;
    async fn create(&self, student: &Student) -> Result<Student, ApiError>;
    async fn update(&self, id: i64, student: &Student) -> Result<Student, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct StudentGateway<T> {
    client: StudentClient,
    transport: T,
}

impl StudentGateway<ReqwestTransport> {
    /// Gateway over `reqwest` for the configured origin.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            StudentClient::new(&config.origin),
            ReqwestTransport::new(config)?,
        ))
    }
}

impl<T: Transport> StudentGateway<T> {
    pub fn new(client: StudentClient, transport: T) -> Self {
        Self { client, transport }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn log_failure<V>(operation: &'static str, result: Result<V, ApiError>) -> Result<V, ApiError> {
    result.inspect_err(|e| tracing::warn!(operation, error = %e, "student API call failed"))
}

#[async_trait]
impl<T: Transport> StudentApi for StudentGateway<T> {
    async fn list(&self) -> Result<Vec<Student>, ApiError> {
        let request = self.client.build_list_students();
        let result = async { self.client.parse_list_students(self.send(request).await?) }.await;
        log_failure("list", result)
    }

    async fn get(&self, id: i64) -> Result<Student, ApiError> {
        let request = self.client.build_get_student(id);
        let result = async { self.client.parse_get_student(self.send(request).await?) }.await;
        log_failure("get", result)
    }

    async fn create(&self, student: &Student) -> Result<Student, ApiError> {
        let result = async {
            let request = self.client.build_create_student(student)?;
            self.client.parse_create_student(self.send(request).await?)
        }
        .await;
        log_failure("create", result)
    }

    async fn update(&self, id: i64, student: &Student) -> Result<Student, ApiError> {
        let result = async {
            let request = self.client.build_update_student(id, student)?;
            let updated = self.client.parse_update_student(self.send(request).await?)?;
            // A bodiless acknowledgement means the server stored what was sent.
            Ok::<_, ApiError>(updated.unwrap_or_else(|| Student {
                id,
                ..student.clone()
            }))
        }
        .await;
        log_failure("update", result)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let request = self.client.build_delete_student(id);
        let result = async { self.client.parse_delete_student(self.send(request).await?) }.await;
        log_failure("delete", result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;

    /// Replays canned responses and records every request it sees.
    struct CannedTransport {
        responses: Mutex<Vec<Result<HttpResponse, ApiError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn gateway(responses: Vec<Result<HttpResponse, ApiError>>) -> StudentGateway<CannedTransport> {
        StudentGateway::new(
            StudentClient::new("http://api.test"),
            CannedTransport::new(responses),
        )
    }

    #[tokio::test]
    async fn list_issues_get_on_collection() {
        let gw = gateway(vec![ok(200, r#"[{"id":1,"name":"A"}]"#)]);
        let students = gw.list().await.unwrap();
        assert_eq!(students.len(), 1);

        let seen = gw.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].path, "http://api.test/api/Student");
    }

    #[tokio::test]
    async fn network_failure_surfaces_as_network_error() {
        let gw = gateway(vec![Err(ApiError::Network("connection refused".to_string()))]);
        let err = gw.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn non_2xx_surfaces_as_server_error() {
        let gw = gateway(vec![ok(503, "unavailable")]);
        let err = gw.delete(4).await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn update_without_body_echoes_sent_record() {
        let gw = gateway(vec![ok(204, "")]);
        let sent = Student {
            id: 5,
            name: "Edited".to_string(),
            ..Student::empty()
        };
        let updated = gw.update(5, &sent).await.unwrap();
        assert_eq!(updated, sent);

        let seen = gw.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Put);
        assert_eq!(seen[0].path, "http://api.test/api/Student/5");
    }

    #[tokio::test]
    async fn create_returns_server_record() {
        let gw = gateway(vec![ok(201, r#"{"id":12,"name":"New"}"#)]);
        let created = gw
            .create(&Student {
                name: "New".to_string(),
                ..Student::empty()
            })
            .await
            .unwrap();
        assert_eq!(created.id, 12);

        let seen = gw.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn create_answered_without_assigned_id_fails() {
        let gw = gateway(vec![ok(201, r#"{"id":0,"name":"Ghost"}"#)]);
        let err = gw
            .create(&Student {
                name: "Ghost".to_string(),
                ..Student::empty()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[tokio::test]
    async fn get_not_found() {
        let gw = gateway(vec![ok(404, "")]);
        assert!(gw.get(99).await.unwrap_err().is_not_found());
    }
}
