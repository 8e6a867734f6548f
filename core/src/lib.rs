//! Client core for the student records API.
//!
//! # Overview
//! A list/form controller keeps an in-memory list of students in sync with a
//! REST collection at `/api/Student`, mutating the list only after the
//! matching request succeeds.
//!
//! # Design
//! - `StudentClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `Transport` is the only place network I/O happens; `ReqwestTransport`
//!   is the production implementation.
//! - `StudentGateway` composes the two behind the async `StudentApi` trait.
//! - `StudentController` owns a `ControllerState` and reconciles it with
//!   `StudentApi` results through pure `begin_*`/`finish_*` transitions.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod http;
pub mod transport;
pub mod types;

pub use client::StudentClient;
pub use config::ClientConfig;
pub use controller::{Confirm, ControllerState, Outcome, StudentController, SubmitAction};
pub use error::ApiError;
pub use gateway::{StudentApi, StudentGateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::Student;
