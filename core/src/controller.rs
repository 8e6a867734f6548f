//! List/form controller: the in-memory record list plus the edit form.
//!
//! # Design
//! All UI state lives in `ControllerState`, and every reconciliation step is
//! a synchronous transition on it: `begin_*` runs before a request is sent,
//! `finish_*` applies the eventual result. The async `StudentController`
//! just strings the two halves around an awaited `StudentApi` call. A caller
//! that wants several requests in flight at once can drive the transitions
//! itself and apply results in arrival order; nothing here serializes them.
//!
//! The list is only ever changed by a `finish_*` transition with an `Ok`
//! result. Failures replace the error message and leave list and form alone.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::gateway::{StudentApi, StudentGateway};
use crate::transport::ReqwestTransport;
use crate::types::Student;

pub const TITLE: &str = "Student Management";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";

pub const LOAD_FAILED: &str = "Failed to load students from API.";
pub const DELETE_FAILED: &str = "Failed to delete student.";
pub const CREATE_FAILED: &str = "Failed to save student.";
pub const UPDATE_FAILED: &str = "Failed to update student.";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What happened to a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded and its result was applied.
    Applied,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The request failed; `error_message` describes it.
    Failed,
}

/// The request a form submission turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    Create(Student),
    Update(i64, Student),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub students: Vec<Student>,
    /// Detached copy bound to the form. Never aliases a list entry.
    pub selected: Student,
    /// Empty when there is nothing to report.
    pub error_message: String,
    pub is_saving: bool,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    pub fn begin_load(&mut self) {
        self.error_message.clear();
    }

    pub fn finish_load(&mut self, result: Result<Vec<Student>, ApiError>) -> Outcome {
        match result {
            Ok(students) => {
                self.students = students;
                Outcome::Applied
            }
            Err(err) => self.fail("loading students", LOAD_FAILED, &err),
        }
    }

    pub fn edit(&mut self, student: &Student) {
        self.selected = student.clone();
    }

    pub fn begin_delete(&mut self) {
        self.error_message.clear();
    }

    pub fn finish_delete(&mut self, id: i64, result: Result<(), ApiError>) -> Outcome {
        match result {
            Ok(()) => {
                self.students.retain(|s| s.id != id);
                if self.selected.id == id {
                    self.selected = Student::empty();
                }
                Outcome::Applied
            }
            Err(err) => self.fail("deleting student", DELETE_FAILED, &err),
        }
    }

    /// Mark the form as saving and decide between create and update.
    pub fn begin_submit(&mut self) -> SubmitAction {
        self.is_saving = true;
        self.error_message.clear();
        if self.selected.is_new() {
            SubmitAction::Create(self.selected.clone())
        } else {
            SubmitAction::Update(self.selected.id, self.selected.clone())
        }
    }

    pub fn finish_submit(&mut self, action: &SubmitAction, result: Result<Student, ApiError>) -> Outcome {
        self.is_saving = false;
        match (action, result) {
            (SubmitAction::Create(_), Ok(created)) => {
                self.students.push(created);
                self.selected = Student::empty();
                Outcome::Applied
            }
            (SubmitAction::Update(id, _), Ok(updated)) => {
                if let Some(entry) = self.students.iter_mut().find(|s| s.id == *id) {
                    *entry = updated;
                }
                self.selected = Student::empty();
                Outcome::Applied
            }
            (SubmitAction::Create(_), Err(err)) => self.fail("creating student", CREATE_FAILED, &err),
            (SubmitAction::Update(..), Err(err)) => self.fail("updating student", UPDATE_FAILED, &err),
        }
    }

    pub fn reset(&mut self) {
        self.selected = Student::empty();
        self.error_message.clear();
    }

    fn fail(&mut self, context: &'static str, message: &str, err: &ApiError) -> Outcome {
        tracing::error!(error = %err, "error {context}");
        self.error_message = message.to_string();
        Outcome::Failed
    }
}

/// Drives `ControllerState` through a `StudentApi`.
pub struct StudentController<A> {
    api: A,
    state: ControllerState,
}

impl StudentController<StudentGateway<ReqwestTransport>> {
    /// Build the production stack for `config` and load the initial list.
    ///
    /// A failed initial load is reported through `error_message`, not as an
    /// `Err`; only an unusable configuration fails here.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut controller = Self::new(StudentGateway::from_config(config)?);
        controller.load_students().await;
        Ok(controller)
    }
}

impl<A: StudentApi> StudentController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ControllerState::new(),
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Form fields are edited in place on the selected record.
    pub fn selected_mut(&mut self) -> &mut Student {
        &mut self.state.selected
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn load_students(&mut self) -> Outcome {
        self.state.begin_load();
        let result = self.api.list().await;
        self.state.finish_load(result)
    }

    pub fn on_edit(&mut self, student: &Student) {
        self.state.edit(student);
    }

    pub async fn on_delete(&mut self, id: i64, confirm: &impl Confirm) -> Outcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return Outcome::Cancelled;
        }
        self.state.begin_delete();
        let result = self.api.delete(id).await;
        self.state.finish_delete(id, result)
    }

    pub async fn on_submit(&mut self) -> Outcome {
        let action = self.state.begin_submit();
        let result = match &action {
            SubmitAction::Create(student) => self.api.create(student).await,
            SubmitAction::Update(id, student) => self.api.update(*id, student).await,
        };
        self.state.finish_submit(&action, result)
    }

    pub fn on_reset(&mut self) {
        self.state.reset();
    }
}
