//! The add-todo form: field rules, per-field state and submission.
//!
//! # Design
//! Every field carries an ordered rule list; the first failing rule decides
//! the message shown. A field shows nothing until it is touched (blurred or
//! edited). Aggregate validity is recomputed from the current values on
//! every change and pushed to subscribers, so the host never has to ask for
//! a full re-check before enabling the submit control.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::notice::{Notice, Route};
use crate::service::TodoService;
use crate::types::{Todo, TodoId};

pub const ADD_FAILED_MESSAGE: &str = "Failed to add the todo";
const ADDED_DURATION: Duration = Duration::from_secs(2);
const ADD_FAILED_DURATION: Duration = Duration::from_secs(5);

const STATUS_VALUES: &[&str] = &["true", "false"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Owner,
    Status,
    Body,
    Category,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Owner, Field::Status, Field::Body, Field::Category];

    pub fn name(self) -> &'static str {
        match self {
            Field::Owner => "owner",
            Field::Status => "status",
            Field::Body => "body",
            Field::Category => "category",
        }
    }

    fn index(self) -> usize {
        match self {
            Field::Owner => 0,
            Field::Status => 1,
            Field::Body => 2,
            Field::Category => 3,
        }
    }

    fn rules(self) -> &'static [(Rule, &'static str)] {
        match self {
            Field::Owner => &[
                (Rule::Required, "Owner's name is required"),
                (Rule::MinLength(2), "Owner's name must be at least 2 characters long"),
                (Rule::MaxLength(100), "Owner's name cannot be more than 100 characters long"),
            ],
            Field::Status => &[
                (Rule::Required, "Status is required"),
                (Rule::OneOf(STATUS_VALUES), "Status must be true or false"),
            ],
            Field::Body => &[
                (Rule::Required, "Body is required"),
                (Rule::MinLength(2), "Body must be at least 2 characters long"),
            ],
            Field::Category => &[
                (Rule::Required, "Category is required"),
                (Rule::MinLength(2), "Category must be at least 2 characters long"),
                (Rule::MaxLength(50), "Category cannot be more than 50 characters long"),
            ],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single validation rule. Lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// The value must equal one of the listed literals.
    OneOf(&'static [&'static str]),
}

impl Rule {
    /// Length and pattern rules pass on an empty value; `Required` reports it.
    pub fn check(&self, value: &str) -> bool {
        match *self {
            Rule::Required => !value.is_empty(),
            _ if value.is_empty() => true,
            Rule::MinLength(min) => value.chars().count() >= min,
            Rule::MaxLength(max) => value.chars().count() <= max,
            Rule::OneOf(allowed) => allowed.contains(&value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FieldError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Untouched,
    Valid,
    Invalid(FieldError),
}

/// Pushed to subscribers after every edit or blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormChange {
    pub field: Field,
    pub state: FieldState,
    pub form_valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormChange)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The todo was stored; show the notice and go to the route.
    Created {
        id: TodoId,
        notice: Notice,
        route: Route,
    },
    /// The store refused or could not be reached; stay on the form.
    Failed { notice: Notice },
    /// The form was not valid, so nothing was sent.
    Rejected(Vec<FieldError>),
}

#[derive(Default)]
pub struct AddTodoForm {
    values: [String; 4],
    touched: [bool; 4],
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for AddTodoForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddTodoForm")
            .field("values", &self.values)
            .field("touched", &self.touched)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AddTodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Edit a field. Marks it touched.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
        self.touch(field);
    }

    pub fn set_status(&mut self, status: bool) {
        self.set_value(Field::Status, status.to_string());
    }

    /// Focus left the field. Marks it touched without changing the value.
    pub fn blur(&mut self, field: Field) {
        self.touch(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched[field.index()]
    }

    /// Run every rule of `field`, in order, and collect the failures.
    pub fn errors(&self, field: Field) -> Vec<FieldError> {
        let value = self.value(field);
        field
            .rules()
            .iter()
            .filter(|(rule, _)| !rule.check(value))
            .map(|&(rule, message)| FieldError {
                field,
                rule,
                message,
            })
            .collect()
    }

    /// The first failing rule, regardless of whether the field was touched.
    pub fn validate(&self, field: Field) -> Result<(), FieldError> {
        match self.errors(field).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn state(&self, field: Field) -> FieldState {
        if !self.is_touched(field) {
            return FieldState::Untouched;
        }
        match self.validate(field) {
            Ok(()) => FieldState::Valid,
            Err(err) => FieldState::Invalid(err),
        }
    }

    /// The message to show under `field`, if any.
    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        match self.state(field) {
            FieldState::Invalid(err) => Some(err.message),
            FieldState::Untouched | FieldState::Valid => None,
        }
    }

    /// Aggregate validity; the submit control is enabled exactly when true.
    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|&field| self.validate(field).is_ok())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FormChange) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Build the todo to create from the current values.
    pub fn to_todo(&self) -> Result<Todo, Vec<FieldError>> {
        let errors: Vec<FieldError> = Field::ALL
            .iter()
            .filter_map(|&field| self.validate(field).err())
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Todo::new(
            self.value(Field::Owner),
            self.value(Field::Status) == "true",
            self.value(Field::Body),
            self.value(Field::Category),
        ))
    }

    /// Send the form to `service`. Field values are kept whatever happens.
    pub async fn submit<S: TodoService>(&self, service: &S) -> SubmitOutcome {
        let todo = match self.to_todo() {
            Ok(todo) => todo,
            Err(errors) => {
                debug!(invalid = errors.len(), "add-todo submit rejected");
                return SubmitOutcome::Rejected(errors);
            }
        };

        match service.add_todo(&todo).await {
            Ok(id) => {
                info!(%id, owner = %todo.owner, "added todo");
                SubmitOutcome::Created {
                    notice: Notice::info(format!("Added Todo {}", todo.owner), ADDED_DURATION),
                    route: Route::TodoDetail(id.clone()),
                    id,
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to add todo");
                SubmitOutcome::Failed {
                    notice: Notice::error(ADD_FAILED_MESSAGE, ADD_FAILED_DURATION),
                }
            }
        }
    }

    fn touch(&mut self, field: Field) {
        self.touched[field.index()] = true;
        let change = FormChange {
            field,
            state: self.state(field),
            form_valid: self.is_valid(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}
