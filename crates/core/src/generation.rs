//! Schedule generation state machine.
//!
//! ```text
//! Idle ──Generate──▶ Generating ──Succeeded──▶ HasSchedule
//!                        │                        │
//!                        └──────Failed──────▶ HasError
//!
//! HasSchedule | HasError ──Generate──▶ Generating
//! ```
//!
//! All UI state for one generate control lives in a [`GenerationState`] value
//! and changes only through [`reduce`]. A new `Generate` is refused while a
//! request is in flight. There is no automatic retry: a failed attempt stays
//! in `HasError` until the user generates again.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::request::GenerationRequest;
use crate::schedule::GenerationResult;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    /// A request is in flight. The previous schedule (if any) stays visible.
    Generating { last: Option<GenerationResult> },
    HasSchedule(GenerationResult),
    /// The last attempt failed. The previous schedule (if any) stays visible.
    HasError {
        message: String,
        last: Option<GenerationResult>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationAction {
    Generate,
    Succeeded(GenerationResult),
    Failed(String),
}

impl GenerationState {
    /// Short name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Generating { .. } => "generating",
            GenerationState::HasSchedule(_) => "has_schedule",
            GenerationState::HasError { .. } => "has_error",
        }
    }

    /// Whether the generate control is enabled.
    pub fn can_generate(&self) -> bool {
        !self.is_generating()
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, GenerationState::Generating { .. })
    }

    /// The schedule to display, if any.
    pub fn schedule(&self) -> Option<&GenerationResult> {
        match self {
            GenerationState::Idle => None,
            GenerationState::HasSchedule(result) => Some(result),
            GenerationState::Generating { last } | GenerationState::HasError { last, .. } => {
                last.as_ref()
            }
        }
    }

    /// The inline error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationState::HasError { message, .. } => Some(message),
            _ => None,
        }
    }

    fn into_last(self) -> Option<GenerationResult> {
        match self {
            GenerationState::Idle => None,
            GenerationState::HasSchedule(result) => Some(result),
            GenerationState::Generating { last } | GenerationState::HasError { last, .. } => last,
        }
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// Invalid transitions (a second `Generate` while generating, or an outcome
/// arriving when nothing is in flight) are rejected and leave the caller's
/// state untouched.
pub fn reduce(
    state: &GenerationState,
    action: GenerationAction,
) -> Result<GenerationState, CoreError> {
    match (state, action) {
        (GenerationState::Generating { .. }, GenerationAction::Generate) => Err(
            CoreError::Validation("A schedule is already being generated".to_string()),
        ),
        (current, GenerationAction::Generate) => Ok(GenerationState::Generating {
            last: current.clone().into_last(),
        }),
        (GenerationState::Generating { .. }, GenerationAction::Succeeded(result)) => {
            Ok(GenerationState::HasSchedule(result))
        }
        (GenerationState::Generating { last }, GenerationAction::Failed(message)) => {
            Ok(GenerationState::HasError {
                message,
                last: last.clone(),
            })
        }
        (current, outcome) => Err(CoreError::Validation(format!(
            "Invalid transition: {} -> {}",
            current.name(),
            match outcome {
                GenerationAction::Succeeded(_) => "has_schedule",
                GenerationAction::Failed(_) => "has_error",
                GenerationAction::Generate => "generating",
            }
        ))),
    }
}

// ---------------------------------------------------------------------------
// Generator seam
// ---------------------------------------------------------------------------

/// Anything that can turn a [`GenerationRequest`] into a schedule: the HTTP
/// backend client, or a stub in tests.
#[async_trait]
pub trait ScheduleGenerator: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationResult, Self::Error>;
}

/// Drives one generate control: owns the state and runs single attempts
/// through a [`ScheduleGenerator`].
#[derive(Debug, Default)]
pub struct GenerationSession {
    state: GenerationState,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn dispatch(&mut self, action: GenerationAction) -> Result<&GenerationState, CoreError> {
        self.state = reduce(&self.state, action)?;
        Ok(&self.state)
    }

    /// Mark a request as started. Fails while one is already in flight.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        self.dispatch(GenerationAction::Generate).map(|_| ())
    }

    /// Feed the outcome of the in-flight request back into the state.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        outcome: Result<GenerationResult, E>,
    ) -> Result<&GenerationState, CoreError> {
        let action = match outcome {
            Ok(result) => GenerationAction::Succeeded(result),
            Err(e) => GenerationAction::Failed(e.to_string()),
        };
        self.dispatch(action)
    }

    /// Run one generation attempt end to end. Used for the initial generate
    /// and for manual regenerate alike; a failure is recorded in the state,
    /// not retried.
    pub async fn run<G: ScheduleGenerator>(
        &mut self,
        generator: &G,
        request: &GenerationRequest,
    ) -> Result<&GenerationState, CoreError> {
        self.begin()?;
        let outcome = generator.generate(request).await;
        self.complete(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
