//! The unified error handling system for the storage layer.

use std::fmt::Display;

pub use types::{ErrorKind, LazydrobeError};

/// A unified `Result` type for the entire crate.
pub type Result<T> = std::result::Result<T, LazydrobeError>;

pub mod macros;
pub mod types;

/// Adds a human readable context message to an error while keeping its
/// classification reachable through [`LazydrobeError::kind`].
pub trait Context<T, E> {
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display;

    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<LazydrobeError>,
{
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display,
    {
        self.with_context(|| context)
    }

    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(LazydrobeError::Context {
                context: context().to_string(),
                source: Box::new(error.into()),
            }),
        }
    }
}

/// Helper to attach context to an error without intermediate boilerplate.
#[track_caller]
pub fn context_error<T>(err: impl Into<LazydrobeError>, context: impl Display) -> Result<T> {
    Err::<T, LazydrobeError>(err.into()).context(context)
}

/// Who is at fault for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input: constraint violations, validation failures, missing rows.
    Client,
    /// Storage engine, IO or configuration failures.
    Server,
}
