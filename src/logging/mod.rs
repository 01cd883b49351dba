//! Logging statistics from simulation runs
mod cli;

pub use cli::CLILogger;

use enum_map::Enum;
use std::error::Error;
use std::fmt;

/// Simulation run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Event {
    /// One agent-environment round.
    Step,
    /// One complete trial.
    Trial,
}

/// A value that can be logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Loggable {
    /// A scalar value. Aggregated by taking means.
    Scalar(f64),
    /// A sample from a distribution over `0 .. (size - 1)`.
    IndexSample { value: usize, size: usize },
}

impl From<f64> for Loggable {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

/// Log statistics from a simulation run.
pub trait Logger {
    /// Log a value.
    ///
    /// # Args
    /// * `event` - The event associated with this value.
    /// * `name` - The name that identifies this value.
    /// * `value` - The value to log.
    ///
    /// # Errors
    /// If the logged value is structurally incompatible with previous values
    /// logged under the same name.
    fn log<'a>(&mut self, event: Event, name: &'a str, value: Loggable)
        -> Result<(), LogError<'a>>;

    /// Mark the end of an event instance.
    fn done(&mut self, event: Event);
}

/// Convenience methods for loggers.
pub trait LoggerHelper: Logger {
    /// Log a value, panicking on structural mismatch with previous values.
    fn unwrap_log<'a, V: Into<Loggable>>(&mut self, event: Event, name: &'a str, value: V) {
        self.log(event, name, value.into()).unwrap()
    }
}

impl<L: Logger + ?Sized> LoggerHelper for L {}

/// No-op logger.
impl Logger for () {
    fn log<'a>(&mut self, _: Event, _: &'a str, _: Loggable) -> Result<(), LogError<'a>> {
        Ok(())
    }
    fn done(&mut self, _: Event) {}
}

/// Error logging a value that is incompatible with its name's history.
#[derive(Debug, Clone, PartialEq)]
pub struct LogError<'a> {
    name: &'a str,
    value: Loggable,
    expected: String,
}

impl<'a> LogError<'a> {
    pub fn new(name: &'a str, value: Loggable, expected: String) -> Self {
        Self {
            name,
            value,
            expected,
        }
    }
}

impl fmt::Display for LogError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\"{}\": incompatible value {:?}, expected {}",
            self.name, self.value, self.expected
        )
    }
}

impl Error for LogError<'_> {}
