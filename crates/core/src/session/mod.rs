//! Practice-session state machine.
//!
//! `PracticeSession` is pure: transitions mutate state and hand back a
//! `Command` describing the I/O to perform. The services layer executes the
//! commands and feeds fetch results back in.

mod command;
mod grading;
mod state;

pub use command::{Command, EmptyReason, FetchFailure, FetchTicket, ProblemFetch};
pub use grading::{AnswerResult, grade};
pub use state::{PracticeSession, SessionError, SessionPhase, SuspendPrompt};
