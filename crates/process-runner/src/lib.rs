//! # Process Runner
//!
//! Runs external commands to completion for the hardhat-forge workflow.
//!
//! The runner owns process spawning, live forwarding of the child's stdout
//! and stderr, and exit-code normalization. Output content is never
//! interpreted: a command succeeds iff it exits with code 0.
//!
//! ```text
//!   caller ──► ProcessRunner::run(CommandSpec)
//!                    │
//!                    ├── child stdout ──copy──► OutputSink::stdout()
//!                    ├── child stderr ──copy──► OutputSink::stderr()
//!                    │
//!                    └── exit code ──► Ok(ProcessResult) | Err(ProcessError)
//! ```
//!
//! | Item | Description |
//! |------|-------------|
//! | [`ProcessRunner`] | Async seam used by the toolchain and workflow crates |
//! | [`TokioProcessRunner`] | Real implementation on `tokio::process` |
//! | [`StdioSink`] / [`MemorySink`] | Where forwarded output lands |

mod command;
mod error;
mod runner;
mod sink;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::CommandSpec;
pub use error::ProcessError;
pub use runner::{ProcessResult, ProcessRunner, TokioProcessRunner};
pub use sink::{MemorySink, MemoryWriter, OutputSink, OutputWriter, StdioSink};
