//! Scripted jenkins-cli double
//!
//! Replays canned [`CliOutput`]s per command and records every call, so
//! command and credential logic can be exercised without a server.
//!
//! This is a test double. It never contacts Jenkins; production code uses
//! [`JarCli`](super::JarCli).

use super::errors::ExecError;
use super::traits::{CliOutput, JenkinsCli};
use ahash::AHashMap;
use std::cell::RefCell;
use std::collections::VecDeque;

/// A recorded jenkins-cli invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// jenkins-cli command name
    pub command: String,
    /// Arguments after the command name
    pub args: Vec<String>,
    /// Payload sent on stdin
    pub stdin: Option<String>,
}

/// Fake [`JenkinsCli`] for tests that answers from a queue of scripted responses
///
/// Responses are consumed in order per command; the last one queued for a
/// command is repeated once the queue runs dry. Commands without any
/// response fail with exit code 1.
#[derive(Debug, Default)]
pub struct ScriptedCli {
    responses: RefCell<AHashMap<String, VecDeque<Result<CliOutput, ExecError>>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedCli {
    /// Creates a runner with no responses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for `command`
    #[must_use]
    pub fn respond(self, command: &str, output: CliOutput) -> Self {
        self.enqueue(command, Ok(output))
    }

    /// Queues a runner failure for `command`, as if jenkins-cli could not start
    #[must_use]
    pub fn respond_err(self, command: &str, error: ExecError) -> Self {
        self.enqueue(command, Err(error))
    }

    fn enqueue(self, command: &str, response: Result<CliOutput, ExecError>) -> Self {
        self.responses
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Returns every call made so far
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of times `command` was invoked
    #[must_use]
    pub fn call_count(&self, command: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.command == command)
            .count()
    }
}

impl JenkinsCli for ScriptedCli {
    fn run(
        &self,
        command: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> Result<CliOutput, ExecError> {
        self.calls.borrow_mut().push(RecordedCall {
            command: command.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            stdin: stdin.map(str::to_string),
        });

        let mut responses = self.responses.borrow_mut();
        let Some(queue) = responses.get_mut(command) else {
            return Ok(CliOutput::failure(
                1,
                format!("no scripted response for '{command}'"),
            ));
        };

        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.unwrap_or_else(|| Ok(CliOutput::default()))
    }
}
