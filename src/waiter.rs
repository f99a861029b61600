//! Long-running operation waiter.
//!
//! One poll-until-terminal loop shared by every asynchronous workflow. The waiter
//! knows nothing about status vocabularies: each caller supplies a classifier that
//! maps a fetched resource to [`OperationState`].

use crate::error::V7Error;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Classification of a polled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Pending,
    Succeeded,
    Failed,
}

/// A resource that exposes a raw status string and an optional failure message.
pub trait PolledResource: Serialize {
    fn status(&self) -> &str;
    fn error_message(&self) -> Option<&str>;
}

/// Poll cadence and wall-clock budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl WaitPolicy {
    /// Agent builder plan generation.
    pub const PLAN: WaitPolicy = WaitPolicy::new(Duration::from_secs(1), Duration::from_secs(120));
    /// Agent builder plan execution.
    pub const EXECUTION: WaitPolicy =
        WaitPolicy::new(Duration::from_secs(1), Duration::from_secs(300));
    /// Export job completion.
    pub const EXPORT: WaitPolicy = WaitPolicy::new(Duration::from_secs(1), Duration::from_secs(300));

    pub const fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }
}

/// Polls until success, failure, timeout or cancellation.
///
/// The deadline is checked once per iteration, so a wait may overrun its timeout by
/// up to one request. No poll is issued after the deadline has passed.
#[derive(Debug, Clone)]
pub struct Waiter {
    policy: WaitPolicy,
    subject: String,
    failure_message: String,
    cancel: Option<CancellationToken>,
}

impl Waiter {
    pub fn new(policy: WaitPolicy) -> Self {
        Self {
            policy,
            subject: "operation".to_string(),
            failure_message: "Operation failed".to_string(),
            cancel: None,
        }
    }

    /// What is being waited for, used in timeout messages ("plan", "export").
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Message used when a failed resource carries none of its own.
    pub fn failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn policy(&self) -> WaitPolicy {
        self.policy
    }

    pub async fn wait<R, F, Fut, C>(&self, mut fetch: F, classify: C) -> Result<R, V7Error>
    where
        R: PolledResource,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, V7Error>>,
        C: Fn(&R) -> OperationState,
    {
        let started = Instant::now();
        let mut polls: u32 = 0;
        let mut last_status: Option<String> = None;

        loop {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    return Err(V7Error::Cancelled {
                        last_status: last_status.unwrap_or_default(),
                    });
                }
            }

            let resource = fetch().await?;
            polls += 1;
            let status = resource.status().to_string();
            if last_status.as_deref() != Some(status.as_str()) {
                info!(subject = %self.subject, status = %status, polls, "Operation status");
            }

            match classify(&resource) {
                OperationState::Succeeded => return Ok(resource),
                OperationState::Failed => {
                    let message = resource
                        .error_message()
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| self.failure_message.clone());
                    return Err(V7Error::OperationFailed {
                        message,
                        resource: serde_json::to_value(&resource)?,
                    });
                }
                OperationState::Pending => {}
            }
            last_status = Some(status);

            if !self.deadline_passed(started) {
                debug!(subject = %self.subject, interval = ?self.policy.poll_interval, "Sleeping before next poll");
                self.pause(last_status.as_deref().unwrap_or_default()).await?;
            }
            if self.deadline_passed(started) {
                let last_status = last_status.unwrap_or_default();
                return Err(V7Error::Timeout {
                    message: format!(
                        "Timeout waiting for {} (status: {})",
                        self.subject, last_status
                    ),
                    last_status,
                    resource: serde_json::to_value(&resource)?,
                });
            }
        }
    }

    fn deadline_passed(&self, started: Instant) -> bool {
        started.elapsed() > self.policy.timeout
    }

    async fn pause(&self, last_status: &str) -> Result<(), V7Error> {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    _ = tokio::time::sleep(self.policy.poll_interval) => Ok(()),
                    _ = token.cancelled() => Err(V7Error::Cancelled {
                        last_status: last_status.to_string(),
                    }),
                }
            }
            None => {
                tokio::time::sleep(self.policy.poll_interval).await;
                Ok(())
            }
        }
    }
}
