use std::collections::HashMap;

use mealplanner_shared::{BatchResult, EntityId, RemoteError};
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BulkAction {
    Approve,
    Unapprove,
    Delete,
}

impl BulkAction {
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Unapprove => "unapproved",
            Self::Delete => "deleted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Settled {
    Success,
    PartialFailure,
    Failure,
}

/// Aggregated result of one dispatched action, keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub action: BulkAction,
    /// Dispatch order.
    pub succeeded: Vec<EntityId>,
    /// Dispatch order.
    pub failed: Vec<(EntityId, RemoteError)>,
    /// The view was unmounted before the action settled; nothing was written
    /// back to it.
    pub detached: bool,
}

impl Outcome {
    /// Match responses to the dispatched ids regardless of arrival order. An
    /// id with no response counts as failed.
    pub fn collect(action: BulkAction, dispatched: &[EntityId], results: BatchResult) -> Self {
        let mut by_id = results.into_iter().collect::<HashMap<_, _>>();
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for id in dispatched {
            match by_id.remove(id) {
                Some(Ok(())) => succeeded.push(id.clone()),
                Some(Err(error)) => failed.push((id.clone(), error)),
                None => failed.push((
                    id.clone(),
                    RemoteError::Server(format!("no response for {id}")),
                )),
            }
        }

        Self {
            action,
            succeeded,
            failed,
            detached: false,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn settled(&self) -> Settled {
        match (self.succeeded.is_empty(), self.failed.is_empty()) {
            (_, true) => Settled::Success,
            (false, false) => Settled::PartialFailure,
            (true, false) => Settled::Failure,
        }
    }

    pub fn session_expired(&self) -> bool {
        self.failed
            .iter()
            .any(|(_, error)| error.is_session_expired())
    }

    /// e.g. "8 of 10 approved, 2 failed".
    pub fn message(&self) -> String {
        let mut message = format!(
            "{} of {} {}",
            self.succeeded.len(),
            self.total(),
            self.action.past_tense()
        );

        if !self.failed.is_empty() {
            message.push_str(&format!(", {} failed", self.failed.len()));
        }

        message
    }
}
