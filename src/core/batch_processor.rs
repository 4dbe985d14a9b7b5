//! Batch processing with user-based partitioning
//!
//! `BatchProcessor` applies a batch of ledger commands by partitioning it per
//! user and replaying each user's commands, in file order, on a blocking worker
//! thread. Different users run in parallel; the engine's per-user lock still
//! guards every mutation, so correctness does not depend on the partitioning,
//! only the per-user ordering does.

use std::collections::HashMap;

use tracing::{error, warn};

use super::engine::PointService;
use crate::types::{PointCommand, PointError, UserId, UserPoint};

/// Result of applying a single command
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was applied
    pub command: PointCommand,

    /// The updated balance or the rejection
    pub result: Result<UserPoint, PointError>,
}

/// Batch processor with user-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    service: PointService,
}

impl BatchProcessor {
    pub fn new(service: PointService) -> Self {
        Self { service }
    }

    /// Partition a batch by user id, preserving each user's command order
    pub fn partition_by_user(
        &self,
        batch: Vec<PointCommand>,
    ) -> HashMap<UserId, Vec<PointCommand>> {
        let mut user_batches: HashMap<UserId, Vec<PointCommand>> = HashMap::new();

        for command in batch {
            user_batches.entry(command.user).or_default().push(command);
        }

        user_batches
    }

    /// Apply one user's commands sequentially
    ///
    /// Rejected commands are logged and do not stop the rest of the sequence.
    pub fn process_user_commands(&self, commands: Vec<PointCommand>) -> Vec<ProcessingResult> {
        commands
            .into_iter()
            .map(|command| {
                let result = self.service.apply(&command);
                if let Err(e) = &result {
                    warn!(user_id = command.user, error = %e, "command rejected");
                }
                ProcessingResult { command, result }
            })
            .collect()
    }

    /// Apply a batch, one blocking task per user
    ///
    /// Returns once every user's commands have been applied. Result order
    /// across users is unspecified; within a user it follows the input.
    pub async fn process_batch(&self, batch: Vec<PointCommand>) -> Vec<ProcessingResult> {
        let user_batches = self.partition_by_user(batch);

        let mut tasks = Vec::with_capacity(user_batches.len());
        for (_user_id, commands) in user_batches {
            let processor = self.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                processor.process_user_commands(commands)
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(user_results) => results.extend(user_results),
                Err(e) => error!(error = ?e, "batch worker panicked"),
            }
        }

        results
    }
}
