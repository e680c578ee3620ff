//! # Processor Runner
//!
//! A small host harness that drives a `ScheduledProcessor` over a batch of
//! records and collects the transfers per relationship. Records are processed
//! concurrently and complete in no particular order.

use crate::{
    constants::DEFAULT_CONCURRENCY,
    processor::ScheduledProcessor,
    types::{Record, Relationship},
};
use futures::stream::{self, StreamExt};
use tracing::info;

/// Records grouped by the relationship they were transferred to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transfers {
    pub success: Vec<Record>,
    pub failure: Vec<Record>,
}

impl Transfers {
    pub fn for_relationship(&self, relationship: Relationship) -> &[Record] {
        match relationship {
            Relationship::Success => &self.success,
            Relationship::Failure => &self.failure,
        }
    }

    /// Total number of transferred records.
    pub fn len(&self) -> usize {
        self.success.len() + self.failure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, relationship: Relationship, record: Record) {
        match relationship {
            Relationship::Success => self.success.push(record),
            Relationship::Failure => self.failure.push(record),
        }
    }
}

pub struct ProcessorRunner {
    processor: ScheduledProcessor,
    concurrency: usize,
}

impl ProcessorRunner {
    pub fn new(processor: ScheduledProcessor) -> Self {
        Self {
            processor,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the maximum number of in-flight invocations (at least one).
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Triggers the processor once per record and collects the results.
    pub async fn run(&self, records: Vec<Record>) -> Transfers {
        let total = records.len();
        info!(
            "Running QA processor over {total} records with concurrency {}",
            self.concurrency
        );

        let mut stream = stream::iter(records)
            .map(|record| {
                let processor = self.processor.clone();
                async move { processor.on_trigger(Some(record)).await }
            })
            .buffer_unordered(self.concurrency);

        let mut transfers = Transfers::default();
        while let Some(routed) = stream.next().await {
            transfers.push(routed.relationship, routed.record);
        }

        info!(
            success = transfers.success.len(),
            failure = transfers.failure.len(),
            "QA processor run complete"
        );
        transfers
    }

    /// Triggers the processor once without an incoming record.
    pub async fn run_once(&self) -> Transfers {
        let routed = self.processor.on_trigger(None).await;
        let mut transfers = Transfers::default();
        transfers.push(routed.relationship, routed.record);
        transfers
    }
}
