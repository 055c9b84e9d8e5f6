use std::sync::Arc;

use futures::future::join_all;
use log::{error, info, warn};

use crate::cards::set_range::SetRange;
use crate::error::ScheduleError;
use crate::set_walker::{SetWalker, WalkReport};

/// Outcome of one scheduler run, one entry per range that completed.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<WalkReport>,
    pub errors: Vec<ScheduleError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && self.reports.iter().all(WalkReport::is_success)
    }

    pub fn retrieved_count(&self) -> usize {
        self.reports.iter().map(|r| r.retrieved.len()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.errors.len() + self.reports.iter().map(|r| r.failures.len()).sum::<usize>()
    }

    fn push(&mut self, result: Result<WalkReport, ScheduleError>) {
        match result {
            Ok(report) => self.reports.push(report),
            Err(e) => {
                error!("{}", e);
                self.errors.push(e);
            }
        }
    }

    pub fn log(&self) {
        for report in &self.reports {
            match &report.ended_by {
                Some(e) => info!(
                    "{}: {} retrieved, {} already cached, set ends before card {}",
                    report.range,
                    report.retrieved.len(),
                    report.already_cached,
                    e.card_id()
                ),
                None => info!(
                    "{}: {} retrieved, {} already cached",
                    report.range,
                    report.retrieved.len(),
                    report.already_cached
                ),
            }
            if report.cancelled {
                warn!("{} was cancelled before reaching its end", report.range);
            }
            for failure in &report.failures {
                error!("{}: {}", report.range, failure);
            }
        }
        for e in &self.errors {
            error!("{}", e);
        }
    }
}

pub struct Scheduler {
    ranges: Vec<SetRange>,
}

impl Scheduler {
    /// Ranges write to their own part of the cache, so they must not overlap.
    pub fn new(ranges: Vec<SetRange>) -> Result<Self, ScheduleError> {
        for (i, first) in ranges.iter().enumerate() {
            if let Some(second) = ranges.iter().skip(i + 1).find(|r| r.overlaps(first)) {
                return Err(ScheduleError::OverlappingRanges {
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
        Ok(Scheduler { ranges })
    }

    pub fn ranges(&self) -> &[SetRange] {
        &self.ranges
    }

    /// Walks every range. All but the last run as separate tasks while the
    /// last one runs on the calling task; every task is joined before returning.
    /// A failing range never stops the others.
    pub async fn run_all(&self, walker: Arc<SetWalker>) -> RunSummary {
        let mut summary = RunSummary::default();
        let Some((last, concurrent)) = self.ranges.split_last() else {
            return summary;
        };

        let handles: Vec<_> = concurrent
            .iter()
            .map(|range| {
                let walker = Arc::clone(&walker);
                let range = range.clone();
                info!("Starting {} with up to {} cards", range, range.card_count());
                tokio::spawn(async move { walker.walk_range(&range).await })
            })
            .collect();

        info!("Starting {} with up to {} cards", last, last.card_count());
        let last_result = walker.walk_range(last).await;

        let joined = join_all(handles).await;
        for (range, result) in concurrent.iter().zip(joined) {
            match result {
                Ok(walk) => summary.push(walk.map_err(ScheduleError::from)),
                Err(join_error) => summary.push(Err(ScheduleError::TaskPanicked {
                    range: range.to_string(),
                    message: join_error.to_string(),
                })),
            }
        }
        summary.push(last_result.map_err(ScheduleError::from));

        summary
    }
}
