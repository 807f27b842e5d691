//! Per-over run aggregation for a [`crate::types::MatchRecord`].

use std::collections::BTreeMap;

use crate::types::{Delivery, MatchRecord};

/// Which component of a delivery's runs breakdown to aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunsComponent {
    /// `runs.total` (bat + extras).
    #[default]
    Total,
    /// `runs.batter` (off the bat).
    Batter,
    /// `runs.extras`.
    Extras,
}

impl RunsComponent {
    fn of(self, delivery: &Delivery) -> i64 {
        match self {
            RunsComponent::Total => delivery.runs.total,
            RunsComponent::Batter => delivery.runs.batter,
            RunsComponent::Extras => delivery.runs.extras,
        }
    }
}

/// Runs per over number, merged across innings.
///
/// Iteration is ascending by over number. A key that was never touched reads as `0` through
/// [`OverRuns::get`], the same as an over that had no deliveries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverRuns {
    by_over: BTreeMap<i64, i64>,
}

impl OverRuns {
    pub fn get(&self, over: i64) -> i64 {
        self.by_over.get(&over).copied().unwrap_or(0)
    }

    /// `(over, runs)` pairs in ascending over order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.by_over.iter().map(|(&k, &v)| (k, v))
    }

    /// Number of distinct over numbers seen.
    pub fn len(&self) -> usize {
        self.by_over.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_over.is_empty()
    }

    /// Sum over all keys.
    pub fn total(&self) -> i64 {
        self.by_over.values().fold(0i64, |acc, v| acc.saturating_add(*v))
    }

    fn add(&mut self, over: i64, runs: i64) {
        let slot = self.by_over.entry(over).or_insert(0);
        *slot = slot.saturating_add(runs);
    }
}

impl FromIterator<(i64, i64)> for OverRuns {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        let mut out = OverRuns::default();
        for (over, runs) in iter {
            out.add(over, runs);
        }
        out
    }
}

/// Runs keyed by `(innings index, over number)`; overs sharing a number in different innings
/// stay separate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InningsOverRuns {
    by_innings_over: BTreeMap<(usize, i64), i64>,
}

impl InningsOverRuns {
    pub fn get(&self, innings: usize, over: i64) -> i64 {
        self.by_innings_over.get(&(innings, over)).copied().unwrap_or(0)
    }

    /// `((innings, over), runs)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, i64), i64)> + '_ {
        self.by_innings_over.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.by_innings_over.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_innings_over.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.by_innings_over
            .values()
            .fold(0i64, |acc, v| acc.saturating_add(*v))
    }

    /// Collapse to per-over totals (the merged view of [`runs_per_over`]).
    pub fn merged(&self) -> OverRuns {
        self.iter().map(|((_, over), runs)| (over, runs)).collect()
    }
}

/// Total runs per over number, summed across innings.
///
/// Overs with the same number in different innings land in the same key.
pub fn runs_per_over(record: &MatchRecord) -> OverRuns {
    aggregate_runs(record, RunsComponent::Total)
}

/// Like [`runs_per_over`], aggregating the chosen runs component.
pub fn aggregate_runs(record: &MatchRecord, component: RunsComponent) -> OverRuns {
    let mut out = OverRuns::default();
    for innings in &record.innings {
        for over in &innings.overs {
            out.add(over.over, over_runs(over.deliveries.as_slice(), component));
        }
    }
    out
}

/// Runs per `(innings index, over number)`.
pub fn runs_per_innings_over(record: &MatchRecord, component: RunsComponent) -> InningsOverRuns {
    let mut out = InningsOverRuns::default();
    for (idx, innings) in record.innings.iter().enumerate() {
        for over in &innings.overs {
            let slot = out.by_innings_over.entry((idx, over.over)).or_insert(0);
            *slot = slot.saturating_add(over_runs(over.deliveries.as_slice(), component));
        }
    }
    out
}

fn over_runs(deliveries: &[Delivery], component: RunsComponent) -> i64 {
    deliveries
        .iter()
        .fold(0i64, |acc, d| acc.saturating_add(component.of(d)))
}
