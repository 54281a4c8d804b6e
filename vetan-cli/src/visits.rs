//! Rolling visit log for the CLI frontend.
//!
//! A JSON file of UTC timestamps, pruned to the last 365 days and capped
//! at 1,000 entries. Purely a presentation concern; the tax engine never
//! sees it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

const MAX_ENTRIES: usize = 1000;
const RETENTION_DAYS: i64 = 365;

/// Visit counts over the standard reporting windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitStats {
    pub last_day: usize,
    pub last_week: usize,
    pub last_month: usize,
    pub last_year: usize,
}

/// Loads the log at `path`, records a visit at `now`, saves, and returns
/// the updated stats. Visit counting is best-effort: a failed write logs
/// a warning and the stats are still returned, so a broken counter never
/// fails an otherwise successful run.
pub fn track_visit(path: &Path, now: DateTime<Utc>) -> VisitStats {
    let mut log = VisitLog::load(path);
    log.record(now);
    if let Err(error) = log.save(path) {
        warn!(path = %path.display(), "could not persist visit log: {error:#}");
    }
    log.stats(now)
}

/// A rolling log of visit timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitLog {
    visits: Vec<DateTime<Utc>>,
}

impl VisitLog {
    /// Loads the log from `path`. A missing or unreadable file starts an
    /// empty log; so does a corrupt one, with a warning, rather than
    /// failing the whole run over a counter.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %path.display(), "corrupt visit log, starting fresh: {}", e);
            Self::default()
        })
    }

    /// Saves the log as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self).context("cannot serialize visit log")?;
        fs::write(path, json)
            .with_context(|| format!("cannot write visit log '{}'", path.display()))
    }

    /// Records a visit at `now`: prunes entries older than 365 days,
    /// appends, and keeps at most the newest 1,000 entries.
    pub fn record(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::days(RETENTION_DAYS);
        self.visits.retain(|t| *t >= cutoff);
        self.visits.push(now);
        if self.visits.len() > MAX_ENTRIES {
            let excess = self.visits.len() - MAX_ENTRIES;
            self.visits.drain(..excess);
        }
    }

    /// Counts visits in the last 24 hours, 7 days, 30 days and 365 days.
    pub fn stats(&self, now: DateTime<Utc>) -> VisitStats {
        let within = |days: i64| {
            let cutoff = now - Duration::days(days);
            self.visits.iter().filter(|t| **t >= cutoff).count()
        };
        VisitStats {
            last_day: within(1),
            last_week: within(7),
            last_month: within(30),
            last_year: within(RETENTION_DAYS),
        }
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(now: DateTime<Utc>, days_ago: i64) -> DateTime<Utc> {
        now - Duration::days(days_ago)
    }

    #[test]
    fn record_appends_and_counts_windows() {
        let now = Utc::now();
        let mut log = VisitLog::default();
        log.record(at(now, 100));
        log.record(at(now, 20));
        log.record(at(now, 3));
        log.record(now);

        let stats = log.stats(now);

        assert_eq!(stats.last_day, 1);
        assert_eq!(stats.last_week, 2);
        assert_eq!(stats.last_month, 3);
        assert_eq!(stats.last_year, 4);
    }

    #[test]
    fn record_prunes_entries_older_than_a_year() {
        let now = Utc::now();
        let mut log = VisitLog::default();
        log.record(at(now, 400));
        log.record(at(now, 366));
        assert_eq!(log.len(), 2);

        log.record(now);

        assert_eq!(log.len(), 2); // both stale entries dropped
        assert_eq!(log.stats(now).last_year, 2);
    }

    #[test]
    fn record_caps_the_log_at_one_thousand() {
        let now = Utc::now();
        let mut log = VisitLog::default();
        for i in 0..1500i64 {
            log.record(now - Duration::seconds(1500 - i));
        }

        assert_eq!(log.len(), 1000);
        // The newest entries survive.
        assert_eq!(log.stats(now).last_day, 1000);
    }

    #[test]
    fn load_missing_file_starts_empty() {
        let log = VisitLog::load(Path::new("/nonexistent/visits.json"));

        assert!(log.is_empty());
    }
}
