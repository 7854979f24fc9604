use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct FailedUpdate {
    pub id: String,
    pub message: String,
}

/// Outcome of one pass over a collection.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub scanned: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: Vec<FailedUpdate>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobReport {
    pub fn start() -> Self {
        Self {
            scanned: 0,
            updated: 0,
            skipped: 0,
            failed: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let elapsed = self
            .finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
            .unwrap_or(0);
        format!(
            "{} documents, {} updated, {} skipped, {} errors in {}ms",
            self.scanned,
            self.updated,
            self.skipped,
            self.failed.len(),
            elapsed
        )
    }
}
