use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::domain::{SessionStore, SessionStoreError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub users: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Periodically drops per-user index entries whose session record already
/// expired.
#[derive(Clone)]
pub struct SessionSweeper {
    sessions: Arc<dyn SessionStore>,
    period: Duration,
}

impl SessionSweeper {
    pub fn new(sessions: Arc<dyn SessionStore>, period: Duration) -> Self {
        Self { sessions, period }
    }

    /// One pass over every indexed user. A failure on one user does not stop
    /// the pass.
    pub async fn sweep_all(&self) -> Result<SweepReport, SessionStoreError> {
        let users = self.sessions.indexed_users().await?;
        let mut report = SweepReport {
            users: users.len(),
            ..SweepReport::default()
        };

        for user_id in users {
            match self.sessions.sweep_orphans(user_id).await {
                Ok(removed) => {
                    if !removed.is_empty() {
                        debug!("Swept {} sessions of user {user_id}", removed.len());
                    }
                    report.removed += removed.len();
                }
                Err(e) => {
                    warn!("Sweep of user {user_id} failed: {e}");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    /// Run `sweep_all` every period until the returned handle is aborted.
    pub fn start(&self) -> JoinHandle<()> {
        let sweeper = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(sweeper.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match sweeper.sweep_all().await {
                    Ok(report) => info!(
                        "Session sweep: {} users, {} orphans removed, {} failures",
                        report.users, report.removed, report.failed
                    ),
                    Err(e) => warn!("Session sweep skipped: {e}"),
                }
            }
        })
    }
}
