use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Auto-clear delay after a successful login.
pub const LOGIN_CLEAR: Duration = Duration::from_millis(2000);
/// Auto-clear delay after a content mutation (success or failure).
pub const MUTATION_CLEAR: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Submitting,
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub phase: Phase,
}

impl StatusMessage {
    pub fn is_failure(&self) -> bool {
        self.phase == Phase::Failure
    }
}

struct Slot {
    message: StatusMessage,
    expires_at: Option<Instant>,
}

/// Transient admin status banner, one slot per tab. The machine is
/// Idle -> Submitting -> Success | Failure, where the terminal states
/// revert to Idle (an empty banner) once their delay elapses; expiry is
/// evaluated lazily on read, so no interaction is needed for the clear.
/// A mutation on one tab never surfaces on another.
#[derive(Default)]
pub struct StatusBanner {
    slots: Mutex<HashMap<&'static str, Slot>>,
}

impl StatusBanner {
    pub async fn submitting(&self, tab: &'static str, text: impl Into<String>) {
        self.set(tab, text.into(), Phase::Submitting, None).await;
    }

    pub async fn success(&self, tab: &'static str, text: impl Into<String>, clear_after: Duration) {
        self.set(tab, text.into(), Phase::Success, Some(clear_after))
            .await;
    }

    pub async fn failure(&self, tab: &'static str, text: impl Into<String>, clear_after: Duration) {
        self.set(tab, text.into(), Phase::Failure, Some(clear_after))
            .await;
    }

    async fn set(
        &self,
        tab: &'static str,
        text: String,
        phase: Phase,
        clear_after: Option<Duration>,
    ) {
        let mut slots = self.slots.lock().await;
        slots.insert(
            tab,
            Slot {
                message: StatusMessage { text, phase },
                expires_at: clear_after.map(|delay| Instant::now() + delay),
            },
        );
    }

    /// Current banner text for `tab`, or `None` once the clear delay has
    /// elapsed.
    pub async fn current(&self, tab: &'static str) -> Option<StatusMessage> {
        let mut slots = self.slots.lock().await;
        if let Some(current) = slots.get(tab) {
            if current
                .expires_at
                .is_some_and(|expires_at| Instant::now() >= expires_at)
            {
                slots.remove(tab);
                return None;
            }
            return Some(current.message.clone());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn success_clears_after_delay_without_interaction() {
        let banner = StatusBanner::default();
        banner.success("services", "Service added ✓", MUTATION_CLEAR).await;

        let message = banner.current("services").await.expect("banner set");
        assert_eq!(message.text, "Service added ✓");
        assert_eq!(message.phase, Phase::Success);

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(banner.current("services").await.is_some());

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(banner.current("services").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_clears_on_the_same_schedule() {
        let banner = StatusBanner::default();
        banner.failure("projects", "Failed to delete", MUTATION_CLEAR).await;
        assert!(banner
            .current("projects")
            .await
            .is_some_and(|m| m.is_failure()));

        tokio::time::advance(MUTATION_CLEAR + Duration::from_millis(1)).await;
        assert!(banner.current("projects").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn submitting_does_not_expire() {
        let banner = StatusBanner::default();
        banner.submitting("hero", "Saving hero section...").await;

        tokio::time::advance(Duration::from_secs(60)).await;
        let message = banner.current("hero").await.expect("still submitting");
        assert_eq!(message.phase, Phase::Submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_replaces_older() {
        let banner = StatusBanner::default();
        banner.submitting("pages", "Deleting...").await;
        banner.success("pages", "Deleted ✓", MUTATION_CLEAR).await;

        let message = banner.current("pages").await.expect("banner set");
        assert_eq!(message.text, "Deleted ✓");
    }

    #[tokio::test(start_paused = true)]
    async fn a_banner_is_scoped_to_its_tab() {
        let banner = StatusBanner::default();
        banner.success("services", "Service added ✓", MUTATION_CLEAR).await;

        assert!(banner.current("projects").await.is_none());
        assert!(banner.current("services").await.is_some());

        // Expiring one tab's message leaves another's alone.
        banner.failure("projects", "Failed to delete", MUTATION_CLEAR).await;
        tokio::time::advance(Duration::from_millis(1500)).await;
        banner.success("team", "Team member added ✓", MUTATION_CLEAR).await;
        tokio::time::advance(Duration::from_millis(2000)).await;

        assert!(banner.current("services").await.is_none());
        assert!(banner.current("projects").await.is_none());
        assert!(banner.current("team").await.is_some());
    }
}
