use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{broadcast, Mutex, Notify};

/// Matches the public site's auto-advance cadence.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(5000);

/// Cyclic position over a slide list. All moves are modulo the length;
/// an empty list pins the index at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    len: usize,
    index: usize,
}

impl Rotation {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        if index < self.len {
            self.index = index;
        }
        self.index
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SlideChange {
    pub index: usize,
    pub total: usize,
}

/// Shared hero-carousel state. A background task ([`CarouselController::run`])
/// owns the auto-advance interval and every position change is broadcast to
/// the SSE subscribers. Manual navigation moves the position immediately and
/// leaves the interval alone; only a change of slide-list identity restarts
/// the interval.
pub struct CarouselController {
    rotation: Mutex<Rotation>,
    slide_ids: Mutex<Vec<i64>>,
    events: broadcast::Sender<SlideChange>,
    restart: Notify,
    interval: Duration,
}

impl CarouselController {
    pub fn new(interval: Duration) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            rotation: Mutex::new(Rotation::new(0)),
            slide_ids: Mutex::new(Vec::new()),
            events,
            restart: Notify::new(),
            interval,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SlideChange> {
        self.events.subscribe()
    }

    pub async fn current(&self) -> SlideChange {
        let rotation = self.rotation.lock().await;
        SlideChange {
            index: rotation.index(),
            total: rotation.len(),
        }
    }

    /// Adopt a freshly fetched slide list. A changed identity (different id
    /// sequence) rewinds the position and restarts the auto-advance interval;
    /// an identical list is a no-op.
    pub async fn sync_slides(&self, ids: &[i64]) {
        let mut current = self.slide_ids.lock().await;
        if *current == ids {
            return;
        }
        *current = ids.to_vec();
        let change = {
            let mut rotation = self.rotation.lock().await;
            *rotation = Rotation::new(ids.len());
            SlideChange {
                index: rotation.index(),
                total: rotation.len(),
            }
        };
        drop(current);
        self.restart.notify_one();
        let _ = self.events.send(change);
    }

    pub async fn next(&self) -> SlideChange {
        self.shift(Rotation::advance).await
    }

    pub async fn previous(&self) -> SlideChange {
        self.shift(Rotation::previous).await
    }

    pub async fn go_to(&self, index: usize) -> SlideChange {
        let change = {
            let mut rotation = self.rotation.lock().await;
            rotation.go_to(index);
            SlideChange {
                index: rotation.index(),
                total: rotation.len(),
            }
        };
        let _ = self.events.send(change);
        change
    }

    async fn shift(&self, step: fn(&mut Rotation) -> usize) -> SlideChange {
        let change = {
            let mut rotation = self.rotation.lock().await;
            step(&mut rotation);
            SlideChange {
                index: rotation.index(),
                total: rotation.len(),
            }
        };
        let _ = self.events.send(change);
        change
    }

    /// Auto-advance loop; runs until the server shuts down.
    pub async fn run(self: Arc<Self>) {
        loop {
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick of a fresh interval completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let rotation_empty = self.rotation.lock().await.is_empty();
                        if !rotation_empty {
                            self.shift(Rotation::advance).await;
                        }
                    }
                    _ = self.restart.notified() => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_start() {
        let mut rotation = Rotation::new(4);
        let start = rotation.index();
        for _ in 0..4 {
            rotation.advance();
        }
        assert_eq!(rotation.index(), start);
    }

    #[test]
    fn manual_moves_wrap_modulo_len() {
        let mut rotation = Rotation::new(3);
        assert_eq!(rotation.previous(), 2);
        assert_eq!(rotation.advance(), 0);
        assert_eq!(rotation.advance(), 1);
        assert_eq!(rotation.go_to(2), 2);
        // Out-of-range targets are ignored.
        assert_eq!(rotation.go_to(7), 2);
    }

    #[test]
    fn empty_rotation_stays_at_zero() {
        let mut rotation = Rotation::new(0);
        assert_eq!(rotation.advance(), 0);
        assert_eq!(rotation.previous(), 0);
    }

    #[tokio::test]
    async fn sync_with_same_ids_keeps_position() {
        let carousel = CarouselController::new(AUTO_ADVANCE_INTERVAL);
        carousel.sync_slides(&[1, 2, 3]).await;
        carousel.next().await;
        assert_eq!(carousel.current().await.index, 1);

        carousel.sync_slides(&[1, 2, 3]).await;
        assert_eq!(carousel.current().await.index, 1);
    }

    #[tokio::test]
    async fn sync_with_new_ids_rewinds() {
        let carousel = CarouselController::new(AUTO_ADVANCE_INTERVAL);
        carousel.sync_slides(&[1, 2, 3]).await;
        carousel.next().await;
        carousel.next().await;

        carousel.sync_slides(&[1, 2, 3, 4]).await;
        let change = carousel.current().await;
        assert_eq!(change.index, 0);
        assert_eq!(change.total, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_advance_cycles_through_all_slides() {
        let carousel = Arc::new(CarouselController::new(AUTO_ADVANCE_INTERVAL));
        carousel.sync_slides(&[10, 20, 30]).await;
        let mut events = carousel.subscribe();
        tokio::spawn(carousel.clone().run());

        let mut seen = Vec::new();
        for _ in 0..3 {
            tokio::time::advance(AUTO_ADVANCE_INTERVAL).await;
            let change = events.recv().await.expect("slide event");
            seen.push(change.index);
        }
        // Three intervals over three slides land back on the start.
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_does_not_wait_for_the_interval() {
        let carousel = Arc::new(CarouselController::new(AUTO_ADVANCE_INTERVAL));
        carousel.sync_slides(&[10, 20, 30]).await;
        tokio::spawn(carousel.clone().run());

        assert_eq!(carousel.next().await.index, 1);
        assert_eq!(carousel.previous().await.index, 0);
        assert_eq!(carousel.previous().await.index, 2);
    }
}
