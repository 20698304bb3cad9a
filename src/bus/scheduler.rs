//! Deferred Scheduler
//!
//! Timed notifications go through an explicit message queue rather than
//! ad-hoc timers. A message carries a delivery floor and a monotonically
//! increasing id; delivery follows `(floor, id)` order, and anything still
//! pending can be cancelled by id, so nothing fires for a window that was
//! torn down in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::time::{self, Instant};

use super::event_bus::{AppEvent, EventBus};

/// Handle to a scheduled message, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

#[derive(Debug)]
struct Pending {
    id: u64,
    not_before: Instant,
    event: AppEvent,
}

/// Queue of deferred [`AppEvent`]s delivered to the bus once their time
/// comes. [`Scheduler::run`] is the driver; a desktop spawns it once.
pub struct Scheduler {
    queue: Mutex<Vec<Pending>>,
    bell: Notify,
    bus: EventBus,
    next_id: AtomicU64,
}

impl Scheduler {
    pub fn new(bus: EventBus) -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            bell: Notify::new(),
            bus,
            next_id: AtomicU64::new(1),
        }
    }

    /// Queue `event` for delivery no earlier than `delay` from now.
    pub async fn enqueue(&self, event: AppEvent, delay: Duration) -> MessageId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Pending {
            id,
            not_before: Instant::now() + delay,
            event,
        };
        self.queue.lock().await.push(pending);
        self.bell.notify_one();
        MessageId(id)
    }

    /// Drop a still-pending message. True if it was found in the queue;
    /// false means it was already delivered (or never existed).
    pub async fn cancel(&self, id: MessageId) -> bool {
        let mut queue = self.queue.lock().await;
        let before = queue.len();
        queue.retain(|p| p.id != id.0);
        before != queue.len()
    }

    /// Number of messages still waiting for delivery.
    pub async fn queued(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Driver loop: sleep until the earliest delivery floor or until a new
    /// message arrives, then emit everything due. Runs forever.
    pub async fn run(&self) {
        loop {
            let next = self.queue.lock().await.iter().map(|p| p.not_before).min();
            match next {
                None => self.bell.notified().await,
                Some(at) => {
                    tokio::select! {
                        _ = time::sleep_until(at) => {}
                        _ = self.bell.notified() => {}
                    }
                }
            }
            self.deliver_due().await;
        }
    }

    /// Emit every message whose floor has passed, ordered by
    /// `(floor, id)`. The lock is released before emission so consumers
    /// reacting synchronously can enqueue or cancel freely.
    async fn deliver_due(&self) {
        let now = Instant::now();
        let mut due: Vec<Pending> = {
            let mut queue = self.queue.lock().await;
            let (due, keep): (Vec<Pending>, Vec<Pending>) =
                queue.drain(..).partition(|p| p.not_before <= now);
            *queue = keep;
            due
        };
        due.sort_by_key(|p| (p.not_before, p.id));
        for pending in due {
            self.bus.emit(pending.event);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn launch(id: &str) -> AppEvent {
        AppEvent::LaunchApp { id: id.to_string() }
    }

    fn spawn_driver(bus: EventBus) -> Arc<Scheduler> {
        let scheduler = Arc::new(Scheduler::new(bus));
        let driver = scheduler.clone();
        tokio::spawn(async move { driver.run().await });
        scheduler
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_arrive_after_their_floor() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let scheduler = spawn_driver(bus);

        scheduler
            .enqueue(launch("media-player"), Duration::from_millis(250))
            .await;
        assert_eq!(rx.recv().await.unwrap(), launch("media-player"));
        assert_eq!(scheduler.queued().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_floors_deliver_in_enqueue_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let scheduler = spawn_driver(bus);

        scheduler.enqueue(launch("a"), Duration::from_millis(50)).await;
        scheduler.enqueue(launch("b"), Duration::from_millis(50)).await;
        assert_eq!(rx.recv().await.unwrap(), launch("a"));
        assert_eq!(rx.recv().await.unwrap(), launch("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_floor_wins_regardless_of_enqueue_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let scheduler = spawn_driver(bus);

        scheduler
            .enqueue(launch("late"), Duration::from_millis(300))
            .await;
        scheduler
            .enqueue(launch("early"), Duration::from_millis(100))
            .await;
        assert_eq!(rx.recv().await.unwrap(), launch("early"));
        assert_eq!(rx.recv().await.unwrap(), launch("late"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_messages_never_fire() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let scheduler = spawn_driver(bus);

        let doomed = scheduler
            .enqueue(launch("doomed"), Duration::from_millis(100))
            .await;
        assert!(scheduler.cancel(doomed).await);
        scheduler
            .enqueue(launch("probe"), Duration::from_millis(200))
            .await;
        assert_eq!(rx.recv().await.unwrap(), launch("probe"));
    }

    #[tokio::test]
    async fn test_cancel_after_delivery_reports_false() {
        let bus = EventBus::new();
        let scheduler = Scheduler::new(bus);
        let id = scheduler.enqueue(launch("x"), Duration::ZERO).await;
        scheduler.deliver_due().await;
        assert!(!scheduler.cancel(id).await);
    }
}
