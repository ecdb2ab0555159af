//! Recurring cycle timer
//!
//! The timer never touches driver state. It only emits `CycleEvent::Tick`
//! on a channel, stamped with the generation it was spawned with; whoever
//! owns the driver reacts to it.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    Tick { generation: u64 },
}

/// Handle to a running cycle timer
pub struct CycleHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl CycleHandle {
    /// Stop the timer; no tick is sent after this returns
    pub fn cancel(self) {
        let _ = self.stop.send(true);
        self.task.abort();
        tracing::debug!("Cycle timer cancelled");
    }
}

pub struct CycleTimer;

impl CycleTimer {
    /// Start sending a tick every `period`, first one after a full period
    pub fn spawn(period: Duration, generation: u64, tx: mpsc::Sender<CycleEvent>) -> CycleHandle {
        let (stop, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if tx.send(CycleEvent::Tick { generation }).await.is_err() {
                            tracing::debug!("Cycle receiver dropped, stopping timer");
                            break;
                        }
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        tracing::debug!("Cycle timer started ({}ms)", period.as_millis());
        CycleHandle { stop, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl CycleHandle {
        fn is_running(&self) -> bool {
            !self.task.is_finished()
        }
    }

    async fn drain(rx: &mut mpsc::Receiver<CycleEvent>) -> usize {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = CycleTimer::spawn(Duration::from_millis(2000), 0, tx);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(drain(&mut rx).await, 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(drain(&mut rx).await, 1);

        tokio::time::sleep(Duration::from_millis(6000)).await;
        assert_eq!(drain(&mut rx).await, 3);

        assert!(handle.is_running());
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = CycleTimer::spawn(Duration::from_millis(2000), 0, tx);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(drain(&mut rx).await, 1);

        handle.cancel();
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(drain(&mut rx).await, 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        let handle = CycleTimer::spawn(Duration::from_millis(100), 0, tx);
        drop(rx);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!handle.is_running());
    }
}
