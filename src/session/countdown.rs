//! Cancellable one-second ticker.
//!
//! The tick task runs detached and feeds a channel; whoever owns the
//! [`Ticker`] handle decides when it dies. Dropping the handle aborts the
//! task, so no tick can fire after the owner is gone.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the tick task. Ticks arrive on the returned receiver once per
    /// second, starting one second from now.
    pub fn start() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of an interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_arrive_once_per_second() {
        let (_ticker, mut ticks) = Ticker::start();
        // Let the tick task run and pin its interval to the paused clock.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(ticks.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(ticks.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_the_task() {
        let (ticker, mut ticks) = Ticker::start();
        drop(ticker);

        tokio::time::advance(Duration::from_secs(5)).await;
        // Channel closes with the task; no late ticks.
        assert!(ticks.recv().await.is_none());
    }
}
