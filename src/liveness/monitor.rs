use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use crate::connection::Connection;

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_millis(30_000);

/// Outcome of one liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A pong arrived since the previous check; a new ping went out.
    Pinged,
    /// No pong since the previous check, or the ping could not be queued.
    /// The connection has been closed.
    Expired,
}

/// Spawns one keepalive task per connection.
#[derive(Debug, Clone, Copy)]
pub struct LivenessMonitor {
    interval: Duration,
}

impl Default for LivenessMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_PING_INTERVAL)
    }
}

impl LivenessMonitor {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single check against `conn`.
    pub fn check(conn: &Connection) -> Tick {
        if !conn.take_pong() {
            debug!(conn = %conn.id(), "no pong since last ping, closing");
            conn.close();
            return Tick::Expired;
        }
        if !conn.ping() {
            return Tick::Expired;
        }
        Tick::Pinged
    }

    /// Attaches a keepalive timer to `conn`.
    ///
    /// The task ends as soon as the connection closes, whichever side closed
    /// it. The first check happens one full interval after attaching.
    pub fn spawn(&self, conn: Connection) -> JoinHandle<()> {
        let period = self.interval;
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = conn.closed() => break,
                    _ = ticker.tick() => {
                        if Self::check(&conn) == Tick::Expired {
                            break;
                        }
                    }
                }
            }
        })
    }
}
