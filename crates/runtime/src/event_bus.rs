use std::collections::VecDeque;

use foundation::time::Time;

/// Default quiet period before a pending viewport change is released (seconds).
pub const DEFAULT_SETTLE_S: f64 = 0.15;

/// Events that make an older, still pending event of the same class obsolete.
///
/// Viewport motion is the usual case: only the latest pan/zoom matters once
/// the map has settled.
pub trait Supersede {
    fn supersedes_pending(&self) -> bool;
}

/// An event released by the queue, tagged with its arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct Queued<E> {
    pub seq: u64,
    pub received_at: Time,
    pub event: E,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub received: u64,
    pub coalesced: u64,
    pub released: u64,
}

/// Single-threaded event queue that coalesces bursts of viewport changes.
///
/// Ordering contract:
/// - Released events keep arrival order.
/// - A superseding event is held until `settle_s` has passed without another
///   one arriving; a newer one replaces it.
/// - Any other event first releases the held one, so nothing is reordered.
#[derive(Debug)]
pub struct EventQueue<E> {
    settle_s: f64,
    next_seq: u64,
    pending: Option<Queued<E>>,
    ready: VecDeque<Queued<E>>,
    stats: QueueStats,
}

impl<E: Supersede> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_S)
    }
}

impl<E: Supersede> EventQueue<E> {
    pub fn new(settle_s: f64) -> Self {
        Self {
            settle_s: settle_s.max(0.0),
            next_seq: 0,
            pending: None,
            ready: VecDeque::new(),
            stats: QueueStats::default(),
        }
    }

    pub fn push(&mut self, now: Time, event: E) {
        let queued = Queued {
            seq: self.next_seq,
            received_at: now,
            event,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.stats.received += 1;

        if queued.event.supersedes_pending() {
            if let Some(old) = self.pending.replace(queued) {
                self.stats.coalesced += 1;
                tracing::trace!("coalesced event #{}", old.seq);
            }
            return;
        }

        self.release_pending();
        self.ready.push_back(queued);
    }

    /// Events ready at `now`, in arrival order.
    pub fn poll(&mut self, now: Time) -> Vec<Queued<E>> {
        let settled = self
            .pending
            .as_ref()
            .is_some_and(|p| now.0 - p.received_at.0 >= self.settle_s);
        if settled {
            self.release_pending();
        }
        self.drain_ready()
    }

    /// Everything queued, including a held viewport change that has not settled.
    pub fn flush(&mut self) -> Vec<Queued<E>> {
        self.release_pending();
        self.drain_ready()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some() || !self.ready.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        self.stats
    }

    fn release_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            self.ready.push_back(p);
        }
    }

    fn drain_ready(&mut self) -> Vec<Queued<E>> {
        let out: Vec<Queued<E>> = self.ready.drain(..).collect();
        self.stats.released += out.len() as u64;
        out
    }
}
