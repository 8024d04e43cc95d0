// The interrupt channel connecting the PPU's render loop to the CPU's step
// loop (see SPEC_FULL.md §5, Concurrency & Resource Model).
//
// A bounded FIFO of interrupt sources. The PPU performs non-blocking
// enqueue (dropping the interrupt if the channel is full); the CPU performs
// non-blocking dequeue once per instruction boundary. A `VecDeque`-backed
// queue is sufficient for the serialized single-worker scheduling this core
// targets; nothing here depends on real OS threads.

use std::collections::VecDeque;

/// The default channel capacity, matching the "capacity >= 10" requirement.
pub const DEFAULT_CAPACITY: usize = 16;

/// The sources that may be dispatched through the interrupt channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptSource {
    Reset,
    Nmi,
    Irq,
    Brk,
    Abort,
}

/// Bounded FIFO channel carrying `InterruptSource` values from the PPU
/// (producer) to the CPU (consumer).
#[derive(Debug, Clone)]
pub struct InterruptChannel {
    queue: VecDeque<InterruptSource>,
    capacity: usize,
}

impl InterruptChannel {
    /// Create a channel with the given bounded capacity. Panics if
    /// `capacity` is zero; a zero-capacity channel could never carry Reset.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "interrupt channel capacity must be positive");
        InterruptChannel {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Attempt to enqueue `source`. Returns `false` (and drops the value)
    /// if the channel is already at capacity.
    pub fn try_send(&mut self, source: InterruptSource) -> bool {
        if self.queue.len() >= self.capacity {
            return false;
        }
        self.queue.push_back(source);
        true
    }

    /// Attempt to dequeue the next pending source, if any.
    pub fn try_recv(&mut self) -> Option<InterruptSource> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Default for InterruptChannel {
    fn default() -> Self {
        InterruptChannel::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order_preserved() {
        let mut chan = InterruptChannel::new(4);
        chan.try_send(InterruptSource::Nmi);
        chan.try_send(InterruptSource::Irq);
        assert_eq!(chan.try_recv(), Some(InterruptSource::Nmi), "Nmi was enqueued first");
        assert_eq!(chan.try_recv(), Some(InterruptSource::Irq), "Irq was enqueued second");
        assert_eq!(chan.try_recv(), None, "channel should now be empty");
    }

    #[test]
    fn test_send_drops_when_full() {
        let mut chan = InterruptChannel::new(1);
        assert!(chan.try_send(InterruptSource::Nmi), "first send into empty channel should succeed");
        assert!(!chan.try_send(InterruptSource::Irq), "second send should be dropped, channel is full");
        assert_eq!(chan.len(), 1, "dropped send must not grow the queue");
    }

    #[test]
    fn test_default_capacity_is_at_least_ten() {
        let chan = InterruptChannel::default();
        assert!(chan.capacity >= 10, "default capacity must satisfy the >=10 requirement");
    }
}
