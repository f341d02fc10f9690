use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter for one slice. Only the most recently issued
/// ticket may write its result.
#[derive(Debug, Default)]
pub struct Sequence {
    issued: AtomicU64,
}

impl Sequence {
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// The most recently issued ticket, without issuing a new one.
    pub fn current(&self) -> Ticket {
        Ticket(self.issued.load(Ordering::SeqCst))
    }
}

/// One sequence per independently loaded slice.
#[derive(Debug, Default)]
pub struct SliceSequences {
    pub postings: Sequence,
    pub categories: Sequence,
    pub history: Sequence,
    pub reconcile: Sequence,
    /// Bumped on every identity change; user-scoped writes check it.
    pub identity: Sequence,
}
