//! Request generations for discarding superseded responses

/// Proof that a request was issued at a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter for one kind of load. Issuing a ticket supersedes every
/// earlier ticket of the same kind.
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}
