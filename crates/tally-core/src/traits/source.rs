use crate::error::Result;
use crate::types::{EventId, LedgerEvent};

/// Event source: ordered delivery of decoded ledger events
///
/// Implementations guarantee:
/// - Ledger order: events arrive in the ledger's total order
/// - Exactly once: re-deliveries and reorgs are resolved before delivery
/// - Stable IDs: the same event always carries the same [`EventId`]
///
/// The projector relies on these guarantees and does not re-check them.
pub trait EventSource {
    /// Next event, or `None` when the source is caught up
    fn next_event(&mut self) -> Result<Option<(EventId, LedgerEvent)>>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_event(&mut self) -> Result<Option<(EventId, LedgerEvent)>> {
        (**self).next_event()
    }
}
