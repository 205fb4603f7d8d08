use async_trait::async_trait;

use super::GuardEvent;

/// Trait for handling guard events asynchronously.
///
/// Implement this trait to create custom event listeners. Listeners can
/// perform any async operation: logging, sending notifications, updating
/// metrics, etc.
///
/// # Example
///
/// ```rust,ignore
/// use gazette::events::{GuardEvent, Listener};
/// use async_trait::async_trait;
///
/// struct RejectionCounter;
///
/// #[async_trait]
/// impl Listener for RejectionCounter {
///     async fn handle(&self, event: &GuardEvent) {
///         if let GuardEvent::SubmissionRejected { reason, .. } = event {
///             // increment a counter for this reason
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle a guard event.
    ///
    /// This method is called for every event dispatched. Filter by matching
    /// on the event variant to handle specific events.
    async fn handle(&self, event: &GuardEvent);
}
