use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use super::SubmissionRecord;

pub type BoxedDeliveryFuture<'a, E> = Pin<Box<dyn Future<Output = Result<(), E>> + Send + 'a>>;

/// Outbound delivery of a submission, e.g. a network endpoint. The quote
/// controller never calls this itself; simulated success ends at the page.
/// Hosts that do wire an endpoint own the user feedback for a failed
/// delivery.
pub trait SubmissionSink: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn deliver(&self, record: SubmissionRecord) -> BoxedDeliveryFuture<'_, Self::Error>;
}

/// Default sink: logs the record and drops it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl SubmissionSink for DiscardSink {
    type Error = Infallible;

    fn deliver(&self, record: SubmissionRecord) -> BoxedDeliveryFuture<'_, Self::Error> {
        Box::pin(async move {
            tracing::debug!(
                email = %record.email,
                submitted_at = %record.submitted_at,
                "no delivery endpoint configured, submission discarded"
            );
            Ok(())
        })
    }
}
