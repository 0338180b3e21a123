use async_trait::async_trait;
use crate::features::snapshot::SystemSnapshot;
use crate::shared::error::CollectionError;

/// An independent, potentially-failing data source contributing a subset of
/// snapshot fields. Probes report failures through `CollectionError`; the
/// aggregation step decides which fields degrade to the sentinel.
#[async_trait]
pub trait AsyncProbe<T: Send> {
    async fn collect(&self) -> Result<T, CollectionError>;
    fn name(&self) -> &'static str;
}

/// One-way delivery of a finished snapshot. Implementations log their own
/// outcome; the aggregation cycle never sees it.
#[async_trait]
pub trait SnapshotSink {
    async fn send(&self, snapshot: &SystemSnapshot);
}
