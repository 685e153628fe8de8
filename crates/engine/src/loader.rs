use futures::{future::BoxFuture, stream::BoxStream};
use request::{BatchRequest, CollectionBatchRequest, CollectionRequest, JoinKey, KeyCriteria, ObjectRequest, Record};

/// The storage side of the engine. Implementations translate request trees into whatever their
/// backend understands: SQL, SPARQL, an HTTP call. Every method is called without any lock held and
/// may suspend freely.
///
/// Nested object, collection and aggregate values loaded along with a record are stored in it under
/// the `key` of their request, so aliased selections of one field don't overwrite each other.
pub trait BackendLoader: Send + Sync {
    /// Zero or one record matching the key criteria of the request.
    fn load_single<'a>(&'a self, request: ObjectRequest<'a>) -> BoxFuture<'a, anyhow::Result<Option<Record>>>;

    fn load_many<'a>(&'a self, request: CollectionRequest<'a>) -> BoxStream<'a, anyhow::Result<Record>>;

    /// One item per key of the batch, in any order. Keys without a record yield `None`.
    fn batch_load_single<'a>(
        &'a self,
        request: BatchRequest<'a>,
    ) -> BoxStream<'a, anyhow::Result<(KeyCriteria<'a>, Option<Record>)>>;

    /// One item per join key of the batch, in any order, with the records of that key.
    fn batch_load_many<'a>(
        &'a self,
        request: CollectionBatchRequest<'a>,
    ) -> BoxStream<'a, anyhow::Result<(JoinKey, Vec<Record>)>>;
}
