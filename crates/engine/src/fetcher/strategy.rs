/// How a field gets its value. Decided once per field resolution, before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum FetchStrategy {
    /// The parent record already holds the value.
    EagerLoaded,
    /// A root subscription field, streamed from the backend.
    Subscription,
    /// A list of records, loaded as a whole.
    CollectionFetch,
    /// Zero or one record.
    SingleFetch,
    /// One record per key of a batch query.
    BatchFetch,
    /// The nested collection of a parent record, matched through join columns.
    JoinedCollectionFetch,
    /// A nested scalar, read from the parent record or computed by a value fetcher.
    Scalar,
    /// A nested object field neither loaded with its parent nor joinable. Resolves to `null`, or an
    /// empty list.
    Missing,
}
