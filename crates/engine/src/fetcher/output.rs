use std::fmt;

use futures::{FutureExt, StreamExt, TryStreamExt, future::BoxFuture, stream::BoxStream};
use request::Value;

use crate::FetchError;

/// The result of a field resolution. Eager values are handed back as is, backend calls are not
/// awaited by the engine but returned to the caller.
pub enum FieldOutput<'a> {
    Value(Value),
    Future(BoxFuture<'a, Result<Value, FetchError>>),
    /// One item per record, for subscriptions.
    Stream(BoxStream<'a, Result<Value, FetchError>>),
}

impl<'a> FieldOutput<'a> {
    /// Waits for the value. A stream is collected into a list, stopping at the first error.
    pub async fn resolve(self) -> Result<Value, FetchError> {
        match self {
            FieldOutput::Value(value) => Ok(value),
            FieldOutput::Future(future) => future.await,
            FieldOutput::Stream(stream) => {
                let values = stream.try_collect::<Vec<_>>().await?;
                Ok(Value::Array(values))
            }
        }
    }

    pub fn into_stream(self) -> BoxStream<'a, Result<Value, FetchError>> {
        match self {
            FieldOutput::Value(value) => futures::stream::once(async move { Ok(value) }).boxed(),
            FieldOutput::Future(future) => future.into_stream().boxed(),
            FieldOutput::Stream(stream) => stream,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, FieldOutput::Value(_))
    }
}

impl fmt::Debug for FieldOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldOutput::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldOutput::Future(_) => f.write_str("Future"),
            FieldOutput::Stream(_) => f.write_str("Stream"),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{FutureExt, StreamExt};
    use serde_json::json;

    use super::*;

    async fn items(output: FieldOutput<'_>) -> Vec<Value> {
        output.into_stream().map(|item| item.unwrap()).collect().await
    }

    #[tokio::test]
    async fn into_stream() {
        assert_eq!(items(FieldOutput::Value(json!("Alfa"))).await, [json!("Alfa")]);

        let future = async { Ok::<_, FetchError>(json!({"name": "Alfa"})) }.boxed();
        assert_eq!(items(FieldOutput::Future(future)).await, [json!({"name": "Alfa"})]);

        let stream = futures::stream::iter([json!(1), json!(2)]).map(Ok::<_, FetchError>).boxed();
        assert_eq!(items(FieldOutput::Stream(stream)).await, [json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn into_stream_keeps_errors() {
        let err = FetchError::backend("brewery")(anyhow::anyhow!("connection refused"));
        let future = async move { Err::<Value, _>(err) }.boxed();

        let items = FieldOutput::Future(future).into_stream().collect::<Vec<_>>().await;

        let [Err(err)] = items.as_slice() else {
            unreachable!("one failed item");
        };
        insta::assert_snapshot!(err, @"Backend failed to load field 'brewery': connection refused");
    }
}
