use crate::{Result, Table};

use sqltable_core::Value;
use tokio_stream::{Stream, StreamExt};

use std::{
    collections::VecDeque,
    pin::Pin,
    task::{Context, Poll},
};

type DynStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'static>>;

/// A lazy, finite sequence of items read from a table.
///
/// The connection is not held between items, so the caller may issue other
/// statements on the same database while consuming a cursor. Dropping a
/// cursor early leaves nothing open. To walk the table again, ask the table
/// for a new cursor.
pub struct Cursor<T> {
    stream: DynStream<T>,
}

pub trait FromCursor<A>: Extend<A> + Default {}

impl<A, T: Extend<A> + Default> FromCursor<A> for T {}

impl<T> Cursor<T> {
    pub(crate) fn from_stream(stream: impl Stream<Item = Result<T>> + Send + 'static) -> Self {
        Self {
            stream: Box::pin(stream),
        }
    }

    pub async fn next(&mut self) -> Option<Result<T>> {
        StreamExt::next(&mut self.stream).await
    }

    /// Collect all values
    pub async fn collect<B>(mut self) -> Result<B>
    where
        B: FromCursor<T>,
    {
        let mut ret = B::default();

        while let Some(res) = self.next().await {
            ret.extend(Some(res?));
        }

        Ok(ret)
    }
}

impl<T> Stream for Cursor<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }
}

impl<T> std::fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}

/// The keys of a table at one point in time, in primary-key order.
///
/// Taking a snapshot reads every key with one statement and releases the
/// connection before any key is handed out. Later inserts and deletes do not
/// change the snapshot.
#[derive(Debug, Default)]
pub struct Snapshot {
    keys: VecDeque<Value>,
}

impl Snapshot {
    pub async fn take(table: &Table) -> Result<Snapshot> {
        let keys = table.keys().await?;
        tracing::debug!(table = table.name(), keys = keys.len(), "key snapshot");

        Ok(Snapshot { keys: keys.into() })
    }

    /// Keys not yet handed out.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Removes and returns up to `size` keys from the front.
    pub fn next_batch(&mut self, size: usize) -> Vec<Value> {
        let size = size.min(self.keys.len());
        self.keys.drain(..size).collect()
    }
}

impl Iterator for Snapshot {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.keys.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.keys.len(), Some(self.keys.len()))
    }
}

impl From<Vec<Value>> for Snapshot {
    fn from(keys: Vec<Value>) -> Self {
        Snapshot { keys: keys.into() }
    }
}
