//! Stream adapters for importing and exporting quads

use super::Dataset;
use crate::rdf::{QuadLike, TermFactory};
use crate::store::{StoreError, StoreResult};
use futures::stream::{self, Stream, StreamExt};
use std::error::Error;
use tracing::{info, warn};

type BoxError = Box<dyn Error + Send + Sync>;

impl<Q: QuadLike, F: TermFactory> Dataset<Q, F> {
    /// Add every quad of the stream as it arrives.
    ///
    /// Resolves with the number of quads consumed once the stream ends. On an
    /// upstream error the quads committed so far stay in the dataset and the
    /// error is returned with their count.
    pub async fn import<S, E>(&mut self, quads: S) -> StoreResult<usize>
    where
        S: Stream<Item = Result<Q, E>>,
        E: Into<BoxError>,
    {
        let mut quads = std::pin::pin!(quads);
        let mut committed = 0;
        while let Some(item) = quads.next().await {
            self.commit(item, &mut committed)?;
        }
        info!(committed, "import finished");
        Ok(committed)
    }

    /// Synchronous counterpart of [`Dataset::import`]
    pub fn import_iter<I, E>(&mut self, quads: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = Result<Q, E>>,
        E: Into<BoxError>,
    {
        let mut committed = 0;
        for item in quads {
            self.commit(item, &mut committed)?;
        }
        info!(committed, "import finished");
        Ok(committed)
    }

    fn commit<E: Into<BoxError>>(&mut self, item: Result<Q, E>, committed: &mut usize) -> StoreResult<()> {
        match item {
            Ok(quad) => {
                self.store.add_quad(quad);
                *committed += 1;
                Ok(())
            }
            Err(err) => {
                let source = err.into();
                warn!(committed = *committed, error = %source, "import aborted");
                Err(StoreError::Import {
                    committed: *committed,
                    source,
                })
            }
        }
    }

    /// Remove every quad of the stream; resolves with how many were present
    pub async fn remove_stream<S>(&mut self, quads: S) -> usize
    where
        S: Stream<Item = Q>,
    {
        let mut quads = std::pin::pin!(quads);
        let mut removed = 0;
        while let Some(quad) = quads.next().await {
            if self.store.remove_quad(&quad) {
                removed += 1;
            }
        }
        removed
    }

    /// Stream of every stored quad, each emitted once
    pub fn to_stream(&self) -> impl Stream<Item = &Q> + '_ {
        stream::iter(self.iter())
    }
}
