//! Defines the interface that [`DnsResolver`](crate::DnsResolver) requires in order
//! to issue DNS queries.

use crate::{RawRecord, RecordKind};

/// Interface that issues a single DNS query for a name and record kind.
#[async_trait::async_trait]
pub trait Transport {
    /// Return every record found in the response for `name`, in the order received.
    ///
    /// The response may hold records of other kinds than `kind`, the caller filters them.
    /// A response without records is an empty `Vec`, not an error.
    async fn query(&self, name: &str, kind: RecordKind) -> Result<Vec<RawRecord>, anyhow::Error>;
}

/// A [`Transport`] for platforms without a usable DNS query mechanism.
///
/// Every query fails, so every resolution reports a transport error.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTransport;

#[async_trait::async_trait]
impl Transport for UnavailableTransport {
    async fn query(&self, name: &str, kind: RecordKind) -> Result<Vec<RawRecord>, anyhow::Error> {
        Err(anyhow::anyhow!(
            "no dns transport available on this platform to query {kind} '{name}'"
        ))
    }
}

#[async_trait::async_trait]
impl<T: Transport + Send + Sync + ?Sized> Transport for std::sync::Arc<T> {
    async fn query(&self, name: &str, kind: RecordKind) -> Result<Vec<RawRecord>, anyhow::Error> {
        (**self).query(name, kind).await
    }
}
