use crate::{AddressFamily, RecordKind};

/// Errors returned by [`DnsResolver`](crate::DnsResolver).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The query itself failed, e.g. the server could not be reached.
    #[error("{kind} query for '{name}' failed")]
    Transport {
        name: String,
        kind: RecordKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The query succeeded but returned no record of the requested kind.
    #[error("no {kind} record found for '{name}'")]
    NotFound { name: String, kind: RecordKind },
    /// An address from the response could not be converted.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The hostname or the query name built from it is not a valid domain name.
    #[error("invalid domain name '{name}'")]
    InvalidName {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ResolveError {
    pub(crate) fn transport(name: &str, kind: RecordKind, source: anyhow::Error) -> Self {
        Self::Transport {
            name: name.to_string(),
            kind,
            source: source.into(),
        }
    }

    /// Whether the query succeeded but held no record of the requested kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

/// Errors of an [`AddressCodec`](crate::AddressCodec).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// There was no address to parse.
    #[error("no address to parse")]
    Empty,
    /// The text is not a numeric IPv4 or IPv6 address.
    #[error("failed to parse address '{text}'")]
    Malformed {
        text: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The raw record data has the wrong length for its family.
    #[error("{len} bytes is not a valid {family} address")]
    RawLength { family: AddressFamily, len: usize },
}
