//! `peerdns` resolves the DNS records a cluster needs to discover its peers
//! without static configuration: CNAME aliases, IPv4/IPv6 addresses and,
//! most importantly, SRV records combined with the addresses of their targets.
//!
//! # Simple example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() {
//!     use peerdns::{DnsResolver, Protocol};
//!
//!     // Create a resolver with the system dns configuration.
//!     let resolver = DnsResolver::from_system_config()
//!         .expect("failed to construct DnsResolver");
//!
//!     // Queries `_mon._tcp.cluster.example` and resolves every target.
//!     let monitors = resolver
//!         .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
//!         .await
//!         .expect("failed to resolve monitors");
//!
//!     for (host, endpoint) in &monitors {
//!         println!("{host} -> {} (priority {})", endpoint.address, endpoint.priority);
//!     }
//! }
//! ```
//!
//! [`DnsResolver`] also allows plugging in a different implementation of [`Transport`].
//!
//! ```rust
//! use peerdns::{RawRecord, RecordKind, Transport};
//!
//! // Never finds anything
//! struct EmptyTransport;
//!
//! #[async_trait::async_trait]
//! impl Transport for EmptyTransport {
//!     async fn query(
//!         &self,
//!         _name: &str,
//!         _kind: RecordKind,
//!     ) -> Result<Vec<RawRecord>, anyhow::Error> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     use peerdns::{DnsResolver, Protocol};
//!
//!     let resolver = DnsResolver::builder(EmptyTransport).build();
//!
//!     let endpoints = resolver
//!         .resolve_service("mon", Protocol::Tcp, None)
//!         .await
//!         .expect("an empty response is not an error");
//!     assert!(endpoints.is_empty());
//! }
//! ```
//!
//! Nodes that bind to IPv6 resolve SRV targets to `AAAA` records.
//!
//! ```rust
//! use peerdns::{AddressFamily, DnsResolver, UnavailableTransport};
//!
//! let resolver = DnsResolver::builder(UnavailableTransport)
//!     .bind_ipv6(true)
//!     .build();
//!
//! assert_eq!(resolver.family(), AddressFamily::Ipv6);
//! ```
//!
//! # Errors
//!
//! A failing query is reported as [`ResolveError::Transport`]. A CNAME lookup
//! without any CNAME record fails with [`ResolveError::NotFound`], while an
//! address lookup without a matching record fails with
//! [`ParseError::Empty`] since there is no address to parse.
//!
//! Service lookups tolerate bad targets: a target that cannot be resolved is
//! logged with `tracing` and left out of the returned [`ServiceMap`].

mod address;
mod error;
mod hickory_transport;
mod record;
mod resolver;
mod service;
mod service_query;
mod transport;

pub use address::*;
pub use error::*;
pub use hickory_transport::*;
pub use record::*;
pub use resolver::*;
pub use service::{ServiceEndpoint, ServiceMap};
pub use service_query::ServiceQuery;
pub use transport::*;
