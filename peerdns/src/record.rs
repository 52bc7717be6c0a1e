//! The resource records a [`Transport`](crate::Transport) hands back to the resolver.

use std::fmt;

/// Selects which address records are queried for a hostname.
///
/// Exactly one family is queried per address lookup; records of the other
/// family are ignored even if the server returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressFamily {
    #[default]
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// The record kind to query for this family, `A` or `AAAA`.
    pub fn record_kind(self) -> RecordKind {
        match self {
            AddressFamily::Ipv4 => RecordKind::A,
            AddressFamily::Ipv6 => RecordKind::Aaaa,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => f.write_str("IPv4"),
            AddressFamily::Ipv6 => f.write_str("IPv6"),
        }
    }
}

/// The record types a query can be issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Cname,
    A,
    Aaaa,
    Srv,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            RecordKind::Cname => "CNAME",
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Srv => "SRV",
        };
        f.write_str(kind)
    }
}

/// A single resource record from a DNS response.
///
/// A response may contain records of other kinds than the one that was
/// queried, the resolver filters them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    /// An alias to the canonical `target` hostname.
    Cname { target: String },
    /// An `A` or `AAAA` record holding the address in network byte order.
    Address { family: AddressFamily, raw: Vec<u8> },
    /// A service location record.
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
}

impl RawRecord {
    /// The [`RecordKind`] of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            RawRecord::Cname { .. } => RecordKind::Cname,
            RawRecord::Address { family, .. } => family.record_kind(),
            RawRecord::Srv { .. } => RecordKind::Srv,
        }
    }
}

/// Transport protocol tag of a service, used to build SRV query names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// The label used in `_service._proto` query names.
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
