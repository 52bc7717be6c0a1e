//! Conversion of raw record data into structured socket addresses.

use crate::{AddressFamily, ParseError};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Turns address record data into a [`SocketAddr`].
///
/// Conversion happens in two steps so the resolver can keep the textual
/// form of the last matching record and parse it once at the end.
pub trait AddressCodec {
    /// Render the network-order bytes of an address of `family` as text.
    fn format_raw(&self, family: AddressFamily, raw: &[u8]) -> Result<String, ParseError>;

    /// Parse a numeric IPv4 or IPv6 address. The returned address has port `0`.
    fn parse_text(&self, text: &str) -> Result<SocketAddr, ParseError>;
}

/// The default [`AddressCodec`], backed by the [`std::net`] address types.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAddressCodec;

impl AddressCodec for TextAddressCodec {
    fn format_raw(&self, family: AddressFamily, raw: &[u8]) -> Result<String, ParseError> {
        let invalid = || ParseError::RawLength {
            family,
            len: raw.len(),
        };

        let ip: IpAddr = match family {
            AddressFamily::Ipv4 => {
                let octets: [u8; 4] = raw.try_into().map_err(|_| invalid())?;
                Ipv4Addr::from(octets).into()
            }
            AddressFamily::Ipv6 => {
                let octets: [u8; 16] = raw.try_into().map_err(|_| invalid())?;
                Ipv6Addr::from(octets).into()
            }
        };

        Ok(ip.to_string())
    }

    fn parse_text(&self, text: &str) -> Result<SocketAddr, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let ip = text
            .parse::<IpAddr>()
            .map_err(|source| ParseError::Malformed {
                text: text.to_string(),
                source,
            })?;

        Ok(SocketAddr::new(ip, 0))
    }
}
