use crate::{Protocol, ResolveError};
use anyhow::Context;

/// Defines a service advertised through SRV records with a `service_name`, a
/// [`Protocol`] and an optional `domain`.
///
/// The SRV records are looked up under `_<service_name>._<protocol>[.<domain>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuery {
    /// The service name without the leading underscore, e.g. `mon`.
    service_name: String,
    protocol: Protocol,
    /// The domain the service is advertised under, if any.
    domain: Option<String>,
}

impl ServiceQuery {
    /// Create a [`ServiceQuery`] from its parts. An empty `domain` is the same as no domain.
    ///
    /// This function will fail if the resulting query name is not a valid domain name.
    pub fn from_parts<S: ToString>(
        service_name: S,
        protocol: Protocol,
        domain: Option<&str>,
    ) -> Result<Self, ResolveError> {
        let service_name = service_name.to_string();
        let domain = domain
            .filter(|domain| !domain.is_empty())
            .map(str::to_string);

        if service_name.is_empty() {
            return Err(ResolveError::InvalidName {
                name: service_name,
                source: anyhow::anyhow!("empty service name").into(),
            });
        }

        let query = Self {
            service_name,
            protocol,
            domain,
        };
        validate_name(&query.query_name())?;

        Ok(query)
    }

    /// Get the `service_name` part of a `ServiceQuery`.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Get the [`Protocol`] of a `ServiceQuery`.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Get the `domain` part of a `ServiceQuery`.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The name the SRV query is issued for.
    ///
    /// ```
    /// use peerdns::{Protocol, ServiceQuery};
    ///
    /// let query = ServiceQuery::from_parts("mon", Protocol::Tcp, Some("cluster.example")).unwrap();
    /// assert_eq!(query.query_name(), "_mon._tcp.cluster.example");
    ///
    /// let query = ServiceQuery::from_parts("mon", Protocol::Udp, None).unwrap();
    /// assert_eq!(query.query_name(), "_mon._udp");
    /// ```
    pub fn query_name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("_{}._{}.{}", self.service_name, self.protocol, domain),
            None => format!("_{}._{}", self.service_name, self.protocol),
        }
    }
}

/// Check that `name` is a non-empty, valid domain name.
pub(crate) fn validate_name(name: &str) -> Result<(), ResolveError> {
    let invalid = |source: anyhow::Error| ResolveError::InvalidName {
        name: name.to_string(),
        source: source.into(),
    };

    if name.is_empty() {
        return Err(invalid(anyhow::anyhow!("empty name")));
    }

    hickory_resolver::Name::from_ascii(name)
        .map_err(anyhow::Error::from)
        .context("invalid domain name")
        .map_err(invalid)?;

    Ok(())
}

/// ```
/// let query = peerdns::ServiceQuery::try_from(("mon", peerdns::Protocol::Tcp)).unwrap();
/// assert_eq!(query.service_name(), "mon");
/// assert_eq!(query.domain(), None);
/// ```
impl TryFrom<(&str, Protocol)> for ServiceQuery {
    type Error = ResolveError;

    fn try_from((service_name, protocol): (&str, Protocol)) -> Result<Self, Self::Error> {
        Self::from_parts(service_name, protocol, None)
    }
}

/// ```
/// let query = peerdns::ServiceQuery::try_from(("mon", peerdns::Protocol::Tcp, "cluster.example")).unwrap();
/// assert_eq!(query.domain(), Some("cluster.example"));
/// ```
impl TryFrom<(&str, Protocol, &str)> for ServiceQuery {
    type Error = ResolveError;

    fn try_from((service_name, protocol, domain): (&str, Protocol, &str)) -> Result<Self, Self::Error> {
        Self::from_parts(service_name, protocol, Some(domain))
    }
}
