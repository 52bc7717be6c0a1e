use peerdns::{DnsResolver, HickoryTransport, Protocol};

use anyhow::Context;

// Usage: discover <service> [domain]
//
// Set `RUST_LOG=peerdns=debug` to see every record that is looked at.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let service = args.next().unwrap_or_else(|| "mon".to_string());
    let domain = args.next();

    let transport =
        HickoryTransport::from_system_config().context("failed to build dns transport")?;
    let resolver = DnsResolver::builder(transport).build();

    let endpoints = resolver
        .resolve_service(&service, Protocol::Tcp, domain.as_deref())
        .await
        .context("failed to resolve service")?;

    for (host, endpoint) in endpoints {
        println!(
            "{host} priority={} weight={} address={}",
            endpoint.priority, endpoint.weight, endpoint.address
        );
    }

    Ok(())
}
