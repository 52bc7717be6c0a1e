use crate::fixtures::{init_tracing, resolver};
use peerdns::{
    AddressFamily, DnsResolver, Protocol, RecordKind, Resolution, ResolutionRequest, ResolveError,
    ServiceEndpoint, ServiceQuery, UnavailableTransport,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tests::{a, aaaa, cname, srv, StaticTransport};

fn v4(last: u8, port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)), port)
}

fn monitors() -> StaticTransport {
    StaticTransport::default()
        .with_records(
            "_mon._tcp.cluster.example",
            RecordKind::Srv,
            vec![srv(10, 5, 6789, "a.example"), srv(20, 1, 6790, "b.example")],
        )
        .with_records("a.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 1))])
        .with_records("b.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 2))])
}

#[tokio::test]
async fn every_target_is_resolved_with_its_srv_port() {
    // Arrange
    let transport = monitors();
    let resolver = resolver(&transport);

    // Act
    let endpoints = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap();

    // Assert
    assert_eq!(endpoints.len(), 2);
    assert_eq!(
        endpoints["a.example"],
        ServiceEndpoint {
            priority: 10,
            weight: 5,
            address: v4(1, 6789),
        }
    );
    assert_eq!(
        endpoints["b.example"],
        ServiceEndpoint {
            priority: 20,
            weight: 1,
            address: v4(2, 6790),
        }
    );
    assert_eq!(
        transport.queries(),
        vec![
            ("_mon._tcp.cluster.example".to_string(), RecordKind::Srv),
            ("a.example".to_string(), RecordKind::A),
            ("b.example".to_string(), RecordKind::A),
        ]
    );
}

#[tokio::test]
async fn missing_domain_queries_the_bare_service_name() {
    let transport = StaticTransport::default();
    let resolver = resolver(&transport);

    let endpoints = resolver
        .resolve_service("mon", Protocol::Udp, None)
        .await
        .unwrap();

    assert!(endpoints.is_empty());
    assert_eq!(
        transport.queries(),
        vec![("_mon._udp".to_string(), RecordKind::Srv)]
    );
}

#[tokio::test]
async fn duplicate_target_keeps_the_last_record() {
    let transport = StaticTransport::default()
        .with_records(
            "_mon._tcp.cluster.example",
            RecordKind::Srv,
            vec![srv(10, 5, 6789, "a.example"), srv(30, 7, 3300, "a.example")],
        )
        .with_records("a.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 1))]);
    let resolver = resolver(&transport);

    let endpoints = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap();

    assert_eq!(endpoints.len(), 1);
    assert_eq!(
        endpoints["a.example"],
        ServiceEndpoint {
            priority: 30,
            weight: 7,
            address: v4(1, 3300),
        }
    );
}

#[tokio::test]
async fn unresolvable_target_is_skipped() {
    // Steps:
    //  1. Advertise three targets.
    //  2. Make the address lookup of the second one fail.
    // What we want to test:
    //  The lookup succeeds with the two remaining targets.
    let transport = StaticTransport::default()
        .with_records(
            "_mon._tcp.cluster.example",
            RecordKind::Srv,
            vec![
                srv(10, 5, 6789, "a.example"),
                srv(10, 5, 6789, "stale.example"),
                srv(10, 5, 6789, "c.example"),
            ],
        )
        .with_records("a.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 1))])
        .with_failure("stale.example", RecordKind::A, "NXDOMAIN")
        .with_records("c.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 3))]);
    let resolver = resolver(&transport);

    let endpoints = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap();

    assert_eq!(endpoints.len(), 2);
    assert!(!endpoints.contains_key("stale.example"));
    assert_eq!(endpoints["c.example"].address, v4(3, 6789));
}

#[tokio::test]
async fn target_without_address_records_is_skipped() {
    let transport = StaticTransport::default()
        .with_records(
            "_mon._tcp.cluster.example",
            RecordKind::Srv,
            vec![srv(10, 5, 6789, "a.example"), srv(10, 5, 6789, "b.example")],
        )
        .with_records("a.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 1))]);
    let resolver = resolver(&transport);

    let endpoints = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap();

    assert_eq!(endpoints.keys().collect::<Vec<_>>(), vec!["a.example"]);
}

#[tokio::test]
async fn failed_srv_query_is_fatal() {
    let transport = monitors().with_failure(
        "_mon._tcp.cluster.example",
        RecordKind::Srv,
        "timed out",
    );
    let resolver = resolver(&transport);

    let err = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::Transport {
            kind: RecordKind::Srv,
            ..
        }
    ));
    // No target was looked up.
    assert_eq!(transport.queries().len(), 1);
}

#[tokio::test]
async fn records_other_than_srv_are_ignored() {
    let transport = StaticTransport::default()
        .with_records(
            "_mon._tcp.cluster.example",
            RecordKind::Srv,
            vec![
                cname("alias.cluster.example"),
                srv(10, 5, 6789, "a.example"),
                a(Ipv4Addr::new(10, 0, 0, 9)),
            ],
        )
        .with_records("a.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 1))]);
    let resolver = resolver(&transport);

    let endpoints = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap();

    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints["a.example"].address, v4(1, 6789));
}

#[tokio::test]
async fn targets_are_resolved_with_the_configured_family() {
    init_tracing();
    let ip = Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1);
    let transport = StaticTransport::default()
        .with_records(
            "_mon._tcp.cluster.example",
            RecordKind::Srv,
            vec![srv(10, 5, 6789, "a.example")],
        )
        .with_records("a.example", RecordKind::A, vec![a(Ipv4Addr::new(10, 0, 0, 1))])
        .with_records("a.example", RecordKind::Aaaa, vec![aaaa(ip)]);
    let resolver = DnsResolver::builder(transport.clone())
        .family(AddressFamily::Ipv6)
        .build();

    let endpoints = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap();

    assert_eq!(
        endpoints["a.example"].address,
        SocketAddr::new(IpAddr::V6(ip), 6789)
    );
    assert!(!transport.queries().contains(&("a.example".to_string(), RecordKind::A)));
}

#[tokio::test]
async fn unavailable_transport_fails_every_lookup() {
    let resolver = DnsResolver::builder(UnavailableTransport).build();

    let err = resolver
        .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::Transport { .. }));
}

#[tokio::test]
async fn requests_are_dispatched_to_the_matching_lookup() {
    let transport = monitors().with_records(
        "mon.cluster.example",
        RecordKind::Cname,
        vec![cname("a.example")],
    );
    let resolver = resolver(&transport);

    let cname = resolver
        .resolve(ResolutionRequest::Cname {
            hostname: "mon.cluster.example".to_string(),
        })
        .await
        .unwrap();
    let address = resolver
        .resolve(ResolutionRequest::Address {
            hostname: "b.example".to_string(),
            family: AddressFamily::Ipv4,
        })
        .await
        .unwrap();
    let query = ServiceQuery::from_parts("mon", Protocol::Tcp, Some("cluster.example")).unwrap();
    let service = resolver
        .resolve(ResolutionRequest::Service(query))
        .await
        .unwrap();

    assert_eq!(cname, Resolution::Cname("a.example".to_string()));
    assert_eq!(address, Resolution::Address(v4(2, 0)));
    match service {
        Resolution::Service(endpoints) => assert_eq!(endpoints.len(), 2),
        other => panic!("expected service endpoints, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_lookups_share_one_resolver() {
    let transport = monitors();
    let resolver = Arc::new(resolver(&transport));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move {
                resolver
                    .resolve_service("mon", Protocol::Tcp, Some("cluster.example"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let endpoints = handle.await.expect("task panicked").unwrap();
        assert_eq!(endpoints.len(), 2);
    }
    assert_eq!(transport.queries().len(), 8 * 3);
}
