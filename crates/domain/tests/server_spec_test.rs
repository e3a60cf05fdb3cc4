use dnsprobe_domain::{DomainError, ServerSpec, TransportKind, UpstreamAddr};

#[test]
fn test_parse_udp() {
    let spec: ServerSpec = "udp://8.8.8.8:53".parse().unwrap();
    assert!(matches!(spec, ServerSpec::Udp { .. }));
    assert_eq!(spec.address(), "8.8.8.8:53");
}

#[test]
fn test_parse_udp_default() {
    let spec: ServerSpec = "8.8.8.8".parse().unwrap();
    if let ServerSpec::Udp { addr } = spec {
        assert_eq!(addr.socket_addr(), Some("8.8.8.8:53".parse().unwrap()));
    } else {
        panic!("Expected Udp variant");
    }
}

#[test]
fn test_parse_udp_ipv6() {
    let spec: ServerSpec = "udp://[2001:4860:4860::8888]:53".parse().unwrap();
    assert_eq!(spec.address(), "[2001:4860:4860::8888]:53");

    let bare: ServerSpec = "2606:4700:4700::1111".parse().unwrap();
    assert_eq!(bare.kind(), TransportKind::Udp);
    assert_eq!(bare.address(), "[2606:4700:4700::1111]:53");
}

#[test]
fn test_parse_udp_hostname() {
    let spec: ServerSpec = "udp://resolver.example.net".parse().unwrap();
    if let ServerSpec::Udp { addr } = spec {
        assert_eq!(addr.unresolved_parts(), Some(("resolver.example.net", 53)));
    } else {
        panic!("Expected Udp variant");
    }
}

#[test]
fn test_parse_dot_default_port() {
    let spec: ServerSpec = "dot://1.1.1.1".parse().unwrap();
    if let ServerSpec::Tls { addr, hostname } = spec {
        assert_eq!(addr.socket_addr(), Some("1.1.1.1:853".parse().unwrap()));
        assert_eq!(&*hostname, "1.1.1.1");
    } else {
        panic!("Expected Tls variant");
    }
}

#[test]
fn test_parse_tls_alias_hostname() {
    let spec: ServerSpec = "tls://dns.google:853".parse().unwrap();
    if let ServerSpec::Tls { addr, hostname } = &spec {
        assert_eq!(&**hostname, "dns.google");
        assert!(matches!(addr, UpstreamAddr::Unresolved { .. }));
    } else {
        panic!("Expected Tls variant");
    }
    assert_eq!(spec.address(), "dns.google:853");
    assert_eq!(spec.to_string(), "dot://dns.google:853");
}

#[test]
fn test_parse_doh_with_url() {
    let spec: ServerSpec = "doh://https://dns.google/dns-query".parse().unwrap();
    assert_eq!(spec, ServerSpec::Doh { url: "https://dns.google/dns-query".into() });
}

#[test]
fn test_parse_doh_without_inner_scheme() {
    let spec: ServerSpec = "doh://cloudflare-dns.com/dns-query".parse().unwrap();
    assert_eq!(spec.address(), "https://cloudflare-dns.com/dns-query");
}

#[test]
fn test_parse_bare_https_url() {
    let spec: ServerSpec = "https://dns.quad9.net/dns-query".parse().unwrap();
    assert_eq!(spec.kind(), TransportKind::Doh);
    assert_eq!(spec.address(), "https://dns.quad9.net/dns-query");
}

#[test]
fn test_parse_uppercase_https_scheme() {
    let bare: ServerSpec = "HTTPS://dns.google/dns-query".parse().unwrap();
    assert_eq!(bare.address(), "https://dns.google/dns-query");

    let wrapped: ServerSpec = "doh://Https://dns.google/dns-query".parse().unwrap();
    assert_eq!(wrapped.address(), "https://dns.google/dns-query");

    let plain: ServerSpec = "doh://HTTP://127.0.0.1:8080/dns-query".parse().unwrap();
    assert_eq!(plain.address(), "http://127.0.0.1:8080/dns-query");
}

#[test]
fn test_parse_local_forms() {
    for input in ["local", "LOCAL", "local://", "local://ignored"] {
        let spec: ServerSpec = input.parse().unwrap();
        assert_eq!(spec, ServerSpec::Local, "input {}", input);
        assert_eq!(spec.address(), "local");
    }
}

#[test]
fn test_fragment_is_ignored() {
    let spec: ServerSpec = "dot://1.1.1.1:853#skip-cert-verify=true".parse().unwrap();
    assert_eq!(spec.address(), "1.1.1.1:853");
}

#[test]
fn test_unknown_scheme_rejected() {
    let err = "quic://1.1.1.1".parse::<ServerSpec>().unwrap_err();
    assert!(matches!(err, DomainError::InvalidServerSpec(_)));
}

#[test]
fn test_empty_rejected() {
    assert!("".parse::<ServerSpec>().is_err());
    assert!("   ".parse::<ServerSpec>().is_err());
}

#[test]
fn test_bad_port_rejected() {
    assert!("udp://8.8.8.8:99999".parse::<ServerSpec>().is_err());
    assert!("dot://dns.google:abc".parse::<ServerSpec>().is_err());
}

#[test]
fn test_parse_with_kind() {
    let spec = ServerSpec::parse_with_kind(TransportKind::Tls, "1.1.1.1").unwrap();
    assert_eq!(spec.kind(), TransportKind::Tls);

    let explicit = ServerSpec::parse_with_kind(TransportKind::Tls, "udp://9.9.9.9").unwrap();
    assert_eq!(explicit.kind(), TransportKind::Udp);

    let doh =
        ServerSpec::parse_with_kind(TransportKind::Doh, "https://dns.google/dns-query").unwrap();
    assert_eq!(doh.kind(), TransportKind::Doh);
}
