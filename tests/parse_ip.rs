use std::net::{Ipv4Addr, Ipv6Addr};

use generic_uri::{component::Host, ParseErrorKind, Uri};

fn parse_v4(s: &str) -> Option<Ipv4Addr> {
    let s = format!("//{s}");
    match Uri::parse(s).ok()?.authority()?.host_parsed()? {
        Host::Ipv4(addr) => Some(addr),
        _ => None,
    }
}

fn parse_v6(s: &str) -> Result<Ipv6Addr, ParseErrorKind> {
    let s = format!("//[{s}]");
    let uri = Uri::parse(s).map_err(|e| e.kind())?;
    match uri.authority().and_then(|a| a.host_parsed()) {
        Some(Host::Ipv6 { addr, .. }) => Ok(addr),
        _ => unreachable!(),
    }
}

#[test]
fn test_parse_v4() {
    assert_eq!(Some(Ipv4Addr::new(127, 0, 0, 1)), parse_v4("127.0.0.1"));
    assert_eq!(
        Some(Ipv4Addr::new(255, 255, 255, 255)),
        parse_v4("255.255.255.255")
    );
    assert_eq!(Some(Ipv4Addr::new(0, 0, 0, 0)), parse_v4("0.0.0.0"));
    assert_eq!(Some(Ipv4Addr::new(10, 0, 0, 1)), parse_v4("10.0.0.1:80"));

    // out of range
    assert!(parse_v4("256.0.0.1").is_none());
    // too short
    assert!(parse_v4("255.0.0").is_none());
    // too long
    assert!(parse_v4("255.0.0.1.2").is_none());
    // no number between dots
    assert!(parse_v4("255.0..1").is_none());
    // more than three digits
    assert!(parse_v4("0127.0.0.1").is_none());
}

#[test]
fn v4_like_hosts_fall_back() {
    // A dotted name whose last label starts with a digit is neither
    // an address nor a hostname.
    let u = Uri::parse("http://1.2.3/").unwrap();
    assert!(!u.authority().unwrap().is_server_based());

    // A hostname may start with digits if its last label does not.
    let u = Uri::parse("http://1.2.3.com/").unwrap();
    assert_eq!(
        u.authority().unwrap().host_parsed(),
        Some(Host::Name("1.2.3.com"))
    );

    let u = Uri::parse("http://123/").unwrap();
    assert_eq!(u.authority().unwrap().host_parsed(), Some(Host::Name("123")));
}

#[test]
fn test_parse_v6() {
    assert_eq!(Ok(Ipv6Addr::UNSPECIFIED), parse_v6("::"));
    assert_eq!(Ok(Ipv6Addr::LOCALHOST), parse_v6("::1"));
    assert_eq!(
        Ok(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
        parse_v6("2001:DB8::1")
    );
    assert_eq!(
        Ok(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8)),
        parse_v6("1:2:3:4:5:6:7:8")
    );
    assert_eq!(
        Ok(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0)),
        parse_v6("fe80::")
    );

    // too many groups
    assert_eq!(Err(ParseErrorKind::Ipv6TooLong), parse_v6("1:2:3:4:5:6:7:8:9"));
    // too few groups without compression
    assert_eq!(Err(ParseErrorKind::Ipv6TooShort), parse_v6("1:2:3:4:5:6:7"));
    // compression standing for no group
    assert_eq!(Err(ParseErrorKind::MalformedIpv6), parse_v6("1:2:3:4::5:6:7:8"));
    // more than one compression
    assert_eq!(Err(ParseErrorKind::ExpectedIpv4), parse_v6("1::2::3"));
    // more than four digits
    assert_eq!(Err(ParseErrorKind::Ipv6HexDigits), parse_v6("12345::"));
    // single colon at the start
    assert_eq!(Err(ParseErrorKind::MalformedIpv6), parse_v6(":1::"));
    // trailing single colon
    assert_eq!(Err(ParseErrorKind::ExpectedIpv6Digits), parse_v6("1::2:"));
    // neither hexadecimal nor an IPv4 address
    assert_eq!(Err(ParseErrorKind::ExpectedIpv4), parse_v6("1::g"));
}

#[test]
fn test_parse_v4_in_v6() {
    assert_eq!(
        Ok(Ipv4Addr::new(192, 0, 2, 33).to_ipv6_mapped()),
        parse_v6("::ffff:192.0.2.33")
    );
    assert_eq!(
        Ok(Ipv6Addr::new(0x64, 0xff9b, 0, 0, 0, 0, 0xc000, 0x221)),
        parse_v6("64:ff9b::192.0.2.33")
    );
    assert_eq!(
        Ok(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 0xc000, 0x221)),
        parse_v6("1:2:3:4:5:6:192.0.2.33")
    );

    // the embedded address counts as four bytes
    assert_eq!(
        Err(ParseErrorKind::Ipv6TooLong),
        parse_v6("1:2:3:4:5:6:7:192.0.2.33")
    );
    assert_eq!(
        Err(ParseErrorKind::MalformedIpv6),
        parse_v6("1:2:3:4:5::6:192.0.2.33")
    );
    assert_eq!(
        Err(ParseErrorKind::MalformedIpv4),
        parse_v6("::192.0.2")
    );
    assert_eq!(
        Err(ParseErrorKind::MalformedIpv4),
        parse_v6("::256.0.2.33")
    );
}
