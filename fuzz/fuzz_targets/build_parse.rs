#![no_main]
use generic_uri::Uri;
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

#[derive(Arbitrary, Debug)]
struct Parts<'a> {
    scheme: Option<&'a str>,
    userinfo: Option<&'a str>,
    host: Option<&'a str>,
    port: Option<u16>,
    path: Option<&'a str>,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fuzz_target!(|p: Parts<'_>| {
    let Ok(u) = Uri::from_server_parts(
        p.scheme, p.userinfo, p.host, p.port, p.path, p.query, p.fragment,
    ) else {
        return;
    };

    if let Some(fragment) = p.fragment {
        assert_eq!(u.fragment_decoded().as_deref(), Some(fragment));
    }
    if p.host.is_some_and(|h| !h.is_empty()) {
        assert!(u.authority().is_some_and(|a| a.is_server_based()));
        assert_eq!(u.port(), p.port);
    }

    let parsed = Uri::parse(u.as_str()).unwrap();
    assert_eq!(u, parsed);
});
