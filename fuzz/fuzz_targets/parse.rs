#![no_main]
use generic_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(u) = Uri::parse(data) else {
        return;
    };
    let mut buf = String::with_capacity(data.len());
    if let Some(s) = u.scheme() {
        buf.push_str(s.as_str());
        buf.push(':');
    }
    if u.is_opaque() {
        buf.push_str(u.scheme_specific_part());
    } else {
        if let Some(a) = u.authority() {
            buf.push_str("//");
            if a.is_server_based() {
                let host = a.host().unwrap();
                let start = a.userinfo().map_or(0, |ui| ui.len() + 1);
                assert_eq!(&a.as_str()[start..start + host.len()], host);
                if a.port().is_some() {
                    assert!(a.as_str()[start + host.len()..].starts_with(':'));
                }
            }
            buf.push_str(a.as_str());
        }
        buf.push_str(u.path().unwrap());
        if let Some(q) = u.query() {
            buf.push('?');
            buf.push_str(q);
        }
    }
    if let Some(f) = u.fragment() {
        buf.push('#');
        buf.push_str(f);
    }
    assert_eq!(data, buf);

    let again = Uri::parse(u.to_string()).unwrap();
    assert_eq!(u, again);
});
