use generic_uri::{component::Host, ParseErrorKind, Part, Uri};
use std::net::Ipv6Addr;

#[track_caller]
fn resolve(base: &str, r: &str) -> String {
    let base = Uri::parse(base).unwrap();
    base.resolve_str(r).unwrap().into_string()
}

#[track_caller]
fn relativize(base: &str, child: &str) -> String {
    let base = Uri::parse(base).unwrap();
    let child = Uri::parse(child).unwrap();
    base.relativize(&child).into_string()
}

#[test]
fn resolve_rfc2396_examples() {
    const BASE: &str = "http://a/b/c/d;p?q";

    // Normal examples.
    assert_eq!(resolve(BASE, "g:h"), "g:h");
    assert_eq!(resolve(BASE, "g"), "http://a/b/c/g");
    assert_eq!(resolve(BASE, "./g"), "http://a/b/c/g");
    assert_eq!(resolve(BASE, "g/"), "http://a/b/c/g/");
    assert_eq!(resolve(BASE, "/g"), "http://a/g");
    assert_eq!(resolve(BASE, "//g"), "http://g");
    assert_eq!(resolve(BASE, "?y"), "http://a/b/c/?y");
    assert_eq!(resolve(BASE, "g?y"), "http://a/b/c/g?y");
    assert_eq!(resolve(BASE, "#s"), "http://a/b/c/d;p?q#s");
    assert_eq!(resolve(BASE, "g#s"), "http://a/b/c/g#s");
    assert_eq!(resolve(BASE, "g?y#s"), "http://a/b/c/g?y#s");
    assert_eq!(resolve(BASE, ";x"), "http://a/b/c/;x");
    assert_eq!(resolve(BASE, "g;x"), "http://a/b/c/g;x");
    assert_eq!(resolve(BASE, "g;x?y#s"), "http://a/b/c/g;x?y#s");
    assert_eq!(resolve(BASE, "."), "http://a/b/c/");
    assert_eq!(resolve(BASE, "./"), "http://a/b/c/");
    assert_eq!(resolve(BASE, ".."), "http://a/b/");
    assert_eq!(resolve(BASE, "../"), "http://a/b/");
    assert_eq!(resolve(BASE, "../g"), "http://a/b/g");
    assert_eq!(resolve(BASE, "../.."), "http://a/");
    assert_eq!(resolve(BASE, "../../"), "http://a/");
    assert_eq!(resolve(BASE, "../../g"), "http://a/g");

    // Abnormal examples.
    assert_eq!(resolve(BASE, ""), "http://a/b/c/");
    assert_eq!(resolve(BASE, "../../../g"), "http://a/../g");
    assert_eq!(resolve(BASE, "../../../../g"), "http://a/../../g");
    assert_eq!(resolve(BASE, "/./g"), "http://a/./g");
    assert_eq!(resolve(BASE, "/../g"), "http://a/../g");
    assert_eq!(resolve(BASE, "g."), "http://a/b/c/g.");
    assert_eq!(resolve(BASE, ".g"), "http://a/b/c/.g");
    assert_eq!(resolve(BASE, "g.."), "http://a/b/c/g..");
    assert_eq!(resolve(BASE, "..g"), "http://a/b/c/..g");
    assert_eq!(resolve(BASE, "./../g"), "http://a/b/g");
    assert_eq!(resolve(BASE, "./g/."), "http://a/b/c/g/");
    assert_eq!(resolve(BASE, "g/./h"), "http://a/b/c/g/h");
    assert_eq!(resolve(BASE, "g/../h"), "http://a/b/c/h");
    assert_eq!(resolve(BASE, "g;x=1/./y"), "http://a/b/c/g;x=1/y");
    assert_eq!(resolve(BASE, "g;x=1/../y"), "http://a/b/c/y");
    assert_eq!(resolve(BASE, "g?y/./x"), "http://a/b/c/g?y/./x");
    assert_eq!(resolve(BASE, "g#s/../x"), "http://a/b/c/g#s/../x");
    assert_eq!(resolve(BASE, "http:g"), "http:g");
}

#[test]
fn resolve_special_cases() {
    // Either side opaque.
    assert_eq!(resolve("mailto:a@b", "x/y"), "x/y");
    assert_eq!(resolve("http://a/b", "mailto:a@b"), "mailto:a@b");

    // A fragment equal to the base's leaves the base as is.
    assert_eq!(resolve("http://a/b#f", "#f"), "http://a/b#f");
    assert_eq!(resolve("http://a/b#f", "#g"), "http://a/b#g");
    assert_eq!(resolve("http://a/b?q", "#"), "http://a/b?q#");

    // An empty base path.
    assert_eq!(resolve("http://a", "g"), "http://a/g");
    assert_eq!(resolve("http://a", "?q"), "http://a?q");

    // The path after a child authority is taken as is.
    assert_eq!(resolve("http://a/b", "//g/x/../y"), "http://g/x/../y");

    // Relative bases.
    assert_eq!(resolve("a/b", "c"), "a/c");
    assert_eq!(resolve("", "c"), "c");
    assert_eq!(resolve("a/b", "../../c"), "../c");
    assert_eq!(resolve("a/b", "../c:d"), "./c:d");
}

#[test]
fn resolve_carries_authority() {
    let base = Uri::parse("http://a/b").unwrap();
    let target = base.resolve_str("//u@[::1]:80/p").unwrap();
    assert_eq!(target, "http://u@[::1]:80/p");

    let auth = target.authority().unwrap();
    assert_eq!(auth.userinfo(), Some("u"));
    assert_eq!(
        auth.host_parsed(),
        Some(Host::Ipv6 {
            addr: Ipv6Addr::LOCALHOST,
            scope_id: None
        })
    );
    assert_eq!(target.port(), Some(80));

    let base = Uri::parse("foo://reg_name/a/b").unwrap();
    let target = base.resolve_str("c?q").unwrap();
    assert_eq!(target, "foo://reg_name/a/c?q");
    assert_eq!(target.authority().unwrap().as_str(), "reg_name");
    assert_eq!(target.path(), Some("/a/c"));
    assert_eq!(target.query(), Some("q"));
}

#[test]
fn resolve_against_authority_only_base() {
    assert_eq!(resolve("//a", "g"), "//a/g");
    assert_eq!(resolve("//a", "../g"), "//a/../g");
    assert_eq!(resolve("//a", "?q"), "//a?q");

    let target = Uri::parse("//a").unwrap().resolve_str("g").unwrap();
    assert_eq!(target.authority().unwrap().as_str(), "a");
    assert_eq!(target.path(), Some("/g"));
    let reparsed = Uri::parse(target.as_str()).unwrap();
    assert_eq!(target, reparsed);
    assert_eq!(reparsed.path(), Some("/g"));
}

#[test]
fn resolve_str_error() {
    let base = Uri::parse("http://a/b").unwrap();
    let e = base.resolve_str("a b").unwrap_err();
    assert_eq!(e.index(), 1);
    assert_eq!(e.kind(), ParseErrorKind::IllegalChar(Part::Path));
    assert_eq!(e.into_input(), "a b");
}

#[test]
fn relativize_paths() {
    assert_eq!(relativize("http://example.com/a/", "http://example.com/a/b/c"), "b/c");
    assert_eq!(relativize("http://example.com/a", "http://example.com/a/b/c"), "b/c");
    assert_eq!(relativize("http://x/a/", "http://x/a/b?q#f"), "b?q#f");
    assert_eq!(relativize("http://x/a/./b/", "http://x/a/c/../b/d"), "d");

    // Equal paths.
    assert_eq!(relativize("http://x/a", "http://x/a"), "");
    assert_eq!(relativize("http://x/a", "http://x/a?q"), "?q");
    assert_eq!(relativize("http://x/a/", "http://x/a/#f"), "#f");

    // A colon in the first segment.
    assert_eq!(relativize("http://x/", "http://x/a:b/c"), "./a:b/c");
    assert_eq!(relativize("http://x/", "http://x/a/b:c"), "a/b:c");

    // Relative URIs.
    assert_eq!(relativize("a/", "a/b"), "b");
    assert_eq!(relativize("", "b"), "b");
}

#[test]
fn relativize_returns_child() {
    // Not a prefix on a segment boundary.
    assert_eq!(relativize("http://x/a", "http://x/ab"), "http://x/ab");
    assert_eq!(relativize("http://x/a/b/", "http://x/a/"), "http://x/a/");

    // Different schemes or authorities.
    assert_eq!(relativize("http://x/a/", "https://x/a/b"), "https://x/a/b");
    assert_eq!(relativize("http://x/a/", "http://y/a/b"), "http://y/a/b");
    assert_eq!(relativize("http://x/a/", "http://x:80/a/b"), "http://x:80/a/b");
    assert_eq!(relativize("http://x/a/", "/a/b"), "/a/b");

    // Opaque URIs.
    assert_eq!(relativize("mailto:a@b", "mailto:a@b/c"), "mailto:a@b/c");
    assert_eq!(relativize("http://x/", "mailto:a@b"), "mailto:a@b");

    // Schemes are compared case-insensitively and escapes case-insensitively.
    assert_eq!(relativize("HTTP://x/a/", "http://x/a/b"), "b");
    assert_eq!(relativize("http://%7ex/a/", "http://%7Ex/a/b"), "b");
    // Hosts are not case-folded here.
    assert_eq!(relativize("http://X/a/", "http://x/a/b"), "http://x/a/b");
}

#[test]
fn round_trips() {
    let bases = ["http://example.com/a/b/", "http://u@h:8/", "foo://reg_name/x/"];
    let relatives = ["", "c", "c/d", "c/d/", "c?q", "c#f", "?q", "#f", "c;p/d?q#f"];

    for base in bases {
        let u = Uri::parse(base).unwrap();
        for v in relatives {
            let v = Uri::parse(v).unwrap();
            let r = u.relativize(&u.resolve(&v));
            assert_eq!(r, v, "{base} {v}");
        }
    }

    let targets = [
        "http://example.com/a/b/",
        "http://example.com/a/b/c/d",
        "http://example.com/a/b/?q",
        "http://example.com/a/b/x:y#f",
        "http://example.com/z",
        "http://other.com/a/b/c",
        "ftp://example.com/a/b/c",
        "mailto:x@y",
    ];
    let u = Uri::parse("http://example.com/a/b/").unwrap();
    for v in targets {
        let v = Uri::parse(v).unwrap();
        let r = u.resolve(&u.relativize(&v));
        assert_eq!(r, v, "{v}");
    }
}
