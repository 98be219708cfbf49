use std::borrow::Cow;

use generic_uri::{
    pct_enc::{decode, encode, quote, table::*},
    Uri,
};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const QUOTED: &str = "te😃a%20测1%60~!@试%23$%25st%5E&+=";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

#[test]
fn quote_encode_decode() {
    let quoted = quote(RAW, URIC);
    assert_eq!(QUOTED, quoted);

    let encoded = encode(&quoted);
    assert_eq!(ENCODED, encoded);

    assert_eq!(RAW, decode(&encoded, false));
    assert_eq!(RAW, decode(&quoted, false));
}

#[test]
fn quote_tables() {
    assert_eq!(quote("a b", UNRESERVED), "a%20b");
    assert_eq!(quote("a/b?c", PATH), "a/b%3Fc");
    assert_eq!(quote("a/b?c", PCHAR), "a%2Fb%3Fc");
    assert_eq!(quote("user:pw@host", USERINFO), "user:pw%40host");
    assert_eq!(quote("[::1]", URIC), "[::1]");
    assert_eq!(quote("{x}", URIC), "%7Bx%7D");

    // Non-ASCII controls and spaces are escaped, other characters are not.
    assert_eq!(quote("\u{85}", URIC), "%C2%85");
    assert_eq!(quote("\u{a0}", URIC), "%C2%A0");
    assert_eq!(quote("\u{e9}", URIC), "\u{e9}");

    assert!(matches!(quote("abc", UNRESERVED), Cow::Borrowed("abc")));
}

#[test]
fn encode_only_touches_non_ascii() {
    assert_eq!(encode("http://ex.com/%20\u{e4}"), "http://ex.com/%20%C3%A4");
    assert_eq!(encode("\u{10348}"), "%F0%90%8D%88");
    assert!(matches!(encode("a b"), Cow::Borrowed("a b")));
}

#[test]
fn decode_sequences() {
    // A multi-byte character split across escapes decodes as a unit.
    assert_eq!(decode("%C3%A4%20x", false), "\u{e4} x");
    // Mixed case hex digits are accepted.
    assert_eq!(decode("%c3%A4", false), "\u{e4}");
    // A truncated sequence is replaced.
    assert_eq!(decode("%C3x", false), "\u{fffd}x");
    // Unescaped non-ASCII text is kept.
    assert_eq!(decode("\u{e4}%21", false), "\u{e4}!");
    assert_eq!(decode("%", false), "%");

    assert_eq!(decode("a[%25]%25", true), "a[%25]%");
    assert!(matches!(decode("a[%25]", true), Cow::Borrowed(_)));
}

#[test]
fn table_relations() {
    assert!(UNRESERVED.is_subset(URIC));
    assert!(PCHAR.is_subset(PATH));
    assert!(USERINFO.is_subset(SERVER));
    assert!(!RESERVED.is_subset(PCHAR));
    assert!(URIC.allows_escaped());
    assert!(!SCHEME.allows_escaped());
    assert!(!URIC.allows('%'));
    assert!(SERVER_PERCENT.allows('%'));
    assert!(!URIC.allows('\u{e9}'));

    let t = Table::new(b"abc").or(DIGIT).sub(Table::new(b"b"));
    assert!(t.allows('a') && t.allows('7') && !t.allows('b'));
}

#[test]
fn space_and_other() {
    assert!(is_space_char(' '));
    assert!(is_space_char('\u{3000}'));
    assert!(!is_space_char('\t'));
    assert!(is_other('\u{e9}'));
    assert!(!is_other('\u{a0}'));
    assert!(!is_other('\u{85}'));
    assert!(!is_other('a'));
}

#[test]
fn to_ascii_string() {
    let u = Uri::parse("http://h\u{e9}/p\u{e4}th?q=\u{1f600}#fr\u{e4}g").unwrap();
    assert_eq!(
        u.to_ascii_string(),
        "http://h%C3%A9/p%C3%A4th?q=%F0%9F%98%80#fr%C3%A4g"
    );

    let u = Uri::parse("http://example.com/a%20b").unwrap();
    assert!(matches!(u.to_ascii_string(), Cow::Borrowed(_)));
}
