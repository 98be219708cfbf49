//! Percent-encoding utilities.
//!
//! These functions operate on the raw form of URI components. Characters
//! outside a production are [quoted](quote) when building a URI from parts,
//! and escaped octets are [decoded](decode) when reading a component back.

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::str;

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, returning `None` if either byte is not hexadecimal.
pub(crate) fn decode_octet(hi: u8, lo: u8) -> Option<u8> {
    let (hi, lo) = (OCTET_TABLE_HI[hi as usize], OCTET_TABLE_LO[lo as usize]);
    if hi == 0xff || lo == 0xff {
        None
    } else {
        Some(hi | lo)
    }
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

fn push_encoded_char(buf: &mut String, ch: char) {
    for &x in ch.encode_utf8(&mut [0; 4]).as_bytes() {
        buf.push_str(encode_byte(x));
    }
}

/// Quotes a string for use in the production described by `table`.
///
/// - ASCII characters not allowed by the table, including `"%"` itself
///   unless explicitly allowed, are percent-encoded.
/// - Non-ASCII space and control characters are percent-encoded as UTF-8
///   if the table [allows the `escaped` production](Table::allows_escaped).
/// - All other characters are copied unchanged.
///
/// Returns the input unchanged if nothing needs quoting.
///
/// # Examples
///
/// ```
/// use generic_uri::pct_enc::{quote, table};
///
/// assert_eq!(quote("a b/c", table::PCHAR), "a%20b%2Fc");
/// assert_eq!(quote("100%", table::URIC), "100%25");
/// assert_eq!(quote("caf\u{e9}\u{3000}", table::URIC), "caf\u{e9}%E3%80%80");
/// ```
#[must_use]
pub fn quote(s: &str, table: Table) -> Cow<'_, str> {
    let needs_quote = |ch: char| {
        if ch.is_ascii() {
            !table.allows(ch)
        } else {
            table.allows_escaped() && (table::is_space_char(ch) || ch.is_control())
        }
    };

    let Some(i) = s.find(needs_quote) else {
        return Cow::Borrowed(s);
    };

    let mut buf = String::with_capacity(s.len() + 8);
    buf.push_str(&s[..i]);
    for ch in s[i..].chars() {
        if !needs_quote(ch) {
            buf.push(ch);
        } else if ch.is_ascii() {
            buf.push_str(encode_byte(ch as u8));
        } else {
            push_encoded_char(&mut buf, ch);
        }
    }
    Cow::Owned(buf)
}

/// Percent-encodes every non-ASCII character of a string as UTF-8 octets.
///
/// ASCII characters, including `"%"`, are left as they are, so an already
/// quoted string stays valid. Returns the input unchanged if it is ASCII.
///
/// # Examples
///
/// ```
/// use generic_uri::pct_enc::encode;
///
/// assert_eq!(encode("/\u{e4}?q"), "/%C3%A4?q");
/// assert_eq!(encode("/a%20b"), "/a%20b");
/// ```
#[must_use]
pub fn encode(s: &str) -> Cow<'_, str> {
    let Some(i) = s.find(|ch: char| !ch.is_ascii()) else {
        return Cow::Borrowed(s);
    };

    let mut buf = String::with_capacity(s.len() + 16);
    buf.push_str(&s[..i]);
    for ch in s[i..].chars() {
        if ch.is_ascii() {
            buf.push(ch);
        } else {
            push_encoded_char(&mut buf, ch);
        }
    }
    Cow::Owned(buf)
}

/// Decodes the escaped octets in a string.
///
/// Every maximal run of consecutive `"%" hex hex` triplets is decoded as a
/// unit and interpreted as UTF-8, with invalid sequences replaced by
/// U+FFFD. A `"%"` not followed by two hexadecimal digits is kept as is.
///
/// When `ignore_percent_in_brackets` is `true`, text between `"["` and
/// `"]"` is copied verbatim so that the scope id of a literal IPv6 address
/// is not mistaken for an escape.
///
/// Returns the input unchanged if it holds no escapes.
///
/// # Examples
///
/// ```
/// use generic_uri::pct_enc::decode;
///
/// assert_eq!(decode("%E5%BC%A0%E4%B8%89", false), "张三");
/// assert_eq!(decode("a%2Fb%FF", false), "a/b\u{fffd}");
/// assert_eq!(decode("[fe80::1%25eth0]", true), "[fe80::1%25eth0]");
/// assert_eq!(decode("[fe80::1%25eth0]", false), "[fe80::1%eth0]");
/// ```
#[must_use]
pub fn decode(s: &str, ignore_percent_in_brackets: bool) -> Cow<'_, str> {
    if !s.contains('%') {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut buf = String::with_capacity(s.len());
    let mut octets = Vec::new();
    let mut in_brackets = false;
    let mut i = 0;

    while i < bytes.len() {
        let x = bytes[i];
        if x == b'[' {
            in_brackets = true;
        } else if x == b']' {
            in_brackets = false;
        }

        if x != b'%' || (in_brackets && ignore_percent_in_brackets) {
            let start = if x.is_ascii() { i + 1 } else { i };
            let next = s[start..]
                .find(['%', '[', ']'])
                .map_or(s.len(), |off| start + off);
            buf.push_str(&s[i..next]);
            i = next;
            continue;
        }

        octets.clear();
        while let Some(&[b'%', hi, lo]) = bytes.get(i..i + 3) {
            let Some(octet) = decode_octet(hi, lo) else {
                break;
            };
            octets.push(octet);
            i += 3;
        }

        if octets.is_empty() {
            buf.push('%');
            i += 1;
        } else {
            buf.push_str(&String::from_utf8_lossy(&octets));
        }
    }

    if buf == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(buf)
    }
}
