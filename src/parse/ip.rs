//! Literal IPv4 and IPv6 addresses, as in RFC 2373 and RFC 2732.

use super::{Reader, Result};
use crate::pct_enc::table;
use core::net::{Ipv4Addr, Ipv6Addr};

/// Groups of a literal IPv6 address, together with the number of bytes
/// the address spans so far.
///
/// Groups beyond the eighth are counted but not stored; such an address
/// is rejected as too long before being built.
#[derive(Default)]
struct Groups {
    buf: [u16; 8],
    len: usize,
    byte_count: usize,
    // Number of groups read before "::".
    ellipsis: Option<usize>,
}

impl Groups {
    fn push(&mut self, group: u16) {
        if let Some(slot) = self.buf.get_mut(self.len) {
            *slot = group;
        }
        self.len += 1;
        self.byte_count += 2;
    }

    fn push_v4(&mut self, addr: Ipv4Addr) {
        let [a, b, c, d] = addr.octets();
        self.push(u16::from_be_bytes([a, b]));
        self.push(u16::from_be_bytes([c, d]));
    }

    fn mark_ellipsis(&mut self) {
        self.ellipsis = Some(self.len);
    }

    fn into_addr(self) -> Ipv6Addr {
        let mut segs = [0; 8];
        match self.ellipsis {
            Some(i) => {
                let tail = self.len - i;
                segs[..i].copy_from_slice(&self.buf[..i]);
                segs[8 - tail..].copy_from_slice(&self.buf[i..self.len]);
            }
            None => segs = self.buf,
        }
        Ipv6Addr::from(segs)
    }
}

fn hex_value(digits: &[u8]) -> u16 {
    digits.iter().fold(0, |acc, &x| {
        (acc << 4) | (x as char).to_digit(16).unwrap_or(0) as u16
    })
}

impl Reader<'_> {
    /// Scans an IPv4 address in `p..end`.
    ///
    /// Returns `Ok(None)` if the range does not start with a run of digits
    /// and dots, or in strict mode, if the run does not reach `end`.
    /// Returns an error if the run is not exactly four dotted octets.
    fn scan_ipv4(&self, start: usize, end: usize, strict: bool) -> Result<Option<(usize, Ipv4Addr)>> {
        let m = self.scan_ascii(start, end, table::DIGIT.or(table::DOT));
        if m <= start || (strict && m != end) {
            return Ok(None);
        }

        let mut octets = [0u8; 4];
        let mut p = start;
        for (i, octet) in octets.iter_mut().enumerate() {
            if i > 0 {
                if !self.at(p, m, b'.') {
                    err!(p, MalformedIpv4);
                }
                p += 1;
            }
            let q = self.scan_ascii(p, m, table::DIGIT);
            if q == p || q - p > 3 {
                err!(p, MalformedIpv4);
            }
            let value = self.bytes[p..q]
                .iter()
                .fold(0u32, |acc, &x| acc * 10 + (x - b'0') as u32);
            match u8::try_from(value) {
                Ok(value) => *octet = value,
                Err(_) => err!(p, MalformedIpv4),
            }
            p = q;
        }

        if p < m {
            err!(p, MalformedIpv4);
        }
        Ok(Some((m, Ipv4Addr::from(octets))))
    }

    /// Tries to read an IPv4 address as the host of a server-based authority.
    ///
    /// The address must be followed by the end of the authority or a colon.
    /// Returns `None` on any failure, so that a hostname may be tried next.
    pub(super) fn parse_ipv4_host(&self, start: usize, n: usize) -> Option<(usize, Ipv4Addr)> {
        match self.scan_ipv4(start, n, false) {
            Ok(Some((q, addr))) if q == n || self.bytes[q] == b':' => Some((q, addr)),
            _ => None,
        }
    }

    /// Reads an IPv4 address that must span the rest of an IPv6 address.
    fn take_ipv4(&self, start: usize, n: usize, groups: &mut Groups) -> Result<usize> {
        match self.scan_ipv4(start, n, true)? {
            Some((p, addr)) => {
                groups.push_v4(addr);
                Ok(p)
            }
            None => err!(start, ExpectedIpv4),
        }
    }

    /// Parses a literal IPv6 address spanning exactly `start..n`.
    pub(super) fn parse_ipv6(&self, start: usize, n: usize) -> Result<Ipv6Addr> {
        let mut groups = Groups::default();
        let mut p = start;

        if let Some(q) = self.scan_hex_seq(p, n, &mut groups)? {
            p = q;
            if self.at_str(p, n, "::") {
                groups.mark_ellipsis();
                p = self.scan_hex_post(p + 2, n, &mut groups)?;
            } else if self.at(p, n, b':') {
                p = self.take_ipv4(p + 1, n, &mut groups)?;
            }
        } else if self.at_str(p, n, "::") {
            groups.mark_ellipsis();
            p = self.scan_hex_post(p + 2, n, &mut groups)?;
        }

        if p < n {
            err!(start, MalformedIpv6);
        }
        if groups.byte_count > 16 {
            err!(start, Ipv6TooLong);
        }
        match (groups.ellipsis, groups.byte_count) {
            (None, count) if count < 16 => err!(start, Ipv6TooShort),
            (Some(_), 16) => err!(start, MalformedIpv6),
            _ => Ok(groups.into_addr()),
        }
    }

    /// Reads what follows `"::"`: hexadecimal groups, an IPv4 address or both.
    fn scan_hex_post(&self, start: usize, n: usize, groups: &mut Groups) -> Result<usize> {
        if start == n {
            return Ok(start);
        }
        match self.scan_hex_seq(start, n, groups)? {
            Some(p) if self.at(p, n, b':') => self.take_ipv4(p + 1, n, groups),
            Some(p) => Ok(p),
            None => self.take_ipv4(start, n, groups),
        }
    }

    /// Reads colon-separated hexadecimal groups.
    ///
    /// Stops before `"::"`, or before the colon preceding an embedded IPv4
    /// address. Returns `None` if no group is read, including when the
    /// first run of digits turns out to start an IPv4 address.
    fn scan_hex_seq(&self, start: usize, n: usize, groups: &mut Groups) -> Result<Option<usize>> {
        let mut p = start;
        let q = self.scan_ascii(p, n, table::HEX);
        if q <= p || self.at(q, n, b'.') {
            return Ok(None);
        }
        if q > p + 4 {
            err!(p, Ipv6HexDigits);
        }
        groups.push(hex_value(&self.bytes[p..q]));
        p = q;

        while self.at(p, n, b':') && !self.at(p + 1, n, b':') {
            let q = self.scan_ascii(p + 1, n, table::HEX);
            if q <= p + 1 {
                err!(p + 1, ExpectedIpv6Digits);
            }
            if self.at(q, n, b'.') {
                break;
            }
            if q > p + 5 {
                err!(p + 1, Ipv6HexDigits);
            }
            groups.push(hex_value(&self.bytes[p + 1..q]));
            p = q;
        }
        Ok(Some(p))
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::ParseErrorKind, parse::Reader};
    use core::net::{Ipv4Addr, Ipv6Addr};

    fn v6(s: &str) -> Result<Ipv6Addr, ParseErrorKind> {
        Reader::new(s).parse_ipv6(0, s.len()).map_err(|e| e.kind)
    }

    #[test]
    fn ipv6_groups() {
        assert_eq!(v6("::"), Ok(Ipv6Addr::UNSPECIFIED));
        assert_eq!(v6("::1"), Ok(Ipv6Addr::LOCALHOST));
        assert_eq!(
            v6("1:2:3:4:5:6:7:8"),
            Ok(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8))
        );
        assert_eq!(v6("1::8"), Ok(Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 8)));
        assert_eq!(v6("1:2::"), Ok(Ipv6Addr::new(1, 2, 0, 0, 0, 0, 0, 0)));
        assert_eq!(
            v6("::ffff:192.168.0.1"),
            Ok(Ipv4Addr::new(192, 168, 0, 1).to_ipv6_mapped())
        );
        assert_eq!(
            v6("1:2:3:4:5:6:1.2.3.4"),
            Ok(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 0x102, 0x304))
        );
        assert_eq!(
            v6("::1.2.3.4"),
            Ok(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0x102, 0x304))
        );
    }

    #[test]
    fn ipv6_byte_count() {
        assert_eq!(v6("1:2:3:4:5:6:7"), Err(ParseErrorKind::Ipv6TooShort));
        assert_eq!(v6("1:2:3:4:5:6:7:8:9"), Err(ParseErrorKind::Ipv6TooLong));
        assert_eq!(v6("1::2:3:4:5:6:7:8:9"), Err(ParseErrorKind::Ipv6TooLong));
        // "::" must stand for at least one group.
        assert_eq!(v6("1:2:3:4::5:6:7:8"), Err(ParseErrorKind::MalformedIpv6));
        assert_eq!(
            v6("1:2:3:4::5:6:7"),
            Ok(Ipv6Addr::new(1, 2, 3, 4, 0, 5, 6, 7))
        );
        assert_eq!(v6("1:2:3:4:5:6:7:1.2.3.4"), Err(ParseErrorKind::Ipv6TooLong));
    }

    #[test]
    fn ipv6_malformed() {
        assert_eq!(v6(""), Err(ParseErrorKind::Ipv6TooShort));
        assert_eq!(v6(":1"), Err(ParseErrorKind::MalformedIpv6));
        assert_eq!(v6("1:::2"), Err(ParseErrorKind::ExpectedIpv4));
        assert_eq!(v6("12345::"), Err(ParseErrorKind::Ipv6HexDigits));
        assert_eq!(v6("1:23456::"), Err(ParseErrorKind::Ipv6HexDigits));
        assert_eq!(v6("1:x::"), Err(ParseErrorKind::ExpectedIpv6Digits));
        assert_eq!(v6("1.2.3.4"), Err(ParseErrorKind::MalformedIpv6));
        assert_eq!(v6("::1.2.3"), Err(ParseErrorKind::MalformedIpv4));
        assert_eq!(v6("::256.0.0.1"), Err(ParseErrorKind::MalformedIpv4));
    }

    #[test]
    fn ipv4_host() {
        let r = Reader::new("10.0.0.1:80");
        assert_eq!(r.parse_ipv4_host(0, 11), Some((8, Ipv4Addr::new(10, 0, 0, 1))));
        let r = Reader::new("10.0.0.1x");
        assert_eq!(r.parse_ipv4_host(0, 9), None);
        let r = Reader::new("1.2.3");
        assert_eq!(r.parse_ipv4_host(0, 5), None);
        let r = Reader::new("010.0.0.1");
        assert_eq!(r.parse_ipv4_host(0, 9), Some((9, Ipv4Addr::new(10, 0, 0, 1))));
    }
}
