use crate::{
    error::{ParseError, Part},
    imp::{AuthMeta, HostMeta, Meta, ServerMeta},
    pct_enc::table::{self, Table},
};
use core::num::NonZeroUsize;

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $($kind:tt)+) => {
        return Err($crate::error::ParseError {
            index: $index,
            kind: $crate::error::ParseErrorKind::$($kind)+,
            input: (),
        })
    };
}

mod ip;

/// Parses a string into URI metadata.
///
/// With `require_server_authority` set, an authority that does not match
/// the server grammar is an error instead of a registry-based authority.
pub(crate) fn parse(s: &str, require_server_authority: bool) -> Result<Meta> {
    let mut parser = Parser {
        reader: Reader::new(s),
        require_server_authority,
        out: Meta::default(),
    };
    parser.parse_uri()?;
    Ok(parser.out)
}

/// Stateless scanner over the input.
///
/// Every scanning method takes an explicit range `p..end` and returns the
/// index at which scanning stopped. Indexes passed in and returned are
/// always on the boundary of a UTF-8 code point.
pub(crate) struct Reader<'a> {
    s: &'a str,
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Reader {
            s,
            bytes: s.as_bytes(),
        }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn at(&self, p: usize, end: usize, x: u8) -> bool {
        p < end && self.bytes[p] == x
    }

    fn at_str(&self, p: usize, end: usize, s: &str) -> bool {
        p + s.len() <= end && self.bytes[p..].starts_with(s.as_bytes())
    }

    /// Scans up to the first byte found in `stop`.
    fn scan_to(&self, p: usize, end: usize, stop: &[u8]) -> usize {
        self.bytes[p..end]
            .iter()
            .position(|x| stop.contains(x))
            .map_or(end, |i| p + i)
    }

    /// Scans up to the first byte found in `stop`, returning `None`
    /// if a byte in `err` comes first.
    fn scan_until(&self, p: usize, end: usize, err: &[u8], stop: &[u8]) -> Option<usize> {
        let i = self.scan_to(p, end, stop);
        if self.bytes[p..i].iter().any(|x| err.contains(x)) {
            None
        } else {
            Some(i)
        }
    }

    /// Scans ASCII bytes allowed by the table, ignoring the `escaped` flag.
    fn scan_ascii(&self, mut p: usize, end: usize, table: Table) -> usize {
        while p < end && table.allows_ascii(self.bytes[p]) {
            p += 1;
        }
        p
    }

    /// Scans characters allowed by the table, including escapes and
    /// "other" characters if the table allows the `escaped` production.
    fn scan(&self, mut p: usize, end: usize, table: Table) -> Result<usize> {
        while p < end {
            let x = self.bytes[p];
            if table.allows_ascii(x) {
                p += 1;
                continue;
            }
            if table.allows_escaped() {
                let q = self.scan_escape(p, end)?;
                if q > p {
                    p = q;
                    continue;
                }
            }
            break;
        }
        Ok(p)
    }

    /// Scans a single `escaped` item: a percent-encoded octet
    /// or a character of the "other" category.
    fn scan_escape(&self, p: usize, end: usize) -> Result<usize> {
        if self.bytes[p] == b'%' {
            match self.bytes.get(p + 1..p + 3) {
                Some(&[hi, lo])
                    if p + 3 <= end && hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() =>
                {
                    Ok(p + 3)
                }
                _ => err!(p, MalformedEscape),
            }
        } else {
            match self.s[p..end].chars().next() {
                Some(ch) if table::is_other(ch) => Ok(p + ch.len_utf8()),
                _ => Ok(p),
            }
        }
    }

    fn check_chars(&self, p: usize, end: usize, table: Table, part: Part) -> Result<()> {
        let q = self.scan(p, end, table)?;
        if q < end {
            err!(q, IllegalChar(part));
        }
        Ok(())
    }

    fn check_char(&self, p: usize, table: Table, part: Part) -> Result<()> {
        self.check_chars(p, p + 1, table, part)
    }
}

/// RFC 2396 parser.
///
/// # Preconditions and guarantees
///
/// Start and finish parsing by calling `parse_uri`.
/// The following are guaranteed when parsing succeeds:
///
/// - All output indexes are within bounds, correctly ordered
///   and on the boundary of a UTF-8 code point.
/// - All components defined by output indexes are validated.
struct Parser<'a> {
    reader: Reader<'a>,
    require_server_authority: bool,
    out: Meta,
}

impl<'a> core::ops::Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

/// Outcome of trying the server grammar on an authority.
///
/// Whether a failed attempt falls back to a registry-based authority
/// is decided by the caller.
enum ServerAttempt {
    Parsed(ServerMeta),
    Failed(ParseError),
    /// The authority holds a character outside the server grammar at the index.
    Skipped(usize),
}

impl Parser<'_> {
    fn parse_uri(&mut self) -> Result<()> {
        let n = self.len();

        let mut p = match self.scan_until(0, n, b"/?#", b":") {
            Some(i) if self.at(i, n, b':') => {
                if i == 0 {
                    err!(0, ExpectedSchemeName);
                }
                self.check_char(0, table::ALPHA, Part::SchemeName)?;
                self.check_chars(1, i, table::SCHEME, Part::SchemeName)?;
                self.out.scheme_end = NonZeroUsize::new(i);

                let ssp = i + 1;
                if self.at(ssp, n, b'/') {
                    self.parse_hierarchical(ssp, n)?
                } else {
                    let q = self.scan_to(ssp, n, b"#");
                    if q <= ssp {
                        err!(ssp, ExpectedSchemeSpecificPart);
                    }
                    self.check_chars(ssp, q, table::URIC, Part::Opaque)?;
                    self.out.opaque = true;
                    self.out.path_bounds = (ssp, q);
                    q
                }
            }
            _ => self.parse_hierarchical(0, n)?,
        };

        if self.at(p, n, b'#') {
            self.check_chars(p + 1, n, table::URIC, Part::Fragment)?;
            p = n;
        }

        if p < n {
            err!(p, TrailingInput);
        }
        Ok(())
    }

    fn parse_hierarchical(&mut self, start: usize, n: usize) -> Result<usize> {
        let mut p = start;

        if self.at_str(p, n, "//") {
            p += 2;
            let q = self.scan_to(p, n, b"/?#");
            if q > p {
                self.parse_authority(p, q)?;
            } else if q == n {
                err!(p, ExpectedAuthority);
            }
            // An empty authority followed by something else is left absent.
            p = q;
        }

        let q = self.scan_to(p, n, b"?#");
        self.check_chars(p, q, table::PATH, Part::Path)?;
        self.out.path_bounds = (p, q);
        p = q;

        if self.at(p, n, b'?') {
            p += 1;
            let q = self.scan_to(p, n, b"#");
            self.check_chars(p, q, table::URIC, Part::Query)?;
            self.out.query_end = NonZeroUsize::new(q);
            p = q;
        }
        Ok(p)
    }

    fn parse_authority(&mut self, start: usize, end: usize) -> Result<()> {
        let server_table = if self.bytes[start..end].contains(&b']') {
            table::SERVER_PERCENT
        } else {
            table::SERVER
        };
        let server_stop = self.scan(start, end, server_table)?;
        // A scope id such as "%eth0" is no escape, which only rules out
        // a registry-based authority.
        let reg_stop = match self.scan(start, end, table::REG_NAME) {
            Ok(i) => i,
            Err(e) => e.index,
        };

        let attempt = if server_stop == end {
            match self.parse_server(start, end) {
                Ok(meta) => ServerAttempt::Parsed(meta),
                Err(e) => ServerAttempt::Failed(e),
            }
        } else {
            ServerAttempt::Skipped(server_stop)
        };

        let is_reg_name = reg_stop == end;
        let server = match attempt {
            ServerAttempt::Parsed(meta) => Some(meta),
            ServerAttempt::Failed(e) if self.require_server_authority || !is_reg_name => {
                return Err(e)
            }
            ServerAttempt::Skipped(i) if self.require_server_authority => {
                err!(i, IllegalChar(Part::Authority))
            }
            ServerAttempt::Skipped(i) if !is_reg_name => {
                err!(i.max(reg_stop), IllegalChar(Part::Authority))
            }
            ServerAttempt::Failed(_) | ServerAttempt::Skipped(_) => None,
        };

        self.out.auth_meta = Some(match server {
            Some(meta) => AuthMeta::Server(meta),
            None => AuthMeta::Registry,
        });
        Ok(())
    }

    fn parse_server(&self, start: usize, n: usize) -> Result<ServerMeta> {
        let mut p = start;
        let mut userinfo_end = None;

        if let Some(q) = self.scan_until(p, n, b"/?#", b"@") {
            if self.at(q, n, b'@') {
                self.check_chars(p, q, table::USERINFO, Part::UserInfo)?;
                userinfo_end = Some(q);
                p = q + 1;
            }
        }

        let host_start = p;
        let host_meta = if self.at(p, n, b'[') {
            p += 1;
            let q = self.scan_to(p, n, b"]");
            if q <= p || !self.at(q, n, b']') {
                err!(q, UnclosedBracket);
            }

            let r = self.scan_to(p, q, b"%");
            let meta = if r > p {
                let addr = self.parse_ipv6(p, r)?;
                let mut scope_start = None;
                if r < q {
                    if r + 1 == q {
                        err!(q, ExpectedScopeId);
                    }
                    self.check_chars(r + 1, q, table::SCOPE_ID, Part::ScopeId)?;
                    // "%25" before a non-empty id is the escaped separator.
                    let escaped = q - r > 3 && self.bytes[r + 1..].starts_with(b"25");
                    scope_start = Some(if escaped { r + 3 } else { r + 1 });
                }
                HostMeta::Ipv6 { addr, scope_start }
            } else {
                HostMeta::Ipv6 {
                    addr: self.parse_ipv6(p, q)?,
                    scope_start: None,
                }
            };
            p = q + 1;
            meta
        } else if let Some((q, addr)) = self.parse_ipv4_host(p, n) {
            p = q;
            HostMeta::Ipv4(addr)
        } else {
            p = self.parse_hostname(p, n)?;
            HostMeta::Name
        };
        let host_bounds = (host_start, p);

        let mut port = None;
        if self.at(p, n, b':') {
            p += 1;
            let q = self.scan_to(p, n, b"/");
            if q > p {
                self.check_chars(p, q, table::DIGIT, Part::Port)?;
                match self.s[p..q].parse() {
                    Ok(value) => port = Some(value),
                    Err(_) => err!(p, MalformedPort),
                }
                p = q;
            }
        }

        if p < n {
            err!(p, ExpectedPort);
        }

        Ok(ServerMeta {
            userinfo_end,
            host_bounds,
            host_meta,
            port,
        })
    }

    /// Parses a hostname, returning the index after it.
    ///
    /// `hostname = *( domainlabel "." ) toplabel [ "." ]`
    fn parse_hostname(&self, start: usize, n: usize) -> Result<usize> {
        let mut p = start;
        // Start of the last label read.
        let mut last_label = None;

        while p < n {
            let q = self.scan_ascii(p, n, table::ALPHANUM);
            if q <= p {
                break;
            }
            last_label = Some(p);
            p = q;

            let q = self.scan_ascii(p, n, table::ALPHANUM.or(table::DASH));
            if q > p {
                if self.bytes[q - 1] == b'-' {
                    err!(q - 1, IllegalChar(Part::Hostname));
                }
                p = q;
            }

            if !self.at(p, n, b'.') {
                break;
            }
            p += 1;
        }

        if p < n && !self.at(p, n, b':') {
            err!(p, IllegalChar(Part::Hostname));
        }

        let Some(l) = last_label else {
            err!(start, ExpectedHostname);
        };

        // The rightmost label of a qualified name must start with a letter.
        if l > start && !self.bytes[l].is_ascii_alphabetic() {
            err!(l, IllegalChar(Part::Hostname));
        }
        Ok(p)
    }
}
