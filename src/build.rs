//! Building URIs from components.
//!
//! Each component is quoted for its production, the components are joined,
//! and the result is parsed again, so that a built `Uri` satisfies the same
//! invariants as a parsed one.

use crate::{
    error::{ParseError, ParseErrorKind},
    imp::Uri,
    parse,
    pct_enc::{quote, table},
};
use alloc::string::{String, ToString};

/// Splits off a leading literal IPv6 address, which is never quoted.
fn split_ipv6_prefix(s: &str) -> (&str, &str) {
    if s.starts_with('[') && s.contains(':') {
        if let Some(end) = s.find(']') {
            return s.split_at(end + 1);
        }
    }
    ("", s)
}

struct Builder {
    buf: String,
    require_server_authority: bool,
    relative_path_at: Option<usize>,
}

impl Builder {
    fn new(scheme: Option<&str>, require_server_authority: bool) -> Self {
        let mut buf = String::new();
        if let Some(scheme) = scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        Builder {
            buf,
            require_server_authority,
            relative_path_at: None,
        }
    }

    fn server(&mut self, userinfo: Option<&str>, host: &str, port: Option<u16>) {
        self.buf.push_str("//");
        if let Some(userinfo) = userinfo {
            self.buf.push_str(&quote(userinfo, table::USERINFO));
            self.buf.push('@');
        }

        let needs_brackets = host.contains(':') && !host.starts_with('[') && !host.ends_with(']');
        if needs_brackets {
            self.buf.push('[');
        }
        self.buf.push_str(host);
        if needs_brackets {
            self.buf.push(']');
        }

        if let Some(port) = port {
            self.buf.push(':');
            self.buf.push_str(&port.to_string());
        }
    }

    fn authority(&mut self, authority: &str) {
        self.buf.push_str("//");
        let (literal, rest) = split_ipv6_prefix(authority);
        self.buf.push_str(literal);
        self.buf
            .push_str(&quote(rest, table::REG_NAME.or(table::SERVER)));
    }

    fn path(&mut self, path: &str, absolute: bool) {
        if absolute && !path.is_empty() && !path.starts_with('/') {
            self.relative_path_at = Some(self.buf.len());
        }
        self.buf.push_str(&quote(path, table::PATH));
    }

    fn opaque(&mut self, ssp: &str) {
        let literal_len = match ssp.strip_prefix("//").map(split_ipv6_prefix) {
            Some((literal, _)) if !literal.is_empty() => literal.len() + 2,
            _ => 0,
        };
        let (literal, rest) = ssp.split_at(literal_len);
        self.buf.push_str(literal);
        self.buf.push_str(&quote(rest, table::URIC));
    }

    fn query(&mut self, query: &str) {
        self.buf.push('?');
        self.buf.push_str(&quote(query, table::URIC));
    }

    fn fragment(&mut self, fragment: &str) {
        self.buf.push('#');
        self.buf.push_str(&quote(fragment, table::URIC));
    }

    fn finish(self) -> Result<Uri<String>, ParseError<String>> {
        if let Some(index) = self.relative_path_at {
            return Err(ParseError {
                index,
                kind: ParseErrorKind::RelativePathInAbsoluteUri,
                input: self.buf,
            });
        }
        match parse::parse(&self.buf, self.require_server_authority) {
            Ok(meta) => Ok(Uri {
                val: self.buf,
                meta,
            }),
            Err(e) => Err(e.with_input(self.buf)),
        }
    }
}

impl Uri<String> {
    /// Builds a hierarchical URI with a server-based authority from its components.
    ///
    /// - The userinfo and path are quoted for their productions,
    ///   the query and fragment for `uric`.
    /// - The host is copied as is, and is enclosed in square brackets
    ///   if it contains a colon and is not already bracketed.
    /// - The authority is omitted when `host` is `None`,
    ///   in which case `userinfo` and `port` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a scheme is given with a non-empty path not starting
    /// with `"/"`, or if the resulting string is not a valid URI with
    /// a server-based authority. The error carries the built string.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::from_server_parts(
    ///     Some("http"),
    ///     Some("John Doe"),
    ///     Some("fe80::1"),
    ///     Some(8080),
    ///     Some("/a b"),
    ///     Some("q=1"),
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(uri, "http://John%20Doe@[fe80::1]:8080/a%20b?q=1");
    /// assert_eq!(uri.port(), Some(8080));
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_server_parts(
        scheme: Option<&str>,
        userinfo: Option<&str>,
        host: Option<&str>,
        port: Option<u16>,
        path: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, ParseError<String>> {
        let mut b = Builder::new(scheme, true);
        if let Some(host) = host {
            b.server(userinfo, host, port);
        }
        if let Some(path) = path {
            b.path(path, scheme.is_some());
        }
        if let Some(query) = query {
            b.query(query);
        }
        if let Some(fragment) = fragment {
            b.fragment(fragment);
        }
        b.finish()
    }

    /// Builds a hierarchical URI from its components.
    ///
    /// The authority is quoted for the union of the registry and server
    /// productions, except for a leading literal IPv6 address. It is parsed
    /// as server-based where possible and as registry-based otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a scheme is given with a non-empty path not starting
    /// with `"/"`, or if the resulting string is not a valid URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::from_authority_parts(Some("foo"), Some("a_b"), Some("/x"), None, Some("y z"))
    ///     .unwrap();
    /// assert_eq!(uri, "foo://a_b/x#y%20z");
    /// assert!(!uri.authority().unwrap().is_server_based());
    /// ```
    pub fn from_authority_parts(
        scheme: Option<&str>,
        authority: Option<&str>,
        path: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, ParseError<String>> {
        let mut b = Builder::new(scheme, false);
        if let Some(authority) = authority {
            b.authority(authority);
        }
        if let Some(path) = path {
            b.path(path, scheme.is_some());
        }
        if let Some(query) = query {
            b.query(query);
        }
        if let Some(fragment) = fragment {
            b.fragment(fragment);
        }
        b.finish()
    }

    /// Builds a hierarchical URI from a scheme, a host, a path and a fragment.
    ///
    /// Equivalent to [`from_server_parts`](Self::from_server_parts)
    /// with no userinfo, port or query.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as `from_server_parts`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::from_host(Some("file"), Some(""), Some("/etc/hosts"), None).unwrap();
    /// assert_eq!(uri, "file:///etc/hosts");
    /// ```
    pub fn from_host(
        scheme: Option<&str>,
        host: Option<&str>,
        path: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, ParseError<String>> {
        Self::from_server_parts(scheme, None, host, None, path, None, fragment)
    }

    /// Builds a URI from a scheme, a scheme-specific part and a fragment.
    ///
    /// The scheme-specific part is quoted for `uric`, except for a literal
    /// IPv6 address right after a leading `"//"`. The result is opaque
    /// or hierarchical depending on whether it starts with `"/"`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the resulting string is not a valid URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::from_opaque_parts(Some("mailto"), "a b@example.com", None).unwrap();
    /// assert_eq!(uri, "mailto:a%20b@example.com");
    /// assert!(uri.is_opaque());
    ///
    /// let uri = Uri::from_opaque_parts(Some("http"), "//[::1]:80/a b", None).unwrap();
    /// assert_eq!(uri, "http://[::1]:80/a%20b");
    /// ```
    pub fn from_opaque_parts(
        scheme: Option<&str>,
        ssp: &str,
        fragment: Option<&str>,
    ) -> Result<Self, ParseError<String>> {
        let mut b = Builder::new(scheme, false);
        b.opaque(ssp);
        if let Some(fragment) = fragment {
            b.fragment(fragment);
        }
        b.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv6_prefix() {
        assert_eq!(split_ipv6_prefix("[::1]:80"), ("[::1]", ":80"));
        assert_eq!(split_ipv6_prefix("[::1"), ("", "[::1"));
        assert_eq!(split_ipv6_prefix("[a]"), ("", "[a]"));
        assert_eq!(split_ipv6_prefix("a:b"), ("", "a:b"));
    }
}
