//! URI components.

use crate::{
    imp::{AuthMeta, HostMeta, ServerMeta},
    pct_enc::table,
};
use core::{
    cmp::Ordering,
    hash,
    net::{Ipv4Addr, Ipv6Addr},
};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc2396#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared, hashed and ordered case-insensitively.
///
/// # Examples
///
/// ```
/// use generic_uri::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Uri::parse("HTTP://EXAMPLE.COM/")?.scheme().unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// # Ok::<_, generic_uri::ParseError<&str>>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name.
    /// For a non-panicking variant, use [`new`](Self::new).
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    ///
    /// A scheme name starts with a letter, followed by any number
    /// of letters, digits, `"+"`, `"-"` and `"."`.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || !bytes[0].is_ascii_alphabetic() {
            return None;
        }
        let mut i = 1;
        while i < bytes.len() {
            if !table::SCHEME.allows_ascii(bytes[i]) {
                return None;
            }
            i += 1;
        }
        Some(Scheme::new_validated(s))
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

impl hash::Hash for Scheme {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for x in self.inner.bytes() {
            state.write_u8(x.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for Scheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheme {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.inner.bytes(), other.inner.bytes());
        a.map(|x| x.to_ascii_lowercase())
            .cmp(b.map(|x| x.to_ascii_lowercase()))
    }
}

/// An [authority] component.
///
/// An authority is either *server-based*, holding an optional userinfo,
/// a host and an optional port, or *registry-based*, in which case
/// it is an opaque name that is not decomposed further.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc2396#section-3.2
#[derive(Clone, Copy)]
pub struct Authority<'a> {
    val: &'a str,
    // Indexes are relative to `val`.
    meta: AuthMeta,
}

impl<'a> Authority<'a> {
    pub(crate) fn new(val: &'a str, meta: AuthMeta) -> Self {
        Self { val, meta }
    }

    pub(crate) fn meta(&self) -> AuthMeta {
        self.meta
    }

    fn server(&self) -> Option<&ServerMeta> {
        match &self.meta {
            AuthMeta::Server(server) => Some(server),
            AuthMeta::Registry => None,
        }
    }

    /// Returns the authority component as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// let auth = uri.authority().unwrap();
    /// assert_eq!(auth.as_str(), "user@example.com:8080");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.val
    }

    /// Checks whether the authority is server-based.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert!(uri.authority().unwrap().is_server_based());
    ///
    /// let uri = Uri::parse("http://a_b/")?;
    /// assert!(!uri.authority().unwrap().is_server_based());
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn is_server_based(&self) -> bool {
        self.server().is_some()
    }

    /// Returns the raw userinfo subcomponent of a server-based authority.
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a str> {
        let end = self.server()?.userinfo_end?;
        Some(&self.val[..end])
    }

    /// Returns the raw host subcomponent of a server-based authority.
    ///
    /// A literal IPv6 address is returned with its enclosing brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("ftp://[::1]:21/")?;
    /// assert_eq!(uri.authority().unwrap().host(), Some("[::1]"));
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn host(&self) -> Option<&'a str> {
        let (start, end) = self.server()?.host_bounds;
        Some(&self.val[start..end])
    }

    /// Returns the parsed host subcomponent of a server-based authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{component::Host, Uri};
    /// use std::net::{Ipv4Addr, Ipv6Addr};
    ///
    /// let uri = Uri::parse("//127.0.0.1")?;
    /// let host = uri.authority().unwrap().host_parsed();
    /// assert_eq!(host, Some(Host::Ipv4(Ipv4Addr::LOCALHOST)));
    ///
    /// let uri = Uri::parse("//[fe80::1%eth0]")?;
    /// let host = uri.authority().unwrap().host_parsed();
    /// assert_eq!(
    ///     host,
    ///     Some(Host::Ipv6 {
    ///         addr: Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1),
    ///         scope_id: Some("eth0"),
    ///     })
    /// );
    ///
    /// let uri = Uri::parse("//example.com")?;
    /// let host = uri.authority().unwrap().host_parsed();
    /// assert_eq!(host, Some(Host::Name("example.com")));
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn host_parsed(&self) -> Option<Host<'a>> {
        let server = self.server()?;
        let (start, end) = server.host_bounds;
        Some(match server.host_meta {
            HostMeta::Ipv4(addr) => Host::Ipv4(addr),
            HostMeta::Ipv6 { addr, scope_start } => Host::Ipv6 {
                addr,
                // The host ends with "]".
                scope_id: scope_start.map(|i| &self.val[i..end - 1]),
            },
            HostMeta::Name => Host::Name(&self.val[start..end]),
        })
    }

    /// Returns the port subcomponent of a server-based authority.
    ///
    /// Returns `None` if the port is absent or empty.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.server()?.port
    }
}

/// The host subcomponent of a server-based authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Host<'a> {
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// A literal IPv6 address, optionally with a scope id.
    Ipv6 {
        /// The address.
        addr: Ipv6Addr,
        /// The scope id following `"%"`, or following `"%25"` when the
        /// separator is escaped. The id itself is never decoded.
        scope_id: Option<&'a str>,
    },
    /// A hostname.
    Name(&'a str),
}
