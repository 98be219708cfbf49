use crate::{
    component::{Authority, Host, Scheme},
    error::ParseError,
    normalize, parse, pct_enc, resolve,
};
use alloc::{
    borrow::{Cow, ToOwned},
    string::String,
};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::NonZeroUsize,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Input types that may be parsed into a [`Uri`].
///
/// This trait is implemented for `&str` and `String`.
pub trait Parse {
    /// The storage type of the parsed [`Uri`].
    type Val;
    /// The error type, which carries the input on failure.
    type Err;

    #[doc(hidden)]
    fn parse(self) -> Result<Uri<Self::Val>, Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError<&'a str>;

    fn parse(self) -> Result<Uri<&'a str>, Self::Err> {
        match parse::parse(self, false) {
            Ok(meta) => Ok(Uri { val: self, meta }),
            Err(e) => Err(e.with_input(self)),
        }
    }
}

impl Parse for String {
    type Val = Self;
    type Err = ParseError<String>;

    fn parse(self) -> Result<Uri<String>, Self::Err> {
        match parse::parse(&self, false) {
            Ok(meta) => Ok(Uri { val: self, meta }),
            Err(e) => Err(e.with_input(self)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Meta {
    // The index of the colon after the scheme.
    pub scheme_end: Option<NonZeroUsize>,
    // Absent for an empty authority.
    pub auth_meta: Option<AuthMeta>,
    // Bounds of the opaque part if `opaque` is set.
    pub path_bounds: (usize, usize),
    // One byte past the last byte of query.
    pub query_end: Option<NonZeroUsize>,
    pub opaque: bool,
}

impl Meta {
    #[inline]
    pub fn query_or_path_end(&self) -> usize {
        self.query_end.map_or(self.path_bounds.1, |i| i.get())
    }

    /// Returns the index after `"//"`.
    #[inline]
    pub fn auth_start(&self) -> usize {
        self.scheme_end.map_or(2, |i| i.get() + 3)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum AuthMeta {
    Server(ServerMeta),
    Registry,
}

impl AuthMeta {
    /// Moves every index from an authority starting at `from`
    /// to one starting at `to`.
    pub fn rebase(self, from: usize, to: usize) -> Self {
        match self {
            Self::Server(meta) => Self::Server(meta.rebase(from, to)),
            Self::Registry => Self::Registry,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ServerMeta {
    // The index of "@".
    pub userinfo_end: Option<usize>,
    pub host_bounds: (usize, usize),
    pub host_meta: HostMeta,
    pub port: Option<u16>,
}

impl ServerMeta {
    fn rebase(self, from: usize, to: usize) -> Self {
        let f = |i: usize| i - from + to;
        Self {
            userinfo_end: self.userinfo_end.map(f),
            host_bounds: (f(self.host_bounds.0), f(self.host_bounds.1)),
            host_meta: match self.host_meta {
                HostMeta::Ipv6 { addr, scope_start } => HostMeta::Ipv6 {
                    addr,
                    scope_start: scope_start.map(f),
                },
                meta => meta,
            },
            port: self.port,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum HostMeta {
    Ipv4(Ipv4Addr),
    // `scope_start` is the index after "%", or after "%25" when that
    // escapes the separator.
    Ipv6 {
        addr: Ipv6Addr,
        scope_start: Option<usize>,
    },
    Name,
}

/// A URI reference as defined in [RFC 2396], amended by [RFC 2732]
/// for literal IPv6 addresses.
///
/// A `Uri` is either *opaque*, with a scheme followed by an opaque part
/// that is not decomposed further, or *hierarchical*, with an optional
/// scheme, authority, path and query. Both may have a fragment.
/// A `Uri` without a scheme is a relative reference.
///
/// Besides the usual characters, components may contain non-ASCII
/// characters that are neither space nor control characters.
/// Use [`to_ascii_string`](Self::to_ascii_string) to get a pure ASCII form.
///
/// [RFC 2396]: https://datatracker.ietf.org/doc/html/rfc2396
/// [RFC 2732]: https://datatracker.ietf.org/doc/html/rfc2732
///
/// # Variants
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and `Uri<String>` (owned).
///
/// `Uri<&'a str>` outputs references with lifetime `'a` where possible
/// (thanks to [`borrow-or-share`](borrow_or_share)):
///
/// ```
/// use generic_uri::Uri;
///
/// // Keep a reference to the path after dropping the `Uri`.
/// let path = Uri::parse("foo:/bar")?.path();
/// assert_eq!(path, Some("/bar"));
/// # Ok::<_, generic_uri::ParseError<&str>>(())
/// ```
///
/// # Comparison
///
/// `Uri`s are compared component-wise: schemes and hosts ignoring case,
/// every other component exactly except for the case of hexadecimal digits
/// in escaped octets. `Hash` and `Ord` are consistent with `Eq`.
/// Comparing a `Uri` with a `str` compares the string forms exactly.
///
/// # Examples
///
/// ```
/// use generic_uri::{component::Scheme, Uri};
///
/// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
///
/// let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
/// let uri = Uri::parse(s)?;
///
/// assert_eq!(uri.scheme(), Some(SCHEME_FOO));
/// assert_eq!(uri.authority().unwrap().as_str(), "user@example.com:8042");
/// assert_eq!(uri.userinfo(), Some("user"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some(8042));
/// assert_eq!(uri.path(), Some("/over/there"));
/// assert_eq!(uri.query(), Some("name=ferret"));
/// assert_eq!(uri.fragment(), Some("nose"));
/// # Ok::<_, generic_uri::ParseError<&str>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Uri<T> {
    /// Value of the URI.
    pub(crate) val: T,
    /// Metadata of the URI.
    /// Should be identical to parser output with `val` as input.
    pub(crate) meta: Meta,
}

impl<T> Uri<T> {
    /// Parses a URI from a string.
    ///
    /// The return type is
    ///
    /// - `Result<Uri<&str>, ParseError<&str>>` for `I = &str`;
    /// - `Result<Uri<String>, ParseError<String>>` for `I = String`.
    ///
    /// An authority that does not match the server grammar is accepted
    /// as registry-based. Use [`parse_server_authority`] to require
    /// a server-based authority.
    ///
    /// [`parse_server_authority`]: Self::parse_server_authority
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a valid URI reference.
    pub fn parse<I>(input: I) -> Result<Self, I::Err>
    where
        I: Parse<Val = T>,
    {
        input.parse()
    }
}

impl<'a> Uri<&'a str> {
    /// Parses a URI from a trusted string.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid URI reference.
    /// For a non-panicking variant, use [`parse`](Self::parse).
    #[must_use]
    pub fn parse_or_panic(s: &'a str) -> Self {
        match Self::parse(s) {
            Ok(uri) => uri,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a new `Uri<String>` by cloning the contents of this `Uri<&str>`.
    #[inline]
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl Uri<String> {
    /// Borrows this `Uri<String>` as `Uri<&str>`.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    #[must_use]
    pub fn borrow(&self) -> Uri<&str> {
        Uri {
            val: &self.val,
            meta: self.meta,
        }
    }

    /// Consumes this `Uri<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }
}

/// References to the value and the metadata of a `Uri`.
#[derive(Clone, Copy)]
pub(crate) struct UriRef<'v, 'm> {
    val: &'v str,
    meta: &'m Meta,
}

impl<'v> UriRef<'v, '_> {
    pub fn as_str(self) -> &'v str {
        self.val
    }

    pub fn to_owned(self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: *self.meta,
        }
    }

    pub fn scheme_str(self) -> Option<&'v str> {
        let end = self.meta.scheme_end?.get();
        Some(&self.val[..end])
    }

    pub fn scheme(self) -> Option<&'v Scheme> {
        self.scheme_str().map(Scheme::new_validated)
    }

    pub fn is_opaque(self) -> bool {
        self.meta.opaque
    }

    pub fn scheme_specific_part(self) -> &'v str {
        let start = self.meta.scheme_end.map_or(0, |i| i.get() + 1);
        &self.val[start..self.meta.query_or_path_end()]
    }

    pub fn authority(self) -> Option<Authority<'v>> {
        let meta = self.meta.auth_meta?;
        let start = self.meta.auth_start();
        let end = self.meta.path_bounds.0;
        Some(Authority::new(&self.val[start..end], meta.rebase(start, 0)))
    }

    pub fn path(self) -> Option<&'v str> {
        let (start, end) = self.meta.path_bounds;
        (!self.meta.opaque).then(|| &self.val[start..end])
    }

    pub fn query(self) -> Option<&'v str> {
        let end = self.meta.query_end?.get();
        Some(&self.val[self.meta.path_bounds.1 + 1..end])
    }

    pub fn fragment(self) -> Option<&'v str> {
        let start = self.meta.query_or_path_end();
        (start != self.val.len()).then(|| &self.val[start + 1..])
    }
}

/// Components of a hierarchical URI, each already valid on its own.
pub(crate) struct Components<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<Authority<'a>>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl Components<'_> {
    /// Joins the components into a `Uri`, building the metadata along the way.
    pub fn render(self) -> Uri<String> {
        let len = self.scheme.map_or(0, |s| s.len() + 1)
            + self.authority.map_or(0, |a| a.as_str().len() + 2)
            + self.path.len()
            + 2
            + self.query.map_or(0, |s| s.len() + 1)
            + self.fragment.map_or(0, |s| s.len() + 1);

        let mut buf = String::with_capacity(len);
        let mut meta = Meta::default();

        if let Some(scheme) = self.scheme {
            buf.push_str(scheme);
            meta.scheme_end = NonZeroUsize::new(buf.len());
            buf.push(':');
        }

        if let Some(auth) = self.authority {
            buf.push_str("//");
            let start = buf.len();
            buf.push_str(auth.as_str());
            meta.auth_meta = Some(auth.meta().rebase(0, start));
        }

        let path_start = buf.len();
        if self.authority.is_some() {
            if !self.path.is_empty() && !self.path.starts_with('/') {
                // A path after an authority must be absolute.
                buf.push('/');
            }
        } else if self.path.starts_with("//") {
            // Keep the path from being taken as an authority.
            buf.push_str("/.");
        } else if self.path.is_empty() && self.scheme.is_some() {
            // Keep an absolute URI from becoming opaque or invalid.
            buf.push('/');
        }
        buf.push_str(self.path);
        meta.path_bounds = (path_start, buf.len());

        if let Some(query) = self.query {
            buf.push('?');
            buf.push_str(query);
            meta.query_end = NonZeroUsize::new(buf.len());
        }

        if let Some(fragment) = self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }

        Uri { val: buf, meta }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    pub(crate) fn make_ref(&'i self) -> UriRef<'o, 'i> {
        UriRef {
            val: self.as_str(),
            meta: &self.meta,
        }
    }

    /// Returns the URI as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    /// Returns the optional [scheme] component.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc2396#section-3.1
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{component::Scheme, Uri};
    ///
    /// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.scheme(), Some(SCHEME_HTTP));
    ///
    /// let uri = Uri::parse("/path/to/file")?;
    /// assert_eq!(uri.scheme(), None);
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o Scheme> {
        self.make_ref().scheme()
    }

    /// Checks whether the URI is absolute, that is, has a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Checks whether the URI is opaque.
    ///
    /// An opaque URI is an absolute URI whose scheme-specific part
    /// does not start with `"/"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// assert!(Uri::parse("mailto:user@example.com")?.is_opaque());
    /// assert!(!Uri::parse("file:/etc/hosts")?.is_opaque());
    /// assert!(!Uri::parse("docs/guide")?.is_opaque());
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.meta.opaque
    }

    /// Returns the raw scheme-specific part, that is, everything between
    /// the scheme and the fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("mailto:user@example.com#top")?;
    /// assert_eq!(uri.scheme_specific_part(), "user@example.com");
    ///
    /// let uri = Uri::parse("http://example.com/a?b#c")?;
    /// assert_eq!(uri.scheme_specific_part(), "//example.com/a?b");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn scheme_specific_part(&'i self) -> &'o str {
        self.make_ref().scheme_specific_part()
    }

    /// Returns the decoded scheme-specific part.
    #[must_use]
    pub fn scheme_specific_part_decoded(&'i self) -> Cow<'o, str> {
        pct_enc::decode(self.scheme_specific_part(), true)
    }

    /// Returns the optional [authority] component.
    ///
    /// An empty authority, as in `"file:///etc"`, is treated as absent.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc2396#section-3.2
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        self.make_ref().authority()
    }

    /// Returns the decoded authority component.
    #[must_use]
    pub fn authority_decoded(&'i self) -> Option<Cow<'o, str>> {
        self.authority().map(|a| pct_enc::decode(a.as_str(), true))
    }

    /// Returns the raw userinfo of a server-based authority.
    #[must_use]
    pub fn userinfo(&'i self) -> Option<&'o str> {
        self.authority()?.userinfo()
    }

    /// Returns the decoded userinfo of a server-based authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("ftp://John%20Doe@example.com/")?;
    /// assert_eq!(uri.userinfo(), Some("John%20Doe"));
    /// assert_eq!(uri.userinfo_decoded().unwrap(), "John Doe");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn userinfo_decoded(&'i self) -> Option<Cow<'o, str>> {
        self.userinfo().map(|s| pct_enc::decode(s, true))
    }

    /// Returns the raw host of a server-based authority.
    ///
    /// A literal IPv6 address is returned with its enclosing brackets.
    #[must_use]
    pub fn host(&'i self) -> Option<&'o str> {
        self.authority()?.host()
    }

    /// Returns the host of a server-based authority, with an escaped
    /// `"%25"` scope id separator of a literal IPv6 address unescaped.
    ///
    /// Nothing else in the host is decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://[2001:db8::1%25eth0]:8080/x")?;
    /// assert_eq!(uri.host(), Some("[2001:db8::1%25eth0]"));
    /// assert_eq!(uri.host_decoded().unwrap(), "[2001:db8::1%eth0]");
    /// assert_eq!(uri.port(), Some(8080));
    ///
    /// let uri = Uri::parse("http://[fe80::1%abc]/")?;
    /// assert_eq!(uri.host_decoded().unwrap(), "[fe80::1%abc]");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn host_decoded(&'i self) -> Option<Cow<'o, str>> {
        let auth = self.authority()?;
        let host = auth.host()?;
        if let Some(Host::Ipv6 {
            scope_id: Some(id), ..
        }) = auth.host_parsed()
        {
            // The scope id is followed by "]".
            let sep = host.len() - id.len() - 1;
            if host[..sep].ends_with("%25") {
                return Some(Cow::Owned([&host[..sep - 2], id, "]"].concat()));
            }
        }
        Some(Cow::Borrowed(host))
    }

    /// Returns the port of a server-based authority.
    ///
    /// Returns `None` if the port is absent or empty.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self.meta.auth_meta? {
            AuthMeta::Server(meta) => meta.port,
            AuthMeta::Registry => None,
        }
    }

    /// Returns the raw [path] component, or `None` if the URI is opaque.
    ///
    /// The path of a hierarchical URI is always present, although it may be empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc2396#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com/")?.path(), Some("/"));
    /// assert_eq!(Uri::parse("http://example.com")?.path(), Some(""));
    /// assert_eq!(Uri::parse("mailto:user@example.com")?.path(), None);
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn path(&'i self) -> Option<&'o str> {
        self.make_ref().path()
    }

    /// Returns the decoded path component.
    #[must_use]
    pub fn path_decoded(&'i self) -> Option<Cow<'o, str>> {
        self.path().map(|s| pct_enc::decode(s, true))
    }

    /// Returns the raw [query] component.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc2396#section-3.4
    #[must_use]
    pub fn query(&'i self) -> Option<&'o str> {
        self.make_ref().query()
    }

    /// Returns the decoded query component.
    ///
    /// Escaped octets between square brackets are decoded as well.
    #[must_use]
    pub fn query_decoded(&'i self) -> Option<Cow<'o, str>> {
        self.query().map(|s| pct_enc::decode(s, false))
    }

    /// Returns the raw [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc2396#section-4.1
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o str> {
        self.make_ref().fragment()
    }

    /// Returns the decoded fragment component.
    ///
    /// Escaped octets between square brackets are decoded as well.
    #[must_use]
    pub fn fragment_decoded(&'i self) -> Option<Cow<'o, str>> {
        self.fragment().map(|s| pct_enc::decode(s, false))
    }

    /// Returns the URI as a pure US-ASCII string.
    ///
    /// Every non-ASCII character is percent-encoded as UTF-8 octets.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/caf\u{e9}")?;
    /// assert_eq!(uri.to_ascii_string(), "http://example.com/caf%C3%A9");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn to_ascii_string(&'i self) -> Cow<'o, str> {
        pct_enc::encode(self.as_str())
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Normalizes the path of the URI.
    ///
    /// `"."` segments and `".."` segments following a segment other than
    /// `".."` are removed, and consecutive slashes are collapsed into one.
    /// If the first remaining segment of a relative path contains a colon,
    /// `"./"` is prepended to keep it from being taken as a scheme.
    ///
    /// Opaque URIs and URIs with an empty path are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a/./b/../c?q=1#f")?;
    /// assert_eq!(uri.normalize(), "http://example.com/a/c?q=1#f");
    ///
    /// let uri = Uri::parse("a/../b:c")?;
    /// assert_eq!(uri.normalize(), "./b:c");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Uri<String> {
        normalize::normalize(self.make_ref())
    }

    /// Resolves the given URI against this base URI, as described
    /// in [Section 5.2 of RFC 2396].
    ///
    /// - If either URI is opaque, or `child` has a scheme, `child` is returned.
    /// - If `child` holds nothing but a fragment, `self` is returned with
    ///   its fragment replaced.
    /// - Otherwise the target takes the scheme from `self`, the query and
    ///   fragment from `child`, and the authority and path from `child`
    ///   if it has an authority. A relative path is merged with the
    ///   directory of the base path and then normalized.
    ///
    /// [Section 5.2 of RFC 2396]: https://datatracker.ietf.org/doc/html/rfc2396#section-5.2
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let base = Uri::parse("http://example.com/lang/cpp/")?;
    /// let child = Uri::parse("../demo/b/index.html")?;
    /// assert_eq!(base.resolve(&child), "http://example.com/lang/demo/b/index.html");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn resolve<U: Bos<str>>(&self, child: &Uri<U>) -> Uri<String> {
        resolve::resolve(self.make_ref(), child.make_ref())
    }

    /// Parses the given string and resolves it against this base URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a valid URI reference.
    pub fn resolve_str<'a>(&self, s: &'a str) -> Result<Uri<String>, ParseError<&'a str>> {
        let child = Uri::parse(s)?;
        Ok(self.resolve(&child))
    }

    /// Relativizes the given URI against this base URI.
    ///
    /// `child` is returned unchanged if either URI is opaque, if their
    /// schemes or authorities differ, or if the normalized base path
    /// is not a prefix of the normalized child path. Otherwise a relative
    /// URI is returned with the remainder of the path and the query
    /// and fragment of `child`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let base = Uri::parse("http://example.com/a/")?;
    /// let child = Uri::parse("http://example.com/a/b/c?q#f")?;
    /// assert_eq!(base.relativize(&child), "b/c?q#f");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    #[must_use]
    pub fn relativize<U: Bos<str>>(&self, child: &Uri<U>) -> Uri<String> {
        resolve::relativize(self.make_ref(), child.make_ref())
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Attempts to parse the authority of the URI as server-based.
    ///
    /// A URI without an authority, or with a server-based one,
    /// is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the authority does not match the server grammar.
    /// The error carries the URI value.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{ParseErrorKind, Part, Uri};
    ///
    /// let uri = Uri::parse("http://host:port/")?;
    /// assert!(!uri.authority().unwrap().is_server_based());
    ///
    /// let e = uri.parse_server_authority().unwrap_err();
    /// assert_eq!(e.kind(), ParseErrorKind::IllegalChar(Part::Port));
    /// assert_eq!(e.index(), 12);
    /// assert_eq!(e.into_input(), "http://host:port/");
    /// # Ok::<_, generic_uri::ParseError<&str>>(())
    /// ```
    pub fn parse_server_authority(self) -> Result<Self, ParseError<T>> {
        if !matches!(self.meta.auth_meta, Some(AuthMeta::Registry)) {
            return Ok(self);
        }
        let res = parse::parse(self.as_str(), true);
        match res {
            Ok(meta) => Ok(Uri {
                val: self.val,
                meta,
            }),
            Err(e) => Err(e.with_input(self.val)),
        }
    }
}

impl<T: Bos<str>> AsRef<str> for Uri<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Default for Uri<&str> {
    /// Creates an empty relative URI.
    fn default() -> Self {
        Uri {
            val: "",
            meta: Meta::default(),
        }
    }
}

impl Default for Uri<String> {
    /// Creates an empty relative URI.
    fn default() -> Self {
        Uri {
            val: String::new(),
            meta: Meta::default(),
        }
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = ParseError<&'a str>;

    /// Equivalent to [`parse`](Uri::parse).
    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri<String> {
    type Error = ParseError<String>;

    /// Equivalent to [`parse`](Uri::parse).
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl<'a> From<Uri<&'a str>> for &'a str {
    /// Equivalent to [`as_str`](Uri::as_str).
    #[inline]
    fn from(value: Uri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<Uri<String>> for String {
    /// Equivalent to [`into_string`](Uri::into_string).
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl From<Uri<&str>> for Uri<String> {
    /// Equivalent to [`to_owned`](Uri::to_owned).
    #[inline]
    fn from(value: Uri<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for Uri<String> {
    type Err = ParseError;

    /// Equivalent to `Uri::parse(s).map(|r| r.to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned()).map_err(|e| e.plain())
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for Uri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        Uri::parse(s).map_err(|e| {
            de::Error::custom(format_args!("failed to parse {s:?} as URI: {}", e.plain()))
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(|e| {
            de::Error::custom(format_args!(
                "failed to parse {:?} as URI: {}",
                e.input().unwrap_or_default(),
                e.plain()
            ))
        })
    }
}
