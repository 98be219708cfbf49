use alloc::string::String;

/// The grammar production in which an illegal character was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The scheme name.
    SchemeName,
    /// The opaque part (scheme-specific part of an opaque URI).
    Opaque,
    /// The authority component.
    Authority,
    /// The user information subcomponent.
    UserInfo,
    /// A hostname.
    Hostname,
    /// The scope id of a literal IPv6 address.
    ScopeId,
    /// The port subcomponent.
    Port,
    /// The path component.
    Path,
    /// The query component.
    Query,
    /// The fragment component.
    Fragment,
}

impl Part {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::SchemeName => "scheme name",
            Self::Opaque => "opaque part",
            Self::Authority => "authority",
            Self::UserInfo => "user info",
            Self::Hostname => "hostname",
            Self::ScopeId => "scope id",
            Self::Port => "port number",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        }
    }
}

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A colon was found at the start of the input.
    ///
    /// The error index is always zero.
    ExpectedSchemeName,
    /// An absolute URI whose scheme is not followed by anything but a fragment.
    ExpectedSchemeSpecificPart,
    /// A percent character not followed by two hexadecimal digits.
    ///
    /// The error index points to the percent character.
    MalformedEscape,
    /// A character not allowed in the given production.
    ///
    /// The error index points to the character.
    IllegalChar(Part),
    /// Two slashes not followed by an authority, path, query or fragment.
    ExpectedAuthority,
    /// A run of digits and dots that is not a valid IPv4 address.
    MalformedIpv4,
    /// An IPv4 address was expected inside a literal IPv6 address.
    ExpectedIpv4,
    /// Invalid literal IPv6 address.
    ///
    /// The error index points to the first byte of the address.
    MalformedIpv6,
    /// A literal IPv6 address with more than 16 bytes.
    Ipv6TooLong,
    /// A literal IPv6 address with less than 16 bytes and no `"::"`.
    Ipv6TooShort,
    /// A group of more than four hexadecimal digits.
    Ipv6HexDigits,
    /// A single colon not followed by hexadecimal digits.
    ExpectedIpv6Digits,
    /// A left square bracket without a matching right one.
    UnclosedBracket,
    /// A percent character in a literal IPv6 address not followed by a scope id.
    ExpectedScopeId,
    /// A server-based authority without a host.
    ExpectedHostname,
    /// A port that does not fit in 16 bits.
    MalformedPort,
    /// Unexpected character after the host in a server-based authority.
    ExpectedPort,
    /// A relative path was given together with a scheme to a component constructor.
    RelativePathInAbsoluteUri,
    /// Unexpected character after a complete URI.
    TrailingInput,
}

impl ParseErrorKind {
    /// Describes the cause, without the production of an illegal character.
    pub(crate) fn reason(self) -> &'static str {
        match self {
            Self::ExpectedSchemeName => "expected scheme name",
            Self::ExpectedSchemeSpecificPart => "expected scheme-specific part",
            Self::MalformedEscape => "malformed escape pair",
            Self::IllegalChar(_) => "illegal character",
            Self::ExpectedAuthority => "expected authority",
            Self::MalformedIpv4 => "malformed IPv4 address",
            Self::ExpectedIpv4 => "expected IPv4 address",
            Self::MalformedIpv6 => "malformed IPv6 address",
            Self::Ipv6TooLong => "IPv6 address too long",
            Self::Ipv6TooShort => "IPv6 address too short",
            Self::Ipv6HexDigits => "at most four hexadecimal digits permitted",
            Self::ExpectedIpv6Digits => "expected digits for an IPv6 address",
            Self::UnclosedBracket => "expected closing bracket for IPv6 address",
            Self::ExpectedScopeId => "expected scope id",
            Self::ExpectedHostname => "expected hostname",
            Self::MalformedPort => "malformed port number",
            Self::ExpectedPort => "expected port number",
            Self::RelativePathInAbsoluteUri => "relative path in absolute URI",
            Self::TrailingInput => "expected end of URI",
        }
    }
}

/// An error occurred when parsing a URI.
///
/// The type parameter `I` is the input that was attempted to parse,
/// or `()` when the input is erased with [`plain`](Self::plain).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError<I = ()> {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
    pub(crate) input: I,
}

impl ParseError<()> {
    pub(crate) fn with_input<I>(self, input: I) -> ParseError<I> {
        ParseError {
            index: self.index,
            kind: self.kind,
            input,
        }
    }
}

impl<I> ParseError<I> {
    /// Returns the byte index at which the error occurred in the input.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Recovers the input that was attempted to parse into a [`Uri`].
    ///
    /// [`Uri`]: crate::Uri
    #[must_use]
    pub fn into_input(self) -> I {
        self.input
    }

    /// Returns the error with input erased.
    #[must_use]
    pub fn plain(&self) -> ParseError {
        ParseError {
            index: self.index,
            kind: self.kind,
            input: (),
        }
    }
}

impl<I: Input> ParseError<I> {
    /// Returns the input as a string slice, if not erased.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_input()
    }
}

mod private {
    pub trait Sealed {}
}

/// Input types that may be carried by a [`ParseError`].
///
/// This trait is sealed and implemented for `()`, `&str` and `String`.
pub trait Input: private::Sealed {
    #[doc(hidden)]
    fn as_input(&self) -> Option<&str>;
}

impl private::Sealed for () {}
impl private::Sealed for &str {}
impl private::Sealed for String {}

impl Input for () {
    fn as_input(&self) -> Option<&str> {
        None
    }
}

impl Input for &str {
    fn as_input(&self) -> Option<&str> {
        Some(self)
    }
}

impl Input for String {
    fn as_input(&self) -> Option<&str> {
        Some(self)
    }
}

#[cfg(feature = "impl-error")]
impl<I: Input + core::fmt::Debug> crate::Error for ParseError<I> {}
