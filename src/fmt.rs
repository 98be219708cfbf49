use crate::{
    component::{Authority, Host, Scheme},
    error::{Input, ParseError, ParseErrorKind},
    imp::Uri,
};
use borrow_or_share::Bos;
use core::fmt;

impl<I: Input> fmt::Display for ParseError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::IllegalChar(part) => write!(f, "illegal character in {}", part.name())?,
            kind => f.write_str(kind.reason())?,
        }
        write!(f, " at index {}", self.index)?;
        if let Some(input) = self.input() {
            write!(f, ": {input}")?;
        }
        Ok(())
    }
}

impl<T: Bos<str>> fmt::Debug for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for Uri<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_server_based() {
            f.debug_struct("Authority")
                .field("userinfo", &self.userinfo())
                .field("host", &self.host_parsed())
                .field("port", &self.port())
                .finish()
        } else {
            f.debug_tuple("Registry").field(&self.as_str()).finish()
        }
    }
}

impl fmt::Display for Authority<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Host<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ipv4(addr) => write!(f, "{addr}"),
            Host::Ipv6 {
                addr,
                scope_id: Some(id),
            } => write!(f, "[{addr}%{id}]"),
            Host::Ipv6 {
                addr,
                scope_id: None,
            } => write!(f, "[{addr}]"),
            Host::Name(name) => f.write_str(name),
        }
    }
}
