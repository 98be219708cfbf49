//! Equality, hashing and ordering of URIs.
//!
//! Components are compared as strings except that the two characters after
//! each `"%"` are compared case-insensitively. Schemes and hosts ignore case.

use crate::{
    component::Scheme,
    imp::{Uri, UriRef},
};
use borrow_or_share::Bos;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// Yields the bytes of a string, lowercasing the two after each `"%"`.
fn canonical(s: &str) -> impl Iterator<Item = u8> + '_ {
    let mut hex_left = 0;
    s.bytes().map(move |x| {
        if hex_left > 0 {
            hex_left -= 1;
            x.to_ascii_lowercase()
        } else {
            if x == b'%' {
                hex_left = 2;
            }
            x
        }
    })
}

pub(crate) fn eq_pct(a: &str, b: &str) -> bool {
    a.len() == b.len() && canonical(a).eq(canonical(b))
}

/// A string compared with escaped octets normalized.
#[derive(Clone, Copy)]
struct Pct<'a>(&'a str);

impl PartialEq for Pct<'_> {
    fn eq(&self, other: &Self) -> bool {
        eq_pct(self.0, other.0)
    }
}

impl Eq for Pct<'_> {}

impl PartialOrd for Pct<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pct<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical(self.0).cmp(canonical(other.0))
    }
}

impl Hash for Pct<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for x in canonical(self.0) {
            state.write_u8(x);
        }
        state.write_u8(0xff);
    }
}

/// A string compared ignoring ASCII case.
#[derive(Clone, Copy)]
struct NoCase<'a>(&'a str);

impl PartialEq for NoCase<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(other.0)
    }
}

impl Eq for NoCase<'_> {}

impl PartialOrd for NoCase<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NoCase<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.0.bytes(), other.0.bytes());
        a.map(|x| x.to_ascii_lowercase())
            .cmp(b.map(|x| x.to_ascii_lowercase()))
    }
}

impl Hash for NoCase<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for x in self.0.bytes() {
            state.write_u8(x.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ServerKey<'a> {
    userinfo: Option<Pct<'a>>,
    host: NoCase<'a>,
    port: Option<u16>,
}

/// Server-based authorities are compared by their subcomponents, and
/// any other pair by the whole authority. A server-based authority never
/// equals a registry-based one since their strings always differ.
#[derive(Clone, Copy)]
struct AuthKey<'a> {
    raw: Option<Pct<'a>>,
    server: Option<ServerKey<'a>>,
}

impl PartialEq for AuthKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.server, other.server) {
            (Some(a), Some(b)) => a == b,
            _ => self.raw == other.raw,
        }
    }
}

impl Eq for AuthKey<'_> {}

impl PartialOrd for AuthKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AuthKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.server, other.server) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.raw.cmp(&other.raw),
        }
    }
}

impl Hash for AuthKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.server {
            Some(server) => server.hash(state),
            None => self.raw.hash(state),
        }
    }
}

// Hierarchical URIs order before opaque ones.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Body<'a> {
    Hierarchical {
        authority: AuthKey<'a>,
        path: Pct<'a>,
        query: Option<Pct<'a>>,
    },
    Opaque {
        ssp: Pct<'a>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Key<'a> {
    scheme: Option<&'a Scheme>,
    body: Body<'a>,
    fragment: Option<Pct<'a>>,
}

fn key<'a>(r: UriRef<'a, '_>) -> Key<'a> {
    let body = match r.path() {
        None => Body::Opaque {
            ssp: Pct(r.scheme_specific_part()),
        },
        Some(path) => {
            let auth = r.authority();
            let server = auth.and_then(|a| {
                Some(ServerKey {
                    userinfo: a.userinfo().map(Pct),
                    host: NoCase(a.host()?),
                    port: a.port(),
                })
            });
            Body::Hierarchical {
                authority: AuthKey {
                    raw: auth.map(|a| Pct(a.as_str())),
                    server,
                },
                path: Pct(path),
                query: r.query().map(Pct),
            }
        }
    };
    Key {
        scheme: r.scheme(),
        body,
        fragment: r.fragment().map(Pct),
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    /// Compares two URIs component-wise.
    ///
    /// See the [type-level documentation](Uri#comparison) for details.
    fn eq(&self, other: &Uri<U>) -> bool {
        key(self.make_ref()) == key(other.make_ref())
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

impl<T: Bos<str>> Hash for Uri<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key(self.make_ref()).hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for Uri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for Uri<T> {
    /// Orders URIs by scheme first, with hierarchical URIs before opaque ones.
    ///
    /// Absent components order before present ones.
    fn cmp(&self, other: &Self) -> Ordering {
        key(self.make_ref()).cmp(&key(other.make_ref()))
    }
}

impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    /// Compares the string form exactly.
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    /// Compares the string form exactly.
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        *self == other.as_str()
    }
}
