//! Reference resolution and relativization.

use crate::{
    cmp,
    imp::{Components, Uri, UriRef},
    normalize::normalize_path,
};
use alloc::{borrow::Cow, string::String};

pub(crate) fn resolve(base: UriRef<'_, '_>, child: UriRef<'_, '_>) -> Uri<String> {
    if base.is_opaque() || child.is_opaque() {
        return child.to_owned();
    }

    let c_authority = child.authority();
    let c_path = child.path().unwrap_or_default();

    // A lone fragment refers to the base itself.
    if child.scheme_str().is_none()
        && c_authority.is_none()
        && c_path.is_empty()
        && child.query().is_none()
    {
        if let Some(fragment) = child.fragment() {
            if base.fragment() == Some(fragment) {
                return base.to_owned();
            }
            return Components {
                scheme: base.scheme_str(),
                authority: base.authority(),
                path: base.path().unwrap_or_default(),
                query: base.query(),
                fragment: Some(fragment),
            }
            .render();
        }
    }

    if child.scheme_str().is_some() {
        return child.to_owned();
    }

    let merged;
    let (t_authority, t_path) = if c_authority.is_some() {
        (c_authority, c_path)
    } else if c_path.starts_with('/') {
        (base.authority(), c_path)
    } else {
        let b_path = base.path().unwrap_or_default();
        let absolute = base.scheme_str().is_some() || base.authority().is_some();
        merged = resolve_path(b_path, c_path, absolute);
        (base.authority(), &merged[..])
    };

    Components {
        scheme: base.scheme_str(),
        authority: t_authority,
        path: t_path,
        query: child.query(),
        fragment: child.fragment(),
    }
    .render()
}

/// Merges a relative path with the directory of the base path and normalizes the result.
fn resolve_path(base: &str, child: &str, absolute: bool) -> String {
    let mut path = String::with_capacity(base.len() + child.len() + 1);
    match base.rfind('/') {
        Some(i) => path.push_str(&base[..=i]),
        // The base has an empty path after its authority.
        None if absolute && !child.is_empty() => path.push('/'),
        None => {}
    }
    path.push_str(child);

    match normalize_path(&path) {
        Cow::Borrowed(_) => path,
        Cow::Owned(normalized) => normalized,
    }
}

pub(crate) fn relativize(base: UriRef<'_, '_>, child: UriRef<'_, '_>) -> Uri<String> {
    if base.is_opaque() || child.is_opaque() {
        return child.to_owned();
    }
    if base.scheme() != child.scheme()
        || !opt_eq(
            base.authority().map(|a| a.as_str()),
            child.authority().map(|a| a.as_str()),
        )
    {
        return child.to_owned();
    }

    let b_path = normalize_path(base.path().unwrap_or_default());
    let c_path = normalize_path(child.path().unwrap_or_default());

    let rest = if b_path == c_path {
        ""
    } else {
        let prefix_len = if b_path.ends_with('/') {
            b_path.len()
        } else {
            b_path.len() + 1
        };
        let is_prefix = c_path.len() >= prefix_len
            && c_path.starts_with(&*b_path)
            && (b_path.ends_with('/') || c_path.as_bytes()[b_path.len()] == b'/');
        if !is_prefix {
            return child.to_owned();
        }
        &c_path[prefix_len..]
    };

    // Keep the first segment from being taken as a scheme.
    let dotted;
    let path = match rest.split('/').next() {
        Some(first) if first.contains(':') => {
            dotted = ["./", rest].concat();
            &dotted[..]
        }
        _ => rest,
    };

    Components {
        scheme: None,
        authority: None,
        path,
        query: child.query(),
        fragment: child.fragment(),
    }
    .render()
}

fn opt_eq(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => cmp::eq_pct(a, b),
        (a, b) => a.is_none() && b.is_none(),
    }
}
