#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! A generic URI parser, resolver and normalizer following [RFC 2396],
//! with the amendments of [RFC 2732] for literal IPv6 addresses.
//!
//! [RFC 2396]: https://datatracker.ietf.org/doc/html/rfc2396
//! [RFC 2732]: https://datatracker.ietf.org/doc/html/rfc2732
//!
//! **Examples:** [Parsing](Uri#examples). [Building](Uri::from_server_parts).
//! [Resolving](Uri::resolve). [Relativizing](Uri::relativize).
//! [Normalizing](Uri::normalize). [Percent-encoding](pct_enc).
//!
//! An authority is *server-based* when it matches `[userinfo "@"] host [":" port]`,
//! and is otherwise accepted as *registry-based* if it matches `reg_name`.
//! Non-ASCII characters other than spaces and controls are allowed
//! wherever escaped octets are.
//!
//! # Crate features
//!
//! - `std` (default): Implies `impl-error`.
//!
//! - `impl-error` (default): Implements `Error` for [`ParseError`].
//!
//! - `serde`: Implements `Serialize` and `Deserialize` for [`Uri`].

extern crate alloc;

pub mod component;
pub mod normalize;
pub mod pct_enc;

mod build;
mod cmp;
mod error;
mod fmt;
mod imp;
mod parse;
mod resolve;

pub use error::{Input, ParseError, ParseErrorKind, Part};
pub use imp::{Parse, Uri};

#[cfg(feature = "impl-error")]
use core::error::Error;
