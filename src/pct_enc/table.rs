//! Character class tables from RFC 2396 and RFC 2732.
//!
//! The predefined table constants in this module are documented with
//! the BNF notation of [RFC 2396].
//!
//! [RFC 2396]: https://datatracker.ietf.org/doc/html/rfc2396

// Code point 0 is never allowed, so its bit doubles as the `escaped` flag.
const MASK_ESCAPED: u64 = 1;

/// A table specifying the characters allowed in a grammar production.
///
/// Each table holds one bit per ASCII character and an extra flag for
/// the `escaped` production, which stands for both percent-encoded octets
/// and the visible non-ASCII characters of the "other" category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given ASCII characters.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `0`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(!matches!(cur, 0 | 128..), "cannot allow non-ASCII byte or 0");
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the characters allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Marks this table as allowing the `escaped` production.
    #[must_use]
    pub const fn or_escaped(self) -> Self {
        Self(self.0 | MASK_ESCAPED, self.1)
    }

    /// Subtracts from this table.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the table is a subset of another.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Checks whether the given ASCII byte is allowed unescaped by the table.
    ///
    /// Always returns `false` for non-ASCII bytes.
    #[inline]
    #[must_use]
    pub const fn allows_ascii(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0 & !MASK_ESCAPED
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether the given character is allowed unescaped by the table.
    ///
    /// Only ASCII characters can match a table directly. Non-ASCII
    /// characters are covered by the `escaped` flag instead.
    #[inline]
    #[must_use]
    pub const fn allows(self, ch: char) -> bool {
        (ch as u32) < 128 && self.allows_ascii(ch as u8)
    }

    /// Checks whether the `escaped` production is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_escaped(self) -> bool {
        self.0 & MASK_ESCAPED != 0
    }
}

/// Checks whether a character is a space separator, a line separator
/// or a paragraph separator (general categories `Zs`, `Zl` and `Zp`).
#[must_use]
pub const fn is_space_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{20}'
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
    )
}

/// Checks whether a character belongs to the "other" category: non-ASCII
/// characters that are neither space nor control characters.
///
/// Such characters are accepted wherever the `escaped` production is.
#[must_use]
pub fn is_other(ch: char) -> bool {
    !ch.is_ascii() && !is_space_char(ch) && !ch.is_control()
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `digit = "0" | "1" | ... | "9"`
pub const DIGIT: Table = new(b"0123456789");

/// `alpha = lowalpha | upalpha`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `alphanum = alpha | digit`
pub const ALPHANUM: Table = ALPHA.or(DIGIT);

/// `hex = digit | "A" | ... | "F" | "a" | ... | "f"`
pub const HEX: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `"-"`
pub const DASH: Table = new(b"-");

/// `"."`
pub const DOT: Table = new(b".");

/// `mark = "-" | "_" | "." | "!" | "~" | "*" | "'" | "(" | ")"`
pub const MARK: Table = new(b"-_.!~*'()");

/// `unreserved = alphanum | mark`
pub const UNRESERVED: Table = ALPHANUM.or(MARK);

/// `reserved = ";" | "/" | "?" | ":" | "@" | "&" | "=" | "+" | "$" | "," | "[" | "]"`
///
/// Square brackets are added by RFC 2732.
pub const RESERVED: Table = new(b";/?:@&=+$,[]");

/// `escaped = "%" hex hex`, together with the "other" category.
pub const ESCAPED: Table = new(b"").or_escaped();

/// `uric = reserved | unreserved | escaped`
pub const URIC: Table = RESERVED.or(UNRESERVED).or(ESCAPED);

/// `pchar = unreserved | escaped | ":" | "@" | "&" | "=" | "+" | "$" | ","`
pub const PCHAR: Table = UNRESERVED.or(ESCAPED).or(new(b":@&=+$,"));

/// All characters allowed in a path, that is, `pchar`, `";"` and `"/"`.
pub const PATH: Table = PCHAR.or(new(b";/"));

/// `userinfo = *( unreserved | escaped | ";" | ":" | "&" | "=" | "+" | "$" | "," )`
pub const USERINFO: Table = UNRESERVED.or(ESCAPED).or(new(b";:&=+$,"));

/// `reg_name = 1*( unreserved | escaped | "$" | "," | ";" | ":" | "@" | "&" | "=" | "+" )`
pub const REG_NAME: Table = UNRESERVED.or(ESCAPED).or(new(b"$,;:@&=+"));

/// All characters that may appear in a server-based authority.
pub const SERVER: Table = USERINFO.or(ALPHANUM).or(DASH).or(new(b".:@[]"));

/// [`SERVER`] plus a raw `"%"`, for authorities holding an IPv6 scope id.
pub const SERVER_PERCENT: Table = SERVER.or(new(b"%"));

/// `scheme = alpha *( alpha | digit | "+" | "-" | "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// All characters allowed in the scope id of a literal IPv6 address.
pub const SCOPE_ID: Table = ALPHANUM.or(new(b"_."));
