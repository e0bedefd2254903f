//! Character groups and sampling alphabets.
//!
//! A `chars=` value is a comma separated list of group tokens. Named tokens
//! (`ascii_letters`, `digits`, ...) expand to built-in sets; anything else is
//! taken literally. A doubled comma stands for a literal comma.

use passcache_types::{PasscacheError, Result};
use std::fmt;

/// `a-z`
pub const ASCII_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// `A-Z`
pub const ASCII_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// `a-zA-Z`
pub const ASCII_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// `0-9`
pub const DIGITS: &str = "0123456789";
/// `0-9a-fA-F`
pub const HEXDIGITS: &str = "0123456789abcdefABCDEF";
/// `0-7`
pub const OCTDIGITS: &str = "01234567";
/// The 32 ASCII punctuation characters.
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;
/// Characters salts are drawn from.
pub const SALT_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789./";

/// Characters removed from every alphabet.
const QUOTES: [char; 2] = ['"', '\''];

/// Built-in character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedClass {
    /// Upper and lower case ASCII letters
    AsciiLetters,
    /// Lower case ASCII letters
    AsciiLowercase,
    /// Upper case ASCII letters
    AsciiUppercase,
    /// Decimal digits
    Digits,
    /// Hexadecimal digits, both cases
    HexDigits,
    /// Octal digits
    OctDigits,
    /// ASCII punctuation
    Punctuation,
}

impl NamedClass {
    /// Look up a class by token name.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ascii_letters" | "letters" => Some(NamedClass::AsciiLetters),
            "ascii_lowercase" | "lowercase" => Some(NamedClass::AsciiLowercase),
            "ascii_uppercase" | "uppercase" => Some(NamedClass::AsciiUppercase),
            "digits" => Some(NamedClass::Digits),
            "hexdigits" => Some(NamedClass::HexDigits),
            "octdigits" => Some(NamedClass::OctDigits),
            "punctuation" => Some(NamedClass::Punctuation),
            _ => None,
        }
    }

    /// The characters in this class.
    pub fn chars(&self) -> &'static str {
        match self {
            NamedClass::AsciiLetters => ASCII_LETTERS,
            NamedClass::AsciiLowercase => ASCII_LOWERCASE,
            NamedClass::AsciiUppercase => ASCII_UPPERCASE,
            NamedClass::Digits => DIGITS,
            NamedClass::HexDigits => HEXDIGITS,
            NamedClass::OctDigits => OCTDIGITS,
            NamedClass::Punctuation => PUNCTUATION,
        }
    }

    /// Canonical token name.
    pub fn name(&self) -> &'static str {
        match self {
            NamedClass::AsciiLetters => "ascii_letters",
            NamedClass::AsciiLowercase => "ascii_lowercase",
            NamedClass::AsciiUppercase => "ascii_uppercase",
            NamedClass::Digits => "digits",
            NamedClass::HexDigits => "hexdigits",
            NamedClass::OctDigits => "octdigits",
            NamedClass::Punctuation => "punctuation",
        }
    }
}

/// One group of a `chars=` specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharGroup {
    /// A built-in class
    Named(NamedClass),
    /// Characters taken verbatim
    Literal(String),
}

impl CharGroup {
    /// Classify a single group token.
    pub fn from_token(token: &str) -> Self {
        match NamedClass::from_token(token) {
            Some(class) => CharGroup::Named(class),
            None => CharGroup::Literal(token.to_string()),
        }
    }

    /// The characters this group contributes.
    pub fn chars(&self) -> &str {
        match self {
            CharGroup::Named(class) => class.chars(),
            CharGroup::Literal(chars) => chars,
        }
    }
}

impl fmt::Display for CharGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharGroup::Named(class) => write!(f, "{}", class.name()),
            CharGroup::Literal(chars) => write!(f, "{}", chars),
        }
    }
}

/// Split a `chars=` value into groups.
///
/// If the value contains `,,` a literal comma group comes first; the rest
/// of the value, with every `,,` collapsed to `,`, is split on commas.
/// Empty pieces are dropped.
pub fn split_groups(spec: &str) -> Vec<CharGroup> {
    let mut groups = Vec::new();
    if spec.contains(",,") {
        groups.push(CharGroup::Literal(",".to_string()));
    }

    groups.extend(
        spec.replace(",,", ",")
            .split(',')
            .filter(|token| !token.is_empty())
            .map(CharGroup::from_token),
    );
    groups
}

/// The ordered, non-empty list of characters passwords are sampled from.
///
/// Duplicates are kept: a character that appears in several groups is
/// proportionally more likely to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Concatenate the characters of `groups`, minus quote characters.
    ///
    /// Fails if nothing is left, or if any character is whitespace (it would
    /// make the stored record ambiguous).
    pub fn resolve(groups: &[CharGroup]) -> Result<Self> {
        let chars: Vec<char> = groups
            .iter()
            .flat_map(|group| group.chars().chars())
            .filter(|c| !QUOTES.contains(c))
            .collect();

        if chars.is_empty() {
            return Err(PasscacheError::MalformedRequest(
                "character set resolves to no usable characters".to_string(),
            ));
        }
        if chars.iter().any(|c| c.is_whitespace()) {
            return Err(PasscacheError::MalformedRequest(
                "character set must not contain whitespace".to_string(),
            ));
        }

        Ok(Self { chars })
    }

    /// The salt alphabet.
    pub fn salt() -> Self {
        Self {
            chars: SALT_CHARS.chars().collect(),
        }
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; kept for clippy.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether `c` can appear in a password drawn from this alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// All entries in order.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}
