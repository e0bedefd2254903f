//! Lookup request parsing.
//!
//! A term looks like `<path> [key=value ...]`. Values may be quoted to
//! protect whitespace: `db/admin chars="ascii_letters,digits" length=32`.

use crate::charset::{split_groups, CharGroup};
use crate::policy::PasswordPolicy;
use passcache_core::config::{GlobalConfig, DEFAULT_CHARS, DEFAULT_LENGTH};
use passcache_types::{PasscacheError, Result};
use std::collections::BTreeMap;

/// Parameter keys a term may carry.
pub const VALID_PARAMS: [&str; 3] = ["length", "encrypt", "chars"];

/// One whitespace separated piece of a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A path fragment, as written (quotes included)
    Bare(String),
    /// A `key=value` parameter, value unquoted
    Param {
        /// Parameter name
        key: String,
        /// Parameter value
        value: String,
    },
}

/// Split a term into tokens.
///
/// Whitespace inside single or double quotes does not split. An
/// unterminated quote is a malformed request.
pub fn tokenize(term: &str) -> Result<Vec<Token>> {
    let mut raw = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in term.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    raw.push(std::mem::take(&mut current));
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                current.push(c);
            }
        }
    }

    if quote.is_some() {
        return Err(PasscacheError::MalformedRequest(format!(
            "unterminated quote in password lookup term: {}",
            term
        )));
    }
    if !current.is_empty() {
        raw.push(current);
    }

    Ok(raw.into_iter().map(classify).collect())
}

fn classify(raw: String) -> Token {
    if let Some((key, value)) = raw.split_once('=') {
        let is_key = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_key {
            return Token::Param {
                key: key.to_string(),
                value: unquote(value).to_string(),
            };
        }
    }
    Token::Bare(raw)
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// A parsed lookup: where the record lives and how to fill it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Record path as written in the term
    pub path: String,
    /// Generation and hashing policy
    pub policy: PasswordPolicy,
}

/// Values used when a term leaves a parameter out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserDefaults {
    /// Default password length
    pub length: usize,
    /// Default character group tokens
    pub chars: Vec<String>,
}

impl Default for ParserDefaults {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            chars: DEFAULT_CHARS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&GlobalConfig> for ParserDefaults {
    fn from(config: &GlobalConfig) -> Self {
        Self {
            length: config.default_length,
            chars: config.default_chars.clone(),
        }
    }
}

/// Turns lookup terms into [`LookupRequest`]s.
#[derive(Debug, Clone, Default)]
pub struct RequestParser {
    defaults: ParserDefaults,
}

impl RequestParser {
    /// Parser with the given defaults.
    pub fn new(defaults: ParserDefaults) -> Self {
        Self { defaults }
    }

    /// Parse one term.
    pub fn parse(&self, term: &str) -> Result<LookupRequest> {
        let mut bare = Vec::new();
        let mut params = BTreeMap::new();

        for token in tokenize(term)? {
            match token {
                Token::Bare(raw) => bare.push(raw),
                Token::Param { key, value } => {
                    params.insert(key, value);
                }
            }
        }

        // Bare tokens must all precede the parameters; anything else is
        // a stray word after a key=value pair.
        let raw_path = bare.join(" ");
        if !term.trim_start().starts_with(&raw_path) {
            return Err(PasscacheError::MalformedRequest(
                "Unrecognized value after key=value parameters given to password lookup".to_string(),
            ));
        }
        if raw_path.is_empty() {
            return Err(PasscacheError::MalformedRequest(format!(
                "No path given to password lookup: {}",
                term
            )));
        }

        let invalid: Vec<&str> = params
            .keys()
            .map(String::as_str)
            .filter(|key| !VALID_PARAMS.contains(key))
            .collect();
        if !invalid.is_empty() {
            return Err(PasscacheError::MalformedRequest(format!(
                "Unrecognized parameter(s) given to password lookup: {}",
                invalid.join(", ")
            )));
        }

        let length = match params.get("length") {
            Some(value) => value.parse::<usize>().map_err(|_| {
                PasscacheError::MalformedRequest(format!(
                    "length must be a positive integer, got {:?}",
                    value
                ))
            })?,
            None => self.defaults.length,
        };

        let groups: Vec<CharGroup> = match params.get("chars") {
            Some(value) if !value.is_empty() => split_groups(value),
            _ => self.defaults.chars.iter().map(|t| CharGroup::from_token(t)).collect(),
        };

        let hash_scheme = params.remove("encrypt");
        let policy = PasswordPolicy::new(length, groups, hash_scheme)?;

        Ok(LookupRequest {
            path: bare.iter().map(|raw| unquote(raw)).collect::<Vec<_>>().join(" "),
            policy,
        })
    }
}
