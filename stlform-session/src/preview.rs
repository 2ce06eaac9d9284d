//! Token-keyed store of exported previews
//!
//! The main page publishes the latest STL bytes and hands the token to a
//! separate full-quality preview page, which looks the bytes up again.

use log::debug;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use stlform_core::Error;

/// Random 128-bit token rendered as 32 lowercase hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewToken(String);

impl PreviewToken {
    /// Draw a fresh random token
    pub fn generate() -> Self {
        let value: u128 = rand::thread_rng().gen();
        Self(format!("{value:032x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PreviewToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid_argument(format!(
                "preview token {s:?} is not 32 hex digits"
            )));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for PreviewToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exported STL bytes keyed by preview token
#[derive(Debug, Default)]
pub struct PreviewStore {
    entries: HashMap<PreviewToken, Vec<u8>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes under a fresh token
    pub fn publish(&mut self, data: Vec<u8>) -> PreviewToken {
        let mut token = PreviewToken::generate();
        while self.entries.contains_key(&token) {
            token = PreviewToken::generate();
        }
        debug!("published {} preview bytes as {token}", data.len());
        self.entries.insert(token.clone(), data);
        token
    }

    /// Replace the bytes behind an existing token
    ///
    /// Returns `false` (and stores nothing) for an unknown token.
    pub fn update(&mut self, token: &PreviewToken, data: Vec<u8>) -> bool {
        match self.entries.get_mut(token) {
            Some(entry) => {
                *entry = data;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, token: &PreviewToken) -> Option<&[u8]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    pub fn remove(&mut self, token: &PreviewToken) -> Option<Vec<u8>> {
        self.entries.remove(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
