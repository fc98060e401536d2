//! Alphabet registry: the configuration surface that supplies alphabets to
//! the core instead of hard-coding them into the algorithm.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::alphabet::Alphabet;
use crate::errors::AlphabetError;

/// One registry entry: the 64 symbols, in index order.
#[derive(Debug, Deserialize, Clone)]
pub struct AlphabetConfig {
    pub chars: String,
}

/// Named alphabets loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct AlphabetsConfig {
    pub alphabets: HashMap<String, AlphabetConfig>,
}

impl AlphabetsConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The registry shipped with the crate: `standard` and `url_safe`.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../alphabets.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads a registry from a user-supplied file.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Merges another registry into this one, overriding entries by name.
    pub fn merge(&mut self, other: AlphabetsConfig) {
        for (name, alphabet) in other.alphabets {
            self.alphabets.insert(name, alphabet);
        }
    }

    pub fn get_alphabet(&self, name: &str) -> Option<&AlphabetConfig> {
        self.alphabets.get(name)
    }

    /// Builds a validated [`Alphabet`] from the named entry.
    pub fn alphabet(&self, name: &str) -> Option<Result<Alphabet, AlphabetError>> {
        self.get_alphabet(name)
            .map(|config| Alphabet::from_chars(&config.chars))
    }
}
