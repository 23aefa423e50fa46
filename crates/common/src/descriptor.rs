//! Connection descriptor parsing
//!
//! A descriptor is a `;`-separated list of `key=value` pairs identifying a
//! service endpoint and its credentials:
//!
//! ```text
//! uri=https://contoso.management.azure-api.net;identifier=integration;key="s3cr3t;with;semicolons"
//! ```
//!
//! Values may be bare (anything except `;`), single-quoted or
//! double-quoted. Inside a quoted value the quote character is escaped
//! with a backslash. Keys are word characters and compare
//! case-insensitively. A key appearing twice makes the whole descriptor
//! malformed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use apim_domain::{ApiManagementError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

const PROPERTY_PATTERN: &str = r#"(?P<key>\w+)=(?P<value>'(?:\\'|[^'])+'|"(?:\\"|[^"])+"|[^;]+)(?:;|$)"#;

static PROPERTY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PROPERTY_PATTERN).expect("PROPERTY_REGEX should compile - this is a bug")
});

/// Immutable, case-insensitive property bag parsed from a descriptor string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionDescriptor {
    properties: BTreeMap<String, String>,
}

impl ConnectionDescriptor {
    /// Parse a raw descriptor string
    ///
    /// # Errors
    /// Returns `MalformedConnectionString` if the input is empty, contains
    /// no `key=value` pair, or repeats a key.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(ApiManagementError::MalformedConnectionString(
                "connection string is empty".to_string(),
            ));
        }

        let mut properties = BTreeMap::new();
        for captures in PROPERTY_REGEX.captures_iter(raw) {
            let (Some(key), Some(value)) = (captures.name("key"), captures.name("value")) else {
                continue;
            };

            let key = key.as_str().to_lowercase();
            if properties.contains_key(&key) {
                return Err(ApiManagementError::MalformedConnectionString(format!(
                    "duplicate key '{key}'"
                )));
            }
            properties.insert(key, unquote(value.as_str()));
        }

        if properties.is_empty() {
            return Err(ApiManagementError::MalformedConnectionString(
                "no key=value pairs found".to_string(),
            ));
        }

        Ok(Self { properties })
    }

    /// Look up a property; the key is matched case-insensitively
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Like [`get`](Self::get) but treats an empty value as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in lower-cased key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for ConnectionDescriptor {
    type Err = ApiManagementError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders `key=value;` pairs with sorted lower-cased keys.
///
/// Values are written unquoted, so a value containing `;` does not
/// survive a re-parse.
impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.properties {
            write!(f, "{key}={value};")?;
        }
        Ok(())
    }
}

fn unquote(value: &str) -> String {
    for quote in ['\'', '"'] {
        if value.len() > 2 && value.starts_with(quote) && value.ends_with(quote) {
            let inner = &value[1..value.len() - 1];
            return inner.replace(&format!("\\{quote}"), &quote.to_string());
        }
    }
    value.to_string()
}
