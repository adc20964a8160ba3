use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated ISO-4217 alphabetic currency code
///
/// Exactly three ASCII letters, stored uppercase. Gateways receive the
/// code verbatim; amount scale is the vendor's concern since all amounts
/// travel in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: [u8; 3],
}

impl Currency {
    pub fn as_str(&self) -> &str {
        // Constructed only from validated ASCII letters
        std::str::from_utf8(&self.code).unwrap_or("")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(format!(
                "Invalid currency code '{}': expected 3 ASCII letters",
                s
            ));
        }
        let mut code = [0u8; 3];
        for (i, b) in bytes.iter().enumerate() {
            code[i] = b.to_ascii_uppercase();
        }
        Ok(Currency { code })
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.as_str().to_string()
    }
}
