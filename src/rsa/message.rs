// Encrypted Message
// Ordered ciphertext values and their JSON array exchange format

use std::fmt;

use serde_json::Value;

use super::bigint::{from_u64, RsaBigInt};
use super::error::{DecryptError, MessageError};

/// One ciphertext value per source character, in encryption order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptedMessage {
    values: Vec<RsaBigInt>,
}

impl EncryptedMessage {
    pub fn new(values: Vec<RsaBigInt>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[RsaBigInt] {
        &self.values
    }

    pub fn into_values(self) -> Vec<RsaBigInt> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a compact JSON array, e.g. `[855,123]`
    pub fn to_json(&self) -> String {
        let body: Vec<String> = self.values.iter().map(|v| v.to_str_radix(10)).collect();
        format!("[{}]", body.join(","))
    }

    /// Parse a JSON array of non-negative integers
    ///
    /// Anything that is not a syntactically valid array of numbers is a
    /// parse error; numbers that are negative or fractional are rejected as
    /// invalid ciphertext.
    pub fn from_json(text: &str) -> Result<Self, MessageError> {
        let parsed: Value =
            serde_json::from_str(text.trim()).map_err(|e| MessageError::Parse(e.to_string()))?;

        let items = match parsed {
            Value::Array(items) => items,
            other => {
                return Err(MessageError::Parse(format!(
                    "expected a JSON array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let number = match item {
                Value::Number(number) => number,
                other => {
                    return Err(MessageError::Parse(format!(
                        "element {} is {}, not a number",
                        index,
                        json_kind(other)
                    )))
                }
            };
            values.push(parse_ciphertext_value(index, &number.to_string())?);
        }

        Ok(Self { values })
    }
}

// Number text is kept verbatim by serde_json's arbitrary_precision feature
fn parse_ciphertext_value(index: usize, text: &str) -> Result<RsaBigInt, DecryptError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecryptError::InvalidCiphertext(format!(
            "element {} ({}) is not a non-negative integer",
            index, text
        )));
    }

    RsaBigInt::parse_bytes(text.as_bytes(), 10).ok_or_else(|| {
        DecryptError::InvalidCiphertext(format!("element {} ({}) is not an integer", index, text))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Display for EncryptedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<Vec<RsaBigInt>> for EncryptedMessage {
    fn from(values: Vec<RsaBigInt>) -> Self {
        Self::new(values)
    }
}

impl From<Vec<u64>> for EncryptedMessage {
    fn from(values: Vec<u64>) -> Self {
        Self::new(values.into_iter().map(from_u64).collect())
    }
}

impl FromIterator<RsaBigInt> for EncryptedMessage {
    fn from_iter<I: IntoIterator<Item = RsaBigInt>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
