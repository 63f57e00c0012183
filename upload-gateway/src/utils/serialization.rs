//! Serde helpers for request bodies produced by loosely typed clients

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Accept a part number sent either as a JSON integer or as a numeric string.
pub fn part_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => i32::try_from(value)
            .map_err(|_| de::Error::custom(format!("part number {} is out of range", value))),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<i32>()
            .map_err(|_| de::Error::custom(format!("part number '{}' is not an integer", text))),
    }
}
