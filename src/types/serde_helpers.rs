//! Custom serde helpers for CoinAPI's serialization quirks.

use std::fmt;

use serde::{Deserialize, Deserializer, Serializer, de};

/// Serialize/deserialize a `bool` that CoinAPI encodes as `0` or `1`.
///
/// JSON booleans are accepted too.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use coinapi_rest::types::serde_helpers::int_bool;
///
/// #[derive(Serialize, Deserialize, Debug)]
/// struct Asset {
///     #[serde(with = "int_bool")]
///     type_is_crypto: bool,
/// }
///
/// let asset: Asset = serde_json::from_str(r#"{"type_is_crypto":1}"#).unwrap();
/// assert!(asset.type_is_crypto);
/// assert_eq!(serde_json::to_string(&asset).unwrap(), r#"{"type_is_crypto":1}"#);
/// ```
pub mod int_bool {
    use super::*;

    /// Serialize as `0` or `1`.
    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    /// Deserialize from `0`/`1` or a JSON boolean.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IntBoolVisitor;

        impl<'de> de::Visitor<'de> for IntBoolVisitor {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("0, 1 or a boolean")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match v {
                    0 => Ok(false),
                    1 => Ok(true),
                    other => Err(de::Error::custom(format!("expected 0 or 1, got {}", other))),
                }
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match u64::try_from(v) {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(de::Error::custom(format!("expected 0 or 1, got {}", v))),
                }
            }

            // Exact JSON numbers arrive as a single-entry map.
            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let Some((_, number)) = map.next_entry::<String, String>()? else {
                    return Err(de::Error::custom("expected 0 or 1, got an empty map"));
                };
                match number.trim().parse::<u64>() {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(de::Error::custom(format!("expected 0 or 1, got {}", number))),
                }
            }
        }

        deserializer.deserialize_any(IntBoolVisitor)
    }
}

/// Deserialize `null` into the type's default value.
///
/// CoinAPI sends `null` for empty order book sides.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use coinapi_rest::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize, Debug)]
/// struct Book {
///     #[serde(deserialize_with = "null_as_default::deserialize", default)]
///     asks: Vec<u32>,
/// }
///
/// let book: Book = serde_json::from_str(r#"{"asks":null}"#).unwrap();
/// assert!(book.asks.is_empty());
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, mapping `null` to `T::default()`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
