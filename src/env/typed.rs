//! Deserializing a [`ParsedEnvironment`] into a typed configuration struct.

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use super::environment::ParsedEnvironment;
use crate::error::Error;

/// Separator between nesting levels in a key (`DB__HOST` -> `db.host`).
pub const NESTING_SEPARATOR: &str = "__";

impl ParsedEnvironment {
    /// Deserializes the entries into `T`.
    ///
    /// Keys are lower-cased and split on [`NESTING_SEPARATOR`] into a table
    /// path. Each value becomes a boolean, integer or float when its text is
    /// unambiguously one, and a string otherwise; zero-padded numbers such as
    /// an ID written `007` are kept as strings.
    ///
    /// ## Example
    ///
    /// ```
    /// use rootenv::ParsedEnvironment;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct AppConfig {
    ///     root_path: String,
    ///     db: Database,
    /// }
    ///
    /// #[derive(Deserialize)]
    /// struct Database {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let env: ParsedEnvironment = [
    ///     ("DB__HOST", "localhost"),
    ///     ("DB__PORT", "5432"),
    ///     ("ROOT_PATH", "/srv/app"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let config: AppConfig = env.deserialize()?;
    /// assert_eq!(config.db.port, 5432);
    /// assert_eq!(config.root_path, "/srv/app");
    /// # Ok::<(), rootenv::Error>(())
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let mut table = Table::new();

        for (key, value) in self.iter() {
            let path: Vec<String> = key
                .split(NESTING_SEPARATOR)
                .map(str::to_lowercase)
                .collect();
            if path.iter().any(String::is_empty) {
                continue;
            }
            merge_at_path(&mut table, &path, infer_value(value));
        }

        Value::Table(table).try_into().map_err(Error::Deserialize)
    }
}

fn merge_at_path(table: &mut Table, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        table.insert(first.clone(), value);
        return;
    }

    if !matches!(table.get(first), Some(Value::Table(_))) {
        table.insert(first.clone(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(first) {
        merge_at_path(nested, rest, value);
    }
}

/// Infers a TOML value from `.env` text.
///
/// Quotes are already gone by the time a value gets here, so the text alone
/// decides. Only lowercase `true`/`false`, integers without zero padding and
/// plain `digits.digits` decimals convert; `TRUE`, `007`, `1e3` and `inf`
/// stay strings.
fn infer_value(text: &str) -> Value {
    if let Ok(flag) = text.parse::<bool>() {
        return Value::Boolean(flag);
    }

    if is_unpadded_integer(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Value::Integer(n);
        }
    }

    if is_plain_decimal(text) {
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(text.to_owned())
}

fn is_unpadded_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text).as_bytes();
    match digits {
        [] => false,
        [b'0', _, ..] => false,
        _ => digits.iter().all(u8::is_ascii_digit),
    }
}

fn is_plain_decimal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let Some((whole, fraction)) = body.split_once('.') else {
        return false;
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && all_digits(fraction)
}
