use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Reads `name` from the environment and parses it, falling back to
/// `default` when the variable is unset or invalid.
pub fn parse_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    parse_value(name, env::var(name).ok(), default)
}

pub fn string_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_value<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Invalid value {:?} for {}, using {}", raw, name, default);
            default
        }
    }
}
