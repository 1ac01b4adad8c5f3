use crate::domain::model::Value;
use crate::mappers::strings::expect_str;
use anyhow::bail;
use std::net::IpAddr;

/// IPv4 or IPv6 address.
pub fn ip(value: &Value) -> anyhow::Result<Value> {
    let trimmed = expect_str(value)?.trim();
    if trimmed.parse::<IpAddr>().is_err() {
        bail!("{} is not a valid IP address", trimmed);
    }
    Ok(Value::String(trimmed.to_string()))
}

/// Address with a prefix length, e.g. `10.0.0.0/8` or `fd00::/64`.
pub fn cidr(value: &Value) -> anyhow::Result<Value> {
    let trimmed = expect_str(value)?.trim();
    if !is_cidr(trimmed) {
        bail!("{} is not a valid CIDR address", trimmed);
    }
    Ok(Value::String(trimmed.to_string()))
}

fn is_cidr(text: &str) -> bool {
    let Some((address, prefix)) = text.split_once('/') else {
        return false;
    };
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (Ok(address), Ok(prefix)) = (address.parse::<IpAddr>(), prefix.parse::<u8>()) else {
        return false;
    };
    let max = match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    prefix <= max
}
