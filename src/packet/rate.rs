//! 链路数据速率。
//! Link data rates.

use crate::error::Error;
use std::{fmt, str::FromStr};

/// A data rate in bits per second.
///
/// Parses from strings such as `"1.5Mbps"`, `"100kb/s"` or `"10MB/s"`.
/// A lowercase `b` counts bits and an uppercase `B` counts bytes.
///
/// 以比特每秒表示的数据速率。
/// 可以从 `"1.5Mbps"`、`"100kb/s"` 或 `"10MB/s"` 等字符串解析。
/// 小写 `b` 表示比特，大写 `B` 表示字节。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DataRate(u64);

impl DataRate {
    pub const fn from_bps(bps: u64) -> Self {
        Self(bps)
    }

    /// The rate in bits per second.
    /// 以比特每秒为单位的速率。
    pub const fn bps(&self) -> u64 {
        self.0
    }
}

impl FromStr for DataRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);

        let value: f64 = number
            .parse()
            .map_err(|_| Error::InvalidDataRate(s.to_string()))?;

        let multiplier = match unit.trim() {
            "bps" | "b/s" => 1.0,
            "Bps" | "B/s" => 8.0,
            "kbps" | "Kbps" | "kb/s" | "Kb/s" => 1e3,
            "KBps" | "kBps" | "KB/s" | "kB/s" => 8e3,
            "Mbps" | "Mb/s" => 1e6,
            "MBps" | "MB/s" => 8e6,
            "Gbps" | "Gb/s" => 1e9,
            "GBps" | "GB/s" => 8e9,
            _ => return Err(Error::InvalidDataRate(s.to_string())),
        };

        let bps = value * multiplier;
        if !bps.is_finite() || bps < 0.0 {
            return Err(Error::InvalidDataRate(s.to_string()));
        }
        Ok(Self(bps.round() as u64))
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}
