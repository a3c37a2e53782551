//! Runtime configuration read from the environment

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
    pub cache_capacity: usize,
    /// Build the search index at startup instead of on the first query.
    pub warm_index: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            addr: DEFAULT_ADDR,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            warm_index: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_dir = lookup("QURAN_SEARCH_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir);
        let addr = lookup("QURAN_SEARCH_ADDR").and_then(|s| s.parse().ok()).unwrap_or(defaults.addr);
        let cache_capacity = lookup("QURAN_SEARCH_CACHE_CAPACITY").and_then(|s| s.parse().ok()).unwrap_or(defaults.cache_capacity);
        let warm_index = lookup("QURAN_SEARCH_WARM_INDEX").and_then(|s| parse_flag(&s)).unwrap_or(defaults.warm_index);

        Self { data_dir, addr, cache_capacity, warm_index }
    }
}
