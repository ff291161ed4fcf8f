//! Process configuration.
//!
//! Every setting has a default, so a bare `shoplist` listens on port 3300 and
//! keeps its items in `./data.json`. Flags win over environment variables.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "shoplist", version, about = "JSON item list served over HTTP")]
pub struct Config {
    /// Interface to listen on
    #[arg(long, env = "SHOPLIST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to listen on
    #[arg(long, short, env = "SHOPLIST_PORT", default_value_t = 3300)]
    pub port: u16,

    /// File holding the item collection as a JSON array
    #[arg(long, env = "SHOPLIST_DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "shoplist",
            "--host", "127.0.0.1",
            "--port", "8080",
            "--data-file", "/tmp/items.json",
        ])
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("/tmp/items.json"));
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Config::try_parse_from(["shoplist", "--port", "http"]).is_err());
    }
}
