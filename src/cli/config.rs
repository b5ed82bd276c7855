use std::fs;
use std::path::PathBuf;

use super::session::Session;

pub const DEFAULT_SERVER: &str = "http://localhost:5268";

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("WALKS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("walks")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn session_file() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}

pub fn load_session() -> anyhow::Result<Option<Session>> {
    let file = session_file()?;
    if !file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(file)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn save_session(session: &Session) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(session)?;
    fs::write(session_file()?, content)?;
    Ok(())
}

pub fn clear_session() -> anyhow::Result<()> {
    let file = session_file()?;
    if file.exists() {
        fs::remove_file(file)?;
    }
    Ok(())
}

/// Server to talk to: explicit flag or env, then the session's server, then the default.
pub fn resolve_server(explicit: Option<&str>, session: Option<&Session>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| session.map(|s| s.server.clone()))
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
        .trim_end_matches('/')
        .to_string()
}
