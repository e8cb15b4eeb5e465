use std::collections::HashMap;
use std::{
    fs::File,
    io::BufReader,
    path::{
        Path,
        PathBuf,
    },
};
use thiserror::Error;
use tracing_core::LevelFilter;

#[derive(Clone,Debug,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(rename_all="lowercase")]
pub enum BuiltinLogTarget
{
    Stdout,
    Stderr,
}

#[derive(Clone,Debug,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(untagged)]
pub enum LogTarget
{
    File { filename: PathBuf },
    Builtin(BuiltinLogTarget),
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(rename_all ="lowercase")]
pub enum LogLevel
{
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

/// One log destination, with its own level and module filter
#[derive(Clone,Debug,serde::Deserialize)]
pub struct LogEntry
{
    pub target: LogTarget,
    /// Module path prefixes to include; empty means everything
    #[serde(default)]
    pub modules: Vec<String>,
    pub level: Option<LogLevel>,
}

#[derive(Clone,Debug,serde::Deserialize)]
#[serde(rename_all="kebab-case")]
pub struct LoggingConfig
{
    /// Directory for file targets
    pub dir: PathBuf,
    pub default_level: Option<LogLevel>,
    #[serde(default)]
    pub module_levels: HashMap<String, LogLevel>,
    pub targets: Vec<LogEntry>,
}

impl Default for LoggingConfig
{
    fn default() -> Self
    {
        Self {
            dir: PathBuf::from("log"),
            default_level: Some(LogLevel::Info),
            module_levels: HashMap::new(),
            targets: vec![LogEntry {
                target: LogTarget::Builtin(BuiltinLogTarget::Stderr),
                modules: Vec::new(),
                level: None,
            }],
        }
    }
}

/// Settings for the bridge
#[derive(Clone,Debug,Default,serde::Deserialize)]
#[serde(rename_all="kebab-case")]
pub struct BridgeConfig
{
    /// Ask backend sessions for verbose protocol logging
    #[serde(default)]
    pub backend_debug: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug,Error)]
pub enum ConfigError
{
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggingConfig
{
    pub fn prefix_file(&self, filename: impl AsRef<Path>) -> PathBuf
    {
        self.dir.join(filename)
    }
}

pub fn load_config(filename: impl AsRef<Path>) -> Result<BridgeConfig, ConfigError>
{
    let file = File::open(filename)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

impl From<LogLevel> for LevelFilter
{
    fn from(arg: LogLevel) -> LevelFilter
    {
        match arg
        {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info  => LevelFilter::INFO,
            LogLevel::Warn  => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off   => LevelFilter::OFF,
        }
    }
}
