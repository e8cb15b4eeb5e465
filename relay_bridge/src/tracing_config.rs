//! Logging setup for processes embedding the bridge.
//!
//! The bridge itself only emits `tracing` events; an embedding server calls
//! [`init_logging`] with the `logging` section of its
//! [`BridgeConfig`](crate::config::BridgeConfig) to route them.

use crate::config::*;
use tracing_subscriber::{
    prelude::*,
    filter::filter_fn,
    fmt::writer::BoxMakeWriter,
    Layer,
    registry::LookupSpan,
};
use tracing_core::LevelFilter;
use tracing::Subscriber;

use std::{
    io::Error as IoError,
    path::Path,
};

/// The writer for a target, and whether it may use terminal colours
fn make_writer(target: &LogTarget, dir: &Path) -> (BoxMakeWriter, bool)
{
    match target
    {
        LogTarget::File { filename } => (BoxMakeWriter::new(tracing_appender::rolling::daily(dir, filename)), false),
        LogTarget::Builtin(BuiltinLogTarget::Stdout) => (BoxMakeWriter::new(std::io::stdout), true),
        LogTarget::Builtin(BuiltinLogTarget::Stderr) => (BoxMakeWriter::new(std::io::stderr), true),
    }
}

/// Whether an event from `module` should reach a target listening to `modules`
fn accepts_module(modules: &[String], module: Option<&str>) -> bool
{
    match module
    {
        Some(module) if !modules.is_empty() => modules.iter().any(|m| module.starts_with(m.as_str())),
        _ => true,
    }
}

fn build_target<S>(entry: LogEntry, dir: &Path) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where S: Subscriber + Send + Sync,
          for<'span> S: LookupSpan<'span>,
{
    let (writer, ansi) = make_writer(&entry.target, dir);
    let level = entry.level.map_or(LevelFilter::TRACE, LevelFilter::from);
    let modules = entry.modules;

    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_filter(filter_fn(move |metadata| *metadata.level() <= level && accepts_module(&modules, metadata.module_path())))
        .boxed()
}

/// Build a subscriber writing to every target in `conf`.
///
/// The global filter only excludes overly verbose modules; its default is
/// permissive so that each target can apply its own level.
pub fn build_subscriber(conf: LoggingConfig) -> impl Subscriber + Send + Sync
{
    let layers: Vec<_> = conf.targets
                             .into_iter()
                             .map(|target| build_target(target, &conf.dir))
                             .collect();

    let filter = tracing_subscriber::filter::Targets::new()
                    .with_default(conf.default_level.unwrap_or(LogLevel::Trace))
                    .with_targets(conf.module_levels);

    tracing_subscriber::registry()
            .with(filter)
            .with(layers)
}

/// Install the subscriber described by `conf` as the global default
pub fn init_logging(conf: LoggingConfig) -> Result<(), IoError>
{
    std::fs::create_dir_all(&conf.dir)?;
    tracing::subscriber::set_global_default(build_subscriber(conf))
        .map_err(|e| IoError::new(std::io::ErrorKind::Other, e))
}
