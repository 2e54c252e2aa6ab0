use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::io::stdout;
use std::path::Path;

use tracing::dispatcher::Dispatch;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::Layer as TraceLayer;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::{self, Layer as LayerIntf, Registry};

use crate::config::{AppBasepathCfg, AppLogHandlerCfg, AppLoggerCfg, AppLoggingCfg};
use crate::constant::logging::{Destination as DstOption, Level as AppLogLevelInner};
use crate::AppLogAlias;

pub type AppLogLevel = AppLogLevelInner;
type DefaultHandler = (NonBlocking, tracing::Level, WorkerGuard);
type AppLogger = Dispatch;

pub struct AppLogContext {
    _io_guards: Vec<WorkerGuard>,
    loggers: HashMap<AppLogAlias, AppLogger, RandomState>,
}

#[macro_export]
macro_rules! to_3rdparty_level {
    ($lvlin:expr) => {
        match $lvlin {
            $crate::logging::AppLogLevel::FATAL | $crate::logging::AppLogLevel::ERROR => {
                tracing::Level::ERROR
            }
            $crate::logging::AppLogLevel::WARNING => tracing::Level::WARN,
            $crate::logging::AppLogLevel::INFO => tracing::Level::INFO,
            $crate::logging::AppLogLevel::DEBUG => tracing::Level::DEBUG,
            $crate::logging::AppLogLevel::TRACE => tracing::Level::TRACE,
        } // in `tracing` ecosystem, level comparison is like
          // TRACE > DEBUG > INFO > WARN > ERROR
    };
}

fn _gen_localfile_writer(basepath: &str, rpath: &str) -> (NonBlocking, WorkerGuard) {
    let mut fullpath = basepath.to_string();
    if !basepath.ends_with('/') && !rpath.starts_with('/') {
        fullpath += "/";
    }
    fullpath += rpath;
    let p = Path::new(&fullpath);
    let dir = p.parent().unwrap_or(Path::new(basepath));
    let fname_prefix = p
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "shipping.log".into());
    let wr_dst = RollingFileAppender::new(Rotation::NEVER, dir, fname_prefix);
    tracing_appender::non_blocking(wr_dst)
}

fn _gen_console_writer() -> (NonBlocking, WorkerGuard) {
    tracing_appender::non_blocking(stdout())
} // Note tracing spawns new thread dedicating to each non-blocking writer

fn _init_handler(basepath: &AppBasepathCfg, cfg: &AppLogHandlerCfg) -> DefaultHandler {
    let lvl = to_3rdparty_level!(&cfg.min_level);
    // configuration validation guarantees file-type handler comes with path
    let (io_wr, guard) = match (&cfg.destination, cfg.path.as_ref()) {
        (DstOption::LOCALFS, Some(rpath)) => _gen_localfile_writer(&basepath.system, rpath),
        _others => _gen_console_writer(),
    }; // callers MUST always keep the guard along with writer, for successfully flushing
       // log messages to I/O
    (io_wr, lvl, guard)
}

fn _init_logger(cfg: &AppLoggerCfg, hdlrs: &HashMap<AppLogAlias, DefaultHandler>) -> AppLogger {
    let layers = cfg
        .handlers
        .iter()
        .filter_map(|alias| {
            hdlrs.get(alias).map(|(wr_ptr, default_lvl, _guard)| {
                let lvl = if let Some(l) = cfg.level.as_ref() {
                    to_3rdparty_level!(l)
                } else {
                    *default_lvl
                };
                TraceLayer::new()
                    .with_writer(wr_ptr.clone())
                    .with_file(false) // to prevent full path exposed
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_filter(LevelFilter::from_level(lvl))
            })
        })
        .collect::<Vec<_>>();
    let subscriber = Registry::default().with(layers);
    Dispatch::new(subscriber)
}

impl AppLogContext {
    pub fn new(basepath: &AppBasepathCfg, cfg: &AppLoggingCfg) -> Self {
        let hdlrs: HashMap<AppLogAlias, DefaultHandler> = cfg
            .handlers
            .iter()
            .map(|item| (item.alias.clone(), _init_handler(basepath, item)))
            .collect();
        let loggers = cfg
            .loggers
            .iter()
            .map(|item| (item.alias.clone(), _init_logger(item, &hdlrs)))
            .collect::<HashMap<AppLogAlias, Dispatch, RandomState>>();
        Self {
            loggers,
            _io_guards: hdlrs.into_values().map(|(_, _, g)| g).collect(),
        } // keep guards of the IO writers during the lifetime
    }

    pub fn get_assigner(&self, key: &str) -> Option<&Dispatch> {
        self.loggers.get(&key.to_string())
    }
} // end of impl AppLogContext

#[macro_export]
macro_rules! app_log_event {
    ( $ctx:ident, $lvl:expr, $($arg:tt)+ ) => {{
        const MOD_PATH:&str = module_path!();
        if let Some(assigner) = $ctx.get_assigner(MOD_PATH) {
            const LVL_INNER: tracing::Level = $crate::logging::to_3rdparty_level!($lvl);
            tracing::dispatcher::with_default(assigner, || {
                tracing::event!(LVL_INNER, $($arg)+);
            });
        } else {
            println!("[WARN] log dispatcher not found at the module path: {}", MOD_PATH);
            println!($($arg)+);
        }
    }};
}

pub use app_log_event;
pub use to_3rdparty_level;
