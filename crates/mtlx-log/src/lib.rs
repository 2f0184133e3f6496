// Re-export logging macros for convenience.
pub use log::*;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

/// Initializes logging for importer binaries. Should be called before any other logging
/// functions. Logs below the provided level are discarded. Library crates never call
/// this; they only use the re-exported macros.
pub fn init(filter: LevelFilter) {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();

    // One log file per import session, named after the start time.
    let now = chrono::Utc::now();
    let log_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d} {l} {m}{n}")))
        .build(format!("./logs/import-{}.txt", now.format("%Y%m%d-%H%M%S")))
        .expect("unable to initialize logging to file");

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("log_file", Box::new(log_file)))
        .build(
            Root::builder()
                .appender("log_file")
                .appender("stdout")
                .build(filter),
        )
        .expect("unable to create logging configuration");

    log4rs::init_config(config).expect("unable to initialize logging");

    log_panics::init();
}
