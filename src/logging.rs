use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::Config as LogConfig;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_FILE: &str = "/tmp/alf.log";

/// Route log records to a file so warnings stay on the operator channel
/// without polluting the result list. A launcher that cannot log is still
/// usable, so failures here only print a notice.
pub fn setup_logging() {
    // https://docs.rs/log4rs/1.0.0/log4rs/encode/pattern/index.html
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} :: {l} - {m}\n",
        )))
        .build(LOG_FILE);

    let logfile = match logfile {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Cannot open log file '{}': {}", LOG_FILE, e);
            return;
        }
    };

    let config = LogConfig::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(LevelFilter::Info));

    match config {
        Ok(c) => {
            if let Err(e) = log4rs::init_config(c) {
                eprintln!("Failed to initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid logging configuration: {}", e),
    }
}
