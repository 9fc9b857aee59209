//! Operator-channel output: styled stderr/stdout plus the log file.
//! Failures of the alias source land here, never in the result list.

#[macro_export]
macro_rules! wdebug {
    ($config:expr, $fmt:expr) => {
        if $config.debug {
            println!($fmt);
            log::debug!($fmt);
        }
    };
    ($config:expr, $fmt:expr, $($arg:tt)*) => {
        if $config.debug {
            println!($fmt, $($arg)*);
            log::debug!($fmt, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! werror {
    ($fmt:expr) => {
        eprintln!("{}{}", style("Error: ").red(), format!($fmt));
        log::error!($fmt);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("{}{}", style("Error: ").red(), format!($fmt, $($arg)*));
        log::error!($fmt, $($arg)*);
    };
}

#[macro_export]
macro_rules! wwarning {
    ($fmt:expr) => {
        eprintln!("{}{}", style("Warning: ").yellow(), format!($fmt));
        log::warn!($fmt);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("{}{}", style("Warning: ").yellow(), format!($fmt, $($arg)*));
        log::warn!($fmt, $($arg)*);
    };
}

#[macro_export]
macro_rules! winfo {
    ($fmt:expr) => {
        println!($fmt);
        log::info!($fmt);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!($fmt, $($arg)*);
        log::info!($fmt, $($arg)*);
    };
}
