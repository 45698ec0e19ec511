/// Logs an `Err` result without interrupting control flow.
///
/// The interactive loop must keep prompting after most failures, so callers
/// that cannot (or should not) propagate an error record it here instead.
macro_rules! log_if_err {
    ($result:expr, $($arg:tt)*) => {
        if let Err(ref err) = $result {
            log::error!("{}: {}", format_args!($($arg)*), err);
        }
    };
}
