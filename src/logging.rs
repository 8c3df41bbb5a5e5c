//! Logger setup for the terminal front end.

/// Initialize env_logger with defaults that behave in raw terminal mode.
/// INFO level by default; the `RUST_LOG` environment variable overrides it.
/// Each line is prefixed with `\r` so output stays left-aligned while the
/// terminal is in raw mode.
pub fn init() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "\r[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}
