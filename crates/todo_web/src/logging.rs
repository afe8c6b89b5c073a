use std::io::Write;

/// Installs the process logger.
///
/// The default filter is `info`, or `debug` when `debug` is set. `RUST_LOG`
/// from the environment overrides it, and an explicit `log_level` overrides
/// both.
pub fn init_logging(debug: bool, log_level: Option<&str>) {
    let filter = if debug { "debug" } else { "info" };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter));
    if let Some(level) = log_level {
        builder.parse_filters(level);
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}
