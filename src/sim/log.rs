use log::LevelFilter;

/// Maps the numeric `log_level` setting onto a `log` filter.
pub fn to_level_filter(ulevel: u64) -> LevelFilter {
    match ulevel {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs `env_logger`. `RUST_LOG` wins when it is set.
pub fn init(ulevel: u64) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(to_level_filter(ulevel));
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    // a second init (e.g. from tests) keeps the first logger
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(to_level_filter(0), LevelFilter::Warn);
        assert_eq!(to_level_filter(1), LevelFilter::Info);
        assert_eq!(to_level_filter(2), LevelFilter::Debug);
        assert_eq!(to_level_filter(9), LevelFilter::Trace);
    }
}
