//! Tests for the stderr logger and verbosity selection

#[cfg(test)]
mod tests {
    use grain::io::logger::{format_line, init, level_filter};
    use log::{Level, LevelFilter};

    // Tests flag combinations map to the expected level
    // Verified by checking debug before quiet
    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(false, false), LevelFilter::Info);
        assert_eq!(level_filter(false, true), LevelFilter::Debug);
        assert_eq!(level_filter(true, false), LevelFilter::Warn);
        assert_eq!(level_filter(true, true), LevelFilter::Warn);
    }

    // Tests line layout with padded level
    // Verified by removing the level padding
    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(Level::Info, "grain::io::cli", "done"),
            "[ INFO] grain::io::cli: done"
        );
        assert_eq!(
            format_line(Level::Debug, "grain", "layer 1"),
            "[DEBUG] grain: layer 1"
        );
    }

    // Tests repeated initialization only updates the level
    // Verified by propagating the set_logger error
    #[test]
    fn test_init_twice() {
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);

        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(log::log_enabled!(Level::Warn));
        assert!(!log::log_enabled!(Level::Info));
    }
}
