use env_logger::WriteStyle;
use log::LevelFilter;

/// Map `-v` / `-q` to a level filter.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Level for records from other crates (eframe, winit, ...): they stay at
/// warn or quieter unless tracing everything.
pub fn dependency_level(level: LevelFilter) -> LevelFilter {
    if level == LevelFilter::Trace {
        LevelFilter::Trace
    } else {
        level.min(LevelFilter::Warn)
    }
}

/// Install the stderr logger. `RUST_LOG`, when set, overrides the flags.
pub fn init(verbose: u8, quiet: bool, color: bool) {
    let level = level_for(verbose, quiet);
    let _ = env_logger::Builder::new()
        .filter_level(dependency_level(level))
        .filter_module("majorflow", level)
        .format_timestamp(None)
        .format_target(false)
        .write_style(if color {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        })
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(2, true), LevelFilter::Error);
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(3, false), LevelFilter::Trace);
    }

    #[test]
    fn dependencies_stay_quiet_below_trace() {
        assert_eq!(dependency_level(LevelFilter::Debug), LevelFilter::Warn);
        assert_eq!(dependency_level(LevelFilter::Error), LevelFilter::Error);
        assert_eq!(dependency_level(LevelFilter::Trace), LevelFilter::Trace);
    }
}
