#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
    pub verbose: bool,
}

impl OutputOptions {
    /// Resolve output options from CLI flags, falling back to configured
    /// defaults. `-j/--json` wins over `--format`, which wins over config.
    pub fn resolve(
        format_flag: Option<&str>,
        json: bool,
        pretty: bool,
        no_color: bool,
        verbose: bool,
        config_format: &str,
    ) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            match format_flag.unwrap_or(config_format) {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Text,
            }
        };
        Self {
            format,
            pretty,
            use_color: detect_color(!no_color),
            verbose,
        }
    }
}

/// Print a serializable payload as JSON, honoring `--pretty`.
pub fn print_json<T: serde::Serialize>(value: &T, opts: &OutputOptions) -> anyhow::Result<()> {
    let text = if opts.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

pub fn detect_color(color_flag: bool) -> bool {
    if !color_flag {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty_stdout()
}

fn atty_stdout() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins_over_format_flag() {
        let opts = OutputOptions::resolve(Some("text"), true, false, true, false, "text");
        assert_eq!(opts.format, OutputFormat::Json);
    }

    #[test]
    fn format_flag_wins_over_config() {
        let opts = OutputOptions::resolve(Some("json"), false, false, true, false, "text");
        assert_eq!(opts.format, OutputFormat::Json);
    }

    #[test]
    fn config_default_applies_when_no_flags() {
        let opts = OutputOptions::resolve(None, false, false, true, false, "json");
        assert_eq!(opts.format, OutputFormat::Json);
        let opts = OutputOptions::resolve(None, false, false, true, false, "text");
        assert_eq!(opts.format, OutputFormat::Text);
    }
}
