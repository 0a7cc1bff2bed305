use clap::{Parser, ValueEnum};
use koa::core::config::{self, CliOverrides};
use koa::core::prefs::Theme;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

/// `--theme` values; kept here so the core stays free of CLI types.
#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Parser)]
#[command(name = "koa", about = "Terminal chat client for Koa")]
struct Args {
    /// Chat backend base URL (requests go to {base_url}/chat)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Theme for this session (the saved preference is used otherwise)
    #[arg(short, long, value_enum)]
    theme: Option<ThemeArg>,

    /// Speech-to-text program used for voice input
    #[arg(long)]
    voice_command: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to koa.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("koa.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        config::KoaConfig::default()
    });
    let overrides = CliOverrides {
        base_url: args.base_url,
        voice_command: args.voice_command,
        theme: args.theme.map(Theme::from),
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!("Koa starting up against {}", resolved.base_url);

    koa::tui::run(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_flag_maps_to_core_theme() {
        let args = Args::try_parse_from(["koa", "--theme", "light"]).unwrap();
        assert_eq!(args.theme.map(Theme::from), Some(Theme::Light));

        let args = Args::try_parse_from(["koa"]).unwrap();
        assert!(args.theme.is_none());
    }
}
