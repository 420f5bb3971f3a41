use std::path::PathBuf;

use clap::Parser;

use crate::config::BasicConfig;

/// Window + renderer demo drawing its own frame rate.
#[derive(Debug, Parser)]
#[command(name = "lumen-basic")]
#[command(about = "Paced render loop with an on-screen FPS counter")]
pub struct Cli {
    /// Run borderless full-screen on the current monitor.
    #[arg(short, long)]
    pub fullscreen: bool,

    /// TrueType/OpenType font for the FPS label.
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// PNG tilesheet for the background.
    #[arg(long, value_name = "PATH", conflicts_with = "no_tilesheet")]
    pub tilesheet: Option<PathBuf>,

    /// Draw the clear color only.
    #[arg(long)]
    pub no_tilesheet: bool,
}

impl Cli {
    /// Applies the flags on top of `config`.
    pub fn apply(self, mut config: BasicConfig) -> BasicConfig {
        config.fullscreen = self.fullscreen;
        if let Some(font) = self.font {
            config.font_path = font;
        }
        if self.no_tilesheet {
            config.tilesheet = None;
        } else if let Some(path) = self.tilesheet {
            config.tilesheet.get_or_insert_with(Default::default).path = path;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> BasicConfig {
        let cli = Cli::try_parse_from(std::iter::once("lumen-basic").chain(args.iter().copied())).unwrap();
        cli.apply(BasicConfig::default())
    }

    #[test]
    fn windowed_by_default() {
        let cli = Cli::try_parse_from(["lumen-basic"]).unwrap();
        assert!(!cli.fullscreen);
    }

    #[test]
    fn fullscreen_flag() {
        assert!(Cli::try_parse_from(["lumen-basic", "--fullscreen"]).unwrap().fullscreen);
        assert!(Cli::try_parse_from(["lumen-basic", "-f"]).unwrap().fullscreen);
        assert!(parse(&["-f"]).fullscreen);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["lumen-basic", "extra"]).is_err());
    }

    #[test]
    fn no_flags_keep_the_default_assets() {
        let cfg = parse(&[]);
        let defaults = BasicConfig::default();
        assert_eq!(cfg.font_path, defaults.font_path);
        assert!(cfg.tilesheet.is_some());
    }

    #[test]
    fn asset_paths_can_be_overridden() {
        let cfg = parse(&["--font", "/tmp/Other.ttf", "--tilesheet", "/tmp/sheet.png"]);
        assert_eq!(cfg.font_path, PathBuf::from("/tmp/Other.ttf"));
        let sheet = cfg.tilesheet.unwrap();
        assert_eq!(sheet.path, PathBuf::from("/tmp/sheet.png"));
        assert_eq!(sheet.tile_size, 32);
    }

    #[test]
    fn tilesheet_can_be_turned_off() {
        assert!(parse(&["--no-tilesheet"]).tilesheet.is_none());
        assert!(Cli::try_parse_from(["lumen-basic", "--no-tilesheet", "--tilesheet", "x.png"]).is_err());
    }
}
