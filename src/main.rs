mod color;
mod config;
mod system;
mod ui;

use std::env;
use std::io;
use std::path::PathBuf;

use config::Theme;
use system::RealHost;

const DEFAULT_THEME: &str = "config.json";

// `--theme <path>`; last occurrence wins, a trailing bare `--theme` is
// ignored.
fn theme_path(args: &[String]) -> PathBuf {
    let mut path = PathBuf::from(DEFAULT_THEME);
    for pair in args.windows(2) {
        if pair[0] == "--theme" {
            path = PathBuf::from(&pair[1]);
        }
    }
    path
}

fn main() {
    stderrlog::new()
        .module(module_path!())
        .verbosity(0)
        .init()
        .ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let theme = Theme::load(&theme_path(&args));
    let facts = system::collect(&RealHost);

    let stdout = io::stdout();
    // A broken pipe is not worth failing over; the report is best-effort.
    let _ = ui::render(&mut stdout.lock(), &theme, &facts);
}
