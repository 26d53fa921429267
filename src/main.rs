use anyhow::Result;
use clap::Parser;
use pomodoro_icons::icon_gen;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "pomodoro-icons",
    about = "Draw the FocusFlow Pomodoro extension icons (16, 48 and 128 px)"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Skip writing the icons.json manifest fragment
    #[clap(long)]
    no_manifest: bool,
}

impl From<Args> for icon_gen::Args {
    fn from(args: Args) -> Self {
        Self {
            output: args.output,
            manifest: !args.no_manifest,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(err) = icon_gen::ensure_png_backend() {
        eprintln!("Error: {err}.");
        eprintln!("Please rebuild with the `png` feature enabled: cargo build --features png");
        std::process::exit(1);
    }

    icon_gen::generate_icons(args.into())
}
