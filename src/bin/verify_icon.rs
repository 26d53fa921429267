use pomodoro_icons::icon_gen::{inspect_icon, ICONS};
use std::path::PathBuf;

fn main() {
    let mut paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        paths = ICONS.iter().map(|(_, name)| PathBuf::from(*name)).collect();
    }

    let mut failures = 0;
    for path in &paths {
        println!("Checking icon: {}", path.display());

        let report = match inspect_icon(path) {
            Ok(report) => report,
            Err(err) => {
                println!("  ⚠ {err:#}");
                failures += 1;
                continue;
            }
        };

        println!("  Image dimensions: {}x{}", report.width, report.height);
        println!("  Corners are background: {}", report.corners_background);
        println!("  Center is tomato red: {}", report.center_tomato);
        println!("  Stem pixels: {}", report.stem_pixels);

        if report.is_valid() {
            println!("✓ Icon looks right");
        } else {
            println!("⚠ Icon does not match the expected drawing");
            failures += 1;
        }
    }

    if failures > 0 {
        println!("\n{failures} of {} icons failed verification", paths.len());
        std::process::exit(1);
    }
}
