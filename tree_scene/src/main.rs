//! tree_scene: interactive entry point.

use clap::Parser;
use env_logger::Env;
use tree_scene::config::GestureInput;
use tree_scene::{run, AppConfig, Cli};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = AppConfig::from(Cli::parse());

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Merry Christmas · Gesture-Controlled Tree         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    match &cfg.gesture {
        GestureInput::Simulated    => println!("  Hand: keyboard simulation  (O open, F fist, 3, H hide, arrows move)"),
        GestureInput::Replay(path) => println!("  Hand: replaying {}", path.display()),
        GestureInput::Disabled     => println!("  Hand: disabled  (Space toggles)"),
    }
    match &cfg.photos_dir {
        Some(dir) => println!("  Photos: {}", dir.display()),
        None      => println!("  Photos: none  (use --photos <DIR>)"),
    }
    println!();
    println!("  Opening scene window…");
    println!();

    if let Err(e) = run(cfg) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
