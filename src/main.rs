use std::process;

use anyhow::{bail, Result};

use term_tanks::{config::GameConfig, game::Game, map::TileMap};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const USAGE: &str = "term-tanks [map.txt]    (default: map1.txt)";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let map_path = match args.next() {
        None => "map1.txt".to_string(),
        Some(arg) if arg == "-h" || arg == "--help" => bail!(
            "term-tanks: drive a tank around a text-file tile map\n\nUsage:\n  {USAGE}"
        ),
        Some(path) => path,
    };
    if args.next().is_some() {
        bail!("Usage:\n  {USAGE}");
    }

    // Map problems are fatal here, before the terminal is touched.
    let map = TileMap::load(&map_path)?;
    let config = GameConfig::load();

    let mut game = Game::new(&map, config);
    game.run()
}
