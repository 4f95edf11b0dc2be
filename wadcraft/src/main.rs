//! Command line front end: load a dumped level, convert it and report what
//! was built.

mod cli;
mod config;

use std::error::Error;
use std::fs;

use cli::*;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use render_voxel::convert_source;
use schematic::BlockKind;
use simplelog::TermLogger;
use wad::LevelTables;

use crate::config::UserConfig;

const BASE_DIR: &str = "wadcraft/";

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load()?;
    user_config.sync_cli(&mut options);
    user_config.write()?;

    info!("Reading level from {}", options.level);
    let data = fs::read_to_string(&options.level)?;
    let mut tables: LevelTables = toml::from_str(&data)?;
    tables.normalise();

    let name = options.name.clone().unwrap_or_else(|| tables.name.clone());
    let convert = user_config.convert_options();
    debug!("{}: {:?}", name, convert);

    let mut rng = StdRng::seed_from_u64(user_config.seed);
    let schematic = convert_source(&name, &tables, &convert, &mut rng)?;

    let size = schematic.size();
    info!("{}: Schematic is {}x{}x{}", name, size.x, size.y, size.z);
    if let Some(centre) = schematic.centre() {
        info!("{}: Centre at {}", name, centre);
    }
    let counts = schematic.block_counts();
    for kind in [BlockKind::Air, BlockKind::Wool, BlockKind::Glass, BlockKind::Torch] {
        info!("{}: {:?} x{}", name, kind, counts[kind.id() as usize]);
    }
    Ok(())
}
