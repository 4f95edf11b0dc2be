use argh::FromArgs;

/// Convert a Doom level to a block schematic
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to the level tables, dumped as TOML
    #[argh(option)]
    pub level: String,
    /// map name used in the log, defaults to the name in the dump
    #[argh(option)]
    pub name: Option<String>,
    /// blocks per map unit, 0.041667 is one block for 24 units
    #[argh(option)]
    pub scale: Option<f32>,
    /// fit the level in to this many blocks on the longest axis instead of
    /// using a fixed scale, 0 to go back to the fixed scale
    #[argh(option)]
    pub fit: Option<f32>,
    /// blocks of air kept under the lowest floor
    #[argh(option)]
    pub vertical_margin: Option<u32>,
    /// seed for the light placement
    #[argh(option)]
    pub seed: Option<u64>,
}
