//! User configuration options.

use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use dirs::config_dir;
use log::{info, warn};
use math::{DEFAULT_SCALE, ScaleMode};
use render_voxel::{ConvertOptions, DEFAULT_LIGHT_DIVISOR, DEFAULT_SKY_MARKER};
use serde::{Deserialize, Serialize};

use crate::{BASE_DIR, CLIOptions};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> io::Result<PathBuf> {
    let mut dir = config_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: Couldn't find the user config dir", LOG_TAG),
        )
    })?;
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir_all(&dir)?;
    }
    dir.push("config.toml");
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Blocks per map unit
    pub scale: f32,
    /// If set the level is fitted to this many blocks and `scale` is unused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<f32>,
    pub vertical_margin: u32,
    pub light_divisor: f32,
    pub sky_marker: String,
    pub seed: u64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            fit: None,
            vertical_margin: 0,
            light_divisor: DEFAULT_LIGHT_DIVISOR,
            sky_marker: DEFAULT_SKY_MARKER.to_owned(),
            seed: 42,
        }
    }
}

impl UserConfig {
    /// Read the user config, creating it with defaults if it doesn't exist or
    /// can't be parsed
    pub fn load() -> io::Result<Self> {
        Self::load_from(&get_cfg_file()?)
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let mut buf = String::new();
        if file.read_to_string(&mut buf)? != 0 {
            match toml::from_str(&buf) {
                Ok(data) => {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return Ok(data);
                }
                Err(e) => warn!("Could not deserialise {:?} recreating config: {}", path, e),
            }
        }
        UserConfig::create_default(path)
    }

    fn create_default(path: &Path) -> io::Result<Self> {
        let config = UserConfig::default();
        config.write_to(path)?;
        info!("Created default user config file {:?}", path);
        Ok(config)
    }

    pub fn write(&self) -> io::Result<()> {
        self.write_to(&get_cfg_file()?)
    }

    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let data = toml::to_string_pretty(self).map_err(io::Error::other)?;
        let mut file = File::create(path)?;
        file.write_all(data.as_bytes())
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if let Some(scale) = cli.scale {
            if scale != self.scale {
                self.scale = scale;
                info!("Scale changed to: {}", scale);
            }
        } else {
            cli.scale = Some(self.scale);
        }

        // zero clears a fit back to the fixed scale
        match cli.fit {
            Some(span) if span == 0.0 => self.fit = None,
            Some(span) => self.fit = Some(span),
            None => cli.fit = self.fit,
        }

        if let Some(margin) = cli.vertical_margin {
            self.vertical_margin = margin;
        } else {
            cli.vertical_margin = Some(self.vertical_margin);
        }

        if let Some(seed) = cli.seed {
            self.seed = seed;
        } else {
            cli.seed = Some(self.seed);
        }
    }

    pub fn convert_options(&self) -> ConvertOptions {
        let scale = match self.fit {
            Some(target_span) => ScaleMode::Fit { target_span },
            None => ScaleMode::Fixed(self.scale),
        };
        ConvertOptions {
            scale,
            vertical_margin: self.vertical_margin,
            light_divisor: self.light_divisor,
            sky_marker: self.sky_marker.clone(),
        }
    }
}
