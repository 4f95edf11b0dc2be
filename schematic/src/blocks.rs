/// The block ids a converted level is built from. Every other id is left to
/// whatever reads the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BlockKind {
    Air = 0x00,
    Glass = 0x14,
    /// Coloured by the data byte, see `WOOL_COLOURS`
    Wool = 0x23,
    Torch = 0x32,
}

impl BlockKind {
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0x00 => Some(BlockKind::Air),
            0x14 => Some(BlockKind::Glass),
            0x23 => Some(BlockKind::Wool),
            0x32 => Some(BlockKind::Torch),
            _ => None,
        }
    }
}

/// Index of the black wool, never picked when matching colours
pub const BLACK_WOOL: u8 = 0xF;

/// The sixteen wool colours as sRGB, indexed by the wool data value.
pub const WOOL_COLOURS: [(&str, [u8; 3]); 16] = [
    ("white", [221, 221, 221]),
    ("orange", [219, 125, 62]),
    ("magenta", [179, 80, 188]),
    ("light blue", [107, 138, 201]),
    ("yellow", [177, 166, 39]),
    ("lime", [65, 174, 56]),
    ("pink", [208, 132, 153]),
    ("gray", [64, 64, 64]),
    ("light gray", [154, 161, 161]),
    ("cyan", [46, 110, 137]),
    ("purple", [126, 61, 181]),
    ("blue", [46, 56, 141]),
    ("brown", [79, 50, 31]),
    ("green", [53, 70, 27]),
    ("red", [150, 52, 48]),
    ("black", [25, 22, 22]),
];
