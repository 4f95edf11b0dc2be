use std::error::Error;
use std::fmt;

/// A level whose records do not describe a consistent map. Each variant names
/// the entity that broke the rule, by its index in the raw tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    NoVertexes,
    NoSectors,
    MissingVertex { id: u32 },
    MissingSector { sidedef: usize, sector: usize },
    MissingSideDef { linedef: usize, sidedef: usize },
    MissingLineDef { segment: usize, linedef: usize },
    /// The seg is on a side of its linedef that has no sidedef
    MissingSegmentSide { segment: usize, side: u16 },
    MissingPartnerSegment { segment: usize, partner: usize },
    MissingSegment { subsector: usize, segment: usize },
    /// A segment does not start where the previous one ended
    BrokenSegmentChain { subsector: usize, segment: usize },
    /// The last segment does not end where the first started
    OpenSegmentChain { subsector: usize },
    SubSectorWithoutSector { subsector: usize },
    /// Two segments of the one subsector face different sectors
    SubSectorSectorMismatch { subsector: usize, segment: usize },
}

impl Error for LevelError {}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::NoVertexes => write!(f, "level has no vertexes"),
            LevelError::NoSectors => write!(f, "level has no sectors"),
            LevelError::MissingVertex { id } => write!(f, "vertex {:#010x} does not exist", id),
            LevelError::MissingSector { sidedef, sector } => {
                write!(f, "sidedef {} references missing sector {}", sidedef, sector)
            }
            LevelError::MissingSideDef { linedef, sidedef } => {
                write!(f, "linedef {} references missing sidedef {}", linedef, sidedef)
            }
            LevelError::MissingLineDef { segment, linedef } => {
                write!(f, "segment {} references missing linedef {}", segment, linedef)
            }
            LevelError::MissingSegmentSide { segment, side } => {
                write!(f, "segment {} is on side {} which has no sidedef", segment, side)
            }
            LevelError::MissingPartnerSegment { segment, partner } => {
                write!(f, "segment {} references missing partner {}", segment, partner)
            }
            LevelError::MissingSegment { subsector, segment } => {
                write!(f, "subsector {} references missing segment {}", subsector, segment)
            }
            LevelError::BrokenSegmentChain { subsector, segment } => write!(
                f,
                "subsector {}: segment {} does not start at the end of the previous segment",
                subsector, segment
            ),
            LevelError::OpenSegmentChain { subsector } => {
                write!(f, "subsector {}: segments do not form a closed polygon", subsector)
            }
            LevelError::SubSectorWithoutSector { subsector } => {
                write!(f, "subsector {} has no segment bound to a sector", subsector)
            }
            LevelError::SubSectorSectorMismatch { subsector, segment } => write!(
                f,
                "subsector {}: segment {} faces a different sector",
                subsector, segment
            ),
        }
    }
}
