/// The flags control some attributes of the line. Only `Blocking` changes
/// how a level converts, the rest are kept so flags can be inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDefFlags {
    /// Players and monsters cannot cross this line. Note that
    /// if there is no sector on the other side, they can't go through the line
    /// anyway, regardless of the flags
    Blocking = 1,
    /// Monsters cannot cross this line
    BlockMonsters = 1 << 1,
    /// The linedef's two sidedefs can have "-" as a texture,
    /// which in this case means "transparent"
    TwoSided = 1 << 2,
    /// The upper texture is pasted onto the wall from
    /// the top down instead of from the bottom up like usual
    UnpegTop = 1 << 3,
    /// Lower and middle textures are drawn from the
    /// bottom up, instead of from the top down like usual
    UnpegBottom = 1 << 4,
    /// On the automap, this line appears in red like a normal
    /// solid wall that has nothing on the other side
    Secret = 1 << 5,
    /// Blocks sound traveling out of this sector through this line
    BlockSound = 1 << 6,
    /// Not on AutoMap
    DontDraw = 1 << 7,
    /// Already on AutoMap
    Draw = 1 << 8,
}

impl LineDefFlags {
    pub const fn is_set(self, flags: u32) -> bool {
        flags & self as u32 != 0
    }
}

#[test]
fn check_flags_enum() {
    let flag = 28; // upper and lower unpegged, twosided
    let compare = LineDefFlags::TwoSided as u16
        | LineDefFlags::UnpegTop as u16
        | LineDefFlags::UnpegBottom as u16;
    assert_eq!(compare, flag);
    assert!(LineDefFlags::Blocking.is_set(29));
    assert!(!LineDefFlags::Blocking.is_set(28));
    assert!(LineDefFlags::TwoSided.is_set(28));
    assert!(LineDefFlags::UnpegTop.is_set(28));
    assert!(LineDefFlags::UnpegBottom.is_set(28));
    assert!(!LineDefFlags::BlockMonsters.is_set(28));

    // secret, blocks sound and both automap bits
    let flags = 0x1e0;
    for set in [
        LineDefFlags::Secret,
        LineDefFlags::BlockSound,
        LineDefFlags::DontDraw,
        LineDefFlags::Draw,
    ] {
        assert!(set.is_set(flags), "{set:?}");
    }
    assert!(!LineDefFlags::Blocking.is_set(flags));
    assert!(!LineDefFlags::TwoSided.is_set(flags));
}
