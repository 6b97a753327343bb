/// Optional deviations from original Chip-8 behavior that some ROMs rely on.
///
/// Every flag defaults to off; each one is read at dispatch time by the
/// interpreter so a single build can run ROMs from either lineage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quirks {
    /// 8XY6/8XYE load VY into VX before shifting.
    pub shift: bool,
    /// BNNN jumps to XNN + VX instead of NNN + V0.
    pub jump: bool,
    /// FX55/FX65 advance the index register once per register copied.
    pub index_increment: bool,
}
