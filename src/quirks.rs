/// Where 8XY6 and 8XYE read the value they shift from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftSource {
    /// Vx = Vy >> 1 (COSMAC VIP)
    #[default]
    Vy,
    /// Vx = Vx >> 1, Vy is ignored (CHIP-48 / SUPER-CHIP)
    Vx,
}

/// What DXYN does with pixels that fall off the edge of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteEdges {
    /// Pixels wrap around to the opposite edge
    #[default]
    Wrap,
    /// The starting position wraps, pixels past the edge are dropped
    Clip,
}

/// # Quirks
/// Historical interpreters disagree on a handful of instructions.
/// The defaults reproduce the behaviour most ROMs written for the original
/// interpreter expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    pub shift_source: ShiftSource,
    pub sprite_edges: SpriteEdges,
}
