//! Compatibility flags for opcodes whose semantics differ between historical
//! CHIP-8 interpreters.
//!
//! `Quirks::default()` follows the conventions most modern ROMs are written
//! against. Flags are read on every instruction, but are meant to be set once,
//! before `Quince8::init`; switching them while a program runs has no defined
//! outcome.

/// Set of opcode behaviours which are not agreed upon
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quirks {
    /// 8XY1, 8XY2, 8XY3 reset VF to 00 after the operation
    pub logic_resets_vf: bool,
    /// 8XY6, 8XYE shift the value of VY and store it in VX, instead of shifting VX in place
    pub shift_reads_vy: bool,
    /// BNNN jumps to NNN + VX, where X is the highest nibble of NNN, instead of NNN + V0
    pub jump_uses_vx: bool,
    /// FX55, FX65 leave I set to I + X + 1
    pub load_store_increments_i: bool,
    /// DXYN wraps pixels drawn past the edge to the opposite side instead of clipping them
    pub wrap_sprites: bool,
    /// 2NNN with a full stack overwrites the oldest return address instead of being dropped
    pub wrap_stack: bool,
}

impl Quirks {
    /// Behaviour of interpreters derived from CHIP-48 and SUPER-CHIP
    pub const fn modern() -> Self {
        Self {
            logic_resets_vf: false,
            shift_reads_vy: false,
            jump_uses_vx: false,
            load_store_increments_i: false,
            wrap_sprites: false,
            wrap_stack: false,
        }
    }

    /// Behaviour of the interpreter shipped with the COSMAC VIP
    pub const fn cosmac_vip() -> Self {
        Self {
            logic_resets_vf: true,
            shift_reads_vy: true,
            jump_uses_vx: false,
            load_store_increments_i: true,
            wrap_sprites: false,
            wrap_stack: false,
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Self::modern()
    }
}
