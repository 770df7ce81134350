use core::convert::TryFrom;

/// An enum representing 35 possible opcodes of chip-8 architecture
///
/// Based on [chip8 mastering](http://mattmik.com/files/chip8/mastering/chip8.html)
///
/// Examples:
/// ```
/// use core::convert::TryFrom;
/// use quince8::opcode::{OpCode, UnknownOpCode};
///
/// assert_eq!(
///     OpCode::try_from(0x0ABCu16),
///     Ok(OpCode::_0NNN { nnn: 0x0ABC }),
/// );
/// assert_eq!(
///     OpCode::try_from(0x8ABFu16),
///     Err(UnknownOpCode(0x8ABF)),
/// );
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OpCode {
    /// Execute machine language subroutine at address NNN
    _0NNN { nnn: u16 },
    /// Clear the screen
    _00E0,
    /// Return from a subroutine
    _00EE,
    /// Jump to address NNN
    _1NNN { nnn: u16 },
    /// Execute subroutine starting at address NNN
    _2NNN { nnn: u16 },
    /// Skip the following instruction if the value of register VX equals NN
    _3XNN { x: u8, nn: u8 },
    /// Skip the following instruction if the value of register VX is not equal to NN
    _4XNN { x: u8, nn: u8 },
    /// Skip the following instruction if the value of register VX is equal to the value of register VY
    _5XY0 { x: u8, y: u8 },
    /// Store number NN in register VX
    _6XNN { x: u8, nn: u8 },
    /// Add the value NN to register VX
    _7XNN { x: u8, nn: u8 },
    /// Store the value of register VY in register VX
    _8XY0 { x: u8, y: u8 },
    /// Set VX to VX OR VY
    _8XY1 { x: u8, y: u8 },
    /// Set VX to VX AND VY
    _8XY2 { x: u8, y: u8 },
    /// Set VX to VX XOR VY
    _8XY3 { x: u8, y: u8 },
    /// Add the value of register VY to register VX, Set VF to 01 if a carry occurs, Set VF to 00 if a carry does not occur
    _8XY4 { x: u8, y: u8 },
    /// Subtract the value of register VY from register VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    _8XY5 { x: u8, y: u8 },
    /// Store the value of register VX (or VY) shifted right one bit in register VX, Set register VF to the least significant bit prior to the shift
    _8XY6 { x: u8, y: u8 },
    /// Set register VX to the value of VY minus VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    _8XY7 { x: u8, y: u8 },
    /// Store the value of register VX (or VY) shifted left one bit in register VX, Set register VF to the most significant bit prior to the shift
    _8XYE { x: u8, y: u8 },
    /// Skip the following instruction if the value of register VX is not equal to the value of register VY
    _9XY0 { x: u8, y: u8 },
    /// Store memory address NNN in register I
    _ANNN { nnn: u16 },
    /// Jump to address NNN + V0 (or NNN + VX, see `Quirks::jump_uses_vx`)
    _BNNN { nnn: u16 },
    /// Set VX to a random number with a mask of NN
    _CXNN { x: u8, nn: u8 },
    /// Draw a sprite at position VX, VY with N bytes of sprite data starting at the address stored in I, Set VF to 01 if any set pixels are changed to unset, and 00 otherwise
    _DXYN { x: u8, y: u8, n: u8 },
    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is pressed
    _EX9E { x: u8 },
    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is not pressed
    _EXA1 { x: u8 },
    /// Store the current value of the delay timer in register VX
    _FX07 { x: u8 },
    /// Wait for a keypress and store the result in register VX
    _FX0A { x: u8 },
    /// Set the delay timer to the value of register VX
    _FX15 { x: u8 },
    /// Set the sound timer to the value of register VX
    _FX18 { x: u8 },
    /// Add the value stored in register VX to register I
    _FX1E { x: u8 },
    /// Set I to the memory address of the sprite data corresponding to the hexadecimal digit stored in register VX
    _FX29 { x: u8 },
    /// Store the binary-coded decimal equivalent of the value stored in register VX at addresses I, I+1, and I+2
    _FX33 { x: u8 },
    /// Store the values of registers V0 to VX inclusive in memory starting at address I, I is optionally set to I + X + 1 after operation
    _FX55 { x: u8 },
    /// Fill registers V0 to VX inclusive with the values stored in memory starting at address I, I is optionally set to I + X + 1 after operation
    _FX65 { x: u8 },
}

/// Instruction word which doesn't encode any of the `OpCode`s
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnknownOpCode(pub u16);

/// Instruction word split into its fields
///
/// `class` and `n` are the highest and the lowest nibble, `x` and `y` the two
/// in between, `nn` the lowest byte and `nnn` the lowest 12 bits.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Fields {
    class: u8,
    x: u8,
    y: u8,
    n: u8,
    nn: u8,
    nnn: u16,
}

impl From<u16> for Fields {
    fn from(raw: u16) -> Self {
        Self {
            class: (raw >> 12 & 0x000Fu16) as u8,
            x: (raw >> 8 & 0x000Fu16) as u8,
            y: (raw >> 4 & 0x000Fu16) as u8,
            n: (raw & 0x000Fu16) as u8,
            nn: (raw & 0x00FFu16) as u8,
            nnn: raw & 0x0FFFu16,
        }
    }
}

impl TryFrom<u16> for OpCode {
    type Error = UnknownOpCode;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        let Fields { class, x, y, n, nn, nnn } = Fields::from(raw);
        let opcode = match class {
            0x0u8 => match nnn {
                0x0E0u16 => OpCode::_00E0,
                0x0EEu16 => OpCode::_00EE,
                nnn => OpCode::_0NNN { nnn },
            },
            0x1u8 => OpCode::_1NNN { nnn },
            0x2u8 => OpCode::_2NNN { nnn },
            0x3u8 => OpCode::_3XNN { x, nn },
            0x4u8 => OpCode::_4XNN { x, nn },
            0x5u8 if n == 0x0u8 => OpCode::_5XY0 { x, y },
            0x6u8 => OpCode::_6XNN { x, nn },
            0x7u8 => OpCode::_7XNN { x, nn },
            0x8u8 => match n {
                0x0u8 => OpCode::_8XY0 { x, y },
                0x1u8 => OpCode::_8XY1 { x, y },
                0x2u8 => OpCode::_8XY2 { x, y },
                0x3u8 => OpCode::_8XY3 { x, y },
                0x4u8 => OpCode::_8XY4 { x, y },
                0x5u8 => OpCode::_8XY5 { x, y },
                0x6u8 => OpCode::_8XY6 { x, y },
                0x7u8 => OpCode::_8XY7 { x, y },
                0xEu8 => OpCode::_8XYE { x, y },
                _ => return Err(UnknownOpCode(raw)),
            },
            0x9u8 if n == 0x0u8 => OpCode::_9XY0 { x, y },
            0xAu8 => OpCode::_ANNN { nnn },
            0xBu8 => OpCode::_BNNN { nnn },
            0xCu8 => OpCode::_CXNN { x, nn },
            0xDu8 => OpCode::_DXYN { x, y, n },
            0xEu8 => match nn {
                0x9Eu8 => OpCode::_EX9E { x },
                0xA1u8 => OpCode::_EXA1 { x },
                _ => return Err(UnknownOpCode(raw)),
            },
            0xFu8 => match nn {
                0x07u8 => OpCode::_FX07 { x },
                0x0Au8 => OpCode::_FX0A { x },
                0x15u8 => OpCode::_FX15 { x },
                0x18u8 => OpCode::_FX18 { x },
                0x1Eu8 => OpCode::_FX1E { x },
                0x29u8 => OpCode::_FX29 { x },
                0x33u8 => OpCode::_FX33 { x },
                0x55u8 => OpCode::_FX55 { x },
                0x65u8 => OpCode::_FX65 { x },
                _ => return Err(UnknownOpCode(raw)),
            },
            _ => return Err(UnknownOpCode(raw)),
        };
        Ok(opcode)
    }
}
