//! Registers, memory and peripherals' state of the virtual machine.
//!
//! No opcode logic lives here; `Quince8` mutates the state while executing.

use heapless::{consts::U16, Vec};

use crate::frame::Frame;
use crate::timer::Timer;

pub const MEM_SIZE: usize = 4096;
/// Mask applied to every address before it reaches memory
pub const ADDR_MASK: u16 = 0x0FFF;
/// `_start` address, where programs are loaded
pub const PROGRAM_START: u16 = 0x200;
/// Address of the first byte of built-in font
pub const FONT_START: u16 = 0x000;
/// Height of a single glyph of the built-in font
pub const GLYPH_SIZE: u16 = 5;
/// Index of the flag register
pub const VF: usize = 0xF;

#[rustfmt::skip]
pub const FONT: [u8; 16 * GLYPH_SIZE as usize] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub(crate) struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub memory: [u8; MEM_SIZE],
    /// Return addresses, empty when not in subroutine
    pub stack: Vec<u16, U16>,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    /// Last keypad snapshot supplied by the host
    pub keys: [bool; 16],
    pub frame: Frame,
    pub redraw: bool,
    /// Register awaiting a keypress, if FX0A is in progress
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEM_SIZE];
        let font = FONT_START as usize;
        memory[font..font + FONT.len()].copy_from_slice(&FONT);
        Self {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            memory,
            stack: Vec::new(),
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            keys: [false; 16],
            frame: Frame::new(),
            redraw: false,
            awaiting_key: None,
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDR_MASK) as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDR_MASK) as usize] = value;
    }

    /// Read big-endian word at `addr`
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr.wrapping_add(1)))
    }
}
