use core::convert::TryFrom;

use log::{debug, trace, warn};

use crate::clock::Clocks;
use crate::context::Context;
use crate::error::Error;
use crate::frame::{FrameView, HEIGHT, WIDTH};
use crate::opcode::{OpCode, UnknownOpCode};
use crate::quirks::Quirks;
use crate::state::{State, ADDR_MASK, FONT_START, GLYPH_SIZE, MEM_SIZE, PROGRAM_START, VF};
use crate::timer::TimerState;

/// Sound state, passed to the audio callback whenever it changes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sound {
    On,
    Off,
}

pub(crate) type AudioCallback = Box<dyn FnMut(Sound) + Send>;

/// Outcome of a single CPU cycle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// Instruction was fetched and executed
    Executed(OpCode),
    /// 2NNN was fetched, but the stack is full and the call was dropped
    CallDropped { nnn: u16 },
    /// FX0A found a pressed key and stored it in VX
    KeyLatched { x: u8, key: u8 },
}

/// Outcome of `Quince8::step`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Set if the CPU clock ticked and the CPU wasn't waiting for a key
    pub cycle: Option<Cycle>,
    /// Set if the timers were decremented
    pub timers_ticked: bool,
}

/// CHIP-8 virtual machine
///
/// The host drives the machine by calling `step` in its main loop. The
/// internal clocks decide whether an instruction is due and whether the
/// timers should be decremented, so `step` may be called as often as the
/// host likes.
///
/// # Examples
///
/// ```
/// use quince8::{Quince8, StdContext};
///
/// // V0 := 0x0A; I := sprite of V0; draw it at (V1, V1)
/// let program = [0x60, 0x0A, 0xF0, 0x29, 0xD1, 0x15];
/// let mut chip = Quince8::load(StdContext::new(), &program).unwrap();
/// for _ in 0..3 {
///     chip.tick_chip().unwrap();
/// }
/// assert!(chip.should_redraw());
/// assert_eq!(chip.framebuffer().get_bit(0, 0), Some(&true));
/// ```
pub struct Quince8<C: Context> {
    ctx: C,
    state: State,
    quirks: Quirks,
    clocks: Clocks,
    sound: Sound,
    audio: Option<AudioCallback>,
}

impl<C: Context> Quince8<C> {
    pub fn new(ctx: C) -> Self {
        Self::with_quirks(ctx, Quirks::default())
    }

    pub fn with_quirks(mut ctx: C, quirks: Quirks) -> Self {
        let now = ctx.now();
        let mut chip = Self {
            ctx,
            state: State::new(),
            quirks,
            clocks: Clocks::new(now),
            sound: Sound::Off,
            audio: None,
        };
        chip.init();
        chip
    }

    /// Create machine and load program from slice of bytes
    pub fn load(ctx: C, prog: &[u8]) -> Result<Self, Error> {
        let mut chip = Self::new(ctx);
        chip.load_program(prog)?;
        Ok(chip)
    }

    /// Reset the machine to its power-on state and restart the clocks
    ///
    /// Memory is cleared as well, so the program has to be loaded again.
    /// Quirks and the audio callback are kept.
    pub fn init(&mut self) {
        self.state = State::new();
        // first frame is always presented
        self.state.redraw = true;
        self.update_sound();
        let now = self.ctx.now();
        self.clocks.arm(now);
    }

    /// Load program from slice of bytes to memory from 0x200 (_start address)
    ///
    /// Only the program counter is reset; registers, timers and stack are left untouched.
    pub fn load_program(&mut self, prog: &[u8]) -> Result<(), Error> {
        let start = PROGRAM_START as usize;
        let capacity = MEM_SIZE - start;
        if prog.len() > capacity {
            return Err(Error::ProgramTooLarge {
                size: prog.len(),
                capacity,
            });
        }
        self.state.memory[start..start + prog.len()].copy_from_slice(prog);
        self.state.pc = PROGRAM_START;
        debug!("Loaded program of {} bytes", prog.len());
        Ok(())
    }

    /// Apply quirks, should be done before `init`
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Register function called whenever the sound should be turned on or off
    ///
    /// It's called right away with `Sound::On` if the sound timer is running.
    pub fn set_audio_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Sound) + Send + 'static,
    {
        self.audio = Some(Box::new(callback));
        self.sound = Sound::Off;
        self.update_sound();
    }

    /// Advance the machine by at most one instruction and at most one timer tick
    ///
    /// An unknown opcode or a return with an empty stack is reported as an
    /// error; the machine stays consistent and may keep being stepped.
    /// Timers are serviced before the error is returned, so a due timer tick
    /// has already happened even though `Step::timers_ticked` isn't reported.
    pub fn step(&mut self) -> Result<Step, Error> {
        let now = self.ctx.now();
        let cycle = if self.clocks.cpu.poll(now) {
            match self.tick_chip() {
                Ok(cycle) => Ok(Some(cycle)),
                Err(nb::Error::WouldBlock) => Ok(None),
                Err(nb::Error::Other(err)) => Err(err),
            }
        } else {
            Ok(None)
        };
        let timers_ticked = self.clocks.timers.poll(now);
        if timers_ticked {
            self.tick_timers();
        }
        cycle.map(|cycle| Step {
            cycle,
            timers_ticked,
        })
    }

    /// Run a single CPU cycle, regardless of the clock
    ///
    /// Returns `WouldBlock` while FX0A is waiting for a keypress.
    pub fn tick_chip(&mut self) -> nb::Result<Cycle, Error> {
        if let Some(x) = self.state.awaiting_key {
            return self.latch_key(x);
        }
        let pc = self.state.pc;
        let raw = self.state.read_word(pc);
        self.pc_increment();
        let opcode = OpCode::try_from(raw).map_err(|UnknownOpCode(opcode)| {
            warn!("Unknown opcode {:04X} at {:#05X}", opcode, pc);
            Error::UnknownOpcode { opcode, pc }
        })?;
        trace!("{:#05X}: {:04X} {:?}", pc, raw, opcode);
        Ok(self.execute(opcode)?)
    }

    /// Decrement both timers, regardless of the clock
    pub fn tick_timers(&mut self) {
        self.state.delay_timer.decrement();
        if self.state.sound_timer.decrement() == TimerState::Finished {
            self.update_sound();
        }
    }

    /// Check whether the frame changed since the last call
    pub fn should_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.state.redraw, false)
    }

    pub fn framebuffer(&self) -> FrameView<'_> {
        self.state.frame.view()
    }

    /// Replace state of all keys, index of the array is the key
    pub fn set_keypad_state(&mut self, keys: [bool; 16]) {
        self.state.keys = keys;
    }

    /// Update state of a single key, keys past 0xF are ignored
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(state) = self.state.keys.get_mut(key as usize) {
            *state = pressed;
        }
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.awaiting_key.is_some()
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.len()
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer.load()
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer.load()
    }

    fn pc_increment(&mut self) {
        self.state.pc = self.state.pc.wrapping_add(2) & ADDR_MASK;
    }

    fn latch_key(&mut self, x: u8) -> nb::Result<Cycle, Error> {
        let key = self
            .state
            .keys
            .iter()
            .position(|&pressed| pressed)
            .ok_or(nb::Error::WouldBlock)? as u8;
        self.state.v[x as usize] = key;
        self.state.awaiting_key = None;
        debug!("Key {:X} latched into V{:X}", key, x);
        Ok(Cycle::KeyLatched { x, key })
    }

    fn update_sound(&mut self) {
        let sound = if self.state.sound_timer.is_active() {
            Sound::On
        } else {
            Sound::Off
        };
        if sound != self.sound {
            self.sound = sound;
            if let Some(callback) = self.audio.as_mut() {
                callback(sound);
            }
        }
    }
}

// OpCodes impls
impl<C: Context> Quince8<C> {
    #[rustfmt::skip]
    fn execute(&mut self, opcode: OpCode) -> Result<Cycle, Error> {
        match opcode {
            OpCode::_0NNN { nnn }     => self.exec_ml_subroutine_at(nnn),
            OpCode::_00E0             => self.clear_screen(),
            OpCode::_00EE             => self.subroutine_return(),
            OpCode::_1NNN { nnn }     => self.jump_to(nnn),
            OpCode::_2NNN { nnn }     => return Ok(self.exec_subroutine_at(nnn)),
            OpCode::_3XNN { x, nn }   => self.skip_if_vx_eq_nn(x, nn),
            OpCode::_4XNN { x, nn }   => self.skip_if_vx_ne_nn(x, nn),
            OpCode::_5XY0 { x, y }    => self.skip_if_vx_eq_vy(x, y),
            OpCode::_6XNN { x, nn }   => self.assign_vx_nn(x, nn),
            OpCode::_7XNN { x, nn }   => self.assign_add_vx_nn(x, nn),
            OpCode::_8XY0 { x, y }    => self.assign_vx_vy(x, y),
            OpCode::_8XY1 { x, y }    => self.assign_or_vx_vy(x, y),
            OpCode::_8XY2 { x, y }    => self.assign_and_vx_vy(x, y),
            OpCode::_8XY3 { x, y }    => self.assign_xor_vx_vy(x, y),
            OpCode::_8XY4 { x, y }    => self.assign_add_vx_vy(x, y),
            OpCode::_8XY5 { x, y }    => self.assign_sub_vx_vy(x, y),
            OpCode::_8XY6 { x, y }    => self.assign_vx_shifted_r(x, y),
            OpCode::_8XY7 { x, y }    => self.assign_vx_vy_sub_vx(x, y),
            OpCode::_8XYE { x, y }    => self.assign_vx_shifted_l(x, y),
            OpCode::_9XY0 { x, y }    => self.skip_if_vx_ne_vy(x, y),
            OpCode::_ANNN { nnn }     => self.assign_i_nnn(nnn),
            OpCode::_BNNN { nnn }     => self.jump_to_nnn_add_offset(nnn),
            OpCode::_CXNN { x, nn }   => self.assign_vx_random_and_nn(x, nn),
            OpCode::_DXYN { x, y, n } => self.draw_n_at_vx_vy(x, y, n),
            OpCode::_EX9E { x }       => self.skip_if_vx_in_keys(x),
            OpCode::_EXA1 { x }       => self.skip_if_vx_not_in_keys(x),
            OpCode::_FX07 { x }       => self.assign_vx_delay_t(x),
            OpCode::_FX0A { x }       => self.assign_vx_wait_for_key(x),
            OpCode::_FX15 { x }       => self.assign_delay_t_vx(x),
            OpCode::_FX18 { x }       => self.assign_sound_t_vx(x),
            OpCode::_FX1E { x }       => self.assign_add_i_vx(x),
            OpCode::_FX29 { x }       => self.assign_i_addr_of_sprite_vx(x),
            OpCode::_FX33 { x }       => self.assign_mem_at_i_bcd_of_vx(x),
            OpCode::_FX55 { x }       => self.assign_mem_at_i_v0_to_vx(x),
            OpCode::_FX65 { x }       => self.assign_v0_to_vx_mem_at_i(x),
        }
        .map(|_| Cycle::Executed(opcode))
    }

    /// Execute machine language subroutine at address NNN
    /// 0NNN { nnn: u16 },
    fn exec_ml_subroutine_at(&mut self, nnn: u16) -> Result<(), Error> {
        debug!("Ignoring machine language subroutine at {:#05X}", nnn);
        Ok(())
    }

    /// Clear the screen
    /// 00E0,
    fn clear_screen(&mut self) -> Result<(), Error> {
        self.state.frame.clear();
        self.state.redraw = true;
        Ok(())
    }

    /// Return from a subroutine
    /// 00EE,
    fn subroutine_return(&mut self) -> Result<(), Error> {
        let pc = self.state.pc.wrapping_sub(2) & ADDR_MASK;
        self.state
            .stack
            .pop()
            .ok_or(Error::StackUnderflow { pc })
            .map(|addr| self.state.pc = addr)
    }

    /// Jump to address NNN
    /// 1NNN { nnn: u16 },
    fn jump_to(&mut self, nnn: u16) -> Result<(), Error> {
        self.state.pc = nnn;
        Ok(())
    }

    /// Execute subroutine starting at address NNN
    /// 2NNN { nnn: u16 },
    fn exec_subroutine_at(&mut self, nnn: u16) -> Cycle {
        if let Err(ret) = self.state.stack.push(self.state.pc) {
            if !self.quirks.wrap_stack {
                warn!("Cannot enter subroutine at {:#05X}, stack is full", nnn);
                return Cycle::CallDropped { nnn };
            }
            warn!("Stack is full, dropping the oldest return address");
            self.state.stack.rotate_left(1);
            if let Some(top) = self.state.stack.last_mut() {
                *top = ret;
            }
        }
        self.state.pc = nnn;
        Cycle::Executed(OpCode::_2NNN { nnn })
    }

    /// Skip the following instruction if the value of register VX equals NN
    /// 3XNN { x: u8, nn: u8 },
    fn skip_if_vx_eq_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        if self.state.v[x as usize] == nn {
            self.pc_increment();
        }
        Ok(())
    }

    /// Skip the following instruction if the value of register VX is not equal to NN
    /// 4XNN { x: u8, nn: u8 },
    fn skip_if_vx_ne_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        if self.state.v[x as usize] != nn {
            self.pc_increment();
        }
        Ok(())
    }

    /// Skip the following instruction if the value of register VX is equal to the value of register VY
    /// 5XY0 { x: u8, y: u8 },
    fn skip_if_vx_eq_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        if self.state.v[x as usize] == self.state.v[y as usize] {
            self.pc_increment();
        }
        Ok(())
    }

    /// Store number NN in register VX
    /// 6XNN { x: u8, nn: u8 },
    fn assign_vx_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.state.v[x as usize] = nn;
        Ok(())
    }

    /// Add the value NN to register VX
    /// 7XNN { x: u8, nn: u8 },
    fn assign_add_vx_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.state.v[x as usize] = self.state.v[x as usize].wrapping_add(nn);
        Ok(())
    }

    /// Store the value of register VY in register VX
    /// 8XY0 { x: u8, y: u8 },
    fn assign_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.state.v[x as usize] = self.state.v[y as usize];
        Ok(())
    }

    /// Set VX to VX OR VY
    /// 8XY1 { x: u8, y: u8 },
    fn assign_or_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.state.v[x as usize] |= self.state.v[y as usize];
        self.logic_reset_vf();
        Ok(())
    }

    /// Set VX to VX AND VY
    /// 8XY2 { x: u8, y: u8 },
    fn assign_and_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.state.v[x as usize] &= self.state.v[y as usize];
        self.logic_reset_vf();
        Ok(())
    }

    /// Set VX to VX XOR VY
    /// 8XY3 { x: u8, y: u8 },
    fn assign_xor_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.state.v[x as usize] ^= self.state.v[y as usize];
        self.logic_reset_vf();
        Ok(())
    }

    fn logic_reset_vf(&mut self) {
        if self.quirks.logic_resets_vf {
            self.state.v[VF] = 0x00u8;
        }
    }

    /// Add the value of register VY to register VX, Set VF to 01 if a carry occurs, Set VF to 00 if a carry does not occur
    /// 8XY4 { x: u8, y: u8 },
    fn assign_add_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let sum = u16::from(self.state.v[x as usize]) + u16::from(self.state.v[y as usize]);
        self.state.v[x as usize] = sum as u8;
        self.state.v[VF] = if sum > 0x00FFu16 { 0x01u8 } else { 0x00u8 };
        Ok(())
    }

    /// Subtract the value of register VY from register VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY5 { x: u8, y: u8 },
    fn assign_sub_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let (vx, vy) = (self.state.v[x as usize], self.state.v[y as usize]);
        self.state.v[x as usize] = vx.wrapping_sub(vy);
        self.state.v[VF] = if u16::from(vx) >= u16::from(vy) { 0x01u8 } else { 0x00u8 };
        Ok(())
    }

    /// Store the value of register VX (or VY) shifted right one bit in register VX, Set register VF to the least significant bit prior to the shift
    /// 8XY6 { x: u8, y: u8 },
    fn assign_vx_shifted_r(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let value = self.shift_operand(x, y);
        self.state.v[x as usize] = value >> 1;
        self.state.v[VF] = value & 0x01u8;
        Ok(())
    }

    /// Set register VX to the value of VY minus VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY7 { x: u8, y: u8 },
    fn assign_vx_vy_sub_vx(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let (vx, vy) = (self.state.v[x as usize], self.state.v[y as usize]);
        self.state.v[x as usize] = vy.wrapping_sub(vx);
        self.state.v[VF] = if u16::from(vy) >= u16::from(vx) { 0x01u8 } else { 0x00u8 };
        Ok(())
    }

    /// Store the value of register VX (or VY) shifted left one bit in register VX, Set register VF to the most significant bit prior to the shift
    /// 8XYE { x: u8, y: u8 },
    fn assign_vx_shifted_l(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let value = self.shift_operand(x, y);
        self.state.v[x as usize] = value << 1;
        self.state.v[VF] = value >> 7;
        Ok(())
    }

    fn shift_operand(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_reads_vy {
            self.state.v[y as usize]
        } else {
            self.state.v[x as usize]
        }
    }

    /// Skip the following instruction if the value of register VX is not equal to the value of register VY
    /// 9XY0 { x: u8, y: u8 },
    fn skip_if_vx_ne_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        if self.state.v[x as usize] != self.state.v[y as usize] {
            self.pc_increment();
        }
        Ok(())
    }

    /// Store memory address NNN in register I
    /// ANNN { nnn: u16 },
    fn assign_i_nnn(&mut self, nnn: u16) -> Result<(), Error> {
        self.state.i = nnn;
        Ok(())
    }

    /// Jump to address NNN + V0, or NNN + VX with `jump_uses_vx`
    /// BNNN { nnn: u16 },
    fn jump_to_nnn_add_offset(&mut self, nnn: u16) -> Result<(), Error> {
        let register = if self.quirks.jump_uses_vx {
            (nnn >> 8) as usize
        } else {
            0
        };
        let offset = u16::from(self.state.v[register]);
        self.state.pc = nnn.wrapping_add(offset) & ADDR_MASK;
        Ok(())
    }

    /// Set VX to a random number with a mask of NN
    /// CXNN { x: u8, nn: u8 },
    fn assign_vx_random_and_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.state.v[x as usize] = self.ctx.gen_random() & nn;
        Ok(())
    }

    /// Draw a sprite at position VX, VY with N bytes of sprite data starting at the address stored in I, Set VF to 01 if any set pixels are changed to unset, and 00 otherwise
    /// DXYN { x: u8, y: u8, n: u8 },
    fn draw_n_at_vx_vy(&mut self, x: u8, y: u8, n: u8) -> Result<(), Error> {
        let left = self.state.v[x as usize] as usize % WIDTH;
        let top = self.state.v[y as usize] as usize % HEIGHT;
        let wrap = self.quirks.wrap_sprites;
        let mut collision = false;

        for row in 0..n {
            let sprite = self.state.read(self.state.i.wrapping_add(u16::from(row)));
            for col in (0..8).filter(|&col| sprite & (0x80u8 >> col) != 0) {
                let (mut px, mut py) = (left + col, top + row as usize);
                if wrap {
                    px %= WIDTH;
                    py %= HEIGHT;
                }
                // clipped pixels fall outside of the frame
                if let Some(previous) = self.state.frame.xor_bit(px, py, true) {
                    collision |= previous;
                    self.state.redraw = true;
                }
            }
        }
        self.state.v[VF] = if collision { 0x01u8 } else { 0x00u8 };
        Ok(())
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is pressed
    /// EX9E { x: u8 },
    fn skip_if_vx_in_keys(&mut self, x: u8) -> Result<(), Error> {
        if self.is_vx_pressed(x) {
            self.pc_increment();
        }
        Ok(())
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is not pressed
    /// EXA1 { x: u8 },
    fn skip_if_vx_not_in_keys(&mut self, x: u8) -> Result<(), Error> {
        if !self.is_vx_pressed(x) {
            self.pc_increment();
        }
        Ok(())
    }

    fn is_vx_pressed(&self, x: u8) -> bool {
        self.state.keys[(self.state.v[x as usize] & 0x0Fu8) as usize]
    }

    /// Store the current value of the delay timer in register VX
    /// FX07 { x: u8 },
    fn assign_vx_delay_t(&mut self, x: u8) -> Result<(), Error> {
        self.state.v[x as usize] = self.state.delay_timer.load();
        Ok(())
    }

    /// Wait for a keypress and store the result in register VX
    /// FX0A { x: u8 },
    fn assign_vx_wait_for_key(&mut self, x: u8) -> Result<(), Error> {
        self.state.awaiting_key = Some(x);
        Ok(())
    }

    /// Set the delay timer to the value of register VX
    /// FX15 { x: u8 },
    fn assign_delay_t_vx(&mut self, x: u8) -> Result<(), Error> {
        self.state.delay_timer.store(self.state.v[x as usize]);
        Ok(())
    }

    /// Set the sound timer to the value of register VX
    /// FX18 { x: u8 },
    fn assign_sound_t_vx(&mut self, x: u8) -> Result<(), Error> {
        self.state.sound_timer.store(self.state.v[x as usize]);
        self.update_sound();
        Ok(())
    }

    /// Add the value stored in register VX to register I
    /// FX1E { x: u8 },
    fn assign_add_i_vx(&mut self, x: u8) -> Result<(), Error> {
        self.state.i = self.state.i.wrapping_add(u16::from(self.state.v[x as usize]));
        Ok(())
    }

    /// Set I to the memory address of the sprite data corresponding to the hexadecimal digit stored in register VX
    /// FX29 { x: u8 },
    fn assign_i_addr_of_sprite_vx(&mut self, x: u8) -> Result<(), Error> {
        let digit = u16::from(self.state.v[x as usize] & 0x0Fu8);
        self.state.i = FONT_START + digit * GLYPH_SIZE;
        Ok(())
    }

    /// Store the binary-coded decimal equivalent of the value stored in register VX at addresses I, I+1, and I+2
    /// FX33 { x: u8 },
    fn assign_mem_at_i_bcd_of_vx(&mut self, x: u8) -> Result<(), Error> {
        let value = self.state.v[x as usize];
        let i = self.state.i;
        self.state.write(i, value / 100u8);
        self.state.write(i.wrapping_add(1), (value % 100u8) / 10u8);
        self.state.write(i.wrapping_add(2), value % 10u8);
        Ok(())
    }

    /// Store the values of registers V0 to VX inclusive in memory starting at address I, I is optionally set to I + X + 1 after operation
    /// FX55 { x: u8 },
    fn assign_mem_at_i_v0_to_vx(&mut self, x: u8) -> Result<(), Error> {
        let i = self.state.i;
        for idx in 0..=x {
            self.state
                .write(i.wrapping_add(u16::from(idx)), self.state.v[idx as usize]);
        }
        self.load_store_advance_i(x);
        Ok(())
    }

    /// Fill registers V0 to VX inclusive with the values stored in memory starting at address I, I is optionally set to I + X + 1 after operation
    /// FX65 { x: u8 },
    fn assign_v0_to_vx_mem_at_i(&mut self, x: u8) -> Result<(), Error> {
        let i = self.state.i;
        for idx in 0..=x {
            self.state.v[idx as usize] = self.state.read(i.wrapping_add(u16::from(idx)));
        }
        self.load_store_advance_i(x);
        Ok(())
    }

    fn load_store_advance_i(&mut self, x: u8) {
        if self.quirks.load_store_increments_i {
            self.state.i = self.state.i.wrapping_add(u16::from(x) + 1);
        }
    }
}
