#![cfg(feature = "embedded-graphics")]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_utils::thread;
use rand::{rngs::StdRng, Rng, SeedableRng};

use quince8::{
    embedded_graphics::{drawable::Pixel, image::IntoPixelIter, pixelcolor::BinaryColor},
    Builder, Context, Cycle, Error, Quince8, Quirks, Sound, StdContext,
};

macro_rules! schedule_for {
    ($scope:expr, $f:expr, $freq:expr, $timeout:expr) => {{
        let started = Instant::now();
        let period = Duration::from_nanos(1_000_000_000u64 / $freq);
        let mut previous = started;
        $scope.spawn(move |_| loop {
            let now = Instant::now();
            if now.duration_since(started) >= $timeout {
                break;
            }
            if now.duration_since(previous) >= period {
                $f();
                previous = now;
            }
        })
    }};
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Context with a clock moved forward by hand
struct ManualContext {
    now: Duration,
    rng: StdRng,
}

impl ManualContext {
    fn new() -> Self {
        Self {
            now: Duration::from_secs(0),
            rng: StdRng::seed_from_u64(0x5EED),
        }
    }
}

impl Context for ManualContext {
    fn now(&mut self) -> Duration {
        self.now
    }

    fn gen_random(&mut self) -> u8 {
        self.rng.gen::<u8>()
    }
}

fn advance_and_step(
    chip: &mut Quince8<ManualContext>,
    by: Duration,
) -> Result<Option<Cycle>, Error> {
    chip.context_mut().now += by;
    chip.step().map(|step| step.cycle)
}

fn render<C: Context>(chip: &Quince8<C>) -> String {
    let mut rows = vec![".".repeat(64); 32];
    chip.framebuffer()
        .as_raw_image()
        .pixel_iter()
        .for_each(|Pixel(point, color)| {
            let (x, y) = (point.x as usize, point.y as usize);
            rows[y].replace_range(
                x..x + 1,
                match color {
                    BinaryColor::On => "#",
                    BinaryColor::Off => ".",
                },
            );
        });
    rows.join("\n") + "\n"
}

fn top_left(frame: &str, width: usize, height: usize) -> Vec<&str> {
    frame.lines().take(height).map(|row| &row[..width]).collect()
}

#[rustfmt::skip]
const HEX_DIGITS: [u8; 28] = [
    0x60, 0x00, // V0 := 0
    0x61, 0x02, // V1 := 2
    0x62, 0x01, // V2 := 1
    0xF0, 0x29, // loop: I := sprite of V0
    0xD1, 0x25, // draw at (V1, V2)
    0x70, 0x01, // V0 += 1
    0x71, 0x05, // V1 += 5
    0x30, 0x08, // if V0 == 8 then
    0x12, 0x16, // else jump ahead
    0x61, 0x02, //   V1 := 2
    0x62, 0x07, //   V2 := 7
    0x30, 0x10, // if V0 != 16 then
    0x12, 0x06, //   jump loop
    0x12, 0x1A, // halt
];

#[test]
fn rom_hex_digits() {
    init_logger();
    let mut chip = Quince8::load(ManualContext::new(), &HEX_DIGITS).unwrap();
    assert!(chip.should_redraw());
    assert_eq!(render(&chip), include_str!("../test-data/context/empty_mask"));

    for _ in 0..500 {
        advance_and_step(&mut chip, Duration::from_millis(2)).unwrap();
    }
    assert_eq!(chip.pc(), 0x21A);
    assert!(chip.should_redraw());
    assert_eq!(chip.registers()[0xF], 0x00);
    assert_eq!(render(&chip), include_str!("../test-data/roms/hex_digits"));
}

#[test]
fn rom_waits_for_key() {
    init_logger();
    #[rustfmt::skip]
    let rom = [
        0xF3, 0x0A, // V3 := key
        0xF3, 0x29, // I := sprite of V3
        0xD0, 0x05, // draw at (V0, V0)
        0x12, 0x06, // halt
    ];
    let mut chip = Quince8::load(ManualContext::new(), &rom).unwrap();

    for _ in 0..50 {
        advance_and_step(&mut chip, Duration::from_millis(2)).unwrap();
    }
    assert!(chip.is_awaiting_key());
    assert_eq!(chip.pc(), 0x202);
    assert_eq!(chip.framebuffer().count_ones(), 0);

    chip.set_key(0x7, true);
    assert_eq!(
        advance_and_step(&mut chip, Duration::from_millis(2)),
        Ok(Some(Cycle::KeyLatched { x: 3, key: 7 })),
    );
    chip.set_key(0x7, false);
    for _ in 0..10 {
        advance_and_step(&mut chip, Duration::from_millis(2)).unwrap();
    }
    assert_eq!(chip.pc(), 0x206);
    assert_eq!(
        top_left(&render(&chip), 5, 6),
        vec!["####.", "...#.", "..#..", ".#...", ".#...", "....."],
    );
}

#[test]
fn rom_plays_sound() {
    init_logger();
    let sounds = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&sounds);
    // V0 := 6; sound := V0; halt
    let rom = [0x60, 0x06, 0xF0, 0x18, 0x12, 0x04];
    let mut chip = Builder::new()
        .with_context(ManualContext::new())
        .with_program(&rom)
        .with_audio_callback(move |sound| sink.lock().unwrap().push(sound))
        .build()
        .unwrap();

    for _ in 0..20 {
        advance_and_step(&mut chip, Duration::from_millis(1)).unwrap();
    }
    assert_eq!(*sounds.lock().unwrap(), vec![Sound::On]);

    for _ in 0..980 {
        advance_and_step(&mut chip, Duration::from_millis(1)).unwrap();
    }
    assert_eq!(chip.sound_timer(), 0);
    assert_eq!(*sounds.lock().unwrap(), vec![Sound::On, Sound::Off]);
}

#[test]
fn rom_with_shift_quirk() {
    init_logger();
    #[rustfmt::skip]
    let rom = [
        0x61, 0x03, // V1 := 3
        0x62, 0x08, // V2 := 8
        0x81, 0x26, // V1 >>= 1
        0x12, 0x06, // halt
    ];
    let run = |quirks| {
        let mut chip = Builder::new()
            .with_context(ManualContext::new())
            .with_quirks(quirks)
            .with_program(&rom)
            .build()
            .unwrap();
        for _ in 0..4 {
            chip.tick_chip().unwrap();
        }
        (chip.registers()[1], chip.registers()[0xF])
    };

    assert_eq!(run(Quirks::default()), (0x01, 0x01));
    assert_eq!(run(Quirks::cosmac_vip()), (0x04, 0x00));
}

#[test]
fn rom_faults_are_recoverable() {
    init_logger();
    // return; V0 := 1; 5XYN with N != 0; V1 := 2
    let rom = [0x00, 0xEE, 0x60, 0x01, 0x51, 0x21, 0x61, 0x02];
    let mut chip = Quince8::load(ManualContext::new(), &rom).unwrap();
    let step = Duration::from_millis(2);

    assert_eq!(
        advance_and_step(&mut chip, step),
        Err(Error::StackUnderflow { pc: 0x200 }),
    );
    advance_and_step(&mut chip, step).unwrap();
    assert_eq!(chip.registers()[0], 0x01);
    assert_eq!(
        advance_and_step(&mut chip, step),
        Err(Error::UnknownOpcode {
            opcode: 0x5121,
            pc: 0x204,
        }),
    );
    advance_and_step(&mut chip, step).unwrap();
    assert_eq!(chip.registers()[1], 0x02);
}

#[test]
fn rom_threaded_at_real_rates() {
    init_logger();
    #[rustfmt::skip]
    let rom = [
        0x60, 0x0A, // V0 := 10
        0xF0, 0x15, // delay := V0
        0xF1, 0x07, // wait: V1 := delay
        0x31, 0x00, // if V1 != 0 then
        0x12, 0x04, //   jump wait
        0x60, 0x05, // V0 := 5
        0xF0, 0x29, // I := sprite of V0
        0xD2, 0x35, // draw at (V2, V3)
        0x12, 0x10, // halt
    ];
    let chip = Arc::new(Mutex::new(
        Quince8::load(StdContext::seeded(0), &rom).unwrap(),
    ));
    let timeout = Duration::from_millis(600);

    thread::scope(|s| {
        let cpu = Arc::clone(&chip);
        let timers = Arc::clone(&chip);
        schedule_for!(
            s,
            || {
                let _ = cpu.lock().unwrap().tick_chip();
            },
            500,
            timeout
        );
        schedule_for!(
            s,
            || timers.lock().unwrap().tick_timers(),
            60,
            timeout
        );
    })
    .unwrap();

    let chip = chip.lock().unwrap();
    assert_eq!(chip.pc(), 0x210);
    assert_eq!(chip.delay_timer(), 0);
    assert_eq!(chip.framebuffer().count_ones(), 14);
    assert_eq!(
        top_left(&render(&*chip), 5, 5),
        vec!["####.", "#....", "####.", "...#.", "####."],
    );
}
