//! Context for accessing functionalities of platform that `Quince8` is
//! emulated on.
//!
//! The emulator never reads the system clock or an entropy source by itself.
//! Both are requested through `Context`, which keeps every run reproducible
//! under a scripted implementation.

use core::time::Duration;
use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Trait aggregating platform functionalities
pub trait Context {
    /// Monotonic time elapsed since an arbitrary, fixed origin
    ///
    /// Called by `step` on each call, and by `init` to arm the clocks
    fn now(&mut self) -> Duration;
    /// Generate random 8-bit number
    ///
    /// Called by `tick_chip` whenever requested by executing program
    fn gen_random(&mut self) -> u8;
}

/// Context backed by `std::time::Instant` and a `rand::rngs::StdRng`
pub struct StdContext {
    origin: Instant,
    rng: StdRng,
}

impl StdContext {
    /// Create a context with the generator seeded from system entropy
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a context generating a reproducible sequence of numbers
    pub fn seeded(seed: u64) -> Self {
        Self {
            origin: Instant::now(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Context for StdContext {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }

    fn gen_random(&mut self) -> u8 {
        self.rng.gen::<u8>()
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Context with a manually driven clock
    pub struct TestingContext {
        now: Duration,
        rng: StdRng,
    }

    impl TestingContext {
        pub fn new(seed: u64) -> Self {
            Self {
                now: Duration::from_secs(0),
                rng: StdRng::seed_from_u64(seed),
            }
        }

        pub fn advance(&mut self, by: Duration) {
            self.now += by;
        }
    }

    impl Context for TestingContext {
        fn now(&mut self) -> Duration {
            self.now
        }

        fn gen_random(&mut self) -> u8 {
            self.rng.gen::<u8>()
        }
    }

    #[test]
    fn testing_context() {
        let mut ctx = TestingContext::new(0);
        assert_eq!(ctx.now(), Duration::from_secs(0));
        ctx.advance(Duration::from_millis(3));
        ctx.advance(Duration::from_millis(4));
        assert_eq!(ctx.now(), Duration::from_millis(7));

        let mut other = TestingContext::new(0);
        let lhs: Vec<u8> = (0..32).map(|_| ctx.gen_random()).collect();
        let rhs: Vec<u8> = (0..32).map(|_| other.gen_random()).collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn std_context() {
        let mut ctx = StdContext::seeded(7);
        let first = ctx.now();
        assert!(ctx.now() >= first);

        let mut other = StdContext::seeded(7);
        assert_eq!(ctx.gen_random(), other.gen_random());
    }
}
