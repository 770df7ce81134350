use core::fmt;

use crate::context::Context;
use crate::error::Error;
use crate::quince::{AudioCallback, Quince8, Sound};
use crate::quirks::Quirks;

/// Reasons for `Builder::build` to fail
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    ContextNotProvided,
    ProgramNotProvided,
    Program(Error),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ContextNotProvided => write!(f, "Context not provided"),
            BuildError::ProgramNotProvided => write!(f, "Program not provided"),
            BuildError::Program(err) => write!(f, "Program rejected: {}", err),
        }
    }
}

impl std::error::Error for BuildError {}

/// Step-by-step construction of a `Quince8`, with quirks applied before `init`
///
/// ```
/// use quince8::{Builder, Quirks, StdContext};
///
/// let chip = Builder::new()
///     .with_context(StdContext::new())
///     .with_quirks(Quirks::cosmac_vip())
///     .with_program(&[0x12, 0x00])
///     .build()
///     .unwrap();
/// assert_eq!(chip.quirks(), Quirks::cosmac_vip());
/// ```
pub struct Builder<'a, C: Context> {
    context: Option<C>,
    program: Option<&'a [u8]>,
    quirks: Quirks,
    audio: Option<AudioCallback>,
}

impl<'a, C: Context> Builder<'a, C> {
    pub fn new() -> Self {
        Self {
            context: None,
            program: None,
            quirks: Quirks::default(),
            audio: None,
        }
    }

    pub fn with_context(mut self, ctx: C) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn with_program(mut self, prog: &'a [u8]) -> Self {
        self.program = Some(prog);
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn with_audio_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Sound) + Send + 'static,
    {
        self.audio = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<Quince8<C>, BuildError> {
        let context = self.context.ok_or(BuildError::ContextNotProvided)?;
        let program = self.program.ok_or(BuildError::ProgramNotProvided)?;
        let mut quince = Quince8::with_quirks(context, self.quirks);
        quince.load_program(program).map_err(BuildError::Program)?;
        if let Some(callback) = self.audio {
            quince.set_audio_callback(callback);
        }
        Ok(quince)
    }
}

impl<'a, C: Context> Default for Builder<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}
