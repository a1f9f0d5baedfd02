//! Wet-path effects selectable from the command line.

use clap::ValueEnum;
use drywet_core::{AudioBlock, Effect, Identity};

/// Effect applied to the wet path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EffectKind {
    /// Leave the wet path unprocessed
    #[default]
    Identity,
    /// Flip the polarity of the wet path
    Invert,
    /// Silence the wet path
    Mute,
}

struct Invert;

impl Effect for Invert {
    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        block.scale(-1.0);
    }
}

struct Mute;

impl Effect for Mute {
    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        block.clear();
    }
}

impl EffectKind {
    /// Build the effect.
    pub fn create(self) -> Box<dyn Effect> {
        match self {
            EffectKind::Identity => Box::new(Identity),
            EffectKind::Invert => Box::new(Invert),
            EffectKind::Mute => Box::new(Mute),
        }
    }
}
