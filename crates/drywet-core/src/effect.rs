//! Wet-path effect interface.
//!
//! The mixer does not know what the wet path does. The caller hands it an
//! [`Effect`] on every block, which keeps the mixing core independent of any
//! particular DSP algorithm.
//!
//! ## Design Decisions
//!
//! - **Block processing**: effects see the whole multi-channel [`AudioBlock`]
//!   in place, so stereo-linked processing needs no extra plumbing.
//!
//! - **Object-safe**: `dyn Effect` works for runtime selection; generics are
//!   preferred when the effect is known at compile time.
//!
//! - **No allocations**: `process` runs on the audio thread.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::block::AudioBlock;
use crate::layout::ProcessSpec;

/// Core trait for wet-path transforms.
///
/// # Example
///
/// ```rust
/// use drywet_core::{AudioBlock, Effect};
///
/// struct Polarity;
///
/// impl Effect for Polarity {
///     fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
///         block.scale(-1.0);
///     }
/// }
/// ```
pub trait Effect {
    /// Called from `prepare` with the negotiated configuration.
    ///
    /// Allocation is allowed here and nowhere else.
    fn prepare(&mut self, _spec: &ProcessSpec) {}

    /// Transform the block in place.
    fn process(&mut self, block: &mut AudioBlock<'_, '_>);

    /// Reset internal state.
    ///
    /// Clears all internal state (delay lines, filter history, etc.)
    /// without changing parameters.
    fn reset(&mut self) {}

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}

impl<E: Effect + ?Sized> Effect for Box<E> {
    fn prepare(&mut self, spec: &ProcessSpec) {
        (**self).prepare(spec);
    }

    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        (**self).process(block);
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn latency_samples(&self) -> usize {
        (**self).latency_samples()
    }
}

/// Leaves the wet path untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Effect for Identity {
    #[inline]
    fn process(&mut self, _block: &mut AudioBlock<'_, '_>) {}
}

/// An [`Effect`] backed by a closure. Build one with [`from_fn`].
pub struct FnEffect<F> {
    f: F,
}

/// Wrap a closure as an [`Effect`].
///
/// ```rust
/// use drywet_core::{effect::from_fn, AudioBlock, Effect};
///
/// let mut halve = from_fn(|block: &mut AudioBlock<'_, '_>| block.scale(0.5));
/// let mut samples = [1.0_f32; 4];
/// let mut channels = [&mut samples[..]];
/// let mut block = AudioBlock::new(&mut channels).unwrap();
/// halve.process(&mut block);
/// assert_eq!(samples, [0.5; 4]);
/// ```
pub fn from_fn<F>(f: F) -> FnEffect<F>
where
    F: FnMut(&mut AudioBlock<'_, '_>),
{
    FnEffect { f }
}

impl<F> Effect for FnEffect<F>
where
    F: FnMut(&mut AudioBlock<'_, '_>),
{
    #[inline]
    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        (self.f)(block);
    }
}

/// Extension trait for chaining effects.
///
/// Provides a fluent interface for building effect chains with static dispatch.
pub trait EffectExt: Effect + Sized {
    /// Chain this effect with another, creating a composite effect.
    ///
    /// The output of `self` feeds into the input of `next`.
    fn chain<E: Effect>(self, next: E) -> Chain<Self, E> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<T: Effect> EffectExt for T {}

/// Two effects chained in series.
///
/// Created by [`EffectExt::chain`].
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Effect, B: Effect> Effect for Chain<A, B> {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.first.prepare(spec);
        self.second.prepare(spec);
    }

    #[inline]
    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        self.first.process(block);
        self.second.process(block);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn latency_samples(&self) -> usize {
        self.first.latency_samples() + self.second.latency_samples()
    }
}

impl<A, B> Chain<A, B> {
    /// Get a reference to the first effect in the chain.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get a mutable reference to the first effect in the chain.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Get a reference to the second effect in the chain.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Get a mutable reference to the second effect in the chain.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}
