//! Seeded number streams feeding the layout engine.
//!
//! The layout engine consumes values in `[0, 1)` through the [`NumberStream`] trait.
//! [`LcgStream`] is the reference stream: a 32-bit linear congruential generator seeded
//! from a [`Seed`], reproducible bit-for-bit across runs and implementations.
//! [`RandStream`] adapts any [`rand::RngCore`] so other generators can drive the
//! engine too (useful for property tests and benchmarks).
use rand::RngCore;

pub mod lcg;
pub mod seed;

pub use lcg::LcgStream;
pub use seed::Seed;

/// 2^32 as a float, the modulus of the reference stream.
pub(crate) const TWO_POW_32: f64 = 4_294_967_296.0;

/// A source of uniformly distributed floats in `[0, 1)`.
///
/// Every call consumes exactly one value. Implementations must not be shared between
/// independent generation runs.
pub trait NumberStream {
    fn next_f64(&mut self) -> f64;
}

impl<S: NumberStream + ?Sized> NumberStream for &mut S {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Adapter exposing any [`RngCore`] as a [`NumberStream`].
#[derive(Debug, Clone)]
pub struct RandStream<R> {
    rng: R,
}

impl<R: RngCore> RandStream<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> NumberStream for RandStream<R> {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        unit_from_u32(self.rng.next_u32())
    }
}

/// Map a full-range `u32` onto `[0, 1)`.
#[inline]
pub(crate) fn unit_from_u32(value: u32) -> f64 {
    f64::from(value) / TWO_POW_32
}

/// Draw an integer in `lower..lower + span` as `lower + floor(next * span)`.
///
/// `span` of zero always yields `lower` but still consumes a value, keeping the draw
/// order independent of the configured ranges.
#[inline]
pub fn range_draw<S: NumberStream + ?Sized>(stream: &mut S, lower: u32, span: u32) -> u32 {
    let offset = (stream.next_f64() * f64::from(span)).floor() as u32;
    lower + offset.min(span.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedStream {
        value: f64,
    }

    impl NumberStream for FixedStream {
        fn next_f64(&mut self) -> f64 {
            self.value
        }
    }

    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn unit_from_u32_stays_below_one() {
        assert_eq!(unit_from_u32(0), 0.0);
        let top = unit_from_u32(u32::MAX);
        assert!(top < 1.0);
        assert!(top > 0.999_999);
    }

    #[test]
    fn rand_stream_maps_raw_values() {
        let mut stream = RandStream::new(FixedRng { value: 1 << 31 });
        assert_eq!(stream.next_f64(), 0.5);
    }

    #[test]
    fn range_draw_covers_bounds() {
        assert_eq!(range_draw(&mut FixedStream { value: 0.0 }, 6, 5), 6);
        assert_eq!(range_draw(&mut FixedStream { value: 0.999_999 }, 6, 5), 10);
        assert_eq!(range_draw(&mut FixedStream { value: 0.5 }, 2, 2), 3);
        assert_eq!(range_draw(&mut FixedStream { value: 0.7 }, 4, 0), 4);
    }

    #[test]
    fn range_draw_stays_in_range_for_random_streams() {
        let mut stream = RandStream::new(StdRng::seed_from_u64(99));
        for _ in 0..1000 {
            let v = range_draw(&mut stream, 6, 7);
            assert!((6..13).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn mutable_references_are_streams() {
        fn draw<S: NumberStream>(mut stream: S) -> f64 {
            stream.next_f64()
        }
        let mut inner = LcgStream::from_state(0);
        assert_eq!(draw(&mut inner), 1_013_904_223.0 / TWO_POW_32);
        assert_eq!(inner.state(), 1_013_904_223);
    }
}
