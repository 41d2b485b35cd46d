/// Injected randomness for the generator.
///
/// Every random decision the engine makes goes through a `RandomSource`,
/// so a seeded `StdRng` gives reproducible ideas and tests can script
/// the exact draws.
use rand::rngs::StdRng;
use rand::Rng;

pub trait RandomSource {
    /// A uniformly random index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// A uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// True with the given probability.
    fn roll(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }
}

impl RandomSource for StdRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn next_unit(&mut self) -> f32 {
        self.gen::<f32>()
    }
}
