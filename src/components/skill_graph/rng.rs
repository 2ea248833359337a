/// Seed shared by every model build so topology and layout reproduce exactly.
pub const LAYOUT_SEED: u32 = 0x5eed_2b1d;

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MODULUS: f64 = 4_294_967_296.0;

/// Linear congruential generator, modulus 2^32.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: u32,
}

impl Lcg {
	pub fn new(seed: u32) -> Self {
		Self { state: seed }
	}

	pub fn next_u32(&mut self) -> u32 {
		self.state = self
			.state
			.wrapping_mul(MULTIPLIER)
			.wrapping_add(INCREMENT);
		self.state
	}

	/// Uniform in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.next_u32() as f64 / MODULUS
	}

	pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
		lo + (hi - lo) * self.next_f64()
	}

	/// Uniform index in `0..len`; `len` must be non-zero.
	pub fn index(&mut self, len: usize) -> usize {
		((self.next_f64() * len as f64) as usize).min(len - 1)
	}
}
