use rand::Rng;
use rand::distr::Distribution;

/// Standard normal distribution sampled with the polar form of the
/// Box-Muller transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolarNormal;

impl Distribution<f64> for PolarNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        loop {
            let u: f64 = rng.random_range(-1.0..1.0);
            let v = rng.random_range(-1.0..1.0);
            let r = u * u + v * v;
            // Accept only points inside the unit disk, excluding the
            // origin so ln(r) stays finite. The companion value
            // v * sqrt(-2 ln(r) / r) is an independent standard normal
            // that we discard.
            if r < 1.0 && r != 0.0 {
                return u * (-2.0 * r.ln() / r).sqrt();
            }
        }
    }
}

/// Normal distribution with arbitrary mean and standard deviation,
/// backed by [`PolarNormal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    pub mean: f64,
    pub std_dev: f64,
}

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

impl Distribution<f64> for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.mean + self.std_dev * PolarNormal.sample(rng)
    }
}
