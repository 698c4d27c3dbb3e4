//! Seeded synthetic GPS tracks.
//!
//! Produces a heading-drift random walk with Gaussian position noise, which
//! looks enough like a recorded walk or ride to exercise simplification:
//! long gentle curves that collapse well, plus jitter that has to be
//! filtered out by the tolerance.

use pathview_core::{Point, Track, TrackError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Metres per degree of latitude (spherical approximation)
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Deterministic random-walk track generator.
pub struct TrackGenerator {
    rng: ChaCha8Rng,

    /// First point of the walk
    start: Point,

    /// Distance covered between samples, in metres
    step_m: f64,

    /// Standard deviation of the heading change per sample, in radians
    turn_std_rad: f64,

    /// Standard deviation of GPS noise, in degrees
    jitter_deg: f64,
}

impl TrackGenerator {
    /// Creates a generator starting in Edmonton's river valley.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            start: Point::new(53.54, -113.5),
            step_m: 5.0,
            turn_std_rad: 0.15,
            jitter_deg: 1e-5,
        }
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    pub fn with_step(mut self, step_m: f64) -> Self {
        self.step_m = step_m;
        self
    }

    /// Sets GPS noise. Zero gives a perfectly smooth walk.
    pub fn with_jitter(mut self, jitter_deg: f64) -> Self {
        self.jitter_deg = jitter_deg;
        self
    }

    /// Generates `count` samples.
    ///
    /// The result goes through the same validation as loaded tracks, so a
    /// walk that wanders off the globe is reported rather than returned.
    pub fn generate(&mut self, count: usize) -> Result<Track, TrackError> {
        // Non-finite settings disable the corresponding noise source
        let turn = Normal::new(0.0, self.turn_std_rad.abs()).ok();
        let jitter = Normal::new(0.0, self.jitter_deg.abs()).ok();

        let mut heading: f64 = self.rng.gen_range(0.0..std::f64::consts::TAU);
        let mut position = self.start;
        let mut points = Vec::with_capacity(count);

        for _ in 0..count {
            let mut sample = position;
            if let Some(noise) = &jitter {
                sample.lat += noise.sample(&mut self.rng);
                sample.lon += noise.sample(&mut self.rng);
            }
            points.push(sample);

            if let Some(turn) = &turn {
                heading += turn.sample(&mut self.rng);
            }
            let d_lat = self.step_m * heading.cos() / METERS_PER_DEG_LAT;
            let d_lon =
                self.step_m * heading.sin() / (METERS_PER_DEG_LAT * position.lat.to_radians().cos());
            position.lat += d_lat;
            position.lon += d_lon;
        }

        Track::new(Some(format!("synthetic-{}", count)), points)
    }
}
