use std::f64::consts::PI;
use std::time::Duration;
use tracing::debug;

/// Randomised pause taken before each page request
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    enabled: bool,
}

impl Pacing {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// The larger of a uniform draw in [0.75, 1.5) s and a normal draw with
    /// mean 2 s and deviation 1 s.
    pub fn delay(&self) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }

        let uniform = 0.75 + fastrand::f64() * 0.75;
        let normal = 2.0 + standard_normal();
        Duration::from_secs_f64(uniform.max(normal))
    }

    pub async fn wait(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            debug!("Waiting {:.2}s before next request", delay.as_secs_f64());
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Box-Muller draw from N(0, 1)
fn standard_normal() -> f64 {
    let u1 = 1.0 - fastrand::f64();
    let u2 = fastrand::f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
