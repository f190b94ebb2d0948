//! Summary statistics over a population.

use flock_core::{Agent, Bounds, Vec3};

/// Aggregate view of a population between steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulationStats {
    /// Number of agents.
    pub count: usize,
    /// Mean position. Zero for an empty population.
    pub centroid: Vec3,
    /// Mean speed.
    pub mean_speed: f64,
    /// Largest speed.
    pub max_speed: f64,
    /// Tight box around every position, `None` when empty.
    pub extent: Option<Bounds>,
}

impl PopulationStats {
    /// Compute statistics for `agents`.
    pub fn from_agents(agents: &[Agent]) -> Self {
        let Some(first) = agents.first() else {
            return Self {
                count: 0,
                centroid: Vec3::ZERO,
                mean_speed: 0.0,
                max_speed: 0.0,
                extent: None,
            };
        };
        let mut sum = Vec3::ZERO;
        let mut speed_sum = 0.0;
        let mut max_speed = 0.0f64;
        let mut lo = first.position;
        let mut hi = first.position;
        for a in agents {
            sum += a.position;
            let s = a.speed();
            speed_sum += s;
            max_speed = max_speed.max(s);
            lo = lo.min(a.position);
            hi = hi.max(a.position);
        }
        let n = agents.len() as f64;
        Self {
            count: agents.len(),
            centroid: sum / n,
            mean_speed: speed_sum / n,
            max_speed,
            extent: Some(Bounds::new(lo, hi)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_population() {
        let s = PopulationStats::from_agents(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.centroid, Vec3::ZERO);
        assert!(s.extent.is_none());
    }

    #[test]
    fn centroid_speed_and_extent() {
        let agents = [
            Agent::new(Vec3::new(-2.0, 0.0, 1.0), Vec3::new(3.0, 4.0, 0.0)),
            Agent::new(Vec3::new(4.0, 2.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
        ];
        let s = PopulationStats::from_agents(&agents);
        assert_eq!(s.count, 2);
        assert_eq!(s.centroid, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(s.mean_speed, 3.0);
        assert_eq!(s.max_speed, 5.0);
        let b = s.extent.unwrap();
        assert_eq!(b.min, Vec3::new(-2.0, 0.0, 1.0));
        assert_eq!(b.max, Vec3::new(4.0, 2.0, 1.0));
    }
}
