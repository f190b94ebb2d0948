//! Integration phase: apply force, cap speed, move, wrap.

use std::iter::Sum;
use std::ops::Add;

use flock_core::{Agent, Bounds, Environment, Vec3};

use crate::executor::Executor;

/// What happened to one agent (or, summed, to a population) during
/// integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationTally {
    /// Agents whose speed was capped at `max_speed`.
    pub clamped: u64,
    /// Agents that crossed at least one face of the bounds.
    pub wrapped: u64,
}

impl Add for IntegrationTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            clamped: self.clamped + rhs.clamped,
            wrapped: self.wrapped + rhs.wrapped,
        }
    }
}

impl Sum for IntegrationTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Explicit Euler step with a speed cap and toroidal teleport at the
/// domain faces.
///
/// Per agent:
///
/// ```text
/// v' = v + f
/// if |v'| > max_speed:  v' *= max_speed / |v'|
/// p' = p + v'
/// per axis:  if p' < min { p' = max }
///            if p' > max { p' = min }
/// f  = 0
/// ```
///
/// The two axis tests are independent `if`s. With `min < max` (checked
/// by [`Environment::validate`]) at most one of them fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    max_speed: f64,
    bounds: Bounds,
}

impl Integrator {
    /// Integrator with the given speed cap and domain.
    pub fn new(max_speed: f64, bounds: Bounds) -> Self {
        Self { max_speed, bounds }
    }

    /// Integrator configured from `env`.
    pub fn from_environment(env: &Environment) -> Self {
        Self::new(env.max_speed, env.bounds)
    }

    /// Kernel name for logs.
    pub fn name(&self) -> &str {
        "integrate"
    }

    /// Advance one agent in place.
    pub fn integrate(&self, agent: &mut Agent) -> IntegrationTally {
        let mut tally = IntegrationTally::default();

        let mut velocity = agent.velocity + agent.force;
        let speed = velocity.length();
        if speed > self.max_speed {
            velocity *= self.max_speed / speed;
            tally.clamped = 1;
        }

        let mut position = agent.position + velocity;
        let (lo, hi) = (self.bounds.min, self.bounds.max);
        let mut wrapped = false;
        for axis in 0..3 {
            if position[axis] < lo[axis] {
                position[axis] = hi[axis];
                wrapped = true;
            }
            if position[axis] > hi[axis] {
                position[axis] = lo[axis];
                wrapped = true;
            }
        }
        tally.wrapped = u64::from(wrapped);

        agent.position = position;
        agent.velocity = velocity;
        agent.force = Vec3::ZERO;
        tally
    }

    /// Advance every agent.
    pub fn run(&self, executor: &Executor, agents: &mut [Agent]) -> IntegrationTally {
        executor.sum_each_mut(agents, |_, agent| self.integrate(agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn integrator() -> Integrator {
        Integrator::new(2.0, Bounds::cube(-100.0, 100.0))
    }

    #[test]
    fn force_added_then_moved() {
        let mut a = Agent::new(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0));
        a.force = Vec3::new(0.0, 0.5, 0.0);
        let t = integrator().integrate(&mut a);
        assert_eq!(a.velocity, Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(a.position, Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(a.force, Vec3::ZERO);
        assert_eq!(t, IntegrationTally::default());
    }

    #[test]
    fn speed_capped_direction_kept() {
        let mut a = Agent::new(Vec3::ZERO, Vec3::ZERO);
        a.force = Vec3::new(3.0, 4.0, 0.0);
        let t = integrator().integrate(&mut a);
        assert!((a.velocity - Vec3::new(1.2, 1.6, 0.0)).length() < 1e-12);
        assert_eq!(t.clamped, 1);
    }

    #[test]
    fn zero_velocity_untouched() {
        let mut a = Agent::new(Vec3::splat(3.0), Vec3::ZERO);
        integrator().integrate(&mut a);
        assert_eq!(a.velocity, Vec3::ZERO);
        assert_eq!(a.position, Vec3::splat(3.0));
    }

    #[test]
    fn zero_max_speed_stops_agent() {
        let mut a = Agent::new(Vec3::ZERO, Vec3::X);
        Integrator::new(0.0, Bounds::default()).integrate(&mut a);
        assert_eq!(a.velocity, Vec3::ZERO);
        assert_eq!(a.position, Vec3::ZERO);
    }

    #[test]
    fn beyond_max_wraps_to_min() {
        let mut a = Agent::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let t = Integrator::new(2.0, Bounds::cube(-10.0, 10.0)).integrate(&mut a);
        assert_eq!(a.position, Vec3::new(-10.0, 0.0, 0.0));
        assert_eq!(t.wrapped, 1);
    }

    #[test]
    fn small_overshoot_lands_on_opposite_face() {
        // Teleport: the overshoot is not carried across.
        let mut a = Agent::new(Vec3::new(0.0, 0.0, 9.9), Vec3::new(0.0, 0.0, 0.2));
        Integrator::new(2.0, Bounds::cube(-10.0, 10.0)).integrate(&mut a);
        assert_eq!(a.position.z, -10.0);
    }

    #[test]
    fn below_min_wraps_to_max() {
        let mut a = Agent::new(Vec3::new(0.0, -9.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        Integrator::new(2.0, Bounds::cube(-10.0, 10.0)).integrate(&mut a);
        assert_eq!(a.position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn landing_on_face_does_not_wrap() {
        let mut a = Agent::new(Vec3::new(9.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let t = Integrator::new(2.0, Bounds::cube(-10.0, 10.0)).integrate(&mut a);
        assert_eq!(a.position.x, 10.0);
        assert_eq!(t.wrapped, 0);
    }

    #[test]
    fn tally_sums() {
        let mut agents = vec![
            Agent::new(Vec3::ZERO, Vec3::splat(5.0)),
            Agent::new(Vec3::splat(99.5), Vec3::splat(1.0)),
            Agent::new(Vec3::ZERO, Vec3::ZERO),
        ];
        let t = integrator().run(&Executor::Serial, &mut agents);
        assert_eq!(t, IntegrationTally { clamped: 1, wrapped: 1 });
    }

    fn component() -> impl Strategy<Value = f64> {
        -50.0f64..50.0
    }

    fn vec3() -> impl Strategy<Value = Vec3> {
        (component(), component(), component()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn speed_never_exceeds_cap(v in vec3(), f in vec3(), cap in 0.0f64..10.0) {
            let mut a = Agent::new(Vec3::ZERO, v);
            a.force = f;
            let before = (v + f).normalize_or_zero();
            Integrator::new(cap, Bounds::cube(-1e6, 1e6)).integrate(&mut a);
            prop_assert!(a.speed() <= cap + 1e-9);
            if a.speed() > 1e-9 {
                prop_assert!((a.velocity.normalize() - before).length() < 1e-9);
            }
        }

        #[test]
        fn repeated_steps_stay_in_bounds(
            p in vec3(),
            v in vec3(),
            steps in 1usize..200,
        ) {
            let bounds = Bounds::cube(-50.0, 50.0);
            let integ = Integrator::new(20.0, bounds);
            let mut a = Agent::new(p, v);
            for _ in 0..steps {
                integ.integrate(&mut a);
                prop_assert!(bounds.contains(a.position), "{:?} left {:?}", a.position, bounds);
            }
        }
    }
}
