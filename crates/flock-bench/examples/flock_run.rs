//! Run a flock and print its centre of mass as it evolves.
//!
//! Usage: `cargo run -p flock-bench --example flock_run -- [agents] [frames] [steps_per_frame]`
//!
//! Set `RUST_LOG=flock_engine=debug` to see per-step metrics.

use flock_bench::{build_world, Profile};
use flock_engine::{ExecutionConfig, FlockConfig};
use tracing_subscriber::EnvFilter;

fn arg(n: usize, default: u64) -> u64 {
    std::env::args()
        .nth(n)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let agents = arg(1, 1_000) as usize;
    let frames = arg(2, 100);
    let steps_per_frame = arg(3, 4);

    println!("=== Flock: {agents} agents, {frames} frames x {steps_per_frame} steps ===\n");

    let mut world = build_world(Profile {
        config: FlockConfig {
            execution: ExecutionConfig::default(),
            seed: 42,
            ..FlockConfig::default()
        },
        agents,
    });

    for frame in 0..frames {
        world.run(steps_per_frame).unwrap();
        if frame % 10 == 0 || frame + 1 == frames {
            let stats = world.stats();
            let m = world.last_metrics();
            println!(
                "  frame {:>4} (tick {:>5}): centroid=({:>8.3}, {:>8.3}, {:>8.3}) mean_speed={:>6.3} neighbours/agent={:>6.2} step={:>6}μs",
                frame + 1,
                world.current_tick().0,
                stats.centroid.x,
                stats.centroid.y,
                stats.centroid.z,
                stats.mean_speed,
                m.mean_neighbours(),
                m.total_us,
            );
        }
    }

    let total = world.cumulative_metrics();
    println!(
        "\n{} steps, mean {:.1}μs/step, {} speed clamps, {} wraps",
        total.steps,
        total.mean_step_us(),
        total.clamped,
        total.wrapped,
    );
}
