//! Basic demonstration of the Warpath simulation.
//!
//! Runs a headless skirmish: the player lane spawns a unit every 1.2 seconds
//! and the wave grinds down the enemy base under tower fire.
//!
//! Run with: cargo run --example basic_demo

use warpath_sim::{InputEvent, Side, SimWorld};

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let mut sim = SimWorld::new_skirmish();
    let frame_dt = 1.0 / 30.0;

    println!("=== Warpath - Simulation Demo ===\n");
    print_state(&mut sim);

    // 36 frames = 1.2 s, comfortably past the 1 s spawn cooldown.
    for frame in 0..3600 {
        if frame % 36 == 0 {
            sim.handle_event(InputEvent::SpawnPressed);
        }
        sim.step(frame_dt);

        if (frame + 1) % 150 == 0 {
            println!("--- t={:.1}s (tick {}) ---", sim.current_time(), sim.current_tick());
            print_state(&mut sim);
        }

        if sim.base_health(Side::Enemy) == Some(0.0) {
            println!("\nEnemy base destroyed at t={:.1}s", sim.current_time());
            break;
        }
        if !sim.is_running() {
            break;
        }
    }

    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("snapshot serialization failed: {}", err),
    }
}

fn print_state(sim: &mut SimWorld) {
    let snapshot = sim.snapshot();

    for base in &snapshot.bases {
        println!(
            "  {} base: hp={:.0}/{:.0}{}",
            base.side,
            base.health,
            base.health_max,
            if base.has_tower { " [tower]" } else { "" }
        );
    }
    for unit in &snapshot.units {
        println!(
            "  Unit {}: x={:.0} hp={:.0} {}",
            unit.id,
            unit.x,
            unit.health,
            if unit.attacking { "attacking" } else { "marching" }
        );
    }
}
