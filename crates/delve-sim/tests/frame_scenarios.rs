//! End-to-end frame scenarios driven only through the public engine API.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use delve_core::commands::{InputEvent, PlayerCommand};
use delve_core::enums::{Key, ProjectileOutcome};
use delve_core::events::FrameEvent;
use delve_core::map::GridMap;
use delve_core::types::{CreaturePosition, PlayerPose};
use delve_sim::sink::FrameSink;
use delve_sim::{SimConfig, SimulationEngine};

fn parse(rows: &[&str]) -> GridMap {
    let rows: Vec<Vec<u8>> = rows
        .iter()
        .map(|row| row.bytes().map(|b| u8::from(b == b'#')).collect())
        .collect();
    GridMap::from_rows(&rows).unwrap()
}

fn ring() -> GridMap {
    parse(&[
        "########",
        "#......#",
        "#......#",
        "#......#",
        "#......#",
        "#......#",
        "#......#",
        "########",
    ])
}

/// Walled room with `open_rows x open_cols` floor cells.
fn open_room(open_rows: usize, open_cols: usize) -> GridMap {
    let mut rows = vec![vec![1u8; open_cols + 2]; open_rows + 2];
    for row in rows.iter_mut().take(open_rows + 1).skip(1) {
        for cell in row.iter_mut().take(open_cols + 1).skip(1) {
            *cell = 0;
        }
    }
    GridMap::from_rows(&rows).unwrap()
}

#[derive(Default)]
struct Recorded {
    poses: Vec<PlayerPose>,
    creatures: Vec<Vec<CreaturePosition>>,
}

struct RecordingSink(Rc<RefCell<Recorded>>);

impl FrameSink for RecordingSink {
    fn emit_pose(&mut self, pose: &PlayerPose) {
        self.0.borrow_mut().poses.push(*pose);
    }

    fn emit_creatures(&mut self, creatures: &[CreaturePosition]) {
        self.0.borrow_mut().creatures.push(creatures.to_vec());
    }
}

#[test]
fn forward_into_wall_stops_at_contact() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::LoadMap { map: ring() });
    let snap = engine.tick();
    // Spawn cell (1, 1) of an 8x8 grid.
    assert_eq!((snap.player.x, snap.player.z), (-6.0, -6.0));

    engine.handle_input(InputEvent::KeyDown { key: Key::Forward });
    let mut last_z = snap.player.z;
    for _ in 0..100 {
        let snap = engine.tick();
        assert!(snap.player.z <= last_z);
        // Wall row 0 ends at z = -7; the player box is 0.3 wide.
        assert!(snap.player.z - 0.3 > -7.0 - 1e-4);
        assert_eq!(snap.player.x, -6.0);
        last_z = snap.player.z;
    }
    assert!(last_z < -6.64, "player stopped early at z = {last_z}");
}

#[test]
fn forward_onto_adjacent_floor_cell() {
    let mut engine = SimulationEngine::new(SimConfig {
        min_creatures: 0,
        max_creatures: 0,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::LoadMap { map: ring() });
    engine.handle_input(InputEvent::PointerCapture { captured: true });
    // Yaw to -pi/2 so forward points along +x, toward cell (1, 2).
    engine.handle_input(InputEvent::PointerDelta {
        dx: FRAC_PI_2 / 0.002,
        dy: 0.0,
    });
    let snap = engine.tick();
    let transform = engine.level().unwrap().transform;
    assert_eq!(
        transform.world_to_cell(snap.player.x, snap.player.z),
        Some((1, 1))
    );
    assert!((snap.player.angle + FRAC_PI_2).abs() < 1e-4);

    engine.handle_input(InputEvent::KeyDown { key: Key::Forward });
    let mut last = snap;
    for _ in 0..60 {
        last = engine.tick();
    }
    assert!((last.player.x - -3.6).abs() < 1e-3, "x = {}", last.player.x);
    assert!((last.player.z - -6.0).abs() < 1e-3);
    assert_eq!(
        transform.world_to_cell(last.player.x, last.player.z),
        Some((1, 2))
    );
}

#[test]
fn projectile_expires_on_its_hundredth_frame() {
    let mut engine = SimulationEngine::new(SimConfig {
        min_creatures: 0,
        max_creatures: 0,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::LoadMap { map: open_room(3, 3) });
    engine.handle_input(InputEvent::PointerCapture { captured: true });
    // Look straight up as far as the clamp allows so the bolt clears the walls.
    engine.handle_input(InputEvent::PointerDelta {
        dx: 0.0,
        dy: -1000.0,
    });
    let snap = engine.tick();
    assert!(snap.pitch > 1.0);

    engine.handle_input(InputEvent::KeyDown { key: Key::Shoot });
    for frame in 1..100 {
        let snap = engine.tick();
        assert_eq!(snap.projectiles.len(), 1, "frame {frame}");
        assert_eq!(snap.projectiles[0].remaining_life, 100 - frame);
    }

    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
    assert!(snap.events.contains(&FrameEvent::ProjectileRetired {
        outcome: ProjectileOutcome::Expired,
        remaining_life: 0,
    }));
}

#[test]
fn creature_count_follows_open_cells() {
    for (map, expected) in [
        (open_room(5, 10), 5),
        (open_room(4, 5), 3),
        (open_room(10, 10), 5),
        (ring(), 3),
        (parse(&["#####", "#...#", "#...#", "#####"]), 3),
    ] {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::LoadMap { map });
        let snap = engine.tick();
        assert_eq!(snap.creatures.len(), expected);
    }
}

#[test]
fn tiny_map_caps_creatures_at_candidates() {
    // Three floor cells, one of them the player's.
    let map = parse(&["#####", "#...#", "#####"]);
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::LoadMap { map });
    let snap = engine.tick();
    assert_eq!(snap.creatures.len(), 2);
}

#[test]
fn idle_then_load() {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.add_sink(Box::new(RecordingSink(Rc::clone(&recorded))));

    for _ in 0..10 {
        let snap = engine.tick();
        assert!(!snap.map_loaded);
    }
    assert!(recorded.borrow().poses.is_empty());

    engine.queue_command(PlayerCommand::LoadMap { map: ring() });
    let snap = engine.tick();
    assert!(snap.map_loaded);
    assert_eq!(snap.time.tick, 10);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, FrameEvent::MapLoaded { creatures: 3, .. })));
}

#[test]
fn sinks_receive_every_loaded_frame() {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.add_sink(Box::new(RecordingSink(Rc::clone(&recorded))));
    engine.queue_command(PlayerCommand::LoadMap { map: ring() });
    engine.handle_input(InputEvent::KeyDown { key: Key::TurnLeft });

    let mut last = None;
    for _ in 0..30 {
        last = Some(engine.tick());
    }
    let last = last.unwrap();

    let recorded = recorded.borrow();
    assert_eq!(recorded.poses.len(), 30);
    assert_eq!(recorded.creatures.len(), 30);
    assert_eq!(recorded.poses.last(), Some(&last.player));
    assert_eq!(recorded.creatures.last(), Some(&last.creatures));

    let indices: Vec<u32> = recorded.creatures[0].iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn command_sender_survives_across_threads() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let sender = engine.command_sender();
    let handle = std::thread::spawn(move || {
        sender.send(PlayerCommand::LoadMap { map: ring() })
    });
    assert!(handle.join().unwrap());

    let snap = engine.tick();
    assert!(snap.map_loaded);
}
