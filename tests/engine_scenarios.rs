use std::{cell::RefCell, rc::Rc};

use voxel_sandbox::{
    BlockType, CameraMode, EngineConfig, EngineState, Frame, InputEvent, InventoryStore, Renderer,
    TerrainMethod,
};
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

const DT: Duration = Duration::from_millis(16);

/// Records what each submitted frame highlighted.
#[derive(Clone, Default)]
struct RecordingRenderer {
    highlights: Rc<RefCell<Vec<Option<(i32, i32, i32)>>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.highlights
            .borrow_mut()
            .push(frame.highlight.map(|p| (p.x, p.y, p.z)));
    }
}

fn flat_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.terrain.method = TerrainMethod::Flat;
    config.terrain.flat_height = 10;
    config.terrain.tree_probability = 0.0;
    config.world.chunk_radius = 1;
    config
}

fn land(engine: &mut EngineState) {
    for _ in 0..1000 {
        engine.tick(DT);
        if engine.player().is_grounded() {
            return;
        }
    }
    panic!("player never landed");
}

#[test]
fn dig_then_build_session() {
    let renderer = RecordingRenderer::default();
    let highlights = renderer.highlights.clone();
    let mut engine = EngineState::new(flat_config(), Box::new(renderer));

    engine.push_input(InputEvent::PointerLockChanged(true));
    land(&mut engine);
    let eye = engine.player().position;
    assert!(eye.y - engine.player().config().foot_offset >= 10.0);

    engine.push_input(InputEvent::MouseMotion {
        delta_x: 0.0,
        delta_y: 1000.0,
    });
    engine.tick(DT);
    assert!(engine.camera().forward().y < -0.99);
    assert_eq!(highlights.borrow().last().copied().flatten(), Some((0, 9, 0)));

    engine.push_input(InputEvent::MouseDown(MouseButton::Left));
    engine.tick(DT);
    assert_eq!(engine.world().get_block(0, 9, 0), BlockType::AIR);
    assert_eq!(engine.inventory().count_of("grass"), 65);

    land(&mut engine);
    engine.tick(DT);
    let target = engine.targeted_block().expect("ground below");
    assert_eq!(target.position.y, 8);

    engine.push_input(InputEvent::KeyDown(KeyCode::Digit3));
    engine.push_input(InputEvent::MouseDown(MouseButton::Right));
    engine.tick(DT);
    let placed = target.placement;
    assert_eq!(
        engine.world().get_block(placed.x, placed.y, placed.z),
        BlockType::STONE
    );
    assert_eq!(engine.inventory().count_of("stone"), 63);
    assert_eq!(engine.selected_block(), BlockType::STONE);
}

#[test]
fn input_is_ignored_until_pointer_is_locked() {
    let mut engine = EngineState::new(flat_config(), Box::new(RecordingRenderer::default()));
    land(&mut engine);
    let start = engine.player().position;

    engine.push_input(InputEvent::KeyDown(KeyCode::KeyW));
    engine.push_input(InputEvent::KeyDown(KeyCode::Space));
    engine.push_input(InputEvent::MouseMotion {
        delta_x: 500.0,
        delta_y: 0.0,
    });
    for _ in 0..20 {
        engine.tick(DT);
    }

    assert_eq!(engine.player().position.x, start.x);
    assert_eq!(engine.player().position.z, start.z);
    assert!(engine.player().is_grounded());
    assert_eq!(engine.camera().yaw.0, 0.0);
}

#[test]
fn jumping_leaves_the_ground_and_lands_again() {
    let mut engine = EngineState::new(flat_config(), Box::new(RecordingRenderer::default()));
    engine.push_input(InputEvent::PointerLockChanged(true));
    land(&mut engine);
    let ground_eye = engine.player().position.y;

    engine.push_input(InputEvent::KeyDown(KeyCode::Space));
    engine.tick(DT);
    assert!(!engine.player().is_grounded());
    assert!(engine.player().position.y > ground_eye);

    land(&mut engine);
    assert!((engine.player().position.y - ground_eye).abs() < 0.5);
}

#[test]
fn third_person_keeps_targeting_from_the_eye() {
    let renderer = RecordingRenderer::default();
    let highlights = renderer.highlights.clone();
    let mut engine = EngineState::new(flat_config(), Box::new(renderer));
    engine.push_input(InputEvent::PointerLockChanged(true));
    land(&mut engine);
    engine.push_input(InputEvent::MouseMotion {
        delta_x: 0.0,
        delta_y: 1000.0,
    });
    engine.tick(DT);
    let first_person = highlights.borrow().last().copied().flatten();

    engine.push_input(InputEvent::KeyDown(KeyCode::KeyF));
    engine.tick(DT);
    assert_eq!(engine.camera().mode, CameraMode::ThirdPerson);
    assert_eq!(highlights.borrow().last().copied().flatten(), first_person);
}
