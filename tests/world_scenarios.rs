use voxel_sandbox::{
    BlockType, ChunkPosition, EngineConfig, Ray, RaycastConfig, TerrainConfig, TerrainGenerator,
    World, WorldSnapshot, CHUNK_HEIGHT,
};

use cgmath::{Point3, Vector3};

fn small_world() -> World {
    let mut config = EngineConfig::default();
    config.world.chunk_radius = 1;
    World::new(&config)
}

#[test]
fn edit_at_origin_leaves_neighbour_chunk_as_generated() {
    let mut world = small_world();
    assert!(world.set_block(0, 10, 0, BlockType::STONE));
    assert_eq!(world.get_block(0, 10, 0), BlockType::STONE);

    let generated = TerrainGenerator::new(TerrainConfig::default()).generate(ChunkPosition::new(-1, 0));
    assert_eq!(world.get_block(-1, 10, 0), generated.get_block(15, 10, 0));
}

#[test]
fn boundary_edit_remeshes_only_adjacent_chunks() {
    let mut world = small_world();
    let revision = |world: &World, x, z| {
        world
            .chunk(ChunkPosition::new(x, z))
            .map(|chunk| chunk.mesh_revision())
            .unwrap_or_default()
    };
    let before: Vec<_> = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]
        .iter()
        .map(|&(x, z)| revision(&world, x, z))
        .collect();

    world.set_block(0, 50, 5, BlockType::WOOD);

    assert_eq!(revision(&world, 0, 0), before[0] + 1);
    assert_eq!(revision(&world, -1, 0), before[1] + 1);
    assert_eq!(revision(&world, 1, 0), before[2]);
    assert_eq!(revision(&world, 0, -1), before[3]);
    assert_eq!(revision(&world, 0, 1), before[4]);
}

#[test]
fn reads_outside_generated_chunks_are_air() {
    let world = small_world();
    assert_eq!(world.get_block(1000, 5, 1000), BlockType::AIR);
    assert_eq!(world.get_block(0, -1, 0), BlockType::AIR);
    assert_eq!(world.get_block(0, CHUNK_HEIGHT, 0), BlockType::AIR);
}

#[test]
fn raycast_finds_placed_block_and_misses_open_sky() {
    let mut world = small_world();
    world.set_block(5, 60, 0, BlockType::STONE);
    let config = RaycastConfig::default();

    let ray = Ray::new(Point3::new(0.5, 60.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
    let hit = world.raycast(&ray, &config).expect("block within reach");
    assert_eq!(hit.position, Point3::new(5, 60, 0));
    assert_eq!(hit.placement, Point3::new(4, 60, 0));

    let up = Ray::new(Point3::new(0.5, 60.5, 0.5), Vector3::new(0.0, 1.0, 0.0));
    assert!(world.raycast(&up, &config).is_none());
}

#[test]
fn snapshot_survives_json_and_restores_edits() {
    let mut world = small_world();
    world.set_block(3, 40, 3, BlockType::LEAVES);
    let json = world.snapshot().to_json().unwrap();

    let mut restored = World::empty(TerrainConfig::default());
    let snapshot = WorldSnapshot::from_json(&json).unwrap();
    assert_eq!(restored.load_snapshot(&snapshot).unwrap(), 9);
    assert_eq!(restored.get_block(3, 40, 3), BlockType::LEAVES);
    assert_eq!(restored.snapshot(), world.snapshot());
}

#[test]
fn malformed_snapshot_is_rejected() {
    let mut world = small_world();
    let before = world.snapshot();
    assert!(WorldSnapshot::from_json("{\"chunk_size\": 16}").is_err());

    let mut truncated = before.clone();
    truncated.chunks[4].blocks.pop();
    assert!(world.load_snapshot(&truncated).is_err());
    assert_eq!(world.snapshot(), before);
}
