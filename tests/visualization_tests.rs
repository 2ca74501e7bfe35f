use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_dashboard::domains::agent::Agent;
use swarm_dashboard::domains::geometry::Position3D;
use swarm_dashboard::domains::grid::GridCoord;
use swarm_dashboard::domains::simulation::{SimulationController, SimulationSettings};
use swarm_dashboard::domains::topology::Topology;
use swarm_dashboard::domains::visualization::*;

fn agent_at(id: u32, x: usize, y: usize) -> Agent {
    Agent { position: GridCoord::new(x, y), ..Agent::new(id) }
}

#[test]
fn test_camera_presets() {
    assert_eq!("top".parse::<CameraView>().unwrap(), CameraView::Top);
    assert_eq!("45deg".parse::<CameraView>().unwrap(), CameraView::Diagonal);
    assert_eq!("side".parse::<CameraView>().unwrap(), CameraView::Side);
    assert_eq!("anything".parse::<CameraView>().unwrap(), CameraView::Overview);

    let camera = Camera::for_view(CameraView::Top);
    assert_eq!(camera.position, Position3D::new(0.0, 20.0, 0.0));
    assert_eq!(camera.fov, DEFAULT_FOV);
    assert_eq!(Camera::for_view(CameraView::default()).position, Position3D::new(20.0, 20.0, 20.0));
}

#[test]
fn test_topology_scene_has_sphere_per_node_and_line_per_edge() {
    let mut rng = StdRng::seed_from_u64(21);
    let topology = Topology::generate(7, &mut rng);
    let scene = topology_scene(&topology);

    assert_eq!(scene.spheres().count(), 7);
    assert_eq!(scene.lines_with_color(Color::Gray), topology.edge_count());
    assert_eq!(scene.camera, Camera::topology());
}

#[test]
fn test_agents_in_range_lists_each_pair_once() {
    let agents = vec![agent_at(1, 0, 0), agent_at(2, 2, 0), agent_at(3, 9, 9)];

    let pairs = agents_in_range(&agents, 3.0);
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].0.id, pairs[0].1.id), (1, 2));
    assert!(agents_in_range(&agents, 1.0).is_empty());
    assert_eq!(agents_in_range(&agents, 20.0).len(), 3);
}

#[test]
fn test_grid_scene_layout() {
    let settings = SimulationSettings { grid_size: 6, agent_count: 2, obstacle_probability: 0.0, connection_radius: 3.0 };
    let mut c = SimulationController::new(settings, StdRng::seed_from_u64(2));
    c.load_paths("1,1 2,2\n1,2 2,3").unwrap();
    c.start().unwrap();
    c.tick();
    let scene = grid_scene(&c.snapshot());

    // 36 cells, a base station and two agents
    assert_eq!(scene.spheres().count(), 36 + 1 + 2);
    assert_eq!(scene.lines_with_color(Color::Green), 2);
    assert_eq!(scene.lines_with_color(Color::Cyan), 1);

    let yellow = scene
        .spheres()
        .filter(|p| matches!(p, Primitive::Sphere { color: Color::Yellow, .. }))
        .count();
    assert_eq!(yellow, 2);

    let base = scene
        .spheres()
        .find_map(|p| match p {
            Primitive::Sphere { label: Some(label), position, .. } if label == "Base Station" => Some(*position),
            _ => None,
        })
        .unwrap();
    assert_eq!(base, Position3D::new(-3.0, 0.5, -3.0));
}

#[test]
fn test_obstacles_render_red() {
    let settings = SimulationSettings { grid_size: 5, agent_count: 1, obstacle_probability: 1.0, connection_radius: 3.0 };
    let c = SimulationController::new(settings, StdRng::seed_from_u64(2));
    let scene = grid_scene(&c.snapshot());

    let red = scene
        .spheres()
        .filter(|p| matches!(p, Primitive::Sphere { color: Color::Red, .. }))
        .count();
    assert_eq!(red, 25);
}

#[test]
fn test_information_transfer_scene_places_agents_on_ring() {
    let agents = Agent::roster(4);
    let mut rng = StdRng::seed_from_u64(8);
    let scene = information_transfer_scene(&agents, Camera::for_view(CameraView::Side), &mut rng);

    assert_eq!(scene.spheres().count(), 4);
    assert!(scene.lines().count() <= 6);
    for sphere in scene.spheres() {
        if let Primitive::Sphere { position, .. } = sphere {
            let planar = (position.x * position.x + position.z * position.z).sqrt();
            assert!((planar - TRANSFER_RING_RADIUS).abs() < 1e-9);
            assert!((-1.0..1.0).contains(&position.y));
        }
    }
}

#[test]
fn test_scene_serializes_with_kind_tags() {
    let mut rng = StdRng::seed_from_u64(4);
    let scene = topology_scene(&Topology::generate(2, &mut rng));
    let json = serde_json::to_value(&scene).unwrap();

    assert_eq!(json["primitives"][0]["kind"], "sphere");
    assert_eq!(json["primitives"][0]["label"], "Node 0");
    assert_eq!(json["primitives"][2]["kind"], "line");
}
