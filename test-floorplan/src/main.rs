// Sample floor-plan documents for the room topology backend
use anyhow::Result;
use room_topology::{create_floor_model, FloorPlan, Point, TopologyConfig, Wall};
use std::fs;

fn main() -> Result<()> {
    println!("🏗️  Floor Plan Room Topology Samples");
    println!("====================================\n");

    let config = TopologyConfig::default();

    println!("📋 Case 1: Two rooms sharing a wall");
    save_plan("two_rooms", two_rooms(), &config)?;

    println!("\n📋 Case 2: Outer walls around a free-standing inner ring");
    save_plan("inner_ring", inner_ring(), &config)?;

    println!("\n📋 Case 3: Square split by a diagonal wall");
    save_plan("diagonal", diagonal(), &config)?;

    println!("\n📋 Case 4: Open plan (one wall missing)");
    save_plan("open_plan", open_plan(), &config)?;

    println!("\n✅ All sample plans generated!");
    println!("\n🚀 To try them:");
    println!("   1. Start server: cargo run --release --bin floorplan-backend");
    println!("   2. Upload and derive rooms:");
    println!("      curl -X PUT http://localhost:3000/plans/two_rooms \\");
    println!("           -H 'Content-Type: application/json' \\");
    println!("           -d @data/two_rooms.json");
    println!("      curl -X POST http://localhost:3000/plans/two_rooms/rooms | jq");

    Ok(())
}

/// Plan from corner coordinates and walls given as index pairs.
fn plan(corners: &[(f64, f64)], walls: &[(usize, usize)]) -> FloorPlan {
    let points: Vec<Point> = corners.iter().map(|&(x, z)| Point::new(x, z)).collect();
    let walls = walls
        .iter()
        .map(|&(a, b)| Wall::new(points[a].coord(), points[b].coord()))
        .collect();

    FloorPlan {
        points,
        walls,
        rooms: vec![],
    }
}

/// Living room (0..3) and bedroom (3..7), 5 m deep
fn two_rooms() -> FloorPlan {
    plan(
        &[(0.0, 0.0), (3.0, 0.0), (7.0, 0.0), (7.0, 5.0), (3.0, 5.0), (0.0, 5.0)],
        &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4)],
    )
}

/// A 10 x 10 hall with a 4 x 4 pillar box that touches no outer wall
fn inner_ring() -> FloorPlan {
    plan(
        &[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (3.0, 3.0),
            (7.0, 3.0),
            (7.0, 7.0),
            (3.0, 7.0),
        ],
        &[(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (5, 6), (6, 7), (7, 4)],
    )
}

fn diagonal() -> FloorPlan {
    plan(
        &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
        &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
    )
}

fn open_plan() -> FloorPlan {
    plan(
        &[(0.0, 0.0), (6.0, 0.0), (6.0, 4.0), (0.0, 4.0)],
        &[(0, 1), (1, 2), (2, 3)],
    )
}

fn save_plan(name: &str, mut plan: FloorPlan, config: &TopologyConfig) -> Result<()> {
    let topology = create_floor_model(&mut plan, config)?;

    fs::create_dir_all("data")?;
    let filename = format!("data/{}.json", name);
    fs::write(&filename, serde_json::to_string_pretty(&plan)?)?;

    println!("   ✅ Saved: {}", filename);
    println!("   📊 Points: {}, walls: {}", plan.points.len(), plan.walls.len());
    println!("   🏠 Rooms: {}", topology.floor.surfaces.len());
    for surface in &topology.floor.surfaces {
        println!(
            "      centre ({:.2}, {:.2}), area {:.2} m², texture {}",
            surface.center.x, surface.center.y, surface.area, surface.texture
        );
    }

    Ok(())
}
