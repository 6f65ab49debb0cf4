use isect2d::{IntersectConfig, Intersector, Strategy, OBB};
use std::f32::consts::PI;
use std::time::Instant;

const N_BOX: usize = 60;
const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

/// Boxes of random sizes laid out on a circle in the middle of the screen.
fn init_boxes() -> Vec<OBB> {
    let step = 2.0 * PI / N_BOX as f32;
    let radius = 200.0;
    let box_size = 1.0 / 0.4;

    (0..N_BOX)
        .map(|i| {
            let r = rand::random::<f32>() * 20.0;
            let a = step * i as f32;
            OBB::new(
                [a.cos() * radius + WIDTH / 2.0, a.sin() * radius + HEIGHT / 2.0],
                r,
                r + box_size * 8.0,
                r * box_size / 3.0 + box_size,
            )
        })
        .collect()
}

fn update(obbs: &mut [OBB], time: f32) {
    for (i, obb) in obbs.iter_mut().enumerate() {
        let r1 = rand::random::<f32>() * 10.0;
        let r2 = rand::random::<f32>() * 20.0;
        let r3 = rand::random::<f32>() * PI;
        let c = obb.center();

        if i % 2 == 0 {
            obb.move_to(c.x, c.y + 0.2 * (time * 0.25).cos() * r2);
            obb.rotate(r3.cos() * 0.1 + obb.angle());
        } else {
            obb.move_to(c.x + time.cos() * r1, c.y);
            obb.rotate(r2.cos() * 0.1 + obb.angle());
        }
    }
}

fn main() {
    let mut obbs = init_boxes();
    let mut isects: Vec<Intersector> = Strategy::ALL
        .iter()
        .map(|&s| {
            Intersector::new(IntersectConfig::default().strategy(s)).expect("valid config")
        })
        .collect();

    for tick in 0..50 {
        update(&mut obbs, tick as f32 * 0.1);

        let mut line = format!("tick {:2}:", tick);
        let mut found = None;
        for isect in isects.iter_mut() {
            let start = Instant::now();
            let pairs = isect.intersect(&obbs);
            let t = start.elapsed();

            line.push_str(&format!(
                " {} {:>6}us",
                isect.config().strategy,
                t.as_micros()
            ));
            match &found {
                None => found = Some(pairs),
                Some(p) => assert_eq!(p, &pairs, "strategies disagree"),
            }
        }

        let pairs = found.unwrap_or_default();
        println!("{} | {} intersecting pairs", line, pairs.len());
    }

    let bvh = isects[0].bvh(&obbs);
    println!(
        "final bvh: {} nodes, {} leaves, depth {}",
        bvh.len(),
        bvh.leaf_count(),
        bvh.depth()
    );
}
