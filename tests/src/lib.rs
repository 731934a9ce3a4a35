#[cfg(test)]
mod tests {
    use geo_types::{Coord, Line, LineString, Point};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use road_connect::*;

    const SEEDS: u64 = 20;

    fn random_point(rng: &mut StdRng) -> Point<f64> {
        Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0))
    }

    fn random_road(rng: &mut StdRng, id: Id) -> Road {
        let start = random_point(rng);
        let mut at = start.0;
        let geom = LineString::from_iter((0..rng.random_range(2..8)).map(|_| {
            let c = at;
            at = Coord {
                x: at.x + rng.random_range(-15.0..15.0),
                y: at.y + rng.random_range(-15.0..15.0),
            };
            c
        }));
        Road::new(id, geom)
    }

    // ids are spread out and not in insertion order
    fn random_roads(rng: &mut StdRng) -> Roads {
        let n = rng.random_range(1..60);
        (0..n).map(|i| random_road(rng, (n - i) * 7 + 3)).collect()
    }

    fn random_buildings(rng: &mut StdRng, n: u64) -> Buildings {
        (0..n)
            .map(|i| Building::new(i * 13 % 1009, random_point(rng)))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn index_agrees_with_brute_force() {
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let roads = random_roads(&mut rng);
            let index = RoadIndex::build(&roads).expect("random roads are valid");
            let scan = LinearScan::build(&roads).expect("random roads are valid");

            for _ in 0..200 {
                let p = random_point(&mut rng);
                assert_eq!(index.nearest(&p), scan.nearest(&p), "seed {seed}, point {p:?}");
            }
        }
    }

    #[test]
    fn projection_stays_on_segment() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..2000 {
            let (a, b, p) = (random_point(&mut rng), random_point(&mut rng), random_point(&mut rng));
            let proj = project(p, Line::new(a, b));

            let to_a = distance(p, a);
            let to_b = distance(p, b);
            assert!(proj.distance <= to_a * (1.0 + 1e-12), "{proj:?} farther than {a:?}");
            assert!(proj.distance <= to_b * (1.0 + 1e-12), "{proj:?} farther than {b:?}");

            // on [a, b]: the two halves add up to the whole
            let whole = distance(a, b);
            let halves = distance(a, proj.point) + distance(proj.point, b);
            assert!(close(whole, halves), "{proj:?} is off [{a:?}, {b:?}]");
        }
    }

    #[test]
    fn connectors_end_on_the_nearest_road() {
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let roads = random_roads(&mut rng);
            let buildings = random_buildings(&mut rng, 100);
            let out = join(&roads, &buildings).expect("random input is valid");
            assert_eq!(out.len(), buildings.len());

            for c in out.iter() {
                let (_, geom) = roads
                    .iter()
                    .find(|(id, _)| *id == c.road_id)
                    .expect("road exists");
                let on_road = closest_on_polyline(c.to, geom).expect("valid road");
                assert!(on_road.distance <= 1e-9, "{c:?} does not end on its road");

                let best = roads
                    .iter()
                    .filter_map(|(_, g)| closest_on_polyline(c.from, g))
                    .map(|p| p.distance)
                    .fold(f64::INFINITY, f64::min);
                assert!(close(c.length(), best), "{c:?} is not the shortest");
            }
        }
    }

    #[test]
    fn join_is_idempotent_and_parallel_safe() {
        let parallel = JoinConf {
            parallel: true,
            ..JoinConf::default()
        };
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let roads = random_roads(&mut rng);
            let buildings = random_buildings(&mut rng, 300);

            let first = join(&roads, &buildings).expect("random input is valid");
            let second = join(&roads, &buildings).expect("random input is valid");
            let threaded = join_with(&roads, &buildings, &parallel).expect("random input is valid");
            assert_eq!(first, second);
            assert_eq!(first, threaded);
            assert!(first.building_id.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
