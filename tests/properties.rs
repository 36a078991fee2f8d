//! Both storages checked against brute force and against each other on random point sets.

use proptest::prelude::*;

use quadtree::prelude::*;

fn bounds() -> Aabb {
    Aabb::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
}

/// Coordinates on a half unit grid, so duplicates and points on dividing lines show up often.
fn coord() -> impl Strategy<Value = f32> {
    (0u16..=200).prop_map(|v| v as f32 / 2.0)
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

/// A coarse grid, so removals often hit something.
fn grid_point() -> impl Strategy<Value = Point> {
    (0u8..=8, 0u8..=8).prop_map(|(x, y)| Point::new(x as f32 * 12.5, y as f32 * 12.5))
}

fn outside() -> impl Strategy<Value = f32> {
    prop_oneof![-1000.0f32..-0.001, 100.001f32..1000.0]
}

fn config() -> impl Strategy<Value = QuadtreeConfig> {
    (1usize..=6, 0usize..=8).prop_map(|(capacity, depth)| {
        QuadtreeConfig::default()
            .with_node_capacity(capacity)
            .with_max_depth(depth)
    })
}

fn build<S: SpatialIndex<u32>>(mut tree: S, points: &[Point]) -> S {
    for (i, p) in points.iter().enumerate() {
        assert!(tree.insert(i as u32, *p));
    }

    tree
}

fn trees(config: QuadtreeConfig, points: &[Point]) -> (Quadtree<u32>, LinearQuadtree<u32>) {
    let owned = Quadtree::with_config(bounds(), config).unwrap();
    let linear = LinearQuadtree::with_config(bounds(), config).unwrap();

    (build(owned, points), build(linear, points))
}

fn sorted_data(found: Vec<&Element<u32>>) -> Vec<u32> {
    let mut data: Vec<_> = found.into_iter().map(|e| e.data).collect();
    data.sort_unstable();
    data
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u32, Point),
    Remove(u32, Point),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..4, grid_point()).prop_map(|(d, p)| Op::Insert(d, p)),
        2 => (0u32..4, grid_point()).prop_map(|(d, p)| Op::Remove(d, p)),
    ]
}

proptest! {
    #[test]
    fn nearest_matches_brute_force(
        points in prop::collection::vec(point(), 0..150),
        target in point(),
        config in config(),
    ) {
        let (owned, linear) = trees(config, &points);

        let expected = points
            .iter()
            .map(|p| p.distance_squared(&target))
            .min_by(f32::total_cmp);

        let got = owned.find_nearest(target).map(|e| e.position.distance_squared(&target));
        prop_assert_eq!(got, expected);

        let got = linear.find_nearest(target).map(|e| e.position.distance_squared(&target));
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn filtered_nearest_matches_brute_force(
        points in prop::collection::vec(point(), 0..150),
        target in point(),
        radius in 0.0f32..80.0,
        config in config(),
    ) {
        let (owned, linear) = trees(config, &points);
        let keep = |data: u32| data % 3 == 0;

        let expected = points
            .iter()
            .enumerate()
            .filter(|&(i, _)| keep(i as u32))
            .map(|(_, p)| p.distance_squared(&target))
            .filter(|&d| d < radius * radius)
            .min_by(f32::total_cmp);

        let got = owned
            .find_nearest_by(target, radius, |e| keep(e.data))
            .map(|e| e.position.distance_squared(&target));
        prop_assert_eq!(got, expected);

        let got = linear
            .find_nearest_by(target, radius, |e| keep(e.data))
            .map(|e| e.position.distance_squared(&target));
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn query_matches_brute_force(
        points in prop::collection::vec(point(), 0..150),
        a in point(),
        b in point(),
        config in config(),
    ) {
        let (owned, linear) = trees(config, &points);

        let region = Aabb::new(
            Point::new(a.x.min(b.x), a.y.min(b.y)),
            Point::new(a.x.max(b.x), a.y.max(b.y)),
        );

        let expected: Vec<u32> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| region.contains(p))
            .map(|(i, _)| i as u32)
            .collect();

        prop_assert_eq!(sorted_data(owned.query(&region)), expected.clone());
        prop_assert_eq!(sorted_data(linear.query(&region)), expected);
    }

    #[test]
    fn insert_then_remove_everything(
        (points, order) in prop::collection::vec(point(), 0..150).prop_flat_map(|points| {
            let n = points.len();
            (Just(points), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        }),
        config in config(),
    ) {
        let (mut owned, mut linear) = trees(config, &points);
        prop_assert_eq!(owned.len(), points.len());
        prop_assert_eq!(linear.len(), points.len());

        for i in order {
            prop_assert!(owned.remove(&(i as u32), points[i]));
            prop_assert!(linear.remove(&(i as u32), points[i]));
        }

        prop_assert_eq!(owned.len(), 0);
        prop_assert_eq!(owned.height(), 1);
        prop_assert_eq!(owned.node_count(), 1);

        prop_assert_eq!(linear.len(), 0);
        prop_assert_eq!(linear.height(), 1);
        prop_assert_eq!(linear.node_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_ignored(
        points in prop::collection::vec(point(), 0..50),
        x in outside(),
        y in prop_oneof![outside(), coord()],
        swap in any::<bool>(),
    ) {
        let (mut owned, mut linear) = trees(QuadtreeConfig::default().with_node_capacity(2), &points);
        let p = if swap { Point::new(y, x) } else { Point::new(x, y) };

        prop_assert!(!owned.insert(0, p));
        prop_assert!(!linear.insert(0, p));
        prop_assert!(!owned.remove(&0, p));
        prop_assert!(!linear.remove(&0, p));
        prop_assert!(owned.find_nearest(p).is_none());
        prop_assert!(linear.find_nearest(p).is_none());

        prop_assert_eq!(owned.len(), points.len());
        prop_assert_eq!(linear.len(), points.len());
    }

    #[test]
    fn storages_agree(ops in prop::collection::vec(op(), 0..200), config in config()) {
        let mut owned = Quadtree::with_config(bounds(), config).unwrap();
        let mut linear = LinearQuadtree::with_config(bounds(), config).unwrap();

        for op in ops {
            let (a, b) = match op {
                Op::Insert(data, p) => (owned.insert(data, p), linear.insert(data, p)),
                Op::Remove(data, p) => (owned.remove(&data, p), linear.remove(&data, p)),
            };

            prop_assert_eq!(a, b);
            prop_assert_eq!(owned.len(), linear.len());
            prop_assert_eq!(owned.elements().len(), owned.len());
            prop_assert_eq!(linear.elements().len(), linear.len());
            prop_assert_eq!(owned.node_count(), linear.node_count());
            prop_assert_eq!(owned.to_string(), linear.to_string());
        }
    }
}
