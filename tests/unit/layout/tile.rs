use super::*;
use crate::data::model::DataNode;

fn flat(values: &[u64]) -> DataNode {
    DataNode::container(
        "root",
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataNode::leaf(format!("n{i}"), "c", *v))
            .collect(),
    )
}

fn child_rects(h: &Hierarchy<'_>) -> Vec<[f64; 4]> {
    h.node(h.root())
        .children
        .iter()
        .map(|id| {
            let n = h.node(*id);
            [n.x0, n.y0, n.x1, n.y1]
        })
        .collect()
}

#[test]
fn squarify_two_leaves_splits_three_to_one() {
    let data = DataNode::container(
        "Data",
        vec![
            DataNode::leaf("A", "Cat1", 100u64),
            DataNode::leaf("B", "Cat2", 300u64),
        ],
    );
    let mut h = Hierarchy::prepare(&data);
    Squarify::default().tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 1100.0, 700.0));

    // Sorted: B first, laid out as a full-height column on the left.
    assert_eq!(
        child_rects(&h),
        vec![[0.0, 0.0, 825.0, 700.0], [825.0, 0.0, 1100.0, 700.0]]
    );
}

#[test]
fn squarify_covers_the_box_exactly() {
    let data = flat(&[60, 60, 40, 30, 20, 20, 10, 6, 4, 1]);
    let mut h = Hierarchy::prepare(&data);
    Squarify::default().tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 600.0, 400.0));

    let total: f64 = child_rects(&h)
        .iter()
        .map(|[x0, y0, x1, y1]| (x1 - x0) * (y1 - y0))
        .sum();
    assert!((total - 240_000.0).abs() < 1e-6);

    let root_value = h.node(h.root()).value;
    for id in &h.node(h.root()).children {
        let n = h.node(*id);
        let expected = 240_000.0 * n.value / root_value;
        assert!((n.rect().area() - expected).abs() < 1e-6);
    }
}

#[test]
fn squarify_tolerates_zero_weights() {
    let data = flat(&[0, 5, 0, 0]);
    let mut h = Hierarchy::prepare(&data);
    Squarify::default().tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 100.0, 100.0));
    let rects = child_rects(&h);
    assert_eq!(rects[0], [0.0, 0.0, 100.0, 100.0]);
    for r in &rects[1..] {
        assert_eq!((r[2] - r[0]) * (r[3] - r[1]), 0.0);
    }
}

#[test]
fn squarify_ratio_is_clamped() {
    assert_eq!(Squarify::with_ratio(0.5).ratio(), 1.0);
    assert_eq!(Squarify::with_ratio(f64::NAN).ratio(), 1.0);
    assert_eq!(Squarify::with_ratio(2.0).ratio(), 2.0);
    assert_eq!(Squarify::default().ratio(), PHI);
}

#[test]
fn slice_and_dice_split_along_one_axis() {
    let data = flat(&[1, 2, 1]);
    let mut h = Hierarchy::new(&data);
    h.sum_values();

    Slice.tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 40.0, 100.0));
    assert_eq!(
        child_rects(&h),
        vec![
            [0.0, 0.0, 40.0, 25.0],
            [0.0, 25.0, 40.0, 75.0],
            [0.0, 75.0, 40.0, 100.0]
        ]
    );

    Dice.tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 100.0, 40.0));
    assert_eq!(
        child_rects(&h),
        vec![
            [0.0, 0.0, 25.0, 40.0],
            [25.0, 0.0, 75.0, 40.0],
            [75.0, 0.0, 100.0, 40.0]
        ]
    );

    // The root sits at depth 0, so slice-dice dices it.
    SliceDice.tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 100.0, 40.0));
    assert_eq!(child_rects(&h)[1], [25.0, 0.0, 75.0, 40.0]);
}

#[test]
fn binary_splits_equal_weights_into_quadrants() {
    let data = flat(&[1, 1, 1, 1]);
    let mut h = Hierarchy::prepare(&data);
    Binary.tile(&mut h, NodeId::ROOT, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(
        child_rects(&h),
        vec![
            [0.0, 0.0, 50.0, 50.0],
            [50.0, 0.0, 100.0, 50.0],
            [0.0, 50.0, 50.0, 100.0],
            [50.0, 50.0, 100.0, 100.0]
        ]
    );
}

#[test]
fn create_tile_picks_the_strategy() {
    let tile = create_tile(TileKind::Binary, PHI);
    assert!(format!("{tile:?}").contains("Binary"));
    let tile = create_tile(TileKind::Squarify, 3.0);
    assert!(format!("{tile:?}").contains("3.0"));
    let kind: TileKind = serde_json::from_str("\"slice-dice\"").unwrap();
    assert_eq!(kind, TileKind::SliceDice);
}
