use super::*;

fn sample() -> DataNode {
    DataNode::container(
        "Movies",
        vec![
            DataNode::container(
                "Drama",
                vec![
                    DataNode::leaf("Small", "Drama", 10u64),
                    DataNode::leaf("Big", "Drama", 50u64),
                ],
            ),
            DataNode::container(
                "Action",
                vec![
                    DataNode::leaf("Tie1", "Action", 40u64),
                    DataNode::leaf("Tie2", "Action", 40u64),
                    DataNode::leaf("Tiny", "Action", "1"),
                ],
            ),
        ],
    )
}

fn names(h: &Hierarchy<'_>, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|id| h.node(*id).data.name.clone()).collect()
}

#[test]
fn ids_are_preorder_with_depth_and_height() {
    let data = sample();
    let h = Hierarchy::new(&data);
    assert_eq!(h.len(), 8);
    assert_eq!(
        names(&h, &h.each_before()),
        ["Movies", "Drama", "Small", "Big", "Action", "Tie1", "Tie2", "Tiny"]
    );
    let root = h.node(h.root());
    assert_eq!(root.depth, 0);
    assert_eq!(root.height, 2);
    assert_eq!(h.node(root.children[0]).height, 1);
    assert_eq!(h.node(root.children[0]).depth, 1);
    let leaf = h.node(h.leaves()[0]);
    assert_eq!(leaf.depth, 2);
    assert_eq!(leaf.height, 0);
}

#[test]
fn sum_aggregates_own_and_descendant_values() {
    let data = sample();
    let mut h = Hierarchy::new(&data);
    h.sum_values();
    let root = h.node(h.root());
    assert_eq!(root.value, 141.0);
    assert_eq!(h.node(root.children[0]).value, 60.0);
    assert_eq!(h.node(root.children[1]).value, 81.0);
}

#[test]
fn container_with_own_value_adds_it() {
    let mut data = DataNode::container("Root", vec![DataNode::leaf("A", "C", 5u64)]);
    data.value = Some(7u64.into());
    let mut h = Hierarchy::new(&data);
    h.sum_values();
    assert_eq!(h.node(h.root()).value, 12.0);
}

#[test]
fn sort_is_descending_and_stable() {
    let data = sample();
    let h = Hierarchy::prepare(&data);
    assert_eq!(
        names(&h, &h.leaves()),
        ["Tie1", "Tie2", "Tiny", "Big", "Small"]
    );
    assert_eq!(
        names(&h, &h.descendants()),
        ["Movies", "Action", "Drama", "Tie1", "Tie2", "Tiny", "Big", "Small"]
    );
}

#[test]
fn ancestors_walk_to_root() {
    let data = sample();
    let h = Hierarchy::prepare(&data);
    let tiny = h.leaves()[2];
    assert_eq!(names(&h, &h.ancestors(tiny)), ["Tiny", "Action", "Movies"]);
}

#[test]
fn single_node_tree_is_its_own_leaf() {
    let data = DataNode::leaf("Only", "C", 3u64);
    let h = Hierarchy::prepare(&data);
    assert_eq!(h.leaves(), vec![h.root()]);
    assert_eq!(h.node(h.root()).value, 3.0);
}
