//! Property-based tests for the partition layout and zoom controller.
//!
//! Trees are generated with positive leaf weights, up to four levels deep.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use birdring::data::Node;
use birdring::engine::sunburst::zoom_target;
use birdring::render::layout::{compute_partition, NodeId, Partition};
use birdring::render::visibility::{arc_visible, label_visible};
use birdring::{ChartConfig, Sunburst};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

/// Strategy for generating a tree with positive leaf weights
fn arb_tree() -> impl Strategy<Value = Node> {
    let leaf = (1u32..20).prop_map(|v| Node::leaf("leaf", v as f64));
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop::collection::vec(inner, 1..5).prop_map(|children| Node::branch("branch", children))
    })
}

fn leaf_sum(node: &Node) -> f64 {
    if node.is_leaf() {
        node.leaf_value()
    } else {
        node.children().iter().map(leaf_sum).sum()
    }
}

fn internal_nodes(p: &Partition) -> Vec<NodeId> {
    p.descendants()
        .filter(|n| n.has_children())
        .map(|n| n.id)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn children_tile_parent(tree in arb_tree()) {
        let p = compute_partition(&tree).unwrap();
        for node in p.descendants().filter(|n| n.has_children()) {
            let sum: f64 = node.children.iter().map(|c| p[*c].extent.angle_span()).sum();
            prop_assert!((sum - node.extent.angle_span()).abs() < EPS);
            for c in &node.children {
                let e = p[*c].extent;
                prop_assert!(e.x1 >= e.x0);
                prop_assert!(e.x0 >= node.extent.x0 - EPS && e.x1 <= node.extent.x1 + EPS);
                prop_assert_eq!(e.y0, (node.depth + 1) as f64);
            }
        }
    }

    #[test]
    fn root_value_is_leaf_sum(tree in arb_tree()) {
        let p = compute_partition(&tree).unwrap();
        prop_assert!((p.root().value - leaf_sum(&tree)).abs() < EPS);
        prop_assert!((p.root().extent.angle_span() - TAU).abs() < EPS);
    }

    #[test]
    fn siblings_non_increasing(tree in arb_tree()) {
        let p = compute_partition(&tree).unwrap();
        for node in p.descendants() {
            for pair in node.children.windows(2) {
                prop_assert!(p[pair[0]].value >= p[pair[1]].value);
            }
        }
    }

    #[test]
    fn layout_is_deterministic(tree in arb_tree()) {
        let a = compute_partition(&tree).unwrap();
        let b = compute_partition(&tree).unwrap();
        for (x, y) in a.descendants().zip(b.descendants()) {
            prop_assert_eq!(x.extent, y.extent);
            prop_assert_eq!(arc_visible(&x.extent), arc_visible(&y.extent));
            prop_assert_eq!(label_visible(&x.extent), label_visible(&y.extent));
        }
    }

    #[test]
    fn targets_stay_on_circle(tree in arb_tree(), pick in any::<prop::sample::Index>()) {
        let p = compute_partition(&tree).unwrap();
        let focus = &p[NodeId(pick.index(p.len()))];
        prop_assume!(focus.extent.angle_span() > 0.0);

        let t = zoom_target(&focus.extent, &focus.extent, focus.depth);
        prop_assert!(t.x0.abs() < EPS);
        prop_assert!((t.x1 - TAU).abs() < EPS);
        prop_assert_eq!(t.y0, 0.0);

        for node in p.descendants() {
            let t = zoom_target(&node.extent, &focus.extent, focus.depth);
            prop_assert!(t.x0 >= 0.0 && t.x0 <= TAU);
            prop_assert!(t.x1 >= 0.0 && t.x1 <= TAU);
            prop_assert!(t.y0 >= 0.0 && t.y1 >= t.y0);
            let inside = p.ancestors(node.id).contains(&focus.id);
            let outside = node.extent.x1 <= focus.extent.x0 || node.extent.x0 >= focus.extent.x1;
            if outside && !inside {
                prop_assert_eq!(t.x0, t.x1);
            }
        }
    }

    #[test]
    fn zoom_settles_and_refocus_is_identity(tree in arb_tree(), pick in any::<prop::sample::Index>()) {
        let mut chart = Sunburst::new(&tree, ChartConfig::default()).unwrap();
        let internal = internal_nodes(chart.partition());
        prop_assume!(!internal.is_empty());
        let focus = internal[pick.index(internal.len())];
        prop_assume!(chart.partition()[focus].extent.angle_span() > 0.0);

        let start = Instant::now();
        chart.clicked(focus, start);
        prop_assert!(chart.is_animating());
        prop_assert!(!chart.tick(start + Duration::from_secs(1)));
        prop_assert_eq!(chart.focused(), focus);
        for node in chart.partition().descendants() {
            prop_assert_eq!(chart.current(node.id), chart.target(node.id));
        }

        let again = start + Duration::from_secs(2);
        chart.clicked(focus, again);
        for node in chart.partition().descendants() {
            prop_assert!(chart.target(node.id).approx_eq(&chart.current(node.id), EPS));
        }
    }
}
