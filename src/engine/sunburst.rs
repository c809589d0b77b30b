//! Zoom controller.
//!
//! Owns the partition, the per-node `current`/`target` extents and the
//! focused node. A click re-targets every node relative to the clicked one
//! and starts a transition; `tick` advances that transition once per frame.
//!
//! State machine:
//!   Resting(focus) --click(p)--> Zooming(p) --duration elapsed--> Resting(p)
//!   Zooming(p)     --click(q)--> Zooming(q), restarted from current extents

use std::f64::consts::TAU;
use std::time::Instant;

use crate::config::ChartConfig;
use crate::data::Node;
use crate::engine::event::{SelectionBus, SelectionEvent};
use crate::error::Result;
use crate::render::animator::{Transition, Tween};
use crate::render::arc::{arc_shape, ArcShape};
use crate::render::label::{label_placement, LabelPlacement};
use crate::render::layout::{compute_partition, Extent, NodeId, Partition};
use crate::render::visibility::Visibility;

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Arc(NodeId),
    Center,
}

/// Everything needed to draw one wedge in the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcFrame {
    pub id: NodeId,
    pub shape: ArcShape,
    pub fill_opacity: f32,
    pub label: LabelPlacement,
    pub label_opacity: f32,
}

/// Map `d` into the coordinate frame where `p` fills the whole circle and sits
/// on ring 0. Nodes outside `p`'s angular range collapse onto 0 or 2π.
pub fn zoom_target(d: &Extent, p: &Extent, p_depth: usize) -> Extent {
    let span = p.angle_span();
    let depth = p_depth as f64;
    let angle = |x: f64| ((x - p.x0) / span).clamp(0.0, 1.0) * TAU;
    Extent {
        x0: angle(d.x0),
        x1: angle(d.x1),
        y0: (d.y0 - depth).max(0.0),
        y1: (d.y1 - depth).max(0.0),
    }
}

#[derive(Debug)]
pub struct Sunburst {
    config: ChartConfig,
    visibility: Visibility,
    partition: Partition,
    current: Vec<Extent>,
    target: Vec<Extent>,
    fill: Vec<f32>,
    label: Vec<f32>,
    tweens: Vec<Tween>,
    focused: NodeId,
    zooming_to: Option<NodeId>,
    center: NodeId,
    transition: Option<Transition>,
    next_token: u64,
    bus: SelectionBus,
}

impl Sunburst {
    /// Validate `config` and `root`, lay the tree out and focus the root.
    pub fn new(root: &Node, config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let partition = compute_partition(root)?;
        let visibility = Visibility::from_config(&config);

        let current: Vec<Extent> = partition.descendants().map(|n| n.extent).collect();
        let fill: Vec<f32> = partition
            .descendants()
            .map(|n| visibility.fill_opacity(&n.extent, n.has_children()))
            .collect();
        let label: Vec<f32> = current.iter().map(|e| visibility.label_opacity(e)).collect();
        let tweens = current
            .iter()
            .zip(fill.iter().zip(label.iter()))
            .map(|(e, (f, l))| Tween::rest(*e, *f, *l))
            .collect();

        log::info!(
            "sunburst: {} nodes, depth {}, total {}",
            partition.len(),
            partition.max_depth(),
            partition.root().value
        );

        let root_id = partition.root().id;
        Ok(Self {
            config,
            visibility,
            target: current.clone(),
            current,
            fill,
            label,
            tweens,
            focused: root_id,
            zooming_to: None,
            center: root_id,
            transition: None,
            next_token: 0,
            bus: SelectionBus::new(),
            partition,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn bus_mut(&mut self) -> &mut SelectionBus {
        &mut self.bus
    }

    /// Node the view is zoomed to once any running transition settles.
    pub fn focused(&self) -> NodeId {
        self.focused
    }

    /// Node the centre circle stands for: one level above the last click.
    pub fn center(&self) -> NodeId {
        self.center
    }

    pub fn current(&self, id: NodeId) -> Extent {
        self.current[id.0]
    }

    pub fn target(&self, id: NodeId) -> Extent {
        self.target[id.0]
    }

    pub fn fill_opacity(&self, id: NodeId) -> f32 {
        self.fill[id.0]
    }

    pub fn label_opacity(&self, id: NodeId) -> f32 {
        self.label[id.0]
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Token of the running transition, if any.
    pub fn transition_token(&self) -> Option<u64> {
        self.transition.map(|t| t.token)
    }

    /// Handle a click on node `id` at time `now`.
    ///
    /// Always publishes the selection and moves the centre datum to the
    /// node's parent. Leaves only zoom when `ChartConfig::zoom_leaves` is
    /// set; a node with no angular span never zooms since it cannot fill
    /// the circle.
    pub fn clicked(&mut self, id: NodeId, now: Instant) {
        let Some(p) = self.partition.get(id) else {
            log::warn!("click on unknown node {:?}", id);
            return;
        };

        self.bus
            .dispatch(&SelectionEvent::datum_selected(p.data.clone()));
        self.center = p.parent.unwrap_or(self.partition.root().id);

        if !p.has_children() && !self.config.zoom_leaves {
            log::debug!("'{}' is a leaf, not zooming", p.name);
            return;
        }
        if p.extent.angle_span() <= 0.0 {
            log::warn!("'{}' has no angular span, not zooming", p.name);
            return;
        }

        let (p_extent, p_depth) = (p.extent, p.depth);

        for node in self.partition.descendants() {
            self.target[node.id.0] = zoom_target(&node.extent, &p_extent, p_depth);
        }
        self.start_transition(id, now);
    }

    /// Click on the centre circle: zoom out one level.
    pub fn click_center(&mut self, now: Instant) {
        self.clicked(self.center, now);
    }

    fn start_transition(&mut self, to: NodeId, now: Instant) {
        for node in self.partition.descendants() {
            let i = node.id.0;
            let target = self.target[i];
            self.tweens[i] = Tween {
                from: self.current[i],
                to: target,
                fill: (
                    self.fill[i],
                    self.visibility.fill_opacity(&target, node.has_children()),
                ),
                label: (self.label[i], self.visibility.label_opacity(&target)),
            };
        }
        self.next_token += 1;
        if let Some(old) = self.transition {
            log::debug!("transition {} interrupted", old.token);
        }
        log::debug!(
            "transition {} -> '{}' ({:?})",
            self.next_token,
            self.partition[to].name,
            self.config.duration
        );
        self.transition = Some(Transition::new(self.next_token, now, self.config.duration));
        self.zooming_to = Some(to);
    }

    /// Advance the running transition to `now`. Returns true while it is
    /// still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };

        if transition.is_finished(now) {
            for (i, tween) in self.tweens.iter().enumerate() {
                self.current[i] = self.target[i];
                self.fill[i] = tween.fill.1;
                self.label[i] = tween.label.1;
            }
            if let Some(to) = self.zooming_to.take() {
                self.focused = to;
            }
            self.transition = None;
            log::debug!("transition {} settled", transition.token);
            return false;
        }

        let t = transition.eased(now);
        for (i, tween) in self.tweens.iter().enumerate() {
            self.current[i] = tween.extent_at(t);
            self.fill[i] = tween.fill_at(t);
            self.label[i] = tween.label_at(t);
        }
        true
    }

    /// Wedges of every non-root node at their current extents. Invisible
    /// wedges are included with zero opacity.
    pub fn frame(&self) -> Vec<ArcFrame> {
        let radius = self.config.radius();
        self.partition
            .descendants()
            .skip(1)
            .map(|node| {
                let e = &self.current[node.id.0];
                let label = label_placement(e, radius);
                log::trace!("{}: {}", node.name, label.to_transform());
                ArcFrame {
                    id: node.id,
                    shape: arc_shape(e, &self.config),
                    fill_opacity: self.fill[node.id.0],
                    label,
                    label_opacity: self.label[node.id.0],
                }
            })
            .collect()
    }

    /// Resolve a point relative to the chart centre. The centre circle is
    /// on top; otherwise only currently visible wedges take clicks.
    pub fn hit_test(&self, point: [f64; 2]) -> Option<Hit> {
        let center_r = self.config.radius() * self.config.center_radius_factor as f64;
        if point[0].hypot(point[1]) <= center_r {
            return Some(Hit::Center);
        }
        self.partition
            .descendants()
            .skip(1)
            .filter(|n| self.visibility.arc_visible(&self.current[n.id.0]))
            .find(|n| arc_shape(&self.current[n.id.0], &self.config).contains(point))
            .map(|n| Hit::Arc(n.id))
    }

    /// Dispatch a click on whatever lies under `point`.
    pub fn click_at(&mut self, point: [f64; 2], now: Instant) -> Option<Hit> {
        let hit = self.hit_test(point)?;
        match hit {
            Hit::Center => self.click_center(now),
            Hit::Arc(id) => self.clicked(id, now),
        }
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::engine::event::DATUM_SELECTED;
    use crate::render::arc::polar;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const EPS: f64 = 1e-9;

    fn chart() -> Sunburst {
        Sunburst::new(&data::year().unwrap(), ChartConfig::default()).unwrap()
    }

    fn id(s: &Sunburst, name: &str) -> NodeId {
        s.partition().descendants().find(|n| n.name == name).unwrap().id
    }

    fn settle(s: &mut Sunburst, start: Instant) {
        assert!(!s.tick(start + Duration::from_secs(1)));
    }

    fn all_settled(s: &Sunburst) -> bool {
        s.partition()
            .descendants()
            .all(|n| s.current(n.id) == s.target(n.id))
    }

    #[test]
    fn starts_at_root_at_rest() {
        let s = chart();
        assert_eq!(s.focused(), NodeId(0));
        assert_eq!(s.center(), NodeId(0));
        assert!(!s.is_animating());
        assert!(all_settled(&s));
        assert_eq!(s.fill_opacity(NodeId(0)), 0.0);
        assert_eq!(s.fill_opacity(id(&s, "spring")), 0.6);
        assert_eq!(s.fill_opacity(id(&s, "may")), 0.4);
    }

    #[test]
    fn zoom_into_season() {
        let mut s = chart();
        let spring = id(&s, "spring");
        let start = Instant::now();
        s.clicked(spring, start);
        assert!(s.is_animating());
        assert_eq!(s.center(), NodeId(0));

        let t = s.target(spring);
        assert!(t.x0.abs() < EPS);
        assert!((t.x1 - TAU).abs() < EPS);
        assert_eq!(t.y0, 0.0);
        assert_eq!(t.y1, 1.0);

        let april = s.target(id(&s, "april"));
        assert!((april.x0 - TAU / 3.0).abs() < EPS);
        assert!((april.x1 - 2.0 * TAU / 3.0).abs() < EPS);
        assert_eq!((april.y0, april.y1), (1.0, 2.0));

        settle(&mut s, start);
        assert_eq!(s.focused(), spring);
        assert!(all_settled(&s));
        assert_eq!(s.fill_opacity(spring), 0.0);
        assert_eq!(s.fill_opacity(id(&s, "april")), 0.4);
    }

    #[test]
    fn outside_nodes_collapse_to_edges() {
        let mut s = chart();
        let now = Instant::now();
        s.clicked(id(&s, "summer"), now);
        for name in ["spring", "march", "fall", "winter", "february"] {
            let t = s.target(id(&s, name));
            assert_eq!(t.x0, t.x1, "{} should collapse", name);
            assert!(t.x0 == 0.0 || (t.x0 - TAU).abs() < EPS);
        }
    }

    #[test]
    fn center_zooms_back_out() {
        let mut s = chart();
        let start = Instant::now();
        s.clicked(id(&s, "fall"), start);
        settle(&mut s, start);

        let later = start + Duration::from_secs(2);
        s.click_center(later);
        settle(&mut s, later);
        assert_eq!(s.focused(), NodeId(0));
        for node in s.partition().descendants() {
            assert!(s.current(node.id).approx_eq(&node.extent, EPS));
        }
    }

    #[test]
    fn center_at_root_is_identity() {
        let mut s = chart();
        let now = Instant::now();
        s.click_center(now);
        for node in s.partition().descendants() {
            assert!(s.target(node.id).approx_eq(&s.current(node.id), EPS));
        }
    }

    #[test]
    fn leaf_click_selects_without_zoom() {
        let mut s = chart();
        let rx = s.bus_mut().subscribe_channel();
        s.clicked(id(&s, "may"), Instant::now());
        assert!(!s.is_animating());
        assert_eq!(s.focused(), NodeId(0));
        assert_eq!(s.center(), id(&s, "spring"));
        assert_eq!(rx.try_recv().unwrap().detail.name, "may");
    }

    #[test]
    fn center_after_leaf_click_zooms_to_parent() {
        let mut s = chart();
        let start = Instant::now();
        s.clicked(id(&s, "may"), start);
        s.click_center(start + Duration::from_millis(10));
        assert!(s.is_animating());
        assert!(!s.tick(start + Duration::from_secs(2)));
        let spring = id(&s, "spring");
        assert_eq!(s.focused(), spring);
        assert_eq!(s.center(), NodeId(0));
        assert!((s.target(spring).x1 - TAU).abs() < EPS);
    }

    #[test]
    fn leaf_zoom_when_enabled() {
        let cfg = ChartConfig::default().with_zoom_leaves(true);
        let mut s = Sunburst::new(&data::year().unwrap(), cfg).unwrap();
        let may = id(&s, "may");
        s.clicked(may, Instant::now());
        assert!(s.is_animating());
        assert_eq!(s.center(), id(&s, "spring"));
        assert!((s.target(may).x1 - TAU).abs() < EPS);
    }

    #[test]
    fn spring_event_payload() {
        let mut s = chart();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        s.bus_mut()
            .subscribe(move |ev: &SelectionEvent| sink.borrow_mut().push(ev.clone()));

        s.clicked(id(&s, "spring"), Instant::now());

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, DATUM_SELECTED);
        assert_eq!(events[0].detail.name, "spring");
        let months: Vec<&str> = events[0]
            .detail
            .children()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(months, ["march", "april", "may"]);
    }

    #[test]
    fn interrupted_transition_resumes_from_current() {
        let mut s = chart();
        let spring = id(&s, "spring");
        let winter = id(&s, "winter");
        let start = Instant::now();

        s.clicked(spring, start);
        let first = s.transition_token();
        let mid = start + Duration::from_millis(350);
        assert!(s.tick(mid));
        let halfway = s.current(winter);
        assert_ne!(halfway, s.partition()[winter].extent);

        s.clicked(NodeId(0), mid);
        assert_ne!(s.transition_token(), first);
        // Nothing moves until the new transition has had time to run.
        s.tick(mid);
        assert!(s.current(winter).approx_eq(&halfway, EPS));

        settle(&mut s, mid);
        assert_eq!(s.focused(), NodeId(0));
        assert!(all_settled(&s));
        assert!(s.current(winter).approx_eq(&s.partition()[winter].extent, EPS));
    }

    #[test]
    fn frame_skips_root() {
        let s = chart();
        let frame = s.frame();
        assert_eq!(frame.len(), s.partition().len() - 1);
        assert!(frame.iter().all(|f| f.id != NodeId(0)));
        let labelled = frame.iter().filter(|f| f.label_opacity > 0.0).count();
        assert_eq!(labelled, 16);
    }

    #[test]
    fn hit_testing() {
        let s = chart();
        let r = s.config().radius();
        assert_eq!(s.hit_test([0.0, 0.0]), Some(Hit::Center));
        // Spring occupies the first quarter, ring 1.
        let p = polar(TAU / 8.0, 1.5 * r);
        assert_eq!(s.hit_test(p), Some(Hit::Arc(id(&s, "spring"))));
        // April is the middle month of spring, ring 2.
        let p = polar(TAU / 8.0, 2.5 * r);
        assert_eq!(s.hit_test(p), Some(Hit::Arc(id(&s, "april"))));
        assert_eq!(s.hit_test(polar(1.0, 10.0 * r)), None);
    }

    #[test]
    fn click_at_dispatches() {
        let mut s = chart();
        let r = s.config().radius();
        let now = Instant::now();
        let hit = s.click_at(polar(TAU * 3.0 / 8.0, 1.5 * r), now);
        assert_eq!(hit, Some(Hit::Arc(id(&s, "summer"))));
        assert!(s.is_animating());
    }
}
