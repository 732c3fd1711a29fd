//! End-to-end scroll behavior through the public API

use std::cell::RefCell;
use std::rc::Rc;

use blinc_animation::{Curve, FrameScheduler};
use blinc_scroll::offset::OverScrollOffset;
use blinc_scroll::snap::calc_snap_offsets_by_interval;
use blinc_scroll::{
    AnimationKind, Axis, Dimension, NestedScrollMode, NestedScrollOptions, NestedState,
    ScrollConfig, ScrollEdge, ScrollFrameResult, ScrollOffsetState, ScrollSnapOptions,
    ScrollSource, ScrollState, ScrollTree, Scrollable, ScrollablePattern, ScrollableId, Size,
    SnapAlign,
};

const FRAME: f32 = 1.0 / 60.0;

fn laid_out(config: ScrollConfig, distance: f32) -> ScrollablePattern {
    let mut pattern = ScrollablePattern::new(config);
    pattern.update_layout(Size::new(300.0, 400.0), Size::new(300.0, 400.0 + distance));
    pattern
}

fn run_frames(tree: &mut ScrollTree, max_frames: usize) -> usize {
    let mut scheduler = FrameScheduler::new();
    for frame in 0..max_frames {
        if !scheduler.frame_with(tree, FRAME) {
            return frame;
        }
    }
    max_frames
}

fn edge_recorder(pattern: &mut ScrollablePattern) -> Rc<RefCell<Vec<ScrollEdge>>> {
    let edges = Rc::new(RefCell::new(Vec::new()));
    let sink = edges.clone();
    pattern.set_on_scroll_edge(move |edge| sink.borrow_mut().push(edge));
    edges
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_a_plain_update() {
    let mut pattern = laid_out(ScrollConfig::default(), 100.0);
    let edges = edge_recorder(&mut pattern);
    assert!(pattern.update_current_offset(-30.0, ScrollSource::Update));
    assert_eq!(pattern.current_offset(), -30.0);
    assert!(edges.borrow().is_empty());
}

#[test]
fn test_scenario_b_restrictive_clamp() {
    let mut pattern = laid_out(ScrollConfig::no_bounce(), 100.0);
    let edges = edge_recorder(&mut pattern);
    assert!(pattern.update_current_offset(-150.0, ScrollSource::Update));
    assert_eq!(pattern.current_offset(), -100.0);
    assert_eq!(*edges.borrow(), vec![ScrollEdge::Bottom]);

    // Pushing further against the end does not fire again
    pattern.update_current_offset(-20.0, ScrollSource::Update);
    assert_eq!(edges.borrow().len(), 1);
}

#[test]
fn test_scenario_c_interval_snap_offsets() {
    let offsets = calc_snap_offsets_by_interval(50.0, SnapAlign::Start, 400.0, 120.0);
    assert_eq!(offsets.as_slice(), &[0.0, -50.0, -100.0, -120.0]);
}

#[test]
fn test_scenario_d_self_first_hands_pull_to_parent() {
    let mut tree = ScrollTree::new();
    let parent = tree.insert(laid_out(ScrollConfig::default(), 1000.0));
    tree.get_mut(parent).unwrap().jump_to_position(500.0);
    let child_config = ScrollConfig::default()
        .with_nested(NestedScrollOptions::uniform(NestedScrollMode::SelfFirst));
    let child = tree.insert_child(parent, laid_out(child_config, 100.0));

    let result = tree.handle_scroll(child, 20.0, ScrollSource::Update, NestedState::Gesture);
    assert_eq!(result.remain, 0.0);
    assert_eq!(tree.get(child).unwrap().current_offset(), 0.0);
    assert_eq!(tree.get(parent).unwrap().position(), 480.0);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_boundary_invariant_with_restrictive_effect() {
    let mut pattern = laid_out(ScrollConfig::no_bounce(), 250.0);
    let deltas = [
        -40.0, -300.0, 75.0, 12.5, 900.0, -0.5, -249.0, 3.0, -1000.0, 260.0, 0.0, -17.0,
    ];
    let sources = [
        ScrollSource::Update,
        ScrollSource::Animation,
        ScrollSource::AnimationSpring,
        ScrollSource::Bar,
        ScrollSource::Child,
        ScrollSource::Jump,
        ScrollSource::FocusJump,
    ];
    for (i, delta) in deltas.iter().enumerate() {
        pattern.update_current_offset(*delta, sources[i % sources.len()]);
        let offset = pattern.current_offset();
        assert!(
            (-250.0..=0.0).contains(&offset),
            "offset {offset} escaped after delta {delta}"
        );
    }
}

#[test]
fn test_friction_monotonic_and_bounded() {
    let mut state = ScrollOffsetState::new(300.0);
    state.set_current(80.0);
    let mut previous = 0.0;
    for step in 1..=400 {
        let delta = step as f32 * 0.5;
        let damped = state.adjust_offset(delta, ScrollSource::Update, 500.0);
        assert!(damped <= delta + 1e-4, "damped {damped} exceeds {delta}");
        assert!(damped + 1e-4 >= previous, "not monotonic at {delta}");
        previous = damped;
    }
}

#[test]
fn test_interval_snap_coverage() {
    for (interval, distance) in [(50.0, 120.0), (33.0, 1000.0), (400.0, 90.0), (7.5, 60.0)] {
        for align in [SnapAlign::Start, SnapAlign::Center, SnapAlign::End] {
            let offsets = calc_snap_offsets_by_interval(interval, align, 400.0, distance);
            assert_eq!(offsets.first(), Some(&0.0));
            assert_eq!(offsets.last(), Some(&-distance));
            for pair in offsets.windows(2) {
                assert!(pair[0] > pair[1], "{offsets:?} not strictly descending");
            }
        }
    }
}

#[test]
fn test_animate_twice_leaves_one_animation() {
    let mut pattern = laid_out(ScrollConfig::default(), 1000.0);
    assert!(!pattern.is_animating());
    pattern.animate_to(300.0, 0.5, Curve::EaseInOut, false);
    assert!(pattern.is_animating());
    pattern.animate_to(600.0, 0.5, Curve::EaseInOut, false);
    assert!(pattern.is_animating());
    assert_eq!(pattern.animation_kind(), Some(AnimationKind::Programmatic));

    let mut tree = ScrollTree::new();
    let id = tree.insert(pattern);
    run_frames(&mut tree, 600);
    let pattern = tree.get(id).unwrap();
    assert!(!pattern.is_animating());
    assert!((pattern.position() - 600.0).abs() < 1e-3);
}

#[derive(Default)]
struct MockParent {
    received: Vec<f32>,
}

impl Scrollable for MockParent {
    fn axis(&self) -> Axis {
        Axis::Vertical
    }

    fn nested_scroll(&self) -> NestedScrollOptions {
        NestedScrollOptions::default()
    }

    fn over_scroll_offset(&self, _delta: f32) -> OverScrollOffset {
        OverScrollOffset::default()
    }

    fn can_over_scroll(&self, _source: ScrollSource) -> bool {
        true
    }

    fn scroll_by_delta(&mut self, delta: f32, _source: ScrollSource) -> bool {
        self.received.push(delta);
        true
    }

    fn is_at_start(&self) -> bool {
        false
    }

    fn is_at_end(&self) -> bool {
        false
    }
}

/// A child that only records; it starts at its top boundary with 50px to go
struct BoundedChild {
    nested: NestedScrollOptions,
    offset: ScrollOffsetState,
}

impl Scrollable for BoundedChild {
    fn axis(&self) -> Axis {
        Axis::Vertical
    }

    fn nested_scroll(&self) -> NestedScrollOptions {
        self.nested
    }

    fn over_scroll_offset(&self, delta: f32) -> OverScrollOffset {
        self.offset.over_scroll_offset(delta)
    }

    fn can_over_scroll(&self, _source: ScrollSource) -> bool {
        false
    }

    fn scroll_by_delta(&mut self, delta: f32, _source: ScrollSource) -> bool {
        self.offset.apply(delta);
        self.offset.validate_offset(ScrollSource::Update, true);
        true
    }

    fn is_at_start(&self) -> bool {
        self.offset.is_at_start()
    }

    fn is_at_end(&self) -> bool {
        self.offset.is_at_end()
    }
}

enum Node {
    Parent(MockParent),
    Child(BoundedChild),
}

impl Scrollable for Node {
    fn axis(&self) -> Axis {
        Axis::Vertical
    }

    fn nested_scroll(&self) -> NestedScrollOptions {
        match self {
            Node::Parent(p) => p.nested_scroll(),
            Node::Child(c) => c.nested_scroll(),
        }
    }

    fn over_scroll_offset(&self, delta: f32) -> OverScrollOffset {
        match self {
            Node::Parent(p) => p.over_scroll_offset(delta),
            Node::Child(c) => c.over_scroll_offset(delta),
        }
    }

    fn can_over_scroll(&self, source: ScrollSource) -> bool {
        match self {
            Node::Parent(p) => p.can_over_scroll(source),
            Node::Child(c) => c.can_over_scroll(source),
        }
    }

    fn scroll_by_delta(&mut self, delta: f32, source: ScrollSource) -> bool {
        match self {
            Node::Parent(p) => p.scroll_by_delta(delta, source),
            Node::Child(c) => c.scroll_by_delta(delta, source),
        }
    }

    fn is_at_start(&self) -> bool {
        match self {
            Node::Parent(p) => p.is_at_start(),
            Node::Child(c) => c.is_at_start(),
        }
    }

    fn is_at_end(&self) -> bool {
        match self {
            Node::Parent(p) => p.is_at_end(),
            Node::Child(c) => c.is_at_end(),
        }
    }
}

fn parent_received(tree: &ScrollTree<Node>, id: ScrollableId) -> usize {
    match tree.get(id) {
        Some(Node::Parent(p)) => p.received.len(),
        _ => 0,
    }
}

#[test]
fn test_self_only_never_delivers_to_parent() {
    let mut tree: ScrollTree<Node> = ScrollTree::new();
    let parent = tree.insert(Node::Parent(MockParent::default()));
    let child = tree.insert_child(
        parent,
        Node::Child(BoundedChild {
            nested: NestedScrollOptions::uniform(NestedScrollMode::SelfOnly),
            offset: ScrollOffsetState::new(50.0),
        }),
    );

    for delta in [30.0, -20.0, -80.0, -5.0, 200.0, 10.0, -1000.0] {
        for state in [NestedState::Gesture, NestedState::ChildScroll] {
            tree.handle_scroll(child, delta, ScrollSource::Update, state);
            tree.handle_scroll(child, delta, ScrollSource::Animation, state);
        }
    }
    assert_eq!(parent_received(&tree, parent), 0);
}

// ============================================================================
// Gestures and frames
// ============================================================================

#[test]
fn test_drag_fling_and_stop_events() {
    let mut tree = ScrollTree::new();
    let mut pattern = laid_out(ScrollConfig::default(), 3000.0);
    let log = Rc::new(RefCell::new(Vec::new()));
    let (start, stop) = (log.clone(), log.clone());
    pattern.set_on_scroll_start(move || start.borrow_mut().push("start"));
    pattern.set_on_scroll_stop(move || stop.borrow_mut().push("stop"));
    let id = tree.insert(pattern);

    assert!(tree.handle_drag_start(id));
    assert_eq!(tree.get(id).unwrap().scroll_state(), ScrollState::Scroll);
    tree.handle_drag_update(id, -100.0);
    assert_eq!(tree.get(id).unwrap().position(), 100.0);

    tree.handle_drag_end(id, -2000.0);
    assert_eq!(tree.get(id).unwrap().scroll_state(), ScrollState::Fling);
    assert_eq!(tree.get(id).unwrap().animation_kind(), Some(AnimationKind::Fling));

    run_frames(&mut tree, 1200);
    let pattern = tree.get(id).unwrap();
    assert_eq!(pattern.scroll_state(), ScrollState::Idle);
    assert!(pattern.position() > 400.0);
    assert_eq!(*log.borrow(), vec!["start", "stop"]);
}

#[test]
fn test_catching_a_fling_keeps_start_and_stop_balanced() {
    let mut tree = ScrollTree::new();
    let mut pattern = laid_out(ScrollConfig::default(), 3000.0);
    let log = Rc::new(RefCell::new(Vec::new()));
    let (start, stop) = (log.clone(), log.clone());
    pattern.set_on_scroll_start(move || start.borrow_mut().push("start"));
    pattern.set_on_scroll_stop(move || stop.borrow_mut().push("stop"));
    let id = tree.insert(pattern);

    tree.handle_drag_start(id);
    tree.handle_drag_update(id, -100.0);
    tree.handle_drag_end(id, -2000.0);
    assert!(tree.tick(FRAME));

    tree.on_touch_down(id);
    tree.handle_drag_start(id);
    tree.handle_drag_update(id, -20.0);
    tree.handle_drag_end(id, 0.0);
    run_frames(&mut tree, 600);

    assert_eq!(tree.get(id).unwrap().scroll_state(), ScrollState::Idle);
    assert_eq!(*log.borrow(), vec!["start", "stop"]);
}

#[test]
fn test_frame_begin_can_veto_fling_frames() {
    let mut tree = ScrollTree::new();
    let mut pattern = laid_out(ScrollConfig::default(), 3000.0);
    let states = Rc::new(RefCell::new(Vec::new()));
    let sink = states.clone();
    pattern.set_on_scroll_frame_begin(move |offset, state| {
        sink.borrow_mut().push(state);
        let offset = if state == ScrollState::Fling { 0.0 } else { offset };
        ScrollFrameResult { offset }
    });
    let id = tree.insert(pattern);

    tree.handle_drag_start(id);
    tree.handle_drag_update(id, -100.0);
    tree.handle_drag_end(id, -2000.0);
    for _ in 0..10 {
        tree.tick(FRAME);
    }

    let states = states.borrow();
    assert_eq!(states.first(), Some(&ScrollState::Scroll));
    assert!(states.len() > 1);
    assert!(states[1..].iter().all(|s| *s == ScrollState::Fling));
    assert_eq!(tree.get(id).unwrap().position(), 100.0);
}

#[test]
fn test_overscroll_springs_back() {
    let mut tree = ScrollTree::new();
    let id = tree.insert(laid_out(ScrollConfig::default(), 500.0));

    tree.handle_drag_start(id);
    tree.handle_drag_update(id, 60.0);
    tree.handle_drag_update(id, 30.0);
    let pulled = tree.get(id).unwrap().current_offset();
    assert!(pulled > 60.0 && pulled < 90.0, "pulled to {pulled}");

    tree.handle_drag_end(id, 0.0);
    assert_eq!(
        tree.get(id).unwrap().animation_kind(),
        Some(AnimationKind::SpringBack)
    );
    run_frames(&mut tree, 600);
    let pattern = tree.get(id).unwrap();
    assert!(!pattern.is_animating());
    assert_eq!(pattern.current_offset(), 0.0);
}

#[test]
fn test_release_lands_on_snap_offset() {
    let snap = ScrollSnapOptions::interval(Dimension::Px(100.0), SnapAlign::Start);
    let mut tree = ScrollTree::new();
    let id = tree.insert(laid_out(ScrollConfig::default().with_snap(snap), 1000.0));

    tree.handle_drag_start(id);
    tree.handle_drag_update(id, -130.0);
    tree.handle_drag_end(id, 0.0);
    assert_eq!(tree.get(id).unwrap().animation_kind(), Some(AnimationKind::Snap));

    run_frames(&mut tree, 600);
    assert!((tree.get(id).unwrap().position() - 100.0).abs() < 0.5);
}

#[test]
fn test_programmatic_animation_blocks_drag_updates() {
    let mut tree = ScrollTree::new();
    let id = tree.insert(laid_out(ScrollConfig::default(), 1000.0));
    tree.get_mut(id)
        .unwrap()
        .animate_to(500.0, 1.0, Curve::Linear, false);
    assert!(!tree.on_scroll_callback(id, -10.0, ScrollSource::Update));
    assert!(tree.on_scroll_callback(id, 0.0, ScrollSource::Start));
    assert!(!tree.get(id).unwrap().is_animating());
    assert!(tree.on_scroll_callback(id, -10.0, ScrollSource::Update));
}

#[test]
fn test_frame_begin_rewrites_delta() {
    let mut tree = ScrollTree::new();
    let mut pattern = laid_out(ScrollConfig::default(), 1000.0);
    pattern.set_on_scroll_frame_begin(|offset, state| {
        assert_eq!(state, ScrollState::Scroll);
        ScrollFrameResult { offset: offset / 2.0 }
    });
    let id = tree.insert(pattern);
    tree.handle_drag_start(id);
    tree.handle_drag_update(id, -80.0);
    assert_eq!(tree.get(id).unwrap().position(), 40.0);
}

#[test]
fn test_fling_hands_off_to_parent() {
    let mut tree = ScrollTree::new();
    let parent = tree.insert(laid_out(ScrollConfig::default(), 5000.0));
    let child = tree.insert_child(parent, laid_out(ScrollConfig::default(), 100.0));

    tree.handle_drag_start(child);
    tree.handle_drag_update(child, -60.0);
    tree.handle_drag_end(child, -3000.0);
    run_frames(&mut tree, 1200);

    assert!((tree.get(child).unwrap().position() - 100.0).abs() < 1e-2);
    assert!(tree.get(parent).unwrap().position() > 0.0);
}

#[test]
fn test_reverse_drag_moves_forward() {
    let mut tree = ScrollTree::new();
    let id = tree.insert(laid_out(ScrollConfig::default().with_reverse(true), 500.0));
    tree.handle_drag_start(id);
    tree.handle_drag_update(id, 50.0);
    assert_eq!(tree.get(id).unwrap().position(), 50.0);
}

#[test]
fn test_scroll_bar_drag_is_clamped() {
    let mut tree = ScrollTree::new();
    let id = tree.insert(laid_out(ScrollConfig::default(), 1200.0));
    assert!(tree.on_scroll_bar_drag_start(id));
    tree.on_scroll_bar_drag(id, 40.0);
    let position = tree.get(id).unwrap().position();
    assert!(position > 0.0);
    tree.on_scroll_bar_drag(id, 10_000.0);
    assert!((tree.get(id).unwrap().position() - 1200.0).abs() < 1e-2);
    assert_eq!(tree.get(id).unwrap().scroll_source(), ScrollSource::Bar);
    tree.on_scroll_bar_drag_end(id, 0.0);
    run_frames(&mut tree, 600);
    assert!((tree.get(id).unwrap().position() - 1200.0).abs() < 1e-2);
    assert!(!tree.get(id).unwrap().is_animating());
}

#[test]
fn test_proxy_drives_all_bound_scrollables() {
    let mut tree = ScrollTree::new();
    let a = tree.insert(laid_out(ScrollConfig::default(), 1000.0));
    let b = tree.insert(laid_out(ScrollConfig::default(), 500.0));
    let proxy = tree.create_scroll_bar_proxy();
    tree.bind_scroll_bar_proxy(a, proxy);
    tree.bind_scroll_bar_proxy(b, proxy);
    tree.scroll_bar_proxy_mut(proxy)
        .unwrap()
        .set_bar_geometry(400.0, 100.0);

    tree.notify_scroll_bar_drag_start(proxy);
    tree.notify_scroll_bar_drag(proxy, 30.0);
    assert!((tree.get(a).unwrap().position() - 100.0).abs() < 1e-3);
    assert!((tree.get(b).unwrap().position() - 50.0).abs() < 1e-3);
    tree.notify_scroll_bar_drag_end(proxy, 0.0);
}

#[test]
fn test_proxy_snap_flag_has_single_writer() {
    let snap = ScrollSnapOptions::interval(Dimension::Px(100.0), SnapAlign::Start);
    let mut tree = ScrollTree::new();
    let a = tree.insert(laid_out(ScrollConfig::default().with_snap(snap.clone()), 1000.0));
    let b = tree.insert(laid_out(ScrollConfig::default().with_snap(snap), 1000.0));
    let proxy = tree.create_scroll_bar_proxy();
    tree.bind_scroll_bar_proxy(a, proxy);
    tree.bind_scroll_bar_proxy(b, proxy);
    tree.scroll_bar_proxy_mut(proxy)
        .unwrap()
        .set_bar_geometry(400.0, 100.0);

    tree.notify_scroll_bar_drag_start(proxy);
    tree.notify_scroll_bar_drag(proxy, 4.0);
    tree.notify_scroll_bar_drag_end(proxy, 0.0);

    assert!(tree.scroll_bar_proxy(proxy).unwrap().is_scroll_snap_trigger());
    assert_eq!(tree.get(a).unwrap().animation_kind(), Some(AnimationKind::Snap));
    assert_eq!(tree.get(b).unwrap().animation_kind(), None);

    run_frames(&mut tree, 600);
    assert!(!tree.scroll_bar_proxy(proxy).unwrap().is_scroll_snap_trigger());
}

#[test]
fn test_horizontal_edge_events() {
    let mut pattern = laid_out(ScrollConfig::no_bounce().with_axis(Axis::Horizontal), 0.0);
    pattern.update_layout(Size::new(300.0, 400.0), Size::new(500.0, 400.0));
    let edges = edge_recorder(&mut pattern);
    pattern.update_current_offset(-250.0, ScrollSource::Update);
    pattern.update_current_offset(400.0, ScrollSource::Update);
    assert_eq!(*edges.borrow(), vec![ScrollEdge::Right, ScrollEdge::Left]);
}
