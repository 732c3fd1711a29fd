//! Edge effects
//!
//! An edge effect decides what happens when a delta would move content past
//! its bounds: a spring lets it travel and pulls it back later, a fade absorbs
//! the delta and glows, and the restrictive effect leaves containment to the
//! offset validator.
//!
//! Effects never hold a reference to their scrollable. Whenever they need
//! positions they are handed an [`EdgeEffectHost`].

use blinc_animation::{Spring, SpringConfig};

use crate::axis::{near_equal, EPSILON};
use crate::source::ScrollSource;

/// Which built-in edge effect a scrollable installs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeEffectKind {
    /// Overscroll with spring-back (default)
    #[default]
    Spring,
    /// Absorb overscroll and glow
    Fade,
    /// Hard stop at the bounds
    None,
}

impl EdgeEffectKind {
    /// Instantiate the effect; `spring` configures the spring-back
    pub fn create(self, spring: SpringConfig) -> Box<dyn EdgeEffect> {
        match self {
            EdgeEffectKind::Spring => Box::new(SpringEdgeEffect::new(spring)),
            EdgeEffectKind::Fade => Box::new(FadeEdgeEffect::default()),
            EdgeEffectKind::None => Box::new(RestrictEdgeEffect),
        }
    }
}

/// Positions an edge effect reads from its scrollable.
///
/// `leading_edge` is the offset at which the visually leading side (top or
/// left) is reached and `trailing_edge` the visually trailing one. Reverse
/// axes swap the two.
pub trait EdgeEffectHost {
    fn current_position(&self) -> f32;
    fn leading_edge(&self) -> f32;
    fn trailing_edge(&self) -> f32;

    /// Lower and upper offset bounds regardless of orientation
    fn bounds(&self) -> (f32, f32) {
        let (a, b) = (self.leading_edge(), self.trailing_edge());
        (a.min(b), a.max(b))
    }
}

/// Plain-value host, captured from a scrollable before handing its effect
/// out for mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHostSnapshot {
    pub position: f32,
    pub leading: f32,
    pub trailing: f32,
}

impl EdgeEffectHost for EdgeHostSnapshot {
    fn current_position(&self) -> f32 {
        self.position
    }

    fn leading_edge(&self) -> f32 {
        self.leading
    }

    fn trailing_edge(&self) -> f32 {
        self.trailing
    }
}

/// Side of the viewport an effect is acting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    Leading,
    Trailing,
}

/// Behavior at the content bounds
pub trait EdgeEffect: std::fmt::Debug {
    fn kind(&self) -> EdgeEffectKind;

    /// Whether the offset must never leave the bounds
    fn is_restrict_boundary(&self) -> bool {
        self.kind() == EdgeEffectKind::None
    }

    /// A delta was refused at the boundary; `delta` is what would have been
    /// applied
    fn handle_overscroll(&mut self, _host: &dyn EdgeEffectHost, _delta: f32, _viewport: f32) {}

    /// Motion that returns an out-of-bounds position to the nearest edge,
    /// starting with `velocity`
    fn process_scroll_over(&mut self, _host: &dyn EdgeEffectHost, _velocity: f32) -> Option<Spring> {
        None
    }

    /// The gesture that drove the effect ended
    fn release(&mut self) {}
}

/// Spring-back edge effect
#[derive(Debug, Clone)]
pub struct SpringEdgeEffect {
    config: SpringConfig,
}

impl SpringEdgeEffect {
    pub fn new(config: SpringConfig) -> Self {
        Self { config }
    }
}

impl EdgeEffect for SpringEdgeEffect {
    fn kind(&self) -> EdgeEffectKind {
        EdgeEffectKind::Spring
    }

    fn process_scroll_over(&mut self, host: &dyn EdgeEffectHost, velocity: f32) -> Option<Spring> {
        let position = host.current_position();
        let (lower, upper) = host.bounds();
        let target = if position > upper + EPSILON {
            upper
        } else if position < lower - EPSILON {
            lower
        } else {
            return None;
        };
        tracing::debug!(position, target, velocity, "spring back");
        Some(
            Spring::new(self.config, position)
                .with_velocity(velocity)
                .with_target(target),
        )
    }
}

/// Glow left by the fade effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeGlow {
    pub side: EdgeSide,
    /// 0.0 to 1.0
    pub intensity: f32,
}

/// Fade edge effect; absorbs deltas at the boundary
#[derive(Debug, Clone, Default)]
pub struct FadeEdgeEffect {
    glow: Option<FadeGlow>,
}

impl FadeEdgeEffect {
    pub fn glow(&self) -> Option<FadeGlow> {
        self.glow
    }
}

impl EdgeEffect for FadeEdgeEffect {
    fn kind(&self) -> EdgeEffectKind {
        EdgeEffectKind::Fade
    }

    fn handle_overscroll(&mut self, host: &dyn EdgeEffectHost, delta: f32, viewport: f32) {
        let (lower, upper) = host.bounds();
        let side = if near_equal(lower, upper) {
            if delta > 0.0 {
                EdgeSide::Leading
            } else {
                EdgeSide::Trailing
            }
        } else {
            let boundary = if delta > 0.0 { upper } else { lower };
            if near_equal(boundary, host.leading_edge()) {
                EdgeSide::Leading
            } else {
                EdgeSide::Trailing
            }
        };
        let added = if viewport > 0.0 {
            delta.abs() / viewport
        } else {
            0.0
        };
        let intensity = match self.glow {
            Some(glow) if glow.side == side => glow.intensity + added,
            _ => added,
        };
        self.glow = Some(FadeGlow {
            side,
            intensity: intensity.min(1.0),
        });
    }

    fn release(&mut self) {
        self.glow = None;
    }
}

/// Hard boundary; the offset validator does all containment
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictEdgeEffect;

impl EdgeEffect for RestrictEdgeEffect {
    fn kind(&self) -> EdgeEffectKind {
        EdgeEffectKind::None
    }
}

/// Run the edge effect for a pending `delta`.
///
/// Returns true when the delta should be applied, false when the effect
/// absorbed it and the caller must not apply it.
pub fn handle_edge_effect(
    effect: &mut dyn EdgeEffect,
    host: &dyn EdgeEffectHost,
    delta: f32,
    source: ScrollSource,
    viewport: f32,
) -> bool {
    if effect.is_restrict_boundary() {
        return true;
    }

    let position = host.current_position();
    let (lower, upper) = host.bounds();
    let pushing_out =
        (delta > 0.0 && position >= upper - EPSILON) || (delta < 0.0 && position <= lower + EPSILON);
    if !pushing_out {
        return true;
    }

    match effect.kind() {
        EdgeEffectKind::Fade if source.feeds_fade() => {
            effect.handle_overscroll(host, delta, viewport);
            false
        }
        EdgeEffectKind::Spring if !source.allows_spring_overscroll() => false,
        _ => true,
    }
}

/// Which content boundary an offset change just reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCrossing {
    Start,
    End,
}

/// Compare the previous and current offsets against `0` and `end_bound`.
///
/// Reports a boundary only on the frame the offset moves from inside the
/// range onto or past it.
pub fn detect_boundary_crossing(last: f32, current: f32, end_bound: f32) -> Option<BoundaryCrossing> {
    if last < -EPSILON && current >= -EPSILON {
        return Some(BoundaryCrossing::Start);
    }
    if last > end_bound + EPSILON && current <= end_bound + EPSILON {
        return Some(BoundaryCrossing::End);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(position: f32) -> EdgeHostSnapshot {
        EdgeHostSnapshot {
            position,
            leading: 0.0,
            trailing: -100.0,
        }
    }

    #[test]
    fn test_restrict_is_pass_through() {
        let mut effect = RestrictEdgeEffect;
        assert!(handle_edge_effect(&mut effect, &host(0.0), 50.0, ScrollSource::Update, 400.0));
        assert!(handle_edge_effect(&mut effect, &host(-100.0), -50.0, ScrollSource::Jump, 400.0));
    }

    #[test]
    fn test_spring_lets_drag_overscroll() {
        let mut effect = SpringEdgeEffect::new(SpringConfig::default());
        assert!(handle_edge_effect(&mut effect, &host(0.0), 20.0, ScrollSource::Update, 400.0));
        assert!(handle_edge_effect(&mut effect, &host(-100.0), -20.0, ScrollSource::Animation, 400.0));
    }

    #[test]
    fn test_spring_refuses_bar_past_boundary() {
        let mut effect = SpringEdgeEffect::new(SpringConfig::default());
        assert!(!handle_edge_effect(&mut effect, &host(0.0), 20.0, ScrollSource::Bar, 400.0));
        assert!(handle_edge_effect(&mut effect, &host(0.0), -20.0, ScrollSource::Bar, 400.0));
    }

    #[test]
    fn test_fade_absorbs_at_boundary() {
        let mut effect = FadeEdgeEffect::default();
        assert!(!handle_edge_effect(&mut effect, &host(0.0), 40.0, ScrollSource::Update, 400.0));
        let glow = effect.glow().unwrap();
        assert_eq!(glow.side, EdgeSide::Leading);
        assert!((glow.intensity - 0.1).abs() < 1e-6);

        assert!(!handle_edge_effect(&mut effect, &host(-100.0), -40.0, ScrollSource::Update, 400.0));
        assert_eq!(effect.glow().unwrap().side, EdgeSide::Trailing);

        effect.release();
        assert!(effect.glow().is_none());
    }

    #[test]
    fn test_fade_inside_range_applies() {
        let mut effect = FadeEdgeEffect::default();
        assert!(handle_edge_effect(&mut effect, &host(-50.0), 40.0, ScrollSource::Update, 400.0));
        assert!(effect.glow().is_none());
    }

    #[test]
    fn test_reverse_host_swaps_glow_side() {
        let reversed = EdgeHostSnapshot {
            position: 0.0,
            leading: -100.0,
            trailing: 0.0,
        };
        let mut effect = FadeEdgeEffect::default();
        handle_edge_effect(&mut effect, &reversed, 10.0, ScrollSource::Update, 400.0);
        assert_eq!(effect.glow().unwrap().side, EdgeSide::Trailing);
    }

    #[test]
    fn test_spring_back_targets_nearest_bound() {
        let mut effect = SpringEdgeEffect::new(SpringConfig::default());
        let spring = effect.process_scroll_over(&host(30.0), -200.0).unwrap();
        assert_eq!(spring.target(), 0.0);
        let spring = effect.process_scroll_over(&host(-140.0), 0.0).unwrap();
        assert_eq!(spring.target(), -100.0);
        assert!(effect.process_scroll_over(&host(-50.0), 0.0).is_none());
    }

    #[test]
    fn test_boundary_crossing_fires_once() {
        assert_eq!(
            detect_boundary_crossing(0.0, -100.0, -100.0),
            Some(BoundaryCrossing::End)
        );
        assert_eq!(detect_boundary_crossing(-100.0, -100.0, -100.0), None);
        assert_eq!(
            detect_boundary_crossing(-20.0, 5.0, -100.0),
            Some(BoundaryCrossing::Start)
        );
        assert_eq!(detect_boundary_crossing(5.0, 12.0, -100.0), None);
        assert_eq!(detect_boundary_crossing(0.0, -30.0, -100.0), None);
    }
}
