//! Widget animations: fades and moves with eased interpolation.
//!
//! Animations are transient records over weak widget ids. The scheduler
//! advances them once per frame with the host's delta time; an animation
//! whose target has been destroyed is silently dropped. Completion removes
//! the record, and a fade-out additionally hides (and optionally destroys)
//! its target.

use cinder_ui_core::logging::targets;
use cinder_ui_core::Point;
use tracing::trace;

use crate::widget::tree::WidgetTree;
use crate::widget::WidgetId;

/// Easing curves for animation interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Quadratic acceleration from rest.
    QuadIn,
    /// Quadratic deceleration to rest.
    QuadOut,
    /// Quadratic acceleration then deceleration.
    QuadInOut,
    /// Cubic acceleration from rest.
    CubicIn,
    /// Cubic deceleration to rest. The default for widget animations.
    #[default]
    CubicOut,
    /// Cubic acceleration then deceleration.
    CubicInOut,
    /// Sinusoidal ease-in.
    SineIn,
    /// Sinusoidal ease-out.
    SineOut,
    /// Sinusoidal ease-in-out.
    SineInOut,
}

impl Easing {
    /// Map linear progress `t` in 0..1 onto the curve.
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Easing::SineIn => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (t * std::f32::consts::PI).cos()),
        }
    }

    /// Interpolate between two values along the curve.
    pub fn lerp(self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.ease(t)
    }
}

/// What an animation does to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Opacity 0 to 1; the target is made visible on the first step.
    FadeIn,
    /// Opacity 1 to 0; hides the target on completion.
    FadeOut {
        /// Destroy the target once hidden.
        destroy: bool,
    },
    /// Local position interpolation.
    MoveTo {
        /// Starting local position.
        from: Point,
        /// Final local position.
        to: Point,
    },
}

/// A running animation.
#[derive(Debug, Clone)]
pub struct Animation {
    /// The animated widget. Destruction of the target drops the animation.
    pub target: WidgetId,
    /// What is being animated.
    pub kind: AnimationKind,
    /// Total duration in seconds.
    pub duration: f32,
    /// Accumulated time in seconds.
    pub elapsed: f32,
    /// Interpolation curve.
    pub easing: Easing,
}

impl Animation {
    /// Animation with the default cubic ease-out curve.
    pub fn new(target: WidgetId, kind: AnimationKind, duration: f32) -> Self {
        Self {
            target,
            kind,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
            easing: Easing::default(),
        }
    }

    fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Whether the animation has run its full duration.
    #[inline]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Apply the current interpolated state to the target.
    fn apply(&self, tree: &mut WidgetTree) {
        let t = self.easing.ease(self.progress());
        match self.kind {
            AnimationKind::FadeIn => {
                if let Some(widget) = tree.get_mut(self.target) {
                    widget.visible = true;
                    widget.opacity = t;
                }
            }
            AnimationKind::FadeOut { .. } => {
                if let Some(widget) = tree.get_mut(self.target) {
                    widget.opacity = 1.0 - t;
                }
            }
            AnimationKind::MoveTo { from, to } => {
                let x = from.x as f32 + (to.x - from.x) as f32 * t;
                let y = from.y as f32 + (to.y - from.y) as f32 * t;
                let position = Point::new(x.round() as i32, y.round() as i32);
                let moved = tree.get(self.target).and_then(|widget| {
                    (widget.rect.origin != position).then(|| {
                        let mut rect = widget.rect;
                        rect.origin = position;
                        rect
                    })
                });
                if let Some(rect) = moved {
                    tree.set_rect(self.target, rect);
                }
            }
        }
    }

    fn complete(&self, tree: &mut WidgetTree) {
        if let AnimationKind::FadeOut { destroy } = self.kind {
            tree.set_visible(self.target, false);
            if let Some(widget) = tree.get_mut(self.target) {
                widget.opacity = 1.0;
            }
            if destroy {
                tree.destroy(self.target);
            }
        }
    }
}

/// Advance every animation by `dt` seconds, applying interpolated values and
/// retiring finished or orphaned entries.
pub(crate) fn step_animations(tree: &mut WidgetTree, animations: &mut Vec<Animation>, dt: f32) {
    let mut index = 0;
    while index < animations.len() {
        let animation = &mut animations[index];
        if !tree.contains(animation.target) {
            trace!(target: targets::ANIMATION, target_id = ?animation.target, "dropping orphaned animation");
            animations.remove(index);
            continue;
        }
        animation.elapsed += dt;
        let animation = animations[index].clone();
        animation.apply(tree);
        if animation.finished() {
            animation.complete(tree);
            animations.remove(index);
        } else {
            index += 1;
        }
    }
}
