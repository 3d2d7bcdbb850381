//! The card-flip transition between the two faces of a session.
//!
//! Both windows turn around their vertical axis at the same time, 180 degrees apart, so the
//! moment one of them turns its back to the user is the moment the other one faces them. Each
//! window is driven by its own leg, and each leg reports its midpoint and its end separately.
use super::{Handle, Shader, Side, WindowHandle};
use crate::display_action::Easing;
use crate::geometry;
use crate::{DisplayAction, State};
use serde::{Deserialize, Serialize};

const PIVOT: (f32, f32) = (0.5, 0.5);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the toolbox.
    Left,
    /// Back to the app.
    Right,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    /// Angle the incoming window starts at.
    pub fn start_angle(self) -> f32 {
        -180.0 * self.sign()
    }

    pub fn out_midpoint(self) -> f32 {
        90.0 * self.sign()
    }

    /// Where the outgoing window ends up, facing away.
    pub fn out_target(self) -> f32 {
        180.0 * self.sign()
    }

    pub fn in_midpoint(self) -> f32 {
        -90.0 * self.sign()
    }

    pub const fn sound(self) -> &'static str {
        match self {
            Self::Left => "shell/tracking-button/flip/click",
            Self::Right => "shell/tracking-button/flip-inverse/click",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    /// Waiting for the incoming window to draw its first frame.
    Preparing,
    Rotating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegPhase {
    ToMidpoint,
    ToTarget,
}

/// One window's half of a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<H: Handle> {
    /// The window currently being turned. On the way in this starts out as the placeholder when
    /// there is one.
    pub actor: WindowHandle<H>,
    pub phase: LegPhase,
}

/// Reported by [`Flip::rotation_completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipProgress {
    OutMidpoint,
    InMidpoint,
    InCompleted,
    OutCompleted,
}

#[derive(Debug, Clone)]
pub struct Flip<H: Handle> {
    pub target: Side,
    pub direction: Direction,
    pub src: WindowHandle<H>,
    /// Placeholder for `new_dst`: the outgoing actor of an app window that is being recreated.
    /// Cleared once its destroy has been completed.
    pub old_dst: Option<WindowHandle<H>>,
    pub new_dst: WindowHandle<H>,
    pub phase: FlipPhase,
    rotating_out: Option<Leg<H>>,
    rotating_in: Option<Leg<H>>,
}

impl<H: Handle> Flip<H> {
    /// Put both windows in their starting positions. Nothing moves until [`Flip::run`].
    pub fn prepare(
        state: &mut State<H>,
        target: Side,
        src: WindowHandle<H>,
        old_dst: Option<WindowHandle<H>>,
        new_dst: WindowHandle<H>,
        direction: Direction,
        shader: Option<Shader>,
    ) -> Self {
        // The source keeps focus, and therefore stays on top, until the midpoint.
        state.queue(DisplayAction::Activate(src));

        // Before any angle is set: a maximize change can kill effects on the window, which
        // would undo the rest of the preparation.
        if let (Some(from), Some(to)) = (state.window(src), state.window(new_dst)) {
            let (actions, _) = geometry::synchronize(from, to);
            actions.into_iter().for_each(|act| state.queue(act));
        }

        state.queue(DisplayAction::Show(src));
        if old_dst.is_some() {
            state.queue(DisplayAction::SetOpacity(new_dst, 0));
        } else {
            state.queue(DisplayAction::Show(new_dst));
        }
        // Hidden until the midpoint, to avoid stacked shadows.
        if direction == Direction::Left {
            state.queue(DisplayAction::SetOpacity(new_dst, 0));
        }

        let start = direction.start_angle();
        state.queue(DisplayAction::SetRotation(new_dst, start));
        state.queue(DisplayAction::SetRotation(src, 0.0));
        state.queue(DisplayAction::SetPivotPoint(new_dst, PIVOT.0, PIVOT.1));
        state.queue(DisplayAction::SetPivotPoint(src, PIVOT.0, PIVOT.1));

        if let Some(shader) = shader {
            state.queue(DisplayAction::SetEffect {
                window: src,
                shader,
                enabled: false,
            });
        }

        if let Some(placeholder) = old_dst {
            state.queue(DisplayAction::SetRotation(placeholder, start));
            state.queue(DisplayAction::SetPivotPoint(placeholder, PIVOT.0, PIVOT.1));
        }

        Self {
            target,
            direction,
            src,
            old_dst,
            new_dst,
            phase: FlipPhase::Preparing,
            rotating_out: Some(Leg {
                actor: src,
                phase: LegPhase::ToMidpoint,
            }),
            rotating_in: Some(Leg {
                actor: old_dst.unwrap_or(new_dst),
                phase: LegPhase::ToMidpoint,
            }),
        }
    }

    /// Rotation only starts once the incoming window has something on screen.
    pub fn is_ready(&self, state: &State<H>) -> bool {
        state
            .window(self.new_dst)
            .map_or(false, |w| w.first_frame_drawn)
    }

    /// Start both legs towards the midpoint.
    pub fn run(&mut self, state: &mut State<H>) {
        if self.phase != FlipPhase::Preparing {
            return;
        }
        self.phase = FlipPhase::Rotating;
        let duration_ms = state.flip_duration_ms;

        if let Some(leg) = self.rotating_out {
            state.queue(DisplayAction::EaseRotation {
                window: leg.actor,
                angle: self.direction.out_midpoint(),
                duration_ms,
                easing: Easing::EaseInQuad,
            });
        }
        if let Some(leg) = self.rotating_in {
            state.queue(DisplayAction::EaseRotation {
                window: leg.actor,
                angle: self.direction.in_midpoint(),
                duration_ms,
                easing: Easing::EaseInQuad,
            });
        }
        state.queue(DisplayAction::PlaySound(self.direction.sound().to_owned()));
    }

    /// Advance the leg that was turning `actor`. Returns `None` when `actor` is not part of
    /// this flip, e.g. a late notification for a leg that was killed.
    pub fn rotation_completed(
        &mut self,
        state: &mut State<H>,
        actor: WindowHandle<H>,
        shader: Option<Shader>,
    ) -> Option<FlipProgress> {
        if self.phase != FlipPhase::Rotating {
            return None;
        }
        let duration_ms = state.flip_duration_ms;

        if let Some(leg) = self.rotating_out.as_mut().filter(|l| l.actor == actor) {
            return match leg.phase {
                LegPhase::ToMidpoint => {
                    leg.phase = LegPhase::ToTarget;
                    if let Some(shader) = shader {
                        state.queue(DisplayAction::SetEffect {
                            window: actor,
                            shader,
                            enabled: true,
                        });
                    }
                    state.queue(DisplayAction::EaseRotation {
                        window: actor,
                        angle: self.direction.out_target(),
                        duration_ms,
                        easing: Easing::EaseOutQuad,
                    });
                    Some(FlipProgress::OutMidpoint)
                }
                LegPhase::ToTarget => {
                    self.rotating_out = None;
                    Some(FlipProgress::OutCompleted)
                }
            };
        }

        let leg = self.rotating_in.as_mut().filter(|l| l.actor == actor)?;
        match leg.phase {
            LegPhase::ToMidpoint => {
                leg.actor = self.new_dst;
                leg.phase = LegPhase::ToTarget;
                if let Some(placeholder) = self.old_dst.take() {
                    let angle = state.window(placeholder).map(|w| w.rotation);
                    if let Some(angle) = angle {
                        state.queue(DisplayAction::SetRotation(self.new_dst, angle));
                    }
                    state.queue(DisplayAction::CompletedDestroy(placeholder));
                }
                if let Some(shader) = shader {
                    state.queue(DisplayAction::SetEffect {
                        window: self.new_dst,
                        shader,
                        enabled: false,
                    });
                }
                state.queue(DisplayAction::Activate(self.new_dst));
                state.queue(DisplayAction::SetOpacity(self.new_dst, 255));
                state.queue(DisplayAction::EaseRotation {
                    window: self.new_dst,
                    angle: 0.0,
                    duration_ms,
                    easing: Easing::EaseOutQuad,
                });
                Some(FlipProgress::InMidpoint)
            }
            LegPhase::ToTarget => {
                self.rotate_in_completed(state);
                Some(FlipProgress::InCompleted)
            }
        }
    }

    fn rotate_in_completed(&mut self, state: &mut State<H>) {
        if self.rotating_in.take().is_none() {
            return;
        }
        if state.is_alive(self.new_dst) {
            state.queue(DisplayAction::SetRotation(self.new_dst, 0.0));
            state.queue(DisplayAction::SetOpacity(self.new_dst, 255));
        }
    }

    /// Turn the outgoing window all the way to its back, behind the incoming one.
    fn rotate_out_completed(&mut self, state: &mut State<H>) {
        let Some(leg) = self.rotating_out.take() else {
            return;
        };
        if state.is_alive(leg.actor) {
            state.queue(DisplayAction::SetRotation(leg.actor, self.direction.out_target()));
        }
    }

    /// Snap both windows to rest, the destination facing the user and focused. Calling it
    /// again does nothing.
    pub fn kill_effects(&mut self, state: &mut State<H>) {
        // Past the midpoint the destination already got focus.
        let before_midpoint = self
            .rotating_in
            .map_or(false, |leg| leg.phase == LegPhase::ToMidpoint);
        if before_midpoint && state.is_alive(self.new_dst) {
            state.queue(DisplayAction::Show(self.new_dst));
            state.queue(DisplayAction::Activate(self.new_dst));
        }
        self.rotate_in_completed(state);
        self.rotate_out_completed(state);
        if let Some(placeholder) = self.old_dst.take() {
            if state.is_alive(placeholder) {
                state.queue(DisplayAction::CompletedDestroy(placeholder));
            }
        }
    }

    pub fn rotating_in(&self) -> Option<WindowHandle<H>> {
        self.rotating_in.map(|_| self.new_dst)
    }

    pub fn rotating_out(&self) -> Option<WindowHandle<H>> {
        self.rotating_out.map(|l| l.actor)
    }

    /// Whether `actor` is being turned by this flip right now.
    pub fn is_turning(&self, actor: WindowHandle<H>) -> bool {
        self.rotating_out.map_or(false, |l| l.actor == actor)
            || self.rotating_in.map_or(false, |l| l.actor == actor)
    }

    pub fn is_finished(&self) -> bool {
        self.rotating_in.is_none() && self.rotating_out.is_none()
    }
}
