//! Click-to-place: the student drops a point on the grid and confirms it.

use glam::{DVec2, dvec2};

use crate::container::{Container, WidgetKind, WidgetRef};
use crate::errors::AnswerError;
use crate::log::{debug, warn};
use crate::render::context::{Context, PointStyle};
use crate::render::surface::NodeId;
use crate::render::{defaults, render};
use crate::spec::Item;
use crate::types::{fmt_pair, fmt_pair_exact};

use super::{Outcome, OutcomeReceiver, Settle};

/// Grid snapping for placed points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRule {
    pub enabled: bool,
    pub step: f64,
}

impl Default for SnapRule {
    fn default() -> Self {
        Self {
            enabled: true,
            step: defaults::SNAP_STEP,
        }
    }
}

impl SnapRule {
    /// Round each axis to the nearest multiple of `step`; halves round up.
    ///
    /// A disabled rule or a non-positive step leaves the point as is.
    pub fn apply(&self, p: DVec2) -> DVec2 {
        if !self.enabled || !(self.step > 0.0) {
            return p;
        }
        let snap = |v: f64| (v / self.step + 0.5).floor() * self.step;
        dvec2(snap(p.x), snap(p.y))
    }
}

/// Parse a placement answer written as `"x,y"`.
pub fn parse_answer(answer: &str) -> Result<DVec2, AnswerError> {
    let (x, y) = answer
        .split_once(',')
        .ok_or_else(|| AnswerError::Shape(answer.to_string()))?;
    let number = |s: &str| {
        let s = s.trim();
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AnswerError::Number(s.to_string()))
    };
    Ok(dvec2(number(x)?, number(y)?))
}

#[derive(Debug)]
enum PlaceState {
    Unplaced,
    Placed { point: DVec2, marker: NodeId },
    Resolved(Outcome),
}

/// A rendered placement question.
#[derive(Debug)]
pub struct PlaceSession {
    context: Option<Context>,
    snap: SnapRule,
    answer: String,
    instruction: WidgetRef,
    confirm: WidgetRef,
    state: PlaceState,
    settle: Settle,
}

/// Render `item`, then add the instruction and a disabled confirm button.
///
/// Placement needs a Coordinate Context to map clicks back to math space; a
/// diagram without one resolves at once as incorrect.
pub fn geo_place(container: &mut Container, item: &Item) -> (PlaceSession, OutcomeReceiver) {
    let context = render(container, item.diagram.as_ref()).and_then(|f| f.into_context());
    let snap = item
        .diagram
        .as_ref()
        .and_then(|d| d.snap())
        .map_or_else(SnapRule::default, |(enabled, step)| SnapRule { enabled, step });
    let instruction = container.append_widget(
        WidgetKind::Instruction,
        item.instruction.as_deref().unwrap_or(defaults::INSTRUCTION),
        true,
    );
    let confirm = container.append_widget(WidgetKind::Confirm, defaults::CONFIRM_LABEL, false);
    let (settle, receiver) = Settle::channel();

    let mut session = PlaceSession {
        context,
        snap,
        answer: item.answer.clone(),
        instruction,
        confirm,
        state: PlaceState::Unplaced,
        settle,
    };
    if session.context.is_none() {
        warn!("placement question has no plane figure; resolving as incorrect");
        session.finish(Outcome::Placement {
            correct: false,
            placed: String::new(),
        });
    }
    (session, receiver)
}

impl PlaceSession {
    fn finish(&mut self, outcome: Outcome) {
        self.instruction.borrow_mut().visible = false;
        {
            let mut confirm = self.confirm.borrow_mut();
            confirm.visible = false;
            confirm.enabled = false;
        }
        self.settle.settle(outcome.clone());
        self.state = PlaceState::Resolved(outcome);
    }

    /// Where a click at `device` lands: inverse-mapped, snapped, then
    /// clamped to the bounds.
    pub fn resolve_point(&self, device: DVec2) -> Option<DVec2> {
        let ctx = self.context.as_ref()?;
        let raw = ctx.to_math(device);
        Some(ctx.bounds().clamp(self.snap.apply(raw)))
    }

    /// Pointer press at a device position: (re)place the provisional marker.
    pub fn pointer_down(&mut self, device: DVec2) -> Option<DVec2> {
        if matches!(self.state, PlaceState::Resolved(_)) {
            return None;
        }
        let point = self.resolve_point(device)?;
        let ctx = self.context.as_mut()?;
        if let PlaceState::Placed { marker, .. } = self.state {
            ctx.remove(marker);
        }
        let style = PointStyle {
            radius: defaults::MARKER_RADIUS,
            ..PointStyle::colored(defaults::MARKER_COLOR)
        };
        let marker = ctx.point(point, None, &style);
        self.state = PlaceState::Placed { point, marker };
        self.confirm.borrow_mut().enabled = true;
        debug!(x = point.x, y = point.y, "placed");
        Some(point)
    }

    /// Commit the placed point; `None` before anything is placed or after
    /// the question is settled.
    pub fn confirm(&mut self) -> Option<Outcome> {
        let PlaceState::Placed { point, marker } = self.state else {
            return None;
        };
        let expected = parse_answer(&self.answer);
        let correct = expected.as_ref().is_ok_and(|&q| q == point);

        if let Some(ctx) = self.context.as_mut() {
            ctx.remove(marker);
            let verdict = if correct {
                defaults::CORRECT_COLOR
            } else {
                defaults::WRONG_COLOR
            };
            let style = PointStyle {
                radius: defaults::MARKER_RADIUS,
                ..PointStyle::colored(verdict)
            };
            ctx.point(point, None, &style);
            match &expected {
                Ok(q) if !correct => {
                    let reveal = PointStyle {
                        radius: defaults::MARKER_RADIUS,
                        ..PointStyle::colored(defaults::REVEAL_COLOR)
                    };
                    ctx.point(*q, Some(&fmt_pair(*q)), &reveal);
                }
                Err(_) => warn!(answer = %self.answer, "placement answer is not an x,y pair"),
                Ok(_) => {}
            }
        }

        let placed = fmt_pair_exact(point);
        debug!(placed = %placed, correct, "placement confirmed");
        let outcome = Outcome::Placement { correct, placed };
        self.finish(outcome.clone());
        Some(outcome)
    }

    /// The provisional point, if one is placed and not yet confirmed.
    pub fn placed(&self) -> Option<DVec2> {
        match self.state {
            PlaceState::Placed { point, .. } => Some(point),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            PlaceState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }
}
