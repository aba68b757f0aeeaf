//! Click-to-select: the student picks one named hit-region.

use glam::DVec2;

use crate::container::Container;
use crate::log::{debug, warn};
use crate::render::surface::{HitRegion, HitState, NodeId, SurfaceRef};
use crate::render::render;
use crate::spec::Item;

use super::{Outcome, OutcomeReceiver, Settle};

#[derive(Debug)]
enum ClickState {
    /// Regions still react to input.
    Armed { regions: Vec<(NodeId, HitRegion)> },
    Resolved(Outcome),
}

/// A rendered selection question waiting for its one activation.
#[derive(Debug)]
pub struct ClickSession {
    surface: Option<SurfaceRef>,
    answer: String,
    state: ClickState,
    settle: Settle,
}

/// Render `item` and arm its hit-regions.
///
/// A diagram without regions cannot be answered; it resolves at once as
/// incorrect with an empty selection.
pub fn geo_click(container: &mut Container, item: &Item) -> (ClickSession, OutcomeReceiver) {
    let surface = render(container, item.diagram.as_ref()).map(|figure| figure.surface());
    let regions = surface
        .as_ref()
        .map(|s| s.borrow().hit_regions())
        .unwrap_or_default();
    let (settle, receiver) = Settle::channel();
    let mut session = ClickSession {
        surface,
        answer: item.answer.clone(),
        state: ClickState::Armed { regions },
        settle,
    };
    if session.regions().is_empty() {
        warn!("selection question has no targets; resolving as incorrect");
        session.resolve(Outcome::Selection {
            correct: false,
            selected: String::new(),
        });
    }
    (session, receiver)
}

impl ClickSession {
    fn regions(&self) -> &[(NodeId, HitRegion)] {
        match &self.state {
            ClickState::Armed { regions } => regions,
            ClickState::Resolved(_) => &[],
        }
    }

    fn resolve(&mut self, outcome: Outcome) {
        self.settle.settle(outcome.clone());
        self.state = ClickState::Resolved(outcome);
    }

    fn set_state(&self, id: NodeId, state: HitState) {
        let Some(surface) = &self.surface else {
            return;
        };
        if let Some(region) = surface.borrow_mut().node_mut(id).and_then(|n| n.as_hit_mut()) {
            region.state = state;
        }
    }

    /// Name of the armed region under a device point; the nearest centre
    /// wins where regions overlap.
    pub fn hit_test(&self, device: DVec2) -> Option<&str> {
        self.regions()
            .iter()
            .filter(|(_, r)| r.contains(device))
            .min_by(|(_, a), (_, b)| a.center.distance(device).total_cmp(&b.center.distance(device)))
            .map(|(_, r)| r.name.as_str())
    }

    /// Pointer press at a device position.
    pub fn pointer_down(&mut self, device: DVec2) -> Option<Outcome> {
        let name = self.hit_test(device)?.to_string();
        self.activate(&name)
    }

    /// Activate the region called `name`.
    ///
    /// The first activation settles the question; anything after it, or an
    /// unknown name, returns `None` and changes nothing.
    pub fn activate(&mut self, name: &str) -> Option<Outcome> {
        let ClickState::Armed { regions } = &self.state else {
            return None;
        };
        if !regions.iter().any(|(_, r)| r.name == name) {
            return None;
        }
        let correct = name == self.answer;
        for (id, region) in regions {
            let state = if region.name == name {
                if correct { HitState::Correct } else { HitState::Wrong }
            } else if !correct && region.name == self.answer {
                HitState::Revealed
            } else {
                HitState::Disabled
            };
            self.set_state(*id, state);
        }
        debug!(selected = name, correct, "selection");
        let outcome = Outcome::Selection {
            correct,
            selected: name.to_string(),
        };
        self.resolve(outcome.clone());
        Some(outcome)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            ClickState::Resolved(outcome) => Some(outcome),
            ClickState::Armed { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }

    /// The figure's surface, if anything was drawn.
    pub fn surface(&self) -> Option<SurfaceRef> {
        self.surface.clone()
    }
}
