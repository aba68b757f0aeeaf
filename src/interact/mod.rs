//! Interactive questions on top of a rendered figure.
//!
//! Both flows render the item's diagram into the container, then wait for
//! input fed to the returned session. The verdict is delivered once through
//! an [`OutcomeReceiver`], a future that resolves when the session settles.
//! A session dropped before settling makes the receiver yield
//! [`Abandoned`].

pub mod place;
pub mod select;

pub use place::{PlaceSession, SnapRule, geo_place, parse_answer};
pub use select::{ClickSession, geo_click};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

use crate::errors::Abandoned;

/// Final verdict of one interactive diagram.
///
/// Serializes flat: `{"correct": true, "selected": "N"}` or
/// `{"correct": false, "placed": "3,3"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Selection { correct: bool, selected: String },
    Placement { correct: bool, placed: String },
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        match self {
            Outcome::Selection { correct, .. } | Outcome::Placement { correct, .. } => *correct,
        }
    }

    /// The student's answer: a target name or an `"x,y"` pair.
    pub fn answer(&self) -> &str {
        match self {
            Outcome::Selection { selected, .. } => selected,
            Outcome::Placement { placed, .. } => placed,
        }
    }
}

/// Receiving half of an interaction; resolves exactly once.
#[derive(Debug)]
pub struct OutcomeReceiver(oneshot::Receiver<Outcome>);

impl OutcomeReceiver {
    /// The outcome if it is already settled, without waiting.
    pub fn try_outcome(&mut self) -> Result<Option<Outcome>, Abandoned> {
        self.0.try_recv().map_err(|_| Abandoned)
    }
}

impl Future for OutcomeReceiver {
    type Output = Result<Outcome, Abandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx).map(|r| r.map_err(|_| Abandoned))
    }
}

/// Sending half, held by a session until it settles.
#[derive(Debug)]
pub(crate) struct Settle(Option<oneshot::Sender<Outcome>>);

impl Settle {
    pub(crate) fn channel() -> (Self, OutcomeReceiver) {
        let (tx, rx) = oneshot::channel();
        (Self(Some(tx)), OutcomeReceiver(rx))
    }

    /// Deliver the outcome; only the first call has any effect.
    pub(crate) fn settle(&mut self, outcome: Outcome) -> bool {
        match self.0.take() {
            // the receiver may already be gone; the verdict is still final
            Some(tx) => {
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }
}
