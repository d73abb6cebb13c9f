//! The wheel's view model.
//!
//! [WheelModel] is a reducer: the UI feeds it [Event]s and carries out the [Effect] each one
//! returns. It never touches the network or the page itself, so the whole spin flow can be
//! driven from plain tests.

use std::time::Duration;

use rand::Rng;

use crate::{
    restaurant::CategoryFilter,
    selection::meal_pick_count,
    wheel::{SpinPlan, WheelItem, WheelKind, WheelLayout, plan_spin},
};

/// Shown when a spin request or its animation cannot complete.
pub const SPIN_FAILED_MESSAGE: &str = "Error during spin. Please try again.";

/// Where the wheel is in the spin cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// Waiting for the user to spin.
    Idle,
    /// A spin request is in flight.
    Requesting,
    /// The wheel is animating towards the winner. The winners stay hidden until it stops.
    Spinning {
        /// The items the server picked.
        winners: Vec<T>,
        /// How the wheel gets to the first winner.
        plan: SpinPlan,
        /// The absolute rotation the wheel is turning to.
        rotation: f64,
    },
    /// The wheel has stopped and the winners are shown.
    Revealed {
        /// The items the server picked.
        winners: Vec<T>,
    },
    /// The last action failed. The wheel can be spun again.
    Failed {
        /// Shown to the user in place of a result.
        message: String,
    },
}

/// Something that happened in the UI or came back from the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    /// The item list for the active filter arrived.
    ItemsLoaded(Vec<T>),
    /// The user picked another category.
    FilterChanged(CategoryFilter),
    /// The user changed how many meals to pick.
    PickCountChanged(i64),
    /// The user pressed spin.
    SpinRequested,
    /// The server chose the winners.
    WinnersReceived(Vec<T>),
    /// The spin animation completed.
    AnimationFinished,
    /// A request to the server failed.
    RequestFailed,
    /// An admin changed the catalogue, so the cached list is stale.
    CatalogInvalidated,
}

/// Work the UI should do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Fetch the item list for `filter`.
    FetchItems {
        /// The category to list.
        filter: CategoryFilter,
    },
    /// Ask the server to pick `count` winners under `filter`.
    RequestSpin {
        /// The category to pick from.
        filter: CategoryFilter,
        /// How many winners to ask for.
        count: usize,
    },
    /// Turn the wheel to the absolute `rotation` over `duration`.
    StartAnimation {
        /// Target rotation in degrees.
        rotation: f64,
        /// How long the turn should take.
        duration: Duration,
    },
}

/// State of a meal or restaurant wheel.
#[derive(Debug, Clone)]
pub struct WheelModel<T> {
    kind: WheelKind,
    items: Option<Vec<T>>,
    filter: CategoryFilter,
    pick_count: usize,
    layout: WheelLayout,
    rotation: f64,
    phase: Phase<T>,
}

impl<T> WheelModel<T>
where
    T: WheelItem + Clone,
{
    /// An idle wheel with no items loaded.
    pub fn new(kind: WheelKind) -> Self {
        Self {
            kind,
            items: None,
            filter: CategoryFilter::All,
            pick_count: 1,
            layout: WheelLayout::default(),
            rotation: 0.0,
            phase: Phase::Idle,
        }
    }

    /// The request to make when the wheel is first shown.
    pub fn init(&self) -> Effect {
        Effect::FetchItems {
            filter: self.filter,
        }
    }

    /// Apply `event` and return the effect the UI should carry out.
    pub fn update<R>(&mut self, event: Event<T>, rng: &mut R) -> Effect
    where
        R: Rng + ?Sized,
    {
        match event {
            Event::ItemsLoaded(mut items) => {
                let filter = self.filter;
                // A response for a previous filter may arrive late.
                items.retain(|item| item.category().is_none_or(|category| filter.matches(category)));
                self.layout = WheelLayout::new(&items);
                self.items = Some(items);
                Effect::None
            }
            Event::FilterChanged(filter) => {
                if self.is_busy() || filter == self.filter {
                    return Effect::None;
                }

                self.filter = filter;
                self.clear_items();
                self.phase = Phase::Idle;
                Effect::FetchItems { filter }
            }
            Event::PickCountChanged(count) => {
                if self.kind == WheelKind::Meal {
                    self.pick_count = meal_pick_count(Some(count));
                }
                Effect::None
            }
            Event::SpinRequested => {
                if self.is_busy() {
                    return Effect::None;
                }

                if self.layout.is_empty() {
                    self.phase = Phase::Failed {
                        message: self.kind.empty_message().to_owned(),
                    };
                    return Effect::None;
                }

                self.phase = Phase::Requesting;
                Effect::RequestSpin {
                    filter: self.filter,
                    count: self.pick_count,
                }
            }
            Event::WinnersReceived(winners) => {
                if !matches!(self.phase, Phase::Requesting) {
                    return Effect::None;
                }

                let plan = winners
                    .first()
                    .and_then(|winner| plan_spin(&self.layout, winner.item_id(), self.kind, rng));

                match plan {
                    Some(plan) => {
                        // Start from the next whole turn so the plan's landing angle still holds.
                        let rotation = (self.rotation / 360.0).ceil() * 360.0 + plan.rotation;
                        let effect = Effect::StartAnimation {
                            rotation,
                            duration: plan.duration,
                        };
                        self.phase = Phase::Spinning {
                            winners,
                            plan,
                            rotation,
                        };
                        effect
                    }
                    None => {
                        self.fail();
                        Effect::None
                    }
                }
            }
            Event::AnimationFinished => {
                if let Phase::Spinning {
                    winners, rotation, ..
                } = &self.phase
                {
                    self.rotation = *rotation;
                    self.phase = Phase::Revealed {
                        winners: winners.clone(),
                    };
                }
                Effect::None
            }
            Event::RequestFailed => {
                self.fail();
                Effect::None
            }
            Event::CatalogInvalidated => {
                self.clear_items();
                Effect::FetchItems {
                    filter: self.filter,
                }
            }
        }
    }

    /// The current phase.
    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    /// The sectors for the cached items.
    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    /// The cached items, or `None` if they have not been loaded since the last invalidation.
    pub fn items(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    /// The active category filter.
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// How many winners the next spin asks for.
    pub fn pick_count(&self) -> usize {
        self.pick_count
    }

    /// The wheel's resting rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The winners of the last spin, once the wheel has stopped.
    pub fn revealed(&self) -> Option<&[T]> {
        match &self.phase {
            Phase::Revealed { winners } => Some(winners.as_slice()),
            _ => None,
        }
    }

    /// The message to show for the last failure.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether a spin is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Requesting | Phase::Spinning { .. })
    }

    fn clear_items(&mut self) {
        self.items = None;
        self.layout = WheelLayout::default();
    }

    fn fail(&mut self) {
        self.phase = Phase::Failed {
            message: SPIN_FAILED_MESSAGE.to_owned(),
        };
    }
}
