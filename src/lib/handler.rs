use std::sync::Arc;

use async_trait::async_trait;
use futures::{future::BoxFuture, Future};
use tokio::sync::RwLock;

use crate::Event;

/// Marker for types that can be used as router state. Derive it with
/// `#[derive(BotState)]`.
pub trait BotState: Clone + Send + Sync + 'static {}

impl BotState for () {}

/// `State` is shared between all handlers for a single chat. The router
/// creates one per chat ID by cloning its initial state.
#[derive(Clone, Default)]
pub struct State<T: Clone> {
    state: Arc<RwLock<T>>,
}

impl<T: Clone> State<T> {
    pub fn new(state: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns a new, independent `State` holding a clone of the current value.
    pub async fn from(&self) -> Self {
        Self::new(self.state.read().await.clone())
    }

    pub fn get(&self) -> &Arc<RwLock<T>> {
        &self.state
    }
}

/// `Action` represents an action to take after handling an event.
#[derive(Debug, Clone)]
pub enum Action {
    /// Continue to the next handler.
    Next,

    /// Stop handling the event.
    Done,

    /// Reply with the given text and continue to the next handler.
    ReplyText(String),

    /// Like `ReplyText`, rendered as MarkdownV2. Escape user input with
    /// [`crate::api::escape_md`].
    ReplyMarkdown(String),
}

/// Implemented by anything the router can call for an event.
#[async_trait]
pub trait BotHandlerFn<S: BotState>: Send + Sync {
    async fn run(&self, event: Event, state: State<S>) -> Result<Action, anyhow::Error>;
}

/// Wraps an async function (or closure) as a [`BotHandlerFn`].
pub struct BotHandler<S: BotState> {
    #[allow(clippy::type_complexity)]
    f: Box<
        dyn Fn(Event, State<S>) -> BoxFuture<'static, Result<Action, anyhow::Error>> + Send + Sync,
    >,
}

impl<S: BotState> BotHandler<S> {
    pub fn new<Func, Fut>(func: Func) -> Self
    where
        Func: Send + Sync + 'static + Fn(Event, State<S>) -> Fut,
        Fut: Send + 'static + Future<Output = Result<Action, anyhow::Error>>,
    {
        Self {
            f: Box::new(move |a, b| Box::pin(func(a, b))),
        }
    }
}

#[async_trait]
impl<S: BotState> BotHandlerFn<S> for BotHandler<S> {
    async fn run(&self, event: Event, state: State<S>) -> Result<Action, anyhow::Error> {
        (self.f)(event, state).await
    }
}

impl<S, Func, Fut> From<Func> for Box<dyn BotHandlerFn<S>>
where
    S: BotState,
    Func: Send + Sync + 'static + Fn(Event, State<S>) -> Fut,
    Fut: Send + 'static + Future<Output = Result<Action, anyhow::Error>>,
{
    fn from(func: Func) -> Self {
        Box::new(BotHandler::new(func))
    }
}
