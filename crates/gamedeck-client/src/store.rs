use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

use gamedeck_core::{Game, GameCreatePayload};

use crate::api::{CreateResponse, GamesApi};
use crate::config::{FetchOrdering, StoreConfig};
use crate::error::ApiError;

/// Everything the UI layer reads from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Exactly the list from the last committed fetch, in service order.
    pub games: Vec<Game>,
    /// True while a create request is in flight.
    pub is_game_creating: bool,
}

/// Client-side cache of the game catalog.
///
/// Create one at startup and hand it (by reference or `Arc`) to whatever
/// needs it. State changes only through [`GameStore::fetch_games`] and
/// [`GameStore::fetch_create_game`]; consumers observe them through
/// [`GameStore::subscribe`] or the getters.
///
/// There is no locking across awaits. Overlapping fetches race (see
/// [`FetchOrdering`]) and overlapping creates share one flag, so the first
/// create to settle lowers it for all of them.
pub struct GameStore<A> {
    api: A,
    state: watch::Sender<StoreState>,
    ordering: FetchOrdering,
    /// Last generation handed out by `fetch_games`.
    issued: AtomicU64,
    /// Generation of the list currently in `games`.
    committed: AtomicU64,
}

impl<A: GamesApi> GameStore<A> {
    pub fn new(api: A) -> Self {
        Self::with_config(api, &StoreConfig::default())
    }

    pub fn with_config(api: A, config: &StoreConfig) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            api,
            state,
            ordering: config.fetch_ordering,
            issued: AtomicU64::new(0),
            committed: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn games(&self) -> Vec<Game> {
        self.state.borrow().games.clone()
    }

    pub fn is_game_creating(&self) -> bool {
        self.state.borrow().is_game_creating
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Fetch the game list and replace `games` with it.
    ///
    /// The generation ticket is taken when this is called; the HTTP request
    /// itself goes out when the future is first polled. Under
    /// [`FetchOrdering::LastIssued`] "issued" therefore means call order. On
    /// error `games` is left untouched and the error is returned unchanged.
    pub fn fetch_games(&self) -> impl Future<Output = Result<(), ApiError>> + Send + '_ {
        let generation = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        let request = self.api.list_games();
        async move {
            let games = request.await?;
            self.commit_games(generation, games);
            Ok(())
        }
    }

    /// Submit a new game.
    ///
    /// `is_game_creating` is raised before this returns and lowered once the
    /// request settles, whichever way it settles, or when the future is
    /// dropped. The service's response or error is returned unchanged.
    pub fn fetch_create_game(
        &self,
        payload: GameCreatePayload,
    ) -> impl Future<Output = Result<CreateResponse, ApiError>> + Send + '_ {
        let flag = CreatingFlag::raise(&self.state);
        async move {
            let _flag = flag;
            self.api.create_game(&payload).await
        }
    }

    fn commit_games(&self, generation: u64, games: Vec<Game>) {
        let ordering = self.ordering;
        self.state.send_if_modified(|state| {
            let committed = self.committed.load(Ordering::Relaxed);
            if ordering == FetchOrdering::LastIssued && generation <= committed {
                tracing::debug!(generation, committed, "Dropping stale game list");
                return false;
            }
            self.committed.store(generation, Ordering::Relaxed);

            warn_on_identity_drift(&state.games, &games);
            tracing::debug!(count = games.len(), generation, "Committed game list");
            state.games = games;
            true
        });
    }
}

/// Report records whose creation time changed between two lists.
fn warn_on_identity_drift(held: &[Game], incoming: &[Game]) {
    if held.is_empty() {
        return;
    }
    let held: HashMap<&str, &Game> = held.iter().map(|g| (g.id.as_str(), g)).collect();
    for game in incoming {
        if let Some(prior) = held.get(game.id.as_str())
            && prior.conflicts_with(game)
        {
            tracing::warn!(
                id = %game.id,
                before = ?prior.created_at,
                after = ?game.created_at,
                "Game createdAt changed between fetches"
            );
        }
    }
}

/// Keeps `is_game_creating` raised until dropped.
struct CreatingFlag<'a> {
    state: &'a watch::Sender<StoreState>,
}

impl<'a> CreatingFlag<'a> {
    fn raise(state: &'a watch::Sender<StoreState>) -> Self {
        state.send_if_modified(|s| !std::mem::replace(&mut s.is_game_creating, true));
        Self { state }
    }
}

impl Drop for CreatingFlag<'_> {
    fn drop(&mut self) {
        self.state
            .send_if_modified(|s| std::mem::replace(&mut s.is_game_creating, false));
    }
}
