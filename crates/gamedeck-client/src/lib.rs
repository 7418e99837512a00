pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use api::{CreateResponse, GamesApi, HttpGamesApi};
pub use config::{ClientConfig, ConfigError, FetchOrdering, StoreConfig};
pub use error::ApiError;
pub use store::{GameStore, StoreState};

/// Build the HTTP API client and the store from one config.
pub fn build_store(config: &ClientConfig) -> Result<GameStore<HttpGamesApi>, ApiError> {
    let api = HttpGamesApi::new(config)?;
    Ok(GameStore::with_config(api, &config.store))
}

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    use bytes::Bytes;
    use reqwest::StatusCode;
    use tokio::sync::oneshot;

    use gamedeck_core::{Game, GameCreatePayload};

    use crate::api::{CreateResponse, GamesApi};
    use crate::error::ApiError;

    type ListReply = Result<Vec<Game>, ApiError>;
    type CreateReply = Result<CreateResponse, ApiError>;

    /// A `GamesApi` whose calls stay pending until the test resolves them.
    ///
    /// Each `push_*` queues one pending reply and returns its sender; calls
    /// take queued replies in FIFO order. A call with nothing queued panics.
    #[derive(Default)]
    pub struct ScriptedApi {
        lists: Mutex<VecDeque<oneshot::Receiver<ListReply>>>,
        creates: Mutex<VecDeque<oneshot::Receiver<CreateReply>>>,
        created: Mutex<Vec<GameCreatePayload>>,
    }

    impl ScriptedApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_list(&self) -> oneshot::Sender<ListReply> {
            let (tx, rx) = oneshot::channel();
            self.lists.lock().unwrap().push_back(rx);
            tx
        }

        pub fn push_create(&self) -> oneshot::Sender<CreateReply> {
            let (tx, rx) = oneshot::channel();
            self.creates.lock().unwrap().push_back(rx);
            tx
        }

        /// Payloads passed to `create_game`, in call order.
        pub fn created(&self) -> Vec<GameCreatePayload> {
            self.created.lock().unwrap().clone()
        }
    }

    impl GamesApi for ScriptedApi {
        fn list_games(&self) -> impl Future<Output = ListReply> + Send {
            let rx = self.lists.lock().unwrap().pop_front();
            async move {
                let rx = rx.expect("list_games called with no scripted reply");
                rx.await.expect("scripted list reply dropped")
            }
        }

        fn create_game(
            &self,
            payload: &GameCreatePayload,
        ) -> impl Future<Output = CreateReply> + Send {
            self.created.lock().unwrap().push(payload.clone());
            let rx = self.creates.lock().unwrap().pop_front();
            async move {
                let rx = rx.expect("create_game called with no scripted reply");
                rx.await.expect("scripted create reply dropped")
            }
        }
    }

    /// A `201 Created` response with an empty body.
    pub fn created_response() -> CreateResponse {
        CreateResponse {
            status: StatusCode::CREATED,
            body: Bytes::new(),
        }
    }
}
