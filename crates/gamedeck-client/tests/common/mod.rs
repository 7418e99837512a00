use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};

use gamedeck_client::ClientConfig;
use gamedeck_core::{ErrorBody, Game, GameCreatePayload, ListEnvelope};

/// How the mock answers `GET /games`.
#[derive(Debug, Clone)]
pub enum ListMode {
    Envelope,
    /// The legacy `[...]` body.
    BareArray,
    Failure(StatusCode, String),
}

/// A `POST /games` request as the mock received it.
#[derive(Debug, Clone)]
pub struct ReceivedCreate {
    pub body: String,
    pub content_type: Option<String>,
}

struct MockState {
    games: Vec<Game>,
    list_mode: ListMode,
    create_status: StatusCode,
    received: Vec<ReceivedCreate>,
}

type SharedState = Arc<Mutex<MockState>>;

/// In-process games service on an ephemeral port.
pub struct MockGamesServer {
    pub addr: SocketAddr,
    state: SharedState,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl MockGamesServer {
    /// Start a mock with an empty catalog.
    pub async fn new() -> Self {
        Self::with_games(Vec::new()).await
    }

    /// Start a mock serving `games` from `GET /games`.
    pub async fn with_games(games: Vec<Game>) -> Self {
        let state: SharedState = Arc::new(Mutex::new(MockState {
            games,
            list_mode: ListMode::Envelope,
            create_status: StatusCode::CREATED,
            received: Vec::new(),
        }));

        let app = Router::new()
            .route("/games", axum::routing::get(list_games).post(create_game))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            state,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client config pointed at this mock.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url(),
            ..ClientConfig::default()
        }
    }

    pub fn set_list_mode(&self, mode: ListMode) {
        self.state.lock().unwrap().list_mode = mode;
    }

    pub fn set_create_status(&self, status: StatusCode) {
        self.state.lock().unwrap().create_status = status;
    }

    /// Current catalog, including games created through the API.
    pub fn games(&self) -> Vec<Game> {
        self.state.lock().unwrap().games.clone()
    }

    pub fn received(&self) -> Vec<ReceivedCreate> {
        self.state.lock().unwrap().received.clone()
    }
}

async fn list_games(State(state): State<SharedState>) -> Response {
    let state = state.lock().unwrap();
    match &state.list_mode {
        ListMode::Envelope => Json(ListEnvelope::new(state.games.clone())).into_response(),
        ListMode::BareArray => Json(state.games.clone()).into_response(),
        ListMode::Failure(status, message) => (
            *status,
            Json(ErrorBody {
                message: message.clone(),
            }),
        )
            .into_response(),
    }
}

async fn create_game(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut state = state.lock().unwrap();
    state.received.push(ReceivedCreate {
        body: body.clone(),
        content_type,
    });

    let status = state.create_status;
    if !status.is_success() {
        let error = ErrorBody {
            message: "game exist".to_string(),
        };
        return (status, Json(error)).into_response();
    }

    let Ok(payload) = serde_json::from_str::<GameCreatePayload>(&body) else {
        let error = ErrorBody {
            message: "bad http request".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    };
    let game = Game {
        id: uuid::Uuid::new_v4().to_string(),
        name: payload.name,
        description: payload.description,
        image: payload.image,
        created_at: Some("2026-01-01T00:00:00Z".to_string()),
        updated_at: None,
    };
    state.games.push(game.clone());
    (status, Json(serde_json::json!({ "data": game }))).into_response()
}

/// A loopback address with nothing listening on it.
pub fn dead_config() -> ClientConfig {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    ClientConfig {
        base_url: format!("http://{addr}"),
        ..ClientConfig::default()
    }
}
