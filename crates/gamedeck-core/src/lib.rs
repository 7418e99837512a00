pub mod envelope;
pub mod game;

pub use envelope::{EnvelopeError, ErrorBody, ListEnvelope, unwrap_list};
pub use game::{Game, GameCreatePayload, GameId};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game::{Game, GameCreatePayload};

    /// Create a test game with the given id and a fixed creation timestamp.
    pub fn make_game(id: &str) -> Game {
        Game {
            id: id.to_string(),
            name: format!("Game {id}"),
            description: format!("Description of {id}"),
            image: format!("/images/{id}.png"),
            created_at: Some("2026-01-01T00:00:00Z".to_string()),
            updated_at: None,
        }
    }

    /// Create `n` test games with sequential ids starting at 1.
    pub fn make_games(n: usize) -> Vec<Game> {
        (1..=n).map(|i| make_game(&i.to_string())).collect()
    }

    /// Create a create-payload whose fields are derived from `name`.
    pub fn make_payload(name: &str) -> GameCreatePayload {
        GameCreatePayload::new(name, format!("About {name}"), format!("{name}.png"))
    }
}
