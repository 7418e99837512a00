use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a catalog record.
pub type GameId = String;

/// A catalog record as returned by the games service.
///
/// `id` and `created_at` are assigned by the server and must not change for a
/// given record once observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub description: String,
    /// Image URI or path, passed through verbatim.
    pub image: String,
    pub created_at: Option<String>,
    /// Absent on records that were never updated.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Game {
    /// Whether `other` describes the same record with a different creation
    /// timestamp.
    pub fn conflicts_with(&self, other: &Game) -> bool {
        self.id == other.id && self.created_at != other.created_at
    }

    /// Field-wise comparison that ignores timestamps.
    pub fn same_content(&self, other: &Game) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.image == other.image
    }
}

/// Body of a create request. Identity and timestamps are server-assigned and
/// have no place here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCreatePayload {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl GameCreatePayload {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: image.into(),
        }
    }
}
