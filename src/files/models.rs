use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rocket::serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "UPPERCASE")]
pub enum Visibility {
    /// visible to every identity
    Public,
    /// only visible to its owner
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Private => "PRIVATE",
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PUBLIC" => Ok(Visibility::Public),
            "PRIVATE" => Ok(Visibility::Private),
            other => Err(format!("{other} is not a valid visibility")),
        }
    }
}

/// one shareable file, as seen by a specific viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    /// never empty
    pub download_url: String,
    pub visibility: Visibility,
    pub owner_id: String,
    pub owner_display_name: String,
    /// computed against the viewer when the file was fetched, never stored
    pub is_owned_by_viewer: bool,
}
