use super::user;

pub type Id = i64;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Project {
    pub id: Id,
    pub owner: user::Id,
    pub name: String,
    pub description: String,
}

/// Basically just a [`Project`] without an id or owner.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}
