pub type Id = i64;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Id,
    pub email: String,
    /// PHC string, never the plaintext
    pub password: String,
}
