mod database;
pub mod project;
pub mod session;
pub mod user;

use crate::auth::{self, token::TokenSigner};
use rand::RngCore;
use rand_core::OsRng;
use tokio::sync::Mutex;

pub use database::Database;
pub use project::{NewProject, Project};
pub use session::Session;
pub use user::User;

pub struct AppState {
    pub database: Mutex<Database>,
    pub signer: TokenSigner,
    /// Hash checked against when a login names an unknown email,
    /// so both failure paths do the same work.
    decoy_hash: String,
}

impl AppState {
    pub fn new(database: Database, signer: TokenSigner) -> Result<AppState, auth::hash::Error> {
        let mut decoy = [0u8; 16];
        OsRng.fill_bytes(&mut decoy);
        let decoy_hash = auth::hash::hash_password(&format!("{:x?}", decoy))?;

        Ok(AppState {
            database: Mutex::new(database),
            signer,
            decoy_hash,
        })
    }

    pub(crate) fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }
}
