use super::{project, user, NewProject, Project, User};
use log::{debug, info, trace};
use rusqlite::{Connection, OptionalExtension, Result as SqlResult, Row};
use std::path::Path;

type Result<T> = SqlResult<Option<T>>;

pub struct Database {
    conn: Connection,
}

/// Build the database.
impl Database {
    pub fn open(path: impl AsRef<Path>) -> SqlResult<Database> {
        let conn = Connection::open(path.as_ref())?;
        trace!("Opened database connection to {}", path.as_ref().display());
        Database::init_db(conn)
    }

    pub fn in_memory() -> SqlResult<Database> {
        let conn = Connection::open_in_memory()?;
        trace!("Opened in-memory database connection.");
        Database::init_db(conn)
    }

    fn init_db(conn: Connection) -> SqlResult<Database> {
        trace!("Initializing database...");

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                email    TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS projects (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                owner       INTEGER NOT NULL,
                name        TEXT NOT NULL,
                description TEXT NOT NULL,
                FOREIGN KEY(owner) REFERENCES users(id)
            );",
        )?;

        info!("Finished initializing database");

        Ok(Database { conn })
    }
}

/// User stuff
impl Database {
    /// `password` must already be hashed.
    pub fn add_user(&self, email: &str, password: &str) -> SqlResult<user::Id> {
        debug!("Adding user {} to database", email);
        self.conn.execute(
            "INSERT INTO users (email, password) VALUES (?1, ?2)",
            (email, password),
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User> {
        debug!("Getting user (email: {})", email);
        self.conn
            .query_row(
                "SELECT id, email, password FROM users WHERE email=?1",
                (email,),
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        password: row.get(2)?,
                    })
                },
            )
            .optional()
    }
}

/// Project stuff
impl Database {
    pub fn add_project(&self, owner: user::Id, project: &NewProject) -> SqlResult<project::Id> {
        debug!("Adding project for user {} to database", owner);
        self.conn.execute(
            "INSERT INTO projects (owner, name, description) VALUES (?1, ?2, ?3)",
            (owner, project.name.as_str(), project.description.as_str()),
        )?;

        let id = self.conn.last_insert_rowid();
        info!("Created project {}: {}", id, project.name);

        Ok(id)
    }

    /// All of `owner`'s projects, newest first.
    pub fn get_projects_of(&self, owner: user::Id) -> SqlResult<Vec<Project>> {
        trace!("Getting projects of user {}", owner);

        let mut stmt = self.conn.prepare(
            "SELECT id, owner, name, description FROM projects WHERE owner=?1 ORDER BY id DESC",
        )?;
        let projects = stmt
            .query_map((owner,), map_project)?
            .collect::<SqlResult<Vec<_>>>();

        projects
    }
}

fn map_project(row: &Row) -> SqlResult<Project> {
    Ok(Project {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
    })
}
