//! Loading a family tree from JSON.
//!
//! The file mirrors the record types of [`crate::construct`]:
//!
//! ```json
//! {
//!   "people": [
//!     { "handle": "p1", "gramps_id": "I0001", "gender": "male",
//!       "given_name": "Jan", "surname": "Smit", "birth": "1901-03-04",
//!       "parent_family_list": ["f1"], "family_list": [] }
//!   ],
//!   "families": [
//!     { "handle": "f1", "gramps_id": "F0001", "father": "p0",
//!       "child_ref_list": [ { "child": "p1", "father_relation": "birth" } ] }
//!   ]
//! }
//! ```
//!
//! Relations default to `birth` and gender to `unknown` when left out.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::construct::{Database, Family, Person};
use crate::error::{LineageError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct TreeFile {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub families: Vec<Family>,
}

impl TreeFile {
    /// Keeps every record and checks that all references resolve.
    pub fn into_database(self) -> Result<Database> {
        let mut database = Database::new();
        for person in self.people {
            let (kept, previously_kept) = database.add_person(person)?;
            if previously_kept {
                return Err(LineageError::Import(format!(
                    "person handle {} ({}) appears twice",
                    kept.handle(),
                    database.person_id(kept.handle()).unwrap_or("no id")
                )));
            }
        }
        for family in self.families {
            let (kept, previously_kept) = database.add_family(family)?;
            if previously_kept {
                return Err(LineageError::Import(format!("family handle {} appears twice", kept.handle())));
            }
        }
        database.validate()?;
        Ok(database)
    }
}

pub fn load_json<R: Read>(reader: R) -> Result<Database> {
    let tree: TreeFile = serde_json::from_reader(reader)?;
    tree.into_database()
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Database> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let database = load_json(BufReader::new(file))?;
    info!(
        path = %path.display(),
        people = database.person_keeper().len(),
        families = database.family_keeper().len(),
        "family tree loaded"
    );
    Ok(database)
}
