use std::sync::Arc;

// used to keep the one-to-one mapping between gramps ids and handles
use bimap::BiMap;

// keepers use HashMap with a fast hasher
use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use seahash::SeaHasher;

// used to print out readable forms of a construct
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::DataAccessor;
use crate::error::{LineageError, Result};

pub type HandleHasher = BuildHasherDefault<SeaHasher>;

// ------------- Handle -------------
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for Handle {
    fn from(handle: &str) -> Self {
        Self(handle.to_owned())
    }
}
impl From<String> for Handle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}
impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ------------- Gender -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
}
impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
            Gender::Unknown => write!(f, "unknown"),
        }
    }
}

// ------------- ChildRefType -------------
/// How a child relates to one of the parents of a family.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildRefType {
    None,
    #[default]
    Birth,
    Adopted,
    Stepchild,
    Sponsored,
    Foster,
    Unknown,
    Custom(String),
}
impl ChildRefType {
    pub fn is_birth(&self) -> bool {
        matches!(self, ChildRefType::Birth)
    }
}
impl fmt::Display for ChildRefType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChildRefType::None => write!(f, "none"),
            ChildRefType::Birth => write!(f, "birth"),
            ChildRefType::Adopted => write!(f, "adopted"),
            ChildRefType::Stepchild => write!(f, "stepchild"),
            ChildRefType::Sponsored => write!(f, "sponsored"),
            ChildRefType::Foster => write!(f, "foster"),
            ChildRefType::Unknown => write!(f, "unknown"),
            ChildRefType::Custom(name) => write!(f, "{}", name),
        }
    }
}

// ------------- ChildRef -------------
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChildRef {
    child: Handle,
    #[serde(default)]
    mother_relation: ChildRefType,
    #[serde(default)]
    father_relation: ChildRefType,
}
impl ChildRef {
    pub fn new(child: Handle, mother_relation: ChildRefType, father_relation: ChildRefType) -> Self {
        Self {
            child,
            mother_relation,
            father_relation,
        }
    }
    /// A child reference with a birth relation to both parents.
    pub fn birth(child: Handle) -> Self {
        Self::new(child, ChildRefType::Birth, ChildRefType::Birth)
    }
    pub fn child(&self) -> &Handle {
        &self.child
    }
    pub fn mother_relation(&self) -> &ChildRefType {
        &self.mother_relation
    }
    pub fn father_relation(&self) -> &ChildRefType {
        &self.father_relation
    }
    /// The relation towards the parent on the side of `gender`. An unknown
    /// gender falls back to the father side.
    pub fn relation_for(&self, gender: Gender) -> &ChildRefType {
        match gender {
            Gender::Female => &self.mother_relation,
            Gender::Male | Gender::Unknown => &self.father_relation,
        }
    }
}

// ------------- Person -------------
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Person {
    handle: Handle,
    gramps_id: String,
    #[serde(default)]
    gender: Gender,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    birth: Option<NaiveDate>,
    #[serde(default)]
    death: Option<NaiveDate>,
    // families this person is a child of, in the order they were listed
    #[serde(default)]
    parent_family_list: Vec<Handle>,
    // families this person is a spouse or parent in
    #[serde(default)]
    family_list: Vec<Handle>,
}

impl Person {
    pub fn new(handle: Handle, gramps_id: impl Into<String>, gender: Gender) -> Self {
        Self {
            handle,
            gramps_id: gramps_id.into(),
            gender,
            given_name: String::new(),
            surname: String::new(),
            birth: None,
            death: None,
            parent_family_list: Vec::new(),
            family_list: Vec::new(),
        }
    }
    pub fn with_name(mut self, given_name: impl Into<String>, surname: impl Into<String>) -> Self {
        self.given_name = given_name.into();
        self.surname = surname.into();
        self
    }
    pub fn with_birth(mut self, birth: NaiveDate) -> Self {
        self.birth = Some(birth);
        self
    }
    pub fn with_death(mut self, death: NaiveDate) -> Self {
        self.death = Some(death);
        self
    }
    pub fn with_parent_family(mut self, family: Handle) -> Self {
        self.parent_family_list.push(family);
        self
    }
    pub fn with_family(mut self, family: Handle) -> Self {
        self.family_list.push(family);
        self
    }
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
    pub fn gramps_id(&self) -> &str {
        &self.gramps_id
    }
    pub fn gender(&self) -> Gender {
        self.gender
    }
    pub fn given_name(&self) -> &str {
        &self.given_name
    }
    pub fn surname(&self) -> &str {
        &self.surname
    }
    pub fn birth(&self) -> Option<NaiveDate> {
        self.birth
    }
    pub fn death(&self) -> Option<NaiveDate> {
        self.death
    }
    pub fn parent_family_list(&self) -> &[Handle] {
        &self.parent_family_list
    }
    pub fn family_list(&self) -> &[Handle] {
        &self.family_list
    }
}
impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {} {} ({})", self.gramps_id, self.given_name, self.surname, self.gender)
    }
}

// ------------- Family -------------
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Family {
    handle: Handle,
    gramps_id: String,
    #[serde(default)]
    father: Option<Handle>,
    #[serde(default)]
    mother: Option<Handle>,
    #[serde(default)]
    child_ref_list: Vec<ChildRef>,
}

impl Family {
    pub fn new(handle: Handle, gramps_id: impl Into<String>) -> Self {
        Self {
            handle,
            gramps_id: gramps_id.into(),
            father: None,
            mother: None,
            child_ref_list: Vec::new(),
        }
    }
    pub fn with_father(mut self, father: Handle) -> Self {
        self.father = Some(father);
        self
    }
    pub fn with_mother(mut self, mother: Handle) -> Self {
        self.mother = Some(mother);
        self
    }
    pub fn with_child(mut self, child_ref: ChildRef) -> Self {
        self.child_ref_list.push(child_ref);
        self
    }
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
    pub fn gramps_id(&self) -> &str {
        &self.gramps_id
    }
    pub fn father(&self) -> Option<&Handle> {
        self.father.as_ref()
    }
    pub fn mother(&self) -> Option<&Handle> {
        self.mother.as_ref()
    }
    /// The parent slot that a line of `gender` runs through.
    pub fn parent(&self, gender: Gender) -> Option<&Handle> {
        match gender {
            Gender::Male => self.father(),
            Gender::Female => self.mother(),
            Gender::Unknown => None,
        }
    }
    pub fn child_ref_list(&self) -> &[ChildRef] {
        &self.child_ref_list
    }
    pub fn child_ref(&self, child: &Handle) -> Option<&ChildRef> {
        self.child_ref_list.iter().find(|r| r.child() == child)
    }
}
impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {} children", self.gramps_id, self.child_ref_list.len())
    }
}

// ------------- Keepers -------------
#[derive(Debug, Default)]
pub struct PersonKeeper {
    kept: HashMap<Handle, Arc<Person>, HandleHasher>,
}
impl PersonKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    // The first person kept under a handle wins, later ones are reported
    // back as previously kept.
    pub fn keep(&mut self, person: Person) -> (Arc<Person>, bool) {
        match self.kept.entry(person.handle().clone()) {
            Entry::Vacant(e) => (Arc::clone(e.insert(Arc::new(person))), false),
            Entry::Occupied(e) => (Arc::clone(e.get()), true),
        }
    }
    pub fn get(&self, handle: &Handle) -> Option<Arc<Person>> {
        self.kept.get(handle).map(Arc::clone)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Person>> {
        self.kept.values()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct FamilyKeeper {
    kept: HashMap<Handle, Arc<Family>, HandleHasher>,
}
impl FamilyKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    pub fn keep(&mut self, family: Family) -> (Arc<Family>, bool) {
        match self.kept.entry(family.handle().clone()) {
            Entry::Vacant(e) => (Arc::clone(e.insert(Arc::new(family))), false),
            Entry::Occupied(e) => (Arc::clone(e.get()), true),
        }
    }
    pub fn get(&self, handle: &Handle) -> Option<Arc<Family>> {
        self.kept.get(handle).map(Arc::clone)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Family>> {
        self.kept.values()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- Database -------------
// In-memory family tree. Populated once, then only read by the reports.
#[derive(Debug, Default)]
pub struct Database {
    person_keeper: PersonKeeper,
    family_keeper: FamilyKeeper,
    // gramps id <-> handle
    person_ids: BiMap<String, Handle>,
    family_ids: BiMap<String, Handle>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn person_keeper(&self) -> &PersonKeeper {
        &self.person_keeper
    }
    pub fn family_keeper(&self) -> &FamilyKeeper {
        &self.family_keeper
    }
    pub fn add_person(&mut self, person: Person) -> Result<(Arc<Person>, bool)> {
        keep_id(&mut self.person_ids, person.gramps_id(), person.handle())?;
        let (kept, previously_kept) = self.person_keeper.keep(person);
        debug!(handle = %kept.handle(), previously_kept, "kept person");
        Ok((kept, previously_kept))
    }
    pub fn add_family(&mut self, family: Family) -> Result<(Arc<Family>, bool)> {
        keep_id(&mut self.family_ids, family.gramps_id(), family.handle())?;
        let (kept, previously_kept) = self.family_keeper.keep(family);
        debug!(handle = %kept.handle(), previously_kept, "kept family");
        Ok((kept, previously_kept))
    }
    pub fn person_by_id(&self, gramps_id: &str) -> Option<Arc<Person>> {
        self.person_ids
            .get_by_left(gramps_id)
            .and_then(|handle| self.person_keeper.get(handle))
    }
    pub fn family_by_id(&self, gramps_id: &str) -> Option<Arc<Family>> {
        self.family_ids
            .get_by_left(gramps_id)
            .and_then(|handle| self.family_keeper.get(handle))
    }
    pub fn person_id(&self, handle: &Handle) -> Option<&str> {
        self.person_ids.get_by_right(handle).map(String::as_str)
    }
    /// Checks that every handle referenced from a person or a family
    /// resolves to a kept record.
    pub fn validate(&self) -> Result<()> {
        for person in self.person_keeper.iter() {
            for family in person.parent_family_list().iter().chain(person.family_list()) {
                self.get_family(family)?;
            }
        }
        for family in self.family_keeper.iter() {
            for parent in family.father().into_iter().chain(family.mother()) {
                self.get_person(parent)?;
            }
            for child_ref in family.child_ref_list() {
                self.get_person(child_ref.child())?;
            }
        }
        Ok(())
    }
}

fn keep_id(ids: &mut BiMap<String, Handle>, gramps_id: &str, handle: &Handle) -> Result<()> {
    match ids.insert_no_overwrite(gramps_id.to_owned(), handle.clone()) {
        Ok(()) => Ok(()),
        Err(_) if ids.get_by_left(gramps_id) == Some(handle) => Ok(()),
        Err(_) => Err(LineageError::InvalidArgument(format!(
            "id {} or handle {} is already taken by another record",
            gramps_id, handle
        ))),
    }
}

impl DataAccessor for Database {
    fn get_person(&self, handle: &Handle) -> Result<Arc<Person>> {
        self.person_keeper
            .get(handle)
            .ok_or_else(|| LineageError::missing_person(handle.as_str()))
    }
    fn get_family(&self, handle: &Handle) -> Result<Arc<Family>> {
        self.family_keeper
            .get(handle)
            .ok_or_else(|| LineageError::missing_family(handle.as_str()))
    }
}
