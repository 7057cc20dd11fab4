//! Lineage – father and mother lineage reports over a family tree.
//!
//! Given a starting person, a lineage report traces the direct paternal
//! (or maternal) line back through the generations and then lists every
//! descendant of the same gender reachable through birth relations.
//! Data-quality anomalies are annotated inline as remarks rather than
//! treated as failures:
//! * a parent whose gender is unknown still continues the line, marked
//!   "Unknown gender";
//! * a parent to whom the child is not related by birth is marked
//!   "No birth relation with child".
//!
//! ## Modules
//! * [`construct`] – Handles, persons, families and the in-memory [`construct::Database`]
//!   with its keepers.
//! * [`access`] – The read-only [`access::DataAccessor`] and [`access::DisplayAccessor`]
//!   capabilities handed to the reports.
//! * [`lineage`] – The ancestor and descendant walks plus remark handling.
//! * [`report`] – The two report entry points and their quick report registration.
//! * [`render`] – A recording [`render::Document`] with text and JSON output.
//! * [`import`] – Building a database from a JSON family tree.
//! * [`config`] – Layered settings for the binary.
//!
//! ## Quick Start
//! ```
//! use lineage::construct::{ChildRef, Database, Family, Gender, Person};
//! use lineage::access::SimpleAccess;
//! use lineage::render::{render_text, Document};
//! use lineage::report::{run_father, ReportContext};
//!
//! let mut db = Database::new();
//! db.add_person(Person::new("a".into(), "I0001", Gender::Male).with_name("Jan", "Smit").with_family("f".into())).unwrap();
//! db.add_person(Person::new("p".into(), "I0002", Gender::Male).with_name("Piet", "Smit").with_parent_family("f".into())).unwrap();
//! db.add_family(Family::new("f".into(), "F0001").with_father("a".into()).with_child(ChildRef::birth("p".into()))).unwrap();
//!
//! let display = SimpleAccess::default();
//! let context = ReportContext::new(&db, &display);
//! let mut document = Document::new();
//! let person = db.person_by_id("I0002");
//! run_father(&context, &mut document, person.as_deref()).unwrap();
//! assert!(render_text(&document).starts_with("Father lineage for Smit, Piet"));
//! ```

pub mod access;
pub mod config;
pub mod construct;
pub mod error;
pub mod import;
pub mod lineage;
pub mod render;
pub mod report;

pub use error::{LineageError, Result};
