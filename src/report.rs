//! Father and mother lineage reports.
//!
//! A report writes into any [`ReportRenderer`]: a title, an explanatory
//! paragraph, the ancestor line in three columns and finally the
//! descendants of the same gender as an indented listing. The two reports
//! are registered as person quick reports, see [`registered_reports`].

use std::fmt;

use tracing::info;

use crate::access::{DataAccessor, DisplayAccessor};
use crate::construct::{Gender, Person};
use crate::error::{LineageError, Result};
use crate::lineage::{AncestorWalk, DEFAULT_INDENT, DescendantWalk};

/// Receives already formatted text and lays it out into a document.
pub trait ReportRenderer {
    fn emit_title(&mut self, text: &str);
    fn emit_paragraph(&mut self, text: &str);
    fn emit_section_header(&mut self, text: &str);
}

/// Name, birth and death in padded, tab separated columns.
pub fn columns(name: &str, birth: &str, death: &str) -> String {
    format!("{:<30}\t{:<12}\t{:<12}", name, birth, death)
}

/// The indented remark line printed under an ancestor.
pub fn remark_line(remark: &str) -> String {
    format!("   {}: {}", "Remark", remark)
}

// Wording that differs between the father and the mother report.
struct Wording {
    title: &'static str,
    intro: &'static str,
    name_column: &'static str,
    descendants: &'static str,
}

const FATHER: Wording = Wording {
    title: "Father lineage for",
    intro: "This report shows the father lineage, also called patronymic lineage or Y-line. \
            People in this lineage all share the same Y-chromosome.",
    name_column: "Name Father",
    descendants: "Sons",
};

const MOTHER: Wording = Wording {
    title: "Mother lineage for",
    intro: "This report shows the mother lineage, also called matronymic lineage or M-line. \
            People in this lineage all share the same mitochondrial DNA.",
    name_column: "Name Mother",
    descendants: "Daughters",
};

/// Everything a report needs besides the document it writes into.
pub struct ReportContext<'a> {
    pub database: &'a dyn DataAccessor,
    pub display: &'a dyn DisplayAccessor,
    pub indent: &'a str,
}

impl<'a> ReportContext<'a> {
    pub fn new(database: &'a dyn DataAccessor, display: &'a dyn DisplayAccessor) -> Self {
        Self {
            database,
            display,
            indent: DEFAULT_INDENT,
        }
    }
    pub fn with_indent(mut self, indent: &'a str) -> Self {
        self.indent = indent;
        self
    }
}

/// Writes the father lineage of `person` into `document`.
pub fn run_father(
    context: &ReportContext,
    document: &mut dyn ReportRenderer,
    person: Option<&Person>,
) -> Result<()> {
    run_lineage(context, document, person, Gender::Male)
}

/// Writes the mother lineage of `person` into `document`.
pub fn run_mother(
    context: &ReportContext,
    document: &mut dyn ReportRenderer,
    person: Option<&Person>,
) -> Result<()> {
    run_lineage(context, document, person, Gender::Female)
}

/// Shared body of both reports. `gender` selects the line and the
/// gender of the listed descendants.
pub fn run_lineage(
    context: &ReportContext,
    document: &mut dyn ReportRenderer,
    person: Option<&Person>,
    gender: Gender,
) -> Result<()> {
    let person = person.ok_or_else(|| {
        LineageError::InvalidArgument(String::from("no person selected for the lineage report"))
    })?;
    let wording = match gender {
        Gender::Male => &FATHER,
        Gender::Female => &MOTHER,
        Gender::Unknown => {
            return Err(LineageError::InvalidArgument(String::from(
                "a lineage report is either a father or a mother lineage",
            )));
        }
    };
    // work from the kept record so both walks see the same data
    let start = context.database.get_person(person.handle())?;
    let display = context.display;
    info!(person = %start.handle(), line = %gender, "running lineage report");

    document.emit_title(&format!("{} {}", wording.title, display.display_name(&start)));
    document.emit_paragraph("");
    document.emit_paragraph(wording.intro);
    document.emit_paragraph("");
    document.emit_section_header(&columns(wording.name_column, "Birth Date", "Death Date"));
    document.emit_paragraph("");

    let mut generations = 0;
    for line in AncestorWalk::new(context.database, start.clone(), gender)? {
        let line = line?;
        document.emit_paragraph(&columns(
            &display.display_name(&line.person),
            &display.display_birth(&line.person),
            &display.display_death(&line.person),
        ));
        if !line.remark.is_empty() {
            document.emit_paragraph(&remark_line(&line.remark));
        }
        generations += 1;
    }

    document.emit_paragraph("");
    document.emit_paragraph("");
    document.emit_section_header(wording.descendants);
    document.emit_paragraph("");

    let mut descendants = 0;
    for line in DescendantWalk::new(context.database, start, gender)?.with_indent(context.indent) {
        document.emit_paragraph(&line?.text(display));
        descendants += 1;
    }
    info!(generations, descendants, "lineage report complete");
    Ok(())
}

// ------------- Registration -------------
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    Person,
}
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Person => write!(f, "person"),
        }
    }
}

pub type RunFn = fn(&ReportContext, &mut dyn ReportRenderer, Option<&Person>) -> Result<()>;

/// Declarative description of a quick report, as offered to a user
/// picking a report for the selected person.
#[derive(Clone, Copy)]
pub struct QuickReport {
    pub name: &'static str,
    pub category: Category,
    pub run: RunFn,
    pub translated_name: &'static str,
    pub status: &'static str,
    pub description: &'static str,
    pub author_name: &'static str,
    pub author_email: &'static str,
}
impl fmt::Debug for QuickReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("QuickReport")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("status", &self.status)
            .finish()
    }
}

static REPORTS: [QuickReport; 2] = [
    QuickReport {
        name: "father_lineage",
        category: Category::Person,
        run: run_father,
        translated_name: "Father lineage",
        status: "Stable",
        description: "Display father lineage",
        author_name: "B. Malengier",
        author_email: "benny.malengier@gramps-project.org",
    },
    QuickReport {
        name: "mother_lineage",
        category: Category::Person,
        run: run_mother,
        translated_name: "Mother lineage",
        status: "Stable",
        description: "Display mother lineage",
        author_name: "B. Malengier",
        author_email: "benny.malengier@gramps-project.org",
    },
];

pub fn registered_reports() -> &'static [QuickReport] {
    &REPORTS
}

pub fn find_report(name: &str) -> Option<&'static QuickReport> {
    REPORTS.iter().find(|r| r.name == name)
}
