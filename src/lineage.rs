//! The two traversals behind the lineage reports.
//!
//! [`AncestorWalk`] follows the single father (or mother) of each
//! generation upwards. [`DescendantWalk`] expands every child of the same
//! gender born to a person, depth first. Both are lazy iterators over an
//! injected [`DataAccessor`] and yield `Result` items, since a handle that
//! does not resolve is reported to the caller instead of being skipped.
//!
//! Neither walk revisits a person, so a tree with a parent/child cycle
//! still terminates.

use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::access::{DataAccessor, DisplayAccessor};
use crate::construct::{Gender, Handle, HandleHasher, Person};
use crate::error::{LineageError, Result};

pub const UNKNOWN_GENDER: &str = "Unknown gender";
pub const NO_BIRTH_RELATION: &str = "No birth relation with child";
/// Marker appended to the prefix for every generation below the root.
pub const DEFAULT_INDENT: &str = "  |";

/// Joins diagnostic notes with ", ".
pub fn append_remark(existing: &str, text: &str) -> String {
    if existing.is_empty() {
        text.to_owned()
    } else {
        format!("{}, {}", existing, text)
    }
}

fn check_target(target: Gender) -> Result<()> {
    match target {
        Gender::Unknown => Err(LineageError::InvalidArgument(String::from(
            "a lineage runs through either males or females",
        ))),
        _ => Ok(()),
    }
}

// ------------- Ancestors -------------
#[derive(Clone, Debug)]
pub struct AncestorLine {
    pub person: Arc<Person>,
    pub remark: String,
}

enum AncestorState {
    Start(Arc<Person>),
    Emitted(Arc<Person>),
    Done,
}

pub struct AncestorWalk<'a, A: DataAccessor + ?Sized> {
    accessor: &'a A,
    target: Gender,
    state: AncestorState,
    visited: HashSet<Handle, HandleHasher>,
}

impl<'a, A: DataAccessor + ?Sized> AncestorWalk<'a, A> {
    pub fn new(accessor: &'a A, start: Arc<Person>, target: Gender) -> Result<Self> {
        check_target(target)?;
        Ok(Self {
            accessor,
            target,
            state: AncestorState::Start(start),
            visited: HashSet::default(),
        })
    }

    // The first listed parent family is the one that is followed, even when
    // a later family would have a parent of the right gender.
    fn parent_of(&self, person: &Person) -> Result<Option<(Arc<Person>, String)>> {
        let Some(family_handle) = person.parent_family_list().first() else {
            debug!(person = %person.handle(), "no parent family, lineage ends");
            return Ok(None);
        };
        let family = self.accessor.get_family(family_handle)?;
        let Some(child_ref) = family.child_ref(person.handle()) else {
            warn!(
                family = %family.handle(),
                child = %person.handle(),
                "parent family does not list the child, lineage ends"
            );
            return Ok(None);
        };
        let mut remark = String::new();
        if !child_ref.relation_for(self.target).is_birth() {
            remark = append_remark(&remark, NO_BIRTH_RELATION);
        }
        let Some(parent_handle) = family.parent(self.target) else {
            debug!(family = %family.handle(), "no parent in the {} slot", self.target);
            return Ok(None);
        };
        let parent = self.accessor.get_person(parent_handle)?;
        match parent.gender() {
            g if g == self.target => Ok(Some((parent, remark))),
            Gender::Unknown => {
                remark = append_remark(&remark, UNKNOWN_GENDER);
                Ok(Some((parent, remark)))
            }
            g => {
                debug!(parent = %parent.handle(), gender = %g, "parent gender does not match, lineage ends");
                Ok(None)
            }
        }
    }
}

impl<A: DataAccessor + ?Sized> Iterator for AncestorWalk<'_, A> {
    type Item = Result<AncestorLine>;

    fn next(&mut self) -> Option<Self::Item> {
        match mem::replace(&mut self.state, AncestorState::Done) {
            AncestorState::Done => None,
            AncestorState::Start(person) => {
                self.visited.insert(person.handle().clone());
                self.state = AncestorState::Emitted(Arc::clone(&person));
                Some(Ok(AncestorLine {
                    person,
                    remark: String::new(),
                }))
            }
            AncestorState::Emitted(person) => match self.parent_of(&person) {
                Ok(Some((parent, remark))) => {
                    if !self.visited.insert(parent.handle().clone()) {
                        warn!(person = %parent.handle(), "cycle in ancestor line, lineage ends");
                        return None;
                    }
                    debug!(person = %parent.handle(), "next generation");
                    self.state = AncestorState::Emitted(Arc::clone(&parent));
                    Some(Ok(AncestorLine {
                        person: parent,
                        remark,
                    }))
                }
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            },
        }
    }
}

/// Starts the father line (`Gender::Male`) or mother line (`Gender::Female`)
/// of `start`. The first item is always `start` itself.
pub fn walk_ancestors<A: DataAccessor + ?Sized>(
    accessor: &A,
    start: Arc<Person>,
    target: Gender,
) -> Result<AncestorWalk<'_, A>> {
    AncestorWalk::new(accessor, start, target)
}

// ------------- Descendants -------------
#[derive(Clone, Debug)]
pub struct DescendantLine {
    pub depth: usize,
    pub prefix: String,
    pub person: Arc<Person>,
    pub remark: String,
}

impl DescendantLine {
    /// `prefix-name (birth - death) Remark: ...`, the prefix and its dash
    /// only below the root and the remark only when there is one.
    pub fn text<D: DisplayAccessor + ?Sized>(&self, display: &D) -> String {
        let mut line = String::new();
        if !self.prefix.is_empty() {
            line.push_str(&self.prefix);
            line.push('-');
        }
        line.push_str(&format!(
            "{} ({} - {})",
            display.display_name(&self.person),
            display.display_birth(&self.person),
            display.display_death(&self.person)
        ));
        if !self.remark.is_empty() {
            line.push_str(" Remark: ");
            line.push_str(&self.remark);
        }
        line
    }
}

pub struct DescendantWalk<'a, A: DataAccessor + ?Sized> {
    accessor: &'a A,
    target: Gender,
    indent: String,
    // pending (person, depth) pairs, top of the stack is visited next
    stack: Vec<(Arc<Person>, usize)>,
    // the last emitted person, whose children are pushed on the next call
    expand: Option<(Arc<Person>, usize)>,
    visited: HashSet<Handle, HandleHasher>,
}

impl<'a, A: DataAccessor + ?Sized> DescendantWalk<'a, A> {
    pub fn new(accessor: &'a A, start: Arc<Person>, target: Gender) -> Result<Self> {
        check_target(target)?;
        Ok(Self {
            accessor,
            target,
            indent: String::from(DEFAULT_INDENT),
            stack: vec![(start, 0)],
            expand: None,
            visited: HashSet::default(),
        })
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    // Children born to `person` on the target side and of the target gender,
    // in family order and then child order.
    fn children_of(&self, person: &Person) -> Result<Vec<Arc<Person>>> {
        let mut children = Vec::new();
        for family_handle in person.family_list() {
            let family = self.accessor.get_family(family_handle)?;
            for child_ref in family.child_ref_list() {
                if !child_ref.relation_for(self.target).is_birth() {
                    debug!(child = %child_ref.child(), relation = %child_ref.relation_for(self.target), "skipping non-birth child");
                    continue;
                }
                let child = self.accessor.get_person(child_ref.child())?;
                if child.gender() == self.target {
                    children.push(child);
                }
            }
        }
        Ok(children)
    }
}

impl<A: DataAccessor + ?Sized> Iterator for DescendantWalk<'_, A> {
    type Item = Result<DescendantLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((person, depth)) = self.expand.take() {
            match self.children_of(&person) {
                Ok(children) => {
                    self.stack
                        .extend(children.into_iter().rev().map(|child| (child, depth + 1)));
                }
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }
        while let Some((person, depth)) = self.stack.pop() {
            if !self.visited.insert(person.handle().clone()) {
                warn!(person = %person.handle(), "person reached twice among descendants, not expanded again");
                continue;
            }
            let remark = if person.gender() == Gender::Unknown {
                append_remark("", UNKNOWN_GENDER)
            } else {
                String::new()
            };
            self.expand = Some((Arc::clone(&person), depth));
            return Some(Ok(DescendantLine {
                depth,
                prefix: self.indent.repeat(depth),
                person,
                remark,
            }));
        }
        None
    }
}

/// Starts the descendant listing of `start`, following children of the
/// `target` gender only.
pub fn walk_descendants<A: DataAccessor + ?Sized>(
    accessor: &A,
    start: Arc<Person>,
    target: Gender,
) -> Result<DescendantWalk<'_, A>> {
    DescendantWalk::new(accessor, start, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remarks_are_comma_joined() {
        assert_eq!(append_remark("", "X"), "X");
        assert_eq!(append_remark("A", "B"), "A, B");
        assert_eq!(
            append_remark(NO_BIRTH_RELATION, UNKNOWN_GENDER),
            "No birth relation with child, Unknown gender"
        );
    }
}
