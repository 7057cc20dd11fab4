use chrono::NaiveDate;

use lineage::access::SimpleAccess;
use lineage::construct::{ChildRef, ChildRefType, Database, Family, Gender, Person};
use lineage::error::LineageError;
use lineage::lineage::{DescendantLine, DescendantWalk, walk_descendants};

fn person(handle: &str, gender: Gender, parent_families: &[&str], families: &[&str]) -> Person {
    let mut p = Person::new(handle.into(), format!("I-{handle}"), gender).with_name(handle, "Smit");
    for f in parent_families {
        p = p.with_parent_family((*f).into());
    }
    for f in families {
        p = p.with_family((*f).into());
    }
    p
}

fn family(handle: &str, mother: &str, children: Vec<ChildRef>) -> Family {
    children
        .into_iter()
        .fold(Family::new(handle.into(), format!("F-{handle}")).with_mother(mother.into()), |f, c| {
            f.with_child(c)
        })
}

fn descendants(db: &Database, start: &str, gender: Gender) -> Vec<DescendantLine> {
    let start = db.person_by_id(&format!("I-{start}")).unwrap();
    walk_descendants(db, start, gender)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn handles(lines: &[DescendantLine]) -> Vec<&str> {
    lines.iter().map(|l| l.person.handle().as_str()).collect()
}

// p has daughter c1 and son c2 in f2; c1 has daughter gc in f3
fn setup() -> Database {
    let mut db = Database::new();
    db.add_person(person("p", Gender::Female, &[], &["f2"])).unwrap();
    db.add_person(person("c1", Gender::Female, &["f2"], &["f3"])).unwrap();
    db.add_person(person("c2", Gender::Male, &["f2"], &[])).unwrap();
    db.add_person(person("gc", Gender::Female, &["f3"], &[])).unwrap();
    db.add_family(family("f2", "p", vec![ChildRef::birth("c1".into()), ChildRef::birth("c2".into())]))
        .unwrap();
    db.add_family(family("f3", "c1", vec![ChildRef::birth("gc".into())])).unwrap();
    db
}

#[test]
fn only_children_of_target_gender_are_listed() {
    let mut db = Database::new();
    db.add_person(person("p", Gender::Female, &[], &["f2"])).unwrap();
    db.add_person(person("c1", Gender::Female, &["f2"], &[])).unwrap();
    db.add_person(person("c2", Gender::Male, &["f2"], &[])).unwrap();
    db.add_family(family("f2", "p", vec![ChildRef::birth("c1".into()), ChildRef::birth("c2".into())]))
        .unwrap();
    let lines = descendants(&db, "p", Gender::Female);
    assert_eq!(handles(&lines), ["p", "c1"]);
}

#[test]
fn prefix_grows_one_marker_per_generation() {
    let db = setup();
    let lines = descendants(&db, "p", Gender::Female);
    assert_eq!(handles(&lines), ["p", "c1", "gc"]);
    let prefixes: Vec<_> = lines.iter().map(|l| l.prefix.as_str()).collect();
    assert_eq!(prefixes, ["", "  |", "  |  |"]);
    let depths: Vec<_> = lines.iter().map(|l| l.depth).collect();
    assert_eq!(depths, [0, 1, 2]);
}

#[test]
fn rendered_lines_carry_prefix_dash_and_dates() {
    let mut db = Database::new();
    db.add_person(
        person("p", Gender::Male, &[], &["f1"])
            .with_birth(NaiveDate::from_ymd_opt(1850, 1, 2).unwrap())
            .with_death(NaiveDate::from_ymd_opt(1920, 5, 6).unwrap()),
    )
    .unwrap();
    db.add_person(person("s", Gender::Male, &["f1"], &[])).unwrap();
    db.add_family(
        Family::new("f1".into(), "F-f1")
            .with_father("p".into())
            .with_child(ChildRef::birth("s".into())),
    )
    .unwrap();
    let display = SimpleAccess::default();
    let text: Vec<_> = descendants(&db, "p", Gender::Male).iter().map(|l| l.text(&display)).collect();
    assert_eq!(text, ["Smit, p (1850-01-02 - 1920-05-06)", "  |-Smit, s ( - )"]);
}

#[test]
fn non_birth_children_are_skipped_on_the_line_side_only() {
    let mut db = Database::new();
    db.add_person(person("p", Gender::Female, &[], &["f1"])).unwrap();
    db.add_person(person("adopted", Gender::Female, &["f1"], &[])).unwrap();
    db.add_person(person("step", Gender::Female, &["f1"], &[])).unwrap();
    db.add_family(family(
        "f1",
        "p",
        vec![
            ChildRef::new("adopted".into(), ChildRefType::Adopted, ChildRefType::Birth),
            // only the father side is a step relation, the mother line keeps her
            ChildRef::new("step".into(), ChildRefType::Birth, ChildRefType::Stepchild),
        ],
    ))
    .unwrap();
    let lines = descendants(&db, "p", Gender::Female);
    assert_eq!(handles(&lines), ["p", "step"]);
    assert!(lines.iter().all(|l| l.remark.is_empty()));
}

#[test]
fn pre_order_across_families() {
    let mut db = Database::new();
    db.add_person(person("p", Gender::Female, &[], &["f1", "f2"])).unwrap();
    db.add_person(person("a", Gender::Female, &["f1"], &["f3"])).unwrap();
    db.add_person(person("a1", Gender::Female, &["f3"], &[])).unwrap();
    db.add_person(person("b", Gender::Female, &["f1"], &[])).unwrap();
    db.add_person(person("c", Gender::Female, &["f2"], &[])).unwrap();
    db.add_family(family("f1", "p", vec![ChildRef::birth("a".into()), ChildRef::birth("b".into())]))
        .unwrap();
    db.add_family(family("f2", "p", vec![ChildRef::birth("c".into())])).unwrap();
    db.add_family(family("f3", "a", vec![ChildRef::birth("a1".into())])).unwrap();
    let lines = descendants(&db, "p", Gender::Female);
    assert_eq!(handles(&lines), ["p", "a", "a1", "b", "c"]);
}

#[test]
fn unknown_gender_root_is_remarked_and_unknown_children_left_out() {
    let mut db = Database::new();
    db.add_person(person("u", Gender::Unknown, &[], &["f1"])).unwrap();
    db.add_person(person("d", Gender::Female, &["f1"], &[])).unwrap();
    db.add_person(person("x", Gender::Unknown, &["f1"], &[])).unwrap();
    db.add_family(family("f1", "u", vec![ChildRef::birth("d".into()), ChildRef::birth("x".into())]))
        .unwrap();
    let lines = descendants(&db, "u", Gender::Female);
    assert_eq!(handles(&lines), ["u", "d"]);
    assert_eq!(lines[0].remark, "Unknown gender");
    let display = SimpleAccess::default();
    assert_eq!(lines[0].text(&display), "Smit, u ( - ) Remark: Unknown gender");
}

#[test]
fn custom_indent_marker() {
    let db = setup();
    let start = db.person_by_id("I-p").unwrap();
    let lines: Vec<_> = DescendantWalk::new(&db, start, Gender::Female)
        .unwrap()
        .with_indent("..")
        .collect::<Result<_, _>>()
        .unwrap();
    let prefixes: Vec<&str> = lines.iter().map(|l: &DescendantLine| l.prefix.as_str()).collect();
    assert_eq!(prefixes, ["", "..", "...."]);
}

#[test]
fn cyclic_tree_terminates() {
    let mut db = Database::new();
    db.add_person(person("p", Gender::Female, &["f2"], &["f1"])).unwrap();
    db.add_person(person("d", Gender::Female, &["f1"], &["f2"])).unwrap();
    db.add_family(family("f1", "p", vec![ChildRef::birth("d".into())])).unwrap();
    db.add_family(family("f2", "d", vec![ChildRef::birth("p".into())])).unwrap();
    let lines = descendants(&db, "p", Gender::Female);
    assert_eq!(handles(&lines), ["p", "d"]);
}

#[test]
fn long_line_is_listed_to_the_end() {
    let depth = 2_000;
    let mut db = Database::new();
    for i in 0..=depth {
        let parents = if i == 0 { vec![] } else { vec![format!("f{}", i - 1)] };
        let families = if i == depth { vec![] } else { vec![format!("f{i}")] };
        let mut p = Person::new(format!("p{i}").into(), format!("I-p{i}"), Gender::Male);
        for f in parents {
            p = p.with_parent_family(f.into());
        }
        for f in families {
            p = p.with_family(f.into());
        }
        db.add_person(p).unwrap();
        if i < depth {
            db.add_family(
                Family::new(format!("f{i}").into(), format!("F-f{i}"))
                    .with_father(format!("p{i}").into())
                    .with_child(ChildRef::birth(format!("p{}", i + 1).into())),
            )
            .unwrap();
        }
    }
    let lines = descendants(&db, "p0", Gender::Male);
    assert_eq!(lines.len(), depth + 1);
    assert_eq!(lines[depth].depth, depth);
}

#[test]
fn unresolved_family_is_reported() {
    let mut db = Database::new();
    db.add_person(person("p", Gender::Female, &[], &["missing"])).unwrap();
    let start = db.person_by_id("I-p").unwrap();
    let items: Vec<_> = walk_descendants(&db, start, Gender::Female).unwrap().collect();
    assert_eq!(items.len(), 2);
    assert!(matches!(items[1], Err(LineageError::DataIntegrity { kind: "family", .. })));
}
