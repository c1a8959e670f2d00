use kin_core::dictionary::{Dictionary, DictionaryEntry, LocalizedTerm};
use kin_core::graph::{FamilyGraph, Gender, Person};
use kin_engine::report::{KinRole, ReportError, SectionBody, SectionKind, build_report};
use kin_engine::{EngineOptions, KinshipEngine};

fn male(id: &str, name: &str) -> Person {
    Person::new(id, name).with_gender(Gender::Male)
}

fn female(id: &str, name: &str) -> Person {
    Person::new(id, name).with_gender(Gender::Female)
}

/// Home is `me`: parents, paternal grandparents, a brother with a son, a child, and a wife
/// whose father, brother and sister (with a son) are recorded.
fn make_family() -> FamilyGraph {
    FamilyGraph::from_people([
        male("gf", "Rama Rao").with_spouse("gm"),
        female("gm", "Sita").with_spouse("gf"),
        male("dad", "Venkat")
            .with_father("gf")
            .with_mother("gm")
            .with_spouse("mom"),
        female("mom", "Lakshmi").with_spouse("dad"),
        male("bro", "Ravi").with_father("dad").with_mother("mom"),
        male("me", "Srinivas")
            .with_father("dad")
            .with_mother("mom")
            .with_spouse("wife")
            .with_spouse("ghost"),
        male("bs", "Kiran").with_father("bro"),
        female("kid", "Chinni").with_father("me").with_mother("wife"),
        female("wife", "Sunita").with_father("wf").with_spouse("me"),
        male("wf", "Narayana"),
        male("wb", "Mohan").with_father("wf"),
        female("wz", "Kavya").with_father("wf"),
        male("wzs", "Arjun").with_mother("wz"),
    ])
}

fn english_dictionary() -> Dictionary {
    let mut dictionary = Dictionary::new();
    for (code, term) in [("SELF", "Self"), ("F", "Father"), ("W", "Wife")] {
        dictionary.insert(
            code,
            DictionaryEntry::Direct {
                name: LocalizedTerm::Plain(term.to_string()),
            },
        );
    }
    dictionary
}

fn names(body: &SectionBody) -> Vec<(&str, &str)> {
    match body {
        SectionBody::Entries(entries) => entries
            .iter()
            .map(|e| (e.name.as_str(), e.relation.as_str()))
            .collect(),
        SectionBody::Groups(_) => panic!("expected a flat section"),
    }
}

#[test]
fn test_sections_in_order_and_empty_ones_omitted() {
    let graph = make_family();
    let dictionary = english_dictionary();
    let engine = KinshipEngine::new(&graph, &dictionary, EngineOptions::default());
    let report = build_report(&engine, "me").unwrap();

    let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Own,
            SectionKind::Parents,
            SectionKind::Grandparents,
            SectionKind::Siblings,
            SectionKind::SiblingsChildren,
            SectionKind::Children,
        ]
    );
    assert_eq!(report.home_name, "Srinivas");
}

#[test]
fn test_home_family_terms() {
    let graph = make_family();
    let dictionary = english_dictionary();
    let engine = KinshipEngine::new(&graph, &dictionary, EngineOptions::default());
    let report = build_report(&engine, "me").unwrap();

    let own = report.section(SectionKind::Own).unwrap();
    assert_eq!(names(&own.body), vec![("Srinivas", "Self")]);

    let parents = report.section(SectionKind::Parents).unwrap();
    assert_eq!(
        names(&parents.body),
        vec![("Venkat", "Father"), ("Lakshmi", "Mother")]
    );
    let roles: Vec<_> = parents.entries().iter().map(|e| e.role).collect();
    assert_eq!(roles, vec![Some(KinRole::Father), Some(KinRole::Mother)]);

    let grandparents = report.section(SectionKind::Grandparents).unwrap();
    assert_eq!(
        names(&grandparents.body),
        vec![("Rama Rao", "Father's-Father"), ("Sita", "Father's-Mother")]
    );

    let siblings = report.section(SectionKind::Siblings).unwrap();
    assert_eq!(names(&siblings.body), vec![("Ravi", "Brother")]);

    match &report.section(SectionKind::SiblingsChildren).unwrap().body {
        SectionBody::Groups(groups) => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].header, "Children of Ravi");
            assert_eq!(groups[0].entries[0].relation, "Brother's-Son");
        }
        SectionBody::Entries(_) => panic!("siblings' children should be grouped"),
    }

    let children = report.section(SectionKind::Children).unwrap();
    assert_eq!(names(&children.body), vec![("Chinni", "Daughter")]);
}

#[test]
fn test_spouse_side_terms_relative_to_home() {
    let graph = make_family();
    let dictionary = english_dictionary();
    let engine = KinshipEngine::new(&graph, &dictionary, EngineOptions::default());
    let report = build_report(&engine, "me").unwrap();

    // The unrecorded spouse is skipped.
    assert_eq!(report.spouse_sides.len(), 1);
    let side = &report.spouse_sides[0];
    assert_eq!(side.spouse.name, "Sunita");
    assert_eq!(side.spouse.relation, "Wife");

    let kinds: Vec<SectionKind> = side.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Parents,
            SectionKind::Siblings,
            SectionKind::SiblingsChildren,
        ]
    );
    // Wife's father is not home's father.
    assert_eq!(names(&side.sections[0].body), vec![("Narayana", "Wife's-Father")]);
    assert_eq!(
        names(&side.sections[1].body),
        vec![("Mohan", "Wife's-Brother"), ("Kavya", "Wife's-Sister")]
    );
    let nephews = side.sections[2].entries();
    assert_eq!(nephews.len(), 1);
    assert_eq!(nephews[0].relation, "Wife's-Sister's-Son");
}

#[test]
fn test_grandchildren_grouped_by_child() {
    let graph = make_family();
    let dictionary = english_dictionary();
    let engine = KinshipEngine::new(&graph, &dictionary, EngineOptions::default());
    let report = build_report(&engine, "gf").unwrap();

    match &report.section(SectionKind::Grandchildren).unwrap().body {
        SectionBody::Groups(groups) => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].header, "Children of Venkat");
            let kids: Vec<&str> = groups[0].entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(kids, vec!["Ravi", "Srinivas"]);
        }
        SectionBody::Entries(_) => panic!("grandchildren should be grouped"),
    }
    assert!(report.section(SectionKind::Parents).is_none());
}

#[test]
fn test_missing_home() {
    let graph = make_family();
    let dictionary = Dictionary::new();
    let engine = KinshipEngine::new(&graph, &dictionary, EngineOptions::default());
    assert_eq!(
        build_report(&engine, "nobody").unwrap_err(),
        ReportError::HomeNotFound("nobody".to_string())
    );
}

#[test]
fn test_text_and_json_rendering() {
    let graph = make_family();
    let dictionary = english_dictionary();
    let engine = KinshipEngine::new(&graph, &dictionary, EngineOptions::default());
    let report = build_report(&engine, "me").unwrap();

    let text = report.to_string();
    assert!(text.starts_with("Relationship Report\nCentered on: Srinivas (me)\n"));
    assert!(text.contains("\nSIBLINGS' CHILDREN\n  Children of Ravi:\n    - Kiran: Brother's-Son\n"));
    assert!(text.contains("SPOUSE SIDE\n  Spouse: Sunita (Wife)\n    Parents:\n"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["home_id"], "me");
    assert_eq!(json["sections"][0]["kind"], "self");
    assert_eq!(json["sections"][1]["body"]["entries"][0]["role"], "father");
    assert!(json["sections"][0]["body"]["entries"][0].get("role").is_none());
}
