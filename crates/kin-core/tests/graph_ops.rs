use kin_core::graph::*;

fn make_person(id: &str, gender: Gender) -> Person {
    Person::new(id, id.to_uppercase()).with_gender(gender)
}

/// Two parents with three children, one of them a half-sibling through the father only.
fn make_family() -> FamilyGraph {
    FamilyGraph::from_people([
        make_person("dad", Gender::Male).with_spouse("mom"),
        make_person("mom", Gender::Female).with_spouse("dad"),
        make_person("son", Gender::Male)
            .with_father("dad")
            .with_mother("mom"),
        make_person("daughter", Gender::Female)
            .with_father("dad")
            .with_mother("mom"),
        make_person("half", Gender::Unknown).with_father("dad"),
    ])
}

#[test]
fn test_person_lookup() {
    let graph = make_family();
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.person("son").map(|p| p.name.as_str()), Some("SON"));
    assert!(graph.person("nobody").is_none());
}

#[test]
fn test_siblings_are_deduplicated_and_exclude_self() {
    let graph = make_family();
    let siblings = graph.siblings_of("son");
    assert_eq!(siblings, vec!["daughter", "half"]);
}

#[test]
fn test_half_sibling_sees_full_siblings_through_father() {
    let graph = make_family();
    assert_eq!(graph.siblings_of("half"), vec!["son", "daughter"]);
}

#[test]
fn test_siblings_of_orphan_and_missing() {
    let graph = make_family();
    assert!(graph.siblings_of("dad").is_empty());
    assert!(graph.siblings_of("nobody").is_empty());
}

#[test]
fn test_siblings_through_missing_parent_record() {
    // The shared father is referenced but has no record of his own.
    let graph = FamilyGraph::from_people([
        make_person("a", Gender::Male).with_father("ghost"),
        make_person("b", Gender::Female).with_father("ghost"),
    ]);
    assert_eq!(graph.siblings_of("a"), vec!["b"]);
    assert_eq!(graph.children_of("ghost"), ["a", "b"]);
}

#[test]
fn test_gender_lookup() {
    let graph = make_family();
    assert_eq!(graph.gender_of("mom"), Gender::Female);
    assert_eq!(graph.gender_of("half"), Gender::Unknown);
}

#[test]
fn test_clean_family_has_no_integrity_issues() {
    assert!(make_family().integrity_issues().is_empty());
}

#[test]
fn test_integrity_issues_reported() {
    let graph = FamilyGraph::from_people([
        make_person("a", Gender::Male).with_spouse("b").with_spouse("zz"),
        make_person("b", Gender::Female),
        make_person("c", Gender::Male).with_father("c").with_mother("missing"),
    ]);
    let issues = graph.integrity_issues();

    assert!(issues.contains(&IntegrityIssue::AsymmetricSpouse {
        id: "a".into(),
        spouse: "b".into(),
    }));
    assert!(issues.contains(&IntegrityIssue::MissingSpouse {
        id: "a".into(),
        spouse: "zz".into(),
    }));
    assert!(issues.contains(&IntegrityIssue::SelfReference {
        id: "c".into(),
        role: "father",
    }));
    assert!(issues.contains(&IntegrityIssue::MissingParent {
        child: "c".into(),
        parent: "missing".into(),
        role: "mother",
    }));
    assert_eq!(issues.len(), 4);
}

#[test]
fn test_integrity_issue_display() {
    let issue = IntegrityIssue::AsymmetricSpouse {
        id: "a".into(),
        spouse: "b".into(),
    };
    assert_eq!(issue.to_string(), "a lists spouse b, but b does not list a");
}
