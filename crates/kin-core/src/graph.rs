//! Family graph data model and the read-only lookups the kinship engine runs on.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Recorded gender of a person. Drives the edge label chosen for children, spouses and siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "U")]
    Unknown,
}

impl Gender {
    /// Parse the loose gender markers found in family data ("M", "female", "f", ...).
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Gender::Male,
            "F" | "FEMALE" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

/// A person in the family graph.
///
/// Parent and spouse fields are weak references by ID; they may point at persons that are
/// not present in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub father_id: Option<String>,
    pub mother_id: Option<String>,
    /// Spouse references. Expected to be symmetric across the graph.
    pub spouse_ids: Vec<String>,
    /// Raw birth date as recorded, e.g. `10-JAN-1980`.
    pub birth: Option<String>,
    pub gender: Gender,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            father_id: None,
            mother_id: None,
            spouse_ids: Vec::new(),
            birth: None,
            gender: Gender::Unknown,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_father(mut self, father_id: impl Into<String>) -> Self {
        self.father_id = Some(father_id.into());
        self
    }

    pub fn with_mother(mut self, mother_id: impl Into<String>) -> Self {
        self.mother_id = Some(mother_id.into());
        self
    }

    pub fn with_spouse(mut self, spouse_id: impl Into<String>) -> Self {
        self.spouse_ids.push(spouse_id.into());
        self
    }

    pub fn with_birth(mut self, birth: impl Into<String>) -> Self {
        self.birth = Some(birth.into());
        self
    }

    /// Father then mother, skipping the ones that are not recorded.
    pub fn parent_ids(&self) -> impl Iterator<Item = &str> {
        self.father_id
            .as_deref()
            .into_iter()
            .chain(self.mother_id.as_deref())
    }
}

/// Read-only lookups over a family snapshot.
///
/// The kinship engine is generic over this trait so any externally owned person store can
/// back it. Only `person` and `children_of` are required.
pub trait KinGraph {
    /// Look up a person by ID.
    fn person(&self, id: &str) -> Option<&Person>;

    /// Children recorded against a parent ID (father or mother), possibly empty.
    fn children_of(&self, id: &str) -> &[String];

    /// Gender of a person, `Unknown` when the person is missing.
    fn gender_of(&self, id: &str) -> Gender {
        self.person(id).map_or(Gender::Unknown, |p| p.gender)
    }

    /// Derived siblings: children of the father, then children of the mother, without the
    /// person itself and without duplicates.
    fn siblings_of(&self, id: &str) -> Vec<String> {
        let Some(person) = self.person(id) else {
            return Vec::new();
        };
        let mut siblings: Vec<String> = Vec::new();
        for parent_id in person.parent_ids() {
            for child in self.children_of(parent_id) {
                if child != id && !siblings.contains(child) {
                    siblings.push(child.clone());
                }
            }
        }
        siblings
    }
}

/// In-memory family graph with a parent → children index.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    pub people: BTreeMap<String, Person>,
    /// Parent ID → child IDs, in insertion order. Keyed by the ID written on the child, so the
    /// parent itself need not be present.
    children_index: HashMap<String, Vec<String>>,
}

impl FamilyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a sequence of persons. Later duplicates replace earlier ones.
    pub fn from_people(people: impl IntoIterator<Item = Person>) -> Self {
        let mut graph = Self::new();
        for person in people {
            graph.insert_person(person);
        }
        graph
    }

    /// Insert a person, replacing any previous record with the same ID.
    /// Returns the replaced record.
    pub fn insert_person(&mut self, person: Person) -> Option<Person> {
        let previous = self.people.remove(&person.id);
        if let Some(old) = &previous {
            for parent_id in old.parent_ids() {
                if let Some(children) = self.children_index.get_mut(parent_id) {
                    children.retain(|c| c != &old.id);
                }
            }
        }
        for parent_id in person.parent_ids() {
            self.children_index
                .entry(parent_id.to_string())
                .or_default()
                .push(person.id.clone());
        }
        self.people.insert(person.id.clone(), person);
        previous
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    /// Display name for an ID, "Unknown" when the person is missing.
    pub fn display_name(&self, id: &str) -> &str {
        self.people.get(id).map_or("Unknown", |p| p.name.as_str())
    }

    /// Structural problems in the snapshot. Nothing is repaired.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        for person in self.people.values() {
            for (role, parent_id) in [("father", &person.father_id), ("mother", &person.mother_id)] {
                let Some(parent_id) = parent_id else { continue };
                if parent_id == &person.id {
                    issues.push(IntegrityIssue::SelfReference {
                        id: person.id.clone(),
                        role,
                    });
                } else if !self.contains(parent_id) {
                    issues.push(IntegrityIssue::MissingParent {
                        child: person.id.clone(),
                        parent: parent_id.clone(),
                        role,
                    });
                }
            }
            for spouse_id in &person.spouse_ids {
                if spouse_id == &person.id {
                    issues.push(IntegrityIssue::SelfReference {
                        id: person.id.clone(),
                        role: "spouse",
                    });
                    continue;
                }
                match self.people.get(spouse_id) {
                    None => issues.push(IntegrityIssue::MissingSpouse {
                        id: person.id.clone(),
                        spouse: spouse_id.clone(),
                    }),
                    Some(spouse) if !spouse.spouse_ids.contains(&person.id) => {
                        issues.push(IntegrityIssue::AsymmetricSpouse {
                            id: person.id.clone(),
                            spouse: spouse_id.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        issues
    }
}

impl KinGraph for FamilyGraph {
    fn person(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    fn children_of(&self, id: &str) -> &[String] {
        match self.children_index.get(id) {
            Some(children) => children,
            None => &[],
        }
    }
}

/// A structural problem found by [`FamilyGraph::integrity_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// `id` lists `spouse`, but `spouse` does not list `id` back.
    AsymmetricSpouse { id: String, spouse: String },
    MissingSpouse { id: String, spouse: String },
    MissingParent {
        child: String,
        parent: String,
        role: &'static str,
    },
    /// A person recorded as their own parent or spouse.
    SelfReference { id: String, role: &'static str },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::AsymmetricSpouse { id, spouse } => {
                write!(f, "{id} lists spouse {spouse}, but {spouse} does not list {id}")
            }
            IntegrityIssue::MissingSpouse { id, spouse } => {
                write!(f, "{id} lists spouse {spouse}, which is not in the graph")
            }
            IntegrityIssue::MissingParent {
                child,
                parent,
                role,
            } => write!(f, "{child} has {role} {parent}, which is not in the graph"),
            IntegrityIssue::SelfReference { id, role } => {
                write!(f, "{id} is recorded as its own {role}")
            }
        }
    }
}
