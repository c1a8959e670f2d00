//! Relationship report: the home person's relatives grouped by category, each labelled with
//! the term home uses for them.

use crate::engine::{KinshipEngine, UNKNOWN};
use kin_core::graph::KinGraph;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Role of a parent or grandparent relative to the person they are listed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KinRole {
    Father,
    Mother,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandfather,
    MaternalGrandmother,
}

impl fmt::Display for KinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KinRole::Father => "Father",
            KinRole::Mother => "Mother",
            KinRole::PaternalGrandfather => "Paternal Grandfather",
            KinRole::PaternalGrandmother => "Paternal Grandmother",
            KinRole::MaternalGrandfather => "Maternal Grandfather",
            KinRole::MaternalGrandmother => "Maternal Grandmother",
        })
    }
}

/// Recorded parents of `id`, father first.
pub fn parents_of<G: KinGraph + ?Sized>(graph: &G, id: &str) -> Vec<(String, KinRole)> {
    let Some(person) = graph.person(id) else {
        return Vec::new();
    };
    let mut parents = Vec::new();
    if let Some(father) = &person.father_id {
        parents.push((father.clone(), KinRole::Father));
    }
    if let Some(mother) = &person.mother_id {
        parents.push((mother.clone(), KinRole::Mother));
    }
    parents
}

/// Recorded grandparents of `id`. A side is skipped when that parent has no record.
pub fn grandparents_of<G: KinGraph + ?Sized>(graph: &G, id: &str) -> Vec<(String, KinRole)> {
    let Some(person) = graph.person(id) else {
        return Vec::new();
    };
    let sides = [
        (
            &person.father_id,
            KinRole::PaternalGrandfather,
            KinRole::PaternalGrandmother,
        ),
        (
            &person.mother_id,
            KinRole::MaternalGrandfather,
            KinRole::MaternalGrandmother,
        ),
    ];

    let mut grandparents = Vec::new();
    for (parent, grandfather, grandmother) in sides {
        let Some(parent) = parent.as_deref().and_then(|p| graph.person(p)) else {
            continue;
        };
        if let Some(father) = &parent.father_id {
            grandparents.push((father.clone(), grandfather));
        }
        if let Some(mother) = &parent.mother_id {
            grandparents.push((mother.clone(), grandmother));
        }
    }
    grandparents
}

/// Report categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    #[serde(rename = "self")]
    Own,
    Parents,
    Grandparents,
    Siblings,
    SiblingsChildren,
    Children,
    Grandchildren,
}

impl SectionKind {
    /// Heading for a top-level section.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Own => "SELF",
            SectionKind::Parents => "PARENTS",
            SectionKind::Grandparents => "GRANDPARENTS",
            SectionKind::Siblings => "SIBLINGS",
            SectionKind::SiblingsChildren => "SIBLINGS' CHILDREN",
            SectionKind::Children => "CHILDREN",
            SectionKind::Grandchildren => "GRANDCHILDREN",
        }
    }

    /// Heading inside a spouse block.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Own => "Self",
            SectionKind::Parents => "Parents",
            SectionKind::Grandparents => "Grandparents",
            SectionKind::Siblings => "Siblings",
            SectionKind::SiblingsChildren => "Siblings' Children",
            SectionKind::Children => "Children",
            SectionKind::Grandchildren => "Grandchildren",
        }
    }
}

/// One listed relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<KinRole>,
    /// What home calls this person.
    pub relation: String,
}

/// Relatives listed under a shared header, e.g. "Children of Ravi".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    pub header: String,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionBody {
    Entries(Vec<ReportEntry>),
    Groups(Vec<ReportGroup>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub body: SectionBody,
}

impl ReportSection {
    /// Every entry in the section, across groups.
    pub fn entries(&self) -> Vec<&ReportEntry> {
        match &self.body {
            SectionBody::Entries(entries) => entries.iter().collect(),
            SectionBody::Groups(groups) => groups.iter().flat_map(|g| &g.entries).collect(),
        }
    }
}

/// A spouse of home with the spouse's own family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpouseSide {
    pub spouse: ReportEntry,
    pub sections: Vec<ReportSection>,
}

/// Categorized relatives of one person. Empty categories are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipReport {
    pub home_id: String,
    pub home_name: String,
    pub sections: Vec<ReportSection>,
    pub spouse_sides: Vec<SpouseSide>,
}

impl RelationshipReport {
    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("home person {0} not found")]
    HomeNotFound(String),
}

/// Build the relationship report centered on `home`.
pub fn build_report<G: KinGraph + ?Sized>(
    engine: &KinshipEngine<'_, G>,
    home: &str,
) -> Result<RelationshipReport, ReportError> {
    let graph = engine.graph();
    let person = graph
        .person(home)
        .ok_or_else(|| ReportError::HomeNotFound(home.to_string()))?;

    let mut builder = ReportBuilder {
        engine,
        home,
        relations: HashMap::new(),
    };

    let mut sections = Vec::new();
    let own = builder.entry(home, None);
    sections.push(ReportSection {
        kind: SectionKind::Own,
        body: SectionBody::Entries(vec![own]),
    });
    sections.extend(builder.family_sections(home));

    let children = builder.entries(graph.children_of(home).iter().map(|c| (c.clone(), None)));
    let grandchildren = builder.children_groups(&children);
    sections.extend(section(SectionKind::Children, SectionBody::Entries(children)));
    sections.extend(section(SectionKind::Grandchildren, SectionBody::Groups(grandchildren)));

    let mut spouse_sides = Vec::new();
    for spouse_id in &person.spouse_ids {
        if graph.person(spouse_id).is_none() {
            tracing::debug!("spouse {spouse_id} of {home} has no record, skipped in report");
            continue;
        }
        let spouse = builder.entry(spouse_id, None);
        let sections = builder.family_sections(spouse_id);
        spouse_sides.push(SpouseSide { spouse, sections });
    }

    tracing::debug!(
        "report for {home}: {} section(s), {} spouse side(s), {} relation(s) resolved",
        sections.len(),
        spouse_sides.len(),
        builder.relations.len()
    );

    Ok(RelationshipReport {
        home_id: home.to_string(),
        home_name: person.name.clone(),
        sections,
        spouse_sides,
    })
}

fn section(kind: SectionKind, body: SectionBody) -> Option<ReportSection> {
    let empty = match &body {
        SectionBody::Entries(entries) => entries.is_empty(),
        SectionBody::Groups(groups) => groups.is_empty(),
    };
    (!empty).then_some(ReportSection { kind, body })
}

struct ReportBuilder<'r, 'a, G: KinGraph + ?Sized> {
    engine: &'r KinshipEngine<'a, G>,
    home: &'r str,
    /// Target → term, so a relative listed twice is only resolved once.
    relations: HashMap<String, String>,
}

impl<G: KinGraph + ?Sized> ReportBuilder<'_, '_, G> {
    fn relation(&mut self, id: &str) -> String {
        if let Some(term) = self.relations.get(id) {
            return term.clone();
        }
        let term = self.engine.find_relationship(self.home, id);
        self.relations.insert(id.to_string(), term.clone());
        term
    }

    fn entry(&mut self, id: &str, role: Option<KinRole>) -> ReportEntry {
        let name = self
            .engine
            .graph()
            .person(id)
            .map_or(UNKNOWN, |p| p.name.as_str())
            .to_string();
        ReportEntry {
            id: id.to_string(),
            name,
            role,
            relation: self.relation(id),
        }
    }

    fn entries(
        &mut self,
        ids: impl IntoIterator<Item = (String, Option<KinRole>)>,
    ) -> Vec<ReportEntry> {
        ids.into_iter().map(|(id, role)| self.entry(&id, role)).collect()
    }

    /// One group per listed person who has children.
    fn children_groups(&mut self, parents: &[ReportEntry]) -> Vec<ReportGroup> {
        let graph = self.engine.graph();
        let mut groups = Vec::new();
        for parent in parents {
            let kids = graph.children_of(&parent.id);
            if kids.is_empty() {
                continue;
            }
            groups.push(ReportGroup {
                header: format!("Children of {}", parent.name),
                entries: self.entries(kids.iter().map(|k| (k.clone(), None))),
            });
        }
        groups
    }

    /// Parents, grandparents, siblings and siblings' children of `id`, all labelled from
    /// home's point of view.
    fn family_sections(&mut self, id: &str) -> Vec<ReportSection> {
        let graph = self.engine.graph();
        let parents = self.entries(parents_of(graph, id).into_iter().map(|(p, r)| (p, Some(r))));
        let grandparents =
            self.entries(grandparents_of(graph, id).into_iter().map(|(p, r)| (p, Some(r))));
        let siblings = self.entries(graph.siblings_of(id).into_iter().map(|s| (s, None)));
        let siblings_children = self.children_groups(&siblings);

        [
            section(SectionKind::Parents, SectionBody::Entries(parents)),
            section(SectionKind::Grandparents, SectionBody::Entries(grandparents)),
            section(SectionKind::Siblings, SectionBody::Entries(siblings)),
            section(SectionKind::SiblingsChildren, SectionBody::Groups(siblings_children)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn write_entries(
    f: &mut fmt::Formatter<'_>,
    entries: &[ReportEntry],
    indent: usize,
) -> fmt::Result {
    for entry in entries {
        writeln!(f, "{:indent$}- {}: {}", "", entry.name, entry.relation)?;
    }
    Ok(())
}

fn write_body(f: &mut fmt::Formatter<'_>, body: &SectionBody, indent: usize) -> fmt::Result {
    match body {
        SectionBody::Entries(entries) => write_entries(f, entries, indent),
        SectionBody::Groups(groups) => {
            for group in groups {
                writeln!(f, "{:indent$}{}:", "", group.header)?;
                write_entries(f, &group.entries, indent + 2)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for RelationshipReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Relationship Report")?;
        writeln!(f, "Centered on: {} ({})", self.home_name, self.home_id)?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.kind.title())?;
            write_body(f, &section.body, 2)?;
        }

        if !self.spouse_sides.is_empty() {
            writeln!(f)?;
            writeln!(f, "SPOUSE SIDE")?;
            for side in &self.spouse_sides {
                writeln!(f, "  Spouse: {} ({})", side.spouse.name, side.spouse.relation)?;
                for section in &side.sections {
                    writeln!(f, "    {}:", section.kind.label())?;
                    write_body(f, &section.body, 6)?;
                }
            }
        }
        Ok(())
    }
}
