//! CLI binary for the kinship engine: relate people, print reports, check family data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kin_core::config::KinConfig;
use kin_core::dictionary::Dictionary;
use kin_core::graph::{FamilyGraph, KinGraph};
use kin_core::storage;
use kin_engine::lookup::{self, LookupError};
use kin_engine::normalize::{normalize, tokenize};
use kin_engine::paths::{EdgeLabel, SELF_CODE};
use kin_engine::report::build_report;
use kin_engine::{EngineOptions, KinshipEngine, UNKNOWN};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kin", about = "Kinship terms and relationship reports for family trees")]
struct Cli {
    /// Project root directory holding the family data (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Language key for kinship terms, e.g. te, kn, en (overrides config)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what the home person calls a target
    Relate {
        /// Target person ID or unique name
        target: String,

        /// Home person ID or unique name (defaults to data.home_person)
        #[arg(long)]
        home: Option<String>,

        /// Show the path and codes behind the term
        #[arg(long)]
        explain: bool,
    },

    /// Print the relationship report centered on the home person
    Report {
        /// Home person ID or unique name (defaults to data.home_person)
        #[arg(long)]
        home: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every person with the term the home person uses for them
    List {
        /// Home person ID or unique name (defaults to data.home_person)
        #[arg(long)]
        home: Option<String>,
    },

    /// Reduce a raw kinship code (e.g. FFBSS) to canonical form
    Normalize {
        /// Raw code built from F, M, S, D, C, H, W, P, B, Z and Sib
        code: String,
    },

    /// Show family data and dictionary statistics
    Info,

    /// Check family data integrity (asymmetric spouses, dangling references)
    Validate,
}

/// Loaded family data and settings for one project.
struct Project {
    config: KinConfig,
    graph: FamilyGraph,
    dictionary: Dictionary,
}

impl Project {
    fn load(project_root: &Path, lang: Option<&str>) -> Result<Self> {
        let mut config = KinConfig::load(project_root)
            .with_context(|| format!("failed to load config for {}", project_root.display()))?;
        if let Some(lang) = lang {
            config.language.active = lang.to_string();
            config.normalize();
            config.validate()?;
        }
        let graph = storage::load_graph(project_root, &config)?;
        let dictionary = storage::load_dictionary_or_empty(project_root, &config)?;
        tracing::debug!(
            "language {} (fallback {}), max depth {}",
            config.language.active,
            config.language.fallback,
            config.search.max_depth
        );
        Ok(Self {
            config,
            graph,
            dictionary,
        })
    }

    fn engine(&self) -> KinshipEngine<'_, FamilyGraph> {
        KinshipEngine::new(
            &self.graph,
            &self.dictionary,
            EngineOptions::from_config(&self.config),
        )
    }

    /// Resolve user input to a person ID, with suggestions on a miss.
    fn person_id(&self, query: &str) -> Result<String> {
        match lookup::find_person(&self.graph, query) {
            Ok(person) => Ok(person.id.clone()),
            Err(LookupError::NoMatch { query, suggestions }) if !suggestions.is_empty() => {
                let hints: Vec<String> = suggestions
                    .iter()
                    .map(|s| format!("{} ({})", s.id, s.name))
                    .collect();
                anyhow::bail!(
                    "no person matches {:?}. Did you mean: {}?",
                    query,
                    hints.join(", ")
                )
            }
            Err(e) => Err(e.into()),
        }
    }

    fn home_id(&self, home: Option<&str>) -> Result<String> {
        let home = home
            .map(str::to_string)
            .or_else(|| self.config.data.home_person.clone())
            .context(
                "no home person given; pass --home or set data.home_person in .kin/config.toml",
            )?;
        self.person_id(&home)
    }
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let lang = cli.lang.as_deref();

    match cli.command {
        Commands::Relate {
            target,
            home,
            explain,
        } => cmd_relate(&project_root, lang, &target, home.as_deref(), explain),
        Commands::Report { home, json } => cmd_report(&project_root, lang, home.as_deref(), json),
        Commands::List { home } => cmd_list(&project_root, lang, home.as_deref()),
        Commands::Normalize { code } => cmd_normalize(&code),
        Commands::Info => cmd_info(&project_root, lang),
        Commands::Validate => cmd_validate(&project_root),
    }
}

fn cmd_relate(
    project_root: &Path,
    lang: Option<&str>,
    target: &str,
    home: Option<&str>,
    explain: bool,
) -> Result<()> {
    let project = Project::load(project_root, lang)?;
    let home = project.home_id(home)?;
    let target = project.person_id(target)?;
    let engine = project.engine();

    if !explain {
        println!("{}", engine.find_relationship(&home, &target));
        return Ok(());
    }

    match engine.relationship(&home, &target) {
        Ok(rel) => {
            let names: Vec<String> = rel
                .path
                .iter()
                .map(|id| format!("{} ({})", project.graph.display_name(id), id))
                .collect();
            println!("{}", rel.term);
            println!("  Path: {}", names.join(" -> "));
            println!("  Raw code: {}", rel.raw_code);
            println!("  Canonical code: {}", rel.code);
            if project.dictionary.get(&rel.code).is_none() {
                println!("  (no dictionary entry; term spelled out)");
            }
        }
        Err(e) => {
            println!("{UNKNOWN}");
            println!("  Reason: {e}");
        }
    }
    Ok(())
}

fn cmd_report(
    project_root: &Path,
    lang: Option<&str>,
    home: Option<&str>,
    json: bool,
) -> Result<()> {
    let project = Project::load(project_root, lang)?;
    let home = project.home_id(home)?;
    let engine = project.engine();
    let report = build_report(&engine, &home)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn cmd_list(project_root: &Path, lang: Option<&str>, home: Option<&str>) -> Result<()> {
    let project = Project::load(project_root, lang)?;
    let home = project.home_id(home)?;
    let engine = project.engine();

    let targets: Vec<String> = project.graph.people.keys().cloned().collect();
    let related = engine.relate_all(&home, &targets);
    let unrelated = related.iter().filter(|(_, term)| term == UNKNOWN).count();

    for (id, term) in &related {
        println!("{}\t{}\t{}", id, project.graph.display_name(id), term);
    }
    eprintln!(
        "\n{} people, {} without a relationship to {}",
        related.len(),
        unrelated,
        home
    );
    Ok(())
}

fn cmd_normalize(code: &str) -> Result<()> {
    let code = code.trim();
    if code != SELF_CODE {
        let unknown: Vec<&str> = tokenize(code)
            .into_iter()
            .filter(|t| EdgeLabel::from_code(t).is_none())
            .collect();
        if !unknown.is_empty() {
            anyhow::bail!("unknown code token(s): {}", unknown.join(", "));
        }
    }
    println!("{}", normalize(code));
    Ok(())
}

fn cmd_info(project_root: &Path, lang: Option<&str>) -> Result<()> {
    let project = Project::load(project_root, lang)?;
    let config = &project.config;

    let with_birth = project
        .graph
        .people
        .values()
        .filter(|p| p.birth.is_some())
        .count();
    let couples = project
        .graph
        .people
        .values()
        .map(|p| p.spouse_ids.len())
        .sum::<usize>()
        / 2;

    println!("People: {}", project.graph.len());
    println!("  With birth date: {}", with_birth);
    println!("  Spouse links: {}", couples);
    println!("Dictionary entries: {}", project.dictionary.len());
    let languages: Vec<String> = project.dictionary.languages().into_iter().collect();
    if !languages.is_empty() {
        println!("Languages: {}", languages.join(", "));
    }
    println!(
        "Active language: {} (fallback {})",
        config.language.active, config.language.fallback
    );
    println!("Max path length: {}", config.search.max_depth);
    if let Some(home) = &config.data.home_person {
        println!("Home person: {} ({})", project.graph.display_name(home), home);
    }
    Ok(())
}

fn cmd_validate(project_root: &Path) -> Result<()> {
    let project = Project::load(project_root, None)?;
    let mut issues = 0;

    for issue in project.graph.integrity_issues() {
        println!("WARN: {issue}");
        issues += 1;
    }

    if let Some(home) = &project.config.data.home_person
        && project.graph.person(home).is_none()
    {
        println!("WARN: configured home person {home} is not in the family data");
        issues += 1;
    }

    for code in project.dictionary.codes() {
        if code == SELF_CODE {
            continue;
        }
        if tokenize(code).iter().any(|t| EdgeLabel::from_code(t).is_none()) {
            println!("WARN: dictionary code {code} contains unknown tokens");
            issues += 1;
        } else if normalize(code) != code {
            println!(
                "WARN: dictionary code {code} is never looked up; it reduces to {}",
                normalize(code)
            );
            issues += 1;
        }
    }

    if issues == 0 {
        eprintln!("Family data is valid. No integrity issues found.");
        eprintln!(
            "  {} people, {} dictionary entries",
            project.graph.len(),
            project.dictionary.len()
        );
    } else {
        eprintln!("\nFound {} integrity issue(s).", issues);
    }

    Ok(())
}
