//! Command dispatch and handlers

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ViewState};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::dates::{birth_label, death_label, lifespan};
use crate::domain::{FamilyTree, Language, Person};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    match command {
        Commands::Search { query, json } => cmd_search(cli, &query.join(" "), *json),
        Commands::Show {
            from,
            highlight,
            depth,
            years,
        } => cmd_show(cli, from.as_deref(), highlight.as_deref(), *depth, *years),
        Commands::Person { query } => cmd_person(cli, &query.join(" ")),
        Commands::Leaves => cmd_leaves(cli),
        Commands::Info => cmd_info(cli),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Load settings and apply command-line overrides.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings =
        Settings::load(cli.config.as_deref())?.with_overrides(cli.data.as_deref(), cli.lang);
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn load_tree(cli: &Cli) -> CliResult<(ServiceContainer, FamilyTree)> {
    let container = ServiceContainer::new(load_settings(cli)?)?;
    let tree = container.tree_service.load_configured(&container.settings)?;
    Ok((container, tree))
}

#[instrument(skip(cli))]
fn cmd_search(cli: &Cli, query: &str, json: bool) -> CliResult<()> {
    let (container, tree) = load_tree(cli)?;
    let service = &container.tree_service;

    if json {
        let outcome = service.search(&tree, query);
        let rendered = serde_json::to_string_pretty(&outcome.result).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "serialize search result".to_string(),
                source: Box::new(e),
            }
        })?;
        output::info(&rendered);
        if !outcome.is_found() {
            return Err(CliError::NotFound(query.trim().to_string()));
        }
        return Ok(());
    }

    let located = tree
        .locate_with(service.normalizer(), query)
        .ok_or_else(|| CliError::NotFound(query.trim().to_string()))?;
    let language = container.settings.language;
    let segments: Vec<&str> = located.chain().map(|p| p.display_name(language)).collect();
    output::trail(&segments);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_show(
    cli: &Cli,
    from: Option<&str>,
    highlight: Option<&str>,
    depth: Option<usize>,
    years: bool,
) -> CliResult<()> {
    if depth == Some(0) {
        return Err(CliError::InvalidArgs("--depth must be at least 1".to_string()));
    }
    let (container, tree) = load_tree(cli)?;
    let service = &container.tree_service;

    let view = match highlight {
        Some(query) => {
            let outcome = service.search(&tree, query);
            if !outcome.is_found() {
                return Err(CliError::NotFound(query.trim().to_string()));
            }
            outcome.view
        }
        None => ViewState::default(),
    };

    let (start, level) = match from {
        Some(query) => {
            let located = tree
                .locate_with(service.normalizer(), query)
                .ok_or_else(|| CliError::NotFound(query.trim().to_string()))?;
            (located.node, located.level())
        }
        None => (tree.root(), 0),
    };

    let ctx = ShowContext {
        language: container.settings.language,
        years,
        max_depth: depth,
        view: &view,
        start_level: level,
    };
    output::info(&ctx.render(start, level));
    Ok(())
}

struct ShowContext<'v> {
    language: Language,
    years: bool,
    max_depth: Option<usize>,
    view: &'v ViewState,
    start_level: usize,
}

impl ShowContext<'_> {
    fn label(&self, person: &Person, level: usize) -> String {
        let mut label = person.display_name(self.language).to_string();
        if self.years {
            if let Some(span) = lifespan(person) {
                label = format!("{label} ({})", span.trim_end());
            }
        }
        if self.view.should_expand(level, &person.name) {
            if level + 1 == self.view.expand_path.len() && self.view.is_highlighted(&person.name) {
                return format!("{} ◀", label).green().bold().to_string();
            }
            return label.green().to_string();
        }
        label
    }

    fn render(&self, person: &Person, level: usize) -> Tree<String> {
        let mut label = self.label(person, level);
        let shown = level - self.start_level + 1;
        if self.max_depth.is_some_and(|max| shown >= max) {
            if !person.is_leaf() {
                label = format!("{label} {}", format!("(+{})", person.children.len()).dimmed());
            }
            return Tree::new(label);
        }
        let leaves: Vec<_> = person
            .children
            .iter()
            .map(|child| self.render(child, level + 1))
            .collect();
        Tree::new(label).with_leaves(leaves)
    }
}

#[instrument(skip(cli))]
fn cmd_person(cli: &Cli, query: &str) -> CliResult<()> {
    let (container, tree) = load_tree(cli)?;
    let language = container.settings.language;
    let located = tree
        .locate_with(container.tree_service.normalizer(), query)
        .ok_or_else(|| CliError::NotFound(query.trim().to_string()))?;
    let person = located.node;

    output::header(person.display_name(language));
    if let Some(localized) = &person.localized_name {
        output::action("Name", &format!("{} / {}", person.name, localized));
    }
    output::action(
        language.born_label(),
        birth_label(person.birth_date.as_deref()),
    );
    output::action(
        language.passed_label(),
        death_label(person.death_date.as_deref()),
    );
    if let Some(span) = lifespan(person) {
        output::action("Lifespan", span.trim_end());
    }
    match container.photos.resolve(person) {
        Some(url) => output::action("Photo", &url),
        None => output::action("Photo", &format!("none (initials: {})", person.initials())),
    }
    output::action("Generation", &(located.level() + 1));
    output::action(
        "Lineage",
        &located.chain().map(|p| p.display_name(language)).join(" > "),
    );
    if !person.is_leaf() {
        output::action("Children", &person.children.len());
        for child in &person.children {
            output::detail(child.display_name(language));
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_leaves(cli: &Cli) -> CliResult<()> {
    let (_, tree) = load_tree(cli)?;
    for leaf in tree.leaf_names() {
        output::info(leaf);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_info(cli: &Cli) -> CliResult<()> {
    let (container, tree) = load_tree(cli)?;
    let source = match &container.settings.data_file {
        Some(path) => path.display().to_string(),
        None => "bundled sample".to_string(),
    };
    output::header("Family tree");
    output::action("Source", &source);
    output::action("Root", &tree.root().name);
    output::action("Persons", &tree.len());
    output::action("Generations", &tree.depth());
    output::action("Leaves", &tree.leaf_names().len());
    output::action("Language", &container.settings.language);
    output::action(
        "Name rules",
        &container
            .tree_service
            .normalizer()
            .rules()
            .iter()
            .map(|r| format!("{{{}}} -> {}", r.variants.join(", "), r.canonical))
            .join("; "),
    );
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("Global", &describe_path(&path)),
                None => output::warning("no config directory available on this platform"),
            }
            if let Some(local) = &cli.config {
                output::action("Local", &describe_path(local));
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => global_config_path()
                    .ok_or_else(|| CliError::Usage("no config directory available".to_string()))?,
            };
            let container = ServiceContainer::new(Settings::default())?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

fn describe_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}
