use crate::{
    cli::{BuildArgs, Cli, Commands},
    config::TemplateConfig,
    constants::CONFIG_FILENAME,
    error::{Error, Result},
    ioutils::dir_name,
    renderer::new_evaluator,
    scope::ScopeBuilder,
    store::{TemplateListing, TemplateStore},
    template::{BuildSummary, Materializer, TemplateProcessor},
};
use log::{debug, info};
use std::path::PathBuf;

/// Everything a build needs besides the template store.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub template_name: String,
    /// Directory the project is created in.
    pub output_root: PathBuf,
    /// Value of the `cwd_dir_name` binding.
    pub cwd_dir_name: String,
    pub skip_conflicts: bool,
    /// Tokens given after `--`, parsed against the template's `arg_config`.
    pub template_args: Vec<String>,
}

impl BuildRequest {
    /// A request creating the project in the current working directory.
    pub fn in_current_dir(args: &BuildArgs) -> Result<Self> {
        let output_root = std::env::current_dir()?;
        Ok(Self {
            template_name: args.template_name.clone(),
            cwd_dir_name: dir_name(&output_root),
            output_root,
            skip_conflicts: args.skip_conflicts,
            template_args: args.template_args.clone(),
        })
    }
}

/// Materializes a template into `request.output_root`.
///
/// The configuration is loaded and the template arguments are parsed before
/// any file is written.
pub fn build(store: &TemplateStore, request: &BuildRequest) -> Result<BuildSummary> {
    store.ensure_exists()?;
    let template_root = store.template_root(&request.template_name)?;
    let evaluator = new_evaluator();

    let config = TemplateConfig::from_json_path(
        template_root.join(CONFIG_FILENAME),
        &request.cwd_dir_name,
        &evaluator,
    )
    .map_err(|e| Error::ConfigLoadError {
        template: request.template_name.clone(),
        template_path: template_root.display().to_string(),
        source: Box::new(e),
    })?;

    let bindings = config.arguments().parse(&request.template_name, &request.template_args)?;
    let scope = ScopeBuilder::with_builtins(&request.cwd_dir_name)
        .extend_json(config.scope())
        .extend(bindings)
        .build();
    debug!("Scope bindings: {}", scope.names().collect::<Vec<_>>().join(", "));

    let processor = TemplateProcessor::new(
        &config,
        &evaluator,
        &scope,
        &request.output_root,
        request.skip_conflicts,
    );
    let summary = Materializer::new().materialize(&processor, config.classification().files())?;
    info!(
        "{} files written, {} copied, {} skipped",
        summary.written.len(),
        summary.copied.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

/// Lists the templates of `store`.
pub fn list(store: &TemplateStore) -> Result<TemplateListing> {
    store.list()
}

fn print_listing(listing: &TemplateListing) {
    if listing.templates.is_empty() {
        println!("No templates found");
    } else {
        println!("Available templates:");
        for template in &listing.templates {
            println!("- {}: {}", template.name, template.description);
        }
    }
    if !listing.errors.is_empty() {
        eprintln!("Errors:");
        for error in &listing.errors {
            eprintln!("- {error}");
        }
    }
}

/// Main entry point for CLI execution
pub fn run(cli: Cli) -> Result<()> {
    let store = match cli.templates_dir {
        Some(dir) => TemplateStore::with_dir(dir),
        None => TemplateStore::new()?,
    };

    match cli.command {
        Commands::Build(args) => {
            let request = BuildRequest::in_current_dir(&args)?;
            build(&store, &request)?;
            println!("Project \"{}\" created successfully", request.template_name);
        }
        Commands::List => print_listing(&list(&store)?),
    }
    Ok(())
}
