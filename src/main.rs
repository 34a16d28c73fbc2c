//! ndc's main application entry point.
//! Parses the command line and dispatches to template listing or project
//! generation.

use ndc::{
    catalog::{templates, Cloud},
    cli::{get_args, Args, Command, CreateArgs},
    context::UuidGenerator,
    error::{default_error_handler, Result},
    generator::generate_project,
    logger::init_logger,
    store::{DirStore, EmbeddedStore, TemplateStore},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::List => {
            list_templates();
            Ok(())
        }
        Command::Create(create) => create_project(create),
    }
}

fn list_templates() {
    println!("Available templates:");
    println!();
    for t in templates() {
        println!("📦 {}", t.name);
        println!("   Cloud: {}", t.cloud.display_name());
        println!("   Service: {}", t.service);
        println!("   Description: {}", t.description);
        println!();
    }
    println!("Usage:");
    println!("  ndc create <template> --name <project-name>");
    println!();
    println!("Example:");
    println!("  ndc create dotnet-webapp-aws --name my-api");
}

fn create_project(create: CreateArgs) -> Result<()> {
    let options = create.to_options()?;
    let config = options.validate()?;

    let store: Box<dyn TemplateStore> = match &create.template_dir {
        Some(dir) => Box::new(DirStore::new(dir)),
        None => Box::new(EmbeddedStore::new()),
    };

    let project_dir = config.project_dir();
    println!(
        "Creating {} project '{}' in {}",
        config.template(),
        config.name(),
        config.output_dir().display()
    );

    let generated = generate_project(&config, &*store, &mut UuidGenerator)?;

    println!("✅ Successfully created {} project!", config.name());
    println!("📁 Location: {}", generated.root.display());
    println!("📄 Files: {}", generated.files.len());
    let features = config
        .features()
        .union(config.template().descriptor().implied);
    if features.any() {
        println!("🧩 Services: {}", features.enabled().join(", "));
    }
    println!("🚀 Next steps:");
    println!("   cd {}", project_dir.display());
    let credentials = match config.template().descriptor().cloud {
        Cloud::Aws => "AWS",
        Cloud::Gcp => "GCP",
        Cloud::Azure => "Azure",
    };
    println!("   # Configure {credentials} credentials");
    println!("   # Update terraform/variables.tf as needed");
    println!("   cd terraform && terraform init && terraform plan");
    Ok(())
}
