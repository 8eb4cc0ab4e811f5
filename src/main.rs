use anyhow::{Context, Result};
use blogcrew::cli::commands::{BatchCommand, GenerateCommand, ServeCommand, ValidateCommand};
use blogcrew::cli::output::*;
use blogcrew::cli::{Cli, Command};
use blogcrew::core::{CrewConfig, Settings};
use blogcrew::execution::{ExecutionEngine, ExecutionEvent};
use blogcrew::output::OutputWriter;
use blogcrew::presenter::{server, BlogRequest, ImageOutcome, Presenter};
use blogcrew::GroqClient;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    // Execute command
    match &cli.command {
        Command::Batch(cmd) => run_batch(cmd, &cli, settings).await?,
        Command::Serve(cmd) => serve_ui(cmd, settings).await?,
        Command::Generate(cmd) => generate_post(cmd, &cli, settings).await?,
        Command::Validate(cmd) => validate_crew(cmd)?,
    }

    Ok(())
}

/// Load a crew from a file, or fall back to a built-in one
fn load_crew(path: Option<&Path>, builtin: fn() -> Result<CrewConfig>) -> Result<CrewConfig> {
    match path {
        Some(path) => CrewConfig::from_file(path)
            .with_context(|| format!("Failed to load crew definition {}", path.display())),
        None => builtin().context("Failed to load built-in crew"),
    }
}

/// Print a user-facing failure and stop
fn abort(message: impl std::fmt::Display) -> ! {
    println!("{} {}", CROSS, style(message).red());
    std::process::exit(1);
}

async fn run_batch(cmd: &BatchCommand, cli: &Cli, settings: Settings) -> Result<()> {
    let crew = load_crew(cmd.crew.as_deref(), CrewConfig::batch)?;
    println!("{} Loaded crew: {}", INFO, style(&crew.name).bold());

    let mut pipeline = crew.to_pipeline()?;
    if let Some(topic) = &cmd.topic {
        pipeline.set_variable("topic", topic.trim());
    }
    for (key, value) in &cmd.variable {
        pipeline.set_variable(key.clone(), value.clone());
        println!(
            "{} Variable override: {} = {}",
            INFO,
            style(key).cyan(),
            style(value).dim()
        );
    }

    let topic = pipeline
        .variables
        .get("topic")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    if topic.is_empty() {
        abort("Topic must not be empty");
    }

    let agent_config = settings.agent_config().unwrap_or_else(|e| abort(e));
    let agent = GroqClient::new(agent_config).context("Failed to create LLM client")?;

    let spinner = create_spinner("Agents are working...");
    let mut engine = ExecutionEngine::new(agent);
    let stream = cli.stream;
    let progress = spinner.clone();
    engine.add_event_handler(move |event| {
        progress.println(format_execution_event(&event));

        if stream {
            if let ExecutionEvent::StageCompleted { output, .. } = &event {
                progress.println(format_output(output, 5));
            }
        }
    });

    let result = engine.execute(&mut pipeline).await;
    spinner.finish_and_clear();

    let markdown = match result {
        Ok(markdown) => markdown,
        Err(e) => {
            error!("{}", e);
            abort(format!("{} failed: {}", pipeline.name, e));
        }
    };

    let output_dir = cmd
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir.clone());
    let paths = OutputWriter::new(output_dir)
        .write_now(&topic, &markdown)
        .context("Failed to write output files")?;

    println!("{} Markdown output saved to: {}", CHECK, style(paths.markdown.display()).bold());
    println!("{} HTML output saved to: {}", CHECK, style(paths.html.display()).bold());

    Ok(())
}

async fn serve_ui(cmd: &ServeCommand, settings: Settings) -> Result<()> {
    let crew = load_crew(cmd.crew.as_deref(), CrewConfig::interactive)?;
    let presenter = Presenter::from_settings(&settings, crew).unwrap_or_else(|e| abort(e));

    println!(
        "{} Blog generator UI at {}",
        ROCKET,
        style(format!("http://{}", cmd.bind)).cyan()
    );
    server::serve(cmd.bind, Arc::new(presenter))
        .await
        .context("Web UI stopped")?;

    Ok(())
}

async fn generate_post(cmd: &GenerateCommand, cli: &Cli, settings: Settings) -> Result<()> {
    let crew = load_crew(cmd.crew.as_deref(), CrewConfig::interactive)?;

    // Both credentials are checked here, before any request is made.
    let presenter = Presenter::from_settings(&settings, crew).unwrap_or_else(|e| abort(e));

    let spinner = create_spinner("Agents are working...");
    let stream = cli.stream;
    let progress = spinner.clone();
    let presenter = presenter.on_event(move |event| {
        progress.println(format_execution_event(&event));

        if stream {
            if let ExecutionEvent::StageCompleted { output, .. } = &event {
                progress.println(format_output(output, 5));
            }
        }
    });

    let request = BlogRequest {
        topic: cmd.topic.clone(),
        tone: cmd.tone.into(),
        language: cmd.language.into(),
    };

    let result = presenter.generate(&request).await;
    spinner.finish_and_clear();
    let presentation = result.unwrap_or_else(|e| {
        error!("{}", e);
        abort(e)
    });

    println!("\n{} {}", CHECK, style("Generated Blog").bold());
    println!("{}", separator());
    println!("{}", presentation.markdown.trim());
    println!("{}", separator());

    println!("\n{} {}", PICTURE, style("Suggested Image").bold());
    match &presentation.image {
        ImageOutcome::Found { url } => {
            println!("  {}", style(url).cyan());
            println!("  {}", style(format!("Image related to {}", presentation.topic)).dim());
        }
        ImageOutcome::NotFound | ImageOutcome::Failed { .. } => {
            println!(
                "{} {}",
                WARN,
                style(presentation.image_warning().unwrap_or_default()).yellow()
            );
        }
    }

    Ok(())
}

fn validate_crew(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating crew...", INFO);

    match CrewConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Crew definition is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Agents: {}", style(config.agents.len()).cyan());
            println!("  Tasks: {}", style(config.tasks.len()).cyan());
            for (position, task) in config.tasks.iter().enumerate() {
                let role = config
                    .agent(&task.agent)
                    .map(|a| a.role.as_str())
                    .unwrap_or_default();
                println!("    {}. {} ({})", position + 1, style(&task.id).cyan(), style(role).dim());
            }

            let pipeline = config.to_pipeline()?;
            println!("  Execution order: {}", pipeline.execution_order().join(" → "));

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
