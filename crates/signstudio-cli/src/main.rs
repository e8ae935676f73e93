mod demo;
mod display;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use signstudio_ai::{InsightAdapter, InsightConfig, TemplateContext};
use signstudio_editor::{TemplateDraft, persist};

#[derive(Parser)]
#[command(name = "signstudio", version, about = "E-signature template editor tooling")]
struct Cli {
    /// Base URL of the insight generation service.
    #[arg(long, env = "SIGNSTUDIO_INSIGHT_URL", global = true)]
    insight_url: Option<String>,

    /// Insight service credential. Without one, insights use demo content.
    #[arg(long, env = "SIGNSTUDIO_INSIGHT_KEY", hide_env_values = true, global = true)]
    insight_key: Option<String>,

    /// Model name passed to the insight service.
    #[arg(long, env = "SIGNSTUDIO_MODEL", global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a template draft.
    Show { draft: PathBuf },
    /// Run the pre-save checks on a template draft.
    Validate { draft: PathBuf },
    /// Validate and save a template draft (simulated storage).
    Save { draft: PathBuf },
    /// AI risk audit of a template draft.
    Audit { draft: PathBuf },
    /// Short AI briefing of a template draft.
    Brief { draft: PathBuf },
    /// Ask the giving-insights assistant a question about a template draft.
    Chat { draft: PathBuf, question: String },
    /// Replay a scripted editing session and print each step.
    Demo {
        /// Write the resulting draft as JSON.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    fn insight_config(&self) -> InsightConfig {
        let mut config = InsightConfig {
            api_key: self.insight_key.clone(),
            ..InsightConfig::default()
        };
        if let Some(url) = &self.insight_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config
    }
}

fn load(path: &Path) -> anyhow::Result<TemplateDraft> {
    persist::load(path).with_context(|| format!("loading draft {}", path.display()))
}

fn context_of(draft: &TemplateDraft) -> TemplateContext {
    TemplateContext::new(draft.title(), draft.roles().all(), draft.fields().all())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("signstudio v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let adapter = InsightAdapter::from_config(cli.insight_config());

    match &cli.command {
        Command::Show { draft } => {
            display::print_template_card(&load(draft)?);
        }
        Command::Validate { draft } => {
            let mut draft = load(draft)?;
            let result = draft.validate();
            display::print_template_card(&draft);
            match result {
                Ok(()) => println!("Template is ready to save."),
                Err(e) => anyhow::bail!("template is not valid: {e}"),
            }
        }
        Command::Save { draft: path } => {
            let mut draft = load(path)?;
            match signstudio_editor::save(&mut draft, signstudio_editor::SIMULATED_SAVE_DELAY).await {
                Ok(saved) => display::print_saved(&saved),
                Err(e) => anyhow::bail!("template is not valid: {e}"),
            }
        }
        Command::Audit { draft } => {
            let draft = load(draft)?;
            let insight = adapter.audit(&context_of(&draft)).await;
            display::print_audit(&insight);
        }
        Command::Brief { draft } => {
            let draft = load(draft)?;
            let insight = adapter.briefing(&context_of(&draft)).await;
            display::print_text("Briefing", &insight);
        }
        Command::Chat { draft, question } => {
            let draft = load(draft)?;
            let context = context_of(&draft).render();
            let insight = adapter.chat(&context, &[], question).await;
            display::print_text("Assistant", &insight);
        }
        Command::Demo { out } => run_demo(&adapter, out.as_deref()).await?,
    }

    Ok(())
}

async fn run_demo(adapter: &InsightAdapter, out: Option<&Path>) -> anyhow::Result<()> {
    let demo::DemoOutcome {
        mut draft,
        first_error,
        ..
    } = demo::run_scenario()?;

    match &first_error {
        Some(e) => println!("First save attempt rejected: {e}"),
        None => println!("First save attempt unexpectedly passed"),
    }
    println!("Label set to \"Full Name\"; retrying.");
    println!();

    let generation = draft.audit_panel_mut().begin();
    let insight = adapter.audit(&context_of(&draft)).await;
    draft.audit_panel_mut().complete(generation, insight.value.clone());
    display::print_audit(&insight);

    let saved = signstudio_editor::save(&mut draft, demo::DEMO_SAVE_DELAY)
        .await
        .context("saving demo template")?;
    display::print_template_card(&draft);
    display::print_saved(&saved);

    if let Some(path) = out {
        persist::store(&draft, path).with_context(|| format!("writing {}", path.display()))?;
        println!("Draft written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_chat_command() {
        let cli = Cli::try_parse_from([
            "signstudio",
            "--model",
            "insight-small",
            "chat",
            "pledge.json",
            "Who signs first?",
        ])
        .unwrap();
        let config = cli.insight_config();
        assert_eq!(config.model, "insight-small");
        match cli.command {
            Command::Chat { draft, question } => {
                assert_eq!(draft, PathBuf::from("pledge.json"));
                assert_eq!(question, "Who signs first?");
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn insight_url_is_normalised() {
        let cli = Cli::try_parse_from([
            "signstudio",
            "--insight-url",
            "https://insights.example.org/",
            "demo",
        ])
        .unwrap();
        assert_eq!(cli.insight_config().base_url, "https://insights.example.org");
    }

    #[test]
    fn demo_draft_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        let outcome = demo::run_scenario().unwrap();
        persist::store(&outcome.draft, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.fields().len(), 2);
        assert_eq!(loaded.title(), "Annual Gift Agreement");
    }
}
