//! # Students CLI
//!
//! Terminal front-end for the student records API. Each invocation loads the
//! list, applies one form action through the controller and prints the
//! resulting list.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use student_core::{
    config::{DEFAULT_ORIGIN, INSECURE_ENV, ORIGIN_ENV},
    controller::TITLE,
    ClientConfig, ControllerState, Outcome, Student, StudentApi, StudentController,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "students", about = TITLE)]
struct Cli {
    /// API origin; the collection lives at `<origin>/api/Student`.
    #[arg(long, env = ORIGIN_ENV, default_value = DEFAULT_ORIGIN, global = true)]
    api_url: String,

    /// Accept self-signed TLS certificates.
    #[arg(
        long,
        env = INSECURE_ENV,
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    insecure: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every student (the default).
    List,
    /// Show one student.
    Show { id: i64 },
    /// Create a student.
    Add(Fields),
    /// Edit a student; only the given fields change.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a student.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct Fields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    address1: Option<String>,
    #[arg(long)]
    address2: Option<String>,
}

impl Fields {
    fn apply(self, student: &mut Student) {
        let pairs = [
            (self.name, &mut student.name),
            (self.email, &mut student.email),
            (self.mobile, &mut student.mobile),
            (self.city, &mut student.city),
            (self.state, &mut student.state),
            (self.address1, &mut student.address1),
            (self.address2, &mut student.address2),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_affirmative(&answer)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_students(students: &[Student]) {
    println!(
        "{:>5}  {:<20} {:<28} {:<12} {:<14} {:<8} {}",
        "ID", "NAME", "EMAIL", "MOBILE", "CITY", "STATE", "ADDRESS"
    );
    for s in students {
        let address = if s.address2.is_empty() {
            s.address1.clone()
        } else {
            format!("{}, {}", s.address1, s.address2)
        };
        println!(
            "{:>5}  {:<20} {:<28} {:<12} {:<14} {:<8} {}",
            s.id, s.name, s.email, s.mobile, s.city, s.state, address
        );
    }
}

fn check(outcome: Outcome, state: &ControllerState) -> Result<()> {
    if outcome == Outcome::Failed {
        bail!("{}", state.error_message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.api_url)
        .context("invalid --api-url")?
        .with_accept_invalid_certs(cli.insecure);
    tracing::debug!(origin = %config.origin, "connecting");

    let mut controller = StudentController::connect(&config).await?;
    if controller.state().has_error() {
        bail!("{}", controller.state().error_message);
    }

    match cli.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Show { id } => {
            let student = controller
                .api()
                .get(id)
                .await
                .with_context(|| format!("student {id} could not be fetched"))?;
            print_students(&[student]);
            return Ok(());
        }
        Command::Add(fields) => {
            controller.on_reset();
            fields.apply(controller.selected_mut());
            if controller.state().selected.name.trim().is_empty() {
                bail!("--name is required");
            }
            let outcome = controller.on_submit().await;
            check(outcome, controller.state())?;
        }
        Command::Edit { id, fields } => {
            let Some(existing) = controller.state().students.iter().find(|s| s.id == id).cloned() else {
                bail!("no student with id {id}");
            };
            controller.on_edit(&existing);
            fields.apply(controller.selected_mut());
            let outcome = controller.on_submit().await;
            check(outcome, controller.state())?;
        }
        Command::Delete { id, yes } => {
            let outcome = if yes {
                controller.on_delete(id, &|_: &str| true).await
            } else {
                controller.on_delete(id, &confirm_on_stdin).await
            };
            if outcome == Outcome::Cancelled {
                println!("Cancelled.");
                return Ok(());
            }
            check(outcome, controller.state())?;
        }
    }

    print_students(&controller.state().students);
    Ok(())
}
