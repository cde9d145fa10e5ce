//! Estate CLI
//!
//! Terminal front-end for the property backend:
//! - Log in, register and log out
//! - List, show, create, update and delete properties
//! - Check backend status
//!
//! The login flag is kept in a session file between invocations.

use clap::{Parser, Subcommand, ValueEnum};
use estate::client::{ClientOptions, EstateApi, EstateClient};
use estate::config::{generate_default_config, Config};
use estate::logging::init_logging;
use estate::model::{Property, PropertyId};
use estate::session::{FileSession, SessionStore};
use estate::views::{FormField, LoginView, PropertiesView, RegisterView, SubmitOutcome};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "estate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage properties from the terminal")]
#[command(long_about = "Estate is a property manager.\nLog in, then list, create, edit and delete properties on the Estate backend.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file holding the login flag (overrides config)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Output format for property listings
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login { username: String, password: String },

    /// Create an account
    Register {
        username: String,
        password: String,
        /// Password again
        confirm: String,
    },

    /// Forget the session
    Logout,

    /// List properties
    List {
        /// Only properties with exactly this address
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Show one property
    Show { id: PropertyId },

    /// Add a property
    Create {
        #[arg(long)]
        address: String,
        #[arg(long)]
        price: String,
        /// Size in square meters
        #[arg(long)]
        size: String,
        #[arg(long)]
        description: String,
    },

    /// Edit a property; omitted fields keep their current value
    Update {
        id: PropertyId,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Fetch the property by id instead of taking it from the list
        #[arg(long)]
        fresh: bool,
    },

    /// Delete a property
    Delete { id: PropertyId },

    /// Show backend status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.client.base_url = url.clone();
    }
    if let Some(file) = &cli.session_file {
        config.client.session_file = file.to_string_lossy().to_string();
    }

    init_logging(&config.logging)?;

    let options: ClientOptions = config.client.to_client_options();
    let client = EstateClient::new(options)?;
    let session = FileSession::new(&config.client.session_file);

    match cli.command {
        Commands::Login { username, password } => {
            let mut view = LoginView::with_credentials(username, password);

            if view.submit(&client, &session).await.is_some() {
                println!("Login successful");
            } else {
                fail(view.error_message().unwrap_or("Error logging in"));
            }
        }

        Commands::Register {
            username,
            password,
            confirm,
        } => {
            let mut view = RegisterView::with_fields(username.clone(), password, confirm);

            if view.submit(&client).await.is_some() {
                println!("User registered successfully");
                println!();
                println!("Log in with:");
                println!("  estate login {} <password>", username.trim());
            } else {
                fail(view.error_message().unwrap_or("Error registering user"));
            }
        }

        Commands::Logout => match PropertiesView::new().logout(&session) {
            Ok(_) => println!("Logged out"),
            Err(e) => fail(&format!("Failed to log out: {}", e)),
        },

        Commands::List { address } => {
            require_login(&session);

            let properties = match address {
                Some(address) => match client.search_properties(&address).await {
                    Ok(properties) => properties,
                    Err(e) => {
                        tracing::error!(error = %e, "Error fetching properties");
                        fail("Error fetching properties");
                    }
                },
                None => {
                    let mut view = PropertiesView::new();
                    if !view.refresh(&client).await {
                        fail("Error fetching properties");
                    }
                    view.properties().to_vec()
                }
            };

            write_properties(std::io::stdout().lock(), &properties, cli.format)?;
        }

        Commands::Show { id } => {
            require_login(&session);

            if let Err(e) = show_property(&client, id, std::io::stdout().lock(), cli.format).await {
                fail(&e.to_string());
            }
        }

        Commands::Create {
            address,
            price,
            size,
            description,
        } => {
            let mut view = mounted_view(&client, &session).await;

            let form = view.form_mut();
            form.set(FormField::Address, address);
            form.set(FormField::Price, price);
            form.set(FormField::Size, size);
            form.set(FormField::Description, description);

            report_submit(view.submit(&client).await);
        }

        Commands::Update {
            id,
            address,
            price,
            size,
            description,
            fresh,
        } => {
            let mut view = mounted_view(&client, &session).await;

            if fresh {
                if !view.edit_by_id(&client, id).await {
                    fail(&format!("Property with id {} not found", id));
                }
            } else {
                match listed_property(&view, id) {
                    Ok(property) => view.edit(&property),
                    Err(message) => fail(&message),
                }
            }

            let form = view.form_mut();
            let changes = [
                (FormField::Address, address),
                (FormField::Price, price),
                (FormField::Size, size),
                (FormField::Description, description),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    form.set(field, value);
                }
            }

            report_submit(view.submit(&client).await);
        }

        Commands::Delete { id } => {
            let mut view = mounted_view(&client, &session).await;

            if view.delete(&client, id).await {
                println!("Deleted property {}", id);
            } else {
                fail("Error deleting property");
            }
        }

        Commands::Status => match client.health().await {
            Ok(health) => {
                println!("Estate v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!(
                    "API Status: {}",
                    health["status"].as_str().unwrap_or("unknown")
                );
                println!(
                    "Database: {}",
                    health["database"].as_str().unwrap_or("unknown")
                );
                if let Some(count) = health["properties"].as_u64() {
                    println!("Properties: {}", count);
                }
                if let Some(uptime) = health["uptime_seconds"].as_u64() {
                    println!();
                    println!("Uptime: {}", format_duration(uptime));
                }
                println!();
                println!(
                    "Session: {}",
                    if session.is_authenticated() {
                        "logged in"
                    } else {
                        "logged out"
                    }
                );
            }
            Err(e) => {
                eprintln!("Cannot connect to Estate API at {}", client.base_url());
                eprintln!("Error: {}", e);
                eprintln!();
                eprintln!("Make sure the Estate API server is running:");
                eprintln!("  cargo run --bin estate-api");
                std::process::exit(1);
            }
        },

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn require_login(session: &FileSession) {
    if !session.is_authenticated() {
        eprintln!("Not logged in");
        eprintln!();
        eprintln!("Log in first with:");
        eprintln!("  estate login <username> <password>");
        std::process::exit(1);
    }
}

/// Properties view after the login guard and the initial fetch
async fn mounted_view(client: &EstateClient, session: &FileSession) -> PropertiesView {
    let mut view = PropertiesView::new();
    if view.mount(client, session).await.is_some() {
        require_login(session);
    }
    view
}

/// Print one property fetched by id
async fn show_property<A, W>(
    api: &A,
    id: PropertyId,
    out: W,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    A: EstateApi + ?Sized,
    W: Write,
{
    let property = api.get_property(id).await?;
    write_properties(out, &[property], format)
}

/// Row from the mounted list. A list that never loaded is a fetch error,
/// not a missing id.
fn listed_property(view: &PropertiesView, id: PropertyId) -> Result<Property, String> {
    if !view.is_loaded() {
        return Err("Error fetching properties".to_string());
    }
    view.properties()
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| format!("Property with id {} not found", id))
}

fn report_submit(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Created(property) => println!("Created {}", property),
        SubmitOutcome::Updated(property) => println!("Updated {}", property),
        SubmitOutcome::Invalid(e) => fail(&e.to_string()),
        SubmitOutcome::Failed => fail("Error creating or updating property"),
    }
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

fn write_properties<W: Write>(
    mut out: W,
    properties: &[Property],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, properties)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for property in properties {
                writer.serialize(property)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if properties.is_empty() {
                writeln!(out, "No properties yet.")?;
                writeln!(out)?;
                writeln!(out, "Add one with:")?;
                writeln!(
                    out,
                    "  estate create --address <A> --price <P> --size <S> --description <D>"
                )?;
                return Ok(());
            }

            writeln!(
                out,
                "{:<6} {:<30} {:>14} {:>10}  {}",
                "ID", "Address", "Price", "Size (m2)", "Description"
            )?;
            writeln!(out, "{}", "-".repeat(80))?;

            for p in properties {
                writeln!(
                    out,
                    "{:<6} {:<30} {:>14.2} {:>10.2}  {}",
                    p.id, p.address, p.price, p.size, p.description
                )?;
            }
        }
    }

    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
