//! Campus CLI
//!
//! Command-line front end for the campus network:
//! - Register, sign in and out
//! - Browse and create groups and posts
//! - Comment on and like posts
//!
//! The signed-in user is remembered in the session data directory, so
//! commands after `login` act as that user.

use anyhow::{anyhow, bail, Context};
use campus::api::{ApiClient, ClientError, HttpTransport};
use campus::config::{generate_default_config, Config};
use campus::models::Id;
use campus::routing::{Admission, Route};
use campus::session::{FileSessionStore, SessionContext};
use campus::shell::{AuthError, Dashboard, Screen, Shell};
use campus::views::{CommentsView, LikesView};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "campus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Campus community network from the terminal")]
#[command(long_about = "Join groups for classes, clubs and communities.\nShare updates, comment and like from the command line.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the remembered sign-in
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the signed-in user
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Resolve a path the way the web app would (e.g. /dashboard)
    Open { path: String },

    /// Campus groups
    #[command(subcommand)]
    Groups(GroupCommands),

    /// Posts in a group
    #[command(subcommand)]
    Posts(PostCommands),

    /// Comments on a post
    #[command(subcommand)]
    Comments(CommentCommands),

    /// Like a post
    Like { post_id: String },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// List all groups
    List,
    /// Create a group
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// List the posts of a group
    List { group_id: String },
    /// Post to a group
    Create { group_id: String, content: String },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// List the comments of a post
    List { post_id: String },
    /// Comment on a post
    Create { post_id: String, content: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.session.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let transport = HttpTransport::new(&config.api.base_url, config.api.request_timeout())?;
    let api = ApiClient::new(Arc::new(transport));
    let store = FileSessionStore::new(config.session.data_dir());
    tracing::debug!("Session file: {:?}", store.path());
    let session = SessionContext::new(Arc::new(store))?;
    let mut shell = Shell::new(api.clone(), session);

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            shell.navigate(Route::Register.path()).await;
            if let Screen::Register(form) = shell.screen_mut() {
                form.name = name;
                form.email = email;
                form.password = password;
            }
            submit_auth(&mut shell).await?;
        }

        Commands::Login { email, password } => {
            shell.navigate(Route::Login.path()).await;
            if let Screen::Login(form) = shell.screen_mut() {
                form.email = email;
                form.password = password;
            }
            submit_auth(&mut shell).await?;
        }

        Commands::Logout => {
            shell.logout().await?;
            println!("Signed out");
        }

        Commands::Whoami => match shell.session().current() {
            Some(session) => {
                println!("{} <{}>", session.user.name, session.user.email);
                println!("  ID: {}", session.user.id);
                if let Some(at) = session.saved_at {
                    println!("  Signed in: {}", at.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            None => println!("Not signed in"),
        },

        Commands::Open { path } => {
            let admission = shell.navigate(&path).await;
            match &admission {
                Admission::Render(route) => println!("{}", route.path()),
                Admission::Redirect(route) => println!("{} -> {}", path, route.path()),
            }
            if let Screen::Dashboard(dashboard) = shell.screen() {
                println!();
                println!("{}", dashboard.greeting());
                println!("{} groups", dashboard.groups().groups().len());
            }
        }

        Commands::Groups(GroupCommands::List) => {
            let dashboard = dashboard(&mut shell).await?;
            if !dashboard.groups().listing().is_loaded() {
                return Err(feedback_error(dashboard, "Could not load groups"));
            }
            if let Some(empty) = dashboard.groups().placeholder() {
                println!("{}", empty);
            } else {
                println!("{:<24} {:<24} {}", "ID", "Name", "Description");
                println!("{}", "-".repeat(72));
                for group in dashboard.groups().groups() {
                    println!(
                        "{:<24} {:<24} {}",
                        group.id,
                        group.name,
                        group.description.as_deref().unwrap_or("")
                    );
                }
            }
        }

        Commands::Groups(GroupCommands::Create { name, description }) => {
            let dashboard = dashboard(&mut shell).await?;
            match dashboard.create_group(&name, &description).await {
                Ok(group) => println!("Created group {} ({})", group.name, group.id),
                Err(e) => return Err(client_error(dashboard, e)),
            }
        }

        Commands::Posts(PostCommands::List { group_id }) => {
            let dashboard = dashboard(&mut shell).await?;
            if let Err(e) = dashboard.open_group(&Id::new(group_id)).await {
                return Err(client_error(dashboard, e));
            }
            if let Some(group) = dashboard.selected_group() {
                println!("# {}", group.name);
            }
            if let Some(empty) = dashboard.posts().placeholder() {
                println!("{}", empty);
            }
            for post in dashboard.posts().posts() {
                println!("[{}] {}: {}", post.id, post.author_id, post.content);
                if let Some(thread) = dashboard.thread(&post.id) {
                    let comments = thread.comments.comments().len();
                    println!("    {} · {} comments", thread.likes.label(), comments);
                }
            }
            for feedback in dashboard.drain_feedback() {
                eprintln!("warning: {}", feedback.message);
            }
        }

        Commands::Posts(PostCommands::Create { group_id, content }) => {
            let dashboard = dashboard(&mut shell).await?;
            let posted = match dashboard.open_group(&Id::new(group_id)).await {
                Ok(()) => dashboard.create_post(&content).await,
                Err(e) => Err(e),
            };
            match posted {
                Ok(post) => println!("Posted ({})", post.id),
                Err(e) => return Err(client_error(dashboard, e)),
            }
        }

        Commands::Comments(CommentCommands::List { post_id }) => {
            dashboard(&mut shell).await?;
            let mut view = CommentsView::new(api, Id::new(post_id));
            if let Err(e) = view.load().await {
                bail!(view
                    .take_feedback()
                    .map(|f| f.message)
                    .unwrap_or_else(|| e.user_message("Could not load comments")));
            }
            if let Some(empty) = view.placeholder() {
                println!("{}", empty);
            }
            for comment in view.comments() {
                println!("{}: {}", comment.author_id, comment.content);
            }
        }

        Commands::Comments(CommentCommands::Create { post_id, content }) => {
            let session = dashboard(&mut shell).await?.session().clone();
            let mut view = CommentsView::new(api, Id::new(post_id));
            if let Err(e) = view.create(&session, &content).await {
                bail!(view
                    .take_feedback()
                    .map(|f| f.message)
                    .unwrap_or_else(|| e.user_message("Could not add comment")));
            }
            println!("Commented ({} comments)", view.comments().len());
            if let Some(feedback) = view.take_feedback() {
                eprintln!("warning: {}", feedback.message);
            }
        }

        Commands::Like { post_id } => {
            let session = dashboard(&mut shell).await?.session().clone();
            let mut view = LikesView::new(api, Id::new(post_id));
            if let Err(e) = view.like(&session).await {
                bail!(view
                    .take_feedback()
                    .map(|f| f.message)
                    .unwrap_or_else(|| e.user_message("Could not like post")));
            }
            println!("Liked ({})", view.label());
            if let Some(feedback) = view.take_feedback() {
                eprintln!("warning: {}", feedback.message);
            }
        }

        // Written out before the client is built
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("campus={}", config.logging.level)));

    let (pretty, json) = if config.logging.is_json() {
        (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

/// Mount the dashboard, or fail with a sign-in hint
async fn dashboard(shell: &mut Shell) -> anyhow::Result<&mut Dashboard> {
    shell.navigate(Route::Dashboard.path()).await;
    match shell.screen_mut() {
        Screen::Dashboard(dashboard) => Ok(dashboard.as_mut()),
        _ => bail!("Not signed in, please log in with `campus login`"),
    }
}

async fn submit_auth(shell: &mut Shell) -> anyhow::Result<()> {
    match shell.submit_auth().await {
        Ok(_) => {
            if let Some(session) = shell.session().current() {
                println!("Signed in as {} ({})", session.user.name, session.user.id);
            }
            Ok(())
        }
        Err(AuthError::Client(e)) if e.is_validation() => bail!(e),
        Err(e) => {
            let inline = match shell.screen() {
                Screen::Login(form) => form.error(),
                Screen::Register(form) => form.error(),
                _ => None,
            };
            Err(anyhow!(inline.map(str::to_string).unwrap_or_else(|| e.to_string())))
        }
    }
}

/// Prefer the message the view would have shown
fn client_error(dashboard: &mut Dashboard, err: ClientError) -> anyhow::Error {
    match dashboard.drain_feedback().into_iter().next() {
        Some(feedback) => anyhow!(feedback.message),
        None => anyhow!(err.user_message("Request failed")),
    }
}

fn feedback_error(dashboard: &mut Dashboard, generic: &str) -> anyhow::Error {
    match dashboard.drain_feedback().into_iter().next() {
        Some(feedback) => anyhow!(feedback.message),
        None => anyhow!(generic.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_nested_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "campus",
            "--api-url",
            "http://10.0.0.5:8000",
            "posts",
            "create",
            "g1",
            "hello campus",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8000"));
        match cli.command {
            Commands::Posts(PostCommands::Create { group_id, content }) => {
                assert_eq!(group_id, "g1");
                assert_eq!(content, "hello campus");
            }
            _ => panic!("expected posts create"),
        }
    }

    #[test]
    fn test_register_requires_all_fields() {
        assert!(Cli::try_parse_from(["campus", "register", "--name", "Ada"]).is_err());
    }
}
