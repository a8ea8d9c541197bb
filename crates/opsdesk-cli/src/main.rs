//! OpsDesk CLI - Command line interface for the OpsDesk backends.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use opsdesk_client::{ClientConfig, OpsClient};
use opsdesk_core::user::UserKeywordReq;
use opsdesk_core::{
    CodebookUid, HandlerDetail, Kind, PageReq, RunnerId, TaskId, TemplateGroupId, TemplateId,
};
use opsdesk_state::{
    AgentPicker, Category, CodebookPicker, ExecutorPicker, LoadState, Notice, Notifier,
    RunnerBoard, RunnerQuery, Scope, TaskHistory, TemplateCatalog, TemplateFilter, WorkerPicker,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// OpsDesk CLI - automation platform management tool
#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(about = "CLI for the OpsDesk automation backends", long_about = None)]
struct Cli {
    /// Backend base URL [default: $OPSDESK_BASE_API or http://localhost:8000]
    #[arg(long)]
    base_url: Option<String>,

    /// CMDB path prefix [default: $OPSDESK_CMDB_PREFIX or /api/cmdb]
    #[arg(long)]
    cmdb_prefix: Option<String>,

    /// Task service path prefix [default: $OPSDESK_TASK_PREFIX or /api/task]
    #[arg(long)]
    task_prefix: Option<String>,

    /// Alert service path prefix [default: $OPSDESK_ALERT_PREFIX or /api/alert]
    #[arg(long)]
    alert_prefix: Option<String>,

    /// Request timeout in milliseconds [default: $OPSDESK_TIMEOUT_MS or 5000]
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Access token sent as a bearer credential
    #[arg(long, env = "OPSDESK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runner management
    #[command(subcommand)]
    Runners(RunnerCommand),

    /// Task history
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Template catalog
    #[command(subcommand)]
    Templates(TemplateCommand),

    /// List handlers of an executor or agent
    Handlers {
        /// Executor service name
        #[arg(long, conflicts_with = "agent")]
        executor: Option<String>,

        /// Agent topic
        #[arg(long)]
        agent: Option<String>,
    },

    /// List Kafka workers
    Workers,

    /// Print the secret of a codebook
    #[command(name = "codebook-secret")]
    CodebookSecret {
        /// Codebook identifier
        uid: String,
    },

    /// User lookup
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand)]
enum RunnerCommand {
    /// List all runners
    List,

    /// List runners of a codebook
    Codebook {
        /// Codebook identifier
        uid: String,

        /// Filter by keyword
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Filter by kind (KAFKA or GRPC)
        #[arg(long)]
        kind: Option<Kind>,

        #[arg(long, default_value_t = 0)]
        offset: u64,

        #[arg(long, default_value_t = opsdesk_state::runners::DEFAULT_RUNNER_PAGE)]
        limit: u64,

        /// List runners outside the codebook instead
        #[arg(long)]
        forkable: bool,

        /// Keep loading pages until the list is complete
        #[arg(long)]
        all: bool,
    },

    /// Delete a runner
    Delete {
        /// Runner ID
        id: i64,

        /// Runner name, used in messages
        #[arg(long, default_value = "")]
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// List tasks, one page at a time
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// Page size
        #[arg(short, long, default_value_t = opsdesk_state::task_history::PAGE_SIZES[0])]
        size: u64,
    },

    /// Print a task's logs
    Logs {
        /// Task ID
        id: i64,
    },

    /// Retry a task
    Retry {
        /// Task ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// Browse the catalog
    Catalog {
        /// "all", "favorites" or a template group ID
        #[arg(short, long, default_value = "all", value_parser = parse_category)]
        category: Category,

        /// Filter by name
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Add or remove a favorite
    #[command(name = "toggle-favorite")]
    ToggleFavorite {
        /// Template ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Show the current user
    Me,

    /// Search users by keyword
    Search {
        keyword: String,
    },
}

/// Notifier that prints notices for the terminal user.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(msg) => eprintln!("{msg}"),
            Notice::Error(msg) => eprintln!("error: {msg}"),
        }
    }
}

#[tokio::main]
async fn main() -> CliResult {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("opsdesk_client=warn,opsdesk_state=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Flags override the environment
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(prefix) = cli.cmdb_prefix {
        config.cmdb_prefix = prefix;
    }
    if let Some(prefix) = cli.task_prefix {
        config.task_prefix = prefix;
    }
    if let Some(prefix) = cli.alert_prefix {
        config.alert_prefix = prefix;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    debug!(base_url = %config.base_url, "Connecting");
    let ops = OpsClient::new(config)?;
    if let Some(token) = cli.token {
        ops.http().set_token(token);
    }
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);

    match cli.command {
        Commands::Runners(cmd) => runners(&ops, notifier, cmd).await,
        Commands::Tasks(cmd) => tasks(&ops, notifier, cmd).await,
        Commands::Templates(cmd) => templates(&ops, notifier, cmd).await,
        Commands::Handlers { executor, agent } => handlers(&ops, notifier, executor, agent).await,
        Commands::Workers => workers(&ops, notifier).await,
        Commands::CodebookSecret { uid } => codebook_secret(&ops, notifier, uid).await,
        Commands::Users(cmd) => users(&ops, cmd).await,
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    match s {
        "all" => Ok(Category::All),
        "favorites" => Ok(Category::Favorites),
        id => id
            .parse::<i64>()
            .map(|id| Category::Group(TemplateGroupId::new(id)))
            .map_err(|_| format!("expected \"all\", \"favorites\" or a group ID, got {id:?}")),
    }
}

fn check(status: LoadState) -> CliResult {
    if status.is_error() {
        return Err("request failed".into());
    }
    Ok(())
}

async fn runners(ops: &OpsClient, notifier: Arc<dyn Notifier>, cmd: RunnerCommand) -> CliResult {
    let board = RunnerBoard::new(ops.runners.clone(), notifier);

    let list = match cmd {
        RunnerCommand::List => {
            check(board.fetch_runners().await)?;
            board.all().snapshot().await
        }
        RunnerCommand::Codebook {
            uid,
            keyword,
            kind,
            offset,
            limit,
            forkable,
            all,
        } => {
            let mut query = RunnerQuery::new(uid)
                .with_page(offset, limit)
                .with_keyword(keyword);
            if let Some(kind) = kind {
                query = query.with_kind(kind);
            }
            let scope = if forkable { Scope::Forkable } else { Scope::Codebook };

            let status = if all {
                board.fetch_remaining(scope, query).await
            } else {
                board.fetch_scoped(scope, &query).await
            };
            check(status)?;
            board.scoped(scope).snapshot().await
        }
        RunnerCommand::Delete { id, name, yes } => {
            if !yes {
                return Err(format!("refusing to delete runner {id} without --yes").into());
            }
            let name = if name.is_empty() { id.to_string() } else { name };
            if !board.delete_runner(RunnerId::new(id), &name).await {
                return Err("delete failed".into());
            }
            return Ok(());
        }
    };

    println!("Runners ({} of {}):", list.items.len(), list.total);
    println!("{:<8}  {:<24}  {:<6}  {:<20}  {}", "ID", "NAME", "KIND", "CODEBOOK", "TARGET");
    println!("{}", "-".repeat(80));
    for runner in list.items {
        let codebook = runner
            .codebook_name
            .unwrap_or_else(|| runner.codebook_uid.to_string());
        println!(
            "{:<8}  {:<24}  {:<6}  {:<20}  {}",
            runner.id, runner.name, runner.kind, codebook, runner.target
        );
    }

    Ok(())
}

async fn tasks(ops: &OpsClient, notifier: Arc<dyn Notifier>, cmd: TaskCommand) -> CliResult {
    match cmd {
        TaskCommand::List { page, size } => {
            let history = TaskHistory::new(ops.tasks.clone(), notifier);
            check(history.go_to(page, size).await?)?;
            let pagination = history.pagination().await;

            println!(
                "Tasks (page {} of {}, {} total):",
                pagination.current_page(),
                pagination.page_count(),
                pagination.total
            );
            println!(
                "{:<8}  {:<6}  {:<6}  {:<20}  {:<20}  {}",
                "ID", "STATUS", "KIND", "CODEBOOK", "STARTED", "TARGET"
            );
            println!("{}", "-".repeat(80));
            for task in history.tasks().items().await {
                println!(
                    "{:<8}  {:<6}  {:<6}  {:<20}  {:<20}  {}",
                    task.id, task.status, task.kind, task.codebook_name, task.start_time, task.target
                );
            }
        }
        TaskCommand::Logs { id } => {
            let logs = ops.tasks.logs(TaskId::new(id)).await?;
            println!("{logs}");
        }
        TaskCommand::Retry { id } => {
            ops.tasks.retry(TaskId::new(id)).await?;
            println!("Task {id} queued for retry");
        }
    }

    Ok(())
}

async fn templates(ops: &OpsClient, notifier: Arc<dyn Notifier>, cmd: TemplateCommand) -> CliResult {
    let catalog = TemplateCatalog::new(ops.templates.clone(), notifier);

    match cmd {
        TemplateCommand::Catalog { category, query } => {
            check(catalog.refresh().await)?;
            let state = catalog.snapshot().await;
            let filter = TemplateFilter::new(category, query);
            let shown = filter.apply(&state.combinations, &state.favorites);

            println!(
                "{} ({} of {}):",
                filter.category_name(&state.combinations),
                shown.len(),
                state.total_template_count()
            );
            println!("{:<8}  {:<3}  {:<28}  {}", "ID", "FAV", "NAME", "DESCRIPTION");
            println!("{}", "-".repeat(80));
            for template in shown {
                let fav = if state.is_favorite(template.id) { "*" } else { "" };
                println!(
                    "{:<8}  {:<3}  {:<28}  {}",
                    template.id, fav, template.name, template.desc
                );
            }
        }
        TemplateCommand::ToggleFavorite { id } => {
            // Seed favorites so the toggle knows which direction it goes
            if !catalog.fetch_favorites().await {
                return Err("loading favorites failed".into());
            }
            if !catalog.toggle_favorite(TemplateId::new(id)).await {
                return Err("favorite toggle failed".into());
            }
        }
    }

    Ok(())
}

async fn handlers(
    ops: &OpsClient,
    notifier: Arc<dyn Notifier>,
    executor: Option<String>,
    agent: Option<String>,
) -> CliResult {
    let handlers = match (executor, agent) {
        (Some(service), _) => {
            let picker = ExecutorPicker::new(ops.executors.clone(), notifier, move || {
                Some(service.clone())
            });
            check(picker.fetch().await)?;
            picker.available_handlers().await
        }
        (None, Some(topic)) => {
            let picker = AgentPicker::new(ops.agents.clone(), notifier, move || Some(topic.clone()));
            check(picker.fetch().await)?;
            picker.available_handlers().await
        }
        (None, None) => {
            let executors = ops.executors.list().await?;
            println!("Executors ({}):", executors.len());
            println!("{:<24}  {:<8}  {}", "NAME", "NODES", "HANDLERS");
            println!("{}", "-".repeat(80));
            for executor in executors {
                let names: Vec<&str> = executor.handlers.iter().map(|h| h.name.as_str()).collect();
                println!(
                    "{:<24}  {:<8}  {}",
                    executor.name,
                    executor.nodes.len(),
                    names.join(", ")
                );
            }
            return Ok(());
        }
    };

    print_handlers(&handlers);
    Ok(())
}

fn print_handlers(handlers: &[HandlerDetail]) {
    println!("Handlers ({}):", handlers.len());
    for handler in handlers {
        if handler.desc.is_empty() {
            println!("  - {}", handler.name);
        } else {
            println!("  - {} ({})", handler.name, handler.desc);
        }
    }
}

async fn workers(ops: &OpsClient, notifier: Arc<dyn Notifier>) -> CliResult {
    let picker = WorkerPicker::new(ops.workers.clone(), notifier);
    check(picker.fetch().await)?;

    let labels = picker.labels().await;
    println!("Workers ({}):", labels.len());
    for label in labels {
        println!("  {label}");
    }

    Ok(())
}

async fn codebook_secret(ops: &OpsClient, notifier: Arc<dyn Notifier>, uid: String) -> CliResult {
    let picker = CodebookPicker::new(ops.codebooks.clone(), notifier);
    check(picker.fetch().await)?;

    let secret = picker.secret_for(&CodebookUid::new(uid.as_str())).await;
    if secret.is_empty() {
        return Err(format!("no codebook with identifier {uid}").into());
    }
    println!("{secret}");

    Ok(())
}

async fn users(ops: &OpsClient, cmd: UserCommand) -> CliResult {
    match cmd {
        UserCommand::Me => {
            let user = ops.users.info().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserCommand::Search { keyword } => {
            let req = UserKeywordReq {
                page: PageReq::new(0, 50),
                keyword,
            };
            let users = ops.users.list_by_keyword(&req).await?;
            println!("Users ({} of {}):", users.users.len(), users.total);
            println!("{:<8}  {:<20}  {:<20}  {}", "ID", "USERNAME", "NAME", "EMAIL");
            println!("{}", "-".repeat(80));
            for user in users.users {
                println!(
                    "{:<8}  {:<20}  {:<20}  {}",
                    user.id, user.username, user.display_name, user.email
                );
            }
        }
    }

    Ok(())
}
