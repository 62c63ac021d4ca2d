use clap::{Args, Parser, Subcommand};
use swapi_explorer::app::client::{render_error, render_table, ApiClient, LoadingSpinner};
use swapi_explorer::utils::logger::{self, LogHandle, LogSettings};
use swapi_explorer::utils::validation::Validate;
use swapi_explorer::{ClientConfig, EntityKind, PageQuery, Result, SortOrder};

#[derive(Parser)]
#[command(name = "swapi-cli")]
#[command(about = "Browse Star Wars people and planets from the terminal")]
struct Cli {
    #[command(flatten)]
    client: ClientConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Star Wars characters
    People {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Star Wars planets
    Planets {
        #[command(subcommand)]
        action: ListAction,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// List one page of results as a table
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u64,

    #[arg(long, default_value_t = 10)]
    page_size: u32,

    /// Case-insensitive name filter
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    sort_by: Option<String>,

    #[arg(long, default_value = "asc")]
    order: SortOrder,
}

impl From<ListArgs> for PageQuery {
    fn from(args: ListArgs) -> Self {
        PageQuery {
            page: args.page,
            page_size: args.page_size,
            search: args.search,
            sort_by: args.sort_by,
            order: args.order,
        }
    }
}

async fn run(config: ClientConfig, kind: EntityKind, query: PageQuery, log: LogHandle) -> Result<String> {
    let client = ApiClient::new(config, log)?;

    let envelope = {
        let _spinner = LoadingSpinner::start(&format!("Fetching {} from the API...", kind.resource()));
        client.list(kind, &query).await?
    };

    let table = render_table(kind.title(), &envelope.results, kind.columns());
    Ok(format!(
        "{}\nPage {} · {} of {} results",
        table, envelope.page, envelope.results_count, envelope.count
    ))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = LogSettings {
        level: if cli.client.verbose { "debug" } else { "warn" }.to_string(),
        ..LogSettings::default()
    };
    let guard = match logger::init(&settings) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", render_error(&e.to_string()));
            std::process::exit(e.exit_code());
        }
    };
    let log = guard.handle("cli");

    if let Err(e) = cli.client.validate() {
        eprintln!("{}", render_error(&e.user_friendly_message()));
        drop(guard);
        std::process::exit(e.exit_code());
    }

    let (kind, action) = match cli.command {
        Command::People { action } => (EntityKind::Person, action),
        Command::Planets { action } => (EntityKind::Planet, action),
    };
    let ListAction::List(args) = action;

    match run(cli.client, kind, args.into(), log).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("{} request failed: {}", kind.resource(), e);
            eprintln!("{}", render_error(&e.user_friendly_message()));
            drop(guard);
            std::process::exit(e.exit_code());
        }
    }
}
