use anyhow::Result;
use clap::{Parser, Subcommand};
use storesearch::{commands, types::Category, version};

#[derive(Parser)]
#[command(name = "storesearch")]
#[command(about = "Search the store catalog from the terminal")]
#[command(version, long_version = version::LONG_VERSION)]
struct Cli {
   #[command(subcommand)]
   command: Option<Commands>,

   #[arg(short = 'c', long, value_enum, env = "STORESEARCH_CATEGORY", global = true)]
   category: Option<Category>,

   #[arg(trailing_var_arg = true)]
   query: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
   Search {
      #[arg(help = "Search text")]
      query: String,

      #[arg(long, help = "JSON output")]
      json: bool,

      #[arg(long, help = "Disable ANSI colors and use tab-separated rows")]
      plain: bool,

      #[arg(short = 'u', long, help = "Show store page URLs")]
      urls: bool,
   },

   /// Print the config file location and effective settings
   Config,

   /// Check configuration and catalog reachability
   Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
   tracing_subscriber::fmt()
      .with_env_filter(
         tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::WARN.into()),
      )
      .with_writer(std::io::stderr)
      .init();

   let cli = Cli::parse();

   if cli.command.is_none() && !cli.query.is_empty() {
      let query = cli.query.join(" ");
      return commands::search::execute(query, cli.category, false, false, false).await;
   }

   match cli.command {
      Some(Commands::Search { query, json, plain, urls }) => {
         commands::search::execute(query, cli.category, json, plain, urls).await
      },
      Some(Commands::Config) => commands::config::execute(),
      Some(Commands::Doctor) => commands::doctor::execute().await,
      None => {
         eprintln!("No command or query provided. Use --help for usage information.");
         std::process::exit(1);
      },
   }
}
