use clap::Parser;
use std::io;
use sw_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use sw_client::ClientConfig;
use sw_render::{DescriptionPolicy, HtmlTarget, RenderConfig};
use sw_widget::{mount, Controller, WidgetConfig};
use tracing::info;

mod duration;
mod host;
mod logging;

use duration::HumanDuration;
use host::TerminalHost;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal host for the article search widget", long_about = None)]
pub struct Cli {
    /// Origin serving /api/related and /api/answer
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Request timeout (e.g. 30s, 1m, 500ms)
    #[arg(long)]
    timeout: Option<HumanDuration>,
    /// Render article descriptions as markup instead of escaping them
    #[arg(long)]
    trust_descriptions: bool,
    /// Leave the summary toggle out of the widget
    #[arg(long)]
    no_summary_toggle: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Ask a single question and print the results
    Ask {
        query: String,
        /// Also request a computer-generated summary
        #[arg(long)]
        summary: bool,
    },
    /// Interactive session driving the widget's controls
    Repl,
    /// Print the widget's HTML for embedding in a page
    Markup,
}

impl Cli {
    fn widget_config(&self) -> WidgetConfig {
        let timeout = self.timeout.map(|t| t.0).unwrap_or(DEFAULT_TIMEOUT);
        let description_policy = if self.trust_descriptions {
            DescriptionPolicy::Trusted
        } else {
            DescriptionPolicy::Escape
        };

        WidgetConfig {
            client: ClientConfig::new(self.base_url.clone()).with_timeout(timeout),
            render: RenderConfig { description_policy },
            offer_summary: !self.no_summary_toggle,
            ..WidgetConfig::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = cli.widget_config();
    info!("🔎 Using backend at {}", config.client.base_url);

    match cli.command {
        Commands::Ask { query, summary } => {
            if summary && !config.offer_summary {
                anyhow::bail!("--summary needs the summary toggle, drop --no-summary-toggle");
            }
            let mut controller = Controller::connect(&config)?;
            let mut host = TerminalHost::new(io::stdout());
            host::ask(&mut controller, &mut host, &query, summary).await?;
            controller.teardown();
        }
        Commands::Repl => {
            let mut controller = Controller::connect(&config)?;
            let mut host = TerminalHost::new(io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            host::repl(&mut controller, &mut host, stdin).await?;
        }
        Commands::Markup => {
            let view = mount(&config);
            println!("{}", view.to_html(&HtmlTarget));
        }
    }

    Ok(())
}
