use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "paywizard")]
#[command(author, version, about = "Telegram bot that guides users through community payment onboarding", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling unless --webhook or ENVIRONMENT=production)
    Run {
        /// Use webhook mode instead of long polling
        #[arg(long)]
        webhook: bool,

        /// Public webhook URL, overrides WEBHOOK_URL
        #[arg(long)]
        url: Option<String>,

        /// Port of the webhook HTTP server, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// How updates reach the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Polling,
    Webhook { url: String, port: u16 },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Picks the run mode from the arguments, falling back to the environment.
    ///
    /// Webhook mode needs a URL; without one the bot polls.
    pub fn run_mode(&self, production: bool, env_url: Option<String>, env_port: u16) -> RunMode {
        let (webhook, url, port) = match &self.command {
            Some(Commands::Run { webhook, url, port }) => (*webhook, url.clone(), *port),
            None => (false, None, None),
        };

        if !(webhook || production) {
            return RunMode::Polling;
        }
        match url.or(env_url) {
            Some(url) => RunMode::Webhook {
                url,
                port: port.unwrap_or(env_port),
            },
            None => {
                log::warn!("Webhook mode requested but WEBHOOK_URL is not set, falling back to long polling");
                RunMode::Polling
            }
        }
    }
}
