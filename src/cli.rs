use clap::{Parser, Subcommand};

use crate::models::Topic;

#[derive(Parser, Debug)]
#[command(name = "articles", version, about = "Terminal client for the articles REST API")]
pub struct Cli {
    /// Server base URL, e.g. http://localhost:9000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "ARTICLES_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Fetch and print all articles
    List,
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        topic: Topic,
    },
    /// Replace the fields of an article
    Update {
        article_id: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        topic: Topic,
    },
    /// Delete an article
    Delete { article_id: u64 },
    /// Show the effective configuration
    Config {
        /// Persist a new base URL to the user config file
        #[arg(long)]
        set_base_url: Option<String>,
    },
}
