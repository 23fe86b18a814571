use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "jumplist", bin_name = "jumplist", version)]
#[command(
    about = "Jump-to-letter filters for a page tree",
    long_about = "Plays the host for the jumplist filter engine: loads a JSON page tree, \
                  applies the configured rules and shows what a page listing would render."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Page tree to load
    #[arg(
        long,
        global = true,
        env = "JUMPLIST_PAGES",
        default_value = "pages.json",
        help_heading = "Options"
    )]
    pub pages: PathBuf,

    /// Config file (defaults to jumplist.toml in the user config directory)
    #[arg(long, global = true, env = "JUMPLIST_CONFIG", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Language of the requesting user
    #[arg(long, global = true, help_heading = "Options")]
    pub language: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the filter buckets of a parent page
    Filters {
        /// Parent page id
        id: u64,
    },

    /// Show the filter actions appended under a parent page
    Actions {
        /// Parent page id
        id: u64,
    },

    /// List a parent's children the way the host would, optionally narrowed
    List {
        /// Parent page id
        id: u64,

        /// Bucket token sent by the client (e.g. A)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show the configured rules
    Rules,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_with_filter() {
        let cli = Cli::try_parse_from(["jumplist", "list", "10", "--filter", "A"]).unwrap();
        match cli.command {
            Commands::List { id, filter } => {
                assert_eq!(id, 10);
                assert_eq!(filter.as_deref(), Some("A"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["jumplist", "filters", "10", "--output", "json", "-v"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["jumplist", "filters", "ten"]).is_err());
    }

    #[test]
    fn test_command_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
