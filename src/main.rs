use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use featurevote_sdk::config::DEFAULT_BASE_URL;
use featurevote_sdk::storage::DEFAULT_SERVICE_NAME;
use featurevote_sdk::{
    FeedbackSdk, KeychainStore, PreferenceStore, Result, SdkOptions, SuggestionListState,
    SuggestionStatus, VoteType,
};

#[derive(Parser, Debug)]
#[command(name = "featurevote", version, about = "Browse, post and vote on feature suggestions")]
struct Args {
    /// Keychain service that holds the device ID
    #[arg(long, default_value = DEFAULT_SERVICE_NAME)]
    service: String,

    /// Reject comment posting locally
    #[arg(long)]
    no_comments: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List suggestions, most voted first
    List {
        #[arg(long)]
        status: Option<SuggestionStatus>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// List comments on a suggestion, oldest first
    Comments {
        suggestion_id: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Post a new suggestion
    Suggest {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        premium: bool,
    },
    /// Comment on a suggestion
    Comment {
        suggestion_id: String,
        text: String,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Toggle this device's vote on a suggestion
    Vote { suggestion_id: String },
    /// Report the running app version (at most once every three days)
    ReportVersion { version: String, build_number: String },
    /// Print this device's ID
    DeviceId {
        /// Discard the stored ID and generate a new one
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e.server_message().unwrap_or_else(|| e.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let preferences: Arc<dyn PreferenceStore> = Arc::new(KeychainStore::new(&args.service));
    let sdk = FeedbackSdk::new(preferences);

    if let Command::DeviceId { reset } = args.command {
        let device = &sdk.context().device;
        let id = if reset {
            device.generate_new_device_id()
        } else {
            device.device_id()
        };
        println!("{}", id);
        return Ok(());
    }

    // Credentials: FEATUREVOTE_* environment, optionally from .env
    let env = |name: &str| std::env::var(name).unwrap_or_default();
    let base_url = std::env::var("FEATUREVOTE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    sdk.configure_with_options(
        &env("FEATUREVOTE_API_KEY"),
        &env("FEATUREVOTE_API_SECRET"),
        &env("FEATUREVOTE_APP_ID"),
        SdkOptions {
            base_url,
            comments_enabled: !args.no_comments,
        },
    )?;

    match args.command {
        Command::List {
            status,
            limit,
            pages,
        } => {
            let mut list = SuggestionListState::new(limit);
            list.set_filter(status);
            list.refresh(sdk.suggestions()).await?;
            for _ in 1..pages {
                if !list.load_more(sdk.suggestions()).await? {
                    break;
                }
            }
            for suggestion in list.items() {
                let marker = if list.votes().has_voted(&suggestion.id) { "*" } else { " " };
                println!(
                    "{} {:>5}  {:<12} {}  ({} comments)  [{}]",
                    marker,
                    suggestion.display_vote_count(),
                    suggestion.status.as_str(),
                    suggestion.display_text(),
                    suggestion.display_comment_count(),
                    suggestion.id
                );
            }
            if list.has_more() {
                println!("... more available");
            }
        }
        Command::Comments {
            suggestion_id,
            limit,
        } => {
            let page = sdk
                .comments()
                .fetch_comments(&suggestion_id, None, Some(limit))
                .await?;
            for comment in &page.comments {
                println!("{}  {}: {}", comment.created_at, comment.display_name(), comment.text);
            }
        }
        Command::Suggest {
            title,
            description,
            nickname,
            premium,
        } => {
            let suggestion = sdk
                .suggestions()
                .create_suggestion(&title, description.as_deref(), nickname.as_deref(), premium)
                .await?;
            println!("{}", suggestion.id);
        }
        Command::Comment {
            suggestion_id,
            text,
            nickname,
        } => {
            let comment = sdk
                .comments()
                .create_comment(&suggestion_id, &text, nickname.as_deref())
                .await?;
            println!("{}", comment.id);
        }
        Command::Vote { suggestion_id } => {
            let status = sdk.suggestions().vote_status(&suggestion_id).await?;
            let current = status.has_voted.then_some(VoteType::Upvote);
            let outcome = sdk
                .suggestions()
                .toggle_vote(&suggestion_id, VoteType::Upvote, current)
                .await?;
            let count = outcome
                .response
                .suggestion
                .as_ref()
                .map(|s| s.vote_count)
                .or(outcome.response.vote_count);
            match (outcome.applied, count) {
                (Some(_), Some(n)) => println!("voted ({} votes)", n),
                (Some(_), None) => println!("voted"),
                (None, Some(n)) => println!("vote withdrawn ({} votes)", n),
                (None, None) => println!("vote withdrawn"),
            }
        }
        Command::ReportVersion {
            version,
            build_number,
        } => {
            sdk.version().report_version(&version, &build_number).await?;
            println!("reported {} ({})", version, build_number);
        }
        Command::DeviceId { .. } => {}
    }
    Ok(())
}
