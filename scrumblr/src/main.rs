use clap::{Parser, Subcommand};
use scrumblr::config::Config;
use scrumblr::connectors::http::ReqwestTransport;
use scrumblr::controller::{BoardController, BoardError, DragEvent};
use scrumblr::sync::{HttpSyncClient, SyncClient};
use scrumblr::view::{BoardView, ConsoleView};
use scrumblr_core::{Column, NewTask, TaskEdit};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Terminal front-end for the Scrumblr board
#[derive(Parser, Debug)]
struct Cli {
    /// TOML file to read settings from instead of scrumblr/config.toml
    #[arg(long, short)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Show the board
    Show,
    /// Add a task to a column
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        assignee: String,
        /// Due date as MM-DD-YYYY
        #[arg(long, default_value = "")]
        due: String,
        #[arg(long, default_value = "start")]
        column: Column,
    },
    /// Move a task to another column
    Move { id: String, column: Column },
    /// Change a task's title, assignee or due date
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete a task
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let transport = ReqwestTransport::new(config.api.timeout())?;
    let client = HttpSyncClient::new(transport, config.api.endpoint());
    info!(endpoint = client.endpoint(), "Connecting to task store");
    let view = ConsoleView::stdout();
    let mut board = BoardController::new(&client, &view, Default::default());

    if board.load().await.is_err() {
        return Ok(ExitCode::FAILURE);
    }
    let outcome = run(&mut board, &view, cli.command).await;
    view.print_board(board.repository());

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

async fn run<S: SyncClient, V: BoardView>(
    board: &mut BoardController<'_, S, V>,
    view: &V,
    command: Commands,
) -> Result<(), BoardError> {
    match command {
        Commands::Show => Ok(()),
        Commands::Add {
            title,
            assignee,
            due,
            column,
        } => {
            let draft = NewTask::new(title, assignee, due, column.status());
            board.create_task(draft).await.map(|_| ())
        }
        Commands::Move { id, column } => {
            let from = board
                .repository()
                .find(&id)
                .map(|task| Column::for_status(task.status))
                .unwrap_or(column);
            // A drag-and-drop UI moves the card before reporting the drop.
            view.move_card(&id, column);
            board.move_task(DragEvent::new(id, from, column)).await
        }
        Commands::Edit {
            id,
            title,
            assignee,
            due,
        } => {
            let edit = TaskEdit {
                title,
                assignee,
                due_date: due,
            };
            board.edit_task(&id, edit).await.map(|_| ())
        }
        Commands::Delete { id } => board.delete_task(&id).await,
    }
}
