// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod render;

use std::process::ExitCode;

use biblio_domain::{FilterKey, FilterSet, LibraryStats, LoanFormField, PageNumber, User};
use biblio_gateway::{DEFAULT_BASE_URL, GatewayClient, GatewayConfig, GatewayError, LibraryApi};
use biblio_view::{MutationOutcome, RefreshOutcome, RefreshTrigger, ViewStateController};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

/// Biblio Console - terminal front-end for the library loan desk
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Origin of the library backend, without the `/api` prefix.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token issued by the backend.
    #[arg(long)]
    token: String,

    #[command(subcommand)]
    command: Command,
}

/// What to show or change.
#[derive(Subcommand, Debug)]
enum Command {
    /// Show books, the first page of loans and the dashboard counters.
    Dashboard {
        /// Book page to show.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Only books whose title contains this text.
        #[arg(long)]
        title: Option<String>,
        /// Only books by an author matching this text.
        #[arg(long)]
        author: Option<String>,
        /// Only books published in this year.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show one page of loans.
    Loans {
        /// Loan page to show.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Lend a book to a user.
    Lend {
        /// The borrowing user's identifier.
        #[arg(long)]
        user: String,
        /// The lent book's identifier.
        #[arg(long)]
        book: String,
    },
    /// Register the return of a loan as of today.
    Return {
        /// The loan identifier.
        loan_id: u64,
    },
    /// Show only the dashboard counters.
    Stats,
    /// Show the account behind the token.
    Whoami,
}

/// Builds the book filters from the dashboard flags.
fn dashboard_filters(title: Option<&str>, author: Option<&str>, year: Option<i32>) -> FilterSet {
    let mut filters: FilterSet = FilterSet::new();
    if let Some(title) = title {
        filters.set(FilterKey::Title, title);
    }
    if let Some(author) = author {
        filters.set(FilterKey::Author, author);
    }
    if let Some(year) = year {
        filters.set(FilterKey::Year, &year.to_string());
    }
    filters
}

/// Returns whether a refresh left the view showing current data.
const fn refresh_succeeded(outcome: &RefreshOutcome) -> bool {
    matches!(outcome, RefreshOutcome::Applied | RefreshOutcome::Superseded)
}

/// Returns whether a mutation went through and its refresh succeeded.
const fn mutation_succeeded(outcome: &MutationOutcome) -> bool {
    match outcome {
        MutationOutcome::Accepted(refresh) => refresh_succeeded(refresh),
        MutationOutcome::Rejected => false,
    }
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Runs one command against the backend behind `controller`.
async fn run<A: LibraryApi>(
    controller: &ViewStateController<A>,
    command: Command,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let code: ExitCode = match command {
        Command::Dashboard {
            page,
            title,
            author,
            year,
        } => {
            let page: PageNumber = PageNumber::new(page)?;
            let filters: FilterSet = dashboard_filters(title.as_deref(), author.as_deref(), year);
            let mut outcome: RefreshOutcome = if filters.is_empty() {
                controller.refresh(RefreshTrigger::BooksPage(page)).await
            } else {
                controller.replace_filters(filters).await
            };
            if outcome == RefreshOutcome::Applied && controller.state().books_page != page {
                outcome = controller.refresh(RefreshTrigger::BooksPage(page)).await;
            }
            println!("{}", render::dashboard(&controller.state()));
            exit_code(refresh_succeeded(&outcome))
        }
        Command::Loans { page } => {
            let page: PageNumber = PageNumber::new(page)?;
            let mut outcome: RefreshOutcome = controller.refresh(RefreshTrigger::Mount).await;
            if outcome == RefreshOutcome::Applied && page != PageNumber::FIRST {
                outcome = controller.load_loans_page(page).await;
            }
            let state = controller.state();
            println!("{}", render::loans_section(&state));
            exit_code(refresh_succeeded(&outcome))
        }
        Command::Lend { user, book } => {
            controller.set_loan_form_field(LoanFormField::UserId, &user);
            controller.set_loan_form_field(LoanFormField::BookId, &book);
            let outcome: MutationOutcome = controller.submit_loan().await;
            println!("{}", render::mutation(&controller.state(), &outcome));
            exit_code(mutation_succeeded(&outcome))
        }
        Command::Return { loan_id } => {
            let outcome: MutationOutcome = controller.return_loan(loan_id).await;
            println!("{}", render::mutation(&controller.state(), &outcome));
            exit_code(mutation_succeeded(&outcome))
        }
        Command::Stats => {
            let result: Result<LibraryStats, GatewayError> = controller.api().get_stats().await;
            report(result, |stats| render::stats(&stats))
        }
        Command::Whoami => {
            let result: Result<User, GatewayError> = controller.api().current_user().await;
            report(result, |user| render::user(&user))
        }
    };
    Ok(code)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Logs go to stderr so the rendered view stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: GatewayConfig = GatewayConfig::new(&args.base_url, &args.token);
    info!(?config, "Starting Biblio console");
    let client: GatewayClient = GatewayClient::new(config);

    let controller: ViewStateController<GatewayClient> = ViewStateController::new(client);
    run(&controller, args.command).await
}

/// Prints a direct gateway result and picks the exit code.
fn report<T>(result: Result<T, GatewayError>, show: impl FnOnce(T) -> String) -> ExitCode {
    match result {
        Ok(value) => {
            println!("{}", show(value));
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!(error = %err, "Request failed");
            eprintln!("{}", render::error_line(&err.message()));
            ExitCode::FAILURE
        }
    }
}
