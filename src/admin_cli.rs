// src/admin_cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_log;
use crate::auth::AdminSession;
use crate::core::{AdminApiClient, ApiConfig, ModerationApi};
use crate::moderation::{
    export::write_jobs_csv, BoardOptions, BulkReport, CompanyQueue, FilterState,
    ModerationAction, ModerationBoard, SortDirection, SortKey, Statistics, StatusFilter,
};
use crate::types::job::{CreatorType, Job, JobId};
use crate::utils::truncate_for_display;

#[derive(Parser)]
#[command(name = "jobmod")]
#[command(about = "Moderate job postings and company registrations")]
pub struct AdminCli {
    #[command(subcommand)]
    pub command: AdminCommand,

    /// Admin bearer token (defaults to JOBMOD_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Backend base URL (defaults to JOBMOD_API_URL or config.yaml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, global = true, default_value = "/tmp/jobmod.log")]
    pub log_file: PathBuf,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Job posting moderation
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Company registration moderation
    #[command(subcommand)]
    Companies(CompaniesCommand),
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// Show one page of jobs matching the filters
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show moderation statistics
    Stats,
    /// Approve one or more jobs
    Approve {
        #[arg(required = true)]
        ids: Vec<JobId>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Reject one or more jobs
    Reject {
        #[arg(required = true)]
        ids: Vec<JobId>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Write the filtered jobs to a CSV file
    Export {
        path: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Subcommand)]
pub enum CompaniesCommand {
    /// List companies waiting for approval
    List,
    /// Approve a company
    Approve { id: i64 },
    /// Reject a company
    Reject { id: i64 },
}

#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against title, company and description
    #[arg(long)]
    pub search: Option<String>,
    /// all, pending, approved or rejected
    #[arg(long)]
    pub status: Option<String>,
    /// company, admin or scraper
    #[arg(long)]
    pub creator: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// created_at, title, company, view_count, application_count, status or any field
    #[arg(long, default_value = "created_at")]
    pub sort: String,
    /// Sort ascending instead of newest/largest first
    #[arg(long)]
    pub asc: bool,
}

impl FilterArgs {
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let status = match &self.status {
            Some(raw) => raw.parse::<StatusFilter>()?,
            None => StatusFilter::All,
        };

        Ok(FilterState {
            search: self.search.clone().unwrap_or_default(),
            status,
            creator: self.creator.as_deref().map(CreatorType::from),
            category: self.category.clone(),
            sort_key: SortKey::parse(&self.sort),
            sort_direction: if self.asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        })
    }
}

pub async fn handle_admin_command(command: AdminCommand, config: ApiConfig) -> Result<()> {
    // Access check comes before any request to the backend
    let session = match AdminSession::from_token(config.token.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            app_log!(warn, "Access denied: {}", e);
            println!("❌ Access denied: {}", e);
            anyhow::bail!("access denied: {}", e);
        }
    };

    let client = Arc::new(AdminApiClient::new(
        &config.base_url,
        session.token(),
        config.timeout_seconds,
    )?);
    let options = BoardOptions {
        fetch_limit: config.fetch_limit,
        page_size: config.page_size,
    };

    match command {
        AdminCommand::Jobs(command) => handle_jobs_command(command, client, options).await,
        AdminCommand::Companies(command) => handle_companies_command(command, client).await,
    }
}

async fn handle_jobs_command<A: ModerationApi>(
    command: JobsCommand,
    api: Arc<A>,
    options: BoardOptions,
) -> Result<()> {
    let mut board = ModerationBoard::new(api, options)?;
    board.load().await.context("Failed to load jobs")?;

    match command {
        JobsCommand::List { filter, page } => {
            board.set_filter(filter.to_filter_state()?);
            board.go_to_page(page);
            print_page(&board);
            print_statistics(&board.statistics());
        }

        JobsCommand::Stats => print_statistics(&board.statistics()),

        JobsCommand::Approve { ids, notes } => {
            run_action(&mut board, ids, ModerationAction::Approve, notes.as_deref()).await?;
        }

        JobsCommand::Reject { ids, notes } => {
            run_action(&mut board, ids, ModerationAction::Reject, notes.as_deref()).await?;
        }

        JobsCommand::Export { path, filter } => {
            board.set_filter(filter.to_filter_state()?);
            let jobs = board.filtered_jobs();
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let written = write_jobs_csv(file, &jobs)?;
            app_log!(info, "Exported {} jobs to {}", written, path.display());
            println!("✅ Exported {} jobs to {}", written, path.display());
        }
    }

    Ok(())
}

async fn run_action<A: ModerationApi>(
    board: &mut ModerationBoard<A>,
    ids: Vec<JobId>,
    action: ModerationAction,
    notes: Option<&str>,
) -> Result<()> {
    if let [id] = ids.as_slice() {
        return match board.moderate(*id, action, notes).await {
            Ok(status) => {
                println!("✅ Job {} is now {}", id, status);
                print_statistics(&board.statistics());
                Ok(())
            }
            Err(e) => {
                println!("❌ Failed to {} job {}: {}", action, id, e);
                Err(e.into())
            }
        };
    }

    for id in &ids {
        if !board.selection().contains(*id) {
            board.toggle_selection(*id);
        }
    }

    let report = board.moderate_selected(action, notes).await;
    print_bulk_report(&report);
    print_statistics(&board.statistics());

    if report.is_complete_success() {
        Ok(())
    } else {
        anyhow::bail!("{} of {} jobs failed", report.failed.len(), report.attempted.len())
    }
}

async fn handle_companies_command<A: ModerationApi>(
    command: CompaniesCommand,
    api: Arc<A>,
) -> Result<()> {
    let queue = CompanyQueue::new(api);
    queue
        .load()
        .await
        .context("Failed to load pending companies")?;

    match command {
        CompaniesCommand::List => {
            let companies = queue.companies();
            if companies.is_empty() {
                println!("No companies waiting for approval.");
                return Ok(());
            }

            println!("{:<6} {:<30} {:<30} {:<20}", "ID", "Name", "Email", "Industry");
            println!("{}", "-".repeat(88));
            for company in companies.iter() {
                println!(
                    "{:<6} {:<30} {:<30} {:<20}",
                    company.id,
                    truncate_for_display(&company.name, 30),
                    truncate_for_display(company.email.as_deref().unwrap_or("-"), 30),
                    truncate_for_display(company.industry.as_deref().unwrap_or("-"), 20),
                );
            }
        }

        CompaniesCommand::Approve { id } => match queue.approve(id).await {
            Ok(()) => println!("✅ Company {} approved", id),
            Err(e) => {
                println!("❌ Failed to approve company {}: {}", id, e);
                return Err(e.into());
            }
        },

        CompaniesCommand::Reject { id } => match queue.reject(id).await {
            Ok(()) => println!("✅ Company {} rejected", id),
            Err(e) => {
                println!("❌ Failed to reject company {}: {}", id, e);
                return Err(e.into());
            }
        },
    }

    Ok(())
}

fn print_page<A: ModerationApi>(board: &ModerationBoard<A>) {
    let jobs = board.visible_jobs();
    let info = board.page_info();

    if jobs.is_empty() {
        println!("No jobs match the current filters.");
        return;
    }

    println!(
        "{:<6} {:<10} {:<40} {:<22} {:<8} {:<20}",
        "ID", "Status", "Title", "Company", "Source", "Created"
    );
    println!("{}", "-".repeat(111));
    for job in &jobs {
        print_job_row(job);
    }
    println!(
        "Showing {}-{} of {} (page {}/{})",
        info.first_item, info.last_item, info.total_items, info.page, info.total_pages
    );
}

fn print_job_row(job: &Job) {
    println!(
        "{:<6} {:<10} {:<40} {:<22} {:<8} {:<20}",
        job.id,
        job.badge(),
        truncate_for_display(&job.title, 40),
        truncate_for_display(&job.company, 22),
        job.created_by_type,
        truncate_for_display(&job.created_at, 20),
    );
}

fn print_statistics(stats: &Statistics) {
    println!(
        "Total: {}  Pending: {}  Approved: {}  Rejected: {}",
        stats.total, stats.pending, stats.approved, stats.rejected
    );
}

fn print_bulk_report(report: &BulkReport) {
    println!(
        "Bulk {}: {} succeeded, {} failed",
        report.action,
        report.succeeded.len(),
        report.failed.len()
    );
    for failure in &report.failed {
        println!("  ❌ Job {}: {}", failure.id, failure.error);
    }
}
