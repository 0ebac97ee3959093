// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};

use staffing_console::assignment::{AssignForm, AssignmentController, ExtendForm, ReleaseForm};
use staffing_console::dashboard_data::load_dashboard;
use staffing_console::directory::{self, DevManForm, PlanForm, ProjectForm, ProposalForm, ResourceDetail, ResourceForm};
use staffing_console::export;
use staffing_console::filters::{ProjectFilter, ProjectLoad, ProjectTab, ResourceFilter};
use staffing_console::models::{Id, ProjectRole, ResourceStatus, StaffingRequest};
use staffing_console::scheduler::pending_request_badge;
use staffing_console::{AppState, Backend, Config, ConsoleError, Notice, NoticeKind};

#[derive(Parser)]
#[command(name = "staffing", version, about = "Resource and project staffing console")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    /// Headline counters, assignments ending soon and active projects
    Dashboard {
        #[arg(long)]
        days: Option<u32>,
    },
    #[command(subcommand)]
    Resources(ResourceCommand),
    /// Assign a resource to a project (DevMan accounts file a request instead)
    Assign {
        #[arg(long)]
        resource: Id,
        #[arg(long)]
        project: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Move the end date of an assignment
    Extend {
        #[arg(long)]
        project: Id,
        #[arg(long)]
        assignment: Id,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// End an assignment today
    Release {
        #[arg(long)]
        project: Id,
        #[arg(long)]
        assignment: Id,
        #[arg(long, default_value = "")]
        reason: String,
    },
    #[command(subcommand)]
    Projects(ProjectCommand),
    /// DevMan accounts
    #[command(subcommand)]
    Pms(DevManCommand),
    #[command(subcommand)]
    Requests(RequestCommand),
    /// Activity log
    History,
    #[command(subcommand)]
    Export(ExportCommand),
    /// Print the pending request count until interrupted
    Watch,
}

#[derive(Subcommand)]
enum ResourceCommand {
    List(ResourceListArgs),
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        employee_id: Option<String>,
    },
    Delete { id: Id },
    /// Current assignments of one resource
    Show { id: Id },
}

#[derive(Args)]
struct ResourceListArgs {
    /// Status and role as of this date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long, value_enum, ignore_case = true, default_value = "all")]
    status: StatusArg,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    role: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Available,
    Assigned,
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    All,
    Ongoing,
    Hold,
    Closed,
}

#[derive(Subcommand)]
enum ProjectCommand {
    List {
        #[arg(long, value_enum, ignore_case = true, default_value = "all")]
        tab: TabArg,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Resources staffed on a project
    Roster { id: Id },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        client: String,
        #[arg(long)]
        pm: String,
    },
}

#[derive(Subcommand)]
enum DevManCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Delete { id: Id },
}

#[derive(Subcommand)]
enum RequestCommand {
    /// Requests awaiting review
    List,
    History,
    /// Pending requests of one project
    Project { id: Id },
    Approve { id: Id },
    Reject {
        id: Id,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Propose a new project with a resource plan
    Propose {
        #[arg(long)]
        name: String,
        #[arg(long)]
        client: String,
        #[arg(long, default_value = "")]
        description: String,
        /// RESOURCE_ID:ROLE:START:END, repeatable
        #[arg(long = "plan")]
        plan: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ExportCommand {
    Resources {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Projects {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut state = AppState::load(config).context("failed to load console state")?;

    let outcome = run(&mut state, cli.command).await;
    if let Err(e) = &outcome {
        if matches!(e.downcast_ref::<ConsoleError>(), Some(ConsoleError::Unauthorized)) {
            warn!("Backend rejected the stored session; signing out");
            state.logout()?;
        }
    }
    outcome
}

/// Prints a notice and turns anything but success or info into an error exit.
fn finish(notice: Notice) -> anyhow::Result<()> {
    println!("{}", notice);
    match notice.kind {
        NoticeKind::Success | NoticeKind::Info => Ok(()),
        NoticeKind::SessionExpired => Err(ConsoleError::Unauthorized.into()),
        NoticeKind::Error => bail!("{}", notice.message),
    }
}

async fn run(state: &mut AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = state.login(&email, &password).await?;
            println!(
                "Logged in as {} <{}> ({})",
                session.user.name,
                session.user.email,
                session.user.user_type.label()
            );
        }
        Command::Logout => {
            state.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let session = state.session()?;
            println!(
                "{} <{}> ({})",
                session.user.name,
                session.user.email,
                session.user.user_type.label()
            );
        }
        Command::Dashboard { days } => {
            state.session()?;
            let days = days.unwrap_or(state.config.ending_soon_days);
            let data = load_dashboard(&state.api, days).await;
            let stats = &data.stats;
            println!(
                "Resources: {} ({} available)   Active projects: {}   Pending requests: {}",
                stats.total_resources,
                stats.available_resources,
                stats.active_projects,
                stats.pending_requests
            );
            println!("\nEnding within {} days:", days);
            for row in &data.ending_soon {
                println!(
                    "  {:<24} {:<20} {:<24} {} ({} days)",
                    row.resource_name, row.project_role, row.project_name, row.end_date, row.days_left
                );
            }
            println!("\nActive projects:");
            for p in &data.active_projects {
                println!(
                    "  #{:<5} {:<28} {:<24} {} members",
                    p.project_id, p.project_name, p.client_name, p.member_count
                );
            }
        }
        Command::Resources(cmd) => resources(state, cmd).await?,
        Command::Assign {
            resource,
            project,
            role,
            start,
            end,
        } => {
            let session = state.session()?.clone();
            let mut controller = AssignmentController::for_session(state.api.clone(), &session);
            let form = AssignForm {
                resource_id: resource,
                project_id: project,
                role,
                start_date: start,
                end_date: end,
            };
            let notice = controller.assign(&form).await;
            if notice.is_success() {
                if let Some(r) = controller.resources().iter().find(|r| r.resource_id == resource) {
                    print_resource_assignments(r);
                }
            }
            finish(notice)?;
        }
        Command::Extend {
            project,
            assignment,
            end,
            reason,
        } => {
            let session = state.session()?.clone();
            let mut controller = AssignmentController::for_session(state.api.clone(), &session);
            let form = ExtendForm {
                assignment_id: assignment,
                new_end_date: end,
                reason,
            };
            let notice = controller.extend(project, &form).await;
            if let Some(roster) = controller.roster() {
                print_roster(&roster.members);
            }
            finish(notice)?;
        }
        Command::Release {
            project,
            assignment,
            reason,
        } => {
            let session = state.session()?.clone();
            let mut controller = AssignmentController::for_session(state.api.clone(), &session);
            let mut form = ReleaseForm::open(assignment);
            form.reason = reason;
            info!("Releasing assignment {} as of {}", form.assignment_id(), form.release_date());
            let notice = controller.release(project, &form).await;
            if let Some(roster) = controller.roster() {
                print_roster(&roster.members);
            }
            finish(notice)?;
        }
        Command::Projects(cmd) => projects(state, cmd).await?,
        Command::Pms(cmd) => dev_mans(state, cmd).await?,
        Command::Requests(cmd) => requests(state, cmd).await?,
        Command::History => {
            state.admin()?;
            for log in state.api.history_logs().await? {
                println!(
                    "{}  {:<10} {:<10} {}  by {}",
                    log.timestamp.format("%d/%m/%Y %H:%M"),
                    log.entity_type,
                    log.activity_type,
                    log.description,
                    log.performed_by.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Export(cmd) => {
            state.admin()?;
            let notice = match cmd {
                ExportCommand::Resources { out } => {
                    let resources = state.api.resources().await?;
                    let path = out.unwrap_or_else(|| {
                        PathBuf::from(export::resource_export_name(Utc::now().date_naive()))
                    });
                    export::export_resources(&path, &resources)
                }
                ExportCommand::Projects { out } => {
                    let projects = state.api.projects().await?;
                    let path = out.unwrap_or_else(|| PathBuf::from(export::PROJECTS_EXPORT_NAME));
                    export::export_projects(&path, &projects)
                }
            };
            finish(notice)?;
        }
        Command::Watch => {
            state.admin()?;
            let badge = pending_request_badge(Arc::new(state.api.clone()), state.config.poll_interval);
            let mut updates = badge.subscribe();
            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        println!("Pending requests: {}", *updates.borrow_and_update());
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            badge.cancel();
        }
    }
    Ok(())
}

async fn resources(state: &AppState, cmd: ResourceCommand) -> anyhow::Result<()> {
    match cmd {
        ResourceCommand::List(args) => {
            state.session()?;
            let role = args.role.as_deref().map(role_filter).transpose()?;
            let filter = ResourceFilter {
                date: args.date,
                status: match args.status {
                    StatusArg::All => None,
                    StatusArg::Available => Some(ResourceStatus::Available),
                    StatusArg::Assigned => Some(ResourceStatus::Assigned),
                },
                search: args.search,
                role,
            };
            let all = state.api.resources().await?;
            for view in filter.apply(&all) {
                let count = view.resource.project_count();
                println!(
                    "#{:<5} {:<28} {:<10} {:<20} {} [{:?}]",
                    view.resource.resource_id,
                    view.resource.resource_name,
                    view.status.as_str(),
                    view.role_on_date.map(|r| r.label()).unwrap_or("-"),
                    ProjectLoad::badge(count),
                    ProjectLoad::from_count(count)
                );
            }
        }
        ResourceCommand::Add {
            name,
            email,
            employee_id,
        } => {
            state.admin()?;
            let form = ResourceForm {
                full_name: name,
                email,
                employee_id,
            };
            finish(directory::create_resource(&state.api, &form).await)?;
            let all = state.api.resources().await?;
            println!("{} resources on record", all.len());
        }
        ResourceCommand::Delete { id } => {
            state.admin()?;
            finish(directory::delete_resource(&state.api, id).await)?;
        }
        ResourceCommand::Show { id } => {
            state.session()?;
            let all = state.api.resources().await?;
            let Some(resource) = all.iter().find(|r| r.resource_id == id) else {
                bail!("no resource with id {}", id);
            };
            match directory::resource_detail(&state.api, resource).await? {
                ResourceDetail::Available(notice) => finish(notice)?,
                ResourceDetail::Assignments(assignments) => {
                    println!("{}", resource.resource_name);
                    for a in assignments {
                        println!(
                            "  {:<28} {:<20} {} - {}  {}",
                            a.project_name,
                            a.project_role,
                            a.start_date.format("%d/%m/%Y"),
                            a.end_date.format("%d/%m/%Y"),
                            a.assignment_status.as_str()
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

async fn projects(state: &AppState, cmd: ProjectCommand) -> anyhow::Result<()> {
    match cmd {
        ProjectCommand::List { tab, search } => {
            state.session()?;
            let filter = ProjectFilter {
                tab: match tab {
                    TabArg::All => ProjectTab::All,
                    TabArg::Ongoing => ProjectTab::Ongoing,
                    TabArg::Hold => ProjectTab::Hold,
                    TabArg::Closed => ProjectTab::Closed,
                },
                search,
            };
            let all = state.api.projects().await?;
            for p in filter.apply(&all) {
                println!(
                    "#{:<5} {:<28} {:<24} {:<20} {:<9} {} members",
                    p.project_id,
                    p.project_name,
                    p.client_name,
                    p.dev_man_name.as_deref().unwrap_or("-"),
                    p.status.as_str(),
                    p.member_count
                );
            }
        }
        ProjectCommand::Roster { id } => {
            state.session()?;
            print_roster(&state.api.project_members(id).await?);
        }
        ProjectCommand::Add { name, client, pm } => {
            state.admin()?;
            let form = ProjectForm {
                project_name: name,
                client_name: client,
                pm_id: pm,
            };
            finish(directory::create_project(&state.api, &form).await)?;
        }
    }
    Ok(())
}

async fn dev_mans(state: &AppState, cmd: DevManCommand) -> anyhow::Result<()> {
    state.admin()?;
    match cmd {
        DevManCommand::List => {
            for pm in state.api.dev_mans().await? {
                println!(
                    "#{:<5} {:<24} {:<32} {} projects",
                    pm.user_id, pm.name, pm.email, pm.project_count
                );
            }
        }
        DevManCommand::Add {
            name,
            email,
            password,
        } => {
            let form = DevManForm {
                name,
                email,
                password,
            };
            finish(directory::create_dev_man(&state.api, &form).await)?;
        }
        DevManCommand::Delete { id } => finish(directory::delete_dev_man(&state.api, id).await)?,
    }
    Ok(())
}

async fn requests(state: &AppState, cmd: RequestCommand) -> anyhow::Result<()> {
    match cmd {
        RequestCommand::List => {
            state.admin()?;
            let all = state.api.requests().await?;
            println!("{} pending", directory::pending_count(&all));
            all.iter().filter(|r| r.is_pending()).for_each(print_request);
        }
        RequestCommand::History => {
            state.session()?;
            state.api.request_history().await?.iter().for_each(print_request);
        }
        RequestCommand::Project { id } => {
            state.session()?;
            state
                .api
                .project_pending_requests(id)
                .await?
                .iter()
                .for_each(print_request);
        }
        RequestCommand::Approve { id } => {
            state.admin()?;
            finish(directory::approve_request(&state.api, id).await)?;
        }
        RequestCommand::Reject { id, reason } => {
            state.admin()?;
            finish(directory::reject_request(&state.api, id, &reason).await)?;
        }
        RequestCommand::Propose {
            name,
            client,
            description,
            plan,
        } => {
            state.session()?;
            let plan = plan.iter().map(String::as_str).map(parse_plan_slot).collect();
            let form = ProposalForm {
                project_name: name,
                client_name: client,
                description,
                plan,
            };
            finish(directory::propose_project(&state.api, &form).await)?;
        }
    }
    Ok(())
}

/// `RESOURCE_ID:ROLE:START:END`. Missing parts stay blank and fail validation.
/// A blank filter is an error. A role outside the standard set still filters.
fn role_filter(raw: &str) -> anyhow::Result<ProjectRole> {
    let Some(role) = ProjectRole::parse(raw) else {
        let known: Vec<String> = ProjectRole::KNOWN.iter().map(|r| r.label().to_string()).collect();
        bail!("empty role filter; known roles: {}", known.join(", "));
    };
    if !ProjectRole::KNOWN.contains(&role) {
        warn!("Role filter {:?} is not one of the standard roles", role.label());
    }
    Ok(role)
}

fn parse_plan_slot(raw: &str) -> PlanForm {
    let mut parts = raw.splitn(4, ':').map(str::to_string);
    PlanForm {
        resource_id: parts.next().unwrap_or_default(),
        role: parts.next().unwrap_or_default(),
        start_date: parts.next().unwrap_or_default(),
        end_date: parts.next().unwrap_or_default(),
    }
}

fn print_request(r: &StaffingRequest) {
    println!(
        "#{:<5} {:<10} {:<9} {:<20} {:<24} {}",
        r.id,
        r.kind,
        r.status.as_str(),
        r.requester.as_deref().unwrap_or("-"),
        r.project
            .as_deref()
            .or(r.project_name.as_deref())
            .unwrap_or("-"),
        r.resource.as_deref().unwrap_or("")
    );
}

fn print_resource_assignments(resource: &staffing_console::models::Resource) {
    println!("{} ({})", resource.resource_name, resource.status.as_str());
    for a in resource.active_assignments() {
        println!(
            "  {:<28} {:<20} {} - {}",
            a.project_name,
            a.project_role,
            a.start_date.format("%d/%m/%Y"),
            a.end_date.format("%d/%m/%Y")
        );
    }
}

fn print_roster(members: &[staffing_console::models::ProjectMember]) {
    for m in members {
        println!(
            "  #{:<5} {:<24} {:<20} {} - {}  {}",
            m.assignment_id,
            m.resource_name,
            m.project_role,
            m.start_date.format("%d/%m/%Y"),
            m.end_date.format("%d/%m/%Y"),
            m.status.as_str()
        );
    }
}
