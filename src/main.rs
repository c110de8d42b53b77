use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use taller_core::app;
use taller_core::client::local::LocalClient;
use taller_core::client::remote::RemoteClient;
use taller_core::error::{Error, ErrorKind, Result};
use taller_core::interface::{SessionApi, WorkshopApi};
use taller_core::model::dtos::WorkshopDraft;
use taller_core::model::structs::{Role, User, Workshop};

/// Workshop registration terminal client.
#[derive(Parser)]
#[command(name = "taller", version, about)]
struct Cli {
    /// Base URL of the workshop API; omit to run against the local store
    #[arg(long)]
    api_url: Option<String>,

    /// Data directory for the local store (default: ~/.taller)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.api_url {
        Some(url) => run(&RemoteClient::new(url)?).await,
        None => {
            let data_dir = cli.data_dir.unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".taller")
            });
            run(&LocalClient::open(data_dir)?).await
        }
    }
}

async fn run<C>(client: &C) -> Result<()>
where
    C: WorkshopApi + SessionApi,
{
    let mut workshops = app::refresh(client).await?;
    let mut session = client.current_session()?;

    println!("taller — workshop registration. Type `help` for commands.");
    app::print_workshops(&workshops);

    loop {
        prompt(&session)?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        if matches!(command, "quit" | "exit") {
            break;
        }

        // Every failure is surfaced as a message and the loop keeps going.
        if let Err(e) = dispatch(client, &mut workshops, &mut session, command, &args).await {
            println!("error: {e}");
        }
    }

    Ok(())
}

async fn dispatch<C>(
    client: &C,
    workshops: &mut Vec<Workshop>,
    session: &mut Option<User>,
    command: &str,
    args: &[&str],
) -> Result<()>
where
    C: WorkshopApi + SessionApi,
{
    match command {
        "help" => print_help(),
        "list" => {
            *workshops = app::refresh(client).await?;
            app::print_workshops(workshops);
        }
        "login" => match args {
            [email, password] => {
                let user = app::sign_in(client, email, password).await?;
                println!("welcome, {} ({})", user.name, role_name(&user));
                *session = Some(user);
            }
            _ => usage("login <email> <password>"),
        },
        "register" => match args {
            [name, email, password] => {
                app::create_account(client, name, email, password).await?;
                println!("account created, you can log in now");
            }
            _ => usage("register <name> <email> <password>"),
        },
        "logout" => {
            client.logout()?;
            *session = None;
            println!("logged out");
        }
        "whoami" => match session {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, role_name(user)),
            None => println!("not logged in"),
        },
        "enroll" => {
            let list = enroll(client, workshops, session, args).await?;
            *workshops = list;
            app::print_workshops(workshops);
        }
        "add" | "edit" | "cancel" | "delete" => {
            if !is_admin(session) {
                println!("only admins can manage workshops");
            } else {
                let list = admin_command(client, workshops, command, args).await?;
                *workshops = list;
                app::print_workshops(workshops);
            }
        }
        _ => println!("unknown command `{command}`, try `help`"),
    }
    Ok(())
}

async fn enroll<C: WorkshopApi>(
    client: &C,
    workshops: &[Workshop],
    session: &Option<User>,
    args: &[&str],
) -> Result<Vec<Workshop>> {
    let (id, name, email) = match (args, session) {
        ([id, name, email], _) => (parse_id(id)?, name.to_string(), email.to_string()),
        // Logged-in students enroll as themselves by default.
        ([id], Some(user)) => (parse_id(id)?, user.name.clone(), user.email.clone()),
        _ => {
            return Err(ErrorKind::ValidationError(
                "usage: enroll <id> [<name> <email>]".to_string(),
            )
            .into())
        }
    };

    let (receipt, list) = app::enroll_student(client, workshops, id, &name, &email).await?;
    println!("{}", receipt.message);
    Ok(list)
}

async fn admin_command<C: WorkshopApi>(
    client: &C,
    workshops: &[Workshop],
    command: &str,
    args: &[&str],
) -> Result<Vec<Workshop>> {
    match command {
        "add" => {
            let draft = read_draft(None)?;
            app::save_workshop(client, &draft, None, workshops).await
        }
        "edit" => {
            let id = parse_id(first(args)?)?;
            let current = workshops
                .iter()
                .find(|w| w.id == id)
                .ok_or(ErrorKind::WorkshopNotFound(id))?;
            let draft = read_draft(Some(current))?;
            app::save_workshop(client, &draft, Some(id), workshops).await
        }
        "cancel" => {
            let id = parse_id(first(args)?)?;
            app::cancel_workshop(client, workshops, id).await
        }
        "delete" => {
            let id = parse_id(first(args)?)?;
            app::delete_workshop(client, id).await
        }
        _ => unreachable!(),
    }
}

/// Prompt for every draft field; when editing, an empty answer keeps the
/// current value.
fn read_draft(current: Option<&Workshop>) -> Result<WorkshopDraft> {
    let base = current.map(WorkshopDraft::of).unwrap_or(WorkshopDraft {
        title: String::new(),
        description: String::new(),
        location: String::new(),
        date: String::new(),
        time: String::new(),
        category: String::new(),
        capacity: 20,
    });

    let capacity_answer = |answer: String, current: u32| -> Result<u32> {
        if answer.is_empty() {
            return Ok(current);
        }
        answer
            .parse()
            .map_err(|e| ErrorKind::ParseError(format!("invalid capacity: {e}")).into())
    };

    Ok(WorkshopDraft {
        title: read_field("title", &base.title)?,
        description: read_field("description", &base.description)?,
        location: read_field("location", &base.location)?,
        date: read_field("date", &base.date)?,
        time: read_field("time", &base.time)?,
        category: read_field("category", &base.category)?,
        capacity: capacity_answer(
            read_raw_field(&format!("capacity [{}]", base.capacity))?,
            base.capacity,
        )?,
    })
}

fn read_field(label: &str, current: &str) -> Result<String> {
    let shown = if current.is_empty() {
        label.to_string()
    } else {
        format!("{label} [{current}]")
    };
    let answer = read_raw_field(&shown)?;
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer
    })
}

fn read_raw_field(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn prompt(session: &Option<User>) -> Result<()> {
    match session {
        Some(user) => print!("{} ({})> ", user.email, role_name(user)),
        None => print!("> "),
    }
    io::stdout().flush()?;
    Ok(())
}

fn parse_id(arg: &str) -> Result<u32> {
    arg.parse()
        .map_err(|e| ErrorKind::ParseError(format!("invalid workshop id: {e}")).into())
}

fn first<'a>(args: &[&'a str]) -> Result<&'a str> {
    args.first()
        .copied()
        .ok_or_else(|| Error::from(ErrorKind::ValidationError("workshop id is required".to_string())))
}

fn is_admin(session: &Option<User>) -> bool {
    session.as_ref().is_some_and(User::is_admin)
}

fn role_name(user: &User) -> &'static str {
    match user.role {
        Role::Admin => "admin",
        Role::Student => "student",
    }
}

fn usage(text: &str) {
    println!("usage: {text}");
}

fn print_help() {
    println!("commands:");
    println!("  list                                refresh and show the catalog");
    println!("  login <email> <password>            start a session");
    println!("  register <name> <email> <password>  create an account");
    println!("  logout                              end the session");
    println!("  whoami                              show the current session");
    println!("  enroll <id> [<name> <email>]        take a seat in a workshop");
    println!("  add                                 create a workshop (admin)");
    println!("  edit <id>                           edit a workshop (admin)");
    println!("  cancel <id>                         cancel a workshop (admin)");
    println!("  delete <id>                         delete a workshop (admin)");
    println!("  quit");
}
