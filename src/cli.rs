//! CLI front end: clap arguments, one-shot subcommands, and the
//! interactive gallery REPL.
//!
//! The REPL is the view layer. The gallery grid, auth form, and
//! submission form from the original web UI become slash commands and
//! prompt sequences; all state reads and mutations go through the
//! [`Store`].

use crate::api::ApiClient;
use crate::notify;
use crate::render::{self, Theme};
use crate::store::Store;
use crate::token_store::vouch_home;
use crate::types::{NewAccount, NewTestimonial, TestimonialKind, TestimonialPatch};
use anyhow::Result;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cell::RefCell;
use std::path::PathBuf;

/// Path to the readline history file.
fn history_path() -> PathBuf {
    vouch_home().join("history")
}

#[derive(Parser, Debug)]
#[command(name = "vouch", about = "Terminal client for a testimonial-collection service")]
pub struct Args {
    /// Base URL of the testimonial service, including the /api prefix
    #[arg(long, env = "VOUCH_API_URL")]
    pub api_url: Option<String>,

    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print error details and state traces to stderr
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account and store the session token
    Register,
    /// Clear the stored session token (local only)
    Logout,
    /// Show the currently authenticated user
    Whoami,
    /// Show the gallery of approved testimonials
    List {
        /// Include pending and rejected entries, with ids and statuses
        #[arg(long)]
        all: bool,
    },
    /// Submit a testimonial
    Submit {
        #[arg(long)]
        content: String,
        /// Star rating, 1-5
        #[arg(long, default_value_t = 5)]
        rating: u8,
        /// "text" or "video"
        #[arg(long, default_value = "text")]
        kind: String,
        /// Video file to attach (optional, even for kind=video)
        #[arg(long)]
        video: Option<PathBuf>,
    },
    /// Approve a testimonial (moderators)
    Approve { id: String },
    /// Reject a testimonial (moderators)
    Reject { id: String },
    /// Edit a testimonial's content or rating
    Update {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
    },
    /// Delete a testimonial
    Delete { id: String },
}

pub struct Context {
    pub args: Args,
    pub store: RefCell<Store<ApiClient>>,
    pub theme: RefCell<Theme>,
}

impl Context {
    fn debug(&self, err: &anyhow::Error) {
        if self.args.debug {
            eprintln!("[debug] {:#}", err);
        }
    }
}

// ---- shared operation handlers ----
// Every failure is absorbed into a generic notification; nothing here
// escalates past a dismissed toast.

fn do_login(ctx: &Context, email: &str, password: &str) {
    match ctx.store.borrow_mut().login(email, password) {
        Ok(user) => {
            notify::success("Logged in successfully!");
            println!("{}", render::format_user(&user));
        }
        Err(e) => {
            ctx.debug(&e);
            notify::error("Invalid credentials");
        }
    }
}

fn do_register(ctx: &Context, account: &NewAccount) {
    match ctx.store.borrow_mut().register(account) {
        Ok(user) => {
            notify::success("Registered successfully!");
            println!("{}", render::format_user(&user));
        }
        Err(e) => {
            ctx.debug(&e);
            notify::error("Registration failed");
        }
    }
}

fn do_logout(ctx: &Context) {
    match ctx.store.borrow_mut().logout() {
        Ok(()) => notify::success("Logged out"),
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to clear session");
        }
    }
}

fn do_whoami(ctx: &Context) {
    let mut store = ctx.store.borrow_mut();
    if !store.is_authenticated() {
        store.check_session();
    }
    match store.user() {
        Some(user) => println!("{}", render::format_user(user)),
        None => println!("Not logged in."),
    }
}

fn do_list(ctx: &Context, all: bool) {
    let theme = *ctx.theme.borrow();
    let mut store = ctx.store.borrow_mut();
    match store.testimonials() {
        Ok(list) => {
            let out = if all {
                render::render_moderation_list(list, theme)
            } else {
                render::render_grid(list, theme)
            };
            print!("{}", out);
        }
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to load testimonials");
        }
    }
}

fn do_refresh(ctx: &Context) {
    let mut store = ctx.store.borrow_mut();
    match store.refresh() {
        Ok(list) => notify::info(&format!("Refreshed: {} testimonial(s)", list.len())),
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to load testimonials");
        }
    }
}

fn do_submit(ctx: &Context, new: &NewTestimonial) {
    if !(1..=5).contains(&new.rating) {
        notify::error("Rating must be between 1 and 5");
        return;
    }
    match ctx.store.borrow_mut().submit(new) {
        Ok(_) => notify::success("Testimonial submitted successfully!"),
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to submit testimonial");
        }
    }
}

fn do_approve(ctx: &Context, id: &str) {
    match ctx.store.borrow_mut().approve(id) {
        Ok(()) => {
            notify::success("Approved");
            notify::info("Run /refresh (or list again) to see the change");
        }
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to approve testimonial");
        }
    }
}

fn do_reject(ctx: &Context, id: &str) {
    match ctx.store.borrow_mut().reject(id) {
        Ok(()) => {
            notify::success("Rejected");
            notify::info("Run /refresh (or list again) to see the change");
        }
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to reject testimonial");
        }
    }
}

fn do_update(ctx: &Context, id: &str, patch: &TestimonialPatch) {
    if let Some(rating) = patch.rating {
        if !(1..=5).contains(&rating) {
            notify::error("Rating must be between 1 and 5");
            return;
        }
    }
    match ctx.store.borrow_mut().update(id, patch) {
        Ok(_) => notify::success("Updated"),
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to update testimonial");
        }
    }
}

fn do_delete(ctx: &Context, id: &str) {
    match ctx.store.borrow_mut().delete(id) {
        Ok(()) => notify::success("Deleted"),
        Err(e) => {
            ctx.debug(&e);
            notify::error("Failed to delete testimonial");
        }
    }
}

// ---- prompt helpers ----

fn prompt(rl: &mut DefaultEditor, label: &str) -> Result<String> {
    let line = rl.readline(&format!("{}: ", label))?;
    Ok(line.trim().to_string())
}

fn prompt_rating(rl: &mut DefaultEditor) -> Result<u8> {
    loop {
        let raw = prompt(rl, "Rating (1-5)")?;
        if let Ok(n) = raw.parse::<u8>() {
            if (1..=5).contains(&n) {
                return Ok(n);
            }
        }
        println!("Please enter a number from 1 to 5.");
    }
}

fn prompt_login(ctx: &Context, rl: &mut DefaultEditor, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(e) => e.to_string(),
        None => prompt(rl, "Email")?,
    };
    let password = prompt(rl, "Password")?;
    do_login(ctx, &email, &password);
    Ok(())
}

fn prompt_register(ctx: &Context, rl: &mut DefaultEditor) -> Result<()> {
    let account = NewAccount {
        email: prompt(rl, "Email")?,
        password: prompt(rl, "Password")?,
        name: prompt(rl, "Name")?,
        company: prompt(rl, "Company")?,
        role: prompt(rl, "Role")?,
    };
    do_register(ctx, &account);
    Ok(())
}

/// The submission form: content, rating, kind, optional video file.
fn prompt_submit(ctx: &Context, rl: &mut DefaultEditor) -> Result<()> {
    let content = prompt(rl, "Your testimonial")?;
    if content.is_empty() {
        notify::error("Testimonial text is required");
        return Ok(());
    }
    let rating = prompt_rating(rl)?;
    let kind = loop {
        let raw = prompt(rl, "Type (text/video)")?;
        let raw = if raw.is_empty() { "text" } else { raw.as_str() };
        if let Some(kind) = TestimonialKind::parse(raw) {
            break kind;
        }
        println!("Please enter \"text\" or \"video\".");
    };
    // A video submission without a file is allowed; the attachment is
    // optional all the way down.
    let video = if kind == TestimonialKind::Video {
        let raw = prompt(rl, "Video file (blank to skip)")?;
        if raw.is_empty() {
            None
        } else {
            Some(PathBuf::from(raw))
        }
    } else {
        None
    };

    do_submit(
        ctx,
        &NewTestimonial {
            content,
            rating,
            kind,
            video,
        },
    );
    Ok(())
}

// ---- entry points ----

/// Run a single subcommand and exit.
pub fn run_once(ctx: &Context, command: &Command) -> Result<()> {
    match command {
        Command::Login { email } => {
            let mut rl = DefaultEditor::new()?;
            prompt_login(ctx, &mut rl, email.as_deref())?;
        }
        Command::Register => {
            let mut rl = DefaultEditor::new()?;
            prompt_register(ctx, &mut rl)?;
        }
        Command::Logout => do_logout(ctx),
        Command::Whoami => do_whoami(ctx),
        Command::List { all } => do_list(ctx, *all),
        Command::Submit {
            content,
            rating,
            kind,
            video,
        } => match TestimonialKind::parse(kind) {
            Some(kind) => do_submit(
                ctx,
                &NewTestimonial {
                    content: content.clone(),
                    rating: *rating,
                    kind,
                    video: video.clone(),
                },
            ),
            None => notify::error("Type must be \"text\" or \"video\""),
        },
        Command::Approve { id } => do_approve(ctx, id),
        Command::Reject { id } => do_reject(ctx, id),
        Command::Update {
            id,
            content,
            rating,
        } => do_update(
            ctx,
            id,
            &TestimonialPatch {
                content: content.clone(),
                rating: *rating,
            },
        ),
        Command::Delete { id } => do_delete(ctx, id),
    }
    Ok(())
}

/// Interactive mode: the gallery shell.
pub fn run_repl(ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let history_file = history_path();
    let _ = rl.load_history(&history_file);

    println!("vouch - Customer Stories. Type /help for commands, /exit to quit");
    if ctx.store.borrow_mut().check_session() {
        if let Some(user) = ctx.store.borrow().user() {
            println!("Logged in as {}", user.name);
        }
    }

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                if line.starts_with('/') {
                    match handle_command(&ctx, &mut rl, line) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => {
                            // Readline failures inside a form drop back
                            // to the prompt.
                            ctx.debug(&e);
                        }
                    }
                    continue;
                }

                println!("Commands start with '/'. Try /help");
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    // Save command history (create parent directory if needed)
    if let Some(parent) = history_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = rl.save_history(&history_file);

    Ok(())
}

/// Dispatch one slash command. Returns true to exit the REPL.
fn handle_command(ctx: &Context, rl: &mut DefaultEditor, cmd: &str) -> Result<bool> {
    let parts: Vec<&str> = cmd.splitn(2, ' ').collect();
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match parts[0] {
        "/exit" | "/quit" => return Ok(true),
        "/help" => {
            println!("Commands:");
            println!("  /exit            - quit");
            println!("  /help            - show commands");
            println!("  /list            - show the gallery (approved only)");
            println!("  /list all        - show every entry with id and status");
            println!("  /refresh         - refetch the testimonial list");
            println!("  /theme           - toggle light/dark presentation");
            println!("Account:");
            println!("  /login           - log in");
            println!("  /register        - create an account");
            println!("  /logout          - clear the local session");
            println!("  /whoami          - show the current user");
            println!("Testimonials:");
            println!("  /submit          - share your experience");
            println!("  /update <id>     - edit content/rating");
            println!("  /delete <id>     - delete");
            println!("Moderation:");
            println!("  /approve <id>    - approve");
            println!("  /reject <id>     - reject");
        }
        "/login" => prompt_login(ctx, rl, None)?,
        "/register" => prompt_register(ctx, rl)?,
        "/logout" => do_logout(ctx),
        "/whoami" => do_whoami(ctx),
        "/list" => do_list(ctx, arg == "all"),
        "/refresh" => do_refresh(ctx),
        "/submit" => {
            if !ctx.store.borrow().is_authenticated() {
                notify::error("Log in first (/login)");
            } else {
                prompt_submit(ctx, rl)?;
            }
        }
        "/approve" if !arg.is_empty() => do_approve(ctx, arg),
        "/reject" if !arg.is_empty() => do_reject(ctx, arg),
        "/delete" if !arg.is_empty() => do_delete(ctx, arg),
        "/update" if !arg.is_empty() => {
            let content = prompt(rl, "New content (blank to keep)")?;
            let rating_raw = prompt(rl, "New rating (blank to keep)")?;
            let rating = if rating_raw.is_empty() {
                None
            } else {
                match rating_raw.parse::<u8>() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        notify::error("Rating must be between 1 and 5");
                        return Ok(false);
                    }
                }
            };
            let patch = TestimonialPatch {
                content: if content.is_empty() {
                    None
                } else {
                    Some(content)
                },
                rating,
            };
            do_update(ctx, arg, &patch);
        }
        "/approve" | "/reject" | "/delete" | "/update" => {
            println!("Usage: {} <id>", parts[0]);
        }
        "/theme" => {
            let mut theme = ctx.theme.borrow_mut();
            theme.toggle();
            println!("Theme: {}", theme.name());
        }
        // Rendered but inert in the original UI; kept as stubs.
        "/filter" | "/sort" => {
            println!("Not implemented.");
        }
        _ => {
            println!("Unknown command: {}", parts[0]);
        }
    }
    Ok(false)
}
