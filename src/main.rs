use anyhow::Result;
use clap::Parser;
use std::cell::RefCell;
use vouch::api::ApiClient;
use vouch::cli::{self, Context};
use vouch::config::Config;
use vouch::render::Theme;
use vouch::store::Store;
use vouch::token_store::TokenStore;
use vouch::Args;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load configuration; an unreadable default-location file falls back
    // to built-in defaults, an explicit --config path does not.
    let mut cfg = if let Some(config_path) = &args.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // CLI flag (or VOUCH_API_URL) overrides the file.
    if let Some(api_url) = &args.api_url {
        cfg.api_url = api_url.clone();
    }
    cfg.validate()?;

    if args.debug {
        eprintln!("[debug] api_url: {}", cfg.api_url);
    }

    // One token store handle for the client (per-request header reads)
    // and one for the store (persist on login, clear on logout). Both
    // point at the same file.
    let tokens = TokenStore::new();
    let api = ApiClient::new(&cfg.api_url, tokens.clone());
    let store = Store::new(api, tokens);

    let mut ctx = Context {
        args,
        store: RefCell::new(store),
        theme: RefCell::new(Theme::default()),
    };

    match ctx.args.command.take() {
        Some(command) => cli::run_once(&ctx, &command),
        None => cli::run_repl(ctx),
    }
}
