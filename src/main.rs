//! LazyHub - a terminal issue browser for GitHub repositories.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};

use lazyhub::api::{auth, GitHubClient, Issue};
use lazyhub::app::App;
use lazyhub::cli::{AuthAction, Cli, Commands};
use lazyhub::config::{Config, RepositorySlug, Settings};
use lazyhub::dialog::{DialogParams, IssueDialog};
use lazyhub::error::AppError;
use lazyhub::events::EventHandler;
use lazyhub::fetch::check_credentials;
use lazyhub::logging;
use lazyhub::tasks::create_task_channel;
use lazyhub::tui::{self, Tui};
use lazyhub::update::{current_version, UpdateChecker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = match logging::init() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let config = Config::load().map_err(|e| {
        let e = AppError::from(e);
        anyhow::anyhow!(
            "{}{}",
            e.user_message(),
            e.suggested_action()
                .map(|s| format!("\n{}", s))
                .unwrap_or_default()
        )
    })?;
    let settings = cli.apply(config.settings);
    settings.validate()?;

    let result = match &cli.command {
        Some(Commands::Auth { action }) => run_auth(action, &settings).map(|()| 0),
        None => {
            let Some(repository) = cli.repository.clone() else {
                bail!("Missing repository. Usage: lazyhub <owner>/<name>");
            };
            run_browser(repository, &settings, cli.json).await
        }
    };

    match result {
        Ok(fixed) => {
            logging::shutdown(fixed);
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            logging::shutdown(0);
            if let Some(dir) = log_dir {
                eprintln!("Logs: {}", dir.display());
            }
            Err(e)
        }
    }
}

fn run_auth(action: &AuthAction, settings: &Settings) -> anyhow::Result<()> {
    let base_url = settings.api_base_url.as_str();
    match action {
        AuthAction::Set { token } => {
            let token = match token {
                Some(token) => token.clone(),
                None => read_token()?,
            };
            if token.trim().is_empty() {
                bail!("Token is empty");
            }
            auth::store_token(base_url, &token)?;
            println!("Token stored for {}", base_url);
        }
        AuthAction::Delete => {
            auth::delete_token(base_url)?;
            println!("Token removed for {}", base_url);
        }
        AuthAction::Status => match auth::get_token(base_url)? {
            Some(_) => println!("A token is stored for {}", base_url),
            None => println!("No token stored for {}; requests are unauthenticated", base_url),
        },
    }
    Ok(())
}

fn read_token() -> anyhow::Result<String> {
    print!("GitHub token: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;
    Ok(line.trim().to_string())
}

/// Run the browser and print the fixed issues, returning how many there were.
async fn run_browser(
    repository: RepositorySlug,
    settings: &Settings,
    json: bool,
) -> anyhow::Result<usize> {
    let client =
        GitHubClient::from_keyring(&settings.api_base_url, settings.strict_credential_check)?;
    logging::session_started(
        &repository.to_string(),
        client.base_url(),
        client.is_authenticated(),
    );

    if settings.strict_credential_check {
        if client.is_authenticated() {
            check_credentials(&client)
                .await
                .map_err(|e| anyhow::anyhow!(AppError::from(e).user_message()))?;
        } else {
            info!("No token stored, continuing unauthenticated");
        }
    }

    let params = DialogParams::new(repository.owner, repository.name)
        .show_pull_requests(settings.show_pull_requests_by_default);
    let mut dialog = IssueDialog::new(params);
    if settings.check_for_updates {
        let source = settings.update_repository_slug()?;
        dialog = dialog.with_update_checker(UpdateChecker::new(
            source.owner,
            source.name,
            current_version(),
        ));
    }

    let mut app = App::new(dialog);
    app.start();

    let mut terminal = tui::init()?;
    let result = run_loop(&mut terminal, &mut app, &client, settings);
    tui::restore(&mut terminal)?;
    result?;

    let fixed = app.into_fixed_issues();
    print_fixed_issues(&fixed, json)?;
    Ok(fixed.len())
}

fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &GitHubClient,
    settings: &Settings,
) -> anyhow::Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    loop {
        if let Some(request) = app.take_pending_fetch() {
            spawner.spawn_fetch_issues(
                client,
                request.owner,
                request.repo,
                request.cancel,
                settings.strict_credential_check,
            );
        }
        if let Some((owner, repo)) = app.take_pending_release_check() {
            spawner.spawn_check_release(client, owner, repo);
        }
        for url in app.take_pending_urls() {
            info!(url = %url, "Opening in browser");
            if let Err(e) = open::that(&url) {
                app.report_open_failure(&url, &e);
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        terminal.draw(|frame| app.view(frame))?;

        // Polling blocks; keep the runtime's other workers free for the tasks
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }
    }
}

fn print_fixed_issues(issues: &[Issue], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(issues)?);
    } else {
        for issue in issues {
            println!("{}", issue);
        }
    }
    Ok(())
}
