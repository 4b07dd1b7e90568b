use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use parlor_core::directory::MemoryDirectory;
use parlor_core::events::{EventBus, ServerEvent};
use parlor_core::session::Session;
use parlor_core::AppState;
use parlor_models::session::SessionContext;
use parlor_models::user::UpdateProfileRequest;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parlor=info"));
    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = config::Config::load(&args.config)?;

    match args.command {
        cli::Command::UpdateProfile(cmd) => update_profile(&config, cmd).await,
    }
}

async fn update_profile(config: &config::Config, cmd: cli::UpdateProfileArgs) -> Result<()> {
    let directory = Arc::new(MemoryDirectory::from_users(config.seed.users.iter().cloned()));
    let bus = EventBus::new(config.events.bus_capacity);

    // Subscribe before dispatching so every seeded session sees the fan-out.
    let mut sessions: Vec<(Session, broadcast::Receiver<ServerEvent>)> = config
        .seed
        .sessions
        .iter()
        .map(|s| (Session::new(s.user_id, s.perm_auth_key_id), bus.subscribe()))
        .collect();

    let state = AppState::new(directory, Arc::new(bus.clone()), config.app_config());
    let request = UpdateProfileRequest {
        first_name: cmd.first_name,
        last_name: cmd.last_name,
        about: cmd.about,
    };
    let origin = SessionContext {
        perm_auth_key_id: cmd.auth_key,
        client: Some("parlor-cli".to_string()),
    };

    let profile = match parlor_core::account::update_profile(&state, &request, cmd.user, &origin).await {
        Ok(profile) => profile,
        Err(e) => {
            let rpc = e.rpc_error();
            let err = anyhow::Error::new(e).context(format!("rpc error {} {}", rpc.code, rpc.message));
            tracing::error!(code = rpc.code, rpc_message = rpc.message, "update-profile failed: {err:#}");
            return Err(err);
        }
    };
    println!("{}", serde_json::to_string_pretty(&profile)?);

    for (session, rx) in sessions.iter_mut() {
        for (seq, event) in session.drain_pending(rx) {
            let line = serde_json::json!({
                "session_id": &session.session_id,
                "perm_auth_key_id": session.perm_auth_key_id,
                "seq": seq,
                "t": event.event_type,
                "d": event.payload,
            });
            println!("{line}");
        }
    }
    Ok(())
}
