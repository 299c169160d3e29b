mod app;
mod cli;
mod paths;
mod render;
mod screen;
mod settings;
mod terminal;
mod widgets;

use std::error::Error;
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use bucketlist_lib::auth::{StaticAuth, StaticTokenProvider};
use bucketlist_lib::model::{Budget, ItemDraft, List, ListId, UserId};
use bucketlist_lib::path::{DEFAULT_ROOT_COLLECTION, Layout};
use bucketlist_lib::store::{FirestoreStore, InMemoryStore};
use bucketlist_lib::{DocumentRepository, FirestoreClient, ItemRepository};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use cli::{Cli, Commands, ConfigCommand};
use screen::{DetailScreen, Route};
use settings::{BackendSettings, ProfileStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEMO_USER: &str = "local";

type BoxError = Box<dyn Error>;

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    init_logging()?;

    match cli.command {
        Commands::Open { list_id, name, memory } => {
            let list_id = ListId::new(list_id);
            let name = name.unwrap_or_else(|| list_id.to_string());
            let repo = if memory {
                demo_repository(&list_id, &name).await?
            } else {
                let settings = open_settings().await?.load(&cli.profile).await?;
                firestore_repository(&settings)?
            };

            let mut screen = DetailScreen::new(repo, Route { list_id, name });
            screen.load().await;
            app::run(screen).await?;
        }
        Commands::Config { command } => {
            let store = open_settings().await?;
            match command {
                ConfigCommand::Show => {
                    println!("[{}]", cli.profile);
                    for (key, value) in store.load(&cli.profile).await?.entries() {
                        println!("{key} = {value}");
                    }
                }
                ConfigCommand::Profiles => {
                    for name in store.profiles().await? {
                        println!("{name}");
                    }
                }
                ConfigCommand::Set { key, value } => {
                    let mut settings = store.load(&cli.profile).await?;
                    settings.set(&key, &value)?;
                    store.save(&cli.profile, &settings).await?;
                    info!("Setting {key} updated in profile {}", cli.profile);
                }
            }
        }
    }
    Ok(())
}

fn init_logging() -> Result<(), BoxError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)?;
    Ok(())
}

async fn open_settings() -> Result<ProfileStore, BoxError> {
    let path = paths::settings_db().ok_or("no home directory to keep settings in")?;
    Ok(ProfileStore::open(path).await?)
}

fn firestore_repository(settings: &BackendSettings) -> Result<Arc<dyn ItemRepository>, BoxError> {
    let project_id = settings
        .project_id
        .clone()
        .ok_or("backend.project_id is not set")?;
    let token = settings.id_token.clone().ok_or("session.id_token is not set")?;
    let user = settings.user_id.clone().ok_or("session.user_id is not set")?;

    let mut builder = FirestoreClient::builder()
        .project_id(project_id)
        .token_provider(StaticTokenProvider::new(token))
        .timeout(REQUEST_TIMEOUT);
    if let Some(database) = &settings.database {
        builder = builder.database(database);
    }
    if let Some(base_url) = &settings.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let layout = Layout::with_root(
        settings
            .root_collection
            .as_deref()
            .unwrap_or(DEFAULT_ROOT_COLLECTION),
    );
    let repo = DocumentRepository::new(FirestoreStore::new(client), StaticAuth::signed_in(user))
        .with_layout(layout);
    Ok(Arc::new(repo))
}

/// An in-memory repository holding one list with a few items.
async fn demo_repository(list_id: &ListId, name: &str) -> Result<Arc<dyn ItemRepository>, BoxError> {
    let user = UserId::new(DEMO_USER);
    let store = InMemoryStore::new();
    let list = List {
        id: list_id.clone(),
        name: name.to_string(),
    };
    store.insert(&Layout::default().list(&user, list_id)?, list.to_fields());

    let repo = DocumentRepository::new(store, StaticAuth::signed_in(user));
    let seed = [
        ItemDraft::named("See the northern lights")
            .note("Tromsø in February")
            .budget(Budget::from_int(2400)),
        ItemDraft::named("Learn to sail").budget(Budget::parse_input("850.50")),
        ItemDraft::named("Run a half marathon").status(true),
    ];
    for draft in seed {
        repo.create_item(list_id, draft).await?;
    }
    Ok(Arc::new(repo))
}
