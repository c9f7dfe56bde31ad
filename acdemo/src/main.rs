use ac_sqlite::{Db, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod screen;

use cli::Args;

fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument the engine and the
    // storage adapter; subscribe so the events reach stdio.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match Args::import() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return Ok(());
        }
    };

    let db = Db::open(&StoreConfig {
        database_path: args.database.clone(),
        create_if_missing: true,
    })?;

    commands::run(args.command, db)
}
