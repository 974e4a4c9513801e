//! `procura` command-line entry point

use anyhow::Context;
use clap::ArgMatches;
use procura_cli::{
    command, render_hierarchy, render_stats, render_tenders, session_from, tender_rows, Fixture,
    ProcuraConfig,
};
use procura_model::Session;
use procura_resolver::NameResolver;
use procura_store::{
    DashboardRepository, HttpExecutor, QueryExecutor, ReferenceDataLoader, TenderRepository,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &ProcuraConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn executor(matches: &ArgMatches, config: &ProcuraConfig) -> anyhow::Result<Arc<dyn QueryExecutor>> {
    match matches.get_one::<PathBuf>("fixture") {
        Some(path) => Ok(Arc::new(Fixture::load(path)?.into_executor())),
        None => {
            tracing::info!("using API at {}", config.api.base_url);
            Ok(Arc::new(HttpExecutor::new(&config.api)?))
        }
    }
}

async fn tenders(
    executor: Arc<dyn QueryExecutor>,
    config: &ProcuraConfig,
    session: &Session,
    json: bool,
) -> anyhow::Result<()> {
    let loader = ReferenceDataLoader::new(Arc::clone(&executor), config.loader.clone());
    let repo = TenderRepository::new(executor);

    let (snapshot, tenders) = tokio::join!(loader.hierarchy(), repo.list(session));
    let tenders = tenders.context("failed to load tenders")?;
    if snapshot.is_stale() {
        tracing::warn!("reference data incomplete; some names may show as placeholders");
    }

    let resolver = NameResolver::from_hierarchy(&snapshot.hierarchy);
    let rows = tender_rows(&tenders, &resolver);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_tenders(&rows));
    }
    Ok(())
}

async fn hierarchy(executor: Arc<dyn QueryExecutor>, config: &ProcuraConfig) -> anyhow::Result<()> {
    let loader = ReferenceDataLoader::new(executor, config.loader.clone());
    let snapshot = loader.hierarchy().await;
    for error in &snapshot.errors {
        tracing::warn!("reference list unavailable: {}", error);
    }

    let (offices, wings, decs) = snapshot.hierarchy.counts();
    println!("{offices} offices, {wings} wings, {decs} DECs");
    println!();
    print!("{}", render_hierarchy(&snapshot.hierarchy));
    Ok(())
}

async fn stats(
    executor: Arc<dyn QueryExecutor>,
    session: &Session,
    json: bool,
) -> anyhow::Result<()> {
    let repo = DashboardRepository::new(executor);
    let (summary, stock) = tokio::try_join!(repo.summary(session), repo.stock_transaction_stats(session))
        .context("failed to load dashboard")?;

    if json {
        let value = serde_json::json!({ "summary": summary, "stock": stock });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_stats(&summary, &stock));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = command().get_matches();

    let config = ProcuraConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    init_tracing(&config);

    let session = session_from(&matches)?;
    let executor = executor(&matches, &config)?;
    tracing::debug!("running as {} ({:?})", session.user_id, session.role);

    match matches.subcommand() {
        Some(("tenders", args)) => tenders(executor, &config, &session, args.get_flag("json")).await,
        Some(("hierarchy", _)) => hierarchy(executor, &config).await,
        Some(("stats", args)) => stats(executor, &session, args.get_flag("json")).await,
        _ => Ok(()),
    }
}
