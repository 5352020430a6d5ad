use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use splitpay::application::disburser::DisbursementClient;
use splitpay::application::orchestrator::Orchestrator;
use splitpay::application::resolver::SplitResolver;
use splitpay::application::scheduler::DisbursementScheduler;
use splitpay::config::Config;
use splitpay::domain::ports::{NotifierRef, SplitStoreRef};
use splitpay::infrastructure::emailjs::EmailJsNotifier;
use splitpay::infrastructure::in_memory::InMemorySplitStore;
use splitpay::infrastructure::log_notifier::LogNotifier;
use splitpay::infrastructure::paystack::PaystackRail;
use splitpay::interfaces::http::webhook::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};

fn open_store(config: &Config) -> Result<SplitStoreRef> {
    if let Some(db_path) = &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            use splitpay::infrastructure::rocksdb::RocksDBSplitStore;
            let store = RocksDBSplitStore::open(db_path)
                .into_diagnostic()
                .wrap_err("failed to open split store")?;
            return Ok(Arc::new(store));
        }

        #[cfg(not(feature = "storage-rocksdb"))]
        warn!(
            db_path = %db_path.display(),
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }

    let store = match &config.splits_file {
        Some(path) => InMemorySplitStore::from_json_file(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to load splits file {}", path.display()))?,
        None => InMemorySplitStore::new(),
    };
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("splitpay=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    let secret = config.secret();
    if secret.is_none() {
        warn!("PAYSTACK_SECRET is not set; webhooks will be rejected");
    }

    let store = open_store(&config)?;
    let notifier: NotifierRef = match config.emailjs() {
        Some(emailjs) => Arc::new(EmailJsNotifier::new(emailjs)),
        None => {
            warn!("EmailJS is not configured; notifications are only logged");
            Arc::new(LogNotifier)
        }
    };
    let rail = Arc::new(PaystackRail::new(
        config.paystack_base_url.clone(),
        secret.clone(),
    ));

    let orchestrator = Orchestrator::new(
        SplitResolver::new(store),
        DisbursementClient::new(rail, config.recipient_display_name.clone(), config.currency.clone()),
        notifier,
    );
    let scheduler = DisbursementScheduler::new(Arc::new(orchestrator), config.split_delay());

    let state = Arc::new(AppState {
        webhook_secret: secret,
        admin_token: config.admin_token.clone(),
        scheduler,
    });

    let listen_addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to bind {listen_addr}"))?;
    info!(%listen_addr, delay_secs = config.split_delay_secs, "splitpay starting");

    webhook::serve(listener, state).await.into_diagnostic()?;
    Ok(())
}
