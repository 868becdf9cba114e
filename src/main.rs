use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use asker::answer_engine::{AnswerEngine, EngineSettings};
use asker::api::create_router;
use asker::config::Config;
use asker::llm::GroqChat;
use asker::rate_limiter::RateLimiter;
use asker::search::TavilySearch;

#[derive(Debug, Parser)]
#[command(name = "asker", about = "Answers questions from live web search results")]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let search = TavilySearch::new(
        &config.tavily_api_key,
        &config.tavily_base_url,
        config.provider_timeout,
    )
    .context("failed to create search client")?;
    let llm = GroqChat::new(
        &config.groq_api_key,
        &config.groq_base_url,
        config.provider_timeout,
    )
    .context("failed to create llm client")?;

    let answer_engine = Arc::new(AnswerEngine::new(
        Arc::new(search),
        Arc::new(llm),
        EngineSettings::from(&config),
    ));
    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_limit_requests,
        config.rate_limit_window,
    ));
    spawn_rate_limit_purger(rate_limiter.clone());

    let app = create_router(answer_engine, rate_limiter);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        addr = %local_addr,
        model = %config.model,
        rate_limit = config.rate_limit_requests,
        window_secs = config.rate_limit_window.as_secs(),
        "asker listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

fn spawn_rate_limit_purger(rate_limiter: Arc<RateLimiter>) {
    let period = rate_limiter.window().max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = rate_limiter.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, "purged expired rate limit windows");
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
