//! Terminal front end for the playlist concierge.
//!
//! Thin presentation consumer: renders the `FlowView` projection and
//! dispatches typed commands into the service. All flow logic lives in the
//! library.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use playlist_concierge::adapters::catalog::MockCatalog;
use playlist_concierge::adapters::notify::LoggingNotifier;
use playlist_concierge::adapters::payment::SimulatedPaymentGateway;
use playlist_concierge::adapters::prompt::TerminalConfirmation;
use playlist_concierge::adapters::storage::FileSnapshotStore;
use playlist_concierge::application::ConciergeService;
use playlist_concierge::config::AppConfig;
use playlist_concierge::domain::preview::FetchStatus;
use playlist_concierge::domain::questionnaire::FlowPhase;
use playlist_concierge::domain::upgrade::{PaymentStatus, UserType};
use playlist_concierge::ports::FlowView;

const HELP: &str = "\
Commands: /back /jump <n> /confirm /edit /retry /upgrade /notify /reset \
/user <managed|external> /help /quit — anything else answers the question.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;
    info!(?config, "configuration loaded");

    let service = ConciergeService::start(
        Arc::new(FileSnapshotStore::new(&config.storage.data_dir)),
        Arc::new(MockCatalog::with_latency(config.catalog.latency())),
        Arc::new(SimulatedPaymentGateway::new(
            config.payment.latency(),
            config.payment.failure_policy(),
        )),
        Arc::new(TerminalConfirmation::new()),
        Arc::new(LoggingNotifier::new()),
    )
    .await;

    println!("Playlist Concierge");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        render(&service.view());

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let outcome = match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["/quit"] | ["/q"] => break,
            ["/help"] => {
                println!("{}", HELP);
                Ok(())
            }
            ["/back"] => service.go_back().await,
            ["/jump", index] => match index.parse::<usize>() {
                Ok(index) if index > 0 => service.jump_to_question(index - 1).await,
                _ => {
                    println!("usage: /jump <question number>");
                    Ok(())
                }
            },
            ["/confirm"] => service.confirm_review().await,
            ["/edit"] => service.edit_review().await,
            ["/retry"] => service.retry_previews().await,
            ["/reset"] => service.reset().await.map(|_| ()),
            ["/upgrade"] => service.begin_upgrade().await.map(|_| ()),
            ["/notify"] => service.notify_curation_team(),
            ["/user", "managed"] => {
                service.set_user_type(UserType::Managed);
                Ok(())
            }
            ["/user", "external"] => {
                service.set_user_type(UserType::External);
                Ok(())
            }
            [command, ..] if command.starts_with('/') => {
                println!("unknown command: {}", command);
                Ok(())
            }
            _ => service.submit_answer(line).await.map(|_| ()),
        };

        if let Err(err) = outcome {
            println!("! {}", err.message);
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn render(view: &FlowView) {
    println!();
    match view.phase {
        FlowPhase::Asking => {
            println!("Question {} of {}", view.step + 1, view.question_count);
            println!("{}", view.prompt);
            if !view.input.is_empty() {
                println!("(current answer: {})", view.input);
            }
        }
        FlowPhase::Reviewing => {
            println!("Review your answers (/jump <n> to edit one):");
            for (idx, line) in view.review.iter().enumerate() {
                let answer = line.answer.as_deref().unwrap_or("<no answer>");
                println!("  {}. {}", idx + 1, line.prompt);
                println!("     -> {}", answer);
            }
            println!("/confirm to fetch previews, /edit to start over.");
        }
        FlowPhase::PreviewsShown => {
            println!("Your playlist previews:");
            match &view.fetch_status {
                FetchStatus::Loading => println!("  loading..."),
                FetchStatus::Error(message) => {
                    println!("  error: {} (/retry to try again)", message)
                }
                _ => {}
            }
            for preview in &view.previews {
                println!("  - {} [{}]", preview.label, preview.link);
            }
            render_upgrade(view);
        }
    }
}

fn render_upgrade(view: &FlowView) {
    match view.user_type {
        UserType::Managed => {
            println!("Managed client: /notify forwards this profile to the curation team.")
        }
        UserType::External => match view.payment_status {
            PaymentStatus::Idle => println!("/upgrade to purchase the full playlist set."),
            PaymentStatus::Processing => println!("Processing payment..."),
            PaymentStatus::Succeeded => {
                println!("Payment successful! Your playlist upgrade is being processed.")
            }
            PaymentStatus::Failed => {
                let message = view.payment_error.as_deref().unwrap_or("Payment failed.");
                println!("{} (/upgrade to retry)", message);
            }
        },
    }
}
