//! PD Registration terminal wizard
//!
//! Walks one attendee through the day's sessions from the terminal:
//! name entry, one pick per time slot, itinerary review, submission.
//!
//! # Usage
//!
//! ```bash
//! # Optional: live itinerary writing and a real collection endpoint
//! export ANTHROPIC_API_KEY=...
//! export REGISTRATION_ENDPOINT_URL=https://script.google.com/macros/s/.../exec
//!
//! cargo run --bin pd-registration
//! ```

use anyhow::Context;
use pd_registration::{
    CatalogStatus, Config, ItinerarySource, ItineraryStatus, RegistrationAction,
    RegistrationEnvironment, RegistrationReducer, RegistrationState, ReviewState, SessionId, Stage,
    SubmissionStatus,
};
use pd_registration_runtime::{EffectHandle, Store};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type WizardStore = Store<RegistrationState, RegistrationAction, RegistrationEnvironment, RegistrationReducer>;

/// A line typed on the selection screen
#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Select(SessionId),
    Review,
    Copy,
    Save(String),
    Submit,
    Close,
    Restart,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let argument = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

        match (verb.as_str(), argument) {
            ("list" | "ls", None) => Self::List,
            ("select" | "pick", Some(id)) => Self::Select(SessionId::new(id)),
            ("review", None) => Self::Review,
            ("copy" | "print", None) => Self::Copy,
            ("save", Some(path)) => Self::Save(path.to_string()),
            ("submit", None) => Self::Submit,
            ("close", None) => Self::Close,
            ("restart", None) => Self::Restart,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            _ => Self::Unknown(line.trim().to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pd_registration=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.validate()?;
    tracing::info!(config = ?config, "Configuration loaded");

    let environment = RegistrationEnvironment::from_config(&config)?;
    let store: WizardStore = Store::new(
        RegistrationState::default(),
        RegistrationReducer::new(),
        environment,
    );
    let effect_timeout = config.request_timeout() * 2 + config.unconfigured_delay();

    let handle = store.send(RegistrationAction::RefreshEnrollment).await?;
    if store.state(|s| s.catalog_status).await == CatalogStatus::Loading {
        println!("Loading seat counts...");
    }
    settle(handle, effect_timeout).await;
    if store.state(|s| s.catalog_status).await == CatalogStatus::Fallback {
        println!("(Live enrollment is unavailable; showing the last known seat counts.)");
    }

    println!(
        "Welcome to the {} Professional Development Day registration.",
        config.itinerary.organization
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if store.state(|s| s.stage).await == Stage::Welcome {
            println!("\nEnter your full name to begin (or 'quit'):");
        } else {
            print_prompt(&store).await;
        }

        let Some(line) = lines.next_line().await.context("reading from stdin")? else {
            break;
        };

        if store.state(|s| s.stage).await == Stage::Welcome {
            if Command::parse(&line) == Command::Quit {
                break;
            }
            store.send(RegistrationAction::EnterName { name: line }).await?;
            store.send(RegistrationAction::Start).await?;
            match store.state(|s| s.attendee.clone()).await {
                Some(attendee) => {
                    println!("\nHi {attendee}! Pick one session per time block.");
                    print_catalog(&store).await;
                },
                None => println!("Please enter your name."),
            }
            continue;
        }

        match Command::parse(&line) {
            Command::List => print_catalog(&store).await,
            Command::Select(session_id) => {
                store
                    .send(RegistrationAction::SelectSession { session_id: session_id.clone() })
                    .await?;
                let chosen = store.state(|s| s.selections.contains_session(&session_id)).await;
                if chosen {
                    println!("Selected {session_id}.");
                } else {
                    println!("Could not select {session_id} (unknown, full, or review open).");
                }
            },
            Command::Review => {
                if store.state(|s| s.selections.is_empty()).await {
                    println!("Select at least one session before reviewing.");
                    continue;
                }
                let handle = store.send(RegistrationAction::OpenReview).await?;
                println!("Generating your personalized itinerary...");
                settle(handle, effect_timeout).await;
                print_review(&store).await;
            },
            Command::Copy => match itinerary_markdown(&store).await {
                Some(markdown) => println!("\n{markdown}"),
                None => println!("Open the review first ('review')."),
            },
            Command::Save(path) => match itinerary_markdown(&store).await {
                Some(markdown) => match tokio::fs::write(&path, markdown).await {
                    Ok(()) => println!("Itinerary saved to {path}."),
                    Err(error) => {
                        tracing::warn!(%error, path = %path, "Could not save itinerary");
                        println!("Could not save to {path}: {error}");
                    },
                },
                None => println!("Open the review first ('review')."),
            },
            Command::Submit => {
                let handle = store.send(RegistrationAction::Submit).await?;
                if store.state(|s| s.review.as_ref().map(|r| r.submission.clone())).await
                    == Some(SubmissionStatus::Submitting)
                {
                    println!("Submitting...");
                }
                settle(handle, effect_timeout).await;
                print_submission(&store).await;
            },
            Command::Close => {
                store.send(RegistrationAction::CloseReview).await?;
                print_catalog(&store).await;
            },
            Command::Restart => {
                store.send(RegistrationAction::Restart).await?;
                println!("Your selections were cleared.");
            },
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(text) => println!("Unknown command '{text}'. Type 'help' for commands."),
        }
    }

    shut_down(&store, Duration::from_secs(5)).await;
    println!("Goodbye!");
    Ok(())
}

async fn settle(mut handle: EffectHandle, timeout: Duration) {
    if let Err(error) = handle.wait_with_timeout(timeout).await {
        tracing::warn!(%error, "Background work did not finish in time");
    }
}

/// Stops accepting actions; results still in flight are dropped
async fn shut_down(store: &WizardStore, timeout: Duration) {
    if let Err(error) = store.shutdown(timeout).await {
        tracing::warn!(%error, "Exiting with background work still running");
    }
}

async fn print_prompt(store: &WizardStore) {
    println!("\n{}", store.state(prompt).await);
}

fn prompt(state: &RegistrationState) -> String {
    match &state.review {
        Some(review) if review.submission == SubmissionStatus::Succeeded => {
            "[review] copy | save <path> | close".to_string()
        },
        Some(_) => "[review] submit | copy | save <path> | close".to_string(),
        None => {
            let (selected, total) = state.progress();
            format!("[{selected}/{total} selected] list | select <id> | review | restart | help | quit")
        },
    }
}

async fn print_catalog(store: &WizardStore) {
    let text = store
        .state(|state| {
            let mut out = String::new();
            for slot in state.catalog.slots() {
                out.push_str(&format!("\n== {} ({}) ==\n", slot.label, slot.time_range()));
                for session in state.catalog.sessions_in_slot(&slot.id) {
                    let marker = if state.selections.get(&slot.id) == Some(&session.id) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    let availability = if session.is_full() {
                        "FULL".to_string()
                    } else if session.is_near_full() {
                        format!("{} spots left, almost full", session.spots_left())
                    } else {
                        format!("{} spots left", session.spots_left())
                    };
                    out.push_str(&format!(
                        "{marker} {:<5} {}\n      {} | {} | {}/{} ({availability})\n",
                        session.id,
                        session.title,
                        session.presenter,
                        session.room,
                        session.enrolled,
                        session.capacity,
                    ));
                }
            }
            let (selected, total) = state.progress();
            out.push_str(&format!("\nSelected {selected} of {total} sessions."));
            out
        })
        .await;
    println!("{text}");
}

async fn print_review(store: &WizardStore) {
    let Some(review) = store.state(|s| s.review.clone()).await else {
        return;
    };
    println!("\n--- Review your schedule ---");
    for session in &review.sessions {
        println!("* {} ({}, {})", session.title, session.presenter, session.room);
    }
    match &review.itinerary {
        ItineraryStatus::Loading => println!("\n(Itinerary is still being written...)"),
        ItineraryStatus::Ready(itinerary) => {
            println!("\n{}", itinerary.markdown);
            if itinerary.source == ItinerarySource::Fallback {
                println!("(Personalized notes are unavailable; showing a plain summary.)");
            }
        },
    }
}

async fn print_submission(store: &WizardStore) {
    let review: Option<ReviewState> = store.state(|s| s.review.clone()).await;
    match review.map(|r| r.submission) {
        Some(SubmissionStatus::Succeeded) => {
            println!("Registration submitted! You're all set for PD day.");
        },
        Some(SubmissionStatus::Failed(error)) => println!("Submission failed: {error}"),
        Some(SubmissionStatus::Submitting) => println!("Still submitting..."),
        Some(SubmissionStatus::Idle) => println!("Wait for the itinerary before submitting."),
        None => println!("Open the review first ('review')."),
    }
}

async fn itinerary_markdown(store: &WizardStore) -> Option<String> {
    store
        .state(|s| {
            s.review
                .as_ref()
                .and_then(|review| review.itinerary())
                .map(|itinerary| itinerary.markdown.clone())
        })
        .await
}

fn print_help() {
    println!(
        "Commands:\n  \
         list              show sessions and seats\n  \
         select <id>       choose a session (e.g. select s1-4)\n  \
         review            open the review and write your itinerary\n  \
         copy              print the itinerary markdown\n  \
         save <path>       save the itinerary markdown to a file\n  \
         submit            send your registration\n  \
         close             close the review\n  \
         restart           clear your selections and start over\n  \
         quit              exit"
    );
}
