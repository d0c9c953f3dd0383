// JavaBuddy terminal chat
// Reads questions from stdin and answers them from responses.json

use anyhow::Context;
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use javabuddy_core::brain::lexicon::STARTER_TOPICS;
use javabuddy_core::config::EngineConfig;
use javabuddy_core::engine::EngineHandle;
use javabuddy_core::logging::init_tracing;
use javabuddy_core::mood::{FaceEvent, FaceState};
use javabuddy_core::render::{format_answer, typing_delay, CodeSnippet};
use javabuddy_core::responder::{BotResponse, Resolution, ResolutionPath};

const GREETING: &str = "Hi! I'm JavaBuddy. Ask me anything about Java.";
const QUIT_COMMANDS: &[&str] = &["quit", "exit"];

fn print_face(face: &mut FaceState) {
    let now = Instant::now();
    face.tick(now);
    print!("{} ", face.frame(now));
}

fn print_response(response: &BotResponse) {
    if let Some(answer) = &response.answer {
        println!("{}", format_answer(answer));
    }
    if let Some(code) = &response.code {
        let snippet = CodeSnippet::parse(code);
        let language = if snippet.language.is_empty() {
            "code"
        } else {
            snippet.language.as_str()
        };
        println!("--- {} ---", language);
        println!("{}", snippet.body);
        println!("---");
    }
}

fn face_event(resolution: &Resolution) -> FaceEvent {
    match resolution.path {
        ResolutionPath::Fallback => FaceEvent::Unanswered,
        _ if resolution.response.is_answered() => FaceEvent::Answered,
        _ => FaceEvent::Unanswered,
    }
}

async fn chat(engine: &EngineHandle, config: &EngineConfig) -> anyhow::Result<()> {
    let mut face = FaceState::new(Instant::now());

    match engine.load_knowledge().await {
        Ok(entries) => {
            info!("Knowledge base ready ({} entries)", entries);
            face.apply(FaceEvent::DataLoaded, Instant::now());
        }
        Err(e) => {
            warn!("Continuing without a knowledge base: {}", e);
            face.apply(FaceEvent::DataFailed, Instant::now());
        }
    }

    print_face(&mut face);
    println!("{}", GREETING);
    println!("Popular topics:");
    for topic in STARTER_TOPICS {
        println!("• {}  ({})", topic.label, topic.key);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&input.to_lowercase().as_str()) {
            break;
        }

        face.apply(FaceEvent::InputReceived, Instant::now());

        let resolution = match engine.respond(input.to_string()).await {
            Ok(resolution) => resolution,
            Err(e) => {
                error!("Engine request failed: {}", e);
                face.apply(FaceEvent::Unanswered, Instant::now());
                print_face(&mut face);
                println!("Sorry, I couldn't process that. Please try again.");
                continue;
            }
        };

        if let Some(processed) = &resolution.processed {
            face.observe_confidence(processed.confidence, Instant::now());
        }
        if config.simulate_typing {
            print_face(&mut face);
            println!("...");
            tokio::time::sleep(typing_delay(&resolution.response)).await;
        }

        if !resolution.delta.is_empty() {
            match engine.apply_delta(&resolution.delta).await {
                Ok(learned) if learned > 0 => info!("Learned {} new phrasing(s)", learned),
                Ok(_) => {}
                Err(e) => warn!("Could not apply knowledge delta: {}", e),
            }
        }

        face.apply(face_event(&resolution), Instant::now());
        print_face(&mut face);
        print_response(&resolution.response);
    }

    println!("Goodbye! Happy coding!");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = EngineConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format).context("failed to initialize logging")?;
    info!("Starting JavaBuddy with {:?}", config.responses_path());

    let engine = EngineHandle::new(&config);
    let result = chat(&engine, &config).await;

    if let Err(e) = engine.shutdown().await {
        warn!("Engine already stopped: {}", e);
    }
    result
}
