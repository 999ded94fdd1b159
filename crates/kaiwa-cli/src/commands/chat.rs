//! The `kaiwa chat` command.
//!
//! Runs an interactive practice conversation on stdin/stdout, recording the
//! learner's response times, then scores the whole conversation on exit
//! (EOF or an empty line).

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use kaiwa_core::model::{JlptLevel, Message, Role, Skill};
use kaiwa_core::pipeline::{self, EvaluateOptions};
use kaiwa_core::traits::{ChatProvider, ChatRequest, ChatTurn};
use kaiwa_core::transcript::Transcript;
use kaiwa_providers::{create_provider_or_mock, load_config_from};

pub async fn execute(
    topic: String,
    level: String,
    provider_name: Option<String>,
    model: Option<String>,
    save: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let level: JlptLevel = level.parse()?;
    let config = load_config_from(config_path.as_deref())?;

    let provider_name = provider_name.unwrap_or_else(|| config.default_provider.clone());
    let model = model.unwrap_or_else(|| config.default_model.clone());
    let provider = create_provider_or_mock(&config, &provider_name);

    println!("Practicing {topic} at {level} with {} ({model}).", provider.name());
    println!("Type your replies in Japanese; an empty line ends the conversation.\n");

    let mut messages: Vec<Message> = Vec::new();
    let mut history: Vec<ChatTurn> = Vec::new();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    let mut prompt_shown = Instant::now();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let text = line.trim();
        if text.is_empty() {
            break;
        }

        let response_time_ms = prompt_shown.elapsed().as_millis() as u64;
        let mut user_message = Message::user(text);
        user_message.response_time_ms = Some(response_time_ms);
        messages.push(user_message);
        history.push(ChatTurn::new(Role::User, text));

        let request = ChatRequest {
            model: model.clone(),
            topic: topic.clone(),
            level,
            history: history.clone(),
            system_prompt: None,
        };

        let reply = provider.reply(&request).await?;
        println!("{}", reply.content);
        messages.push(Message::assistant(&reply.content));
        history.push(ChatTurn::new(Role::Assistant, reply.content));

        prompt_shown = Instant::now();
    }

    if messages.is_empty() {
        println!("No conversation to score.");
        return Ok(());
    }

    let options = EvaluateOptions {
        weights: config.scoring.weights,
        weakness_threshold: config.scoring.weakness_threshold,
        target_level: Some(level),
        context: None,
    };
    let evaluation = pipeline::evaluate(&mut messages, &options)?;

    println!("\nConversation score: {}/100", evaluation.composite.total);
    for skill in Skill::ALL {
        println!("  {skill}: {}/100", evaluation.composite.sub_score(skill));
    }
    println!(
        "Estimated level: {} (confidence {:.0}%)",
        evaluation.estimate.estimated_level,
        evaluation.estimate.confidence * 100.0
    );
    if !evaluation.weaknesses.is_empty() {
        let names: Vec<String> = evaluation
            .weaknesses
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!("Focus areas: {}", names.join(", "));
    }

    if let Some(path) = save {
        let transcript = Transcript {
            id: format!("chat-{}", chrono::Utc::now().format("%Y%m%d-%H%M%S")),
            name: format!("Practice: {topic}"),
            description: String::new(),
            topic: Some(topic),
            target_level: Some(level),
            context: None,
            messages,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(&transcript)?)?;
        println!("Transcript saved to: {}", path.display());
    }

    Ok(())
}
