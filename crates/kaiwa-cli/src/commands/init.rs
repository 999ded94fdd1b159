//! The `kaiwa init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create kaiwa.toml
    if std::path::Path::new("kaiwa.toml").exists() {
        println!("kaiwa.toml already exists, skipping.");
    } else {
        std::fs::write("kaiwa.toml", SAMPLE_CONFIG)?;
        println!("Created kaiwa.toml");
    }

    // Create example transcript
    std::fs::create_dir_all("transcripts")?;
    let example_path = std::path::Path::new("transcripts/example.toml");
    if example_path.exists() {
        println!("transcripts/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TRANSCRIPT)?;
        println!("Created transcripts/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit kaiwa.toml with your API keys");
    println!("  2. Run: kaiwa validate --transcript transcripts/example.toml");
    println!("  3. Run: kaiwa analyze --transcript transcripts/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# kaiwa configuration

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"

[providers.mock]
type = "mock"

default_provider = "openai"
default_model = "gpt-4o-mini"

[scoring]
weakness_threshold = 70

[scoring.weights]
grammar = 0.3
vocabulary = 0.3
fluency = 0.2
naturalness = 0.2
"#;

const EXAMPLE_TRANSCRIPT: &str = r#"id = "example"
name = "Ordering at a restaurant"
description = "A short practice conversation about food"
topic = "食べ物"
target_level = "N5"
context = "casual"

[[messages]]
role = "assistant"
content = "こんにちは！何を食べたいですか？"

[[messages]]
role = "user"
content = "ラーメンが食べたいです"
response_time_ms = 6500

[[messages]]
role = "assistant"
content = "いいですね！ラーメンは好きですか？"

[[messages]]
role = "user"
content = "はい、大好きです。よく友達と食べます"
response_time_ms = 8200
"#;
