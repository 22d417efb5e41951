use anyhow::Context;
use clap::{Parser, Subcommand};
use nutri_bridge::{
    build_client, ChatBridge, HttpChatBridge, HttpProfileSource, PreferenceStore, ProfileResolver,
    ProfileSource, RemoteTts,
};
use nutri_core::{rng, NutriConfig, Persona, SystemClock};
use nutri_dialogue::{Conversation, Responder};
use nutri_gateway::GatewayServer;
use nutri_voice::{
    ConsoleSynthesizer, FileSink, SilentSynthesizer, SpeechCapability, SpeechIo, Synthesizer,
    VoiceTiming,
};
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_WORDS: &[&str] = &["sair", "quit", "exit"];

#[derive(Parser, Debug)]
#[command(name = "nutri", author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "nutri.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Talk to NutriAI in the terminal
    Chat {
        /// Use the remote chat bridge instead of the local reply templates
        #[arg(long)]
        remote: bool,

        /// Signed-in user id for the profile lookup
        #[arg(long, env = "NUTRI_USER_ID")]
        user: Option<String>,

        /// Display name for the assistant persona, overriding the profile
        #[arg(long)]
        profile_name: Option<String>,

        /// Print each spoken line with its voice settings
        #[arg(long)]
        echo_voice: bool,
    },
    /// Run the chat and text-to-speech backend
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = NutriConfig::load_or_default(&cli.config);

    match cli.command {
        Command::Chat {
            remote,
            user,
            profile_name,
            echo_voice,
        } => chat(config, remote, user, profile_name, echo_voice).await,
        Command::Serve { host, port } => serve(config, host, port).await,
    }
}

async fn serve(
    mut config: NutriConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.gateway.host = host;
    }
    if let Some(port) = port {
        config.gateway.port = port;
    }

    let server = GatewayServer::from_env(&config.gateway)?;
    info!("Starting gateway on {}", server.address());
    server.start().await.context("Gateway task failed")?;
    Ok(())
}

async fn chat(
    config: NutriConfig,
    remote: bool,
    user: Option<String>,
    profile_name: Option<String>,
    echo_voice: bool,
) -> anyhow::Result<()> {
    let client = build_client(config.bridge.timeout_secs)?;

    // 1. Profile and persona
    let store = PreferenceStore::new(
        config
            .storage
            .preferences_path
            .clone()
            .unwrap_or_else(PreferenceStore::default_path),
    );
    let source = config
        .bridge
        .profile_url
        .as_deref()
        .map(|url| Arc::new(HttpProfileSource::new(client.clone(), url)) as Arc<dyn ProfileSource>);
    let profile = ProfileResolver::new(source, store)
        .resolve(user.as_deref())
        .await;
    let persona = match profile_name.as_deref() {
        Some(name) => Persona::from_display_name(name),
        None => profile.persona(),
    };
    info!("Persona: {} ({:?} profile)", persona.label(), profile.origin);

    // 2. Speech output
    let synthesizer: Arc<dyn Synthesizer> = match config.bridge.tts_url.as_deref() {
        Some(url) => {
            let dir = config
                .storage
                .audio_dir
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join("nutri-audio"));
            info!("Remote TTS at {}, audio written to {}", url, dir.display());
            Arc::new(RemoteTts::new(client.clone(), url, Arc::new(FileSink::new(dir))))
        }
        None if echo_voice => Arc::new(ConsoleSynthesizer),
        None => Arc::new(SilentSynthesizer),
    };
    let (speech, mut notices) = SpeechIo::new(
        SpeechCapability::Unavailable,
        synthesizer,
        VoiceTiming::from(&config.voice),
    );
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            eprintln!("[aviso] {}", notice.message());
        }
    });

    // 3. Reply source
    let chat_bridge = if remote || config.assistant.use_remote_chat {
        let url = config
            .bridge
            .chat_url
            .as_deref()
            .context("Remote chat needs bridge.chat_url or NUTRI_CHAT_URL")?;
        Some(Arc::new(HttpChatBridge::new(client.clone(), url)) as Arc<dyn ChatBridge>)
    } else {
        None
    };

    let responder = Responder::new(
        rng::from_seed(config.assistant.seed),
        Arc::new(SystemClock),
        persona,
    );
    let mut conversation = Conversation::new(speech, responder, chat_bridge);

    // 4. Session
    if let Some(welcome) = conversation.greet_returning_user(&profile).await {
        println!("\nNutriAI: {}\n", welcome);
    }
    let greeting = conversation.activate().await;
    println!("NutriAI - {}. Digite 'sair' para encerrar.", conversation.persona().label());
    if let Some(greeting) = greeting {
        println!("\nNutriAI: {}\n", greeting);
    }

    let mut editor = rustyline::DefaultEditor::new().context("Failed to create line editor")?;
    loop {
        let line = match tokio::task::block_in_place(|| editor.readline("> ")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        let trimmed = line.trim();
        if EXIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(trimmed);

        if let Some(exchange) = conversation.handle_utterance(trimmed).await {
            println!("\nNutriAI: {}\n", exchange.reply);
        }
    }

    conversation.deactivate().await;
    println!("Até logo!");
    Ok(())
}
