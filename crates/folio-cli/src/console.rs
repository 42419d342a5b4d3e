//! Line-oriented console client
//!
//! Reads input from stdin, pushes commands into the session's channel,
//! and prints deltas as they arrive for the incremental typing effect.

use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::{broadcast, mpsc};

use folio_chat::{
    ChatCommand, ChatEvent, ChatMode, ChatSession, EmailConfig, HttpTransport, SessionConfig,
    conversation::GREETING,
};

/// Options assembled from CLI flags and the config file
pub struct ConsoleOptions {
    pub url: String,
    pub language: Option<String>,
    pub email: EmailConfig,
    pub idle_timeout: Duration,
    pub start_mode: ChatMode,
}

pub async fn run(options: ConsoleOptions) -> Result<()> {
    let transport = HttpTransport::new(&options.url);
    let session_config = SessionConfig {
        language: options.language,
        email: options.email,
        idle_timeout: options.idle_timeout,
    };

    let session = ChatSession::new(transport, session_config);
    let mut events = session.subscribe();

    let (commands, inbox) = mpsc::channel(16);
    let session_task = tokio::spawn(session.run(inbox));

    let mut mode = ChatMode::Chat;
    if options.start_mode == ChatMode::Email {
        commands.send(ChatCommand::SetMode(ChatMode::Email)).await?;
        mode = ChatMode::Email;
    }

    if mode == ChatMode::Chat {
        println!("{GREETING}");
    }
    println!("(/email and /chat switch modes, /quit exits)");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(mode)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        match line.as_str() {
            "" => {}
            "/quit" | "/exit" => break,
            "/email" => {
                commands.send(ChatCommand::SetMode(ChatMode::Email)).await?;
                mode = ChatMode::Email;
                println!("Email mode: your next message becomes the email body.");
            }
            "/chat" => {
                commands.send(ChatCommand::SetMode(ChatMode::Chat)).await?;
                mode = ChatMode::Chat;
                println!("{GREETING}");
            }
            _ => {
                commands.send(ChatCommand::Submit(line)).await?;
                wait_for_settle(&mut events).await;
            }
        }
    }

    drop(commands);
    session_task.await?;
    Ok(())
}

fn prompt(mode: ChatMode) -> std::io::Result<()> {
    let marker = match mode {
        ChatMode::Chat => "> ",
        ChatMode::Email => "email> ",
    };
    print!("{marker}");
    std::io::stdout().flush()
}

/// Print events for one turn until it settles
async fn wait_for_settle(events: &mut broadcast::Receiver<ChatEvent>) {
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => return,
        };

        match event {
            ChatEvent::Delta { text } => {
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
            ChatEvent::Completed => {
                println!();
                return;
            }
            ChatEvent::Failed => {
                println!("{}", folio_chat::conversation::ERROR_REPLY);
                return;
            }
            ChatEvent::EmailReady { mailto } => {
                println!("Open this link to send your email:\n  {mailto}");
                return;
            }
            _ => {}
        }
    }
}
