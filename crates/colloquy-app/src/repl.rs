//! Line-oriented driver over the orchestrator's public operations.

use colloquy_ai::ChatOrchestrator;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Reset,
    ShowSystemPrompt,
    SetSystemPrompt(String),
    History,
    Config,
    Help,
    Quit,
    /// Blank line.
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if !trimmed.starts_with('/') {
            return Self::Send(trimmed.to_string());
        }
        // A doubled slash sends the rest literally, leading slash included.
        if let Some(literal) = trimmed.strip_prefix("//") {
            return Self::Send(format!("/{literal}"));
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "/reset" | "/clear" => Self::Reset,
            "/system" if rest.is_empty() => Self::ShowSystemPrompt,
            "/system" => Self::SetSystemPrompt(rest.to_string()),
            "/history" => Self::History,
            "/config" => Self::Config,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

const HELP: &str = "\
Commands:
  /reset           clear the conversation history
  /system          show the current system prompt
  /system <text>   replace the system prompt for the next message
  /history         show all turns so far
  /config          show endpoint and model
  /quit            exit
Anything else is sent as a message; start it with // to send a leading /.";

/// Apply one command. Returns `false` when the session should end.
pub async fn execute<W>(
    chat: &mut ChatOrchestrator,
    command: Command,
    out: &mut W,
) -> std::io::Result<bool>
where
    W: AsyncWrite + Unpin,
{
    match command {
        Command::Send(input) => {
            let turn = chat.send_message(input).await;
            out.write_all(format!("assistant> {}\n", turn.assistant()).as_bytes())
                .await?;
        }
        Command::Reset => {
            chat.reset_history();
            out.write_all(b"History cleared.\n").await?;
        }
        Command::ShowSystemPrompt => {
            out.write_all(format!("{}\n", chat.system_prompt()).as_bytes())
                .await?;
        }
        Command::SetSystemPrompt(text) => {
            chat.update_system_prompt(text);
            out.write_all(b"System prompt updated.\n").await?;
        }
        Command::History => {
            if chat.history().is_empty() {
                out.write_all(b"(no turns yet)\n").await?;
            }
            for (i, turn) in chat.history().iter().enumerate() {
                let text = format!(
                    "[{}] user> {}\n[{}] assistant> {}\n",
                    i + 1,
                    turn.user(),
                    i + 1,
                    turn.assistant()
                );
                out.write_all(text.as_bytes()).await?;
            }
        }
        Command::Config => {
            let info = chat.config();
            let text = format!(
                "Model: {}\nEndpoint: {}\n",
                info.model_name, info.endpoint
            );
            out.write_all(text.as_bytes()).await?;
        }
        Command::Help => {
            out.write_all(format!("{HELP}\n").as_bytes()).await?;
        }
        Command::Quit => return Ok(false),
        Command::Empty => {}
        Command::Unknown(name) => {
            out.write_all(format!("Unknown command {name}; try /help\n").as_bytes())
                .await?;
        }
    }
    out.flush().await?;
    Ok(true)
}

/// Read commands from stdin until `/quit` or end of input.
pub async fn run(chat: &mut ChatOrchestrator) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"you> ").await?;
    stdout.flush().await?;
    while let Some(line) = lines.next_line().await? {
        if !execute(chat, Command::parse(&line), &mut stdout).await? {
            break;
        }
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;
    }
    tracing::info!(turns = chat.history().len(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use colloquy_ai::{CompletionClient, CompletionFailure, CompletionOptions, OutboundMessage};
    use colloquy_config::BackendConfig;

    use super::*;

    /// Replies with the last user message, or fails on "fail".
    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(
            &self,
            messages: &[OutboundMessage],
            _model_name: &str,
            _options: &CompletionOptions,
        ) -> Result<String, CompletionFailure> {
            match messages.last().map(OutboundMessage::content) {
                Some("fail") => Err(CompletionFailure::new("backend unavailable")),
                Some(text) => Ok(format!("echo: {text}")),
                None => Err(CompletionFailure::new("no messages")),
            }
        }
    }

    fn chat() -> ChatOrchestrator {
        let backend = BackendConfig::new("https://example.com", "secret-key", "echo-model");
        ChatOrchestrator::new(Arc::new(EchoClient), &backend, "P")
    }

    async fn run_lines(chat: &mut ChatOrchestrator, lines: &[&str]) -> (String, bool) {
        let mut out = Vec::new();
        let mut keep_going = true;
        for line in lines {
            keep_going = execute(chat, Command::parse(line), &mut out).await.unwrap();
            if !keep_going {
                break;
            }
        }
        (String::from_utf8(out).unwrap(), keep_going)
    }

    #[tokio::test]
    async fn send_prints_reply_and_records_turn() {
        let mut chat = chat();
        let (out, _) = run_lines(&mut chat, &["Hello"]).await;
        assert_eq!(out, "assistant> echo: Hello\n");
        assert_eq!(chat.history().len(), 1);
    }

    #[tokio::test]
    async fn failure_is_shown_and_session_continues() {
        let mut chat = chat();
        let (out, keep_going) = run_lines(&mut chat, &["fail", "Hello"]).await;
        assert!(out.contains("An error occurred: backend unavailable"));
        assert!(out.contains("echo: Hello"));
        assert!(keep_going);
        assert_eq!(chat.history().len(), 2);
    }

    #[tokio::test]
    async fn reset_and_system_commands() {
        let mut chat = chat();
        run_lines(&mut chat, &["Hello", "/system Be terse.", "/reset"]).await;
        assert!(chat.history().is_empty());
        assert_eq!(chat.system_prompt(), "Be terse.");
    }

    #[tokio::test]
    async fn config_never_prints_the_key() {
        let mut chat = chat();
        let (out, _) = run_lines(&mut chat, &["/config"]).await;
        assert!(out.contains("Model: echo-model"));
        assert!(out.contains("Endpoint: https://example.com"));
        assert!(!out.contains("secret-key"));
    }

    #[tokio::test]
    async fn history_lists_turns_in_order() {
        let mut chat = chat();
        let (out, _) = run_lines(&mut chat, &["one", "two", "/history"]).await;
        let first = out.find("[1] user> one").unwrap();
        let second = out.find("[2] user> two").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn escaped_slash_message_reaches_the_backend() {
        let mut chat = chat();
        let (out, _) = run_lines(&mut chat, &["//usr/bin is where?"]).await;
        assert_eq!(out, "assistant> echo: /usr/bin is where?\n");
        assert_eq!(chat.history()[0].user(), "/usr/bin is where?");
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut chat = chat();
        let (_, keep_going) = run_lines(&mut chat, &["/quit", "never sent"]).await;
        assert!(!keep_going);
        assert!(chat.history().is_empty());
    }

    #[test]
    fn plain_text_is_sent_trimmed() {
        assert_eq!(
            Command::parse("  Hello there \n"),
            Command::Send("Hello there".into())
        );
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn system_with_and_without_text() {
        assert_eq!(Command::parse("/system"), Command::ShowSystemPrompt);
        assert_eq!(
            Command::parse("/system   Reply in French. "),
            Command::SetSystemPrompt("Reply in French.".into())
        );
    }

    #[test]
    fn known_commands() {
        assert_eq!(Command::parse("/reset"), Command::Reset);
        assert_eq!(Command::parse("/clear"), Command::Reset);
        assert_eq!(Command::parse("/history"), Command::History);
        assert_eq!(Command::parse("/config"), Command::Config);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn double_slash_sends_literal_text() {
        assert_eq!(
            Command::parse("//usr/bin is where?"),
            Command::Send("/usr/bin is where?".into())
        );
        assert_eq!(Command::parse("//reset"), Command::Send("/reset".into()));
    }

    #[test]
    fn unknown_command_keeps_name() {
        assert_eq!(
            Command::parse("/frobnicate now"),
            Command::Unknown("/frobnicate".into())
        );
    }
}
