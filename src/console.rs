use crate::board::state::InputEvent;
use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tracing::debug;
use tracing::info;
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleCommand {
    Input(InputEvent),
    Quit,
}

/// Parses one console line. Returns `None` for blank or unknown lines.
///
/// `search <text>` and `select <name>` set the search text, `limit <n>` sets
/// the row limit, a bare `search` or `limit` clears it, `quit` stops.
pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (keyword, rest) = match trimmed.split_once(' ') {
        Some((keyword, rest)) => (keyword, rest),
        None => (trimmed, ""),
    };

    match keyword {
        "search" | "select" => Some(ConsoleCommand::Input(InputEvent::Search(rest.to_string()))),
        "limit" => Some(ConsoleCommand::Input(InputEvent::RowLimit(rest.to_string()))),
        "quit" | "exit" if rest.trim().is_empty() => Some(ConsoleCommand::Quit),
        _ => None,
    }
}

/// Reads stdin on a dedicated thread so a pending read never holds up runtime
/// shutdown. Input events go to `input_sender`; `quit` fires `quit_sender`.
/// End of input just ends the thread.
pub fn spawn_console_reader(
    input_sender: mpsc::UnboundedSender<InputEvent>,
    quit_sender: oneshot::Sender<()>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Error reading console input: {}", e);
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Some(ConsoleCommand::Input(event)) => {
                    debug!("Console input: {:?}", event);
                    if input_sender.send(event).is_err() {
                        debug!("Board is gone, stop reading console");
                        return;
                    }
                }
                Some(ConsoleCommand::Quit) => {
                    info!("Quit requested from console");
                    let _ = quit_sender.send(());
                    return;
                }
                None => warn!(
                    "Unknown command '{}', expected: search <text> | select <name> | limit <n> | quit",
                    line
                ),
            }
        }
        debug!("Console input closed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(text: &str) -> Option<ConsoleCommand> {
        Some(ConsoleCommand::Input(InputEvent::Search(text.to_string())))
    }

    fn limit(text: &str) -> Option<ConsoleCommand> {
        Some(ConsoleCommand::Input(InputEvent::RowLimit(text.to_string())))
    }

    #[test]
    fn test_parse_search_keeps_text_verbatim() {
        assert_eq!(search("eth"), parse_command("search eth"));
        assert_eq!(search("bitcoin cash "), parse_command("search bitcoin cash \r\n"));
        assert_eq!(search(""), parse_command("search"));
        let long = "x".repeat(31);
        assert_eq!(search(&long), parse_command(&format!("search {}", long)));
    }

    #[test]
    fn test_parse_select_is_search() {
        assert_eq!(search("Bitcoin"), parse_command("select Bitcoin"));
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(limit("10"), parse_command("limit 10"));
        assert_eq!(limit("abc"), parse_command("  limit abc"));
        assert_eq!(limit(""), parse_command("limit"));
    }

    #[test]
    fn test_parse_quit_and_unknown() {
        assert_eq!(Some(ConsoleCommand::Quit), parse_command("quit"));
        assert_eq!(Some(ConsoleCommand::Quit), parse_command("exit\n"));
        assert_eq!(None, parse_command("quit now"));
        assert_eq!(None, parse_command("refresh"));
        assert_eq!(None, parse_command(""));
    }
}
