//! Interactive front end
//!
//! Prompts for a command and its argument, then hands both to
//! [`handle_command`]. Generic over the reader and writer so it can be driven
//! from stdin/stdout or from an in-memory buffer.

use crate::command::{COMMAND_NAMES, CommandArgs, DEFAULT_DEVICE, handle_command};
use crate::controller::{DeviceAction, DeviceController};
use crate::error::Result;
use crate::logging::{StructuredLogger, get_logger};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Line-oriented command prompt
pub struct Repl<'a, R, W> {
    controller: &'a DeviceController,
    lines: Lines<R>,
    output: W,
    logger: StructuredLogger,
}

impl<'a, R, W> Repl<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(controller: &'a DeviceController, input: R, output: W) -> Self {
        Self {
            controller,
            lines: input.lines(),
            output,
            logger: get_logger("repl"),
        }
    }

    /// Run until `exit`, `quit` or end of input; returns the number of
    /// commands dispatched
    pub async fn run(mut self) -> Result<usize> {
        self.write_line(&format!(
            "Home Copilot {} (EV-aware) started. Interactive mode.",
            env!("APP_VERSION")
        ))
        .await?;
        self.write_line(&format!(
            "Available commands: {}",
            COMMAND_NAMES.join(", ")
        ))
        .await?;
        self.write_line("Type 'exit' or 'quit' to stop.\n").await?;

        let mut dispatched = 0;
        loop {
            let Some(cmd) = self.prompt("Command> ").await? else {
                break;
            };
            if cmd.is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&cmd.as_str()) {
                break;
            }

            let (key, question, default) = match cmd.as_str() {
                "optimize_energy" => ("mode", "Mode [eco/comfort]> ".to_string(), "eco"),
                "charge_ev" => (
                    "mode",
                    "Mode [auto/force_on/force_off]> ".to_string(),
                    "auto",
                ),
                "turn_on_device" | "turn_off_device" => (
                    "device",
                    format!("Device name [{}]> ", self.device_hint()),
                    DEFAULT_DEVICE,
                ),
                _ => {
                    self.logger.warn(&format!(
                        "Unknown command '{}'. Try: {}",
                        cmd,
                        COMMAND_NAMES.join(", ")
                    ));
                    self.write_line(&format!(
                        "Unknown command. Try: {}",
                        COMMAND_NAMES.join(", ")
                    ))
                    .await?;
                    continue;
                }
            };

            let Some(answer) = self.prompt(&question).await? else {
                break;
            };
            let value = if answer.is_empty() {
                default.to_string()
            } else {
                answer
            };

            let args = CommandArgs::from([(key.to_string(), value)]);
            let actions = handle_command(self.controller, &cmd, &args).await;
            dispatched += 1;
            self.write_line(&summarize(&actions)).await?;
        }

        self.output.flush().await?;
        Ok(dispatched)
    }

    fn device_hint(&self) -> String {
        let topics = self.controller.device_topics();
        if topics.is_empty() {
            "lamp/ac/charger".to_string()
        } else {
            topics.keys().cloned().collect::<Vec<_>>().join("/")
        }
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    async fn write_line(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }
}

fn summarize(actions: &[DeviceAction]) -> String {
    if actions.is_empty() {
        "No device actions.".to_string()
    } else {
        let list: Vec<String> = actions.iter().map(ToString::to_string).collect();
        format!("Actions: {}", list.join(", "))
    }
}
