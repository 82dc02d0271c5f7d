//! The line-oriented front end: a menu loop that reads command tokens,
//! collects operation-specific arguments, invokes the machine client, and
//! prints the outcome.
//!
//! Everything interactive lives here, out of the model's way. In particular
//! this layer owns the input-validation loops: non-numeric drink selectors
//! never reach the machine, and the `fill` flow re-prompts until every amount
//! is a non-negative integer (the machine still rejects a bad amount itself
//! if one slips through another caller).
//!
//! The dispatcher is generic over [`AsyncBufRead`]/[`AsyncWrite`], so tests
//! drive whole sessions with scripted byte buffers while `main` hands it real
//! stdio.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::clients::{ActorClient, MachineClient};
use crate::machine_actor::MachineError;
use crate::model::{Refill, Selection, CLEANING_THRESHOLD, MENU};

/// Interactive command loop bound to one machine client.
pub struct Dispatcher<R, W> {
    machine: MachineClient,
    input: R,
    output: W,
}

/// Parse a buy-menu token: `back`, or a 1-based menu number.
///
/// `None` means the token is not worth sending to the machine at all; the
/// machine itself bounds-checks numbers that do parse.
fn parse_selection(token: &str) -> Option<Selection> {
    if token.eq_ignore_ascii_case("back") {
        return Some(Selection::Back);
    }
    token.parse::<usize>().ok().map(Selection::Item)
}

/// Render the buy prompt from the catalog, so the menu text can never drift
/// from what the machine actually sells.
fn menu_prompt() -> String {
    let mut options: Vec<String> = MENU
        .iter()
        .enumerate()
        .map(|(index, recipe)| format!("{} - {}", index + 1, recipe.name))
        .collect();
    options.push("back - to main menu".to_string());
    format!("What do you want to buy? {}: ", options.join(", "))
}

impl<R, W> Dispatcher<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(machine: MachineClient, input: R, output: W) -> Self {
        Self {
            machine,
            input,
            output,
        }
    }

    /// Run the session until `exit` or end of input.
    ///
    /// Domain errors are rendered and the loop continues; only I/O failures
    /// and transport-level machine failures abort the session.
    pub async fn run(mut self) -> io::Result<()> {
        info!("Dispatcher session started");
        self.say("Welcome to the coffee machine!").await?;

        loop {
            self.ask("\nWrite action (buy, fill, take, clean, remaining, exit): ")
                .await?;
            let Some(action) = self.read_token().await? else {
                break;
            };
            debug!(action, "Read action");

            match action.to_lowercase().as_str() {
                "buy" => self.buy().await?,
                "fill" => self.fill().await?,
                "take" => self.take().await?,
                "clean" => self.clean().await?,
                "remaining" => self.remaining().await?,
                "exit" => {
                    self.say("Shutting down coffee machine. Goodbye!").await?;
                    break;
                }
                _ => {
                    self.say(
                        "Invalid action! Please choose: buy, fill, take, clean, remaining, or exit.",
                    )
                    .await?
                }
            }
        }

        info!("Dispatcher session ended");
        Ok(())
    }

    async fn buy(&mut self) -> io::Result<()> {
        self.ask(&format!("\n{}", menu_prompt())).await?;
        let Some(token) = self.read_token().await? else {
            return Ok(());
        };
        let Some(selection) = parse_selection(&token) else {
            self.say("Invalid input! Please enter a number or 'back'.")
                .await?;
            return Ok(());
        };

        match self.machine.purchase(selection).await {
            Ok(receipt) => {
                self.say("I have enough resources, making you a coffee!")
                    .await?;
                if receipt.maintenance_due {
                    self.say(&format!(
                        "The machine has made {CLEANING_THRESHOLD} coffees and now needs cleaning!"
                    ))
                    .await?;
                }
            }
            // Backing out is not an error; just return to the menu.
            Err(MachineError::Cancelled) => {}
            Err(MachineError::MaintenanceRequired) => self.say("I need cleaning!").await?,
            Err(MachineError::InsufficientResource(resource)) => {
                self.say(&format!("Sorry, not enough {resource}!")).await?
            }
            Err(MachineError::InvalidSelection(_)) => self.say("Invalid choice!").await?,
            Err(err) => return Err(io::Error::other(err)),
        }
        Ok(())
    }

    async fn fill(&mut self) -> io::Result<()> {
        let Some(water) = self
            .read_amount("\nWrite how many ml of water you want to add: ")
            .await?
        else {
            return Ok(());
        };
        let Some(milk) = self
            .read_amount("Write how many ml of milk you want to add: ")
            .await?
        else {
            return Ok(());
        };
        let Some(beans) = self
            .read_amount("Write how many grams of coffee beans you want to add: ")
            .await?
        else {
            return Ok(());
        };
        let Some(cups) = self
            .read_amount("Write how many disposable cups you want to add: ")
            .await?
        else {
            return Ok(());
        };

        match self
            .machine
            .refill(Refill {
                water,
                milk,
                beans,
                cups,
            })
            .await
        {
            Ok(()) => Ok(()),
            // The prompt loop filters negatives, but the machine double-checks.
            Err(err @ MachineError::InvalidQuantity { .. }) => self.say(&err.to_string()).await,
            Err(err) => Err(io::Error::other(err)),
        }
    }

    async fn take(&mut self) -> io::Result<()> {
        let amount = self.machine.collect().await.map_err(io::Error::other)?;
        self.say(&format!("\nI gave you ${amount}")).await
    }

    async fn clean(&mut self) -> io::Result<()> {
        let report = self.machine.clean().await.map_err(io::Error::other)?;
        if report.performed {
            self.say("I have been cleaned!").await
        } else {
            self.say(&format!(
                "No need for cleaning yet. Made {}/{} coffees since the last clean.",
                report.progress, CLEANING_THRESHOLD
            ))
            .await
        }
    }

    async fn remaining(&mut self) -> io::Result<()> {
        let snapshot = self.machine.inspect().await.map_err(io::Error::other)?;
        self.say("\nThe coffee machine has:").await?;
        self.say(&format!("{} ml of water", snapshot.water)).await?;
        self.say(&format!("{} ml of milk", snapshot.milk)).await?;
        self.say(&format!("{} g of coffee beans", snapshot.beans))
            .await?;
        self.say(&format!("{} disposable cups", snapshot.cups))
            .await?;
        self.say(&format!("${} of money", snapshot.cash)).await?;
        if snapshot.needs_cleaning {
            self.say(&format!(
                "The machine needs cleaning! (Made {} coffees)",
                snapshot.brews_since_clean
            ))
            .await?;
        }
        Ok(())
    }

    /// Prompt for one amount, re-prompting until a non-negative integer comes
    /// in. `None` means the input ended mid-conversation.
    async fn read_amount(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        self.ask(prompt).await?;
        loop {
            let Some(token) = self.read_token().await? else {
                return Ok(None);
            };
            match token.parse::<i64>() {
                Ok(amount) if amount >= 0 => return Ok(Some(amount)),
                Ok(_) => self.ask("Please enter a non-negative number: ").await?,
                Err(_) => self.ask("Please enter a valid number: ").await?,
            }
        }
    }

    /// Read the next line, trimmed. `None` at end of input.
    async fn read_token(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Write a full line.
    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }

    /// Write a prompt without a newline and flush so it shows up before the
    /// read blocks.
    async fn ask(&mut self, prompt: &str) -> io::Result<()> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
