//! Visage Talking Head Demo
//!
//! Every line typed on stdin is treated as an assistant reply: it is
//! tagged by the mood classifier, published on a chat-response hub and
//! spoken by the player, which draws each pose on the top row.

mod args;
mod ui;

use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use visage_core::Expression;
use visage_runtime::{forward_responses, init_logging, ChatResponse, ChatResponseHub, UtterancePlayer};

use args::{Args, USAGE};
use ui::TerminalSink;

const FACE_ROW: u16 = 0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_logging(args.log_format())?;
    let config = args.player_config()?;

    println!();
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           Visage - Talking Head Demo                       ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    show_help();

    let player = Arc::new(UtterancePlayer::new(TerminalSink::new(FACE_ROW), config)?);
    let hub = Arc::new(ChatResponseHub::new());
    hub.subscribe(player.clone());

    let (tx, rx) = mpsc::channel(16);
    let pump = forward_responses(rx, hub.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));

        match cmd {
            "" => {}
            "/quit" | "/q" => break,
            "/stop" => player.stop_speaking(),
            "/mood" => match arg.parse::<Expression>() {
                Ok(expression) => player.set_expression(expression),
                Err(e) => println!("{e}"),
            },
            "/raw" => {
                // untagged: the text picks its own expression
                if tx.send(ChatResponse::new(arg)).await.is_err() {
                    break;
                }
            }
            "/stats" => println!("{:#?}", player.stats()),
            "/help" | "/h" => show_help(),
            _ if cmd.starts_with('/') => println!("Unknown command: {cmd}"),
            _ => {
                if tx.send(ChatResponse::classified(line)).await.is_err() {
                    break;
                }
            }
        }
        prompt()?;
    }

    drop(tx);
    pump.await?;
    player.stop_speaking();
    tracing::info!(stats = ?player.stats(), "demo finished");
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn show_help() {
    println!("  <text>          speak a reply (mood classified)");
    println!("  /raw <text>     speak without a mood tag");
    println!("  /mood <name>    neutral, happy, sad, thinking, surprised, angry");
    println!("  /stop           stop speaking");
    println!("  /stats          playback counters");
    println!("  /quit           exit");
    println!();
}
