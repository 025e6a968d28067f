//! relay - interactive terminal client for relayd.
//!
//! Connects, prints every line the server sends, and drives a numbered menu:
//! public chat, private chat, rename, exit.

use anyhow::{Context, Result};
use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use relay_proto::{Command, LineCodec, TO_PREFIX};
use std::net::IpAddr;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};

/// Typed at any chat prompt to return to the menu.
const EXIT_WORD: &str = "exit";

/// Terminal client for relayd.
#[derive(Parser, Debug)]
#[command(name = "relay", version, about)]
struct Args {
    /// Server IP.
    #[arg(long, default_value = "127.0.0.1")]
    ip: IpAddr,

    /// Server port.
    #[arg(long, default_value_t = 8888)]
    port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Public,
    Private,
    Rename,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Public),
            "2" => Ok(Self::Private),
            "3" => Ok(Self::Rename),
            "0" => Ok(Self::Exit),
            _ => Err(()),
        }
    }
}

struct Client {
    stdin: Lines<BufReader<Stdin>>,
    sink: FramedWrite<OwnedWriteHalf, LineCodec>,
}

impl Client {
    /// Next line from the terminal; `None` on end of input.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        println!("{text}");
        Ok(self.stdin.next_line().await?)
    }

    async fn send(&mut self, command: Command) -> Result<()> {
        self.sink
            .send(command.to_string())
            .await
            .context("connection to server lost")
    }

    async fn menu(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let Some(input) = self
                .prompt("1. public chat\n2. private chat\n3. rename\n0. exit")
                .await?
            else {
                return Ok(None);
            };
            match input.parse() {
                Ok(choice) => return Ok(Some(choice)),
                Err(()) => println!(">>>> please enter a number between 0 and 3"),
            }
        }
    }

    async fn public_chat(&mut self) -> Result<()> {
        while let Some(line) = self.prompt(">>>> message (exit to leave):").await? {
            if line == EXIT_WORD {
                break;
            }
            if !line.is_empty() {
                self.send(Command::Public(line)).await?;
            }
        }
        Ok(())
    }

    async fn private_chat(&mut self) -> Result<()> {
        loop {
            self.send(Command::Who).await?;
            let Some(target) = self.prompt(">>>> chat with (exit to leave):").await? else {
                return Ok(());
            };
            let target = target.trim().to_string();
            if target == EXIT_WORD {
                return Ok(());
            }
            if target.is_empty() {
                continue;
            }

            while let Some(line) = self
                .prompt(&format!(">>>> message to {target} (exit to leave):"))
                .await?
            {
                if line == EXIT_WORD {
                    break;
                }
                if !line.is_empty() {
                    self.send(Command::private(target.clone(), line)).await?;
                }
            }
        }
    }

    async fn rename(&mut self) -> Result<()> {
        if let Some(name) = self.prompt(">>>> new name:").await? {
            let name = name.trim();
            if !name.is_empty() && !name.contains('|') {
                self.send(Command::Rename(name.to_string())).await?;
            } else {
                println!(">>>> names must be non-empty and may not contain '|'");
            }
        }
        Ok(())
    }

    async fn run(mut self) -> Result<()> {
        while let Some(choice) = self.menu().await? {
            match choice {
                MenuChoice::Public => self.public_chat().await?,
                MenuChoice::Private => self.private_chat().await?,
                MenuChoice::Rename => self.rename().await?,
                MenuChoice::Exit => break,
            }
        }
        Ok(())
    }
}

/// Copy server lines to stdout until the connection closes.
async fn print_incoming(reader: OwnedReadHalf) {
    let mut lines = FramedRead::new(reader, LineCodec::new());
    while let Some(frame) = lines.next().await {
        match frame {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!(">>>> read error: {e}");
                break;
            }
        }
    }
    println!(">>>> server closed the connection");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let stream = TcpStream::connect((args.ip, args.port))
        .await
        .with_context(|| format!("failed to connect to {}:{}", args.ip, args.port))?;
    println!(">>>> connected to {}:{}", args.ip, args.port);

    let (reader, writer) = stream.into_split();
    let incoming = tokio::spawn(print_incoming(reader));

    let client = Client {
        stdin: BufReader::new(tokio::io::stdin()).lines(),
        sink: FramedWrite::new(writer, LineCodec::new()),
    };
    let result = client.run().await;
    incoming.abort();
    result
}
