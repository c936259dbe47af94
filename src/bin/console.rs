//! Interactive deploy console
//!
//! Drives a wallet session from the terminal: pick a network, connect,
//! paste creation bytecode, deploy, and follow the explorer links.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use bytecast::{Network, SessionController, Status};

#[tokio::main]
async fn main() -> Result<()> {
    bytecast::init();

    println!("bytecast {} - creation-bytecode deploy console", bytecast::VERSION);

    let controller = bytecast::init_session().await;
    if !controller.has_provider() {
        println!(
            "No wallet agent found. Set BYTECAST_BRIDGE_URL or start a local signer, then restart."
        );
    }
    if let Err(e) = controller.observe_chain().await {
        log::warn!("chain observation unavailable: {}", e);
    }

    print_help();
    print_state(&controller).await;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };
        let arg = parts.next();

        match command {
            "help" => print_help(),
            "status" => {}
            "network" => match arg.and_then(Network::from_key) {
                Some(network) => controller.set_target(network).await,
                None => println!("usage: network <mainnet|sepolia>"),
            },
            "switch" => {
                let target = controller.snapshot().await.target;
                // Outcome lands in the status line either way
                let _ = controller.ensure_network(target).await;
            }
            "connect" => {
                let _ = controller.connect().await;
            }
            "disconnect" => controller.disconnect().await,
            "code" => match arg {
                Some(code) => controller.set_bytecode(code).await,
                None => println!("usage: code <hex bytecode>"),
            },
            "fill" => controller.fill_test_payload().await,
            "deploy" => {
                let _ = controller.deploy().await;
            }
            "reset" => controller.reset().await,
            "quit" | "exit" => break,
            other => println!("unknown command: {} (try `help`)", other),
        }
        print_state(&controller).await;
    }

    controller.shutdown();
    Ok(())
}

async fn print_state(controller: &SessionController) {
    let state = controller.snapshot().await;
    let wallet_chain = state
        .observed_network()
        .map(|network| network.name().to_string())
        .or_else(|| state.wallet_chain_id.map(|id| format!("unknown chain {}", id)))
        .unwrap_or_else(|| "not observed".to_string());
    println!("  target:   {}", state.target.name());
    println!("  wallet:   {}", wallet_chain);
    println!(
        "  account:  {}",
        state.account.as_deref().unwrap_or("not connected")
    );
    if !state.bytecode.is_empty() {
        println!("  bytecode: {} chars", state.bytecode.len());
    }
    if state.status != Status::Idle {
        println!("  status:   {}", state.status.message());
    }
    if let Some(link) = state.tx_link() {
        println!("  tx:       {}", link);
    }
    if let Some(link) = state.address_link() {
        println!("  contract: {}", link);
    }
}

fn print_help() {
    println!("commands:");
    println!("  network <mainnet|sepolia>   select the target network");
    println!("  switch                      ask the wallet to switch to the target");
    println!("  connect / disconnect        wallet account access");
    println!("  code <hex>                  set the creation bytecode");
    println!("  fill                        load the test bytecode");
    println!("  deploy                      deploy on Sepolia");
    println!("  reset                       clear the form");
    println!("  status                      show session state");
    println!("  quit");
}
