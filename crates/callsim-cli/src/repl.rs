//! Interactive console loop.
//!
//! Lines are read on a dedicated thread (rustyline blocks) and handed to
//! the async loop over a channel. Backend-bound commands run as spawned
//! tasks so `stop` can cancel a launch that is still waiting on the server.

use std::thread;

use anyhow::{Context, Result};
use callsim_core::ControllerError;
use callsim_runtime::CallerController;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::bootstrap::CliContext;
use crate::commands::{ReplCommand, help_text};
use crate::presentation::{format_phone, format_scenarios, format_voices};

const PROMPT: &str = "callsim> ";

enum Input {
    Line(String),
    Closed,
}

/// Run the console until `quit`, Ctrl-C or end of input.
///
/// On exit the caller is stopped if it is loaded, then every background
/// task is cancelled.
pub async fn run(ctx: CliContext) -> Result<()> {
    ctx.controller.start().await;
    println!("Type 'help' for a list of commands.");

    let mut input = spawn_reader()?;
    while let Some(event) = input.recv().await {
        let Input::Line(line) = event else { break };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ReplCommand>() {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => dispatch(&ctx, command),
            Err(e) => println!("{e}"),
        }
    }

    if ctx.controller.lifecycle().is_active() {
        println!("Stopping caller...");
        ctx.controller.stop_or_cancel().await;
    }
    ctx.controller.shutdown();
    Ok(())
}

fn spawn_reader() -> Result<mpsc::UnboundedReceiver<Input>> {
    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    let (tx, rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("callsim-readline".to_string())
        .spawn(move || {
            loop {
                match editor.readline(PROMPT) {
                    Ok(line) => {
                        if let Err(e) = editor.add_history_entry(line.as_str()) {
                            debug!(error = %e, "History entry dropped");
                        }
                        if tx.send(Input::Line(line)).is_err() {
                            break;
                        }
                    }
                    Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                        let _ = tx.send(Input::Closed);
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Console input failed");
                        let _ = tx.send(Input::Closed);
                        break;
                    }
                }
            }
        })
        .context("Failed to start console input thread")?;

    Ok(rx)
}

fn dispatch(ctx: &CliContext, command: ReplCommand) {
    let controller = &ctx.controller;
    match command {
        ReplCommand::Scenarios => {
            let selection = controller.selection();
            let catalog = controller.catalog();
            println!(
                "{}",
                format_scenarios(catalog.scenarios(), selection.scenario.as_deref())
            );
        }
        ReplCommand::Scenario(id) => {
            if controller.catalog().scenario_label(&id).is_none() {
                println!("Unknown scenario '{id}'. Type 'scenarios' to list them.");
                return;
            }
            controller.select_scenario(id);
        }
        ReplCommand::Gender(gender) => controller.set_gender(gender),
        ReplCommand::Voices => print_voices(ctx),
        ReplCommand::Voice(id) => {
            let gender = controller.selection().gender;
            if !controller.catalog().has_voice(gender, &id) {
                println!("Unknown {gender} voice '{id}'. Type 'voices' to list them.");
                return;
            }
            controller.select_voice(id);
        }
        ReplCommand::Reload => spawn_action(controller, "reload", |c| async move {
            c.load_options().await
        }),
        ReplCommand::Load => {
            spawn_action(controller, "load", |c| async move { c.launch().await });
        }
        ReplCommand::Call => spawn_action(controller, "call", |c| async move {
            c.press_call_button().await
        }),
        ReplCommand::Stop => spawn_action(controller, "stop", |c| async move {
            c.stop_or_cancel().await;
            Ok(())
        }),
        ReplCommand::Logs => {
            let logs = ctx.view.snapshot().logs;
            if logs.is_empty() {
                println!("(no logs yet)");
            } else {
                println!("{logs}");
            }
        }
        ReplCommand::Status => print_status(ctx),
        ReplCommand::Help => println!("{}", help_text()),
        // Handled by the loop before dispatch.
        ReplCommand::Quit => {}
    }
}

fn spawn_action<F, Fut>(controller: &CallerController, name: &'static str, action: F)
where
    F: FnOnce(CallerController) -> Fut,
    Fut: Future<Output = Result<(), ControllerError>> + Send + 'static,
{
    let fut = action(controller.clone());
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            report(name, &e);
        }
    });
}

/// Print errors the view has not already shown.
fn report(command: &str, error: &ControllerError) {
    match error {
        // Already alerted by the controller.
        ControllerError::Validation(_) | ControllerError::LaunchRejected { .. } => {
            debug!(command, error = %error, "Command failed");
        }
        ControllerError::Backend(_) if command == "load" || command == "reload" => {
            debug!(command, error = %error, "Command failed");
        }
        _ => println!("[error] {error}"),
    }
}

fn print_voices(ctx: &CliContext) {
    let selection = ctx.controller.selection();
    match ctx.view.snapshot().voices {
        Some(voices) => println!("{}", format_voices(&voices, selection.voice.as_deref())),
        None => println!("  (options not loaded)"),
    }
}

fn print_status(ctx: &CliContext) {
    let controller = &ctx.controller;
    let snapshot = ctx.view.snapshot();
    let selection = controller.selection();
    let catalog = controller.catalog();

    if let Some(phone) = snapshot.live_phone() {
        println!("{}", format_phone(&phone, &snapshot.clock));
    }
    println!("  caller:   {}", controller.lifecycle());
    println!("  button:   {}", controller.launch_button().label);
    println!(
        "  scenario: {}",
        selection
            .scenario
            .as_deref()
            .and_then(|id| catalog.scenario_label(id))
            .unwrap_or("(none)")
    );
    println!("  gender:   {}", selection.gender);
    println!(
        "  voice:    {}",
        selection.voice.as_deref().unwrap_or("(none)")
    );
}
