/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::warn;
use std::io::BufRead;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Command, Floor};

/***************************************/
/*             Public API              */
/***************************************/
/// One parsed line of panel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    Car(Command),
    Quit,
}

/// Reads panel input from stdin and forwards it to the controller.
///
/// Grammar: a bare integer selects a floor on the internal panel, `call <n>`
/// presses the landing button on floor `n`, `open`/`close` press the door
/// buttons, `quit` shuts the simulator down. Bad input is logged and
/// dropped.
pub fn run(n_floors: u8, command_tx: cbc::Sender<Command>, terminate_tx: cbc::Sender<()>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line, n_floors) {
            Ok(PanelInput::Car(command)) => {
                if command_tx.send(command).is_err() {
                    break;
                }
            }
            Ok(PanelInput::Quit) => break,
            Err(reason) => warn!("ignoring input: {}", reason),
        }
    }
    let _ = terminate_tx.send(());
}

pub fn parse_line(line: &str, n_floors: u8) -> Result<PanelInput, String> {
    let mut words = line.split_whitespace();
    let head = match words.next() {
        Some(word) => word,
        None => return Err("empty line".to_string()),
    };

    let input = match head {
        "open" | "o" => PanelInput::Car(Command::OpenDoors),
        "close" | "c" => PanelInput::Car(Command::CloseDoors),
        "quit" | "q" => PanelInput::Quit,
        "call" => {
            let word = words.next().ok_or("call needs a floor number")?;
            PanelInput::Car(Command::ExternalCall(parse_floor(word, n_floors)?))
        }
        word => PanelInput::Car(Command::RequestFloor(parse_floor(word, n_floors)?)),
    };

    if words.next().is_some() {
        return Err(format!("trailing input after '{}'", head));
    }
    Ok(input)
}

fn parse_floor(word: &str, n_floors: u8) -> Result<Floor, String> {
    let floor: Floor = word
        .parse()
        .map_err(|_| format!("not a floor number: '{}'", word))?;
    if floor < 1 || floor > n_floors {
        return Err(format!("floor {} is outside 1..={}", floor, n_floors));
    }
    Ok(floor)
}
