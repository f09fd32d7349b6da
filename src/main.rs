/* 3rd party libraries */
use clap::Arg;
use clap::Command as ClapCommand;
use crossbeam_channel as cbc;
use log::error;
use std::thread::Builder;

/* Custom libraries */
use shared::Command;
use shared::RenderCommand;
use shared::StatusUpdate;
use shared::Tone;

/* Modules */
mod car;
mod config;
mod shared;
mod ui;

/* Main */
fn main() {
    env_logger::init();

    let matches = ClapCommand::new("elevator-sim")
        .about("Single-car elevator simulator")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = crate::unwrap_or_exit!(config::load_config(config_path));
    let n_floors = config.elevator.n_floors;

    // Initialize channels
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let (render_tx, render_rx) = cbc::unbounded::<RenderCommand>();
    let (status_tx, status_rx) = cbc::unbounded::<StatusUpdate>();
    let (sound_tx, sound_rx) = cbc::unbounded::<Tone>();

    // Start the controller module
    let controller = car::ElevatorController::new(
        &config,
        command_rx,
        terminate_rx,
        render_tx,
        status_tx,
        sound_tx,
    );
    let controller_thread = Builder::new().name("controller".into());
    let controller_handle = controller_thread
        .spawn(move || controller.run())
        .unwrap();

    // Start the display module
    let display_thread = Builder::new().name("display".into());
    let display_handle = display_thread
        .spawn(move || ui::display::run(render_rx, status_rx, sound_rx))
        .unwrap();

    // Start the panel module; it owns stdin and signals termination
    let panel_thread = Builder::new().name("panel".into());
    let panel_handle = panel_thread
        .spawn(move || ui::panel::run(n_floors, command_tx, terminate_tx))
        .unwrap();

    panel_handle.join().unwrap();
    controller_handle.join().unwrap();
    // The controller's senders are gone now, so the display drains and exits
    display_handle.join().unwrap();
}
