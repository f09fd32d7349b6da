/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::queue::RequestQueue;
use crate::car::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::config::Config;
use crate::shared::{Command, Direction, Floor, RenderCommand, StatusUpdate, Tone};

/**
 * Manages the single elevator car.
 *
 * The `ElevatorController` owns the car's position, door state and request
 * queue, and sequences movement, door opening, door closing and the
 * auto-close timeout into a cooperative state machine. It is driven by two
 * kinds of events: commands from the panels and timer expirations from the
 * scheduler. All state mutations happen on the controller thread.
 *
 * # Fields
 * - `command_rx`:      Receives panel commands (floor requests, door buttons).
 * - `terminate_rx`:    Receives the shutdown signal.
 * - `render_tx`:       Sends drawing instructions to the canvas.
 * - `status_tx`:       Sends floor/direction readouts to the status panel.
 * - `sound_tx`:        Sends tone requests.
 * - `current_floor`:   Floor the car last settled at.
 * - `car_row`:         Continuous top pixel row of the car in the shaft.
 * - `door_gap`:        Pixel gap between the door leaves, 0 when closed.
 * - `door_open`:       True from open-completion until close-completion.
 * - `is_busy`:         True while any stepper is in flight.
 * - `queue`:           Outstanding floor requests, FIFO, deduplicated.
 * - `call_active`:     Per-floor external call light state.
 * - `stepper`:         The one animation allowed to be in flight.
 * - `auto_close`:      Handle of the pending auto-close timer, if armed.
 */
pub struct ElevatorController {
    // Command channels
    command_rx: cbc::Receiver<Command>,
    terminate_rx: cbc::Receiver<()>,

    // Collaborator channels
    render_tx: cbc::Sender<RenderCommand>,
    status_tx: cbc::Sender<StatusUpdate>,
    sound_tx: cbc::Sender<Tone>,

    // Configuration
    n_floors: u8,
    floor_height: i32,
    car_width: i32,
    shaft_width: i32,
    travel_tick_ms: u64,
    door_tick_ms: u64,
    auto_close_ms: u64,

    // Car state
    current_floor: Floor,
    car_row: i32,
    door_gap: i32,
    door_open: bool,
    is_busy: bool,
    queue: RequestQueue,
    call_active: Vec<bool>,
    stepper: Option<Stepper>,
    auto_close: Option<TimerHandle>,
}

enum Stepper {
    Move {
        target: Floor,
        target_row: i32,
        step: i32,
    },
    OpenDoors {
        resume_dispatch: bool,
    },
    CloseDoors,
}

impl ElevatorController {
    pub fn new(
        config: &Config,
        command_rx: cbc::Receiver<Command>,
        terminate_rx: cbc::Receiver<()>,
        render_tx: cbc::Sender<RenderCommand>,
        status_tx: cbc::Sender<StatusUpdate>,
        sound_tx: cbc::Sender<Tone>,
    ) -> ElevatorController {
        let n_floors = config.elevator.n_floors;
        let floor_height = config.shaft.floor_height;

        ElevatorController {
            command_rx,
            terminate_rx,
            render_tx,
            status_tx,
            sound_tx,
            n_floors,
            floor_height,
            car_width: config.shaft.car_width,
            shaft_width: config.shaft.shaft_width,
            travel_tick_ms: config.animation.travel_tick_ms,
            door_tick_ms: config.animation.door_tick_ms,
            auto_close_ms: config.elevator.auto_close_ms,
            current_floor: 1,
            car_row: (n_floors as i32 - 1) * floor_height,
            door_gap: 0,
            door_open: false,
            is_busy: false,
            queue: RequestQueue::new(),
            call_active: vec![false; n_floors as usize],
            stepper: None,
            auto_close: None,
        }
    }

    pub fn run(mut self) {
        let started = Instant::now();
        let mut scheduler = Scheduler::new();

        // Initial paint
        self.emit_render(RenderCommand::CarPosition(self.car_row));
        self.emit_door_gap();
        let _ = self.status_tx.send(StatusUpdate {
            floor: self.current_floor,
            direction: Direction::Stop,
        });

        // Main loop
        loop {
            let timer_rx = match scheduler.next_deadline() {
                Some(deadline) => {
                    let now = started.elapsed().as_millis() as u64;
                    cbc::after(Duration::from_millis(deadline.saturating_sub(now)))
                }
                None => cbc::never(),
            };

            cbc::select! {
                recv(self.command_rx) -> msg => {
                    match msg {
                        Ok(command) => self.handle_command(command, &mut scheduler),
                        Err(_) => return,
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    return;
                }
                recv(timer_rx) -> _ => {
                    let now = started.elapsed().as_millis() as u64;
                    for event in scheduler.advance_to(now) {
                        self.handle_timer(event, &mut scheduler);
                    }
                }
            }
        }
    }

    pub fn handle_command(&mut self, command: Command, scheduler: &mut Scheduler) {
        match command {
            Command::RequestFloor(floor) => self.request_floor(floor, scheduler),
            Command::ExternalCall(floor) => self.external_call(floor, scheduler),
            Command::OpenDoors => self.open_button(scheduler),
            Command::CloseDoors => self.close_button(scheduler),
        }
    }

    pub fn handle_timer(&mut self, event: TimerEvent, scheduler: &mut Scheduler) {
        match event {
            TimerEvent::Tick => match self.stepper.take() {
                Some(Stepper::Move {
                    target,
                    target_row,
                    step,
                }) => self.step_move(target, target_row, step, scheduler),
                Some(Stepper::OpenDoors { resume_dispatch }) => {
                    self.step_doors_open(resume_dispatch, scheduler)
                }
                Some(Stepper::CloseDoors) => self.step_doors_close(scheduler),
                None => {}
            },
            TimerEvent::AutoClose => {
                self.auto_close = None;
                if self.door_open && !self.is_busy {
                    debug!("auto-close timeout at floor {}", self.current_floor);
                    self.close_doors(scheduler);
                }
            }
        }
    }

    /// Queues a floor selected on the internal panel and runs the dispatch
    /// pass. A floor that is already queued is a no-op.
    pub fn request_floor(&mut self, floor: Floor, scheduler: &mut Scheduler) {
        if !self.queue.push(floor) {
            info!("floor {} already queued", floor);
            return;
        }
        debug!("queued floor {}", floor);
        self.process_queue(scheduler);
    }

    /// Landing call: lights the floor's call button, then queues the floor.
    /// The light goes out when the car's doors finish opening there.
    pub fn external_call(&mut self, floor: Floor, scheduler: &mut Scheduler) {
        let slot = &mut self.call_active[floor as usize - 1];
        if !*slot {
            *slot = true;
            self.emit_render(RenderCommand::CallLight { floor, on: true });
        }
        self.request_floor(floor, scheduler);
    }

    pub fn open_button(&mut self, scheduler: &mut Scheduler) {
        if self.door_open && !self.is_busy {
            // Car is settled with the doors open: extend the idle window.
            if let Some(handle) = self.auto_close.take() {
                scheduler.cancel(handle);
            }
            self.auto_close = Some(scheduler.after(self.auto_close_ms, TimerEvent::AutoClose));
            info!("doors held open at floor {}", self.current_floor);
            return;
        }
        if self.is_busy {
            warn!("open button rejected while the car is busy");
            return;
        }
        self.open_doors(false, scheduler);
    }

    pub fn close_button(&mut self, scheduler: &mut Scheduler) {
        if !self.door_open {
            info!("close button ignored, doors are not open");
            return;
        }
        if self.is_busy {
            warn!("close button rejected while the doors are in motion");
            return;
        }
        self.close_doors(scheduler);
    }

    /// Dispatch pass: decides the next atomic action from the queue head and
    /// the car state. Safe to call at any time; returns immediately while a
    /// stepper is in flight or when nothing is queued.
    fn process_queue(&mut self, scheduler: &mut Scheduler) {
        loop {
            if self.is_busy {
                return;
            }
            let target = match self.queue.front() {
                Some(floor) => floor,
                None => return,
            };

            if target == self.current_floor {
                if !self.door_open {
                    self.open_doors(true, scheduler);
                    return;
                }
                // Head was served while the doors were open; drop it and
                // look again.
                debug!("floor {} already served, dropping stale request", target);
                self.queue.pop_front();
                continue;
            }

            if self.door_open {
                // The car never moves with the doors ajar.
                self.close_doors(scheduler);
                return;
            }

            self.begin_move(target, scheduler);
            return;
        }
    }

    fn begin_move(&mut self, target: Floor, scheduler: &mut Scheduler) {
        let target_row = self.row_for_floor(target);
        let step = if target_row > self.car_row { 1 } else { -1 };

        self.is_busy = true;
        info!(
            "departing floor {} for floor {}",
            self.current_floor, target
        );
        let _ = self.sound_tx.send(Tone::DEPARTURE);
        let _ = self.status_tx.send(StatusUpdate {
            floor: self.current_floor,
            direction: direction_of(step),
        });

        self.stepper = Some(Stepper::Move {
            target,
            target_row,
            step,
        });
        scheduler.after(self.travel_tick_ms, TimerEvent::Tick);
    }

    fn step_move(&mut self, target: Floor, target_row: i32, step: i32, scheduler: &mut Scheduler) {
        self.car_row += step;
        self.emit_render(RenderCommand::CarPosition(self.car_row));

        if self.car_row != target_row {
            let _ = self.status_tx.send(StatusUpdate {
                floor: self.nearest_floor(self.car_row),
                direction: direction_of(step),
            });
            self.stepper = Some(Stepper::Move {
                target,
                target_row,
                step,
            });
            scheduler.after(self.travel_tick_ms, TimerEvent::Tick);
            return;
        }

        self.current_floor = target;
        info!("arrived at floor {}", target);
        let _ = self.sound_tx.send(Tone::ARRIVAL);
        let _ = self.status_tx.send(StatusUpdate {
            floor: target,
            direction: Direction::Stop,
        });

        // Arrival and door opening are one continuous busy span.
        self.open_doors(false, scheduler);
    }

    fn open_doors(&mut self, resume_dispatch: bool, scheduler: &mut Scheduler) {
        self.is_busy = true;
        self.stepper = Some(Stepper::OpenDoors { resume_dispatch });
        scheduler.after(self.door_tick_ms, TimerEvent::Tick);
    }

    fn step_doors_open(&mut self, resume_dispatch: bool, scheduler: &mut Scheduler) {
        self.door_gap += 2;
        self.emit_door_gap();

        if self.door_gap < self.open_gap() {
            self.stepper = Some(Stepper::OpenDoors { resume_dispatch });
            scheduler.after(self.door_tick_ms, TimerEvent::Tick);
            return;
        }

        // Fully open: the queue head is now served.
        self.door_open = true;
        self.is_busy = false;
        self.clear_call_light(self.current_floor);
        if self.queue.front() == Some(self.current_floor) {
            self.queue.pop_front();
            debug!("served floor {}", self.current_floor);
        }
        self.auto_close = Some(scheduler.after(self.auto_close_ms, TimerEvent::AutoClose));

        if resume_dispatch {
            self.process_queue(scheduler);
        }
    }

    /// Starts the door-close stepper, cancelling any pending auto-close.
    /// Idempotent: with the doors already closed it falls straight through
    /// to the dispatch pass.
    fn close_doors(&mut self, scheduler: &mut Scheduler) {
        if !self.door_open {
            self.process_queue(scheduler);
            return;
        }
        if let Some(handle) = self.auto_close.take() {
            scheduler.cancel(handle);
        }
        self.is_busy = true;
        self.stepper = Some(Stepper::CloseDoors);
        scheduler.after(self.door_tick_ms, TimerEvent::Tick);
    }

    fn step_doors_close(&mut self, scheduler: &mut Scheduler) {
        self.door_gap = (self.door_gap - 2).max(0);
        self.emit_door_gap();

        if self.door_gap > 0 {
            self.stepper = Some(Stepper::CloseDoors);
            scheduler.after(self.door_tick_ms, TimerEvent::Tick);
            return;
        }

        self.door_open = false;
        self.is_busy = false;
        self.process_queue(scheduler);
    }

    // Geometry: rows grow downward, so the top floor sits at row 0 and
    // floor 1 at the bottom of the canvas.
    fn row_for_floor(&self, floor: Floor) -> i32 {
        (self.n_floors as i32 - floor as i32) * self.floor_height
    }

    fn nearest_floor(&self, row: i32) -> Floor {
        let estimate =
            self.n_floors as i32 - (row + self.floor_height / 2).div_euclid(self.floor_height);
        estimate.clamp(1, self.n_floors as i32) as Floor
    }

    fn open_gap(&self) -> i32 {
        self.car_width * 4 / 5
    }

    fn clear_call_light(&mut self, floor: Floor) {
        let slot = &mut self.call_active[floor as usize - 1];
        if *slot {
            *slot = false;
            self.emit_render(RenderCommand::CallLight { floor, on: false });
        }
    }

    fn emit_door_gap(&self) {
        let center = self.shaft_width / 2;
        self.emit_render(RenderCommand::DoorGap {
            left: center - self.door_gap / 2,
            right: center + self.door_gap / 2,
        });
    }

    fn emit_render(&self, command: RenderCommand) {
        let _ = self.render_tx.send(command);
    }

    // State accessors, used by the front-end and the tests.
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn door_open(&self) -> bool {
        self.door_open
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queued(&self, floor: Floor) -> bool {
        self.queue.contains(floor)
    }
}

fn direction_of(step: i32) -> Direction {
    if step < 0 {
        Direction::Up
    } else {
        Direction::Down
    }
}
