/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, trace};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{RenderCommand, StatusUpdate, Tone};

/***************************************/
/*             Public API              */
/***************************************/
/// Consumes the controller's render, status and sound channels and logs
/// them. Stands in for the canvas, status panel and beeper of a GUI
/// toolkit; per-tick drawing traffic stays at trace level so a normal log
/// level shows only the readout changes and the cues.
///
/// Returns when the controller hangs up.
pub fn run(
    render_rx: cbc::Receiver<RenderCommand>,
    status_rx: cbc::Receiver<StatusUpdate>,
    sound_rx: cbc::Receiver<Tone>,
) {
    let mut last_status: Option<StatusUpdate> = None;

    loop {
        cbc::select! {
            recv(render_rx) -> msg => {
                match msg {
                    Ok(RenderCommand::CarPosition(row)) => trace!("car row {}", row),
                    Ok(RenderCommand::DoorGap { left, right }) => {
                        trace!("door leaves at {} / {}", left, right)
                    }
                    Ok(RenderCommand::CallLight { floor, on }) => {
                        info!("call light {} {}", floor, if on { "on" } else { "off" })
                    }
                    Err(_) => return,
                }
            }
            recv(status_rx) -> msg => {
                match msg {
                    Ok(status) => {
                        if last_status != Some(status) {
                            info!("[{} {}]", status.floor, status.direction.glyph());
                            last_status = Some(status);
                        }
                    }
                    Err(_) => return,
                }
            }
            recv(sound_rx) -> msg => {
                match msg {
                    Ok(tone) => info!("tone {} Hz for {} ms", tone.freq_hz, tone.duration_ms),
                    Err(_) => return,
                }
            }
        }
    }
}
