use std::io::{BufRead, Write};

use color_eyre::Result;
use jotter_core::TaskStore;
use jotter_engine::Engine;
use tracing::{debug, warn};

use crate::ui;

/// Reads lines until `bye` or end of input, writing one reply block per command.
///
/// Input is decoded lossily, so a stray non-UTF-8 byte becomes an unknown
/// command instead of ending the session. A failed read ends it like EOF.
pub fn run<S, R, W>(engine: &mut Engine<S>, mut input: R, output: &mut W) -> Result<()>
where
    S: TaskStore,
    R: BufRead,
    W: Write,
{
    output.write_all(ui::welcome().as_bytes())?;
    output.flush()?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "failed to read input");
                break;
            }
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = engine.execute(line);
        output.write_all(ui::render(&response.reply).as_bytes())?;
        output.flush()?;
        if response.should_exit {
            return Ok(());
        }
    }

    debug!("end of input");
    output.write_all(ui::goodbye().as_bytes())?;
    output.flush()?;
    Ok(())
}
