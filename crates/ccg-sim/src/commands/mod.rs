pub mod generate;
pub mod inspect;
pub mod render;

use std::error::Error;
use std::io::Write;

use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let bytes = ccg_scene::serde::to_canonical_json_bytes(value)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    writeln!(stdout)?;
    Ok(())
}
