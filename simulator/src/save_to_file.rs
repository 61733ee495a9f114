use scinti_pulses::{SimulatedTrace, Stage};
use std::{
    fs::File,
    io::{BufWriter, Error, Write},
    path::Path,
};
use strum::IntoEnumIterator;

pub(crate) trait SaveToFile {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), Error>;

    fn save_to_file(&self, path: &Path) -> Result<(), Error> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        file.flush()
    }
}

/// One row per sample, `time,v0,...,v8`.
impl SaveToFile for SimulatedTrace {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        write!(writer, "time")?;
        for stage in Stage::iter() {
            write!(writer, ",{stage}")?;
        }
        writeln!(writer)?;

        for (index, time) in self.grid.iter().enumerate() {
            write!(writer, "{time:e}")?;
            for stage in Stage::iter() {
                let value = self.get(stage).get(index).copied().unwrap_or_default();
                write!(writer, ",{value:e}")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
