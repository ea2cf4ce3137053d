//! Arrow IPC stream encoding.

use std::io::Cursor;

use arrow::array::RecordBatch;
use arrow::datatypes::Schema;
use arrow::ipc::reader::StreamReader;
use arrow::ipc::writer::StreamWriter;

use super::batches::BatchSet;
use crate::error::Result;

/// Read an Arrow IPC stream into a [`BatchSet`].
///
/// # Errors
///
/// Returns an Arrow error for malformed streams.
pub fn read_ipc_stream(bytes: &[u8]) -> Result<BatchSet> {
    let reader = StreamReader::try_new(Cursor::new(bytes), None)?;
    let schema = reader.schema();
    let batches = reader.collect::<std::result::Result<Vec<RecordBatch>, _>>()?;
    BatchSet::new(batches, schema)
}

/// Write record batches as an Arrow IPC stream.
///
/// # Errors
///
/// Returns an Arrow error if a batch does not match the schema.
pub fn write_ipc_stream(schema: &Schema, batches: &[RecordBatch]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = StreamWriter::try_new(&mut buffer, schema)?;
        for batch in batches {
            writer.write(batch)?;
        }
        writer.finish()?;
    }
    Ok(buffer)
}
