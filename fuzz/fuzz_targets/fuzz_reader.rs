#![no_main]
use geowkt::{Coordinate2D, Coordinate3DM, WktReader, WktWriter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(geometry) = WktReader::<Coordinate2D>::new().read_slice(data) {
        let _ = WktWriter::new().write(&geometry);
    }

    let _ = WktReader::<Coordinate3DM>::new().read_slice(data);
});
