//! Buffers a stream of sensor readings and answers questions about them
//! without materializing intermediate collections.
//!
//! Readings arrive one at a time and are appended to a [`ChunkedBuffer`].
//! Queries then run as traversals: each one pushes values into a closure and
//! stops as soon as the answer is known.
//!
//! Run with
//!
//! ```bash
//! cargo run -p spinebuf --example quantifiers
//! ```

use std::convert::Infallible;

use spinebuf::{ChunkedBuffer, Duplex, Status, Traverser};

/// Deterministic readings in tenths of a degree.
fn readings() -> impl Iterator<Item = i32> {
    (0..500).map(|tick: i32| 180 + (tick * 37 % 101) - 50)
}

fn main() -> Result<(), &'static str> {
    let mut buffer = ChunkedBuffer::with_capacity(64);
    for reading in readings() {
        buffer.insert(reading);
    }
    println!("buffered {} readings", buffer.count());

    let freezing = buffer.traverser().any_match(|v| **v <= 0);
    let plausible = buffer.traverser().all_match(|v| (-400..=600).contains(*v));
    println!("any freezing: {freezing}, all plausible: {plausible}");

    // Find the first reading above 22.0 degrees and remember where it was.
    let mut cursor = buffer.traverser();
    let status = cursor.while_next(|control, value| {
        if *value > 220 {
            control.exit();
        }
        Ok::<_, Infallible>(())
    });
    match status {
        Ok(Status::Exited) => println!("first warm reading at tick {}", cursor.position() - 1),
        Ok(_) => println!("never warm"),
    }

    // Walk back from there to the previous reading below 15.0 degrees.
    let mut steps = 0;
    let found = cursor.while_prev(|control, value| {
        steps += 1;
        if *value < 150 {
            control.exit();
        }
        Ok::<_, Infallible>(())
    });
    println!("cold reading found {steps} ticks back: {found:?}");

    // A consumer error aborts the traversal and surfaces to the caller.
    let checked = buffer.traverser().for_next(|value| {
        if *value > 1_000 {
            return Err("sensor overflow");
        }
        Ok(())
    });
    checked?;

    let mut snapshot = vec![0; buffer.count()];
    buffer
        .copy_to(&mut snapshot, 0)
        .map_err(|_| "snapshot buffer too small")?;
    println!("mean reading: {}", snapshot.iter().sum::<i32>() / 500);
    Ok(())
}
