#![no_main]
use std::convert::Infallible;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spinebuf::{BufferError, BufferOptions, ChunkedBuffer, Cursor, Duplex, Status, Traverser};

#[derive(Debug, Arbitrary)]
enum Op {
    Insert(u32),
    InsertSlice(Vec<u32>),
    InsertRun { start: u32, len: u8 },
    Clear,
    Probe(usize),
    CopyTo { slack: u8, offset: u8 },
    ExitAt(u16),
    Window { lo: u16, hi: u16, p0: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    initial_capacity: u16,
    ops: Vec<Op>,
}

fn run(input: Input) {
    let mut buffer = ChunkedBuffer::with_options(BufferOptions {
        initial_capacity: usize::from(input.initial_capacity),
    });
    let mut model: Vec<u32> = Vec::new();

    for op in input.ops {
        let before = buffer.chunk_addresses();
        let mut cleared = false;

        match op {
            Op::Insert(value) => {
                buffer.insert(value);
                model.push(value);
            }
            Op::InsertSlice(values) => {
                buffer.insert_slice(&values);
                model.extend_from_slice(&values);
            }
            Op::InsertRun { start, len } => {
                let run = (0..u32::from(len)).map(|n| start.wrapping_add(n));
                buffer.insert_iter(run.clone());
                model.extend(run);
            }
            Op::Clear => {
                buffer.clear();
                model.clear();
                cleared = true;
            }
            Op::Probe(index) => match model.get(index) {
                Some(expected) => assert_eq!(buffer.at(index), Ok(expected)),
                None => assert_eq!(
                    buffer.at(index),
                    Err(BufferError::IndexOutOfBounds {
                        index,
                        count: model.len()
                    })
                ),
            },
            Op::CopyTo { slack, offset } => {
                let offset = usize::from(offset);
                let mut dst = vec![u32::MAX; model.len() + usize::from(slack)];
                match buffer.copy_to(&mut dst, offset) {
                    Ok(()) => assert_eq!(dst[offset..offset + model.len()], model[..]),
                    Err(_) => {
                        assert!(offset + model.len() > dst.len());
                        assert!(dst.iter().all(|v| *v == u32::MAX));
                    }
                }
            }
            Op::ExitAt(k) => {
                let k = usize::from(k);
                let mut traverser = buffer.traverser();
                let mut seen = 0;
                let status = traverser.while_next(|control, _| {
                    if seen == k {
                        control.exit();
                    }
                    seen += 1;
                    Ok::<_, Infallible>(())
                });
                let expected = if model.is_empty() {
                    Status::Init
                } else if k < model.len() {
                    Status::Exited
                } else {
                    Status::Completed
                };
                assert_eq!(status, Ok(expected));
                assert_eq!(traverser.position(), seen);
            }
            Op::Window { lo, hi, p0 } => {
                let (lo, hi, p0) = (usize::from(lo), usize::from(hi), usize::from(p0));
                match Cursor::window(&buffer, lo, hi, p0) {
                    Ok(mut cursor) => {
                        let mut backward = Vec::new();
                        let Ok(()) = cursor.for_prev(|v| {
                            backward.push(*v);
                            Ok::<_, Infallible>(())
                        });
                        backward.reverse();
                        assert!(cursor.reset());
                        let forward: Vec<u32> = cursor.cloned().iter().collect();
                        assert_eq!(backward, model[lo..p0]);
                        assert_eq!(forward, model[p0..hi]);
                    }
                    Err(_) => assert!(!(lo <= p0 && p0 <= hi && hi <= model.len())),
                }
            }
        }

        let after = buffer.chunk_addresses();
        if !cleared {
            assert!(after.len() >= before.len());
            assert_eq!(after[..before.len()], before[..]);
        }
        assert_eq!(buffer.count(), model.len());
    }

    assert!(buffer.iter().eq(model.iter()));
    let layout = buffer.debug_layout();
    assert!(layout.iter().all(|(_, len, capacity)| len <= capacity));
    assert_eq!(layout.iter().map(|(_, len, _)| len).sum::<usize>(), model.len());
}

fuzz_target!(|input: Input| run(input));
