//! Property tests: random interleavings of allocations and strings.

use pouch::prelude::*;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Alloc(usize),
    Text(Vec<u8>),
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0usize..24).prop_map(Step::Alloc),
        4 => proptest::collection::vec(1u8..=255, 0..20).prop_map(Step::Text),
        1 => Just(Step::Reset),
    ]
}

proptest! {
    #[test]
    fn live_contents_survive_later_allocations(
        capacity in 1usize..256,
        steps in proptest::collection::vec(step(), 0..40),
    ) {
        let mut arena = FixedArena::new(capacity);
        let mut blocks: Vec<(Block, u8)> = Vec::new();
        let mut strings: Vec<(StringHandle, Vec<u8>)> = Vec::new();

        for (i, s) in steps.into_iter().enumerate() {
            let tag = i as u8;
            match s {
                Step::Alloc(n) => {
                    if let Ok(b) = arena.alloc(n) {
                        arena.bytes_mut(&b).unwrap().fill(tag);
                        blocks.push((b, tag));
                    }
                }
                Step::Text(text) => {
                    let mut sb = arena.start_string();
                    sb.push_bytes(&text);
                    if let Ok(h) = sb.finalize() {
                        strings.push((h, text));
                    }
                }
                Step::Reset => {
                    arena.reset();
                    blocks.clear();
                    strings.clear();
                }
            }
            prop_assert!(arena.size() <= arena.capacity());
            prop_assert!(arena.peak() >= arena.size());
        }

        for (b, tag) in &blocks {
            prop_assert!(arena.bytes(b).unwrap().iter().all(|x| x == tag));
        }
        for (h, text) in &strings {
            prop_assert_eq!(arena.string(h).unwrap(), text.as_slice());
            prop_assert_eq!(*arena.string_with_nul(h).unwrap().last().unwrap(), 0);
        }
    }
}
