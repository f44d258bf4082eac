use super::Deque;

#[test]
fn fifo_basics() {
    let mut deque: Deque<char> = Deque::new();
    assert!(deque.is_empty());
    assert_eq!(deque.len(), 0);
    assert_eq!(deque.first(), None);
    assert_eq!(deque.last(), None);
    assert_eq!(deque.remove_first(), None);
    assert_eq!(deque.remove_last(), None);

    deque.add_last('a');
    deque.add_last('b');
    deque.add_last('c');
    assert_eq!(deque.len(), 3);
    assert_eq!(deque.first(), Some('a'));
    assert_eq!(deque.last(), Some('c'));
    assert_eq!(deque.get(0), Some('a'));
    assert_eq!(deque.get(1), Some('b'));
    assert_eq!(deque.get(2), Some('c'));
    assert_eq!(deque.get(3), None);

    assert_eq!(deque.remove_first(), Some('a'));
    assert_eq!(deque.remove_first(), Some('b'));
    assert_eq!(deque.remove_first(), Some('c'));
    assert!(deque.is_empty());
}

#[test]
fn stack_from_both_ends() {
    let mut deque: Deque<u32> = Deque::new();
    deque.add_first(1);
    deque.add_first(2);
    deque.add_last(3);
    // Layout is now [2, 1, 3].
    assert_eq!(deque.get(0), Some(2));
    assert_eq!(deque.get(1), Some(1));
    assert_eq!(deque.get(2), Some(3));
    assert_eq!(deque.remove_last(), Some(3));
    assert_eq!(deque.remove_last(), Some(1));
    assert_eq!(deque.remove_last(), Some(2));
    assert_eq!(deque.remove_last(), None);
}

#[test]
fn growth_preserves_order() {
    let mut deque: Deque<usize> = Deque::with_capacity(2);
    for i in 0..100 {
        deque.add_last(i);
    }
    assert_eq!(deque.len(), 100);
    for i in 0..100 {
        assert_eq!(deque.get(i), Some(i));
    }
    for i in 0..100 {
        assert_eq!(deque.remove_first(), Some(i));
    }
    assert!(deque.is_empty());
}

#[test]
fn growth_with_wrapped_head() {
    // Force head > tail before growing so the copy has to stitch the two
    // halves back together.
    let mut deque: Deque<i32> = Deque::with_capacity(4);
    deque.add_last(10);
    deque.add_last(20);
    assert_eq!(deque.remove_first(), Some(10));
    assert_eq!(deque.remove_first(), Some(20));
    for i in 0..10 {
        deque.add_last(i);
    }
    for i in 0..10 {
        assert_eq!(deque.get(i as usize), Some(i));
    }
}

#[test]
fn clear_and_reuse() {
    let mut deque: Deque<char> = Deque::new();
    for c in "hello".chars() {
        deque.add_last(c);
    }
    deque.clear();
    assert!(deque.is_empty());
    deque.add_last('x');
    assert_eq!(deque.remove_first(), Some('x'));
}

#[test]
fn compact_shrinks_and_keeps_contents() {
    let mut deque: Deque<u8> = Deque::new();
    for i in 0..200u8 {
        deque.add_last(i);
    }
    for _ in 0..197 {
        deque.remove_first();
    }
    assert_eq!(deque.len(), 3);
    deque.compact();
    assert_eq!(deque.len(), 3);
    assert_eq!(deque.get(0), Some(197));
    assert_eq!(deque.get(1), Some(198));
    assert_eq!(deque.get(2), Some(199));
    // Still usable after shrinking.
    deque.add_last(200);
    assert_eq!(deque.last(), Some(200));
}

#[test]
fn randomized_against_vecdeque() {
    use std::collections::VecDeque;
    let mut rng = oorandom::Rand32::new(0x1eaf_cafe);
    let mut ours: Deque<u16> = Deque::with_capacity(2);
    let mut reference: VecDeque<u16> = VecDeque::new();
    for step in 0..20_000u32 {
        match rng.rand_range(0..6) {
            0 | 1 => {
                let v = step as u16;
                ours.add_last(v);
                reference.push_back(v);
            }
            2 => {
                let v = step as u16;
                ours.add_first(v);
                reference.push_front(v);
            }
            3 => assert_eq!(ours.remove_first(), reference.pop_front()),
            4 => assert_eq!(ours.remove_last(), reference.pop_back()),
            _ => {
                if !reference.is_empty() {
                    let i = rng.rand_range(0..reference.len() as u32) as usize;
                    assert_eq!(ours.get(i), reference.get(i).copied());
                }
                if step % 777 == 0 {
                    ours.compact();
                }
            }
        }
        assert_eq!(ours.len(), reference.len());
        assert_eq!(ours.first(), reference.front().copied());
        assert_eq!(ours.last(), reference.back().copied());
    }
}
