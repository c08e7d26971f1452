use tileweave_core::{propagate, PropagationQueue, WaveGrid};
use tileweave_rules::{learn, LearnedModel, PatternMask, Tilemap};

fn stripe_learned() -> LearnedModel {
    let image =
        Tilemap::from_rows(&[vec![0, 1, 0, 1], vec![0, 1, 0, 1], vec![0, 1, 0, 1]]).unwrap();
    learn(&[image], 2).unwrap()
}

fn singleton(len: usize, bit: usize) -> PatternMask {
    let mut mask = PatternMask::empty(len);
    mask.set(bit);
    mask
}

// The final wave must not depend on the order cells entered the queue.
#[test]
fn propagation_is_confluent_under_enqueue_order() {
    let learned = stripe_learned();
    let seeds = [(0usize, 0usize), (3, 2), (1, 1)];

    let orders: [Vec<(usize, usize)>; 3] = [
        vec![seeds[0], seeds[1], seeds[2]],
        vec![seeds[2], seeds[0], seeds[1]],
        vec![seeds[1], seeds[2], seeds[0]],
    ];

    let mut results = Vec::new();
    for order in &orders {
        let mut wave = WaveGrid::new(4, 3, learned.num_patterns());
        wave.apply_preset(0, 0, &singleton(2, 0));
        wave.apply_preset(3, 2, &singleton(2, 1));
        wave.apply_preset(1, 1, &singleton(2, 1));

        let mut queue = PropagationQueue::new();
        for &cell in order {
            queue.push(cell);
        }
        propagate(&mut wave, learned.adjacency(), &mut queue).unwrap();
        results.push(wave);
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[test]
fn propagation_never_grows_a_mask() {
    let learned = stripe_learned();
    let mut wave = WaveGrid::new(5, 5, learned.num_patterns());
    wave.apply_preset(2, 2, &singleton(2, 0));

    let before: Vec<usize> = (0..5)
        .flat_map(|y| (0..5).map(move |x| (x, y)))
        .map(|(x, y)| wave.get(x, y).map(PatternMask::count).unwrap_or(0))
        .collect();

    let mut queue = PropagationQueue::new();
    queue.push((2, 2));
    propagate(&mut wave, learned.adjacency(), &mut queue).unwrap();

    let after: Vec<usize> = (0..5)
        .flat_map(|y| (0..5).map(move |x| (x, y)))
        .map(|(x, y)| wave.get(x, y).map(PatternMask::count).unwrap_or(0))
        .collect();

    for (b, a) in before.iter().zip(&after) {
        assert!(a <= b, "a mask grew during propagation");
    }
}

// Once a cell is forced, propagating again from anywhere changes nothing.
#[test]
fn propagation_is_idempotent() {
    let learned = stripe_learned();
    let mut wave = WaveGrid::new(4, 2, learned.num_patterns());
    wave.apply_preset(0, 0, &singleton(2, 0));

    let mut queue = PropagationQueue::new();
    queue.push((0, 0));
    propagate(&mut wave, learned.adjacency(), &mut queue).unwrap();
    let settled = wave.clone();

    let mut queue = PropagationQueue::new();
    for y in 0..2 {
        for x in 0..4 {
            queue.push((x, y));
        }
    }
    propagate(&mut wave, learned.adjacency(), &mut queue).unwrap();
    assert_eq!(wave, settled);
}
