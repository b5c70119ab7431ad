//! Concrete end-to-end scenarios

mod common;

use common::{dotted_children, probed};
use lazyseq::{HybridQueue, Seq, SortOrder, TraversalConfig};
use test_case::test_case;

#[test]
fn fibonacci_from_pair_seed() {
    let fib = Seq::from_vec(vec![0, 1]).extend_with_pairs(|a, b| Some(a + b));
    assert_eq!(fib.first(8).to_vec(), vec![0, 1, 1, 2, 3, 5, 8, 13]);
}

#[test_case(vec![1, 1, 1, 2, 1, 1], vec![1, 1, 1] ; "stops at first mismatch")]
#[test_case(vec![2, 1, 1], vec![] ; "first item fails")]
#[test_case(vec![1, 1], vec![1, 1] ; "never fails")]
#[test_case(vec![], vec![] ; "empty input")]
fn as_long_as_ones(input: Vec<i32>, expected: Vec<i32>) {
    let seq = Seq::from_vec(input).as_long_as(|x| *x == 1);
    assert_eq!(seq.to_vec(), expected);
}

#[test]
fn breadth_first_dotted_labels() {
    let seq = Seq::once("1".to_string())
        .breadth_first(|label: &String| dotted_children(label, 4))
        .first(7);
    assert_eq!(
        seq.to_vec(),
        vec!["1", "1.1", "1.2", "1.1.1", "1.1.2", "1.2.1", "1.2.2"]
    );
}

#[test]
fn queue_seed_then_appends() {
    let queue = HybridQueue::new(Seq::once("a".to_string()))
        .with_last("b".to_string())
        .with_last("c".to_string());
    assert_eq!(queue.collect::<String>(), "abc");
}

#[test_case(2, vec![1, 4] ; "parity")]
#[test_case(3, vec![1, 3, 5] ; "mod three")]
#[test_case(1, vec![1] ; "single class")]
fn distinct_by_residue(modulo: i32, expected: Vec<i32>) {
    let seq = Seq::from_vec(vec![1, 3, 4, 5, 8]).distinct_by(move |x| x % modulo);
    assert_eq!(seq.to_vec(), expected);
}

#[test_case("before", vec![1, 2] ; "before")]
#[test_case("not_before", vec![3, 4, 3] ; "not before")]
#[test_case("not_after", vec![1, 2, 3] ; "not after")]
fn windows_around_first_three(mode: &str, expected: Vec<i32>) {
    let seq = Seq::from_vec(vec![1, 2, 3, 4, 3]);
    let is_three = |x: &i32| *x == 3;
    let window = match mode {
        "before" => seq.before(is_three),
        "not_before" => seq.not_before(is_three),
        "not_after" => seq.not_after(is_three),
        other => panic!("unknown mode {other}"),
    };
    assert_eq!(window.to_vec(), expected);
}

#[test]
fn memoized_pipeline_runs_upstream_once() {
    let (source, probe) = probed((1..=6).collect::<Vec<u32>>());
    let evens = source
        .filter(|x| x % 2 == 0)
        .map(|x| x * 10)
        .memoize();

    assert_eq!(evens.to_vec(), vec![20, 40, 60]);
    assert_eq!(evens.to_vec(), vec![20, 40, 60]);
    assert_eq!(evens.count(), 3);
    assert_eq!(evens.get(1), Some(40));
    assert_eq!(probe.starts(), 1);
    assert_eq!(probe.pulls(), 6);
}

#[test]
fn bounded_depth_first_with_config() {
    let config = TraversalConfig::depth_first().with_max_depth(2);
    let labels = Seq::once("1".to_string())
        .traverse(config, |label: &String| dotted_children(label, 10))
        .to_vec();
    assert_eq!(labels, vec!["1", "1.1", "1.1.1", "1.1.2", "1.2", "1.2.1", "1.2.2"]);
}

#[test]
fn sorted_auto_then_distinct() {
    let seq = Seq::from_vec(vec![10, 2, 33, 2, 10, 4]);
    let sorted = seq.sorted_auto(SortOrder::Descending).distinct();
    assert_eq!(sorted.to_vec(), vec![33, 10, 4, 2]);
}

#[test]
fn interleave_skips_exhausted_sources() {
    let merged = Seq::interleave(vec![
        Seq::from_vec(vec!["a1", "a2", "a3"]),
        Seq::empty(),
        Seq::from_vec(vec!["c1"]),
    ]);
    assert_eq!(merged.to_vec(), vec!["a1", "c1", "a2", "a3"]);
}
