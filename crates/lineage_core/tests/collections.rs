use lineage_core::{LinkedSet, SetOrder};

#[test]
fn add_skips_present_values_without_reordering() {
    let mut set = LinkedSet::ordered();
    let mut fired = 0;
    set.add(["b", "a"], |_| fired += 1);
    set.add(["a", "c", "b"], |_| fired += 1);

    assert_eq!(set.to_vec(), vec!["b", "a", "c"]);
    assert_eq!(fired, 3);
    assert_eq!(set.first(), Some(&"b"));
}

#[test]
fn replace_law_holds_for_ordered_sets() {
    let mut set = LinkedSet::new(SetOrder::Insertion);
    set.add([1, 2, 3, 4], |_| {});

    let mut added = Vec::new();
    let mut removed = Vec::new();
    set.replace(
        [5, 3, 1, 5],
        |value| added.push(*value),
        |value| removed.push(*value),
    );

    assert_eq!(set.to_vec(), vec![1, 3, 5]);
    assert_eq!(removed, vec![2, 4]);
    assert_eq!(added, vec![5]);
}

#[test]
fn replace_with_same_content_fires_nothing() {
    let mut set = LinkedSet::unordered();
    set.add(["x", "y"], |_| {});
    set.replace(
        ["y", "x"],
        |_| panic!("nothing new"),
        |_| panic!("nothing stale"),
    );
    assert_eq!(set.len(), 2);
    assert!(set.contains(&"x"));
    assert!(set.contains(&"y"));
}

#[test]
fn iteration_borrows_members_in_order() {
    let mut set = LinkedSet::ordered();
    set.add([10, 20, 30], |_| {});
    let doubled: Vec<i32> = (&set).into_iter().map(|value| value * 2).collect();
    assert_eq!(doubled, vec![20, 40, 60]);
    assert_eq!(set.iter().count(), 3);
}
