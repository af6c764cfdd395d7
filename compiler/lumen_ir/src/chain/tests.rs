use super::FieldAccessChain;

#[test]
fn equality_is_element_wise() {
    assert_eq!(FieldAccessChain::new(&[1, 2]), FieldAccessChain::from([1, 2]));
    assert_ne!(FieldAccessChain::new(&[1, 2]), FieldAccessChain::new(&[2, 1]));
    assert_ne!(FieldAccessChain::new(&[1]), FieldAccessChain::new(&[1, 0]));
}

#[test]
fn single_and_append() {
    let chain = FieldAccessChain::single(3).append(1);
    assert_eq!(chain.indices(), &[3, 1]);
    assert_eq!(chain.len(), 2);
    assert!(!chain.is_empty());
    assert!(FieldAccessChain::default().is_empty());
}

#[test]
fn prefix_relations() {
    let parent = FieldAccessChain::from([1]);
    let child = FieldAccessChain::from([1, 2]);
    let sibling = FieldAccessChain::from([2, 2]);

    assert!(parent.is_prefix_of(&child));
    assert!(child.is_prefix_of(&child));
    assert!(!child.is_prefix_of(&parent));
    assert!(!parent.is_prefix_of(&sibling));

    assert_eq!(child.prefix(1), Some(parent.clone()));
    assert_eq!(child.prefix(3), None);
}

#[test]
fn strip_prefix_requires_proper_prefix() {
    let chain = FieldAccessChain::from([0, 4, 2]);
    assert_eq!(
        chain.strip_prefix(&FieldAccessChain::from([0])),
        Some(FieldAccessChain::from([4, 2]))
    );
    assert_eq!(chain.strip_prefix(&chain), None);
    assert_eq!(chain.strip_prefix(&FieldAccessChain::from([1])), None);
}

#[test]
fn display_lists_indices() {
    assert_eq!(FieldAccessChain::from([0, 1, 7]).to_string(), "[0, 1, 7]");
    assert_eq!(FieldAccessChain::default().to_string(), "[]");
}

#[test]
fn collects_from_iterator() {
    let chain: FieldAccessChain = (0..3).collect();
    assert_eq!(chain, FieldAccessChain::from([0, 1, 2]));
}
