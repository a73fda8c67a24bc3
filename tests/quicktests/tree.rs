use pbst::{NodeId, Tree, Value};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a map counting how often each value should be in it.
/// This way we can ensure that after a random smattering of inserts and deletes we have the same
/// multiset of values.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, counts: &mut BTreeMap<i8, usize>) {
    for op in ops {
        match *op {
            Op::Insert(v) => {
                tree.insert(v, v).unwrap();
                *counts.entry(v).or_default() += 1;
            }
            Op::Remove(v) => {
                let removed = tree.delete(v).unwrap();
                match counts.get_mut(&v) {
                    Some(count) => {
                        assert_eq!(removed.map(|r| r.properties), Some(v));
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(&v);
                        }
                    }
                    None => assert!(removed.is_none()),
                }
            }
        }
    }
}

/// Walks every reachable node through the public API and checks the parent links agree with the
/// child links. Returns how many nodes were reached.
fn check_links(tree: &Tree<i8>) -> usize {
    let mut reached = 0;
    let mut stack: Vec<(NodeId, Option<NodeId>)> =
        tree.root().map(|root| (root, None)).into_iter().collect();
    while let Some((id, parent)) = stack.pop() {
        let node = tree.get(id).expect("reachable nodes resolve");
        assert_eq!(node.parent(), parent);
        reached += 1;
        stack.extend(node.left().map(|child| (child, Some(id))));
        stack.extend(node.right().map(|child| (child, Some(id))));
    }
    reached
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut counts = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut counts);

        let expected: Vec<Value> = counts
            .iter()
            .flat_map(|(&v, &n)| std::iter::repeat(Value::from(v)).take(n))
            .collect();
        let actual: Vec<Value> = tree.iter().map(|node| node.value().clone()).collect();

        actual == expected
            && tree.size() == expected.len()
            && check_links(&tree) == tree.size()
            && tree.is_empty() == (tree.size() == 0)
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree = Tree::from_entries(xs.iter().map(|&x| (x, x))).unwrap();

        xs.iter().all(|&x| tree.has(x).unwrap())
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = Tree::from_entries(xs.iter().map(|&x| (x, x))).unwrap();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|&x| tree.find(x).unwrap().is_none())
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::from_entries(xs.iter().map(|&x| (x, x))).unwrap();
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while tree.delete(*delete).unwrap().is_some() {}
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        deletes.iter().all(|&x| !tree.has(x).unwrap())
            && still_present.iter().all(|&x| tree.has(x).unwrap())
            && tree.size() == still_present.len()
    }
}

quickcheck::quickcheck! {
    fn sort_is_non_decreasing(xs: Vec<i16>) -> bool {
        let tree = Tree::from_entries(xs.iter().map(|&x| (x, ()))).unwrap();
        match tree.sort() {
            Some(path) => {
                let values: Vec<&Value> = path.values(&tree).collect();
                values.len() == xs.len() && values.windows(2).all(|pair| pair[0] <= pair[1])
            }
            None => xs.is_empty(),
        }
    }
}

quickcheck::quickcheck! {
    fn delete_range_leaves_nothing_in_range(xs: Vec<i8>, a: i8, b: i8) -> bool {
        let mut tree = Tree::from_entries(xs.iter().map(|&x| (x, x))).unwrap();
        let (start, end) = (a.min(b), a.max(b));
        let in_range = xs.iter().filter(|&&x| start <= x && x <= end).count();

        let removed = tree.delete_range(start, end).unwrap();

        removed == in_range
            && tree.size() == xs.len() - in_range
            && tree.find_range(start, end).unwrap().is_none()
            && check_links(&tree) == tree.size()
    }
}
