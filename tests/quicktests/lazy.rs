use lazy_bst::{Error, LazyTree};

use std::collections::{BTreeSet, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and to two sets: one holding every element that should
/// be physically present and one holding the subset that should be logically present. This way we
/// can ensure that after a random smattering of inserts and deletes the tree agrees with both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut LazyTree<T>, hard: &mut BTreeSet<T>, soft: &mut BTreeSet<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(x.clone());
                hard.insert(x.clone());
                soft.insert(x.clone());
            }
            Op::Remove(x) => {
                bst.remove(x);
                soft.remove(x);
            }
            Op::RemoveHard(x) => {
                bst.remove_hard(x);
                hard.remove(x);
                soft.remove(x);
            }
            Op::CollectGarbage => {
                bst.collect_garbage();
                hard.retain(|x| soft.contains(x));
            }
        }
    }
}

fn traverse_soft<T: Clone>(tree: &LazyTree<T>) -> Vec<T> {
    let mut out = Vec::new();
    tree.traverse_soft(&mut |x: &T| out.push(x.clone()));
    out
}

fn traverse_hard<T: Clone>(tree: &LazyTree<T>) -> Vec<T> {
    let mut out = Vec::new();
    tree.traverse_hard(&mut |x: &T| out.push(x.clone()));
    out
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = LazyTree::new();
    let mut hard = BTreeSet::new();
    let mut soft = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut hard, &mut soft);
    tree.size() == soft.len()
        && tree.size_hard() == hard.len()
        && traverse_soft(&tree) == soft.iter().copied().collect::<Vec<_>>()
        && traverse_hard(&tree) == hard.iter().copied().collect::<Vec<_>>()
}

#[quickcheck]
fn hard_traversal_is_sorted(xs: Vec<i8>) -> bool {
    let tree: LazyTree<_> = xs.iter().copied().collect();

    let all = traverse_hard(&tree);
    all.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn soft_traversal_is_hard_minus_deleted(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let deleted: HashSet<_> = deletes.into_iter().collect();
    let expected = traverse_hard(&tree)
        .into_iter()
        .filter(|x| !deleted.contains(x))
        .collect::<Vec<_>>();
    traverse_soft(&tree) == expected
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: LazyTree<_> = xs.iter().copied().collect();

    xs.iter()
        .all(|x| tree.contains(x) && tree.contains_hard(x) && tree.find(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: LazyTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(Error::NotFound) && tree.find_hard(x) == Err(Error::NotFound))
}

#[quickcheck]
fn soft_removal_keeps_node(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    tree.insert(x);
    let (size, size_hard) = (tree.size(), tree.size_hard());

    tree.remove(&x);
    !tree.contains(&x)
        && tree.contains_hard(&x)
        && tree.size() == size - 1
        && tree.size_hard() == size_hard
}

#[quickcheck]
fn reinsert_reuses_node(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    tree.insert(x);
    tree.remove(&x);
    let size_hard = tree.size_hard();

    tree.insert(x) && tree.contains(&x) && tree.size_hard() == size_hard
}

#[quickcheck]
fn hard_removal_drops_node(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    tree.insert(x);
    let size_hard = tree.size_hard();

    tree.remove_hard(&x) == Some(x)
        && !tree.contains(&x)
        && !tree.contains_hard(&x)
        && tree.size_hard() == size_hard - 1
}

#[quickcheck]
fn garbage_collection_equalizes(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    init_logging();
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    tree.collect_garbage();
    tree.size() == tree.size_hard() && traverse_soft(&tree) == traverse_hard(&tree)
}

#[quickcheck]
fn clone_is_deep(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    for delete in deletes.iter().step_by(2) {
        tree.remove(delete);
    }
    let before = traverse_hard(&tree);

    let mut copy = tree.clone();
    let copied_faithfully = traverse_hard(&copy) == before
        && copy.size() == tree.size()
        && copy.size_hard() == tree.size_hard();

    for delete in &deletes {
        copy.remove_hard(delete);
    }
    copy.collect_garbage();
    copy.clear();

    copied_faithfully
        && traverse_hard(&tree) == before
        && xs.iter().all(|x| tree.contains_hard(x))
}

fn or_empty<T>(x: Option<&T>) -> Result<&T, Error> {
    x.ok_or(Error::EmptyCollection)
}

#[quickcheck]
fn min_max_are_traversal_ends(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: LazyTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let soft = traverse_soft(&tree);
    let hard = traverse_hard(&tree);

    tree.find_min() == or_empty(soft.first())
        && tree.find_max() == or_empty(soft.last())
        && tree.find_min_hard() == or_empty(hard.first())
        && tree.find_max_hard() == or_empty(hard.last())
}
