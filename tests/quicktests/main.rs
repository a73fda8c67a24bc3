mod tree;

use quickcheck::{Arbitrary, Gen};

/// Things to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<V> {
    /// Insert the value
    Insert(V),
    /// Remove one node holding the value
    Remove(V),
}

impl<V> Arbitrary for Op<V>
where
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(V::arbitrary(g)),
            1 => Op::Remove(V::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
