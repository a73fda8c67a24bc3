use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<V, P> {
    /// Insert the value with its properties
    Insert(V, P),
    /// Delete one node holding the value
    Remove(V),
    /// Delete every node between the two values (in either order)
    RemoveRange(V, V),
    /// Compare in-order iteration against the model
    Iter,
}

impl<V, P> Arbitrary for Op<V, P>
where
    V: Arbitrary,
    P: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are
    /// weighted up so trees actually grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(V::arbitrary(g), P::arbitrary(g)),
            1 => Op::Remove(V::arbitrary(g)),
            2 => Op::RemoveRange(V::arbitrary(g), V::arbitrary(g)),
            3 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
