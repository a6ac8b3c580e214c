use std::ops::Range;

/// A trait for reacting to an edit script from the "old" version to
/// the "new" version.
///
/// All positions are indices into the sequences handed to the algorithm.
/// Within one region of the diff the callbacks always fire in the same
/// order: the equal run, then the deletion, then the insertion.
pub trait DiffHook: Sized {
    type Error;

    /// Called for a run that is equal in both versions.  Both ranges have
    /// the same length.
    fn equal(&mut self, old: Range<usize>, new: Range<usize>) -> Result<(), Self::Error> {
        let _old = old;
        let _new = new;
        Ok(())
    }

    /// Called when the items in `old` need to be deleted from the old
    /// version.  `new_index` is where the deletion lines up in the new
    /// version.
    fn delete(&mut self, old: Range<usize>, new_index: usize) -> Result<(), Self::Error> {
        let _old = old;
        let _new_index = new_index;
        Ok(())
    }

    /// Called when the items in `new` need to be inserted into the old
    /// version at `old_index`.
    fn insert(&mut self, old_index: usize, new: Range<usize>) -> Result<(), Self::Error> {
        let _old_index = old_index;
        let _new = new;
        Ok(())
    }

    /// Always called at the end of the algorithm.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'a, D: DiffHook + 'a> DiffHook for &'a mut D {
    type Error = D::Error;

    fn equal(&mut self, old: Range<usize>, new: Range<usize>) -> Result<(), Self::Error> {
        (*self).equal(old, new)
    }

    fn delete(&mut self, old: Range<usize>, new_index: usize) -> Result<(), Self::Error> {
        (*self).delete(old, new_index)
    }

    fn insert(&mut self, old_index: usize, new: Range<usize>) -> Result<(), Self::Error> {
        (*self).insert(old_index, new)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (*self).finish()
    }
}
