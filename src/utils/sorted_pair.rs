/// A pair of elements sorted in increasing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element of the pair.
    #[inline]
    pub fn min(&self) -> T {
        self.0[0]
    }

    /// The largest element of the pair.
    #[inline]
    pub fn max(&self) -> T {
        self.0[1]
    }

    /// The pair as a tuple, smallest element first.
    #[inline]
    pub fn into_tuple(self) -> (T, T) {
        (self.0[0], self.0[1])
    }
}
