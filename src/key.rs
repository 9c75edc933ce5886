/// Lookup equality for map keys.
///
/// [`matches`](Key::matches) decides whether a stored key and a probe key
/// name the same entry. The default is plain `==`. Floating point types
/// override it so that a NaN key matches a NaN probe; under `PartialEq`
/// alone a NaN compares unequal to everything, itself included, and an
/// entry stored under it could never be found or removed again.
///
/// The zero sign is not special-cased: `0.0` matches `-0.0`.
///
/// Key types with a well-behaved `PartialEq` opt in with an empty impl:
///
/// ```
/// use seqmap::{Key, SeqMap};
///
/// #[derive(PartialEq)]
/// struct UserId(u64);
///
/// impl Key for UserId {}
///
/// let mut map = SeqMap::new();
/// map.insert(UserId(7), "alice");
/// assert!(map.contains_key(&UserId(7)));
/// ```
pub trait Key: PartialEq {
    /// Returns `true` when `self` and `other` name the same entry.
    #[inline]
    fn matches(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! impl_key {
    ($($t:ty),* $(,)?) => {
        $(impl Key for $t {})*
    };
}

impl_key!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    bool, char, (),
    String, str,
);

impl Key for f32 {
    #[inline]
    fn matches(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl Key for f64 {
    #[inline]
    fn matches(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl<T: Key + ?Sized> Key for &T {
    #[inline]
    fn matches(&self, other: &Self) -> bool {
        T::matches(*self, *other)
    }
}

impl<T: Key> Key for Option<T> {
    fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.matches(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Key> Key for Vec<T> {
    fn matches(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.matches(b))
    }
}

impl<A: Key, B: Key> Key for (A, B) {
    fn matches(&self, other: &Self) -> bool {
        self.0.matches(&other.0) && self.1.matches(&other.1)
    }
}

#[test]
fn test_matches_default() {
    assert!(1u32.matches(&1));
    assert!(!1u32.matches(&2));
    assert!(<str as Key>::matches("a", "a"));
    assert!(Some(3i64).matches(&Some(3)));
    assert!(!Some(3i64).matches(&None));
    assert!(None::<i64>.matches(&None));
}

#[test]
fn test_matches_floats() {
    assert!(1.5f64.matches(&1.5));
    assert!(!1.5f64.matches(&2.5));
    assert!(f64::NAN.matches(&f64::NAN));
    assert!(!f64::NAN.matches(&1.0));
    assert!(f32::NAN.matches(&f32::NAN));
    // the zero sign is deliberately ignored
    assert!(0.0f64.matches(&-0.0));
}

#[test]
fn test_matches_compound() {
    assert!(vec![f64::NAN, 1.0].matches(&vec![f64::NAN, 1.0]));
    assert!(!vec![f64::NAN].matches(&vec![f64::NAN, 1.0]));
    assert!((1u8, f32::NAN).matches(&(1u8, f32::NAN)));
}
