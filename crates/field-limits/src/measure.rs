//! Length measurement for field values
//!
//! Text is measured in characters, collections in elements. The unit is an
//! associated constant, so every field type has one fixed classification.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

/// What a measured length counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Characters,
    Elements,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Characters => write!(f, "characters"),
            Unit::Elements => write!(f, "elements"),
        }
    }
}

/// A field value with a measurable length
pub trait Measure {
    const UNIT: Unit;

    fn measure(&self) -> usize;
}

impl Measure for str {
    const UNIT: Unit = Unit::Characters;

    fn measure(&self) -> usize {
        self.chars().count()
    }
}

impl Measure for String {
    const UNIT: Unit = Unit::Characters;

    fn measure(&self) -> usize {
        self.as_str().measure()
    }
}

impl Measure for Cow<'_, str> {
    const UNIT: Unit = Unit::Characters;

    fn measure(&self) -> usize {
        self.as_ref().measure()
    }
}

impl<T> Measure for [T] {
    const UNIT: Unit = Unit::Elements;

    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Measure for [T; N] {
    const UNIT: Unit = Unit::Elements;

    fn measure(&self) -> usize {
        N
    }
}

macro_rules! impl_collection_measure {
    ($($ty:ident<$($param:ident),+>),+ $(,)?) => {
        $(
            impl<$($param),+> Measure for $ty<$($param),+> {
                const UNIT: Unit = Unit::Elements;

                fn measure(&self) -> usize {
                    self.len()
                }
            }
        )+
    };
}

impl_collection_measure!(
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    HashSet<T>,
    BTreeMap<K, V>,
    HashMap<K, V>,
);

impl<M: Measure + ?Sized> Measure for &M {
    const UNIT: Unit = M::UNIT;

    fn measure(&self) -> usize {
        (**self).measure()
    }
}

impl<M: Measure + ?Sized> Measure for Box<M> {
    const UNIT: Unit = M::UNIT;

    fn measure(&self) -> usize {
        self.as_ref().measure()
    }
}

/// An unset optional field measures as empty
impl<M: Measure> Measure for Option<M> {
    const UNIT: Unit = M::UNIT;

    fn measure(&self) -> usize {
        self.as_ref().map_or(0, Measure::measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_of<M: Measure + ?Sized>(_: &M) -> Unit {
        M::UNIT
    }

    #[test]
    fn test_text_counts_characters_not_bytes() {
        assert_eq!("ecnepsnai".measure(), 9);
        assert_eq!("héllo".to_string().measure(), 5);
        assert_eq!(Cow::Borrowed("日本語").measure(), 3);
        assert_eq!(unit_of("x"), Unit::Characters);
    }

    #[test]
    fn test_bytes_are_elements() {
        let password = b"hunter2".to_vec();
        assert_eq!(password.measure(), 7);
        assert_eq!(unit_of(&password), Unit::Elements);
    }

    #[test]
    fn test_collections() {
        let set: HashSet<u32> = [1, 2, 3].into_iter().collect();
        let map: BTreeMap<&str, u8> = [("a", 1)].into_iter().collect();
        let deque: VecDeque<char> = VecDeque::from(vec!['a', 'b']);
        assert_eq!(set.measure(), 3);
        assert_eq!(map.measure(), 1);
        assert_eq!(deque.measure(), 2);
        assert_eq!([0u8; 4].measure(), 4);
        assert_eq!(unit_of(&[0u8; 4]), Unit::Elements);
    }

    #[test]
    fn test_option_unset_is_empty() {
        let unset: Option<String> = None;
        assert_eq!(unset.measure(), 0);
        assert_eq!(Some(vec![1, 2]).measure(), 2);
        assert_eq!(unit_of(&unset), Unit::Characters);
    }

    #[test]
    fn test_wrappers_delegate() {
        let boxed: Box<str> = "abc".into();
        assert_eq!(boxed.measure(), 3);
        assert_eq!((&"abcd").measure(), 4);
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::Characters.to_string(), "characters");
        assert_eq!(Unit::Elements.to_string(), "elements");
    }
}
