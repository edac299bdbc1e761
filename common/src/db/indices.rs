use std::fmt::Debug;

macro_rules! define_index {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn new(id: usize) -> Self {
                Self(id as u32)
            }
            #[inline(always)]
            pub fn index(&self) -> usize {
                self.0 as usize
            }

            /// Accepts a raw signed entry from an index array when it lies in `[0, bound)`.
            #[inline(always)]
            pub fn from_raw(raw: i32, bound: usize) -> Option<Self> {
                usize::try_from(raw)
                    .ok()
                    .filter(|&id| id < bound)
                    .map(Self::new)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

define_index!(NetId);
define_index!(PinId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_bounds() {
        assert_eq!(PinId::from_raw(0, 3), Some(PinId(0)));
        assert_eq!(PinId::from_raw(2, 3), Some(PinId(2)));
        assert_eq!(PinId::from_raw(3, 3), None);
        assert_eq!(PinId::from_raw(-1, 3), None);
        assert_eq!(NetId::from_raw(0, 0), None);
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", NetId::new(5)), "NetId(5)");
        assert_eq!(PinId::new(9).index(), 9);
    }
}
