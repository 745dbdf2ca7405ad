//! Identifier management using string interning for efficient string storage and comparison
//!
//! Diagrams, coordinates, lines, labels, and the rendered elements derived from
//! them are all named by an [`Id`]. Rendered line segments carry compound ids of
//! the form `<line>_<segment>`; [`Id::owner`] recovers the owning line.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Serialize};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Separator between a line id and a segment index in a compound element id.
pub const SEGMENT_SEPARATOR: char = '_';

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use plansheet_core::identifier::Id;
///
/// let line = Id::new("1001");
/// let segment = line.segment(2);
/// assert_eq!(segment, "1001_2");
/// assert_eq!(segment.owner(), line);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the compound element id of segment `index` of this line.
    pub fn segment(&self, index: usize) -> Self {
        let name = format!("{self}{SEGMENT_SEPARATOR}{index}");
        Self::new(&name)
    }

    /// Truncates a compound element id to the id of the element owning it.
    ///
    /// The owner is the text before the last [`SEGMENT_SEPARATOR`]; an id
    /// without a separator owns itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use plansheet_core::identifier::Id;
    ///
    /// assert_eq!(Id::new("1001_0").owner(), "1001");
    /// assert_eq!(Id::new("boundary_7_3").owner(), "boundary_7");
    /// assert_eq!(Id::new("1001").owner(), "1001");
    /// ```
    pub fn owner(&self) -> Self {
        let name = self.to_string();
        match name.rsplit_once(SEGMENT_SEPARATOR) {
            Some((owner, _)) => Self::new(owner),
            None => *self,
        }
    }

    /// Returns true if the identifier is the empty string
    pub fn is_empty(&self) -> bool {
        self == ""
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
