//! Raw connection records between stations.

use std::hash::{Hash, Hasher};

use super::station::{LineId, StationId};

/// An unordered pair of stations that are directly linked.
///
/// `Connection::new(a, b)` and `Connection::new(b, a)` compare equal and hash
/// the same; the line id is carried for diagnostics only and does not take
/// part in equality.
#[derive(Debug, Clone, Copy)]
pub struct Connection {
    pub a: StationId,
    pub b: StationId,
    pub line: Option<LineId>,
}

impl Connection {
    /// Create a connection with no line attribution.
    pub fn new(a: StationId, b: StationId) -> Self {
        Self { a, b, line: None }
    }

    /// Create a connection recorded against a line.
    pub fn on_line(a: StationId, b: StationId, line: LineId) -> Self {
        Self {
            a,
            b,
            line: Some(line),
        }
    }

    /// The endpoints in ascending order.
    pub fn key(&self) -> (StationId, StationId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// True if both endpoints are the same station.
    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn id(n: u32) -> StationId {
        StationId::new(n)
    }

    #[test]
    fn equality_ignores_direction() {
        assert_eq!(Connection::new(id(1), id(2)), Connection::new(id(2), id(1)));
        assert_ne!(Connection::new(id(1), id(2)), Connection::new(id(1), id(3)));
    }

    #[test]
    fn equality_ignores_line() {
        let a = Connection::on_line(id(1), id(2), LineId::new(10));
        let b = Connection::on_line(id(2), id(1), LineId::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(Connection::new(id(5), id(3)));
        assert!(set.contains(&Connection::new(id(3), id(5))));
        assert!(!set.contains(&Connection::new(id(3), id(4))));
    }

    #[test]
    fn key_is_sorted() {
        assert_eq!(Connection::new(id(9), id(2)).key(), (id(2), id(9)));
        assert_eq!(Connection::new(id(2), id(9)).key(), (id(2), id(9)));
    }

    #[test]
    fn self_loop() {
        assert!(Connection::new(id(4), id(4)).is_self_loop());
        assert!(!Connection::new(id(4), id(5)).is_self_loop());
    }
}
