pub mod road;
pub use road::*;
pub mod building;
pub use building::*;
pub mod connector;
pub use connector::*;

/// Type T is insertable into Self
pub trait Insertable<Data> {
    type Key;
    /// Insert Data into Self
    fn insert(&mut self, data: Data) -> Self::Key;
    /// Insert many Data into Self
    fn insert_many<I: IntoIterator<Item = Data>>(&mut self, data: I) -> Vec<Self::Key> {
        data.into_iter().map(|x| self.insert(x)).collect()
    }
}
