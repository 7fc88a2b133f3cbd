use super::Serializer;

use quill_core::driver::{Capability, Flavor};

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer::for_capability(&Capability::SQLITE)
    }

    pub fn postgresql() -> Serializer {
        Serializer::for_capability(&Capability::POSTGRESQL)
    }

    pub fn mysql() -> Serializer {
        Serializer::for_capability(&Capability::MYSQL)
    }

    /// Serializer for the dialect a connection reports.
    pub fn for_capability(capability: &'static Capability) -> Serializer {
        Serializer { capability }
    }

    pub(super) fn quote(&self) -> char {
        match self.flavor() {
            Flavor::Mysql => '`',
            Flavor::Postgresql | Flavor::Sqlite => '"',
        }
    }
}
