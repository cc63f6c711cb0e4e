// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

macro_rules! id_type {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_type!(RoiId, "roi");
id_type!(AffordanceId, "affordance");
id_type!(ContentId, "content");
id_type!(SubscriptionId, "sub");
