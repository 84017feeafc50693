// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

/// Domain separation prefix for an object type that might be hashed.
/// This ensures, for example, the hash of a draw receipt will never collide with a derived draw index.
pub type HashID = &'static str;

// Hash IDs for specific object types, in lexicographic order.
// Hash IDs must be PREFIX-FREE (i.e. no hash ID is a prefix of another)!
pub const DRAW_INDEX: HashID = "DI";
pub const DRAW_RECEIPT: HashID = "DR";
pub const MESSAGE: HashID = "MX";
pub const PARTICIPANT_LIST: HashID = "PL";
