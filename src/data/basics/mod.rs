// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod address;
pub mod word;

pub use address::*;
pub use word::*;
