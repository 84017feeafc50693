// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod receipt;
mod selection;

pub use receipt::*;
pub use selection::*;
