// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod filter;
pub mod observer;

pub use filter::{Emission, Filter};
pub use observer::{NodeRef, Observer};
