// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across ethinfo.
//!
//! - Wei amounts and their exact decimal renderings
//! - Fee data as cached between requests
//! - Account snapshots as persisted per address

pub mod account;
pub mod fees;
pub mod wei;

pub use account::AccountSnapshot;
pub use fees::FeeData;
pub use wei::{format_units, WeiAmount};
