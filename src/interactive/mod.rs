//
//  atlassian-api
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive terminal prompts.
//!
//! Used by `atl auth login` when the username or secret is not given on the
//! command line. Callers check [`is_interactive`] first and fail with a
//! helpful message instead of blocking on a closed stdin.

mod prompt;

pub use prompt::*;
