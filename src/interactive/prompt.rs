//
//  atlassian-api
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Prompt helpers built on `dialoguer`.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_api::interactive::{prompt_input, prompt_password};
//!
//! let username = prompt_input("Username")?;
//! let token = prompt_password("API token")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::io::IsTerminal;

use anyhow::Result;
use console::Term;
use dialoguer::{Confirm, Input, Password};

/// Returns `true` if both stdin and stderr are attached to a terminal.
pub fn is_interactive() -> bool {
    Term::stderr().is_term() && std::io::stdin().is_terminal()
}

/// Prompts for a line of text.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for a line of text, offering `default`.
pub fn prompt_input_with_default(message: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(input)
}

/// Prompts for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Asks a yes/no question.
pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
